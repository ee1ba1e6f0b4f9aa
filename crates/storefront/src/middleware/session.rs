//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The session
//! is the storefront's durable per-browser slot: the cart survives page
//! reloads through it, scoped to one browser profile via the session
//! cookie.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "oli_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// Note: the store's `"tower_sessions"."session"` table must be created
/// via migration.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> SessionManagerLayer<PostgresStore> {
    let store = PostgresStore::new(pool.clone());

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
mod tests {
    const SESSION_MIGRATION: &str =
        include_str!("../../migrations/20260801000004_create_sessions.sql");

    #[test]
    fn test_migration_provisions_the_store_default_schema() {
        // PostgresStore::new() reads and writes "tower_sessions"."session";
        // a table in public.session would never be touched.
        assert!(
            SESSION_MIGRATION.contains("CREATE SCHEMA IF NOT EXISTS \"tower_sessions\""),
            "migration must create the store's schema"
        );
        assert!(
            SESSION_MIGRATION.contains("\"tower_sessions\".\"session\""),
            "session table must be schema-qualified"
        );
    }
}
