//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS (the API is consumed cross-origin by the shop frontend)
//! 4. Session layer (tower-sessions with `PostgreSQL` store; holds the
//!    cart slot)
//! 5. Rate limiting (governor, submission routes only)

pub mod rate_limit;
pub mod session;

pub use rate_limit::submission_rate_limiter;
pub use session::create_session_layer;
