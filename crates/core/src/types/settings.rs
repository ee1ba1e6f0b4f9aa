//! Site settings: a key/value bag with a typed view.
//!
//! Settings live in a key/value table so the back office can add keys
//! without migrations. [`SiteSettings`] is the typed projection the
//! storefront cares about; unknown keys pass through the raw map
//! untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Well-known setting keys.
pub mod setting_keys {
    pub const COMPANY_NAME: &str = "company_name";
    pub const WHATSAPP: &str = "whatsapp";
    pub const PHONE: &str = "phone";
    pub const ADDRESS: &str = "address";
    pub const BANNER_URL: &str = "banner_url";
    pub const LOGO_URL: &str = "logo_url";
    pub const DESCRIPTION: &str = "description";
}

/// Typed view over the settings table.
///
/// Missing keys default to empty strings; callers that need a value (like
/// checkout needing `whatsapp`) decide what an empty value means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub company_name: String,
    pub whatsapp: String,
    pub phone: String,
    pub address: String,
    pub banner_url: String,
    pub logo_url: String,
    pub description: String,
}

impl SiteSettings {
    /// Project the raw key/value map into the typed view.
    #[must_use]
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).cloned().unwrap_or_default();
        Self {
            company_name: get(setting_keys::COMPANY_NAME),
            whatsapp: get(setting_keys::WHATSAPP),
            phone: get(setting_keys::PHONE),
            address: get(setting_keys::ADDRESS),
            banner_url: get(setting_keys::BANNER_URL),
            logo_url: get(setting_keys::LOGO_URL),
            description: get(setting_keys::DESCRIPTION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_map_fills_known_keys() {
        let mut map = HashMap::new();
        map.insert("company_name".to_string(), "Oli Poli".to_string());
        map.insert("whatsapp".to_string(), "+55 (11) 98765-4321".to_string());
        map.insert("theme_color".to_string(), "#ff69b4".to_string());

        let settings = SiteSettings::from_map(&map);
        assert_eq!(settings.company_name, "Oli Poli");
        assert_eq!(settings.whatsapp, "+55 (11) 98765-4321");
        assert_eq!(settings.address, "");
    }
}
