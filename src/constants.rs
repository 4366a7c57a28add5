//! Constants
//!
//! Storage keys, route conventions and file names shared across the crate.

/// Storage key holding the persisted language preference
pub const LANG_STORAGE_KEY: &str = "lang";

/// Leading path segment that marks French-localized routes
pub const FR_ROUTE_PREFIX: &str = "/fr";

/// Root route
pub const ROOT_ROUTE: &str = "/";

/// Application config file name inside the config directory
pub const APP_CONFIG_FILE: &str = "blog-lang.toml";

/// Preferences storage file name inside the config directory
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Default site domain when no override is set
pub const DEFAULT_SITE_DOMAIN: &str = "bnei.dev";

/// Environment variable overriding the site protocol
pub const SITE_PROTOCOL_ENV: &str = "URARA_SITE_PROTOCOL";

/// Environment variable overriding the site domain
pub const SITE_DOMAIN_ENV: &str = "URARA_SITE_DOMAIN";
