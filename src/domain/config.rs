//! Config - Site and Application Configuration
//!
//! Static site metadata, comment widget settings and the preferences used to
//! wire up the language store. All sections default to the published blog's
//! values so a partial TOML file only needs to override what differs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::constants::{
    APP_CONFIG_FILE, DEFAULT_SITE_DOMAIN, SITE_DOMAIN_ENV, SITE_PROTOCOL_ENV,
};
use crate::error::Result;
use crate::helpers::{get_or_create_config_dir, is_development};
use crate::i18n::Lang;
use crate::state::NavigationMode;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Site metadata
    pub site: SiteConfig,
    /// Post page configuration
    pub post: PostConfig,
    /// Language preference wiring
    pub preferences: PreferencesConfig,
}

impl AppConfig {
    /// Load configuration from `path`.
    ///
    /// A missing or blank file yields the defaults.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        info!(path = ?path, "Loading config file");
        let value = std::fs::read_to_string(path)?;
        if value.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = toml::from_str(&value).map_err(|e| {
            error!(error = %e, path = ?path, "Failed to parse config file");
            e
        })?;
        Ok(config)
    }

    /// Default config file location in the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_or_create_config_dir()?.join(APP_CONFIG_FILE))
    }
}

const SITE_DESCRIPTION: &str = "Welcome to my tech blog where I discuss technical aspects \
related to software development. I am a passionate developer with a deep interest in nodejs, \
golang, svelte, microservices, and kubernetes technologies.

Through my blog, I share my experiences and provide insights on topics related to these \
technologies, such as best practices, tips, tutorials, and other developer-focused resources. \
My goal is to share technical knowledge and help other developers learn and grow their skills.

In this blog, I explore the latest developments in these technologies, including updates on \
emerging trends, new features, and tools. Whether you are a beginner or an experienced \
developer, I cover topics that will help you improve your code quality, performance, and \
efficiency.

Join me in my tech exploration journey to discover the exciting world of nodejs, golang, \
svelte, microservices, and kubernetes. Subscribe to my blog and stay up-to-date with the \
latest trends in the industry and learn how to become a better developer.";

/// Site metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// URL scheme including separator, e.g. `https://`. Filled in by
    /// [`SiteConfig::resolve`] when unset.
    pub protocol: Option<String>,
    /// Site domain without scheme
    pub domain: String,
    pub title: String,
    pub subtitle: String,
    /// BCP 47 tag of the site's primary language
    pub lang: String,
    pub description: String,
    pub author: Author,
    /// Browser theme color
    pub theme_color: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            protocol: None,
            domain: DEFAULT_SITE_DOMAIN.to_string(),
            title: "Blog".to_string(),
            subtitle: "Passionate developper - Teacher".to_string(),
            lang: "en-US".to_string(),
            description: SITE_DESCRIPTION.to_string(),
            author: Author::default(),
            theme_color: "#3D4451".to_string(),
        }
    }
}

impl SiteConfig {
    /// Apply protocol and domain overrides.
    ///
    /// The protocol comes from the override, then the configured value, then
    /// `http://` for development builds and `https://` otherwise.
    pub fn resolve(
        mut self,
        protocol: Option<String>,
        domain: Option<String>,
        dev: bool,
    ) -> Self {
        let configured = self.protocol.take().filter(|p| !p.is_empty());
        let protocol = match protocol.filter(|p| !p.is_empty()).or(configured) {
            Some(protocol) => protocol,
            None if dev => "http://".to_string(),
            None => "https://".to_string(),
        };
        self.protocol = Some(protocol);
        if let Some(domain) = domain.filter(|d| !d.is_empty()) {
            self.domain = domain;
        }
        self
    }

    /// Apply overrides from `URARA_SITE_PROTOCOL` and `URARA_SITE_DOMAIN`
    pub fn with_env_overrides(self) -> Self {
        self.resolve(
            std::env::var(SITE_PROTOCOL_ENV).ok(),
            std::env::var(SITE_DOMAIN_ENV).ok(),
            is_development(),
        )
    }

    /// Absolute site URL, `https://` when the protocol is unresolved
    pub fn url(&self) -> String {
        format!(
            "{}{}",
            self.protocol.as_deref().unwrap_or("https://"),
            self.domain
        )
    }
}

/// Site author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Author {
    /// Avatar path relative to the site root
    pub avatar: String,
    pub name: String,
    pub status: String,
    pub bio: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            avatar: "/assets/maskable@512.png".to_string(),
            name: "Mohammad-Amine BANAEI".to_string(),
            status: "🧑🏽‍💻".to_string(),
            bio: "From Paris with love".to_string(),
        }
    }
}

/// Post page configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PostConfig {
    pub comment: CommentConfig,
}

/// Comment providers enabled on posts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommentConfig {
    /// Enabled providers, in display order
    #[serde(rename = "use")]
    pub use_providers: Vec<String>,
    pub giscus: Option<GiscusConfig>,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            use_providers: vec!["giscus".to_string()],
            giscus: Some(GiscusConfig::default()),
        }
    }
}

impl CommentConfig {
    /// Giscus settings, if giscus is an enabled provider
    pub fn enabled_giscus(&self) -> Option<&GiscusConfig> {
        self.use_providers
            .iter()
            .any(|p| p == "giscus")
            .then_some(self.giscus.as_ref())
            .flatten()
    }
}

/// giscus comment widget parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GiscusConfig {
    /// `owner/name` of the discussions repository
    pub repo: String,
    pub repo_id: String,
    pub category_id: String,
    pub reactions_enabled: bool,
    pub theme: String,
    /// Widget UI language
    pub lang: String,
    /// `lazy` or `eager`
    pub loading: String,
}

impl Default for GiscusConfig {
    fn default() -> Self {
        Self {
            repo: "mohammadbnei/blog-2023".to_string(),
            repo_id: "R_kgDOJoATxg".to_string(),
            category_id: "DIC_kwDOJoATxs4CW0Bo".to_string(),
            reactions_enabled: true,
            theme: "preferred_color_scheme".to_string(),
            lang: Lang::En.as_str().to_string(),
            loading: "lazy".to_string(),
        }
    }
}

impl GiscusConfig {
    /// Copy with the widget language following the reader's preference
    pub fn with_lang(&self, lang: Lang) -> Self {
        Self {
            lang: lang.as_str().to_string(),
            ..self.clone()
        }
    }
}

/// How the language store is wired
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Redirect between `/` and `/fr` route trees on language change
    pub navigate_on_change: bool,
    /// Preferences file; the platform config directory when unset
    pub storage_file: Option<PathBuf>,
}

impl PreferencesConfig {
    /// Navigation mode for the language store
    pub fn navigation_mode(&self) -> NavigationMode {
        if self.navigate_on_change {
            NavigationMode::Redirect
        } else {
            NavigationMode::Disabled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_protocol_precedence() {
        let site = SiteConfig::default();

        let prod = site.clone().resolve(None, None, false);
        assert_eq!(prod.url(), "https://bnei.dev");

        let dev = site.clone().resolve(None, None, true);
        assert_eq!(dev.url(), "http://bnei.dev");

        let overridden = site.resolve(
            Some("https://".to_string()),
            Some("example.org".to_string()),
            true,
        );
        assert_eq!(overridden.url(), "https://example.org");
    }

    #[test]
    fn test_resolve_keeps_configured_protocol() {
        let config: AppConfig = toml::from_str(
            r#"
            [site]
            protocol = "ftp://"
            "#,
        )
        .expect("parse");

        let site = config.site.clone().resolve(None, None, false);
        assert_eq!(site.url(), "ftp://bnei.dev");

        let dev = config.site.clone().resolve(None, None, true);
        assert_eq!(dev.url(), "ftp://bnei.dev");

        let overridden = config.site.resolve(Some("https://".to_string()), None, false);
        assert_eq!(overridden.url(), "https://bnei.dev");
    }

    #[test]
    fn test_resolve_ignores_empty_overrides() {
        let site = SiteConfig::default().resolve(Some(String::new()), Some(String::new()), false);
        assert_eq!(site.url(), "https://bnei.dev");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [site]
            title = "Notes"

            [preferences]
            navigate_on_change = true
            "#,
        )
        .expect("parse");

        assert_eq!(config.site.title, "Notes");
        assert_eq!(config.site.domain, "bnei.dev");
        assert_eq!(config.post, PostConfig::default());
        assert_eq!(config.preferences.navigation_mode(), NavigationMode::Redirect);
    }

    #[test]
    fn test_comment_use_key() {
        let post: PostConfig = toml::from_str(
            r#"
            [comment]
            use = []
            "#,
        )
        .expect("parse");

        assert!(post.comment.enabled_giscus().is_none());
        assert!(PostConfig::default().comment.enabled_giscus().is_some());
    }

    #[test]
    fn test_default_description_has_all_paragraphs() {
        let description = SiteConfig::default().description;
        assert_eq!(description.split("\n\n").count(), 4);
        assert!(description.starts_with("Welcome to my tech blog"));
        assert!(description.ends_with("learn how to become a better developer."));
    }

    #[test]
    fn test_giscus_follows_language() {
        let giscus = GiscusConfig::default().with_lang(Lang::Fr);
        assert_eq!(giscus.lang, "fr");
        assert_eq!(giscus.repo, "mohammadbnei/blog-2023");
    }

    #[test]
    fn test_try_load_missing_blank_and_malformed() {
        let dir = tempfile::tempdir().expect("temp dir");

        let missing = dir.path().join("missing.toml");
        assert_eq!(AppConfig::try_load(&missing).expect("load"), AppConfig::default());

        let blank = dir.path().join("blank.toml");
        std::fs::write(&blank, "\n").expect("write");
        assert_eq!(AppConfig::try_load(&blank).expect("load"), AppConfig::default());

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[site").expect("write");
        assert!(AppConfig::try_load(&broken).is_err());
    }
}
