//! Preferences - Storage Selection and Language Changes
//!
//! Glue used by the command line: pick the preferences backend and apply a
//! language change against an optional active route.

use std::path::Path;

use tracing::debug;

use super::navigation::HistoryRouter;
use crate::domain::config::AppConfig;
use crate::error::Result;
use crate::i18n::Lang;
use crate::state::LangStore;
use crate::storage::{FileStorage, KeyValueStorage};

/// Outcome of a language change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangChange {
    /// Language after the change
    pub lang: Lang,
    /// Route navigated to, if the change redirected
    pub redirect: Option<String>,
}

/// Open the preferences storage.
///
/// Precedence: `explicit`, then `preferences.storage_file` from `config`,
/// then the platform config directory. `ephemeral` skips storage entirely.
pub fn open_storage(
    explicit: Option<&Path>,
    config: &AppConfig,
    ephemeral: bool,
) -> Result<Option<Box<dyn KeyValueStorage>>> {
    if ephemeral {
        debug!("Running without persistent storage");
        return Ok(None);
    }
    let storage = match explicit.or(config.preferences.storage_file.as_deref()) {
        Some(path) => FileStorage::open(path)?,
        None => FileStorage::open_default()?,
    };
    Ok(Some(Box::new(storage)))
}

/// Build a store on `storage`, apply `change` and report the result.
///
/// `route` is the route the reader is on. Without it no redirect happens.
pub fn change_lang(
    storage: Option<Box<dyn KeyValueStorage>>,
    config: &AppConfig,
    route: Option<String>,
    change: impl FnOnce(&LangStore),
) -> LangChange {
    let router = route.map(HistoryRouter::new);
    let mut builder = LangStore::builder()
        .maybe_storage(storage)
        .navigation(config.preferences.navigation_mode());
    if let Some(router) = &router {
        builder = builder.router(router.clone());
    }
    let store = builder.build();

    change(&store);

    LangChange {
        lang: store.get(),
        redirect: router.and_then(|r| r.history().last().cloned()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::config::PreferencesConfig;

    fn config_with(storage_file: Option<&Path>, navigate_on_change: bool) -> AppConfig {
        AppConfig {
            preferences: PreferencesConfig {
                navigate_on_change,
                storage_file: storage_file.map(Path::to_path_buf),
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_explicit_path_wins_over_configured_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let explicit = dir.path().join("explicit.toml");
        let configured = dir.path().join("configured.toml");
        let config = config_with(Some(&configured), false);

        let storage = open_storage(Some(&explicit), &config, false).expect("open");
        change_lang(storage, &config, None, |store| store.set(Lang::Fr));

        let written = fs::read_to_string(&explicit).expect("read");
        assert!(written.contains("lang = \"fr\""), "{written}");
        assert!(!configured.exists());
    }

    #[test]
    fn test_configured_file_used_without_explicit_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let configured = dir.path().join("configured.toml");
        let config = config_with(Some(&configured), false);

        let storage = open_storage(None, &config, false).expect("open");
        change_lang(storage, &config, None, |store| store.set(Lang::Fr));

        let reopened = open_storage(None, &config, false).expect("reopen");
        assert_eq!(LangStore::new(reopened).get(), Lang::Fr);
    }

    #[test]
    fn test_ephemeral_skips_storage() {
        let dir = tempfile::tempdir().expect("temp dir");
        let explicit = dir.path().join("explicit.toml");
        let config = config_with(None, true);

        let storage = open_storage(Some(&explicit), &config, true).expect("open");
        assert!(storage.is_none());

        let change = change_lang(storage, &config, Some("/posts/hello".into()), |store| {
            store.set(Lang::Fr)
        });

        assert_eq!(change.lang, Lang::Fr);
        assert_eq!(change.redirect, None);
        assert!(!explicit.exists());
    }

    #[test]
    fn test_redirect_reported_when_navigation_enabled() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_with(None, true);
        let storage = open_storage(Some(&dir.path().join("prefs.toml")), &config, false)
            .expect("open");

        let change = change_lang(storage, &config, Some("/posts/hello".into()), |store| {
            store.set(Lang::Fr)
        });

        assert_eq!(
            change,
            LangChange {
                lang: Lang::Fr,
                redirect: Some("/fr/posts/hello".to_string()),
            }
        );
    }

    #[test]
    fn test_no_redirect_when_navigation_disabled() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_with(None, false);
        let storage = open_storage(Some(&dir.path().join("prefs.toml")), &config, false)
            .expect("open");

        let change = change_lang(storage, &config, Some("/posts/hello".into()), LangStore::toggle);

        assert_eq!(change.lang, Lang::Fr);
        assert_eq!(change.redirect, None);
    }

    #[test]
    fn test_no_redirect_without_route() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config_with(None, true);
        let storage = open_storage(Some(&dir.path().join("prefs.toml")), &config, false)
            .expect("open");

        let change = change_lang(storage, &config, None, |store| store.set(Lang::Fr));

        assert_eq!(change.redirect, None);
    }
}
