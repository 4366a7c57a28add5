//! LangStore - Persisted Language Preference
//!
//! Holds the reader's language, restores it from storage on construction,
//! persists it on every `set`, and optionally moves the active route into or
//! out of the `/fr` tree.
//!
//! ```text
//! set(lang) → persist → notify subscribers → redirect (if enabled)
//! ```

use std::cell::Cell;
use std::fmt;

use tracing::{debug, info, warn};

use super::observable::{Observable, Subscription};
use crate::app::navigation::{RouteContext, redirect_target};
use crate::constants::LANG_STORAGE_KEY;
use crate::i18n::Lang;
use crate::storage::KeyValueStorage;

/// Whether a language change also changes the active route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationMode {
    /// Only persist and notify
    #[default]
    Disabled,
    /// Redirect to the matching localized route
    Redirect,
}

/// Reactive, persisted language preference
pub struct LangStore {
    lang: Observable<Lang>,
    storage: Option<Box<dyn KeyValueStorage>>,
    router: Option<Box<dyn RouteContext>>,
    navigation: NavigationMode,
    /// Bumped by every `set`, lets an outer `set` detect a nested one
    generation: Cell<u64>,
}

impl LangStore {
    /// Create a store without navigation.
    ///
    /// `storage` is `None` when no persistent storage is available; the
    /// store then starts as English and never persists.
    pub fn new(storage: Option<Box<dyn KeyValueStorage>>) -> Self {
        Self::from_parts(storage, None, NavigationMode::Disabled)
    }

    /// Start building a store
    pub fn builder() -> LangStoreBuilder {
        LangStoreBuilder::default()
    }

    fn from_parts(
        storage: Option<Box<dyn KeyValueStorage>>,
        router: Option<Box<dyn RouteContext>>,
        navigation: NavigationMode,
    ) -> Self {
        let initial = storage.as_deref().map_or(Lang::En, load_lang);
        info!(
            lang = %initial,
            persistent = storage.is_some(),
            navigation = ?navigation,
            "Language store initialized"
        );

        Self {
            lang: Observable::new(initial),
            storage,
            router,
            navigation,
            generation: Cell::new(0),
        }
    }

    // ==================== Getters ====================

    /// Current language
    pub fn get(&self) -> Lang {
        self.lang.get()
    }

    /// Check if a persistent storage is attached
    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    /// Configured navigation mode
    pub fn navigation_mode(&self) -> NavigationMode {
        self.navigation
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.lang.subscriber_count()
    }

    // ==================== Operations ====================

    /// Observe the language. `observer` receives the current value right away.
    pub fn subscribe(&self, observer: impl Fn(&Lang) + 'static) -> Subscription {
        self.lang.subscribe(observer)
    }

    /// Change the language in memory only, without persisting or navigating
    pub fn update(&self, transform: impl FnOnce(Lang) -> Lang) {
        self.lang.update(transform);
    }

    /// Change the language.
    ///
    /// The preference is written to storage before subscribers see it.
    /// Storage failures are logged and otherwise ignored. When a subscriber
    /// sets the language again while being notified, that later `set` owns
    /// the redirect.
    pub fn set(&self, lang: Lang) {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        if let Some(storage) = &self.storage {
            match storage.set_item(LANG_STORAGE_KEY, lang.as_str()) {
                Ok(()) => debug!(lang = %lang, "Language preference persisted"),
                Err(e) => warn!(error = %e, lang = %lang, "Failed to persist language preference"),
            }
        }

        let previous = self.lang.get();
        self.lang.set(lang);
        info!(from = %previous, to = %lang, "Language changed");

        if self.storage.is_some() && self.generation.get() == generation {
            self.redirect(lang);
        }
    }

    /// Switch to the other language
    pub fn toggle(&self) {
        self.set(self.get().toggle());
    }

    fn redirect(&self, lang: Lang) {
        if self.navigation != NavigationMode::Redirect {
            return;
        }
        let Some(router) = &self.router else {
            return;
        };

        let route = router.current_route();
        match redirect_target(lang, route.as_deref()) {
            Some(target) => {
                debug!(lang = %lang, from = ?route, to = %target, "Redirecting to localized route");
                router.navigate(&target);
            }
            None => debug!(lang = %lang, route = ?route, "No localized route to redirect to"),
        }
    }
}

/// Read the persisted language, falling back to English on any failure
fn load_lang<S: KeyValueStorage + ?Sized>(storage: &S) -> Lang {
    match storage.get_item(LANG_STORAGE_KEY) {
        Ok(raw) => Lang::from_persisted(raw.as_deref()),
        Err(e) => {
            warn!(error = %e, "Failed to read language preference, using default");
            Lang::En
        }
    }
}

impl fmt::Debug for LangStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LangStore")
            .field("lang", &self.get())
            .field("persistent", &self.storage.is_some())
            .field("router", &self.router.is_some())
            .field("navigation", &self.navigation)
            .finish()
    }
}

/// Builder for [`LangStore`]
#[derive(Default)]
pub struct LangStoreBuilder {
    storage: Option<Box<dyn KeyValueStorage>>,
    router: Option<Box<dyn RouteContext>>,
    navigation: NavigationMode,
}

impl LangStoreBuilder {
    /// Attach persistent storage
    pub fn storage(mut self, storage: impl KeyValueStorage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Attach optional storage, leaving the store non-persistent when `None`
    pub fn maybe_storage(mut self, storage: Option<Box<dyn KeyValueStorage>>) -> Self {
        self.storage = storage;
        self
    }

    /// Attach the application's router
    pub fn router(mut self, router: impl RouteContext + 'static) -> Self {
        self.router = Some(Box::new(router));
        self
    }

    /// Choose whether language changes redirect
    pub fn navigation(mut self, navigation: NavigationMode) -> Self {
        self.navigation = navigation;
        self
    }

    /// Build the store, reading the persisted preference
    pub fn build(self) -> LangStore {
        LangStore::from_parts(self.storage, self.router, self.navigation)
    }
}
