//! Navigation - Route Context and Language Redirects
//!
//! Localized pages live under a `/fr` route tree; English pages sit at the
//! root. When the reader switches language the active route is moved across
//! the two trees.

use std::cell::RefCell;
use std::rc::Rc;

use crate::constants::{FR_ROUTE_PREFIX, ROOT_ROUTE};
use crate::i18n::Lang;

/// Routing surface of the hosting application
pub trait RouteContext {
    /// Identifier of the active route, `None` when no route matched
    fn current_route(&self) -> Option<String>;

    /// Perform a client-side route change to `path`
    fn navigate(&self, path: &str);
}

/// Whether `route` belongs to the French route tree
pub fn is_localized(route: &str) -> bool {
    strip_lang_prefix(route).is_some()
}

/// Remove a leading `/fr` segment.
///
/// Returns `None` if the route is not localized. `/french` keeps its prefix
/// since `fr` is not a whole segment there.
pub fn strip_lang_prefix(route: &str) -> Option<&str> {
    let rest = route.strip_prefix(FR_ROUTE_PREFIX)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Compute where to navigate after switching to `lang` on `route`.
///
/// `None` means stay on the current route.
pub fn redirect_target(lang: Lang, route: Option<&str>) -> Option<String> {
    match lang {
        Lang::Fr => {
            let route = route?;
            // No French root page exists to redirect to
            if route == ROOT_ROUTE || is_localized(route) {
                return None;
            }
            Some(format!("{FR_ROUTE_PREFIX}{route}"))
        }
        Lang::En => {
            let route = route.unwrap_or(ROOT_ROUTE);
            let stripped = strip_lang_prefix(route).unwrap_or(route);
            if stripped.is_empty() {
                Some(ROOT_ROUTE.to_string())
            } else {
                Some(stripped.to_string())
            }
        }
    }
}

#[derive(Debug, Default)]
struct History {
    current: Option<String>,
    visited: Vec<String>,
}

/// In-memory router recording every navigation.
///
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct HistoryRouter {
    inner: Rc<RefCell<History>>,
}

impl HistoryRouter {
    /// Create a router positioned at `route`
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(History {
                current: Some(route.into()),
                visited: Vec::new(),
            })),
        }
    }

    /// Paths navigated to, oldest first
    pub fn history(&self) -> Vec<String> {
        self.inner.borrow().visited.clone()
    }

    /// Move to `route` without recording a navigation
    pub fn reset(&self, route: impl Into<String>) {
        self.inner.borrow_mut().current = Some(route.into());
    }
}

impl RouteContext for HistoryRouter {
    fn current_route(&self) -> Option<String> {
        self.inner.borrow().current.clone()
    }

    fn navigate(&self, path: &str) {
        let mut history = self.inner.borrow_mut();
        history.current = Some(path.to_string());
        history.visited.push(path.to_string());
    }
}
