//! State Management Layer
//!
//! Reactive state shared across the application. State is owned by the
//! application shell and handed to whatever needs it:
//!
//! ```text
//! UI Action → LangStore::set → persist → notify subscribers → redirect
//! ```

pub mod lang_state;
pub mod observable;

pub use lang_state::*;
pub use observable::*;
