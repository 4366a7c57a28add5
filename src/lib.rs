//! blog-lang Library
//!
//! Language preference store and site configuration for the bnei.dev blog.
//! The store remembers whether the reader chose English or French, persists
//! the choice, and can move the reader between the `/` and `/fr` route trees.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod state;
pub mod storage;
