//! Application Layer
//!
//! Routing surface of the hosting application, and the preference glue the
//! command line runs on.

pub mod navigation;
pub mod preferences;
