//! Domain - Pure Data Structures
//!
//! Configuration records describing the site. These types carry no behavior
//! beyond loading and defaulting.

pub mod config;
