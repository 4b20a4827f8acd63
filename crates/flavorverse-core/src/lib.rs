//! flavorverse-core
//!
//! Domain records, filter state, configuration and the collaborator traits
//! shared by the search engine and the CLI.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod analytics;
pub mod config;
pub mod content;
pub mod error;
pub mod preferences;
pub mod traits;
pub mod types;
