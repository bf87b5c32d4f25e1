pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod reconcile;
pub mod registry;
pub mod ui;

pub use error::{PublishVersionError, Result};
