//! Core types shared by the handheld boot-code workspace.

pub mod config;
pub mod error;

pub use config::*;
pub use error::{Error, Result};
