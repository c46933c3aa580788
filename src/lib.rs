pub mod cli;
pub mod clock;
pub mod config;
pub mod domain;
pub mod error;
pub mod gate;
pub mod git;
pub mod index;
pub mod status;
pub mod steps;
pub mod ui;

pub use error::{GateError, Result};
