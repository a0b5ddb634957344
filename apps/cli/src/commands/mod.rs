//! Command implementations for the cmdboard CLI.

pub mod config;
pub mod describe;
pub mod list;
pub mod reset;
pub mod resolve;
pub mod run;
pub mod set;

pub use config::ConfigCommand;
