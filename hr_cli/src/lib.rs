//! Internal modules for the hand recorder terminal front end.
//!
//! This library provides command parsing, configuration, and command
//! execution used by the hr_cli binary.

pub mod app;
pub mod commands;
pub mod config;
