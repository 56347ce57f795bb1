//! Core library components.
//!
//! Everything here is free of argument parsing and terminal output: the
//! CLI resolves [`config::Settings`] and hands them to [`check::Checker`].

pub mod check;
pub mod config;
pub mod constants;
pub mod domain;
pub mod inventory;
pub mod notify;
