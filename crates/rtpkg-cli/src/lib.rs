//! rtpkg library - expose command handlers for the binary and for testing

pub mod commands;
pub mod common;

pub use common::GlobalOpts;
