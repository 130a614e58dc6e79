//! HealthAssist is a terminal-first chat client for the HealthAssist
//! health-assistant relay.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the transcript model, the chat session controller, and
//!   local persistence of transcript and preferences.
//! - [`ui`] renders the terminal interface, runs the interactive event loop,
//!   and owns theme policy and transcript export.
//! - [`api`] defines the relay payloads and the completion client used to
//!   reach the language-model collaborator.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which initializes and dispatches into
//! [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
