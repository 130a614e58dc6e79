//! Domain core: configuration, transcript model and storage, and the chat
//! session controller. Nothing in here touches the terminal.

pub mod config;
pub mod constants;
pub mod message;
pub mod session;
pub mod transcript;
