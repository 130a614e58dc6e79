//! Terminal UI layer for the interactive chat session.
//!
//! The UI module owns rendering, layout, keyboard handling, and loop control
//! for the text user interface:
//! - [`chat_loop`]: the main interaction loop that dispatches user input to
//!   the session controller and hands completion calls to a worker task.
//! - [`renderer`]: view composition and frame output.
//! - [`theme`]: color/style policy and the light/dark toggle.
//! - [`view`]: the terminal implementation of the transcript view capability.
//! - [`markup`]: escaped HTML rendering for transcript export.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the transcript and the request lifecycle.

pub mod chat_loop;
pub mod markup;
pub mod renderer;
pub mod theme;
pub mod view;
