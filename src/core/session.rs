//! The chat session controller.
//!
//! One `ChatSession` owns the transcript and the request lifecycle for a
//! single interactive run. It talks to the display only through the
//! [`TranscriptView`] capability, so the whole state machine is testable
//! without a terminal.
//!
//! The lifecycle has two states. A submit of non-empty trimmed text in
//! `Idle` appends the user message, shows the pending indicator, and hands
//! the caller a payload to send; the session then refuses further submissions
//! until the outcome lands. Exactly one of [`ChatSession::resolve`] or
//! [`ChatSession::fail`] follows every accepted submit, and both return the
//! session to `Idle`, so the refusal is released on every path.

use std::collections::VecDeque;

use tracing::warn;

use crate::core::constants::FALLBACK_REPLY;
use crate::core::message::Message;
use crate::core::transcript::TranscriptStore;

/// Display capability the controller renders through. The TUI implements
/// this; tests substitute an in-memory recorder.
pub trait TranscriptView {
    /// Show a newly appended message (immediately before the pending
    /// indicator) and scroll to the newest content.
    fn append(&mut self, message: &Message);

    /// Show or hide the "assistant is composing" indicator. The indicator is
    /// never part of the persisted sequence.
    fn set_pending_visible(&mut self, visible: bool);

    /// Remove all rendered messages, leaving the pending indicator mount.
    fn clear(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingResponse,
}

pub struct ChatSession {
    messages: VecDeque<Message>,
    state: SessionState,
    confirming_clear: bool,
    store: TranscriptStore,
}

impl ChatSession {
    pub fn new(store: TranscriptStore) -> Self {
        Self {
            messages: VecDeque::new(),
            state: SessionState::Idle,
            confirming_clear: false,
            store,
        }
    }

    /// Load the persisted transcript, if any, and replay it through the
    /// view. Called once, before the first submit.
    pub fn restore(&mut self, view: &mut dyn TranscriptView) {
        if let Some(saved) = self.store.load() {
            for message in &saved {
                view.append(message);
            }
            self.messages = saved.into();
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.state == SessionState::AwaitingResponse
    }

    pub fn is_confirming_clear(&self) -> bool {
        self.confirming_clear
    }

    pub fn messages(&self) -> &VecDeque<Message> {
        &self.messages
    }

    /// Handle a submission. Returns the payload to send to the completion
    /// collaborator when the submission is accepted; empty input and
    /// submissions while a reply is outstanding are ignored.
    pub fn submit(&mut self, input: &str, view: &mut dyn TranscriptView) -> Option<String> {
        self.confirming_clear = false;

        let text = input.trim();
        if text.is_empty() || self.state == SessionState::AwaitingResponse {
            return None;
        }

        self.append(Message::user(text), view);
        self.state = SessionState::AwaitingResponse;
        view.set_pending_visible(true);
        Some(text.to_string())
    }

    /// The completion call resolved successfully.
    pub fn resolve(&mut self, response: String, view: &mut dyn TranscriptView) {
        self.finish(Message::assistant(response), view);
    }

    /// The completion call failed. All failure modes collapse to the one
    /// fixed fallback reply; nothing about the cause is surfaced here.
    pub fn fail(&mut self, view: &mut dyn TranscriptView) {
        self.finish(Message::assistant(FALLBACK_REPLY), view);
    }

    fn finish(&mut self, reply: Message, view: &mut dyn TranscriptView) {
        if self.state != SessionState::AwaitingResponse {
            return;
        }
        view.set_pending_visible(false);
        self.append(reply, view);
        self.state = SessionState::Idle;
    }

    /// First step of clearing the history: arm the confirmation.
    pub fn request_clear(&mut self) {
        self.confirming_clear = true;
    }

    /// Confirmation denied; everything stays as it was.
    pub fn deny_clear(&mut self) {
        self.confirming_clear = false;
    }

    /// Confirmation granted: drop the transcript, the rendered messages, and
    /// the stored entry. A reply that is still in flight is unaffected and
    /// will be appended when it arrives.
    pub fn confirm_clear(&mut self, view: &mut dyn TranscriptView) {
        if !self.confirming_clear {
            return;
        }
        self.confirming_clear = false;

        self.messages.clear();
        view.clear();
        if let Err(e) = self.store.clear() {
            warn!("could not remove stored transcript: {e}");
        }
        self.persist();
    }

    fn append(&mut self, message: Message, view: &mut dyn TranscriptView) {
        view.append(&message);
        self.messages.push_back(message);
        self.persist();
    }

    /// Wholesale best-effort write. A full store (or otherwise unavailable
    /// one) must not interrupt the chat flow, so failures only warn.
    fn persist(&self) {
        let messages: Vec<Message> = self.messages.iter().cloned().collect();
        if let Err(e) = self.store.save(&messages) {
            warn!("could not persist transcript: {e}");
        }
    }
}
