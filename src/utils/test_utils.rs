#[cfg(test)]
use crate::core::message::Message;
#[cfg(test)]
use crate::core::session::TranscriptView;
#[cfg(test)]
use crate::core::transcript::TranscriptStore;
#[cfg(test)]
use crate::ui::chat_loop::ChatApp;
#[cfg(test)]
use crate::ui::theme::ThemeController;
#[cfg(test)]
use tempfile::TempDir;

/// In-memory stand-in for the terminal view, recording every capability call.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingView {
    pub messages: Vec<Message>,
    pub pending_visible: bool,
    pub clear_count: usize,
}

#[cfg(test)]
impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl TranscriptView for RecordingView {
    fn append(&mut self, message: &Message) {
        self.messages.push(message.clone());
    }

    fn set_pending_visible(&mut self, visible: bool) {
        self.pending_visible = visible;
    }

    fn clear(&mut self) {
        self.messages.clear();
        self.clear_count += 1;
    }
}

/// A transcript store backed by a fresh temp directory. Keep the `TempDir`
/// alive for the duration of the test.
#[cfg(test)]
pub fn temp_store() -> (TempDir, TranscriptStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = TranscriptStore::at_path(temp_dir.path().join("transcript.json"));
    (temp_dir, store)
}

/// A `ChatApp` whose config and transcript both live in a fresh temp
/// directory.
#[cfg(test)]
pub fn create_test_app() -> (TempDir, ChatApp) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let themes = ThemeController::initialize(temp_dir.path().join("config.toml"));
    let store = TranscriptStore::at_path(temp_dir.path().join("transcript.json"));
    let app = ChatApp::new(themes, store, "http://127.0.0.1:3000".to_string());
    (temp_dir, app)
}
