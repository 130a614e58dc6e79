//! Shared constants used across the application

/// Reply shown in place of an assistant answer when the completion call fails
/// for any reason. The exact wording is part of the user-facing contract.
pub const FALLBACK_REPLY: &str = "Error connecting to AI service. Please try again later.";

/// Label for the transient indicator shown while a reply is outstanding.
pub const PENDING_LABEL: &str = "HealthAssist AI is typing...";

/// Relay base URL used when neither the CLI flag nor the config names one.
pub const DEFAULT_RELAY_BASE_URL: &str = "http://127.0.0.1:3000";

/// Path of the chat endpoint on the relay. Fixed; only the base is configurable.
pub const CHAT_ENDPOINT: &str = "api/chat";

/// Canned questions bound to F1-F4. Pressing one populates the input and
/// submits immediately.
pub const QUICK_QUESTIONS: [&str; 4] = [
    "What is a fever?",
    "What should I do for a headache?",
    "How much water should I drink daily?",
    "When should I see a doctor about a cough?",
];
