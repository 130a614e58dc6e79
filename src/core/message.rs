use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
        }
    }

    pub fn is_user(self) -> bool {
        self == Sender::User
    }
}

impl AsRef<str> for Sender {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// One transcript entry. Immutable once created; ordering is append order and
/// duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    pub fn is_user(&self) -> bool {
        self.sender.is_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn senders_serialize_as_lowercase_names() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"sender":"user","text":"hi"}"#);

        let json = serde_json::to_string(&Message::assistant("hello")).unwrap();
        assert_eq!(json, r#"{"sender":"assistant","text":"hello"}"#);
    }

    #[test]
    fn unknown_sender_names_are_rejected() {
        let result: Result<Message, _> =
            serde_json::from_str(r#"{"sender":"bot","text":"hi"}"#);
        assert!(result.is_err());
    }
}
