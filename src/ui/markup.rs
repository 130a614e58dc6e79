//! Escaped display markup for transcript export.
//!
//! Storage is structured records; markup exists only at render time, when the
//! transcript is exported as an HTML document. Escaping applies four literal
//! substitutions in a fixed order (ampersand first, or the angle-bracket
//! entities would themselves be escaped again) and nothing else passes
//! through. This is the export's only injection defense.

use crate::core::message::Message;

pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\n', "<br>")
}

/// One message as a single-paragraph block, classed by sender.
pub fn message_markup(message: &Message) -> String {
    format!(
        "<div class=\"message {}-message\"><p>{}</p></div>",
        message.sender.as_str(),
        escape_text(&message.text)
    )
}

/// The whole transcript as a standalone HTML document.
pub fn transcript_document(messages: &[Message]) -> String {
    let mut body = String::new();
    for message in messages {
        body.push_str("    ");
        body.push_str(&message_markup(message));
        body.push('\n');
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>HealthAssist chat transcript</title>\n</head>\n<body>\n\
         <div class=\"chat-messages\">\n{body}</div>\n</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_characters_render_as_literal_text() {
        assert_eq!(escape_text("<script>&"), "&lt;script&gt;&amp;");
    }

    #[test]
    fn ampersands_are_escaped_first() {
        // A pre-escaped entity in the input must come out double-escaped,
        // proving the ampersand pass ran before the angle brackets.
        assert_eq!(escape_text("&lt;"), "&amp;lt;");
    }

    #[test]
    fn newlines_become_line_breaks() {
        assert_eq!(escape_text("line one\nline two"), "line one<br>line two");
    }

    #[test]
    fn messages_are_wrapped_in_a_single_paragraph() {
        let markup = message_markup(&Message::user("hi <there>"));
        assert_eq!(
            markup,
            "<div class=\"message user-message\"><p>hi &lt;there&gt;</p></div>"
        );
    }

    #[test]
    fn document_contains_every_message_in_order() {
        let messages = vec![Message::user("first"), Message::assistant("second")];
        let document = transcript_document(&messages);

        let first = document.find("first").unwrap();
        let second = document.find("second").unwrap();
        assert!(first < second);
        assert!(document.contains("assistant-message"));
    }
}
