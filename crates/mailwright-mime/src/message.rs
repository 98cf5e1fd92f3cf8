//! Assembled MIME message.

use crate::address::{Address, Mailbox, format_mailbox_list};
use crate::content_type::ContentType;
use crate::header::Headers;
use chrono::{DateTime, Utc};

/// An assembled, transport-ready message.
///
/// Produced exactly once per draft; not intended to be mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeMessage {
    /// Sender mailbox.
    pub from: Mailbox,
    /// To recipients.
    pub to: Vec<Mailbox>,
    /// Cc recipients.
    pub cc: Vec<Mailbox>,
    /// Bcc recipients (never rendered into the message text).
    pub bcc: Vec<Mailbox>,
    /// Reply-To mailboxes.
    pub reply_to: Vec<Mailbox>,
    /// Custom headers.
    pub headers: Headers,
    /// Subject line.
    pub subject: Option<String>,
    /// Message body.
    pub body: Option<String>,
    /// Content type, charset already applied.
    pub content_type: ContentType,
    /// Date the message was sent.
    pub sent_date: DateTime<Utc>,
}

impl MimeMessage {
    /// Returns every envelope recipient (to, cc, bcc) in order.
    #[must_use]
    pub fn recipients(&self) -> Vec<&Address> {
        self.to
            .iter()
            .chain(&self.cc)
            .chain(&self.bcc)
            .map(|mailbox| &mailbox.address)
            .collect()
    }

    /// Renders the RFC 5322 message text with CRLF line endings.
    ///
    /// Bcc recipients are deliberately omitted from the rendered headers.
    #[must_use]
    pub fn to_rfc5322(&self) -> String {
        use std::fmt::Write;

        let mut message = String::new();

        let _ = writeln!(message, "From: {}\r", self.from);

        if !self.to.is_empty() {
            let _ = writeln!(message, "To: {}\r", format_mailbox_list(&self.to));
        }

        if !self.cc.is_empty() {
            let _ = writeln!(message, "Cc: {}\r", format_mailbox_list(&self.cc));
        }

        if !self.reply_to.is_empty() {
            let _ = writeln!(message, "Reply-To: {}\r", format_mailbox_list(&self.reply_to));
        }

        if let Some(subject) = &self.subject {
            let _ = writeln!(message, "Subject: {subject}\r");
        }

        let _ = writeln!(message, "Date: {}\r", self.sent_date.to_rfc2822());

        message.push_str(&self.headers.to_string());

        message.push_str("MIME-Version: 1.0\r\n");
        let _ = writeln!(message, "Content-Type: {}\r", self.content_type);
        message.push_str("Content-Transfer-Encoding: 8bit\r\n");

        // Empty line between headers and body
        message.push_str("\r\n");

        if let Some(body) = &self.body {
            message.push_str(body);
        }

        message
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_message() -> MimeMessage {
        let mut headers = Headers::new();
        headers.set("X-Mailer", "mailwright");

        MimeMessage {
            from: Mailbox::new("sender@example.com").unwrap(),
            to: vec![Mailbox::new("to@example.com").unwrap()],
            cc: vec![Mailbox::new("cc@example.com").unwrap()],
            bcc: vec![Mailbox::new("bcc@example.com").unwrap()],
            reply_to: vec![Mailbox::with_name("Ops", "ops@example.com").unwrap()],
            headers,
            subject: Some("Greetings".to_string()),
            body: Some("Hello, World!".to_string()),
            content_type: ContentType::text_plain(),
            sent_date: Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
        }
    }

    #[test]
    fn test_recipients_order() {
        let message = sample_message();
        let recipients: Vec<_> = message
            .recipients()
            .into_iter()
            .map(Address::as_str)
            .collect();

        assert_eq!(
            recipients,
            vec!["to@example.com", "cc@example.com", "bcc@example.com"]
        );
    }

    #[test]
    fn test_to_rfc5322_headers() {
        let text = sample_message().to_rfc5322();

        assert!(text.contains("From: sender@example.com\r\n"));
        assert!(text.contains("To: to@example.com\r\n"));
        assert!(text.contains("Cc: cc@example.com\r\n"));
        assert!(text.contains("Reply-To: Ops <ops@example.com>\r\n"));
        assert!(text.contains("Subject: Greetings\r\n"));
        assert!(text.contains("Date: Fri, 14 Mar 2025 09:26:53 +0000\r\n"));
        assert!(text.contains("X-Mailer: mailwright\r\n"));
        assert!(text.contains("Content-Type: text/plain; charset=utf-8\r\n"));
        assert!(text.ends_with("\r\nHello, World!"));
    }

    #[test]
    fn test_to_rfc5322_omits_bcc() {
        let text = sample_message().to_rfc5322();
        assert!(!text.contains("bcc@example.com"));
    }

    #[test]
    fn test_to_rfc5322_empty_body() {
        let mut message = sample_message();
        message.body = None;
        assert!(message.to_rfc5322().ends_with("\r\n\r\n"));
    }
}
