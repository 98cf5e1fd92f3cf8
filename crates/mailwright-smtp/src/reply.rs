//! SMTP reply parsing.

use crate::error::{Error, Result};

/// SMTP reply code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// 220 Service ready
    pub const SERVICE_READY: Self = Self(220);
    /// 221 Service closing transmission channel
    pub const CLOSING: Self = Self(221);
    /// 235 Authentication succeeded
    pub const AUTH_SUCCESS: Self = Self(235);
    /// 250 Requested mail action okay, completed
    pub const OK: Self = Self(250);
    /// 354 Start mail input
    pub const START_DATA: Self = Self(354);

    /// Creates a new reply code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is a success code (2xx).
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is an intermediate reply (3xx).
    #[must_use]
    pub const fn is_intermediate(self) -> bool {
        self.0 >= 300 && self.0 < 400
    }
}

impl std::fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SMTP reply from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply code (e.g., 250).
    pub code: ReplyCode,
    /// Reply message lines.
    pub message: Vec<String>,
}

impl Reply {
    /// Returns true if this is a success reply (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Returns the full message as a single string.
    #[must_use]
    pub fn message_text(&self) -> String {
        self.message.join("\n")
    }

    /// Parses a reply from response lines.
    ///
    /// Replies can be single-line (`250 OK`) or multi-line
    /// (`250-First`, `250 Last`).
    ///
    /// # Errors
    ///
    /// Returns an error if the reply is malformed.
    pub fn parse(lines: &[String]) -> Result<Self> {
        let first = lines
            .first()
            .ok_or_else(|| Error::Protocol("Empty reply".into()))?;

        let code_str = first
            .get(0..3)
            .ok_or_else(|| Error::Protocol(format!("Reply too short: {first}")))?;
        let code = code_str
            .parse::<u16>()
            .map_err(|_| Error::Protocol(format!("Invalid reply code: {code_str}")))?;

        let mut message = Vec::new();
        for line in lines {
            if line.len() >= 3 {
                // Skip code and separator (e.g., "250-" or "250 "); a bare
                // code or bare separator is an empty textstring
                message.push(line.get(4..).unwrap_or_default().to_string());
            } else {
                return Err(Error::Protocol(format!("Malformed reply line: {line}")));
            }
        }

        Ok(Self {
            code: ReplyCode::new(code),
            message,
        })
    }

    /// Checks if a line is the last line of a multi-line reply.
    ///
    /// Continuation lines use `-` after the code; the last line uses a space.
    #[must_use]
    pub fn is_last_line(line: &str) -> bool {
        line.len() == 3 || (line.len() >= 4 && line.as_bytes()[3] == b' ')
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

    #[test]
    fn test_parse_single_line_reply() {
        let reply = Reply::parse(&["250 OK".to_string()]).unwrap();
        assert_eq!(reply.code, ReplyCode::OK);
        assert_eq!(reply.message, vec!["OK"]);
        assert!(reply.is_success());
    }

    #[test]
    fn test_parse_multi_line_reply() {
        let lines = vec![
            "250-smtp.example.com".to_string(),
            "250-PIPELINING".to_string(),
            "250 8BITMIME".to_string(),
        ];
        let reply = Reply::parse(&lines).unwrap();
        assert_eq!(reply.code.as_u16(), 250);
        assert_eq!(reply.message_text(), "smtp.example.com\nPIPELINING\n8BITMIME");
    }

    #[test]
    fn test_parse_greeting() {
        let reply = Reply::parse(&["220 smtp.example.com ESMTP ready".to_string()]).unwrap();
        assert_eq!(reply.code, ReplyCode::SERVICE_READY);
    }

    #[test]
    fn test_is_last_line() {
        assert!(Reply::is_last_line("250 OK"));
        assert!(Reply::is_last_line("250"));
        assert!(Reply::is_last_line("250 "));
        assert!(!Reply::is_last_line("250-Continuing"));
        assert!(!Reply::is_last_line("250-"));
    }

    #[test]
    fn test_parse_empty_continuation_line() {
        let lines = vec![
            "250-fake".to_string(),
            "250-".to_string(),
            "250 OK".to_string(),
        ];
        let reply = Reply::parse(&lines).unwrap();
        assert_eq!(reply.message, vec!["fake", "", "OK"]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Reply::parse(&[]).is_err());
        assert!(Reply::parse(&["25".to_string()]).is_err());
        assert!(Reply::parse(&["ABC OK".to_string()]).is_err());
    }

    #[test]
    fn test_intermediate_code() {
        assert!(ReplyCode::START_DATA.is_intermediate());
        assert!(!ReplyCode::OK.is_intermediate());
    }
}
