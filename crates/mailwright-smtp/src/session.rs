//! SMTP session configuration.

use std::collections::BTreeMap;
use std::fmt;

/// Username/password credentials for authenticated SMTP.
#[derive(Clone, PartialEq, Eq)]
pub struct Authenticator {
    username: String,
    password: String,
}

impl Authenticator {
    /// Creates a new authenticator.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Transport session: a configuration handle consumed by the SMTP sender.
///
/// All settings live in a string property map keyed by the `mail.smtp.*`
/// names; numeric settings are stored as their decimal representations.
/// Constructing a session performs no network I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailSession {
    properties: BTreeMap<String, String>,
    authenticator: Option<Authenticator>,
}

impl MailSession {
    /// Property key for the SMTP server hostname.
    pub const MAIL_HOST: &'static str = "mail.smtp.host";
    /// Property key for the SMTP server port.
    pub const MAIL_PORT: &'static str = "mail.smtp.port";
    /// Property key for the socket read timeout in milliseconds.
    pub const MAIL_SMTP_TIMEOUT: &'static str = "mail.smtp.timeout";
    /// Property key for the socket connection timeout in milliseconds.
    pub const MAIL_SMTP_CONNECTION_TIMEOUT: &'static str = "mail.smtp.connectiontimeout";
    /// Property key flagging authenticated SMTP.
    pub const MAIL_SMTP_AUTH: &'static str = "mail.smtp.auth";
    /// Property key for the envelope-from (bounce) address.
    pub const MAIL_SMTP_FROM: &'static str = "mail.smtp.from";
    /// Property key flagging TLS-on-connect.
    pub const MAIL_SMTP_SSL_ENABLE: &'static str = "mail.smtp.ssl.enable";

    /// Creates an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Gets a property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Stores credentials and flags the session for authenticated SMTP.
    pub fn authenticate(&mut self, authenticator: Authenticator) {
        self.set_property(Self::MAIL_SMTP_AUTH, "true");
        self.authenticator = Some(authenticator);
    }

    /// Returns the credentials, if authentication was configured.
    #[must_use]
    pub const fn authenticator(&self) -> Option<&Authenticator> {
        self.authenticator.as_ref()
    }

    /// Returns the SMTP server hostname.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.property(Self::MAIL_HOST)
    }

    /// Returns the SMTP server port.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.property(Self::MAIL_PORT)?.parse().ok()
    }

    /// Returns the socket read timeout in milliseconds.
    #[must_use]
    pub fn socket_timeout(&self) -> Option<u64> {
        self.property(Self::MAIL_SMTP_TIMEOUT)?.parse().ok()
    }

    /// Returns the socket connection timeout in milliseconds.
    #[must_use]
    pub fn connection_timeout(&self) -> Option<u64> {
        self.property(Self::MAIL_SMTP_CONNECTION_TIMEOUT)?.parse().ok()
    }

    /// Returns the envelope-from address used for non-delivery reports.
    #[must_use]
    pub fn envelope_from(&self) -> Option<&str> {
        self.property(Self::MAIL_SMTP_FROM)
    }

    /// Returns true if the session requests TLS on connect.
    #[must_use]
    pub fn ssl_on_connect(&self) -> bool {
        self.property(Self::MAIL_SMTP_SSL_ENABLE) == Some("true")
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
    fn test_session_properties() {
        let mut session = MailSession::new();
        session.set_property(MailSession::MAIL_HOST, "smtp.example.com");
        session.set_property(MailSession::MAIL_PORT, "587");
        session.set_property(MailSession::MAIL_SMTP_TIMEOUT, "2000");

        assert_eq!(session.host(), Some("smtp.example.com"));
        assert_eq!(session.port(), Some(587));
        assert_eq!(session.socket_timeout(), Some(2000));
        assert_eq!(session.connection_timeout(), None);
    }

    #[test]
    fn test_session_authenticate_sets_flag() {
        let mut session = MailSession::new();
        assert!(session.property(MailSession::MAIL_SMTP_AUTH).is_none());

        session.authenticate(Authenticator::new("user", "secret"));

        assert_eq!(session.property(MailSession::MAIL_SMTP_AUTH), Some("true"));
        assert_eq!(session.authenticator().unwrap().username(), "user");
    }

    #[test]
    fn test_session_envelope_from() {
        let mut session = MailSession::new();
        session.set_property(MailSession::MAIL_SMTP_FROM, "bounce@example.com");
        assert_eq!(session.envelope_from(), Some("bounce@example.com"));
    }

    #[test]
    fn test_session_ssl_flag() {
        let mut session = MailSession::new();
        assert!(!session.ssl_on_connect());

        session.set_property(MailSession::MAIL_SMTP_SSL_ENABLE, "true");
        assert!(session.ssl_on_connect());
    }

    #[test]
    fn test_authenticator_debug_redacts_password() {
        let auth = Authenticator::new("user", "hunter2");
        let rendered = format!("{auth:?}");

        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
    }
}
