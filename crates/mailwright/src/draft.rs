//! Mutable email draft and one-shot message assembly.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use mailwright_mime::{Address, ContentType, Headers, Mailbox, MimeMessage};
use mailwright_smtp::{Authenticator, MailSession};
use tracing::debug;

/// Default socket connection timeout: 60 seconds.
pub const DEFAULT_SOCKET_CONNECTION_TIMEOUT_MS: u64 = 60_000;
/// Default socket read timeout: 60 seconds.
pub const DEFAULT_SOCKET_TIMEOUT_MS: u64 = 60_000;
/// Default SMTP port.
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// Build state of a draft: fields may be mutated while unbuilt; once built
/// the assembled message is retained and further builds are rejected.
#[derive(Debug, Clone)]
enum BuildState {
    Unbuilt,
    Built(MimeMessage),
}

/// A mutable, in-progress email.
///
/// Fields accumulate in any order through the setters; [`build_mime_message`]
/// then validates and assembles them into an immutable [`MimeMessage`]
/// exactly once. [`mail_session`] independently derives the transport
/// configuration from the connection settings. Neither routine performs
/// network I/O.
///
/// A failed build leaves the draft unbuilt; the caller can fix the offending
/// field and try again.
///
/// [`build_mime_message`]: EmailDraft::build_mime_message
/// [`mail_session`]: EmailDraft::mail_session
#[derive(Debug, Clone)]
pub struct EmailDraft {
    from: Option<Mailbox>,
    to: Vec<Mailbox>,
    cc: Vec<Mailbox>,
    bcc: Vec<Mailbox>,
    reply_to: Vec<Mailbox>,
    headers: Headers,
    subject: Option<String>,
    charset: Option<String>,
    content: Option<String>,
    content_type: Option<ContentType>,
    bounce_address: Option<Address>,
    host_name: Option<String>,
    smtp_port: u16,
    socket_connection_timeout: u64,
    socket_timeout: u64,
    ssl_on_connect: bool,
    authenticator: Option<Authenticator>,
    sent_date: Option<DateTime<Utc>>,
    state: BuildState,
}

impl Default for EmailDraft {
    fn default() -> Self {
        Self {
            from: None,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            reply_to: Vec::new(),
            headers: Headers::new(),
            subject: None,
            charset: None,
            content: None,
            content_type: None,
            bounce_address: None,
            host_name: None,
            smtp_port: DEFAULT_SMTP_PORT,
            socket_connection_timeout: DEFAULT_SOCKET_CONNECTION_TIMEOUT_MS,
            socket_timeout: DEFAULT_SOCKET_TIMEOUT_MS,
            ssl_on_connect: false,
            authenticator: None,
            sent_date: None,
            state: BuildState::Unbuilt,
        }
    }
}

impl EmailDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sender address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn set_from(&mut self, address: impl Into<String>) -> Result<&mut Self> {
        self.from = Some(Mailbox::new(address)?);
        Ok(self)
    }

    /// Returns the sender mailbox.
    #[must_use]
    pub const fn from(&self) -> Option<&Mailbox> {
        self.from.as_ref()
    }

    /// Appends a To recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn add_to(&mut self, address: impl Into<String>) -> Result<&mut Self> {
        self.to.push(Mailbox::new(address)?);
        Ok(self)
    }

    /// Appends every address in a non-empty collection to To.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddressSet`] for an empty collection, or an
    /// address error if any entry is invalid; either way the draft is left
    /// unchanged.
    pub fn add_to_all<I>(&mut self, addresses: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mailboxes = Self::collect_mailboxes(addresses)?;
        self.to.extend(mailboxes);
        Ok(self)
    }

    /// Returns the To recipients in insertion order.
    #[must_use]
    pub fn to(&self) -> &[Mailbox] {
        &self.to
    }

    /// Appends a Cc recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn add_cc(&mut self, address: impl Into<String>) -> Result<&mut Self> {
        self.cc.push(Mailbox::new(address)?);
        Ok(self)
    }

    /// Appends every address in a non-empty collection to Cc.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddressSet`] for an empty collection, or an
    /// address error if any entry is invalid; either way the draft is left
    /// unchanged.
    pub fn add_cc_all<I>(&mut self, addresses: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mailboxes = Self::collect_mailboxes(addresses)?;
        self.cc.extend(mailboxes);
        Ok(self)
    }

    /// Returns the Cc recipients in insertion order.
    #[must_use]
    pub fn cc(&self) -> &[Mailbox] {
        &self.cc
    }

    /// Appends a Bcc recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn add_bcc(&mut self, address: impl Into<String>) -> Result<&mut Self> {
        self.bcc.push(Mailbox::new(address)?);
        Ok(self)
    }

    /// Appends every address in a non-empty collection to Bcc.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddressSet`] for an empty collection, or an
    /// address error if any entry is invalid; either way the draft is left
    /// unchanged.
    pub fn add_bcc_all<I>(&mut self, addresses: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mailboxes = Self::collect_mailboxes(addresses)?;
        self.bcc.extend(mailboxes);
        Ok(self)
    }

    /// Returns the Bcc recipients in insertion order.
    #[must_use]
    pub fn bcc(&self) -> &[Mailbox] {
        &self.bcc
    }

    /// Appends a Reply-To address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn add_reply_to(&mut self, address: impl Into<String>) -> Result<&mut Self> {
        self.reply_to.push(Mailbox::new(address)?);
        Ok(self)
    }

    /// Appends a Reply-To address with a display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn add_reply_to_named(
        &mut self,
        address: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<&mut Self> {
        self.reply_to.push(Mailbox::with_name(name, address)?);
        Ok(self)
    }

    /// Returns the Reply-To mailboxes in insertion order.
    #[must_use]
    pub fn reply_to(&self) -> &[Mailbox] {
        &self.reply_to
    }

    /// Inserts or overwrites a header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the name or value is empty.
    pub fn add_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        let name = name.into();
        let value = value.into();

        if name.is_empty() {
            return Err(Error::InvalidArgument(
                "header name must not be empty".into(),
            ));
        }
        if value.is_empty() {
            return Err(Error::InvalidArgument(
                "header value must not be empty".into(),
            ));
        }

        self.headers.set(name, value);
        Ok(self)
    }

    /// Returns the accumulated headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Sets the subject line.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = Some(subject.into());
        self
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Sets the charset applied to the content at build time.
    pub fn set_charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.charset = Some(charset.into());
        self
    }

    /// Returns the charset.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// Sets the message content and its content type.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type string is malformed.
    pub fn set_content(
        &mut self,
        content: impl Into<String>,
        content_type: &str,
    ) -> Result<&mut Self> {
        self.content_type = Some(ContentType::parse(content_type)?);
        self.content = Some(content.into());
        Ok(self)
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Sets the bounce (envelope-from) address used for non-delivery
    /// reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid.
    pub fn set_bounce_address(&mut self, address: impl Into<String>) -> Result<&mut Self> {
        self.bounce_address = Some(Address::new(address)?);
        Ok(self)
    }

    /// Returns the bounce address.
    #[must_use]
    pub const fn bounce_address(&self) -> Option<&Address> {
        self.bounce_address.as_ref()
    }

    /// Sets the SMTP server hostname.
    ///
    /// An empty string unsets the hostname; subsequent reads report absent.
    pub fn set_host_name(&mut self, host_name: impl Into<String>) -> &mut Self {
        let host_name = host_name.into();
        self.host_name = if host_name.is_empty() {
            None
        } else {
            Some(host_name)
        };
        self
    }

    /// Returns the SMTP server hostname.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref()
    }

    /// Sets the SMTP server port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for port 0.
    pub fn set_smtp_port(&mut self, port: u16) -> Result<&mut Self> {
        if port == 0 {
            return Err(Error::InvalidArgument("port must be greater than 0".into()));
        }
        self.smtp_port = port;
        Ok(self)
    }

    /// Returns the SMTP server port.
    #[must_use]
    pub const fn smtp_port(&self) -> u16 {
        self.smtp_port
    }

    /// Sets the socket connection timeout in milliseconds.
    pub const fn set_socket_connection_timeout(&mut self, millis: u64) -> &mut Self {
        self.socket_connection_timeout = millis;
        self
    }

    /// Returns the socket connection timeout in milliseconds.
    #[must_use]
    pub const fn socket_connection_timeout(&self) -> u64 {
        self.socket_connection_timeout
    }

    /// Sets the socket read timeout in milliseconds.
    pub const fn set_socket_timeout(&mut self, millis: u64) -> &mut Self {
        self.socket_timeout = millis;
        self
    }

    /// Returns the socket read timeout in milliseconds.
    #[must_use]
    pub const fn socket_timeout(&self) -> u64 {
        self.socket_timeout
    }

    /// Requests TLS negotiation immediately on connect.
    pub const fn set_ssl_on_connect(&mut self, enabled: bool) -> &mut Self {
        self.ssl_on_connect = enabled;
        self
    }

    /// Sets the credentials used for authenticated SMTP.
    pub fn set_authenticator(&mut self, authenticator: Authenticator) -> &mut Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Sets the sent date recorded on the built message.
    pub fn set_sent_date(&mut self, date: DateTime<Utc>) -> &mut Self {
        self.sent_date = Some(date);
        self
    }

    /// Returns the sent date.
    ///
    /// When no sent date has been set, this returns the current wall-clock
    /// time at the moment of the call; the value is not persisted back into
    /// the draft.
    #[must_use]
    pub fn sent_date(&self) -> DateTime<Utc> {
        self.sent_date.unwrap_or_else(Utc::now)
    }

    /// Assembles the draft into its immutable message, exactly once.
    ///
    /// Gates, evaluated in order: the draft must not already be built, a
    /// sender must be set, and at least one to/cc/bcc recipient must exist.
    /// The configured charset (if any) is then applied to the content type,
    /// all fields are copied onto the message snapshot, and the draft moves
    /// to the built state. A failed build leaves the draft unbuilt and
    /// retriable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyBuilt`], [`Error::MissingFrom`], or
    /// [`Error::MissingReceiver`] per the gates above.
    pub fn build_mime_message(&mut self) -> Result<()> {
        if matches!(self.state, BuildState::Built(_)) {
            return Err(Error::AlreadyBuilt);
        }

        let from = self.from.clone().ok_or(Error::MissingFrom)?;

        if self.to.is_empty() && self.cc.is_empty() && self.bcc.is_empty() {
            return Err(Error::MissingReceiver);
        }

        let mut content_type = self
            .content_type
            .clone()
            .unwrap_or_else(ContentType::text_plain);
        if let Some(charset) = &self.charset {
            content_type = content_type.with_charset(charset);
        } else if content_type.charset().is_none() {
            // Transport default charset
            content_type = content_type.with_charset("utf-8");
        }

        debug!(
            to = self.to.len(),
            cc = self.cc.len(),
            bcc = self.bcc.len(),
            headers = self.headers.len(),
            "building message"
        );

        self.state = BuildState::Built(MimeMessage {
            from,
            to: self.to.clone(),
            cc: self.cc.clone(),
            bcc: self.bcc.clone(),
            reply_to: self.reply_to.clone(),
            headers: self.headers.clone(),
            subject: self.subject.clone(),
            body: self.content.clone(),
            content_type,
            sent_date: self.sent_date(),
        });

        Ok(())
    }

    /// Returns the built message, if [`build_mime_message`] has succeeded.
    ///
    /// [`build_mime_message`]: EmailDraft::build_mime_message
    #[must_use]
    pub const fn mime_message(&self) -> Option<&MimeMessage> {
        match &self.state {
            BuildState::Built(message) => Some(message),
            BuildState::Unbuilt => None,
        }
    }

    /// Constructs the transport session from the connection settings.
    ///
    /// All numeric settings are serialized into the session's property map
    /// as decimal strings; an authenticator flags the session for
    /// authenticated SMTP; the bounce address becomes the session's
    /// envelope-from. Performs no network I/O.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingHost`] if no hostname is set.
    pub fn mail_session(&self) -> Result<MailSession> {
        let host_name = self.host_name.as_deref().ok_or(Error::MissingHost)?;

        let mut session = MailSession::new();
        session.set_property(MailSession::MAIL_HOST, host_name);
        session.set_property(MailSession::MAIL_PORT, self.smtp_port.to_string());
        session.set_property(
            MailSession::MAIL_SMTP_TIMEOUT,
            self.socket_timeout.to_string(),
        );
        session.set_property(
            MailSession::MAIL_SMTP_CONNECTION_TIMEOUT,
            self.socket_connection_timeout.to_string(),
        );

        if self.ssl_on_connect {
            session.set_property(MailSession::MAIL_SMTP_SSL_ENABLE, "true");
        }

        if let Some(bounce) = &self.bounce_address {
            session.set_property(MailSession::MAIL_SMTP_FROM, bounce.as_str());
        }

        if let Some(authenticator) = &self.authenticator {
            session.authenticate(authenticator.clone());
        }

        Ok(session)
    }

    fn collect_mailboxes<I>(addresses: I) -> Result<Vec<Mailbox>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mailboxes = addresses
            .into_iter()
            .map(Mailbox::new)
            .collect::<mailwright_mime::Result<Vec<_>>>()?;

        if mailboxes.is_empty() {
            return Err(Error::InvalidAddressSet);
        }

        Ok(mailboxes)
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

    const TEST_EMAILS: [&str; 3] = ["123@abc.com", "abc.ded@gf.net", "dffe@mdf.org"];

    /// A draft with enough fields set for a build to succeed.
    fn sendable_draft() -> EmailDraft {
        let mut draft = EmailDraft::new();
        draft.set_host_name("local");
        draft.set_smtp_port(2313).unwrap();
        draft.set_from("123.abc@abc.com").unwrap();
        draft.add_to("fake.email@gbc.com").unwrap();
        draft.set_subject("Test Email");
        draft.set_charset("ISO-8859-1");
        draft.set_content("This is test text", "text/plain").unwrap();
        draft
    }

    #[test]
    fn test_add_bcc_multiple() {
        let mut draft = EmailDraft::new();
        draft.add_bcc_all(TEST_EMAILS).unwrap();
        assert_eq!(draft.bcc().len(), 3);
    }

    #[test]
    fn test_add_bcc_single() {
        let mut draft = EmailDraft::new();
        draft.add_bcc("abc.ef@fak.org").unwrap();
        assert_eq!(draft.bcc().len(), 1);
    }

    #[test]
    fn test_add_bcc_empty() {
        let mut draft = EmailDraft::new();
        let err = draft.add_bcc_all(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidAddressSet));
        assert!(draft.bcc().is_empty());
    }

    #[test]
    fn test_add_cc_multiple() {
        let mut draft = EmailDraft::new();
        draft.add_cc_all(TEST_EMAILS).unwrap();
        assert_eq!(draft.cc().len(), 3);
    }

    #[test]
    fn test_add_cc_single() {
        let mut draft = EmailDraft::new();
        draft.add_cc("abcd@ef.com").unwrap();
        assert_eq!(draft.cc().len(), 1);
    }

    #[test]
    fn test_add_cc_empty() {
        let mut draft = EmailDraft::new();
        let err = draft.add_cc_all(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidAddressSet));
        assert!(draft.cc().is_empty());
    }

    #[test]
    fn test_add_to_multiple() {
        let mut draft = EmailDraft::new();
        draft.add_to_all(TEST_EMAILS).unwrap();
        assert_eq!(draft.to().len(), 3);
    }

    #[test]
    fn test_add_to_invalid_leaves_draft_unchanged() {
        let mut draft = EmailDraft::new();
        let err = draft.add_to_all(["ok@example.com", "not-an-address"]).unwrap_err();
        assert!(matches!(err, Error::Mime(_)));
        assert!(draft.to().is_empty());
    }

    #[test]
    fn test_add_header() {
        let mut draft = EmailDraft::new();
        draft.add_header("X-Priority", "Important").unwrap();
        assert_eq!(draft.headers().len(), 1);
    }

    #[test]
    fn test_add_header_empty_name() {
        let mut draft = EmailDraft::new();
        let err = draft.add_header("", "Important").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(draft.headers().is_empty());
    }

    #[test]
    fn test_add_header_empty_value() {
        let mut draft = EmailDraft::new();
        let err = draft.add_header("X-Priority", "").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(draft.headers().is_empty());
    }

    #[test]
    fn test_add_header_overwrites_by_name() {
        let mut draft = EmailDraft::new();
        draft.add_header("X-Tag", "first").unwrap();
        draft.add_header("X-Tag", "second").unwrap();

        assert_eq!(draft.headers().len(), 1);
        assert_eq!(draft.headers().get("X-Tag"), Some("second"));
    }

    #[test]
    fn test_add_reply_to_named() {
        let mut draft = EmailDraft::new();
        draft.add_reply_to_named("123.213@bcd.com", "BillyBob").unwrap();

        assert_eq!(draft.reply_to().len(), 1);
        assert_eq!(draft.reply_to()[0].name.as_deref(), Some("BillyBob"));
    }

    #[test]
    fn test_add_reply_to_single() {
        let mut draft = EmailDraft::new();
        draft.add_reply_to("1213@avc.com").unwrap();
        assert_eq!(draft.reply_to().len(), 1);
    }

    #[test]
    fn test_sent_date_defaults_to_now() {
        let draft = EmailDraft::new();
        let elapsed = Utc::now() - draft.sent_date();
        assert!(elapsed.num_seconds().abs() < 5);
    }

    #[test]
    fn test_sent_date_returns_exact_value() {
        let stamp = Utc.timestamp_millis_opt(1741944413123).unwrap();
        let mut draft = EmailDraft::new();
        draft.set_sent_date(stamp);

        assert_eq!(draft.sent_date(), stamp);
        assert_eq!(draft.sent_date().timestamp_millis(), 1741944413123);
    }

    #[test]
    fn test_socket_connection_timeout_default() {
        assert_eq!(EmailDraft::new().socket_connection_timeout(), 60000);
    }

    #[test]
    fn test_set_from() {
        let mut draft = EmailDraft::new();
        draft.set_from("123.123@acc.com").unwrap();
        assert_eq!(draft.from().unwrap().address.as_str(), "123.123@acc.com");
    }

    #[test]
    fn test_set_smtp_port_zero_rejected() {
        let mut draft = EmailDraft::new();
        let err = draft.set_smtp_port(0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(draft.smtp_port(), DEFAULT_SMTP_PORT);
    }

    #[test]
    fn test_build_mime_message_duplicate() {
        let mut draft = sendable_draft();
        draft.build_mime_message().unwrap();

        let err = draft.build_mime_message().unwrap_err();
        assert!(matches!(err, Error::AlreadyBuilt));
        assert_eq!(err.to_string(), "The MimeMessage is already built.");
    }

    #[test]
    fn test_build_mime_message_success() {
        let mut draft = sendable_draft();
        draft.add_cc("test.email@fc.com").unwrap();
        draft.add_bcc("another@ccc.com").unwrap();

        draft.build_mime_message().unwrap();

        let message = draft.mime_message().unwrap();
        assert_eq!(message.subject.as_deref(), Some("Test Email"));
        assert_eq!(message.body.as_deref(), Some("This is test text"));
        assert_eq!(message.content_type.charset(), Some("ISO-8859-1"));
        assert_eq!(message.recipients().len(), 3);
    }

    #[test]
    fn test_build_mime_message_no_from() {
        let mut draft = sendable_draft();
        draft.from = None;

        let err = draft.build_mime_message().unwrap_err();
        assert!(matches!(err, Error::MissingFrom));
        assert_eq!(err.to_string(), "From address required");
        assert!(draft.mime_message().is_none());
    }

    #[test]
    fn test_build_mime_message_no_receivers() {
        let mut draft = EmailDraft::new();
        draft.set_host_name("local");
        draft.set_from("123.abc@abc.com").unwrap();
        draft.set_subject("Test Email");

        let err = draft.build_mime_message().unwrap_err();
        assert!(matches!(err, Error::MissingReceiver));
        assert_eq!(err.to_string(), "At least one receiver address required");
    }

    #[test]
    fn test_build_mime_message_retriable_after_failure() {
        let mut draft = sendable_draft();
        draft.from = None;

        assert!(draft.build_mime_message().is_err());

        draft.set_from("123.abc@abc.com").unwrap();
        draft.build_mime_message().unwrap();
        assert!(draft.mime_message().is_some());
    }

    #[test]
    fn test_build_mime_message_headers() {
        let mut draft = sendable_draft();
        draft.add_header("header1", "value1").unwrap();
        draft.add_header("header2", "value2").unwrap();

        draft.build_mime_message().unwrap();

        let message = draft.mime_message().unwrap();
        assert_eq!(message.headers.get("header1"), Some("value1"));
        assert_eq!(message.headers.get("header2"), Some("value2"));
    }

    #[test]
    fn test_build_mime_message_no_charset() {
        let mut draft = sendable_draft();
        draft.charset = None;

        draft.build_mime_message().unwrap();

        // Falls back to the transport default charset
        let message = draft.mime_message().unwrap();
        assert_eq!(message.content_type.charset(), Some("utf-8"));
    }

    #[test]
    fn test_build_mime_message_keeps_content_type_charset() {
        let mut draft = sendable_draft();
        draft.charset = None;
        draft
            .set_content("This is test text", "text/plain; charset=us-ascii")
            .unwrap();

        draft.build_mime_message().unwrap();

        // An explicit content-type charset is not overridden by the default
        let message = draft.mime_message().unwrap();
        assert_eq!(message.content_type.charset(), Some("us-ascii"));
    }

    #[test]
    fn test_host_name() {
        let mut draft = EmailDraft::new();
        draft.set_host_name("testHost");
        assert_eq!(draft.host_name().unwrap().len(), 8);
    }

    #[test]
    fn test_host_name_empty_reads_absent() {
        let mut draft = EmailDraft::new();
        draft.set_host_name("");
        assert!(draft.host_name().is_none());
    }

    #[test]
    fn test_mail_session_not_set() {
        let draft = EmailDraft::new();
        let err = draft.mail_session().unwrap_err();
        assert!(matches!(err, Error::MissingHost));
        assert_eq!(err.to_string(), "Cannot find valid hostname for mail session");
    }

    #[test]
    fn test_mail_session_empty_host_name_missing() {
        let mut draft = EmailDraft::new();
        draft.set_host_name("");
        assert!(matches!(draft.mail_session(), Err(Error::MissingHost)));
    }

    #[test]
    fn test_mail_session_authentication() {
        let mut draft = EmailDraft::new();
        draft.set_host_name("FakeHost.com");
        draft.set_smtp_port(2332).unwrap();
        draft.set_authenticator(Authenticator::new("username", "password"));

        let session = draft.mail_session().unwrap();
        assert_eq!(session.property(MailSession::MAIL_HOST), Some("FakeHost.com"));
        assert_eq!(session.property(MailSession::MAIL_PORT), Some("2332"));
        assert!(session.property(MailSession::MAIL_SMTP_AUTH).is_some());
        assert!(session.authenticator().is_some());
    }

    #[test]
    fn test_mail_session_bounce_address() {
        let mut draft = EmailDraft::new();
        draft.set_host_name("Fakehost.com");
        draft.set_bounce_address("thisisthebounce@fack.com").unwrap();

        let session = draft.mail_session().unwrap();
        assert_eq!(
            session.property(MailSession::MAIL_SMTP_FROM),
            Some("thisisthebounce@fack.com")
        );
    }

    #[test]
    fn test_mail_session_socket_timeout() {
        let mut draft = EmailDraft::new();
        draft.set_host_name("Fakehost.com");
        draft.set_socket_timeout(2000);

        let session = draft.mail_session().unwrap();
        assert_eq!(session.property(MailSession::MAIL_SMTP_TIMEOUT), Some("2000"));
    }

    #[test]
    fn test_mail_session_connection_timeout_default() {
        let mut draft = EmailDraft::new();
        draft.set_host_name("Fakehost.com");

        let session = draft.mail_session().unwrap();
        assert_eq!(
            session.property(MailSession::MAIL_SMTP_CONNECTION_TIMEOUT),
            Some("60000")
        );
    }

    #[test]
    fn test_mail_session_ssl_flag() {
        let mut draft = EmailDraft::new();
        draft.set_host_name("Fakehost.com");
        draft.set_ssl_on_connect(true);

        let session = draft.mail_session().unwrap();
        assert!(session.ssl_on_connect());
    }
}
