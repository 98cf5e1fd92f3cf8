//! # mailwright
//!
//! Email composition: accumulate message fields on a mutable draft, build
//! the transport-ready message exactly once, and derive the SMTP session
//! configuration for delivery.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailwright::{Authenticator, EmailDraft};
//!
//! let mut draft = EmailDraft::new();
//! draft.set_host_name("smtp.example.com");
//! draft.set_smtp_port(587)?;
//! draft.set_authenticator(Authenticator::new("user", "password"));
//!
//! draft.set_from("alice@example.com")?;
//! draft.add_to("bob@example.com")?;
//! draft.set_subject("Greetings");
//! draft.set_content("Hello, Bob!", "text/plain")?;
//!
//! draft.build_mime_message()?;
//!
//! let session = draft.mail_session()?;
//! let message = draft.mime_message().expect("just built");
//! mailwright_smtp::send(&session, message).await?;
//! ```
//!
//! ## Design
//!
//! - A draft is a plain mutable value; setters may run in any order, any
//!   number of times, and every validation failure surfaces synchronously
//!   as a typed [`Error`].
//! - [`EmailDraft::build_mime_message`] is a one-shot state transition: the
//!   first success freezes the message, and later calls fail with
//!   [`Error::AlreadyBuilt`] rather than re-assembling.
//! - [`EmailDraft::mail_session`] only constructs a configuration handle;
//!   all network I/O lives in `mailwright-smtp`.
//!
//! Drafts are not synchronized; wrap one in a lock if it must be shared
//! across threads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod draft;
mod error;

pub use draft::{
    DEFAULT_SMTP_PORT, DEFAULT_SOCKET_CONNECTION_TIMEOUT_MS, DEFAULT_SOCKET_TIMEOUT_MS, EmailDraft,
};
pub use error::{Error, Result};

pub use mailwright_mime::{Address, ContentType, Headers, Mailbox, MimeMessage};
pub use mailwright_smtp::{Authenticator, MailSession};
