//! # mailwright-smtp
//!
//! SMTP session configuration and message delivery for mailwright.
//!
//! ## Features
//!
//! - **Sessions**: [`MailSession`] — a `mail.smtp.*` property map consumed
//!   by the sender; constructing one performs no network I/O
//! - **Authentication**: AUTH PLAIN via [`Authenticator`]
//! - **TLS**: Both plain TCP and TLS-on-connect (`mail.smtp.ssl.enable`)
//! - **Timeouts**: Connection and socket timeouts taken from the session
//!   (`mail.smtp.connectiontimeout`, `mail.smtp.timeout`)
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailwright_smtp::{Authenticator, MailSession, send};
//!
//! let mut session = MailSession::new();
//! session.set_property(MailSession::MAIL_HOST, "smtp.example.com");
//! session.set_property(MailSession::MAIL_PORT, "587");
//! session.authenticate(Authenticator::new("user", "password"));
//!
//! // `message` is a built mailwright_mime::MimeMessage
//! send(&session, &message).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod reply;
mod session;
mod stream;
mod transport;

pub use error::{Error, Result};
pub use reply::{Reply, ReplyCode};
pub use session::{Authenticator, MailSession};
pub use stream::SmtpStream;
pub use transport::send;
