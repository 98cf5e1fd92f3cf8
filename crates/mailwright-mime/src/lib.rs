//! # mailwright-mime
//!
//! Email message object model for mailwright.
//!
//! ## Features
//!
//! - **Addresses**: Validated bare addresses and display-name mailboxes
//! - **Headers**: Case-insensitive header map with canonical rendering
//! - **Content types**: `type/subtype; param=value` parsing and display
//! - **Messages**: Immutable [`MimeMessage`] snapshots with RFC 5322
//!   rendering
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailwright_mime::{Headers, Mailbox};
//!
//! let sender = Mailbox::with_name("Alice", "alice@example.com")?;
//!
//! let mut headers = Headers::new();
//! headers.set("X-Mailer", "mailwright");
//! assert_eq!(headers.get("x-mailer"), Some("mailwright"));
//! ```
//!
//! Message assembly lives in the `mailwright` crate; this crate only models
//! the assembled form.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod address;
mod content_type;
mod error;
mod header;
mod message;

pub use address::{Address, Mailbox, format_mailbox_list};
pub use content_type::ContentType;
pub use error::{Error, Result};
pub use header::Headers;
pub use message::MimeMessage;
