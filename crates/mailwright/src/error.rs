//! Error types for email composition.

/// Result type alias for email composition.
pub type Result<T> = std::result::Result<T, Error>;

/// Composition error types.
///
/// Validation failures surface synchronously from the setter or build call
/// that caused them; nothing is logged or swallowed internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An address collection passed to an add-address operation was empty.
    #[error("Address collection must not be empty")]
    InvalidAddressSet,

    /// A required argument was empty or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Build was invoked without a sender address.
    #[error("From address required")]
    MissingFrom,

    /// Build was invoked with no to, cc, or bcc recipients.
    #[error("At least one receiver address required")]
    MissingReceiver,

    /// Session construction was invoked without a hostname.
    #[error("Cannot find valid hostname for mail session")]
    MissingHost,

    /// Build was invoked on a draft that already produced its message.
    #[error("The MimeMessage is already built.")]
    AlreadyBuilt,

    /// Malformed address or content type.
    #[error(transparent)]
    Mime(#[from] mailwright_mime::Error),
}
