/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! Error types for the FixWire codec.
//!
//! Structural failures ([`ParseError`]) and data-integrity failures
//! ([`IntegrityError`]) are kept as separate hierarchies: a structurally
//! complete message with a wrong checksum is still a message, and whether
//! that matters is the caller's policy decision.
//!
//! "Not enough bytes buffered yet" is deliberately not an error. The parser
//! reports it as an absent result and waits for more input.

use thiserror::Error;

/// Result type alias using [`FixError`] as the error type.
pub type Result<T> = std::result::Result<T, FixError>;

/// Top-level error type for all FixWire operations.
#[derive(Debug, Error)]
pub enum FixError {
    /// Structural error while parsing a message from the wire.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Checksum or body-length verification failure.
    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),

    /// I/O error from an underlying transport.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when the byte stream violates the tag-value wire format.
///
/// Every variant means the buffered prefix can never become a valid message,
/// no matter how many bytes arrive later. Truncation alone never produces a
/// `ParseError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The stream does not start with a BeginString field (tag 8).
    #[error("invalid begin string: message must start with 8=")]
    InvalidBeginString,

    /// The field after BeginString is not BodyLength (tag 9).
    #[error("missing body length field (tag 9)")]
    MissingBodyLength,

    /// BodyLength value is not an unsigned decimal number.
    #[error("invalid body length value")]
    InvalidBodyLength,

    /// BodyLength is numeric but implies a frame no peer would send.
    #[error("body length out of range: declared {declared} exceeds maximum {max}")]
    BodyLengthOutOfRange {
        /// Declared body length in bytes.
        declared: usize,
        /// Configured maximum message size.
        max: usize,
    },

    /// The declared body boundary is not followed by a `10=XXX<SOH>` trailer.
    #[error("missing checksum field (tag 10) at declared body boundary")]
    MissingChecksum,

    /// A field tag is empty or contains non-digit bytes.
    #[error("invalid tag format: {0}")]
    InvalidTag(String),

    /// A field value is not terminated by SOH where one is required.
    #[error("missing field delimiter after tag {tag}")]
    MissingDelimiter {
        /// The tag whose value ran off the end of the message.
        tag: u32,
    },

    /// A field value cannot be interpreted as required by its role.
    #[error("invalid field value for tag {tag}: {reason}")]
    InvalidFieldValue {
        /// The tag number of the field.
        tag: u32,
        /// Description of why the value is invalid.
        reason: String,
    },

    /// Invalid UTF-8 in a field accessed as a string.
    #[error("invalid utf-8 in field: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Declared checksum does not match the computed sum.
    ///
    /// Only produced when checksum validation is switched on; the offending
    /// frame has already been drained, so parsing can continue.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Checksum computed over the received bytes.
        calculated: u8,
        /// Checksum declared in the message trailer.
        declared: u8,
    },
}

/// Post-parse verification failures.
///
/// Produced by recomputing BodyLength and CheckSum from a message's field
/// sequence and comparing them to the declared tag 9 / tag 10 values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    /// Recomputed checksum differs from the declared tag 10 value.
    #[error("checksum mismatch: calculated {calculated}, declared {declared}")]
    ChecksumMismatch {
        /// Checksum recomputed from the field sequence.
        calculated: u8,
        /// Checksum declared in tag 10.
        declared: u8,
    },

    /// Recomputed body length differs from the declared tag 9 value.
    #[error("body length mismatch: calculated {calculated}, declared {declared}")]
    BodyLengthMismatch {
        /// Body length recomputed from the field sequence.
        calculated: usize,
        /// Body length declared in tag 9.
        declared: usize,
    },

    /// The message carries no BodyLength field to verify against.
    #[error("message has no body length field (tag 9)")]
    MissingBodyLength,

    /// The message carries no CheckSum field to verify against.
    #[error("message has no checksum field (tag 10)")]
    MissingChecksum,

    /// A declared tag 9 or tag 10 value is not in the required format.
    #[error("declared value for tag {tag} is not in the required format")]
    InvalidDeclaredValue {
        /// The tag whose declared value is malformed.
        tag: u32,
    },
}
