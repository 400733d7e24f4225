/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! Field types for FIX tag-value messages.
//!
//! This module provides:
//! - [`tags`]: well-known tag number constants
//! - [`FieldTag`]: type-safe wrapper for FIX field tag numbers
//! - [`Field`]: an owned (tag, value) pair with typed value accessors
//!
//! Values are kept as byte sequences in their canonical wire representation.
//! Typed access parses on demand, so round-trips never reformat a value.

use crate::error::ParseError;
use bytes::Bytes;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Well-known FIX tag numbers with a structural role in the wire format.
pub mod tags {
    /// BeginString (8): protocol version, always the first field.
    pub const BEGIN_STRING: u32 = 8;
    /// BodyLength (9): byte count of the body, always the second field.
    pub const BODY_LENGTH: u32 = 9;
    /// CheckSum (10): mod-256 sum, always the last field.
    pub const CHECK_SUM: u32 = 10;
    /// MsgType (35): message type, conventionally the first body field.
    pub const MSG_TYPE: u32 = 35;
}

/// FIX field tag number.
///
/// Tags are positive integers that identify fields within a message.
/// Standard tags are defined in the FIX specification (1-5000 range),
/// while user-defined tags use the 5001+ range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FieldTag(u32);

impl FieldTag {
    /// Creates a new field tag.
    #[inline]
    #[must_use]
    pub const fn new(tag: u32) -> Self {
        Self(tag)
    }

    /// Returns the raw tag number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns true if this is a standard FIX tag (1-5000).
    #[inline]
    #[must_use]
    pub const fn is_standard(self) -> bool {
        self.0 >= 1 && self.0 <= 5000
    }

    /// Returns true if this is a user-defined tag (5001+).
    #[inline]
    #[must_use]
    pub const fn is_user_defined(self) -> bool {
        self.0 > 5000
    }

    /// Returns true if this tag is managed by the encoder rather than the
    /// caller (BeginString, BodyLength, CheckSum).
    #[inline]
    #[must_use]
    pub const fn is_structural(self) -> bool {
        matches!(
            self.0,
            tags::BEGIN_STRING | tags::BODY_LENGTH | tags::CHECK_SUM
        )
    }
}

impl From<u32> for FieldTag {
    fn from(tag: u32) -> Self {
        Self(tag)
    }
}

impl From<FieldTag> for u32 {
    fn from(tag: FieldTag) -> Self {
        tag.0
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An owned (tag, value) pair.
///
/// The value is a refcounted byte slice: fields parsed out of a message
/// frame share the frame's allocation instead of copying, and a field keeps
/// its value alive independently of the parser that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    tag: u32,
    value: Bytes,
}

impl Field {
    /// Creates a field from a tag and an owned value.
    #[inline]
    #[must_use]
    pub const fn new(tag: u32, value: Bytes) -> Self {
        Self { tag, value }
    }

    /// Creates a field by copying the given value bytes.
    #[inline]
    #[must_use]
    pub fn copy_from(tag: u32, value: &[u8]) -> Self {
        Self {
            tag,
            value: Bytes::copy_from_slice(value),
        }
    }

    /// Returns the raw tag number.
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Returns the tag as a [`FieldTag`].
    #[inline]
    #[must_use]
    pub const fn field_tag(&self) -> FieldTag {
        FieldTag(self.tag)
    }

    /// Returns the raw bytes of the value.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Consumes the field and returns the value bytes.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Bytes {
        self.value
    }

    /// Returns the value as a string slice.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidUtf8` if the value is not valid UTF-8.
    pub fn as_str(&self) -> std::result::Result<&str, ParseError> {
        std::str::from_utf8(&self.value).map_err(ParseError::from)
    }

    /// Parses the value as the specified type.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFieldValue` if parsing fails.
    pub fn parse<T: FromStr>(&self) -> std::result::Result<T, ParseError> {
        let s = self.as_str()?;
        s.parse().map_err(|_| ParseError::InvalidFieldValue {
            tag: self.tag,
            reason: format!("failed to parse '{}' as {}", s, std::any::type_name::<T>()),
        })
    }

    /// Returns the value as a u64.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFieldValue` if the value is not a valid integer.
    pub fn as_u64(&self) -> std::result::Result<u64, ParseError> {
        self.parse()
    }

    /// Returns the value as an i64.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFieldValue` if the value is not a valid integer.
    pub fn as_i64(&self) -> std::result::Result<i64, ParseError> {
        self.parse()
    }

    /// Returns the value as a Decimal.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFieldValue` if the value is not a valid decimal.
    pub fn as_decimal(&self) -> std::result::Result<Decimal, ParseError> {
        self.parse()
    }

    /// Returns the value as a bool (FIX uses 'Y'/'N').
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFieldValue` if the value is not 'Y' or 'N'.
    pub fn as_bool(&self) -> std::result::Result<bool, ParseError> {
        match self.value.as_ref() {
            b"Y" => Ok(true),
            b"N" => Ok(false),
            _ => Err(ParseError::InvalidFieldValue {
                tag: self.tag,
                reason: "expected 'Y' or 'N'".to_string(),
            }),
        }
    }

    /// Returns the value as a single character.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFieldValue` if the value is not a single ASCII character.
    pub fn as_char(&self) -> std::result::Result<char, ParseError> {
        if self.value.len() == 1 && self.value[0].is_ascii() {
            Ok(self.value[0] as char)
        } else {
            Err(ParseError::InvalidFieldValue {
                tag: self.tag,
                reason: "expected single ASCII character".to_string(),
            })
        }
    }

    /// Returns the length of the value in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the value is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, String::from_utf8_lossy(&self.value))
    }
}
