/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! Ordered FIX message builder.
//!
//! [`FixMessage`] holds tag/value pairs in exact insertion order, which is
//! also the canonical wire order for everything except the structural
//! fields: on [`FixMessage::encode`], BeginString (8) is emitted first,
//! BodyLength (9) and CheckSum (10) are computed fresh and emitted in their
//! mandated positions. Repeating groups are simply repeated tags; the
//! builder never reorders or deduplicates.
//!
//! A tag index is maintained incrementally on append, so first-occurrence
//! lookup is O(1) on average while Nth-occurrence retrieval stays available
//! for group traversal.

use crate::checksum::{compute_checksum, format_checksum, parse_checksum};
use bytes::{BufMut, Bytes, BytesMut};
use fixwire_core::error::{IntegrityError, ParseError};
use fixwire_core::field::{Field, tags};
use fixwire_core::types::Timestamp;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use std::collections::HashMap;

/// SOH (Start of Header) delimiter used between FIX fields.
pub const SOH: u8 = 0x01;

/// Positions of a tag's occurrences, in insertion order.
type Positions = SmallVec<[usize; 2]>;

/// An ordered, append-only FIX message.
#[derive(Debug, Clone, Default)]
pub struct FixMessage {
    /// Canonical field sequence, insertion order preserved exactly.
    pairs: Vec<Field>,
    /// Tag -> positions in `pairs`.
    index: HashMap<u32, Positions>,
}

impl PartialEq for FixMessage {
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl Eq for FixMessage {}

impl FixMessage {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty message sized for the given field count.
    #[must_use]
    pub fn with_capacity(fields: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(fields),
            index: HashMap::with_capacity(fields),
        }
    }

    /// Appends an already-constructed field.
    pub fn append_field(&mut self, field: Field) {
        self.index
            .entry(field.tag())
            .or_default()
            .push(self.pairs.len());
        self.pairs.push(field);
    }

    /// Appends a (tag, value) pair.
    ///
    /// The value bytes are copied; no validation of tag ranges, duplicates,
    /// or header ordering is performed.
    #[inline]
    pub fn append_pair(&mut self, tag: u32, value: impl AsRef<[u8]>) {
        self.append_field(Field::copy_from(tag, value.as_ref()));
    }

    /// Appends a signed integer field in its canonical decimal form.
    #[inline]
    pub fn append_int(&mut self, tag: u32, value: i64) {
        let mut buf = itoa::Buffer::new();
        self.append_pair(tag, buf.format(value));
    }

    /// Appends an unsigned integer field in its canonical decimal form.
    #[inline]
    pub fn append_uint(&mut self, tag: u32, value: u64) {
        let mut buf = itoa::Buffer::new();
        self.append_pair(tag, buf.format(value));
    }

    /// Appends a boolean field as 'Y' or 'N'.
    #[inline]
    pub fn append_bool(&mut self, tag: u32, value: bool) {
        self.append_pair(tag, if value { &b"Y"[..] } else { &b"N"[..] });
    }

    /// Appends a single-character field.
    #[inline]
    pub fn append_char(&mut self, tag: u32, value: char) {
        let mut buf = [0u8; 4];
        let s = value.encode_utf8(&mut buf);
        self.append_pair(tag, s.as_bytes());
    }

    /// Appends a decimal field in its canonical textual form.
    #[inline]
    pub fn append_decimal(&mut self, tag: u32, value: Decimal) {
        self.append_pair(tag, value.to_string());
    }

    /// Appends a UTC timestamp field with millisecond precision
    /// (`YYYYMMDD-HH:MM:SS.sss`).
    #[inline]
    pub fn append_utc_timestamp(&mut self, tag: u32, ts: Timestamp) {
        self.append_pair(tag, ts.format_millis().as_bytes());
    }

    /// Appends a UTC timestamp field with microsecond precision
    /// (`YYYYMMDD-HH:MM:SS.ssssss`).
    #[inline]
    pub fn append_utc_timestamp_micros(&mut self, tag: u32, ts: Timestamp) {
        self.append_pair(tag, ts.format_micros().as_bytes());
    }

    /// Appends a declared-length field followed by its raw-data field.
    ///
    /// The data may contain SOH bytes; the paired length field is what lets
    /// a parser recover the value boundary.
    pub fn append_data(&mut self, length_tag: u32, data_tag: u32, data: &[u8]) {
        self.append_uint(length_tag, data.len() as u64);
        self.append_pair(data_tag, data);
    }

    /// Appends a field given as `tag=value` text.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidTag` when the tag part is missing or not
    /// an unsigned decimal number.
    pub fn append_string(&mut self, pair: &str) -> Result<(), ParseError> {
        let (tag, value) = pair
            .split_once('=')
            .ok_or_else(|| ParseError::InvalidTag(pair.to_string()))?;
        let tag: u32 = tag
            .parse()
            .map_err(|_| ParseError::InvalidTag(tag.to_string()))?;
        self.append_pair(tag, value.as_bytes());
        Ok(())
    }

    /// Appends several `tag=value` text pairs in order.
    ///
    /// # Errors
    /// Returns the first tag parse failure; earlier pairs remain appended.
    pub fn append_strings<'a>(
        &mut self,
        pairs: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ParseError> {
        for pair in pairs {
            self.append_string(pair)?;
        }
        Ok(())
    }

    /// Returns the value of the first field with the given tag.
    #[must_use]
    pub fn get(&self, tag: u32) -> Option<&[u8]> {
        self.get_nth(tag, 0)
    }

    /// Returns the value of the Nth (0-based) occurrence of the given tag.
    #[must_use]
    pub fn get_nth(&self, tag: u32, n: usize) -> Option<&[u8]> {
        self.get_field_nth(tag, n).map(Field::as_bytes)
    }

    /// Returns the first field with the given tag.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<&Field> {
        self.get_field_nth(tag, 0)
    }

    /// Returns the Nth (0-based) field with the given tag.
    #[must_use]
    pub fn get_field_nth(&self, tag: u32, n: usize) -> Option<&Field> {
        let pos = *self.index.get(&tag)?.get(n)?;
        self.pairs.get(pos)
    }

    /// Returns the value of the first field with the given tag as a string.
    ///
    /// Returns `None` if the tag is absent or the value is not UTF-8.
    #[must_use]
    pub fn get_str(&self, tag: u32) -> Option<&str> {
        self.get(tag).and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Returns the number of occurrences of the given tag.
    #[must_use]
    pub fn count(&self, tag: u32) -> usize {
        self.index.get(&tag).map_or(0, |positions| positions.len())
    }

    /// Returns the BeginString value (tag 8), if present.
    #[must_use]
    pub fn begin_string(&self) -> Option<&[u8]> {
        self.get(tags::BEGIN_STRING)
    }

    /// Returns the MsgType value (tag 35), if present.
    #[must_use]
    pub fn msg_type(&self) -> Option<&[u8]> {
        self.get(tags::MSG_TYPE)
    }

    /// Returns an iterator over all fields in insertion order.
    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.pairs.iter()
    }

    /// Returns the number of fields in the message.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the message has no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Removes the first occurrence of the given tag, returning its value.
    pub fn remove(&mut self, tag: u32) -> Option<Bytes> {
        self.remove_nth(tag, 0)
    }

    /// Removes the Nth (0-based) occurrence of the given tag, returning its
    /// value. Later field positions shift down; the index is rebuilt.
    pub fn remove_nth(&mut self, tag: u32, n: usize) -> Option<Bytes> {
        let pos = *self.index.get(&tag)?.get(n)?;
        let field = self.pairs.remove(pos);
        self.rebuild_index();
        Some(field.into_value())
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (pos, field) in self.pairs.iter().enumerate() {
            self.index.entry(field.tag()).or_default().push(pos);
        }
    }

    /// Serializes the body fields: every pair except tags 8, 9, and 10, in
    /// insertion order.
    fn encode_body(&self) -> BytesMut {
        let estimate: usize = self.pairs.iter().map(|f| f.len() + 8).sum();
        let mut body = BytesMut::with_capacity(estimate);
        for field in &self.pairs {
            if !field.field_tag().is_structural() {
                put_field(&mut body, field.tag(), field.as_bytes());
            }
        }
        body
    }

    /// Encodes the message to complete wire format.
    ///
    /// BeginString (8) is emitted first when present, followed by a freshly
    /// computed BodyLength (9), the body fields in insertion order, and a
    /// freshly computed CheckSum (10). Any tag 9 or tag 10 pairs appended by
    /// the caller are ignored; re-encoding after further appends recomputes
    /// both from scratch.
    ///
    /// A message without BeginString still encodes; which tags are required
    /// is an application concern, not a wire-format one.
    #[must_use]
    pub fn encode(&self) -> BytesMut {
        let body = self.encode_body();

        let mut message = BytesMut::with_capacity(body.len() + 32);
        if let Some(begin_string) = self.begin_string() {
            put_field(&mut message, tags::BEGIN_STRING, begin_string);
        }
        let mut len_buf = itoa::Buffer::new();
        put_field(
            &mut message,
            tags::BODY_LENGTH,
            len_buf.format(body.len()).as_bytes(),
        );
        message.extend_from_slice(&body);

        let checksum = compute_checksum(&message);
        message.put_slice(b"10=");
        message.put_slice(&format_checksum(checksum));
        message.put_u8(SOH);

        message
    }

    /// Serializes every pair verbatim, in insertion order, with no
    /// automatic BeginString/BodyLength/CheckSum handling.
    ///
    /// Useful for constructing deliberately malformed wire data in tests
    /// and conformance tools.
    #[must_use]
    pub fn encode_raw(&self) -> BytesMut {
        let estimate: usize = self.pairs.iter().map(|f| f.len() + 8).sum();
        let mut message = BytesMut::with_capacity(estimate);
        for field in &self.pairs {
            put_field(&mut message, field.tag(), field.as_bytes());
        }
        message
    }

    /// Verifies the declared BodyLength and CheckSum against values
    /// recomputed from the field sequence.
    ///
    /// Intended for messages produced by a parser, where tags 9 and 10 hold
    /// what the peer declared. Verification is a post-parse decision: a
    /// failure reports the mismatch but the message itself stays usable.
    ///
    /// # Errors
    /// Returns the first [`IntegrityError`] found.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        let declared_len_bytes = self
            .get(tags::BODY_LENGTH)
            .ok_or(IntegrityError::MissingBodyLength)?;
        let declared_len: usize = std::str::from_utf8(declared_len_bytes)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(IntegrityError::InvalidDeclaredValue {
                tag: tags::BODY_LENGTH,
            })?;
        let declared_checksum = parse_checksum(
            self.get(tags::CHECK_SUM)
                .ok_or(IntegrityError::MissingChecksum)?,
        )
        .ok_or(IntegrityError::InvalidDeclaredValue {
            tag: tags::CHECK_SUM,
        })?;

        let body = self.encode_body();
        if body.len() != declared_len {
            return Err(IntegrityError::BodyLengthMismatch {
                calculated: body.len(),
                declared: declared_len,
            });
        }

        // Checksum spans the wire bytes as declared, so the prefix is rebuilt
        // with the declared length value rather than the recomputed one.
        let mut prefix = BytesMut::with_capacity(body.len() + 32);
        if let Some(begin_string) = self.begin_string() {
            put_field(&mut prefix, tags::BEGIN_STRING, begin_string);
        }
        put_field(&mut prefix, tags::BODY_LENGTH, declared_len_bytes);
        prefix.extend_from_slice(&body);

        let calculated = compute_checksum(&prefix);
        if calculated != declared_checksum {
            return Err(IntegrityError::ChecksumMismatch {
                calculated,
                declared: declared_checksum,
            });
        }
        Ok(())
    }
}

/// Writes one `tag=value<SOH>` segment.
#[inline]
fn put_field(buf: &mut BytesMut, tag: u32, value: &[u8]) {
    let mut tag_buf = itoa::Buffer::new();
    buf.put_slice(tag_buf.format(tag).as_bytes());
    buf.put_u8(b'=');
    buf.put_slice(value);
    buf.put_u8(SOH);
}
