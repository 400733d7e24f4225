/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! Streaming FIX message parser.
//!
//! [`FixParser`] accumulates raw bytes from any transport via
//! [`FixParser::append_buffer`] and yields complete messages from
//! [`FixParser::get_message`], one per call. Input may arrive in fragments
//! of any size; a message is returned only once every byte from BeginString
//! through the CheckSum trailer is buffered.
//!
//! Frame location trusts the declared BodyLength (tag 9): the parser jumps
//! to the declared body boundary and expects the `10=XXX<SOH>` trailer
//! there, rather than scanning the body for it. Header parse progress is
//! kept in a resumable state machine so repeated calls with a partial
//! buffer never re-scan consumed ground, and completed frames are drained
//! with `split_to`, keeping total work linear in bytes processed.
//!
//! Checksum validation is off by default; see
//! [`FixParser::with_checksum_validation`] and `FixMessage::verify`.

use crate::checksum::{compute_checksum, parse_checksum};
use crate::message::{FixMessage, SOH};
use crate::raw::RawTags;
use bytes::{Bytes, BytesMut};
use fixwire_core::error::ParseError;
use fixwire_core::field::Field;
use memchr::{memchr, memmem};

/// Equals sign delimiter between tag and value.
const EQUALS: u8 = b'=';

/// Default maximum message size in bytes.
const DEFAULT_MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Length of the fixed-form checksum trailer `10=XXX<SOH>`.
const TRAILER_LEN: usize = 7;

/// Upper bound on the BeginString and BodyLength field lengths. A header
/// field still undelimited past this many bytes can never become valid.
const HEADER_FIELD_LIMIT: usize = 32;

/// Marker that resynchronization scans for after a structural error.
const RESYNC_MARKER: [u8; 3] = [SOH, b'8', EQUALS];

/// Frame-location progress, retained across `get_message` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    AwaitingBeginString,
    AwaitingBodyLength {
        /// Offset just past the BeginString field's SOH.
        header_end: usize,
    },
    AwaitingBody {
        body_start: usize,
        body_length: usize,
    },
    AwaitingChecksum {
        body_start: usize,
        body_length: usize,
    },
}

/// Buffering, pull-based FIX message parser.
///
/// A single instance parses an unbounded sequence of messages from a
/// continuous stream; leftover bytes after each extracted message carry
/// forward to the next. The parser owns its buffer outright - caller
/// slices passed to `append_buffer` are copied, never aliased.
#[derive(Debug)]
pub struct FixParser {
    buf: BytesMut,
    state: ParseState,
    max_message_size: usize,
    validate_checksum: bool,
    raw_tags: RawTags,
}

impl FixParser {
    /// Creates a parser with default settings: 1 MiB maximum message size,
    /// checksum validation off, standard raw-data tag table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(4096),
            state: ParseState::AwaitingBeginString,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            validate_checksum: false,
            raw_tags: RawTags::new(),
        }
    }

    /// Sets the maximum message size.
    ///
    /// A declared BodyLength implying a frame beyond this bound is a
    /// structural error, distinguishing "can never resolve" from "not yet
    /// buffered".
    #[must_use]
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Sets whether to validate checksums during parsing.
    ///
    /// When enabled, a frame whose declared CheckSum disagrees with the
    /// computed sum yields [`ParseError::ChecksumMismatch`]. The frame is
    /// still drained, so the stream keeps parsing.
    #[must_use]
    pub fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.validate_checksum = validate;
        self
    }

    /// Registers an additional (length tag, data tag) raw-data pair.
    pub fn add_raw_pair(&mut self, length_tag: u32, data_tag: u32) {
        self.raw_tags.insert(length_tag, data_tag);
    }

    /// Removes a raw-data pair by its length tag.
    pub fn remove_raw_pair(&mut self, length_tag: u32) -> Option<u32> {
        self.raw_tags.remove(length_tag)
    }

    /// Appends raw bytes to the internal buffer.
    ///
    /// Never parses; safe with any chunk size, including empty. The bytes
    /// are copied, so the caller may reuse its buffer immediately.
    #[inline]
    pub fn append_buffer(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Returns the number of bytes currently buffered.
    #[inline]
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes are buffered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discards all buffered bytes and returns to the initial state.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = ParseState::AwaitingBeginString;
    }

    /// Attempts to extract one complete message from the front of the
    /// buffer.
    ///
    /// Returns `Ok(None)` when more bytes are needed - truncation is never
    /// an error. Returns `Ok(Some(message))` once a structurally complete
    /// frame is buffered; the frame's bytes are drained and any trailing
    /// bytes are retained for the next call.
    ///
    /// # Errors
    /// Returns a [`ParseError`] when the buffered prefix can never become a
    /// valid message. The malformed prefix is discarded up to the next
    /// plausible message boundary, so parsing can continue without an
    /// explicit [`FixParser::reset`].
    pub fn get_message(&mut self) -> Result<Option<FixMessage>, ParseError> {
        let frame_len = match self.locate_frame() {
            Ok(Some(len)) => len,
            Ok(None) => return Ok(None),
            Err(e) => {
                self.resync();
                return Err(e);
            }
        };
        let frame = self.take_frame(frame_len);

        if self.validate_checksum {
            let body_end = frame.len() - TRAILER_LEN;
            let declared = parse_checksum(&frame[body_end + 3..body_end + 6])
                .ok_or(ParseError::MissingChecksum)?;
            let calculated = compute_checksum(&frame[..body_end]);
            if calculated != declared {
                return Err(ParseError::ChecksumMismatch {
                    calculated,
                    declared,
                });
            }
        }

        decode_frame(frame, &self.raw_tags).map(Some)
    }

    /// Drives the state machine as far as the buffered bytes allow.
    ///
    /// Returns the total frame length once the trailer is in place,
    /// `Ok(None)` when more bytes are needed. Never consumes bytes.
    fn locate_frame(&mut self) -> Result<Option<usize>, ParseError> {
        loop {
            match self.state {
                ParseState::AwaitingBeginString => {
                    if self.buf.len() < 2 {
                        return Ok(None);
                    }
                    if &self.buf[..2] != b"8=" {
                        return Err(ParseError::InvalidBeginString);
                    }
                    let limit = self.buf.len().min(HEADER_FIELD_LIMIT);
                    match memchr(SOH, &self.buf[..limit]) {
                        Some(soh) => {
                            self.state = ParseState::AwaitingBodyLength {
                                header_end: soh + 1,
                            };
                        }
                        None if self.buf.len() >= HEADER_FIELD_LIMIT => {
                            return Err(ParseError::InvalidBeginString);
                        }
                        None => return Ok(None),
                    }
                }
                ParseState::AwaitingBodyLength { header_end } => {
                    let rest = &self.buf[header_end..];
                    if rest.len() < 2 {
                        return Ok(None);
                    }
                    if &rest[..2] != b"9=" {
                        return Err(ParseError::MissingBodyLength);
                    }
                    let limit = rest.len().min(HEADER_FIELD_LIMIT);
                    let Some(soh) = memchr(SOH, &rest[..limit]) else {
                        if rest.len() >= HEADER_FIELD_LIMIT {
                            return Err(ParseError::InvalidBodyLength);
                        }
                        return Ok(None);
                    };
                    let body_length =
                        parse_length(&rest[2..soh]).ok_or(ParseError::InvalidBodyLength)?;
                    let body_start = header_end + soh + 1;
                    let within_bound = body_start
                        .checked_add(body_length)
                        .and_then(|end| end.checked_add(TRAILER_LEN))
                        .is_some_and(|total| total <= self.max_message_size);
                    if !within_bound {
                        return Err(ParseError::BodyLengthOutOfRange {
                            declared: body_length,
                            max: self.max_message_size,
                        });
                    }
                    self.state = ParseState::AwaitingBody {
                        body_start,
                        body_length,
                    };
                }
                ParseState::AwaitingBody {
                    body_start,
                    body_length,
                } => {
                    if self.buf.len() < body_start + body_length {
                        return Ok(None);
                    }
                    self.state = ParseState::AwaitingChecksum {
                        body_start,
                        body_length,
                    };
                }
                ParseState::AwaitingChecksum {
                    body_start,
                    body_length,
                } => {
                    let body_end = body_start + body_length;
                    let total = body_end + TRAILER_LEN;
                    if self.buf.len() < total {
                        return Ok(None);
                    }
                    let trailer = &self.buf[body_end..total];
                    if &trailer[..3] != b"10="
                        || !trailer[3..6].iter().all(u8::is_ascii_digit)
                        || trailer[6] != SOH
                    {
                        return Err(ParseError::MissingChecksum);
                    }
                    return Ok(Some(total));
                }
            }
        }
    }

    /// Drains a completed frame and rearms the state machine.
    fn take_frame(&mut self, frame_len: usize) -> Bytes {
        self.state = ParseState::AwaitingBeginString;
        self.buf.split_to(frame_len).freeze()
    }

    /// Discards the malformed prefix after a structural error.
    ///
    /// Skips to the next `SOH 8=` boundary when one is visible; otherwise
    /// keeps only a tail that is a prefix of that marker, in case the
    /// boundary is split across incoming chunks. Guarantees forward
    /// progress: a repeated error always consumes bytes.
    fn resync(&mut self) {
        self.state = ParseState::AwaitingBeginString;
        if let Some(pos) = memmem::find(&self.buf, &RESYNC_MARKER) {
            let _ = self.buf.split_to(pos + 1);
            return;
        }
        let tail = if self.buf.ends_with(&RESYNC_MARKER[..2]) {
            2
        } else if self.buf.ends_with(&RESYNC_MARKER[..1]) {
            1
        } else {
            0
        };
        let _ = self.buf.split_to(self.buf.len() - tail);
    }
}

impl Default for FixParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes one complete wire frame into a message.
///
/// The frame must contain fully delimited fields; its structural envelope
/// (BeginString through CheckSum) is taken as already located. Uses the
/// standard raw-data tag table.
///
/// # Errors
/// Returns `ParseError` when a tag is malformed, a delimiter is missing, or
/// a declared raw-data length does not fit the frame.
pub fn decode_message(frame: impl Into<Bytes>) -> Result<FixMessage, ParseError> {
    decode_frame(frame.into(), &RawTags::new())
}

/// Splits a frame into fields, honoring declared-length raw-data values.
fn decode_frame(frame: Bytes, raw_tags: &RawTags) -> Result<FixMessage, ParseError> {
    let mut msg = FixMessage::with_capacity(16);
    let mut offset = 0usize;
    // Set when the previous field was a declared-length tag: the paired
    // data tag's value is taken by length, not by delimiter scan.
    let mut pending_raw: Option<(u32, usize)> = None;

    while offset < frame.len() {
        let rest = &frame[offset..];
        let eq = memchr(EQUALS, rest).ok_or_else(|| invalid_tag(rest))?;
        let tag = parse_tag(&rest[..eq]).ok_or_else(|| invalid_tag(&rest[..eq]))?;
        let value_start = offset + eq + 1;

        let value_end = match pending_raw.take() {
            Some((data_tag, length)) if data_tag == tag => value_start
                .checked_add(length)
                .ok_or_else(|| ParseError::InvalidFieldValue {
                    tag,
                    reason: "declared raw data length overflows".to_string(),
                })?,
            _ => {
                let soh = memchr(SOH, &frame[value_start..])
                    .ok_or(ParseError::MissingDelimiter { tag })?;
                value_start + soh
            }
        };
        if frame.get(value_end) != Some(&SOH) {
            return Err(ParseError::MissingDelimiter { tag });
        }

        let value = frame.slice(value_start..value_end);
        if let Some(data_tag) = raw_tags.data_tag_for(tag) {
            let length =
                parse_length(&value).ok_or_else(|| ParseError::InvalidFieldValue {
                    tag,
                    reason: "non-numeric raw data length".to_string(),
                })?;
            pending_raw = Some((data_tag, length));
        }
        msg.append_field(Field::new(tag, value));
        offset = value_end + 1;
    }
    Ok(msg)
}

fn invalid_tag(bytes: &[u8]) -> ParseError {
    let shown = &bytes[..bytes.len().min(16)];
    ParseError::InvalidTag(String::from_utf8_lossy(shown).into_owned())
}

/// Parses an ASCII decimal tag number.
#[inline]
fn parse_tag(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }
    let mut result: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }
    Some(result)
}

/// Parses an ASCII decimal length value.
#[inline]
fn parse_length(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() || bytes.len() > 10 {
        return None;
    }
    let mut result: usize = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add(usize::from(b - b'0'))?;
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::FixMessage;

    fn heartbeat() -> FixMessage {
        let mut msg = FixMessage::new();
        msg.append_pair(8, "FIX.4.2");
        msg.append_pair(35, "0");
        msg.append_pair(49, "SENDER");
        msg.append_pair(56, "TARGET");
        msg.append_pair(34, "1");
        msg.append_pair(52, "20250101-12:00:00.000");
        msg
    }

    fn pairs_of(msg: &FixMessage) -> Vec<(u32, Vec<u8>)> {
        msg.fields()
            .map(|f| (f.tag(), f.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag(b"8"), Some(8));
        assert_eq!(parse_tag(b"35"), Some(35));
        assert_eq!(parse_tag(b"12345"), Some(12345));
        assert_eq!(parse_tag(b""), None);
        assert_eq!(parse_tag(b"abc"), None);
        assert_eq!(parse_tag(b"12a"), None);
        assert_eq!(parse_tag(b"99999999999999"), None);
    }

    #[test]
    fn test_parse_single_message() {
        let encoded = heartbeat().encode();
        let mut parser = FixParser::new();
        parser.append_buffer(&encoded);

        let msg = parser.get_message().unwrap().unwrap();
        assert_eq!(msg.get(8), Some(&b"FIX.4.2"[..]));
        assert_eq!(msg.get(35), Some(&b"0"[..]));
        assert_eq!(msg.get(49), Some(&b"SENDER"[..]));
        assert!(parser.is_empty());
        assert_eq!(parser.get_message().unwrap(), None);
    }

    #[test]
    fn test_parsed_message_preserves_wire_order() {
        let encoded = heartbeat().encode();
        let msg = {
            let mut parser = FixParser::new();
            parser.append_buffer(&encoded);
            parser.get_message().unwrap().unwrap()
        };
        let tag_order: Vec<u32> = msg.fields().map(|f| f.tag()).collect();
        assert_eq!(tag_order, vec![8, 9, 35, 49, 56, 34, 52, 10]);
    }

    #[test]
    fn test_roundtrip_identity() {
        let original = heartbeat();
        let msg = decode_message(original.encode().freeze()).unwrap();

        // The decoded sequence is the original plus recomputed 9 and 10 in
        // their mandated positions.
        let decoded_without_derived: Vec<(u32, Vec<u8>)> = msg
            .fields()
            .filter(|f| f.tag() != 9 && f.tag() != 10)
            .map(|f| (f.tag(), f.as_bytes().to_vec()))
            .collect();
        assert_eq!(decoded_without_derived, pairs_of(&original));

        // And the declared derived fields verify against recomputation.
        msg.verify().unwrap();

        // Re-encoding the decoded message reproduces the wire bytes.
        assert_eq!(msg.encode(), original.encode());
    }

    #[test]
    fn test_streaming_byte_by_byte() {
        let encoded = heartbeat().encode();
        let mut parser = FixParser::new();

        for (i, byte) in encoded.iter().enumerate() {
            parser.append_buffer(&[*byte]);
            let result = parser.get_message().unwrap();
            if i < encoded.len() - 1 {
                assert!(result.is_none(), "yielded early at byte {i}");
            } else {
                let msg = result.unwrap();
                assert_eq!(msg.get(35), Some(&b"0"[..]));
            }
        }
    }

    #[test]
    fn test_streaming_every_two_chunk_split() {
        let encoded = heartbeat().encode();
        let whole = {
            let mut parser = FixParser::new();
            parser.append_buffer(&encoded);
            parser.get_message().unwrap().unwrap()
        };

        for split in 0..=encoded.len() {
            let mut parser = FixParser::new();
            parser.append_buffer(&encoded[..split]);
            if split < encoded.len() {
                assert_eq!(parser.get_message().unwrap(), None);
            }
            parser.append_buffer(&encoded[split..]);
            let msg = parser.get_message().unwrap().unwrap();
            assert_eq!(msg, whole, "split at {split} diverged");
        }
    }

    #[test]
    fn test_multi_message_stream() {
        let mut stream = Vec::new();
        for seq in 1..=3u64 {
            let mut msg = heartbeat();
            msg.remove(34);
            msg.append_uint(34, seq);
            stream.extend_from_slice(&msg.encode());
        }

        let mut parser = FixParser::new();
        parser.append_buffer(&stream);

        for seq in ["1", "2", "3"] {
            let msg = parser.get_message().unwrap().unwrap();
            assert_eq!(msg.get_str(34), Some(seq));
        }
        assert_eq!(parser.get_message().unwrap(), None);
        assert!(parser.is_empty());
    }

    #[test]
    fn test_trailing_partial_message_is_retained() {
        let encoded = heartbeat().encode();
        let mut stream = encoded.to_vec();
        stream.extend_from_slice(&encoded[..10]);

        let mut parser = FixParser::new();
        parser.append_buffer(&stream);
        assert!(parser.get_message().unwrap().is_some());
        assert_eq!(parser.get_message().unwrap(), None);
        assert_eq!(parser.buffered_len(), 10);

        parser.append_buffer(&encoded[10..]);
        assert!(parser.get_message().unwrap().is_some());
    }

    #[test]
    fn test_repeating_group_order_and_count() {
        let mut msg = FixMessage::new();
        msg.append_pair(8, "FIX.4.4");
        msg.append_pair(35, "W");
        msg.append_uint(268, 4);
        for (entry_type, px) in [("0", "145.50"), ("1", "145.55"), ("0", "145.49"), ("1", "145.56")]
        {
            msg.append_pair(269, entry_type);
            msg.append_pair(270, px);
            msg.append_pair(271, "100");
        }

        let parsed = decode_message(msg.encode().freeze()).unwrap();
        assert_eq!(parsed.count(269), 4);
        assert_eq!(parsed.count(270), 4);
        assert_eq!(parsed.get_nth(269, 0), Some(&b"0"[..]));
        assert_eq!(parsed.get_nth(269, 1), Some(&b"1"[..]));
        assert_eq!(parsed.get_nth(270, 2), Some(&b"145.49"[..]));
        assert_eq!(parsed.get_nth(270, 3), Some(&b"145.56"[..]));

        // Flat wire order is preserved exactly for group reconstruction.
        let body_tags: Vec<u32> = parsed
            .fields()
            .map(|f| f.tag())
            .filter(|&t| t == 269 || t == 270 || t == 271)
            .collect();
        assert_eq!(
            body_tags,
            vec![269, 270, 271, 269, 270, 271, 269, 270, 271, 269, 270, 271]
        );
    }

    #[test]
    fn test_raw_data_value_containing_soh() {
        let payload = b"binary\x01data\x01with=delims";
        let mut msg = FixMessage::new();
        msg.append_pair(8, "FIX.4.4");
        msg.append_pair(35, "B");
        msg.append_data(95, 96, payload);
        msg.append_pair(58, "after");

        let parsed = decode_message(msg.encode().freeze()).unwrap();
        assert_eq!(parsed.get(95), Some(&b"23"[..]));
        assert_eq!(parsed.get(96), Some(&payload[..]));
        assert_eq!(parsed.get(58), Some(&b"after"[..]));
    }

    #[test]
    fn test_raw_data_through_streaming_parser() {
        let mut msg = FixMessage::new();
        msg.append_pair(8, "FIX.4.4");
        msg.append_pair(35, "n");
        msg.append_data(212, 213, b"<xml>\x01</xml>");
        let encoded = msg.encode();

        let mut parser = FixParser::new();
        for byte in encoded.iter() {
            parser.append_buffer(&[*byte]);
        }
        let parsed = parser.get_message().unwrap().unwrap();
        assert_eq!(parsed.get(213), Some(&b"<xml>\x01</xml>"[..]));
    }

    #[test]
    fn test_custom_raw_pair() {
        let mut msg = FixMessage::new();
        msg.append_pair(8, "FIX.4.4");
        msg.append_pair(35, "U1");
        msg.append_data(9000, 9001, b"a\x01b");
        let encoded = msg.encode();

        let mut parser = FixParser::new();
        parser.add_raw_pair(9000, 9001);
        parser.append_buffer(&encoded);
        let parsed = parser.get_message().unwrap().unwrap();
        assert_eq!(parsed.get(9001), Some(&b"a\x01b"[..]));
    }

    #[test]
    fn test_non_numeric_body_length_is_malformed() {
        let mut parser = FixParser::new();
        parser.append_buffer(b"8=FIX.4.2\x019=abc\x0135=0\x0110=000\x01");
        assert_eq!(
            parser.get_message(),
            Err(ParseError::InvalidBodyLength)
        );
    }

    #[test]
    fn test_missing_begin_string_is_malformed() {
        let mut parser = FixParser::new();
        parser.append_buffer(b"9=5\x0135=0\x0110=000\x01");
        assert_eq!(parser.get_message(), Err(ParseError::InvalidBeginString));
    }

    #[test]
    fn test_second_field_must_be_body_length() {
        let mut parser = FixParser::new();
        parser.append_buffer(b"8=FIX.4.2\x0135=0\x0110=000\x01");
        assert_eq!(parser.get_message(), Err(ParseError::MissingBodyLength));
    }

    #[test]
    fn test_body_length_out_of_range() {
        let mut parser = FixParser::new().with_max_message_size(64);
        parser.append_buffer(b"8=FIX.4.2\x019=10000\x01");
        assert_eq!(
            parser.get_message(),
            Err(ParseError::BodyLengthOutOfRange {
                declared: 10000,
                max: 64
            })
        );
    }

    #[test]
    fn test_plausible_body_length_waits_for_more_data() {
        let mut parser = FixParser::new();
        parser.append_buffer(b"8=FIX.4.2\x019=500\x0135=0\x01");
        assert_eq!(parser.get_message().unwrap(), None);
        assert_eq!(parser.get_message().unwrap(), None);
    }

    #[test]
    fn test_trailer_must_be_checksum_field() {
        // Declared body length is honored, but the bytes at the boundary
        // are not a checksum field.
        let mut parser = FixParser::new();
        parser.append_buffer(b"8=FIX.4.2\x019=5\x0135=0\x0199=000\x01");
        assert_eq!(parser.get_message(), Err(ParseError::MissingChecksum));
    }

    #[test]
    fn test_recovery_after_leading_junk() {
        let encoded = heartbeat().encode();
        let mut stream = b"NOISE ON THE LINE\x01".to_vec();
        stream.extend_from_slice(&encoded);

        let mut parser = FixParser::new();
        parser.append_buffer(&stream);
        assert_eq!(parser.get_message(), Err(ParseError::InvalidBeginString));

        let msg = parser.get_message().unwrap().unwrap();
        assert_eq!(msg.get(35), Some(&b"0"[..]));
    }

    #[test]
    fn test_recovery_after_malformed_message() {
        let encoded = heartbeat().encode();
        let mut stream = b"8=FIX.4.2\x019=abc\x01".to_vec();
        stream.extend_from_slice(&encoded);

        let mut parser = FixParser::new();
        parser.append_buffer(&stream);
        assert_eq!(parser.get_message(), Err(ParseError::InvalidBodyLength));

        let msg = parser.get_message().unwrap().unwrap();
        assert_eq!(msg.get(49), Some(&b"SENDER"[..]));
    }

    #[test]
    fn test_junk_only_buffer_makes_progress() {
        let mut parser = FixParser::new();
        parser.append_buffer(b"complete garbage with no marker");
        assert_eq!(parser.get_message(), Err(ParseError::InvalidBeginString));
        // The junk was discarded; the parser is idle, not stuck on an
        // error loop.
        assert_eq!(parser.get_message().unwrap(), None);
        assert_eq!(parser.buffered_len(), 0);

        let encoded = heartbeat().encode();
        parser.append_buffer(&encoded);
        assert!(parser.get_message().unwrap().is_some());
    }

    #[test]
    fn test_resync_marker_split_across_chunks() {
        let encoded = heartbeat().encode();
        let mut parser = FixParser::new();
        // Junk that ends exactly at a chunk boundary with the SOH of the
        // next message's start marker.
        parser.append_buffer(b"junk\x01");
        assert_eq!(parser.get_message(), Err(ParseError::InvalidBeginString));
        parser.append_buffer(&encoded);
        // The retained SOH tail produces one more resync error, then the
        // real message parses.
        assert_eq!(parser.get_message(), Err(ParseError::InvalidBeginString));
        let msg = parser.get_message().unwrap().unwrap();
        assert_eq!(msg.get(35), Some(&b"0"[..]));
    }

    #[test]
    fn test_checksum_validation_opt_in() {
        let encoded = heartbeat().encode();
        let mut corrupted = encoded.to_vec();
        // Flip one body byte without changing any length.
        let pos = corrupted.windows(6).position(|w| w == b"SENDER").unwrap();
        corrupted[pos] = b'X';

        // Default parser is structurally greedy and returns the message.
        let mut parser = FixParser::new();
        parser.append_buffer(&corrupted);
        let msg = parser.get_message().unwrap().unwrap();
        assert_eq!(msg.get(49), Some(&b"XENDER"[..]));
        // Post-parse verification catches the drift.
        assert!(msg.verify().is_err());

        // Validating parser reports the mismatch and keeps draining.
        let mut parser = FixParser::new().with_checksum_validation(true);
        parser.append_buffer(&corrupted);
        parser.append_buffer(&encoded);
        assert!(matches!(
            parser.get_message(),
            Err(ParseError::ChecksumMismatch { .. })
        ));
        let msg = parser.get_message().unwrap().unwrap();
        assert_eq!(msg.get(49), Some(&b"SENDER"[..]));
    }

    #[test]
    fn test_checksum_validation_accepts_valid_message() {
        let encoded = heartbeat().encode();
        let mut parser = FixParser::new().with_checksum_validation(true);
        parser.append_buffer(&encoded);
        assert!(parser.get_message().unwrap().is_some());
    }

    #[test]
    fn test_reset_discards_partial_state() {
        let encoded = heartbeat().encode();
        let mut parser = FixParser::new();
        parser.append_buffer(&encoded[..12]);
        assert_eq!(parser.get_message().unwrap(), None);

        parser.reset();
        assert!(parser.is_empty());
        parser.append_buffer(&encoded);
        assert!(parser.get_message().unwrap().is_some());
    }

    #[test]
    fn test_empty_append_is_harmless() {
        let mut parser = FixParser::new();
        parser.append_buffer(b"");
        assert_eq!(parser.get_message().unwrap(), None);
    }

    #[test]
    fn test_empty_field_value() {
        let mut msg = FixMessage::new();
        msg.append_pair(8, "FIX.4.2");
        msg.append_pair(35, "0");
        msg.append_pair(58, "");
        let parsed = decode_message(msg.encode().freeze()).unwrap();
        assert_eq!(parsed.get(58), Some(&b""[..]));
    }

    #[test]
    fn test_concrete_heartbeat_scenario() {
        let encoded = heartbeat().encode();

        assert!(encoded.starts_with(b"8=FIX.4.2\x019="));
        let trailer = &encoded[encoded.len() - 7..];
        assert_eq!(&trailer[..3], b"10=");
        assert!(trailer[3..6].iter().all(u8::is_ascii_digit));
        assert_eq!(trailer[6], SOH);

        let mut parser = FixParser::new();
        parser.append_buffer(&encoded);
        let msg = parser.get_message().unwrap().unwrap();
        assert_eq!(msg.get_str(35), Some("0"));
    }
}
