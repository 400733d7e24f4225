/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! # FixWire Tag-Value
//!
//! FIX tag=value message building and streaming parsing for FixWire.
//!
//! Two loosely-coupled components share the wire-format rules:
//!
//! - [`FixMessage`]: an ordered, append-only builder that serializes to a
//!   delimited, length-prefixed, checksummed byte stream. BodyLength (9)
//!   and CheckSum (10) are computed at encode time, never cached.
//! - [`FixParser`]: a buffering pull-based state machine that ingests byte
//!   fragments of any size and yields complete messages, tolerating
//!   partial buffers, concatenated messages, raw-data fields containing
//!   delimiter bytes, and malformed input.
//!
//! ## Features
//!
//! - **SIMD-accelerated**: uses `memchr` for delimiter search
//! - **Zero-copy field values**: parsed values are refcounted slices of the
//!   drained frame
//! - **Amortized linear**: header progress is cached across calls; no
//!   full-buffer rescans under fragmented input

pub mod checksum;
pub mod message;
pub mod parser;
pub mod raw;

pub use checksum::{compute_checksum, format_checksum, parse_checksum};
pub use message::{FixMessage, SOH};
pub use parser::{FixParser, decode_message};
pub use raw::RawTags;
