/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! Tokio codec for FIX message framing.
//!
//! [`FixFramer`] adapts the streaming parser to `tokio-util`'s codec
//! interface so a `Framed` transport yields parsed [`FixMessage`]s and
//! writes encoded ones. All framing decisions are delegated to
//! [`FixParser`]; this layer only moves bytes and reports.

use bytes::BytesMut;
use fixwire_core::error::ParseError;
use fixwire_tagvalue::message::FixMessage;
use fixwire_tagvalue::parser::FixParser;
use thiserror::Error;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// Errors surfaced through the codec interface.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Structural or integrity error from the parser.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error from the underlying transport.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tokio codec that frames FIX messages over a byte stream.
#[derive(Debug)]
pub struct FixFramer {
    parser: FixParser,
}

impl FixFramer {
    /// Creates a framer with default parser settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: FixParser::new(),
        }
    }

    /// Sets the maximum message size.
    #[must_use]
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.parser = self.parser.with_max_message_size(size);
        self
    }

    /// Sets whether to validate checksums while framing.
    #[must_use]
    pub fn with_checksum_validation(mut self, validate: bool) -> Self {
        self.parser = self.parser.with_checksum_validation(validate);
        self
    }
}

impl Default for FixFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FixFramer {
    type Item = FixMessage;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if !src.is_empty() {
            self.parser.append_buffer(src);
            src.clear();
        }
        match self.parser.get_message() {
            Ok(Some(msg)) => {
                trace!(fields = msg.field_count(), "framed message");
                Ok(Some(msg))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                trace!(error = %e, buffered = self.parser.buffered_len(), "framing error");
                Err(e.into())
            }
        }
    }
}

impl Encoder<&FixMessage> for FixFramer {
    type Error = CodecError;

    fn encode(&mut self, item: &FixMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let encoded = item.encode();
        dst.reserve(encoded.len());
        dst.extend_from_slice(&encoded);
        Ok(())
    }
}

impl Encoder<FixMessage> for FixFramer {
    type Error = CodecError;

    fn encode(&mut self, item: FixMessage, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode(&item, dst)
    }
}
