/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! # FixWire
//!
//! A FIX tag-value wire codec for Rust.
//!
//! FixWire implements the FIX wire format as two loosely-coupled
//! components: an ordered message builder and a streaming parser. It stays
//! below the session layer - no logon, heartbeats, or sequence recovery -
//! and treats tags as opaque numeric keys, so it works with any FIX
//! version's dictionary.
//!
//! ## Quick Start
//!
//! ```rust
//! use fixwire::prelude::*;
//!
//! // Build and encode a heartbeat.
//! let mut msg = FixMessage::new();
//! msg.append_pair(8, "FIX.4.2");
//! msg.append_pair(35, "0");
//! let wire = msg.encode();
//!
//! // Parse it back from a byte stream, in fragments of any size.
//! let mut parser = FixParser::new();
//! parser.append_buffer(&wire);
//! let parsed = parser.get_message().unwrap().unwrap();
//! assert_eq!(parsed.get_str(35), Some("0"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: field, timestamp, and error types
//! - [`tagvalue`]: message builder, streaming parser, checksum primitives
//! - [`transport`]: tokio codec framing

pub mod core {
    //! Field, timestamp, and error types.
    pub use fixwire_core::*;
}

pub mod tagvalue {
    //! Message builder, streaming parser, and checksum primitives.
    pub use fixwire_tagvalue::*;
}

pub mod transport {
    //! Tokio codec framing.
    pub use fixwire_transport::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use fixwire_core::{
        Field, FieldTag, FixError, IntegrityError, ParseError, Result, Timestamp, tags,
    };

    // Tag-value codec
    pub use fixwire_tagvalue::{
        FixMessage, FixParser, RawTags, SOH, compute_checksum, decode_message,
    };

    // Transport
    pub use fixwire_transport::{CodecError, FixFramer};
}
