/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! # FixWire Transport
//!
//! Async framing for FixWire FIX messages.
//!
//! This crate provides:
//! - **Codec**: a `tokio-util` codec ([`FixFramer`]) that turns a byte
//!   stream into parsed messages and back
//!
//! Socket management, reconnection, and TLS belong to the application; the
//! codec makes no assumption about chunk sizes or arrival timing.

pub mod codec;

pub use codec::{CodecError, FixFramer};
