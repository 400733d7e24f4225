/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! # FixWire Core
//!
//! Core types and error definitions for the FixWire FIX tag-value codec.
//!
//! This crate provides the fundamental building blocks used across all
//! FixWire crates:
//! - **Error types**: structural and integrity error hierarchies with `thiserror`
//! - **Field types**: [`Field`], [`FieldTag`], and well-known tag constants
//! - **Timestamps**: FIX-formatted [`Timestamp`] for SendingTime-style fields
//!
//! Field values are refcounted byte slices (`bytes::Bytes`), so messages
//! parsed out of a wire buffer share its allocation while remaining fully
//! owned, standalone values.

pub mod error;
pub mod field;
pub mod types;

pub use error::{FixError, IntegrityError, ParseError, Result};
pub use field::{Field, FieldTag, tags};
pub use types::Timestamp;
