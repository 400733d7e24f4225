/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/8/26
******************************************************************************/

//! Raw-data field tables.
//!
//! A raw-data field (RawData, XmlData, the Encoded* family) may legitimately
//! contain SOH bytes, so its value cannot be found by delimiter scanning.
//! Instead, each raw-data tag is paired with a declared-length tag that must
//! immediately precede it on the wire; the parser takes exactly that many
//! value bytes.

use std::collections::HashMap;

/// Standard (length tag, data tag) pairs from the FIX field dictionary.
///
/// Covers SecureData (90/91), RawData (95/96), XmlData (212/213), and the
/// EncodedText-style pairs through 621/622.
pub const DEFAULT_RAW_PAIRS: &[(u32, u32)] = &[
    (90, 91),
    (95, 96),
    (212, 213),
    (348, 349),
    (350, 351),
    (352, 353),
    (354, 355),
    (356, 357),
    (358, 359),
    (360, 361),
    (362, 363),
    (364, 365),
    (445, 446),
    (618, 619),
    (621, 622),
];

/// Lookup table from declared-length tags to their raw-data tags.
///
/// Starts from [`DEFAULT_RAW_PAIRS`] and can be extended per parser
/// instance for user-defined raw fields.
#[derive(Debug, Clone)]
pub struct RawTags {
    pairs: HashMap<u32, u32>,
}

impl RawTags {
    /// Creates a table with the standard pairs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pairs: DEFAULT_RAW_PAIRS.iter().copied().collect(),
        }
    }

    /// Creates an empty table with no raw-data handling.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            pairs: HashMap::new(),
        }
    }

    /// Returns the data tag paired with the given length tag, if any.
    #[inline]
    #[must_use]
    pub fn data_tag_for(&self, length_tag: u32) -> Option<u32> {
        self.pairs.get(&length_tag).copied()
    }

    /// Registers a (length tag, data tag) pair, replacing any existing
    /// mapping for the length tag.
    pub fn insert(&mut self, length_tag: u32, data_tag: u32) {
        self.pairs.insert(length_tag, data_tag);
    }

    /// Removes the pair keyed by the given length tag, returning its data
    /// tag if it was present.
    pub fn remove(&mut self, length_tag: u32) -> Option<u32> {
        self.pairs.remove(&length_tag)
    }
}

impl Default for RawTags {
    fn default() -> Self {
        Self::new()
    }
}
