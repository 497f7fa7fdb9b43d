// taxcheck: Find taxonomy IDs in classifier output that are missing from a taxonomy tree.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//

//! Error type shared by the loaders and the checker.
//!
//! None of these are recoverable: every variant aborts the run before any
//! output is written.

use std::num::ParseIntError;
use std::path::PathBuf;

use crate::compression::Unsupported;
use crate::TaxId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input file could not be opened or its first bytes could not be read.
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read failure after the file was opened, including invalid UTF-8 and
    /// corrupt gzip streams.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Input is compressed with something other than gzip.
    #[error("{}: cannot use {format} format - use gzip instead", path.display())]
    UnsupportedCompression {
        path: PathBuf,
        format: Unsupported,
    },

    /// Line has fewer tab-separated fields than the format needs.
    #[error("line {line}: expected at least {expected} tab-separated fields, found {found}")]
    MissingFields {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A tax id column is not an unsigned 32-bit integer.
    #[error("line {line}: invalid tax id '{value}': {source}")]
    InvalidTaxId {
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Tax id 1 is the root and must be its own parent.
    #[error("root node 1 must be its own parent, found parent {parent}")]
    RootParent {
        parent: TaxId,
    },

    /// Tax id 0 is only valid for unclassified reads. Anything else means the
    /// classifier index was built from an inconsistent taxonomy.
    #[error("line {line}: read '{read}' has tax id 0 but reference '{seq_id}' is not 'unclassified'")]
    UnclassifiedMismatch {
        line: usize,
        read: String,
        seq_id: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
