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

//! Loaders for taxonomy trees and classification reports.
//!
//! Both formats are tab-separated, one record per line. Each line is trimmed
//! of surrounding whitespace before it is split on tabs, and the tax id
//! columns must parse as unsigned integers.
//!
//! The loaders make no attempt to repair their input. Short lines, non-numeric
//! ids, a root that is not its own parent, and tax id 0 on a classified read
//! all abort loading with an [Error](crate::Error) that names the line.
//!
//! ## Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use taxcheck::parser::classification::read_classifications;
//! use taxcheck::parser::tree::read_tree;
//!
//! let tree = Cursor::new(b"1\t|\t1\t|\tno rank\t|\n2\t|\t1\t|\tSuperkingdom\t|\n".to_vec());
//! let (parents, ranks) = read_tree(tree).unwrap();
//!
//! assert_eq!(parents[&2], 1);
//! assert_eq!(ranks[&1], "root");
//! assert_eq!(ranks[&2], "superkingdom");
//! assert_eq!(ranks[&0], "unclassified");
//!
//! let report = Cursor::new(b"readID\tseqID\ttaxID\nr1\tNC_000913.3\t562\nr1\tno rank\t131567\n".to_vec());
//! let reads = read_classifications(report).unwrap();
//!
//! assert_eq!(reads["r1"].iter().collect::<Vec<u32>>(), vec![1, 562]);
//! ```
//!

pub mod classification;
pub mod tree;

use crate::error::Error;
use crate::error::Result;
use crate::TaxId;

/// Split a line into its tab-separated fields.
fn split_line(
    line: &str,
) -> Vec<&str> {
    line.trim().split('\t').collect()
}

/// Fail unless `fields` has at least `expected` entries.
fn ensure_fields(
    fields: &[&str],
    expected: usize,
    line: usize,
) -> Result<()> {
    if fields.len() < expected {
        return Err(Error::MissingFields { line, expected, found: fields.len() })
    }
    Ok(())
}

/// Parse a tax id column.
fn parse_tax_id(
    field: &str,
    line: usize,
) -> Result<TaxId> {
    field.trim().parse::<TaxId>().map_err(|source| Error::InvalidTaxId {
        line,
        value: field.to_string(),
        source,
    })
}
