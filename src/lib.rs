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

//! taxcheck is a library and a command-line client for checking that a
//! read classifier and a taxonomy tree agree with each other.
//!
//! A classifier index built from one taxonomy snapshot and a tree taken from
//! another will assign reads to tax ids that the tree does not know about.
//! taxcheck loads both and lists those ids.
//!
//! The following inputs are supported, either as plain text or gzip:
//!   - Taxonomy trees in the tab-separated [NCBI nodes.dmp](https://ftp.ncbi.nih.gov/pub/taxonomy/)
//!     layout (tax id, parent id, and rank in columns 1, 3, and 5).
//!   - Per-read classification reports in the [Centrifuge](https://github.com/DaehwanKimLab/centrifuge)
//!     layout (read name, reference id, and tax id in the first three columns).
//!
//! bzip2 and zip inputs are detected and rejected.
//!
//! ## Usage
//!
//! ### Command line
//!
//! ```text
//! taxcheck --centrifuge classifications.tsv.gz --tree nodes.dmp
//! ```
//!
//! prints the missing tax ids in ascending order, one per line.
//!
//! ### Rust API
//!
//! The loaders in [parser] read from any [BufRead] or from a file path. The
//! [checker] compares their outputs and [printer] formats the result.
//!
//! ```rust
//! use std::io::Cursor;
//!
//! let tree = Cursor::new(b"1\tx\t1\tx\troot\n2\tx\t1\tx\tphylum\n".to_vec());
//! let classifications = Cursor::new(b"readID\tseqID\ttaxID\nread1\tseqA\t2\nread2\tseqB\t5\nread3\tno rank\t7\n".to_vec());
//!
//! let missing = taxcheck::find_missing_from_read(tree, classifications).unwrap();
//!
//! let mut output: Vec<u8> = Vec::new();
//! taxcheck::printer::write_missing(&missing, &mut output).unwrap();
//!
//! // 5 is not in the tree. The "no rank" line was recorded as the root, so 7
//! // is never looked up.
//! assert_eq!(output, b"5\n");
//! ```
//!
//! [lineage] additionally resolves the nearest ancestor with a standard rank
//! (phylum, class, order, ...) for any node in the tree.
//!

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use indexmap::IndexMap;
use roaring::RoaringBitmap;

pub mod checker;
pub mod compression;
pub mod error;
pub mod lineage;
pub mod parser;
pub mod printer;

pub use error::Error;
pub use error::Result;

/// Taxonomic identifier.
pub type TaxId = u32;

/// Tax id of the root node. The root is its own parent.
pub const ROOT: TaxId = 1;

/// Tax id that classifiers assign to unclassified reads.
pub const UNCLASSIFIED: TaxId = 0;

/// Maps each tax id to the tax id of its parent.
pub type ParentMap = HashMap<TaxId, TaxId>;

/// Maps each tax id to its lowercase rank.
pub type RankMap = HashMap<TaxId, String>;

/// Maps each read name to the tax ids it was assigned to.
///
/// Reads are stored in the order they first appear in the input.
pub type ReadClassification = IndexMap<String, RoaringBitmap>;

/// List tax ids in `classifications` that do not appear in `tree`.
///
/// Reads the whole tree first and then the whole classification report.
///
/// Returns the missing ids as a bitmap, which iterates in ascending order.
pub fn find_missing_from_read<T: BufRead, C: BufRead>(
    tree: T,
    classifications: C,
) -> Result<RoaringBitmap> {
    let (_, ranks) = parser::tree::read_tree(tree)?;
    let reads = parser::classification::read_classifications(classifications)?;
    Ok(report_missing(&reads, &ranks))
}

/// Same as [find_missing_from_read] but reads plain text or gzip files.
///
/// ## Errors
///
/// Fails without reading further if either file is bzip2 or zip
/// compressed, or violates the format assumptions described in [parser].
pub fn find_missing_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
    tree: P,
    classifications: Q,
) -> Result<RoaringBitmap> {
    let (_, ranks) = parser::tree::read_tree_file(tree)?;
    let reads = parser::classification::read_classifications_file(classifications)?;
    Ok(report_missing(&reads, &ranks))
}

fn report_missing(
    reads: &ReadClassification,
    ranks: &RankMap,
) -> RoaringBitmap {
    let missing = checker::missing_tax_ids(reads, ranks);
    if !missing.is_empty() {
        log::info!("{} tax id(s) assigned to reads are missing from the tree", missing.len());
    }
    missing
}
