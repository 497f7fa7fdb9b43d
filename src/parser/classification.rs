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
use std::io::BufRead;
use std::path::Path;

use roaring::RoaringBitmap;

use crate::compression::open_file;
use crate::error::Error;
use crate::error::Result;
use crate::parser::ensure_fields;
use crate::parser::parse_tax_id;
use crate::parser::split_line;
use crate::ReadClassification;
use crate::TaxId;
use crate::ROOT;
use crate::UNCLASSIFIED;

/// Read name in the header line of a Centrifuge report.
pub const HEADER_READ_ID: &str = "readID";

/// Reference id of reads assigned to a node above any reference sequence.
pub const NO_RANK_SEQ_ID: &str = "no rank";

/// Reference id of unclassified reads.
pub const UNCLASSIFIED_SEQ_ID: &str = "unclassified";

const READ_COL: usize = 0;
const SEQ_ID_COL: usize = 1;
const TAX_ID_COL: usize = 2;

/// Check that tax id 0 was assigned to an unclassified read.
pub fn check_unclassified(
    seq_id: &str,
    read: &str,
    line: usize,
) -> Result<()> {
    if seq_id != UNCLASSIFIED_SEQ_ID {
        return Err(Error::UnclassifiedMismatch {
            line,
            read: read.to_string(),
            seq_id: seq_id.to_string(),
        })
    }
    Ok(())
}

/// Parse a Centrifuge classification report
///
/// Reads tab-separated lines with the read name in column 1, the reference
/// id in column 2, and the assigned tax id in column 3. A line whose read
/// name is `readID` is a header and is skipped.
///
/// A read that maps to several references has one line per reference, and
/// its tax ids are collected into one set. Lines with reference id `no rank`
/// are recorded as the root (tax id 1) regardless of their tax id column.
///
/// Returns the set of tax ids for each read, with reads in the order they
/// first appear.
///
/// ## Errors
///
/// Lines with fewer than 3 columns or a non-numeric tax id fail with
/// [Error::MissingFields] or [Error::InvalidTaxId]. Tax id 0 on a line whose
/// reference id is not `unclassified` fails with
/// [Error::UnclassifiedMismatch].
///
pub fn read_classifications<R: BufRead>(
    conn: R,
) -> Result<ReadClassification> {
    let mut reads = ReadClassification::new();
    for (idx, line) in conn.lines().enumerate() {
        let line = line?;
        let fields = split_line(&line);
        if fields[READ_COL] == HEADER_READ_ID {
            continue;
        }
        ensure_fields(&fields, TAX_ID_COL + 1, idx + 1)?;

        let read = fields[READ_COL];
        let seq_id = fields[SEQ_ID_COL];
        let mut tax_id: TaxId = parse_tax_id(fields[TAX_ID_COL], idx + 1)?;
        if seq_id == NO_RANK_SEQ_ID {
            tax_id = ROOT;
        }
        if tax_id == UNCLASSIFIED {
            check_unclassified(seq_id, read, idx + 1)?;
        }

        if let Some(tax_ids) = reads.get_mut(read) {
            tax_ids.insert(tax_id);
        } else {
            let mut tax_ids = RoaringBitmap::new();
            tax_ids.insert(tax_id);
            reads.insert(read.to_string(), tax_ids);
        }
    }

    log::info!("Read classifications for {} reads", reads.len());
    Ok(reads)
}

/// Parse a Centrifuge classification report from a plain text or gzip file.
///
/// See [read_classifications] for the format.
pub fn read_classifications_file<P: AsRef<Path>>(
    path: P,
) -> Result<ReadClassification> {
    log::debug!("Loading classifications from {}", path.as_ref().display());
    let conn = open_file(path)?;
    read_classifications(conn)
}
