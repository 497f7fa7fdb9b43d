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

use crate::compression::open_file;
use crate::error::Error;
use crate::error::Result;
use crate::parser::ensure_fields;
use crate::parser::parse_tax_id;
use crate::parser::split_line;
use crate::ParentMap;
use crate::RankMap;
use crate::TaxId;
use crate::ROOT;
use crate::UNCLASSIFIED;

const TAX_ID_COL: usize = 0;
const PARENT_ID_COL: usize = 2;
const RANK_COL: usize = 4;

/// Check that the root node is its own parent.
pub fn check_root(
    parent_id: TaxId,
) -> Result<()> {
    if parent_id != ROOT {
        return Err(Error::RootParent { parent: parent_id })
    }
    Ok(())
}

/// Parse a taxonomy tree
///
/// Reads a tab-separated tree with the tax id in column 1, the parent tax id
/// in column 3, and the rank in column 5. Other columns, such as the `|`
/// separators of NCBI `nodes.dmp`, are ignored.
///
/// Ranks are stored in lowercase exactly as given, except for tax id 1
/// which is always ranked `root`. The rank map also contains tax id 0 as
/// `unclassified` unless the tree lists it. If a tax id is listed more than
/// once the last entry wins.
///
/// Returns the parent of every node and the rank of every node.
///
/// ## Errors
///
/// Lines with fewer than 5 columns or non-numeric ids fail with
/// [Error::MissingFields] or [Error::InvalidTaxId], and a root with another
/// parent than itself fails with [Error::RootParent].
///
pub fn read_tree<R: BufRead>(
    conn: R,
) -> Result<(ParentMap, RankMap)> {
    let mut nodes: Vec<(TaxId, TaxId, String)> = Vec::new();
    for (idx, line) in conn.lines().enumerate() {
        let line = line?;
        let fields = split_line(&line);
        ensure_fields(&fields, RANK_COL + 1, idx + 1)?;

        let tax_id = parse_tax_id(fields[TAX_ID_COL], idx + 1)?;
        let parent_id = parse_tax_id(fields[PARENT_ID_COL], idx + 1)?;
        nodes.push((tax_id, parent_id, fields[RANK_COL].to_lowercase()));
    }

    let parents: ParentMap = nodes.iter().map(|(tax_id, parent_id, _)| (*tax_id, *parent_id)).collect();

    let mut ranks: RankMap = RankMap::with_capacity(nodes.len() + 1);
    ranks.insert(UNCLASSIFIED, "unclassified".to_string());
    for (tax_id, parent_id, rank) in nodes {
        if tax_id == ROOT {
            check_root(parent_id)?;
            ranks.insert(tax_id, "root".to_string());
        } else {
            ranks.insert(tax_id, rank);
        }
    }

    log::info!("Read {} nodes from the taxonomy tree", parents.len());
    Ok((parents, ranks))
}

/// Parse a taxonomy tree from a plain text or gzip file.
///
/// See [read_tree] for the format.
pub fn read_tree_file<P: AsRef<Path>>(
    path: P,
) -> Result<(ParentMap, RankMap)> {
    log::debug!("Loading taxonomy tree from {}", path.as_ref().display());
    let conn = open_file(path)?;
    read_tree(conn)
}
