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

//! Resolve nodes to their nearest ancestor with a standard rank.
//!
//! Trees such as NCBI's carry many intermediate ranks (subfamily, tribe,
//! clade, no rank, ...). Summaries usually only care about the standard
//! levels, so a node with a non-standard rank is attributed to the first
//! ancestor that has one.
//!
//! This works on the [ParentMap] and [RankMap] returned by
//! [read_tree](crate::parser::tree::read_tree) and does not change them.
//!
//! ## Usage
//!
//! ```rust
//! use std::io::Cursor;
//! use taxcheck::lineage::{standard_ancestor, standard_rank};
//! use taxcheck::parser::tree::read_tree;
//!
//! let tree = Cursor::new(b"1\tx\t1\tx\tno rank\n\
//!                          543\tx\t1\tx\tfamily\n\
//!                          1903409\tx\t543\tx\tsubfamily\n\
//!                          561\tx\t1903409\tx\tgenus\n".to_vec());
//! let (parents, ranks) = read_tree(tree).unwrap();
//!
//! assert_eq!(standard_ancestor(1903409, &parents, &ranks), Some(543));
//! assert_eq!(standard_rank(1903409, &parents, &ranks), Some("family"));
//! assert_eq!(standard_ancestor(561, &parents, &ranks), Some(561));
//! ```
//!
use std::collections::HashMap;

use crate::ParentMap;
use crate::RankMap;
use crate::TaxId;
use crate::ROOT;
use crate::UNCLASSIFIED;

/// Ranks that a node can be resolved to.
pub const STANDARD_RANKS: [&str; 8] = [
    "superkingdom",
    "domain",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "species",
];

pub fn is_standard_rank(
    rank: &str,
) -> bool {
    STANDARD_RANKS.contains(&rank)
}

/// Nearest node at or above `tax_id` that has a standard rank.
///
/// The root and the unclassified node resolve to themselves.
///
/// Returns None if `tax_id` is not in the tree, if a parent on the way up is
/// missing, or if the parent pointers loop without reaching the root.
pub fn standard_ancestor(
    tax_id: TaxId,
    parents: &ParentMap,
    ranks: &RankMap,
) -> Option<TaxId> {
    let mut current = tax_id;
    // A path longer than the number of nodes must contain a loop.
    for _ in 0..=parents.len() {
        let rank = ranks.get(&current)?;
        if current == ROOT || current == UNCLASSIFIED || is_standard_rank(rank) {
            return Some(current)
        }
        let parent = *parents.get(&current)?;
        if parent == current {
            return None
        }
        current = parent;
    }
    None
}

/// Rank of the [standard_ancestor] of `tax_id`.
pub fn standard_rank<'a>(
    tax_id: TaxId,
    parents: &ParentMap,
    ranks: &'a RankMap,
) -> Option<&'a str> {
    standard_ancestor(tax_id, parents, ranks)
        .and_then(|ancestor| ranks.get(&ancestor))
        .map(|rank| rank.as_str())
}

/// [standard_ancestor] for every node in the tree that resolves.
pub fn standard_ancestors(
    parents: &ParentMap,
    ranks: &RankMap,
) -> HashMap<TaxId, TaxId> {
    parents.keys().filter_map(|tax_id| {
        standard_ancestor(*tax_id, parents, ranks).map(|ancestor| (*tax_id, ancestor))
    }).collect()
}
