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
use roaring::RoaringBitmap;

use crate::RankMap;
use crate::ReadClassification;

/// Tax ids assigned to any read that have no rank in the tree.
///
/// An id that was never a real taxon and one that was pruned from this tree
/// snapshot are reported alike.
///
/// Iterating the returned bitmap yields the ids in ascending order.
pub fn missing_tax_ids(
    reads: &ReadClassification,
    ranks: &RankMap,
) -> RoaringBitmap {
    let mut assigned = RoaringBitmap::new();
    reads.values().for_each(|tax_ids| assigned |= tax_ids);

    assigned.iter().filter(|tax_id| !ranks.contains_key(tax_id)).collect()
}
