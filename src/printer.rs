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
use std::io::Write;

use roaring::RoaringBitmap;

/// Write missing tax ids to `conn`, one per line in ascending order.
///
/// No header or other decoration is written.
pub fn write_missing<W: Write>(
    missing: &RoaringBitmap,
    conn: &mut W,
) -> std::io::Result<()> {
    for tax_id in missing {
        writeln!(conn, "{}", tax_id)?;
    }
    Ok(())
}
