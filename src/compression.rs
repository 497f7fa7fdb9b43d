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

//! Detect input compression from the first bytes of a file.
//!
//! Both the tree and the classification report may be plain text or gzip.
//! bzip2 and zip are recognized only so that they can be rejected with a
//! clear message instead of being parsed as garbage text.
//!
//! ## Usage
//!
//! ```rust
//! use taxcheck::compression::{Compression, Unsupported};
//!
//! assert_eq!(Compression::detect(b"1\t|\t1\t|\tno rank"), Compression::Plain);
//! assert_eq!(Compression::detect(&[0x1f, 0x8b, 0x08, 0x00]), Compression::Gzip);
//! assert_eq!(Compression::detect(b"BZh91AY"), Compression::Unsupported(Unsupported::Bzip2));
//! assert_eq!(Compression::detect(b"PK\x03\x04"), Compression::Unsupported(Unsupported::Zip));
//! ```
//!
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use flate2::bufread::MultiGzDecoder;

use crate::error::Error;
use crate::error::Result;

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b, 0x08];
const BZIP2_MAGIC: &[u8] = &[0x42, 0x5a, 0x68];
const ZIP_MAGIC: &[u8] = &[0x50, 0x4b, 0x03, 0x04];

// Longest of the signatures above.
const MAGIC_LEN: u64 = 4;

/// Compression formats that can be recognized from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Anything without a known signature.
    Plain,
    Gzip,
    /// Recognized but rejected.
    Unsupported(Unsupported),
}

/// Recognized compression formats that are not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    Bzip2,
    Zip,
}

impl std::fmt::Display for Unsupported {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Unsupported::Bzip2 => write!(f, "bzip2"),
            Unsupported::Zip => write!(f, "zip"),
        }
    }
}

impl Compression {
    /// Guess the compression from the first bytes of a file.
    ///
    /// Inputs shorter than a signature are treated as plain text.
    pub fn detect(
        bytes: &[u8],
    ) -> Self {
        if bytes.starts_with(GZIP_MAGIC) {
            Compression::Gzip
        } else if bytes.starts_with(BZIP2_MAGIC) {
            Compression::Unsupported(Unsupported::Bzip2)
        } else if bytes.starts_with(ZIP_MAGIC) {
            Compression::Unsupported(Unsupported::Zip)
        } else {
            Compression::Plain
        }
    }
}

/// Read the first bytes of `path` and guess its compression.
///
/// The file is closed again before returning.
pub fn sniff_file<P: AsRef<Path>>(
    path: P,
) -> Result<Compression> {
    let path = path.as_ref();
    let open_err = |source: std::io::Error| Error::Open { path: path.to_path_buf(), source };

    let file = File::open(path).map_err(open_err)?;
    let mut start: Vec<u8> = Vec::with_capacity(MAGIC_LEN as usize);
    file.take(MAGIC_LEN).read_to_end(&mut start).map_err(open_err)?;

    Ok(Compression::detect(&start))
}

/// Wrap `conn` in a line reader that undoes `compression`.
///
/// Gzip streams with several members are read to the end of the last member.
///
/// Returns the offending format if `compression` is not supported.
pub fn decompress<'a, R: Read + 'a>(
    compression: Compression,
    conn: R,
) -> std::result::Result<Box<dyn BufRead + 'a>, Unsupported> {
    match compression {
        Compression::Plain => Ok(Box::new(BufReader::new(conn))),
        Compression::Gzip => Ok(Box::new(BufReader::new(MultiGzDecoder::new(BufReader::new(conn))))),
        Compression::Unsupported(format) => Err(format),
    }
}

/// Open `path` for line-by-line reading, decompressing gzip input.
///
/// ## Errors
///
/// Returns [Error::UnsupportedCompression] for bzip2 and zip files, and
/// [Error::Open] if the file cannot be opened.
pub fn open_file<P: AsRef<Path>>(
    path: P,
) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let compression = sniff_file(path)?;
    log::debug!("{}: detected {:?} input", path.display(), compression);

    if let Compression::Unsupported(format) = compression {
        return Err(Error::UnsupportedCompression { path: path.to_path_buf(), format })
    }

    let file = File::open(path).map_err(|source| Error::Open { path: path.to_path_buf(), source })?;
    decompress(compression, file).map_err(|format| Error::UnsupportedCompression { path: path.to_path_buf(), format })
}

// Tests
#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;
    use std::io::Write;

    use flate2::write::GzEncoder;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn detect_gzip() {
        let got = Compression::detect(&gzip(b"1\tx\t1\tx\troot\n"));
        assert_eq!(got, Compression::Gzip);
    }

    #[test]
    fn detect_bzip2_and_zip() {
        assert_eq!(Compression::detect(b"BZh91AY&SY"), Compression::Unsupported(Unsupported::Bzip2));
        assert_eq!(Compression::detect(b"PK\x03\x04\x14\x00"), Compression::Unsupported(Unsupported::Zip));
    }

    #[test]
    fn detect_short_or_partial_signature_is_plain() {
        assert_eq!(Compression::detect(b""), Compression::Plain);
        assert_eq!(Compression::detect(&[0x1f, 0x8b]), Compression::Plain);
        assert_eq!(Compression::detect(b"PK\x03"), Compression::Plain);
        assert_eq!(Compression::detect(b"readID\tseqID\ttaxID"), Compression::Plain);
    }

    #[test]
    fn decompress_gzip_matches_plain() {
        let data: &[u8] = b"read1\tseqA\t2\nread2\tno rank\t5\n";

        let plain: Vec<String> = decompress(Compression::Plain, Cursor::new(data.to_vec())).unwrap()
            .lines().map(|line| line.unwrap()).collect();
        let gz: Vec<String> = decompress(Compression::Gzip, Cursor::new(gzip(data))).unwrap()
            .lines().map(|line| line.unwrap()).collect();

        assert_eq!(plain, vec!["read1\tseqA\t2".to_string(), "read2\tno rank\t5".to_string()]);
        assert_eq!(gz, plain);
    }

    #[test]
    fn decompress_multi_member_gzip() {
        let mut data = gzip(b"first\n");
        data.append(&mut gzip(b"second\n"));

        let got: Vec<String> = decompress(Compression::Gzip, Cursor::new(data)).unwrap()
            .lines().map(|line| line.unwrap()).collect();

        assert_eq!(got, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn decompress_unsupported() {
        let got = decompress(Compression::Unsupported(Unsupported::Zip), Cursor::new(Vec::<u8>::new()));
        assert!(matches!(got, Err(Unsupported::Zip)));
    }

    #[test]
    fn sniff_file_reads_signature() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"BZh91AY&SY").unwrap();
        file.flush().unwrap();

        assert_eq!(sniff_file(file.path()).unwrap(), Compression::Unsupported(Unsupported::Bzip2));
    }

    #[test]
    fn sniff_empty_file_is_plain() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(sniff_file(file.path()).unwrap(), Compression::Plain);
    }

    #[test]
    fn open_file_rejects_zip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"PK\x03\x04rest of the archive").unwrap();
        file.flush().unwrap();

        let got = open_file(file.path());
        match got {
            Err(Error::UnsupportedCompression { format, .. }) => assert_eq!(format, Unsupported::Zip),
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("zip input was accepted"),
        }
    }

    #[test]
    fn open_file_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let got = open_file(dir.path().join("nodes.dmp"));
        assert!(matches!(got, Err(Error::Open { .. })));
    }

    #[test]
    fn open_file_reads_gzip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&gzip(b"1\tx\t1\tx\troot\n")).unwrap();
        file.flush().unwrap();

        let got: Vec<String> = open_file(file.path()).unwrap().lines().map(|line| line.unwrap()).collect();
        assert_eq!(got, vec!["1\tx\t1\tx\troot".to_string()]);
    }

    #[test]
    fn unsupported_message() {
        let err = Error::UnsupportedCompression { path: "tree.dmp.bz2".into(), format: Unsupported::Bzip2 };
        assert_eq!(err.to_string(), "tree.dmp.bz2: cannot use bzip2 format - use gzip instead");
    }
}
