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
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version)]
#[command(about = "List tax ids in a Centrifuge report that are missing from a taxonomy tree")]
pub struct Cli {
    // Centrifuge per-read classification report
    #[arg(long = "centrifuge", required = true, help = "a Centrifuge output file (can be gzipped)")]
    pub centrifuge: PathBuf,

    // Taxonomy tree with tax id, parent, and rank in columns 1, 3, and 5
    #[arg(long = "tree", required = true, help = "a taxonomy tree file (can be gzipped)")]
    pub tree: PathBuf,

    // Verbosity, stderr only
    #[arg(long = "verbose", default_value_t = false, hide = true)]
    pub verbose: bool,
}

// Tests
#[cfg(test)]
mod tests {
    use super::Cli;

    use clap::CommandFactory;
    use clap::Parser;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_requires_both_inputs() {
        assert!(Cli::try_parse_from(["taxcheck", "--tree", "nodes.dmp"]).is_err());
        assert!(Cli::try_parse_from(["taxcheck", "--centrifuge", "reads.tsv"]).is_err());
    }

    #[test]
    fn cli_help_lists_only_inputs() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("--centrifuge"));
        assert!(help.contains("--tree"));
        assert!(!help.contains("--verbose"));
    }

    #[test]
    fn cli_parses_inputs() {
        let cli = Cli::try_parse_from(["taxcheck", "--centrifuge", "reads.tsv.gz", "--tree", "nodes.dmp"]).unwrap();
        assert_eq!(cli.centrifuge, std::path::PathBuf::from("reads.tsv.gz"));
        assert_eq!(cli.tree, std::path::PathBuf::from("nodes.dmp"));
        assert!(!cli.verbose);
    }
}
