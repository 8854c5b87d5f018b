use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Witness map toolbox for circuit manifests
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Encode named inputs into an indexed witness map
    Encode {
        /// Circuit manifest JSON path
        #[clap(value_parser)]
        manifest: PathBuf,

        /// Named inputs JSON path
        #[clap(value_parser)]
        inputs: PathBuf,

        /// First witness index to assign
        #[clap(long, default_value = "0")]
        base: usize,

        /// Output file; stdout when absent
        #[clap(long, short)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[clap(long)]
        pretty: bool,
    },

    /// Print the per-parameter witness layout of a manifest
    Layout {
        /// Circuit manifest JSON path
        #[clap(value_parser)]
        manifest: PathBuf,
    },

    /// Read named values back from a solved witness column
    Decode {
        /// Circuit manifest JSON path
        #[clap(value_parser)]
        manifest: PathBuf,

        /// Witness column JSON path, a flat array of hex scalars
        #[clap(value_parser)]
        witness: PathBuf,

        /// Read a single parameter instead of all of them
        #[clap(long)]
        name: Option<String>,

        /// Witness index the first declared parameter starts at
        #[clap(long, default_value = "0")]
        base: usize,
    },
}

impl Args {
    /// Resolve a command, canonicalizing its input paths
    pub fn resolve(self) -> io::Result<ParsedArgs> {
        let Args { command } = self;

        let command = match command {
            Command::Encode {
                manifest,
                inputs,
                base,
                output,
                pretty,
            } => Command::Encode {
                manifest: manifest.canonicalize()?,
                inputs: inputs.canonicalize()?,
                base,
                output,
                pretty,
            },

            Command::Layout { manifest } => Command::Layout {
                manifest: manifest.canonicalize()?,
            },

            Command::Decode {
                manifest,
                witness,
                name,
                base,
            } => Command::Decode {
                manifest: manifest.canonicalize()?,
                witness: witness.canonicalize()?,
                name,
                base,
            },
        };

        Ok(ParsedArgs { command })
    }
}

/// Parsed arguments for the CLI
pub struct ParsedArgs {
    /// Resolved command to execute
    pub command: Command,
}

#[test]
fn parse_subcommands_wont_panic() {
    let args = Args::try_parse_from(["witgen", "layout", "circuit.json"])
        .expect("failed to parse the layout command");

    assert!(matches!(args.command, Command::Layout { .. }));

    let args = Args::try_parse_from([
        "witgen",
        "encode",
        "circuit.json",
        "inputs.json",
        "--base",
        "4",
        "--pretty",
    ])
    .expect("failed to parse the encode command");

    match args.command {
        Command::Encode { base, pretty, .. } => {
            assert_eq!(base, 4);
            assert!(pretty);
        }
        _ => panic!("parsed an unexpected command"),
    }

    Args::try_parse_from(["witgen"])
        .expect_err("a missing subcommand shouldn't parse");
}
