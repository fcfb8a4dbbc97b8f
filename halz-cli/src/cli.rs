use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface for the halz codec
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to be executed
    #[clap(subcommand)]
    pub command: Commands,

    /// Control verbose output (e.g. -vv [Info])
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

/// Commands to be executed by the CLI
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decompress data from a ROM file
    Exhal {
        /// ROM (or other binary) file to read compressed data from
        #[clap(value_parser)]
        romfile: PathBuf,

        /// Byte offset into romfile, decimal or 0x-prefixed hex
        #[clap(value_parser)]
        offset: String,

        /// File to write the decompressed data to
        #[clap(value_parser)]
        outfile: PathBuf,
    },
    /// Compress a file, either inserting it into a ROM or writing it fresh
    Inhal {
        /// File to compress
        #[clap(value_parser)]
        infile: PathBuf,

        /// ROM file to insert the compressed data into (requires `offset`)
        #[clap(value_parser, requires = "offset", conflicts_with = "new")]
        romfile: Option<PathBuf>,

        /// Byte offset into romfile, decimal or 0x-prefixed hex
        #[clap(value_parser, requires = "romfile")]
        offset: Option<String>,

        /// Write compressed data to a new file instead of inserting into a ROM
        #[clap(short = 'n', long = "new", value_name = "OUTFILE")]
        new: Option<PathBuf>,

        /// Trade compression ratio for speed
        #[clap(long)]
        fast: bool,

        /// Search for a globally shortest-path encoding instead of packing greedily
        #[clap(long)]
        optimal: bool,
    },
    /// Scan every byte offset of a file for a decodable compressed stream
    Sniff {
        /// ROM (or other binary) file to scan
        #[clap(value_parser)]
        romfile: PathBuf,
    },
}
