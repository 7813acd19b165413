use std::{path::PathBuf, sync::OnceLock};

use clap::{Parser, Subcommand};

/// Banner for `--version`: name, version and the platform it was built for.
fn long_version() -> &'static str {
    static LONG_VERSION: OnceLock<String> = OnceLock::new();
    LONG_VERSION.get_or_init(|| {
        format!(
            "{}\nplatform: {}/{}",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    })
}

/// oatrs - inspect and patch Android dex, odex and vdex files
#[derive(Debug, Parser)]
#[command(
    name = "oatrs",
    version,
    long_version = long_version(),
    about,
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Detect the format of a file and dump its headers and dex file table.
    Info {
        /// Path to a dex, odex or vdex file.
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Rewrite the dex checksums stored in an odex/vdex pair.
    Patch(PatchArgs),
}

#[derive(Debug, clap::Args)]
pub struct PatchArgs {
    /// The odex file to patch.
    #[arg(long, value_name = "FILE", default_value = "base.odex")]
    pub odex: PathBuf,

    /// The vdex file to patch.
    #[arg(long, value_name = "FILE", default_value = "base.vdex")]
    pub vdex: PathBuf,

    /// Text file with one hexadecimal checksum per line.
    #[arg(
        long,
        value_name = "FILE",
        conflicts_with = "dex",
        required_unless_present = "dex"
    )]
    pub crc32: Option<PathBuf>,

    /// Take the checksums from the headers of these dex files, in order.
    #[arg(long, value_name = "FILE")]
    pub dex: Vec<PathBuf>,

    /// Output directory, the patched files keep their file names.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out: PathBuf,
}
