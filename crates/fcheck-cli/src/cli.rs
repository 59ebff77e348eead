//! CLI argument parsing using clap derive

use std::path::{Path, PathBuf};

use clap::Parser;
use fcheck_core::options::{CheckOptions, GenerateOptions, Mode, PackOptions, RunOptions};

/// fcheck - Audit a directory against a snapshot of its files
#[derive(Parser, Debug)]
#[command(name = "fcheck")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
Usage(check):    fcheck [-d DIR] [-o output.json] [-i] input.json
Usage(generate): fcheck -g [-d DIR] [-o] output.json
Usage(pack):     fcheck -p [-d DIR] [-o outputDir] [-i] diff.json")]
pub struct Cli {
    /// Generate a file list json
    #[arg(short, long, conflicts_with = "pack")]
    pub generate: bool,

    /// Pack files from a file diff json
    #[arg(short, long)]
    pub pack: bool,

    /// Directory to audit (defaults to the current directory)
    #[arg(short = 'd', long = "dir", env = "FCHECK_DIR", value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Output path
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Input json file path
    #[arg(short, long, value_name = "FILE", conflicts_with = "generate")]
    pub input: Option<PathBuf>,

    /// Confirm overwriting
    #[arg(short = 'y', long = "yes")]
    pub overwrite: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Input file, or the output file with -g
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.generate {
            Mode::Generate
        } else if self.pack {
            Mode::Pack
        } else {
            Mode::Check
        }
    }

    /// Resolve flags, positional argument and defaults into run options.
    ///
    /// An explicit flag wins over the positional argument, which wins over
    /// the mode default.
    pub fn into_options(self, cwd: &Path) -> RunOptions {
        let mode = self.mode();
        let work_dir = self.work_dir.unwrap_or_else(|| cwd.to_path_buf());
        let overwrite = self.overwrite;
        let default_path = |name: &str| PathBuf::from(name);

        match mode {
            Mode::Generate => RunOptions::Generate(GenerateOptions {
                work_dir,
                output: self
                    .output
                    .or(self.path)
                    .unwrap_or_else(|| default_path(mode.default_output())),
                overwrite,
            }),
            Mode::Check => RunOptions::Check(CheckOptions {
                work_dir,
                manifest: self
                    .input
                    .or(self.path)
                    .unwrap_or_else(|| default_path(mode.default_artifact())),
                output: self
                    .output
                    .unwrap_or_else(|| default_path(mode.default_output())),
                overwrite,
            }),
            Mode::Pack => RunOptions::Pack(PackOptions {
                work_dir,
                diff: self
                    .input
                    .or(self.path)
                    .unwrap_or_else(|| default_path(mode.default_artifact())),
                output_dir: self
                    .output
                    .unwrap_or_else(|| default_path(mode.default_output())),
                overwrite,
            }),
        }
    }
}
