//! no-comments — remove comments from Ruby files, or list them.
//!
//! - **clean mode** (default): `no-comments -p lib/` rewrites every `.rb`
//!   file in place
//! - **audit mode**: `no-comments -p lib/ --audit` prints the comments that
//!   would be removed and leaves files untouched

use anyhow::{Context, Result};
use clap::Parser;
use no_comments::process::ProcessOptions;
use no_comments::report;
use no_comments::run::{self, Mode, RunConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "no-comments",
    about = "Remove comments from Ruby source files, or audit them"
)]
struct Cli {
    /// Ruby file or directory to process
    #[arg(short = 'p', long)]
    path: PathBuf,

    /// Print comments instead of removing them
    #[arg(short = 'a', long)]
    audit: bool,

    /// Keep documentation comments (@tags, :nodoc:, class/module docs)
    #[arg(long)]
    keep_doc_comments: bool,

    /// Audit report format: text (default) or json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Worker threads for directory mode (default: one per CPU)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            mode: if self.audit { Mode::Audit } else { Mode::Clean },
            options: ProcessOptions {
                keep_doc_comments: self.keep_doc_comments,
            },
            jobs: self.jobs,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.run_config();

    // Resolve the reporter up front so a bad --format fails before any write
    let reporter = report::create_reporter(&cli.format)?;

    let outcomes = run::run(&cli.path, &config)
        .with_context(|| format!("Failed to process {}", cli.path.display()))?;

    match config.mode {
        Mode::Audit => {
            print!("{}", reporter.render(&outcomes)?);
            if reporter.allows_trailer() {
                println!("Audit completed successfully.");
            }
        }
        Mode::Clean => println!("Cleaning completed successfully."),
    }

    Ok(())
}
