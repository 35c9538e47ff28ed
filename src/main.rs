use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use tag_version::cli::{run_stamp, StampArgs};
use tag_version::config;
use tag_version::git::Git2Repository;
use tag_version::ui;

/// Exit code when the repository, config or output file could not be used.
/// Kept apart from the rule violation codes 1 to 5.
const ENVIRONMENT_FAILURE: u8 = 128;

#[derive(clap::Parser)]
#[command(
    name = "tag-version",
    version,
    about = "Validate version tags on HEAD and write them into a C version header"
)]
struct Args {
    #[arg(help = "Path of the generated header file")]
    output: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 'C',
        long,
        default_value = ".",
        help = "Repository to inspect (searched upwards)"
    )]
    repo: PathBuf,

    #[arg(long, value_name = "N", help = "List the N most recent versions of each kind")]
    history: Option<usize>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::from(ENVIRONMENT_FAILURE)
        }
    }
}

fn run(args: Args) -> Result<u8> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let repo = Git2Repository::open(&args.repo).context("Git repository error")?;

    let stamp_args = StampArgs {
        output: args.output,
        history: args.history,
    };
    let outcome = run_stamp(&repo, &config, &stamp_args)
        .with_context(|| format!("Failed to stamp {}", stamp_args.output.display()))?;

    if let Some(summary) = &outcome.summary {
        ui::display_summary(summary);
    }
    if let Some(history) = &outcome.history {
        ui::display_history(history);
    }
    for warning in &outcome.warnings {
        ui::display_warning(warning);
    }
    if let Some(error) = &outcome.error {
        ui::display_error(&error.to_string());
    }

    Ok(outcome.code())
}
