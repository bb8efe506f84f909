//! postedit - post-edit verification hook
//!
//! Reads one edit notification (JSON) on stdin, then formats, lints and
//! tests the project the edited file belongs to.
//!
//! ## Exit status
//!
//! - `0`: nothing to report, including every skip and any internal error
//! - `2`: actionable failure; the report is written to stderr

use anyhow::{Context, Result};
use clap::Parser;
use postedit_ci::{signal, PostEditPipeline, EXIT_CLEAN};
use postedit_core::{AmbiguousPolicy, EditEvent, OsFs, Settings};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "postedit")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Format, lint and test the project of a freshly edited file", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, env = "POSTEDIT_VERBOSE")]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, env = "POSTEDIT_LOG_JSON")]
    json: bool,

    /// Python environment directory names, checked in order at the project root
    #[arg(
        long = "env-dir",
        env = "POSTEDIT_ENV_DIRS",
        value_delimiter = ',',
        default_value = ".venv"
    )]
    env_dirs: Vec<String>,

    /// Extra path substrings to exclude, on top of the built-in list
    #[arg(long = "exclude", env = "POSTEDIT_EXCLUDE", value_delimiter = ',')]
    excludes: Vec<String>,

    /// Language used when a root has both Python and JavaScript descriptors
    /// and the file's extension belongs to neither
    #[arg(long, env = "POSTEDIT_AMBIGUOUS", default_value_t = AmbiguousPolicy::Javascript)]
    ambiguous: AmbiguousPolicy,

    /// Per-stage timeout in seconds (0 = wait indefinitely)
    #[arg(long, env = "POSTEDIT_TIMEOUT_SECS", default_value_t = 0)]
    timeout_secs: u64,

    /// Skip the test stage
    #[arg(long, env = "POSTEDIT_NO_TESTS")]
    no_tests: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            env_dirs: self.env_dirs.clone(),
            extra_excludes: self.excludes.clone(),
            ambiguous_policy: self.ambiguous,
            timeout_secs: self.timeout_secs,
            run_tests: !self.no_tests,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Bad flags must not block the caller either.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_CLEAN);
        }
    };

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    postedit_core::init_tracing(cli.json, level);

    match cmd_verify(&cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            debug!(error = %format!("{e:#}"), "postedit could not proceed");
            ExitCode::from(EXIT_CLEAN)
        }
    }
}

/// Verify the file named by the notification on stdin.
async fn cmd_verify(cli: &Cli) -> Result<u8> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;

    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .context("Failed to read edit notification from stdin")?;

    let event = EditEvent::decode(&raw, &cwd);
    debug!(
        tool = event.tool_name.as_deref().unwrap_or("unknown"),
        file = %event.file_path,
        "Received edit notification"
    );

    let settings = cli.settings();
    let outcome = PostEditPipeline::run(&event, &settings, &OsFs::new()).await;

    Ok(signal(&outcome, &mut std::io::stderr().lock()))
}
