use anyhow::Result;
use clap::Parser;

use ci_version::config::{self, RefInput};
use ci_version::git::GitCli;
use ci_version::output::{GithubActionsSink, OutputSink};
use ci_version::{resolver, ui};

#[derive(clap::Parser)]
#[command(
    name = "ci-version",
    about = "Derive semantic version outputs from git metadata for CI"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Git ref to classify (defaults to GITHUB_REF)")]
    git_ref: Option<String>,

    #[arg(long, help = "Commit SHA to publish (defaults to GITHUB_SHA)")]
    commit_sha: Option<String>,

    #[arg(long, help = "Skip the unshallow fetch before describing")]
    no_fetch: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("ci-version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(err) = run(args) {
        // Surface the failure on both channels: the workflow directive for
        // the CI consumer and a plain line for a human reading the job.
        let mut sink = GithubActionsSink::new();
        sink.error(&format!("{:#}", err));
        ui::display_error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let input = RefInput::resolve(args.commit_sha, args.git_ref)?;

    let mut behavior = config.behavior;
    if args.no_fetch {
        behavior.fetch_unshallow = false;
    }

    let git = GitCli::new(&behavior);
    let mut sink = GithubActionsSink::from_env()?;

    resolver::resolve(&input, &git, &mut sink)?;
    Ok(())
}
