use anyhow::{Context, Result};
use clap::Parser;
use kullo_tools::{
    arguments::{BumpArguments, VcsBackend},
    bumper::{BumpOutcome, VersionBumper},
    git::{GitCli, GitTracker},
    logging::init_logger,
};
use log::{debug, info};
use pretty_env_logger::env_logger::Target;
use std::path::Path;

fn main() -> Result<()> {
    let args = BumpArguments::parse();
    init_logger(args.verbose, Target::Stderr);

    let path = Path::new(&args.file);
    let outcome = match args.vcs {
        VcsBackend::Cli => VersionBumper::new(path, GitCli::default()).run()?,
        VcsBackend::Libgit2 => {
            let repo_dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let git = GitTracker::open(repo_dir)
                .with_context(|| format!("Failed to find git repository at {:?}", repo_dir))?;
            let bumper = VersionBumper::new(path, git);
            let outcome = bumper.run()?;
            debug!("HEAD: {}", bumper.vcs().head_commit_message()?);
            outcome
        }
    };

    report(&outcome);
    Ok(())
}

fn report(outcome: &BumpOutcome) {
    info!(
        "Released {} (was {}), now at {}",
        outcome.released, outcome.previous, outcome.next_dev
    );
}
