//! Provider shim generator CLI entrypoint.
//!
//! Resolves the requested provider release, then generates and persists
//! a self-verifying bootstrap shim per platform. All progress and error
//! output goes to stderr; the process exits non-zero on any failure.

use clap::Parser;
use provider_shim_gen::cli::Cli;
use provider_shim_gen::constraint::VersionConstraint;
use provider_shim_gen::digest::HttpArchiveDigester;
use provider_shim_gen::error::Result;
use provider_shim_gen::output::{success_message, write_stderr_line};
use provider_shim_gen::pipeline::{PipelineConfig, generate_shims};
use provider_shim_gen::release::listing::GitHubReleaseLister;
use provider_shim_gen::release::resolver::find_latest;
use provider_shim_gen::repo::ProviderRepo;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let repo = ProviderRepo::try_from(cli.repository.as_str())?;
    let constraint = VersionConstraint::parse(&cli.constraint)?;

    if !cli.quiet {
        write_stderr_line(
            stderr,
            format!("Resolving the latest release of {repo} matching {constraint}..."),
        );
    }

    let release = find_latest(&GitHubReleaseLister, &repo, &constraint)?;

    if !cli.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Selected v{} with {} platform archive(s)",
                release.version(),
                release.platforms().len()
            ),
        );
    }

    let config = PipelineConfig {
        repo: &repo,
        base_dir: &cli.base_dir,
        quiet: cli.quiet,
    };
    generate_shims(&config, &release, &HttpArchiveDigester, stderr)?;

    if !cli.quiet {
        write_stderr_line(
            stderr,
            success_message(release.platforms().len(), &cli.base_dir),
        );
    }

    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
