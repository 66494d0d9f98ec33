use crate::bumper::DEFAULT_VERSION_FILE;
use crate::server::DEFAULT_PORT;
use clap::{Parser, ValueEnum};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Default)]
pub enum VcsBackend {
    /// The system `git` binary
    #[default]
    Cli,
    /// In-process libgit2
    Libgit2,
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Commits and tags the current libkullo version, then moves on to the next dev version",
    bin_name = "bump-version"
)]
pub struct BumpArguments {
    /// Source file holding the LIBKULLO_VERSION declaration
    #[arg(long, short, default_value = DEFAULT_VERSION_FILE)]
    pub file: String,
    #[arg(long = "vcs", short = 'g', value_enum, ignore_case = true, default_value_t = VcsBackend::Cli)]
    pub vcs: VcsBackend,
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
#[command(about = "Dummy HTTP server that returns the same HTTP status code for every request")]
pub struct ServerArguments {
    /// The port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl ServerArguments {
    /// Parses the process arguments, ignoring anything unrecognised.
    pub fn parse_known() -> Self {
        Self::parse_from(known_server_args(std::env::args()))
    }
}

/// Keeps the binary name, `--port` with its value and `--help`; drops the rest.
pub fn known_server_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<String> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        if arg == "--port" {
            kept.push(arg);
            kept.extend(args.next());
        } else if arg.starts_with("--port=") || arg == "--help" || arg == "-h" {
            kept.push(arg);
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_default_values() {
        let args = BumpArguments::parse_from(["bump-version"]);
        assert_eq!(args.file, "kulloclient/util/version.cpp");
        assert_eq!(args.vcs, VcsBackend::Cli);
        assert!(!args.verbose);
    }

    #[test]
    fn test_bump_parse_file() {
        let args = BumpArguments::parse_from(["bump-version", "-f", "../kulloclient/util/version.cpp"]);
        assert_eq!(args.file, "../kulloclient/util/version.cpp");
    }

    #[test]
    fn test_bump_parse_vcs_case_insensitive() {
        let args = BumpArguments::parse_from(["bump-version", "--vcs", "LIBGIT2"]);
        assert_eq!(args.vcs, VcsBackend::Libgit2);

        let args = BumpArguments::parse_from(["bump-version", "-g", "cli"]);
        assert_eq!(args.vcs, VcsBackend::Cli);
    }

    #[test]
    fn test_bump_parse_long_flags() {
        let args = BumpArguments::parse_from([
            "bump-version",
            "--file",
            "/test/version.cpp",
            "--vcs",
            "libgit2",
            "--verbose",
        ]);
        assert_eq!(args.file, "/test/version.cpp");
        assert_eq!(args.vcs, VcsBackend::Libgit2);
        assert!(args.verbose);
    }

    #[test]
    fn test_bump_rejects_unknown_backend() {
        assert!(BumpArguments::try_parse_from(["bump-version", "--vcs", "hg"]).is_err());
    }

    #[test]
    fn test_server_default_port() {
        let args = ServerArguments::parse_from(["debugserver"]);
        assert_eq!(args.port, 8000);
    }

    #[test]
    fn test_server_parse_port() {
        let args = ServerArguments::parse_from(["debugserver", "--port", "8080"]);
        assert_eq!(args.port, 8080);

        let args = ServerArguments::parse_from(["debugserver", "--port=9000"]);
        assert_eq!(args.port, 9000);
    }

    #[test]
    fn test_known_server_args_drops_unknown() {
        let kept = known_server_args([
            "debugserver",
            "--verbose",
            "--port",
            "8081",
            "stray",
            "--bind=127.0.0.1",
            "-x",
        ]);
        assert_eq!(kept, ["debugserver", "--port", "8081"]);
    }

    #[test]
    fn test_known_server_args_then_parse() {
        let args =
            ServerArguments::parse_from(known_server_args(["server500", "--foo", "--port=1234", "bar"]));
        assert_eq!(args.port, 1234);

        let args = ServerArguments::parse_from(known_server_args(["server500", "--foo"]));
        assert_eq!(args.port, 8000);
    }

    #[test]
    fn test_known_server_args_keeps_help() {
        assert_eq!(known_server_args(["debugserver", "-h"]), ["debugserver", "-h"]);
    }
}
