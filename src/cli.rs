use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::{ArgAction, Args, Parser, Subcommand};

/// Highlighter - podcast highlight reel generator
///
/// Ranks transcript sentences by key-phrase centrality and maps the best
/// ones back onto word timings until the requested duration is filled.
#[derive(Parser, Debug)]
#[command(name = "highlighter", version, about = "Podcast highlight reel generator")]
pub struct Cli {
    /// Optional JSON configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze transcript files and print their highlight reels as JSON.
    Analyze(AnalyzeArgs),
    /// Print every transcript's sentences, most central first.
    Rank(RankArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Target reel duration in seconds
    #[arg(short, long, value_name = "SECONDS")]
    pub duration: u32,

    /// Transcription JSON files
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Merge clips that overlap (overrides the config file)
    #[arg(long)]
    pub merge_overlaps: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl AnalyzeArgs {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.duration > 0,
            "Target duration must be positive, got: {}",
            self.duration
        );
        for file in &self.files {
            ensure!(file.is_file(), "Input file does not exist: {:?}", file);
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct RankArgs {
    /// Transcription JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only print the top N sentences per transcript
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_analyze_with_global_flags() {
        let cli = Cli::try_parse_from([
            "highlighter",
            "-vv",
            "--config",
            "settings.json",
            "analyze",
            "--duration",
            "60",
            "a.json",
            "b.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.config.is_some());
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.duration, 60);
        assert_eq!(args.files.len(), 2);
        assert!(!args.merge_overlaps);
    }

    #[test]
    fn analyze_requires_a_file() {
        assert!(Cli::try_parse_from(["highlighter", "analyze", "-d", "30"]).is_err());
    }

    #[test]
    fn zero_duration_fails_validation() {
        let cli = Cli::try_parse_from(["highlighter", "analyze", "-d", "0", "Cargo.toml"]).unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn parses_rank_limit() {
        let cli =
            Cli::try_parse_from(["highlighter", "rank", "episode.json", "--limit", "3"]).unwrap();
        let Command::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(args.limit, Some(3));
    }
}
