use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use highlighter::cli::{AnalyzeArgs, Cli, Command, RankArgs};
use highlighter::selection::OverlapPolicy;
use highlighter::transcript::parse_transcript_file;
use highlighter::types::RankedSegment;
use highlighter::{HighlightConfig, Highlighter};

#[derive(Serialize)]
struct RankedTranscript<'a> {
    transcript_id: usize,
    segments: &'a [RankedSegment],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = HighlightConfig::from_path(cli.config.as_deref())
        .context("Failed to load configuration")?;

    match cli.command {
        Command::Analyze(args) => run_analyze(&args, config),
        Command::Rank(args) => run_rank(&args, &config),
    }
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "highlighter=info",
        1 => "highlighter=debug",
        _ => "highlighter=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_analyze(args: &AnalyzeArgs, mut config: HighlightConfig) -> Result<()> {
    args.validate()
        .context("Failed to validate command-line arguments")?;
    if args.merge_overlaps {
        config.overlap_policy = OverlapPolicy::Merge;
    }

    let highlighter = Highlighter::new(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for path in &args.files {
        let reader = open_input(path)?;
        let file_id = highlighter
            .analyze(args.duration, reader)
            .with_context(|| format!("Failed to analyze {:?}", path))?;
        let highlights = highlighter
            .highlights(file_id)
            .with_context(|| format!("Failed to read back results for {:?}", path))?;
        info!(file_id, path = %path.display(), "analysis complete");
        write_json(&mut out, &highlights, args.pretty)?;
    }

    Ok(())
}

fn run_rank(args: &RankArgs, config: &HighlightConfig) -> Result<()> {
    let file = parse_transcript_file(open_input(&args.file)?)
        .with_context(|| format!("Failed to parse {:?}", args.file))?;
    let highlighter = Highlighter::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for transcript in &file.transcripts {
        let mut ranked = highlighter
            .rank(&transcript.text)
            .with_context(|| format!("Failed to rank transcript {}", transcript.public_id()))?;
        if let Some(limit) = args.limit {
            ranked.truncate(limit);
        }
        let row = RankedTranscript {
            transcript_id: transcript.public_id(),
            segments: &ranked,
        };
        write_json(&mut out, &row, false)?;
    }

    Ok(())
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open transcript file {:?}", path))?;
    Ok(BufReader::new(file))
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
