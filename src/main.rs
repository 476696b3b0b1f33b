use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tracing::{info, warn, Level};

use essay_seams::discovery::{expand_inputs, DiscoveryConfig};
use essay_seams::parallel_processing::{render, write_run_stats, FileOutcome, FileStats};
use essay_seams::{process_files_parallel, BatchOptions, OutputFormat, RunStats, SegmenterConfig, Segmenter};

#[derive(Parser, Debug)]
#[command(name = "essay-seams")]
#[command(about = "Segments freeform essays into five labelled paragraphs of three to five sentences")]
#[command(version)]
struct Args {
    /// Essay files or directories to scan for *.txt (reads stdin when omitted)
    inputs: Vec<PathBuf>,

    /// TOML file overriding segmentation thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Write <stem>_segmented.json next to each essay instead of printing
    #[arg(long)]
    write_aux: bool,

    /// Re-segment essays whose aux file already exists
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Write per-file statistics as JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // WHY: stdout carries segmentation output, so structured logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .json()
        .init();

    info!("Starting essay-seams");
    info!(?args, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => SegmenterConfig::from_toml_file(path)?,
        None => SegmenterConfig::default(),
    };
    let segmenter = Arc::new(Segmenter::new(&config)?);

    let run_start = SystemTime::now();
    let started = Instant::now();

    let outcomes = if args.inputs.is_empty() {
        vec![segment_stdin(&segmenter, &args).await?]
    } else {
        segment_files(Arc::clone(&segmenter), &args).await?
    };

    let elapsed_ms = started.elapsed().as_millis() as u64;
    let stats = RunStats::from_outcomes(run_start, elapsed_ms, &outcomes);
    info!(
        processed = stats.files_processed,
        skipped = stats.files_skipped,
        failed = stats.files_failed,
        sentences = stats.total_sentences_detected,
        "Run complete in {}ms",
        elapsed_ms
    );

    if let Some(stats_path) = &args.stats_out {
        write_run_stats(stats_path, &stats).await?;
    }

    Ok(())
}

async fn segment_stdin(segmenter: &Segmenter, args: &Args) -> Result<FileOutcome> {
    if args.write_aux {
        warn!("--write-aux has no effect when reading stdin");
    }

    let mut raw = String::new();
    tokio::io::stdin().read_to_string(&mut raw).await?;
    info!("Read {} bytes from stdin", raw.len());

    let started = Instant::now();
    let result = segmenter.segment(&raw);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(render(None, &result, args.format, args.pretty)?.as_bytes())
        .await?;
    stdout.flush().await?;

    let path = PathBuf::from("<stdin>");
    let chars = raw.chars().count() as u64;
    let stats = FileStats::success(&path, chars, &result, elapsed_ms, elapsed_ms);
    Ok(FileOutcome {
        path,
        result: Some(result),
        stats,
    })
}

async fn segment_files(segmenter: Arc<Segmenter>, args: &Args) -> Result<Vec<FileOutcome>> {
    let discovered = expand_inputs(&args.inputs, DiscoveryConfig { fail_fast: args.fail_fast }).await?;

    let mut outcomes = Vec::new();
    let mut valid_paths = Vec::new();
    for file in discovered {
        match file.error {
            Some(error) => outcomes.push(FileOutcome {
                stats: FileStats::failed(&file.path, error),
                path: file.path,
                result: None,
            }),
            None => valid_paths.push(file.path),
        }
    }
    info!("Segmenting {} essays", valid_paths.len());

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(valid_paths.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} essays {msg}")?
                .progress_chars("##-"),
        );
        bar
    };

    let options = BatchOptions {
        fail_fast: args.fail_fast,
        write_aux: args.write_aux,
        overwrite_all: args.overwrite_all,
        ..Default::default()
    };
    let processed = process_files_parallel(valid_paths, segmenter, &options, |stats| {
        progress.set_message(stats.path.clone());
        progress.inc(1);
    })
    .await?;
    progress.finish_with_message("Complete");

    if !args.write_aux {
        let mut stdout = BufWriter::new(tokio::io::stdout());
        for outcome in &processed {
            if let Some(result) = &outcome.result {
                let path = outcome.path.display().to_string();
                stdout
                    .write_all(render(Some(&path), result, args.format, args.pretty)?.as_bytes())
                    .await?;
            }
        }
        stdout.flush().await?;
    }

    outcomes.extend(processed);
    outcomes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(outcomes)
}
