// WHY: Batch segmentation of many essays for the CLI
// Files are read with async I/O and segmented on blocking workers, bounded by CPU count

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};

use crate::incremental::{should_process_file, write_aux_file};
use crate::reader::{AsyncFileReader, ReaderConfig};
use crate::segmentation::{SegmentationResult, Segmenter};

/// Rendering of segmentation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Tsv,
}

/// Runtime options for a batch run
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub fail_fast: bool,
    /// Write `<stem>_segmented.json` next to each essay
    pub write_aux: bool,
    /// Re-segment essays whose aux file already exists
    pub overwrite_all: bool,
    /// Maximum essays in flight
    pub concurrency: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            fail_fast: false,
            write_aux: false,
            overwrite_all: false,
            concurrency: num_cpus::get(),
        }
    }
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileStats {
    pub path: String,
    pub chars_processed: u64,
    pub sentences_detected: u64,
    pub warnings: u64,
    pub processing_time_ms: u64,
    /// Time spent inside `Segmenter::segment` (subset of processing_time_ms)
    pub segmentation_time_ms: u64,
    pub chars_per_sec: f64,
    /// success, skipped or failed
    pub status: String,
    pub error: Option<String>,
}

impl FileStats {
    pub fn success(
        path: &Path,
        chars: u64,
        result: &SegmentationResult,
        processing_time_ms: u64,
        segmentation_time_ms: u64,
    ) -> Self {
        Self {
            path: path.display().to_string(),
            chars_processed: chars,
            sentences_detected: result.sentence_count() as u64,
            warnings: result.warnings.len() as u64,
            processing_time_ms,
            segmentation_time_ms,
            chars_per_sec: chars_per_sec(chars, processing_time_ms),
            status: "success".to_string(),
            error: None,
        }
    }

    pub fn skipped(path: &Path) -> Self {
        Self::empty(path, "skipped", None)
    }

    pub fn failed(path: &Path, error: String) -> Self {
        Self::empty(path, "failed", Some(error))
    }

    fn empty(path: &Path, status: &str, error: Option<String>) -> Self {
        Self {
            path: path.display().to_string(),
            chars_processed: 0,
            sentences_detected: 0,
            warnings: 0,
            processing_time_ms: 0,
            segmentation_time_ms: 0,
            chars_per_sec: 0.0,
            status: status.to_string(),
            error,
        }
    }
}

/// Outcome for one essay; `result` is present only on success
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Option<SegmentationResult>,
    pub stats: FileStats,
}

/// Aggregate statistics written by `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    /// Seconds since the Unix epoch
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub total_chars_processed: u64,
    pub total_sentences_detected: u64,
    pub overall_chars_per_sec: f64,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub file_stats: Vec<FileStats>,
}

impl RunStats {
    pub fn from_outcomes(run_start: SystemTime, elapsed_ms: u64, outcomes: &[FileOutcome]) -> Self {
        let file_stats: Vec<FileStats> = outcomes.iter().map(|outcome| outcome.stats.clone()).collect();
        let count_status = |status: &str| file_stats.iter().filter(|s| s.status == status).count() as u64;
        let total_chars_processed = file_stats.iter().map(|s| s.chars_processed).sum();

        Self {
            run_start: run_start.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs()),
            total_processing_time_ms: elapsed_ms,
            total_chars_processed,
            total_sentences_detected: file_stats.iter().map(|s| s.sentences_detected).sum(),
            overall_chars_per_sec: chars_per_sec(total_chars_processed, elapsed_ms),
            files_processed: count_status("success"),
            files_skipped: count_status("skipped"),
            files_failed: count_status("failed"),
            file_stats,
        }
    }
}

fn chars_per_sec(chars: u64, elapsed_ms: u64) -> f64 {
    // Sub-millisecond runs still report a throughput
    chars as f64 / (elapsed_ms.max(1) as f64 / 1000.0)
}

/// Segment many essays concurrently.
///
/// Outcomes come back sorted by path. Without `fail_fast`, per-file failures
/// are recorded in `FileStats::error` and the batch continues.
pub async fn process_files_parallel<F>(
    files: Vec<PathBuf>,
    segmenter: Arc<Segmenter>,
    options: &BatchOptions,
    on_complete: F,
) -> Result<Vec<FileOutcome>>
where
    F: Fn(&FileStats),
{
    info!("Processing {} essays with concurrency {}", files.len(), options.concurrency);

    let mut pending = stream::iter(files)
        .map(|path| process_file(path, Arc::clone(&segmenter), options))
        .buffer_unordered(options.concurrency.max(1));

    let mut outcomes = Vec::new();
    while let Some(outcome) = pending.next().await {
        let outcome = outcome?;
        on_complete(&outcome.stats);
        outcomes.push(outcome);
    }

    outcomes.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(outcomes)
}

async fn process_file(path: PathBuf, segmenter: Arc<Segmenter>, options: &BatchOptions) -> Result<FileOutcome> {
    let started = Instant::now();

    if options.write_aux && !should_process_file(&path, options.overwrite_all) {
        debug!("Skipping already segmented essay: {}", path.display());
        let stats = FileStats::skipped(&path);
        return Ok(FileOutcome { path, result: None, stats });
    }

    let reader = AsyncFileReader::new(ReaderConfig {
        fail_fast: options.fail_fast,
        ..Default::default()
    });
    let (content, read_stats) = reader.read_essay(&path).await?;
    if let Some(error) = read_stats.read_error {
        let stats = FileStats::failed(&path, error);
        return Ok(FileOutcome { path, result: None, stats });
    }

    let chars = content.chars().count() as u64;
    let segment_started = Instant::now();
    let result = tokio::task::spawn_blocking(move || segmenter.segment(&content))
        .await
        .context("Segmentation worker panicked")?;
    let segmentation_time_ms = segment_started.elapsed().as_millis() as u64;

    if options.write_aux {
        if let Err(e) = write_aux_file(&path, &result).await {
            if options.fail_fast {
                return Err(e);
            }
            warn!("{:#}", e);
            let stats = FileStats::failed(&path, format!("{e:#}"));
            return Ok(FileOutcome { path, result: None, stats });
        }
    }

    let processing_time_ms = started.elapsed().as_millis() as u64;
    let stats = FileStats::success(&path, chars, &result, processing_time_ms, segmentation_time_ms);
    debug!(
        path = %stats.path,
        sentences = stats.sentences_detected,
        warnings = stats.warnings,
        "essay processed"
    );
    Ok(FileOutcome {
        path,
        result: Some(result),
        stats,
    })
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(flatten)]
    result: &'a SegmentationResult,
}

/// One JSON document; `path` is included when the essay came from a file
pub fn render_json(path: Option<&str>, result: &SegmentationResult, pretty: bool) -> Result<String> {
    let report = JsonReport { path, result };
    let rendered = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(rendered)
}

/// `paragraph\tsentence\tslot\ttag\ttext` lines, one per sentence
pub fn render_tsv(result: &SegmentationResult) -> String {
    let mut out = String::new();
    for paragraph in &result.paragraphs {
        for sentence in &paragraph.sentences {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                paragraph.ordinal,
                sentence.ordinal(),
                paragraph.slot,
                sentence.function_tag(),
                sentence.text().replace('\t', " ")
            ));
        }
    }
    out
}

/// Render one essay in the requested format, newline-terminated
pub fn render(path: Option<&str>, result: &SegmentationResult, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", render_json(path, result, pretty)?)),
        OutputFormat::Tsv => {
            let header = path.map(|p| format!("# {p}\n")).unwrap_or_default();
            Ok(format!("{header}{}", render_tsv(result)))
        }
    }
}

/// Write run statistics as pretty JSON
pub async fn write_run_stats(stats_path: &Path, stats: &RunStats) -> Result<()> {
    let file = tokio::fs::File::create(stats_path)
        .await
        .with_context(|| format!("Failed to create stats file {}", stats_path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(serde_json::to_string_pretty(stats)?.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    info!("Run statistics written to {}", stats_path.display());
    Ok(())
}
