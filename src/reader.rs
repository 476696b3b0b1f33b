// WHY: Async loading of essay files for the batch CLI
// Read failures become statistics unless fail_fast is set, so one bad file does not stop a batch

use anyhow::Result;
use std::path::Path;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for file reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            buffer_size: 8192,
        }
    }
}

/// Statistics for one essay read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub bytes_read: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

impl ReadStats {
    fn failed(path: &Path, started: Instant, error: String) -> Self {
        Self {
            file_path: path.display().to_string(),
            bytes_read: 0,
            duration_ms: started.elapsed().as_millis() as u64,
            read_error: Some(error),
        }
    }
}

/// Async reader returning whole essays as UTF-8 strings
pub struct AsyncFileReader {
    config: ReaderConfig,
}

impl AsyncFileReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read an essay file completely.
    ///
    /// Without `fail_fast`, open and decoding failures return an empty string
    /// with the error recorded in `ReadStats::read_error`.
    pub async fn read_essay<P: AsRef<Path>>(&self, file_path: P) -> Result<(String, ReadStats)> {
        let path = file_path.as_ref();
        let started = Instant::now();
        debug!("Starting async read of essay: {}", path.display());

        let file = match File::open(path).await {
            Ok(file) => file,
            Err(e) => {
                let error_msg = format!("Failed to open file {}: {}", path.display(), e);
                return self.fail(path, started, error_msg);
            }
        };

        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut content = String::new();
        if let Err(e) = reader.read_to_string(&mut content).await {
            let error_msg = format!("UTF-8 decoding error in {}: {}", path.display(), e);
            return self.fail(path, started, error_msg);
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            bytes_read: content.len() as u64,
            duration_ms: started.elapsed().as_millis() as u64,
            read_error: None,
        };
        info!(
            "Read {}: {} bytes in {}ms",
            path.display(),
            stats.bytes_read,
            stats.duration_ms
        );
        Ok((content, stats))
    }

    fn fail(&self, path: &Path, started: Instant, error_msg: String) -> Result<(String, ReadStats)> {
        warn!("{}", error_msg);
        if self.config.fail_fast {
            return Err(anyhow::anyhow!(error_msg));
        }
        Ok((String::new(), ReadStats::failed(path, started, error_msg)))
    }
}
