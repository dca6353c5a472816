//! Progress bar display for batch ingestion

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for ingesting a batch of input files
pub struct IngestProgress {
    file_pb: ProgressBar,
}

impl IngestProgress {
    /// Create a new progress display with total file count
    pub fn new(total_files: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(style);

        Self { file_pb }
    }

    /// Advance past one file
    pub fn advance(&self, file_name: &str) {
        self.file_pb.set_message(file_name.to_string());
        self.file_pb.inc(1);
    }

    /// Finish and clear the bar so outcome reporting starts on a clean line
    pub fn finish(&self) {
        self.file_pb.finish_and_clear();
    }
}
