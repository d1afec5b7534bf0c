use crate::analyzer::AnalyzerEngine;
use crate::score::FileScore;

use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Per-file analysis outcome.
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub score: FileScore,
}

/// A file the scan could not analyze. Recorded and reported, never fatal.
#[derive(Debug, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub keyword: String,
    pub files: Vec<FileReport>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    pub fn average_percentage(&self) -> f64 {
        if self.files.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.files.iter().map(|f| f.score.percentage).sum();
        let avg = sum / self.files.len() as f64;
        (avg * 100.0).round() / 100.0
    }
}

pub struct Scanner {
    root: PathBuf,
    extensions: Vec<String>,
}

impl Scanner {
    pub fn new(root: PathBuf, extensions: Vec<String>) -> Self {
        Scanner { root, extensions }
    }

    /// Walk the tree and analyze every matching file. A file that cannot be
    /// read is logged, recorded as skipped, and the scan continues; the only
    /// fatal error is a root that cannot be walked at all.
    pub fn scan(&self, engine: &AnalyzerEngine) -> anyhow::Result<ScanReport> {
        let mut report = ScanReport {
            root: self.root.clone(),
            keyword: engine.config().keyword.clone(),
            files: Vec::new(),
            skipped: Vec::new(),
        };

        for entry in WalkDir::new(&self.root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // A failure on the root itself means nothing can be
                    // scanned; deeper failures are per-entry skips.
                    if e.path() == Some(self.root.as_path()) || e.depth() == 0 {
                        return Err(e.into());
                    }
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    log::warn!("Skipping {}: {e}", path.display());
                    report.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !self.matches_extension(path) {
                continue;
            }

            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);
                    let score = engine.analyze(&content, size_bytes);
                    log::info!("{}: {:.2}%", path.display(), score.percentage);
                    report.files.push(FileReport {
                        path: path.to_path_buf(),
                        score,
                    });
                }
                Err(e) => {
                    log::warn!("Skipping unreadable file {}: {e}", path.display());
                    report.skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            "Scanned {} files under {} ({} skipped)",
            report.files.len(),
            self.root.display(),
            report.skipped.len()
        );
        Ok(report)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext = ext.to_string_lossy().to_lowercase();
                self.extensions.iter().any(|e| e.to_lowercase() == ext)
            }
            None => false,
        }
    }
}
