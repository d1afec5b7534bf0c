pub mod analyzer;
pub mod config;
pub mod extractor;
pub mod report;
pub mod scanner;
pub mod score;

pub use analyzer::AnalyzerEngine;
pub use config::{Config, CriterionSpec, Rule};
pub use extractor::ExtractedText;
pub use scanner::{ScanReport, Scanner};
pub use score::{CriterionResult, FileScore};
