use crate::config::{Config, CriterionSpec, Rule};
use crate::extractor::{count_keyword, extract_text, ExtractedText};
use crate::score::{aggregate, CriterionResult, FileScore};

use regex::Regex;
use std::collections::HashMap;

/// Scoring engine. Holds the immutable run configuration and the regexes
/// pre-compiled from it; construction fails on any configuration error.
pub struct AnalyzerEngine {
    config: Config,
    compiled_patterns: HashMap<String, Regex>,
}

impl AnalyzerEngine {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let compiled_patterns = compile_patterns(&config)?;
        Ok(AnalyzerEngine {
            config,
            compiled_patterns,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Score one document. Extracts plain text once, evaluates every
    /// criterion in declaration order, aggregates the percentage, then
    /// appends the informational file-size entry. A failing criterion is a
    /// normal result, never an error; this function cannot fail.
    pub fn analyze(&self, content: &str, size_bytes: u64) -> FileScore {
        let extracted = extract_text(content);
        log::debug!(
            "Extracted {} words from {} bytes of content",
            extracted.word_count,
            content.len()
        );

        let mut results: Vec<CriterionResult> = self
            .config
            .criteria
            .iter()
            .map(|spec| self.evaluate_criterion(spec, content, &extracted))
            .collect();

        let percentage = aggregate(&results, self.config.max_score());
        results.push(self.file_size_entry(size_bytes));

        FileScore {
            percentage,
            results,
        }
    }

    fn evaluate_criterion(
        &self,
        spec: &CriterionSpec,
        content: &str,
        extracted: &ExtractedText,
    ) -> CriterionResult {
        let key = spec.key.as_str();
        let name = spec.display_name.as_str();

        let result = match &spec.rule {
            Rule::TagLength {
                pattern,
                min_length,
                max_length,
            } => {
                let regex = match self.compiled_patterns.get(pattern) {
                    Some(regex) => regex,
                    None => return CriterionResult::fail(key, name, "not found".to_string()),
                };
                match regex.captures(content).and_then(|c| c.get(1)) {
                    None => CriterionResult::fail(key, name, "not found".to_string()),
                    Some(capture) => {
                        let length = capture.as_str().trim().chars().count();
                        if length < *min_length {
                            CriterionResult::fail(
                                key,
                                name,
                                format!("too short: {length} characters (minimum {min_length})"),
                            )
                        } else if length > *max_length {
                            CriterionResult::fail(
                                key,
                                name,
                                format!("too long: {length} characters (maximum {max_length})"),
                            )
                        } else {
                            CriterionResult::pass(
                                key,
                                name,
                                spec.weight,
                                format!("{length} characters"),
                            )
                        }
                    }
                }
            }
            Rule::ExactCount { pattern, expected } => {
                let count = self.count_matches(pattern, content);
                if count == *expected {
                    CriterionResult::pass(key, name, spec.weight, format!("found {count}"))
                } else if count == 0 {
                    CriterionResult::fail(key, name, format!("no {name} found"))
                } else if count > *expected {
                    CriterionResult::fail(key, name, format!("multiple {name} tags found ({count})"))
                } else {
                    CriterionResult::fail(key, name, format!("found {count}, expected {expected}"))
                }
            }
            Rule::MinCount { pattern, min_count } => {
                let count = self.count_matches(pattern, content);
                if count >= *min_count {
                    CriterionResult::pass(key, name, spec.weight, format!("found {count}"))
                } else if count == 0 {
                    CriterionResult::fail(key, name, "none found".to_string())
                } else {
                    CriterionResult::fail(
                        key,
                        name,
                        format!("found {count}, need at least {min_count}"),
                    )
                }
            }
            Rule::Presence { pattern } => {
                if self.count_matches(pattern, content) > 0 {
                    CriterionResult::pass(key, name, spec.weight, "present".to_string())
                } else {
                    CriterionResult::fail(key, name, "not found".to_string())
                }
            }
            Rule::MinWordCount { min_words } => {
                let words = extracted.word_count;
                if words >= *min_words {
                    CriterionResult::pass(key, name, spec.weight, format!("{words} words"))
                } else {
                    CriterionResult::fail(
                        key,
                        name,
                        format!("{words} words, minimum {min_words} required"),
                    )
                }
            }
            Rule::KeywordDensity {
                min_density,
                max_density,
            } => {
                let keyword = self.config.keyword.as_str();
                let occurrences = count_keyword(&extracted.plain_text, keyword);
                // A zero-word document has density 0, which fails the lower
                // bound; never a division fault.
                let density = if extracted.word_count > 0 {
                    100.0 * occurrences as f64 / extracted.word_count as f64
                } else {
                    0.0
                };

                // Both bounds are checked independently; with non-overlapping
                // thresholds only one can fire per evaluation.
                let mut problems = Vec::new();
                if density < *min_density {
                    problems.push(format!(
                        "too low: {density:.2}% (minimum {min_density}%)"
                    ));
                }
                if density > *max_density {
                    problems.push(format!(
                        "too high: {density:.2}% (maximum {max_density}%) - keyword stuffing"
                    ));
                }

                if problems.is_empty() {
                    CriterionResult::pass(
                        key,
                        name,
                        spec.weight,
                        format!("{density:.2}% for keyword '{keyword}'"),
                    )
                } else {
                    CriterionResult::fail(key, name, problems.join("; "))
                }
            }
        };

        log::debug!(
            "Criterion '{}' evaluation result: {} ({})",
            result.key,
            result.passed,
            result.message
        );
        result
    }

    fn count_matches(&self, pattern: &str, content: &str) -> usize {
        match self.compiled_patterns.get(pattern) {
            Some(regex) => regex.find_iter(content).count(),
            None => 0,
        }
    }

    /// Informational entry appended after the scored criteria; contributes 0
    /// and exists for display only.
    fn file_size_entry(&self, size_bytes: u64) -> CriterionResult {
        let size_kb = size_bytes as f64 / 1024.0;
        let limit_kb = self.config.max_file_size_kb;
        let good = size_kb < limit_kb as f64;
        let message = if good {
            format!("{size_kb:.1} KB (good, under {limit_kb} KB)")
        } else {
            format!("{size_kb:.1} KB (consider reducing below {limit_kb} KB)")
        };
        CriterionResult::info("file_size", "File size", good, message)
    }
}

fn compile_patterns(config: &Config) -> anyhow::Result<HashMap<String, Regex>> {
    let mut compiled = HashMap::new();
    for spec in &config.criteria {
        if let Some(pattern) = spec.rule.pattern() {
            if !compiled.contains_key(pattern) {
                let regex = Regex::new(pattern)
                    .map_err(|e| anyhow::anyhow!("Invalid regex pattern '{pattern}': {e}"))?;
                compiled.insert(pattern.to_string(), regex);
            }
        }
    }
    Ok(compiled)
}
