use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Target keyword for the density criterion.
    pub keyword: String,
    /// File extensions included in a directory scan.
    pub extensions: Vec<String>,
    /// Informational threshold: files under this size are reported as "good".
    pub max_file_size_kb: u64,
    pub criteria: Vec<CriterionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub key: String,
    pub display_name: String,
    pub weight: u32,
    pub rule: Rule,
}

/// One variant per criterion kind. A new criterion is a new `CriterionSpec`
/// over an existing kind, not new evaluation code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Rule {
    /// Extract the first capture of `pattern`; its trimmed character length
    /// must fall within [min_length, max_length].
    TagLength {
        pattern: String,
        min_length: usize,
        max_length: usize,
    },
    /// Count matches of `pattern`; pass iff the count equals `expected`.
    ExactCount { pattern: String, expected: usize },
    /// Count matches of `pattern`; pass iff the count is at least `min_count`.
    MinCount { pattern: String, min_count: usize },
    /// Pass iff `pattern` matches at least once.
    Presence { pattern: String },
    /// Pass iff the extracted word count is at least `min_words`.
    MinWordCount { min_words: usize },
    /// Pass iff keyword density (percent) falls within
    /// [min_density, max_density] inclusive.
    KeywordDensity { min_density: f64, max_density: f64 },
}

impl Rule {
    /// The regex pattern this rule needs pre-compiled, if any.
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Rule::TagLength { pattern, .. }
            | Rule::ExactCount { pattern, .. }
            | Rule::MinCount { pattern, .. }
            | Rule::Presence { pattern } => Some(pattern.as_str()),
            Rule::MinWordCount { .. } | Rule::KeywordDensity { .. } => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keyword: "seo".to_string(),
            extensions: vec!["html".to_string(), "php".to_string()],
            max_file_size_kb: 100,
            criteria: vec![
                CriterionSpec {
                    key: "title_tag".to_string(),
                    display_name: "Title tag".to_string(),
                    weight: 15,
                    rule: Rule::TagLength {
                        pattern: r"(?is)<title[^>]*>(.*?)</title>".to_string(),
                        min_length: 10,
                        max_length: 65,
                    },
                },
                CriterionSpec {
                    key: "meta_description".to_string(),
                    display_name: "Meta description".to_string(),
                    weight: 15,
                    rule: Rule::TagLength {
                        pattern: r#"(?is)<meta[^>]*name=["']description["'][^>]*content=["']([^"']*)["']"#
                            .to_string(),
                        min_length: 50,
                        max_length: 160,
                    },
                },
                CriterionSpec {
                    key: "h1_tag".to_string(),
                    display_name: "H1 heading".to_string(),
                    weight: 10,
                    rule: Rule::ExactCount {
                        pattern: r"(?is)<h1[^>]*>".to_string(),
                        expected: 1,
                    },
                },
                CriterionSpec {
                    key: "image_alt_attribute".to_string(),
                    display_name: "Image alt attributes".to_string(),
                    weight: 10,
                    rule: Rule::MinCount {
                        pattern: r#"(?is)<img[^>]*alt=["'][^"']+["'][^>]*>"#.to_string(),
                        min_count: 1,
                    },
                },
                CriterionSpec {
                    key: "canonical_link".to_string(),
                    display_name: "Canonical link".to_string(),
                    weight: 10,
                    rule: Rule::Presence {
                        pattern: r#"(?is)<link[^>]*rel=["']canonical["'][^>]*>"#.to_string(),
                    },
                },
                CriterionSpec {
                    key: "mobile_viewport".to_string(),
                    display_name: "Mobile viewport".to_string(),
                    weight: 10,
                    rule: Rule::Presence {
                        pattern: r#"(?is)<meta[^>]*name=["']viewport["'][^>]*content=["'][^"']*width=device-width\s*,\s*initial-scale=1"#
                            .to_string(),
                    },
                },
                CriterionSpec {
                    key: "min_word_count".to_string(),
                    display_name: "Word count".to_string(),
                    weight: 15,
                    rule: Rule::MinWordCount { min_words: 300 },
                },
                CriterionSpec {
                    key: "keyword_density".to_string(),
                    display_name: "Keyword density".to_string(),
                    weight: 15,
                    rule: Rule::KeywordDensity {
                        min_density: 0.5,
                        max_density: 2.0,
                    },
                },
            ],
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Sum of all criterion weights; the denominator of the percentage.
    pub fn max_score(&self) -> u32 {
        self.criteria.iter().map(|c| c.weight).sum()
    }

    /// Configuration errors are fatal: without a non-empty, uniquely keyed
    /// criteria set the percentage is undefined.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.criteria.is_empty() {
            anyhow::bail!("Configuration contains no criteria");
        }
        if self.max_score() == 0 {
            anyhow::bail!("Criterion weights sum to zero; cannot compute a percentage");
        }
        let mut seen = std::collections::HashSet::new();
        for spec in &self.criteria {
            if !seen.insert(spec.key.as_str()) {
                anyhow::bail!("Duplicate criterion key '{}'", spec.key);
            }
        }
        if self.keyword.trim().is_empty() {
            anyhow::bail!("Keyword must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_max_score() {
        let config = Config::default();
        let sum: u32 = config.criteria.iter().map(|c| c.weight).sum();
        assert_eq!(sum, config.max_score());
        assert_eq!(config.max_score(), 100);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_has_eight_criteria_in_order() {
        let config = Config::default();
        let keys: Vec<&str> = config.criteria.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "title_tag",
                "meta_description",
                "h1_tag",
                "image_alt_attribute",
                "canonical_link",
                "mobile_viewport",
                "min_word_count",
                "keyword_density",
            ]
        );
    }

    #[test]
    fn empty_criteria_is_a_configuration_error() {
        let config = Config {
            criteria: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_total_weight_is_a_configuration_error() {
        let mut config = Config::default();
        for spec in &mut config.criteria {
            spec.weight = 0;
        }
        assert!(config.validate().is_err());
    }

    #[test]
    fn duplicate_keys_are_a_configuration_error() {
        let mut config = Config::default();
        let dup = config.criteria[0].clone();
        config.criteria.push(dup);
        assert!(config.validate().is_err());
    }

    #[test]
    fn yaml_round_trip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.criteria.len(), config.criteria.len());
        assert_eq!(parsed.max_score(), config.max_score());
        assert_eq!(parsed.keyword, config.keyword);
    }
}
