use serde::Serialize;

/// Outcome of one criterion against one file. Failure is data here, never an
/// error: a failed check scores 0 and carries an explanation.
#[derive(Debug, Clone, Serialize)]
pub struct CriterionResult {
    pub key: String,
    pub display_name: String,
    pub passed: bool,
    /// Exactly 0 or the criterion's full weight; scoring is binary.
    pub contribution: u32,
    pub message: String,
    /// Informational entries are displayed but excluded from the percentage.
    pub informational: bool,
}

impl CriterionResult {
    pub fn pass(key: &str, display_name: &str, weight: u32, message: String) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            passed: true,
            contribution: weight,
            message,
            informational: false,
        }
    }

    pub fn fail(key: &str, display_name: &str, message: String) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            passed: false,
            contribution: 0,
            message,
            informational: false,
        }
    }

    pub fn info(key: &str, display_name: &str, passed: bool, message: String) -> Self {
        Self {
            key: key.to_string(),
            display_name: display_name.to_string(),
            passed,
            contribution: 0,
            message,
            informational: true,
        }
    }
}

/// Score of a single file: the percentage plus the per-criterion results in
/// declaration order, with informational entries appended at the end.
#[derive(Debug, Clone, Serialize)]
pub struct FileScore {
    pub percentage: f64,
    pub results: Vec<CriterionResult>,
}

/// Reduce criterion contributions to a percentage of `max_score`, rounded to
/// two decimals. Informational entries are skipped. `max_score > 0` is a
/// precondition enforced by `Config::validate`.
pub fn aggregate(results: &[CriterionResult], max_score: u32) -> f64 {
    let total: u32 = results
        .iter()
        .filter(|r| !r.informational)
        .map(|r| r.contribution)
        .sum();
    let percentage = 100.0 * f64::from(total) / f64::from(max_score);
    (percentage * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_marks_is_exactly_100() {
        let results = vec![
            CriterionResult::pass("a", "A", 60, "ok".to_string()),
            CriterionResult::pass("b", "B", 40, "ok".to_string()),
        ];
        assert_eq!(aggregate(&results, 100), 100.0);
    }

    #[test]
    fn all_failures_is_exactly_0() {
        let results = vec![
            CriterionResult::fail("a", "A", "missing".to_string()),
            CriterionResult::fail("b", "B", "missing".to_string()),
        ];
        assert_eq!(aggregate(&results, 100), 0.0);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let results = vec![
            CriterionResult::pass("a", "A", 1, "ok".to_string()),
            CriterionResult::fail("b", "B", "missing".to_string()),
        ];
        // 1/3 of the maximum -> 33.33
        assert_eq!(aggregate(&results, 3), 33.33);
    }

    #[test]
    fn informational_entries_do_not_score() {
        let results = vec![
            CriterionResult::pass("a", "A", 50, "ok".to_string()),
            CriterionResult::info("file_size", "File size", true, "2.0 KB".to_string()),
        ];
        assert_eq!(aggregate(&results, 100), 50.0);
    }

    #[test]
    fn contribution_is_binary() {
        let pass = CriterionResult::pass("a", "A", 15, "ok".to_string());
        let fail = CriterionResult::fail("a", "A", "no".to_string());
        assert_eq!(pass.contribution, 15);
        assert_eq!(fail.contribution, 0);
    }
}
