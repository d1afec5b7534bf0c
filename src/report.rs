use crate::scanner::ScanReport;

/// Render a scan report in the requested format ("html" or "json").
pub fn render(format: &str, report: &ScanReport) -> anyhow::Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(report)?),
        "html" => Ok(render_html(report)),
        _ => anyhow::bail!("Unsupported report format '{format}'"),
    }
}

fn render_html(report: &ScanReport) -> String {
    let mut sections = String::new();

    for file in &report.files {
        let mut rows = String::new();
        for result in &file.score.results {
            let class = if result.informational {
                "info"
            } else if result.passed {
                "pass"
            } else {
                "fail"
            };
            let status = if result.passed { "✔" } else { "✘" };
            rows.push_str(&format!(
                "        <tr class=\"{class}\"><td>{status}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&result.display_name),
                escape(&result.message),
                result.contribution,
            ));
        }
        sections.push_str(&format!(
            r#"    <div class="file">
        <h2>{} <span class="score">{:.2}%</span></h2>
        <table>
        <tr><th></th><th>Criterion</th><th>Result</th><th>Points</th></tr>
{rows}        </table>
    </div>
"#,
            escape(&file.path.display().to_string()),
            file.score.percentage,
        ));
    }

    let mut skipped = String::new();
    if !report.skipped.is_empty() {
        skipped.push_str("    <div class=\"skipped\">\n        <h2>Skipped files</h2>\n        <ul>\n");
        for skip in &report.skipped {
            skipped.push_str(&format!(
                "            <li>{}: {}</li>\n",
                escape(&skip.path.display().to_string()),
                escape(&skip.reason),
            ));
        }
        skipped.push_str("        </ul>\n    </div>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>SEO Scan Report</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        .file {{ background: #f5f5f5; padding: 10px; margin: 10px 0; border-radius: 5px; }}
        .score {{ float: right; }}
        table {{ border-collapse: collapse; width: 100%; }}
        td, th {{ text-align: left; padding: 4px 8px; }}
        .pass {{ color: #388e3c; }}
        .fail {{ color: #d32f2f; }}
        .info {{ color: #616161; }}
        .skipped {{ color: #d32f2f; }}
    </style>
</head>
<body>
    <h1>SEO Scan Report</h1>
    <p>Root: {root} | Keyword: "{keyword}" | Files analyzed: {count} | Average score: {average:.2}%</p>
{sections}{skipped}    <p class="note">Tag detection is pattern-based, not a full HTML parse; tags inside
    comments or scripts may be mis-detected.</p>
</body>
</html>
"#,
        root = escape(&report.root.display().to_string()),
        keyword = escape(&report.keyword),
        count = report.files.len(),
        average = report.average_percentage(),
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalyzerEngine;
    use crate::config::Config;
    use crate::scanner::{FileReport, ScanReport};
    use std::path::PathBuf;

    fn sample_report() -> ScanReport {
        let engine = AnalyzerEngine::new(Config::default()).unwrap();
        let score = engine.analyze("<html><h1>Just a heading</h1></html>", 512);
        ScanReport {
            root: PathBuf::from("site"),
            keyword: "seo".to_string(),
            files: vec![FileReport {
                path: PathBuf::from("site/index.html"),
                score,
            }],
            skipped: vec![],
        }
    }

    #[test]
    fn html_report_lists_every_criterion() {
        let report = sample_report();
        let html = render("html", &report).unwrap();
        assert!(html.contains("site/index.html"));
        assert!(html.contains("Title tag"));
        assert!(html.contains("Keyword density"));
        assert!(html.contains("File size"));
    }

    #[test]
    fn json_report_round_trips() {
        let report = sample_report();
        let json = render("json", &report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["keyword"], "seo");
        assert_eq!(value["files"][0]["score"]["results"][0]["key"], "title_tag");
    }

    #[test]
    fn unknown_format_is_rejected() {
        let report = sample_report();
        assert!(render("csv", &report).is_err());
    }

    #[test]
    fn html_escapes_markup_in_messages() {
        let mut report = sample_report();
        report.skipped.push(crate::scanner::SkippedFile {
            path: PathBuf::from("site/<odd>.html"),
            reason: "bad & worse".to_string(),
        });
        let html = render("html", &report).unwrap();
        assert!(html.contains("&lt;odd&gt;"));
        assert!(html.contains("bad &amp; worse"));
    }
}
