use std::fmt::Write;

use crate::models::{ComponentReport, CorpusSpec};

/// Render the fixed-width comparison table of recomputed corpus statistics
/// against the expected table: per-component hours and words with signed
/// differences, file counts, and a grand-total row.
///
/// Components missing from `reports` (absent directories) get no row but
/// still count toward the expected totals, so the difference row shows what
/// the missing data would have contributed.
pub fn render_report(reports: &[ComponentReport], spec: &CorpusSpec) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<10} {:>14} {:>14} {:>10}",
        "Component", "Hours (Calc)", "Hours (Expected)", "Diff"
    );
    let _ = writeln!(
        out,
        "{:<10} {:>14} {:>14} {:>10}",
        "", "Words (Calc)", "Words (Expected)", "Diff"
    );
    let _ = writeln!(out, "{}", "-".repeat(70));

    for component in &spec.components {
        let Some(report) = reports.iter().find(|r| r.component == component.name) else {
            continue;
        };
        let stats = &report.stats;
        let expected = &component.expected;

        let hours_diff = stats.hours() - expected.hours;
        let words_diff = stats.words as i64 - expected.words as i64;

        let _ = writeln!(
            out,
            "{:<10} {:>14.2} {:>14.2} {:>10.2}",
            component.name,
            stats.hours(),
            expected.hours,
            hours_diff
        );
        let _ = writeln!(
            out,
            "{:<10} {:>14} {:>14} {:>10}",
            "",
            with_commas(stats.words as i64),
            with_commas(expected.words as i64),
            with_commas(words_diff)
        );
        let _ = writeln!(
            out,
            "{:<10} ({} txt files, {} TextGrid files)",
            "", stats.transcript_files, stats.grid_files
        );
        out.push('\n');
    }

    let calc_hours: f64 = reports.iter().map(|r| r.stats.hours()).sum();
    let calc_words: i64 = reports.iter().map(|r| r.stats.words as i64).sum();
    let exp_hours: f64 = spec.components.iter().map(|c| c.expected.hours).sum();
    let exp_words: i64 = spec.components.iter().map(|c| c.expected.words as i64).sum();

    let _ = writeln!(out, "{}", "=".repeat(70));
    let _ = writeln!(
        out,
        "{:<10} {:>14.2} {:>14.2} {:>10.2}",
        "TOTAL",
        calc_hours,
        exp_hours,
        calc_hours - exp_hours
    );
    let _ = writeln!(
        out,
        "{:<10} {:>14} {:>14} {:>10}",
        "",
        with_commas(calc_words),
        with_commas(exp_words),
        with_commas(calc_words - exp_words)
    );

    out
}

/// Format an integer with thousands separators, e.g. `93525` -> `93,525`.
fn with_commas(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{ComponentSpec, ComponentStats, ExpectedStats};

    use super::*;

    fn spec_one(name: &str, hours: f64, words: u64) -> CorpusSpec {
        CorpusSpec {
            components: vec![ComponentSpec {
                name: name.to_string(),
                expected: ExpectedStats { hours, words },
            }],
            id_column: "CORAAL.File".to_string(),
        }
    }

    #[test]
    fn test_report_rows_and_totals() {
        let spec = spec_one("ATL", 8.62, 93_525);
        let reports = vec![ComponentReport {
            component: "ATL".to_string(),
            stats: ComponentStats {
                words: 93_000,
                seconds: 8.62 * 3600.0,
                transcript_files: 12,
                grid_files: 12,
            },
        }];

        let table = render_report(&reports, &spec);
        assert!(table.contains("ATL"));
        assert!(table.contains("8.62"));
        assert!(table.contains("93,000"));
        assert!(table.contains("93,525"));
        assert!(table.contains("-525"));
        assert!(table.contains("(12 txt files, 12 TextGrid files)"));
        assert!(table.contains("TOTAL"));
    }

    #[test]
    fn test_missing_component_contributes_no_row() {
        let spec = spec_one("DCA", 34.02, 333_537);
        let table = render_report(&[], &spec);
        // Header mentions no per-component row, but expected totals remain.
        assert!(!table.contains("DCA "));
        assert!(table.contains("333,537"));
    }

    #[test]
    fn test_with_commas() {
        assert_eq!(with_commas(0), "0");
        assert_eq!(with_commas(999), "999");
        assert_eq!(with_commas(93_525), "93,525");
        assert_eq!(with_commas(-1_234_567), "-1,234,567");
    }
}
