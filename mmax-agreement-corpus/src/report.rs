//! Text and JSON rendering of agreement reports.

use mmax_agreement::{AgreementReport, CategoryKappa, DocumentKappa};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

const RULE_WIDTH: usize = 66;
const MIN_NAME_WIDTH: usize = 15;
const COLUMN_WIDTH: usize = 10;

/// Kappas of one document, one block per category.
pub fn format_document(document: &DocumentKappa) -> String {
    let mut output = String::new();

    writeln!(output, "File: '{}'", document.key).unwrap();
    for category in &document.categories {
        writeln!(output, "Markable: {}", category.category).unwrap();
        writeln!(
            output,
            "Matched: {}; Total marked: {}; Kappa: {:.2}",
            category.first.matched, category.first.total, category.kappa
        )
        .unwrap();
    }
    writeln!(output, "{}", "=".repeat(RULE_WIDTH)).unwrap();

    output
}

/// Pooled statistics table with a final row over all categories.
pub fn format_summary(report: &AgreementReport) -> String {
    let rows: Vec<&CategoryKappa> = report
        .categories
        .iter()
        .chain(std::iter::once(&report.overall))
        .collect();
    let name_width = rows
        .iter()
        .map(|row| row.category.width() + 2)
        .fold(MIN_NAME_WIDTH, usize::max);

    let mut output = String::new();
    writeln!(output, "STATISTICS FOR MARKABLES").unwrap();
    write_cell(&mut output, "Markable", name_width);
    for header in ["Overlap1", "Total1", "Overlap2", "Total2", "Kappa"] {
        write!(output, "{:>w$}", header, w = COLUMN_WIDTH).unwrap();
    }
    writeln!(output).unwrap();

    for row in rows {
        write_cell(&mut output, &row.category, name_width);
        writeln!(
            output,
            "{:>w$}{:>w$}{:>w$}{:>w$}{:>w$.4}",
            row.first.matched,
            row.first.total,
            row.second.matched,
            row.second.total,
            row.kappa,
            w = COLUMN_WIDTH
        )
        .unwrap();
    }

    output
}

/// Left-aligned cell padded by display width, so wide characters line up.
fn write_cell(output: &mut String, text: &str, width: usize) {
    output.push_str(text);
    let padding = width.saturating_sub(text.width());
    output.extend(std::iter::repeat(' ').take(padding));
}

/// Per-document blocks followed by the pooled table.
pub fn format_report(report: &AgreementReport) -> String {
    let mut output = String::new();
    for document in &report.documents {
        output.push_str(&format_document(document));
    }
    output.push_str(&format_summary(report));
    output
}

pub fn format_json(report: &AgreementReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mmax_agreement::{ComparisonMode, OverlapCounters, StatisticsAggregator};
    use mmax_agreement::{DocumentComparison, DocumentStatistics};

    fn counters(pos: (usize, usize), neg: (usize, usize)) -> mmax_agreement::CategoryCounters {
        [
            ("emo-expression-neg".to_string(), OverlapCounters::new(neg.0, neg.1)),
            ("emo-expression-pos".to_string(), OverlapCounters::new(pos.0, pos.1)),
        ]
        .into_iter()
        .collect()
    }

    fn document(key: &str, pos: (usize, usize)) -> DocumentStatistics {
        DocumentStatistics::new(
            key,
            DocumentComparison {
                first: counters(pos, (0, 0)),
                second: counters(pos, (0, 0)),
                token_count: 10,
            },
        )
    }

    fn report() -> AgreementReport {
        let mut aggregator = StatisticsAggregator::new();
        aggregator.record(document("tweet_1", (3, 3)));
        aggregator.record(document("tweet_2", (2, 3)));
        aggregator.report(ComparisonMode::Binary).unwrap()
    }

    #[test]
    fn test_format_document() {
        let report = report();
        insta::assert_snapshot!(format_document(&report.documents[1]), @r###"
        File: 'tweet_2'
        Markable: emo-expression-neg
        Matched: 0; Total marked: 0; Kappa: 0.00
        Markable: emo-expression-pos
        Matched: 2; Total marked: 3; Kappa: 0.52
        ==================================================================
        "###);
    }

    #[test]
    fn test_format_summary() {
        let report = report();
        insta::assert_snapshot!(format_summary(&report), @r###"
        STATISTICS FOR MARKABLES
        Markable              Overlap1    Total1  Overlap2    Total2     Kappa
        emo-expression-neg           0         0         0         0    0.0000
        emo-expression-pos           5         6         5         6    0.7619
        overall                      5         6         5         6    0.8039
        "###);
    }

    #[test]
    fn test_format_report_lists_documents_in_order() {
        let text = format_report(&report());
        let first = text.find("File: 'tweet_1'").unwrap();
        let second = text.find("File: 'tweet_2'").unwrap();
        let table = text.find("STATISTICS FOR MARKABLES").unwrap();
        assert!(first < second && second < table);
        assert!(text.contains("Matched: 3; Total marked: 3; Kappa: 1.00"));
    }

    #[test]
    fn test_short_names_keep_minimum_width() {
        let mut report = report();
        report.categories.clear();
        report.overall.category = "all".to_string();
        let summary = format_summary(&report);
        let row = summary.lines().last().unwrap();
        assert!(row.starts_with("all            "));
        assert_eq!(row.len(), MIN_NAME_WIDTH + 5 * COLUMN_WIDTH);
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "binary");
        assert_eq!(value["token_count"], 20);
        assert_eq!(value["documents"].as_array().unwrap().len(), 2);
        assert_eq!(value["overall"]["first"]["matched"], 5);
    }
}
