use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::row::ReportRow;

/// Stable column order of the CSV report.
const CSV_HEADER: [&str; 19] = [
    "url",
    "title",
    "score",
    "direct_answer",
    "definition",
    "headings",
    "facts",
    "sources",
    "faq",
    "lists",
    "tables",
    "word_count_ok",
    "meta_ok",
    "word_count",
    "h2_count",
    "list_count",
    "table_count",
    "meta_len",
    "recommendations",
];

/// RFC 4180 minimal quoting; newlines flattened to spaces first so every
/// record stays on one physical line.
fn csv_field(value: &str) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    let flat = flat.trim();
    if flat.contains(',') || flat.contains('"') {
        format!("\"{}\"", flat.replace('"', "\"\""))
    } else {
        flat.to_string()
    }
}

fn csv_record(row: &ReportRow) -> String {
    let fields = [
        csv_field(&row.url),
        csv_field(&row.title),
        row.score.to_string(),
        row.direct_answer.to_string(),
        row.definition.to_string(),
        row.headings.to_string(),
        row.facts.to_string(),
        row.sources.to_string(),
        row.faq.to_string(),
        row.lists.to_string(),
        row.tables.to_string(),
        row.word_count_ok.to_string(),
        row.meta_ok.to_string(),
        row.word_count.to_string(),
        row.h2_count.to_string(),
        row.list_count.to_string(),
        row.table_count.to_string(),
        row.meta_len.to_string(),
        csv_field(&row.recommendations),
    ];
    fields.join(",")
}

/// Write the CSV report. The file is created even for zero rows, the header
/// is always present, and the content starts with a UTF-8 BOM so Excel
/// renders diacritics correctly.
pub fn write_csv_report(output_path: &Path, rows: &[ReportRow]) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut out = String::from("\u{feff}");
    out.push_str(&CSV_HEADER.join(","));
    out.push('\n');
    for row in rows {
        out.push_str(&csv_record(row));
        out.push('\n');
    }

    let mut file = std::fs::File::create(output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    file.write_all(out.as_bytes())
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(path = %output_path.display(), rows = rows.len(), "CSV report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "line break");
    }

    #[test]
    fn test_empty_report_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.csv");
        write_csv_report(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('\u{feff}'));
        assert!(content.contains("url,title,score"));
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_rows_written_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let rows = vec![
            ReportRow::failed("https://example.sk/a", "A, s čiarkou", "x"),
            ReportRow::failed("https://example.sk/b", "B", "y"),
        ];
        write_csv_report(&path, &rows).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("https://example.sk/a,\"A, s čiarkou\",0"));
        assert!(lines[2].starts_with("https://example.sk/b,B,0"));
    }
}
