//! Report renderers: plain aligned columns, raw, and JSON.
//!
//! The renderers consume finished rows only; collection behavior is
//! identical regardless of the mode chosen. stdout carries the report,
//! stderr carries logs.

use crate::column::{Cell, ColumnId};
use crate::project::Row;
use fdscan_common::{OutputMode, Result};
use std::io::Write;

/// JSON report key wrapping the record array.
const JSON_REPORT_NAME: &str = "fdscan";

/// Rendering switches forwarded from the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub mode: OutputMode,
    pub no_headings: bool,
}

/// Write the report for the selected columns to `out`.
pub fn render<W: Write>(
    out: &mut W,
    columns: &[ColumnId],
    rows: &[Row],
    options: &RenderOptions,
) -> Result<()> {
    match options.mode {
        OutputMode::Plain => render_plain(out, columns, rows, options.no_headings),
        OutputMode::Raw => render_raw(out, columns, rows, options.no_headings),
        OutputMode::Json => render_json(out, columns, rows),
    }
}

fn render_plain<W: Write>(
    out: &mut W,
    columns: &[ColumnId],
    rows: &[Row],
    no_headings: bool,
) -> Result<()> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|c| {
            let info = c.info();
            let header = if no_headings { 0 } else { info.name.len() };
            info.width_hint.max(header)
        })
        .collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.text().len());
        }
    }

    if !no_headings {
        let headers: Vec<String> = columns.iter().map(|c| c.info().name.to_string()).collect();
        write_padded(out, columns, &widths, &headers)?;
    }
    for row in rows {
        let cells: Vec<String> = row.iter().map(Cell::text).collect();
        write_padded(out, columns, &widths, &cells)?;
    }
    Ok(())
}

/// One aligned line. The last column is never padded and trailing
/// whitespace from empty cells is trimmed.
fn write_padded<W: Write>(
    out: &mut W,
    columns: &[ColumnId],
    widths: &[usize],
    cells: &[String],
) -> Result<()> {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        if i + 1 == cells.len() {
            line.push_str(cell);
        } else if columns[i].info().right_align {
            line.push_str(&format!("{:>width$}", cell, width = widths[i]));
        } else {
            line.push_str(&format!("{:<width$}", cell, width = widths[i]));
        }
    }
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

fn render_raw<W: Write>(
    out: &mut W,
    columns: &[ColumnId],
    rows: &[Row],
    no_headings: bool,
) -> Result<()> {
    if !no_headings {
        let headers: Vec<&str> = columns.iter().map(|c| c.info().name).collect();
        writeln!(out, "{}", headers.join(" "))?;
    }
    for row in rows {
        let cells: Vec<String> = row.iter().map(Cell::text).collect();
        writeln!(out, "{}", cells.join(" "))?;
    }
    Ok(())
}

fn render_json<W: Write>(out: &mut W, columns: &[ColumnId], rows: &[Row]) -> Result<()> {
    let records: Vec<serde_json::Value> = rows
        .iter()
        .map(|row| {
            let mut record = serde_json::Map::new();
            for (&column, cell) in columns.iter().zip(row) {
                let info = column.info();
                record.insert(info.name.to_ascii_lowercase(), cell.to_json(info.json));
            }
            serde_json::Value::Object(record)
        })
        .collect();

    let report = serde_json::json!({ JSON_REPORT_NAME: records });
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Cell;

    fn sample_columns() -> Vec<ColumnId> {
        vec![ColumnId::Fd, ColumnId::Type, ColumnId::Name]
    }

    fn sample_rows() -> Vec<Row> {
        vec![
            vec![
                Cell::Num(0),
                Cell::Str("regular".to_string()),
                Cell::Str("/tmp/a".to_string()),
            ],
            vec![
                Cell::Num(1),
                Cell::Str("character device".to_string()),
                Cell::Str("/dev/null".to_string()),
            ],
        ]
    }

    fn render_to_string(options: &RenderOptions) -> String {
        let mut buf = Vec::new();
        render(&mut buf, &sample_columns(), &sample_rows(), options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_output_aligns_and_prints_headings() {
        let text = render_to_string(&RenderOptions::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("FD"));
        // FD is right-aligned within its width.
        assert!(lines[1].starts_with(" 0 "));
        assert!(lines[1].ends_with("/tmp/a"));
        assert!(lines[2].contains("character device"));
    }

    #[test]
    fn no_headings_drops_only_the_header_line() {
        let with = render_to_string(&RenderOptions::default());
        let without = render_to_string(&RenderOptions {
            no_headings: true,
            ..Default::default()
        });
        assert_eq!(with.lines().count(), without.lines().count() + 1);
        assert!(!without.contains("TYPE"));
        assert!(without.contains("/dev/null"));
    }

    #[test]
    fn raw_output_is_unpadded() {
        let text = render_to_string(&RenderOptions {
            mode: OutputMode::Raw,
            no_headings: true,
        });
        assert_eq!(
            text.lines().next().unwrap(),
            "0 regular /tmp/a"
        );
    }

    #[test]
    fn json_output_types_cells_per_catalog() {
        let text = render_to_string(&RenderOptions {
            mode: OutputMode::Json,
            ..Default::default()
        });
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let records = value["fdscan"].as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["fd"], serde_json::json!(0));
        assert_eq!(records[0]["type"], serde_json::json!("regular"));
        assert_eq!(records[1]["name"], serde_json::json!("/dev/null"));
    }

    #[test]
    fn json_renders_empty_cells_as_null() {
        let mut buf = Vec::new();
        let columns = vec![ColumnId::Fd, ColumnId::Assoc];
        let rows = vec![vec![Cell::Empty, Cell::Str("cwd".to_string())]];
        render(
            &mut buf,
            &columns,
            &rows,
            &RenderOptions {
                mode: OutputMode::Json,
                ..Default::default()
            },
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["fdscan"][0]["fd"], serde_json::Value::Null);
        assert_eq!(value["fdscan"][0]["assoc"], serde_json::json!("cwd"));
    }
}
