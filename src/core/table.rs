//! Bordered text tables.

use crate::constants;
use crate::models::record::Record;
use comfy_table::{presets::ASCII_FULL, Table};

/// Render `columns` and `rows` as a fixed-width bordered table.
///
/// No styling attributes are applied, so the text is the same on a terminal
/// and in an exported file.
pub fn render<S: AsRef<str>>(columns: &[S], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(
        columns
            .iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>(),
    );
    for row in rows {
        table.add_row(row.clone());
    }
    table.to_string()
}

/// The show/export table for a list of records.
pub fn render_records(records: &[Record]) -> String {
    let rows: Vec<Vec<String>> = records.iter().map(Record::cells).collect();
    render(constants::RECORD_COLUMNS, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_header_and_cells() {
        let out = render(
            &["network", "email"],
            &[vec!["github".to_string(), "me@x.com".to_string()]],
        );
        assert!(out.contains("network"));
        assert!(out.contains("github"));
        assert!(out.contains("me@x.com"));
        assert!(out.lines().next().unwrap().starts_with('+'));
    }

    #[test]
    fn test_render_rows_share_width() {
        let out = render(
            &["id", "network"],
            &[
                vec!["1".to_string(), "a".to_string()],
                vec!["2".to_string(), "a-much-longer-network".to_string()],
            ],
        );
        let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_render_records_columns() {
        let record = Record {
            id: 7,
            network: "github".into(),
            email: "me@x.com".into(),
            content: "pw".into(),
            saved_at: chrono::Utc::now(),
        };
        let out = render_records(&[record]);
        for column in constants::RECORD_COLUMNS {
            assert!(out.contains(column));
        }
        assert!(out.contains("github"));
    }

    #[test]
    fn test_render_header_only() {
        let out = render(&["id"], &[]);
        assert!(out.contains("id"));
    }
}
