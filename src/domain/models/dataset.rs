use serde::{Deserialize, Serialize};

/// Number of leading rows included in the prompt context.
pub const SAMPLE_ROWS: usize = 5;

const MISSING_VALUE: &str = "NaN";
const COLUMN_GAP: &str = "  ";

/// A tabular dataset held in memory as text cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    source: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(source: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source: source.into(),
            headers,
            rows,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    /// Render the first `n` rows as a plain-text table.
    ///
    /// Layout: an unlabeled index column with 0-based row numbers, then one
    /// right-aligned column per header separated by two spaces. Empty cells
    /// print as `NaN`. A dataset without rows prints a short summary of its
    /// columns instead of a table.
    pub fn head_sample(&self, n: usize) -> String {
        let rows: Vec<&Vec<String>> = self.rows.iter().take(n).collect();

        if rows.is_empty() {
            return format!(
                "Empty DataFrame\nColumns: [{}]\nIndex: []",
                self.headers.join(", ")
            );
        }

        let index_labels: Vec<String> = (0..rows.len()).map(|i| i.to_string()).collect();
        let index_width = index_labels.iter().map(|l| l.len()).max().unwrap_or(0);

        let cells: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| {
                (0..self.headers.len())
                    .map(|col| match row.get(col).map(|v| v.as_str()) {
                        Some("") | None => MISSING_VALUE,
                        Some(value) => value,
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(col, header)| {
                cells
                    .iter()
                    .map(|row| display_width(row[col]))
                    .chain(std::iter::once(display_width(header)))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(rows.len() + 1);

        let mut header_line = " ".repeat(index_width);
        for (header, width) in self.headers.iter().zip(&widths) {
            header_line.push_str(COLUMN_GAP);
            header_line.push_str(&pad_left(header, *width));
        }
        lines.push(header_line);

        for (label, row) in index_labels.iter().zip(&cells) {
            let mut line = format!("{:<width$}", label, width = index_width);
            for (value, width) in row.iter().zip(&widths) {
                line.push_str(COLUMN_GAP);
                line.push_str(&pad_left(value, *width));
            }
            lines.push(line);
        }

        lines.join("\n")
    }

    /// The fixed-size sample sent along with every question.
    pub fn context_sample(&self) -> String {
        self.head_sample(SAMPLE_ROWS)
    }
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn pad_left(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(padding), s)
}
