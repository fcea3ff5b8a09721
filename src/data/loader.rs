use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{LoadCause, LoadError};
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Load options
// ---------------------------------------------------------------------------

/// How columns are separated within a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// Any run of spaces or tabs.
    #[default]
    Whitespace,
    /// A single byte, e.g. `b','`. Parsed with the `csv` reader.
    Char(u8),
}

impl Delimiter {
    /// Pick a delimiter from the file extension.
    ///
    /// * `.csv` – comma
    /// * `.tsv` – tab
    /// * anything else – whitespace
    pub fn for_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Delimiter::Char(b','),
            "tsv" => Delimiter::Char(b'\t'),
            _ => Delimiter::Whitespace,
        }
    }
}

/// Parsing knobs applied when a file is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// `None` means "choose from the file extension".
    pub delimiter: Option<Delimiter>,
    /// Comment character. For whitespace files everything after it is
    /// dropped; for delimited files only whole lines starting with it are.
    pub comment: Option<char>,
    /// Leading lines to ignore before parsing starts.
    pub skip_rows: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            comment: Some('#'),
            skip_rows: 0,
        }
    }
}

impl LoadOptions {
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    /// The delimiter that will actually be used for `path`.
    pub fn resolve_delimiter(&self, path: &Path) -> Delimiter {
        self.delimiter.unwrap_or_else(|| Delimiter::for_path(path))
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read and parse a whole file into a [`Dataset`].
///
/// Nothing is returned until the entire matrix has parsed, so a failure
/// never yields a partial dataset.
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::from_io(path, e))?;

    let delimiter = options.resolve_delimiter(path);
    log::debug!(
        "parsing {} ({} bytes) with {delimiter:?}",
        path.display(),
        text.len()
    );

    parse_with(&text, delimiter, options).map_err(|cause| LoadError::new(path, cause))
}

/// Parse matrix text. Without an explicit delimiter, whitespace is used.
pub fn parse_str(text: &str, options: &LoadOptions) -> Result<Dataset, LoadCause> {
    parse_with(text, options.delimiter.unwrap_or_default(), options)
}

fn parse_with(text: &str, delimiter: Delimiter, options: &LoadOptions) -> Result<Dataset, LoadCause> {
    match delimiter {
        Delimiter::Whitespace => parse_whitespace(text, options),
        Delimiter::Char(byte) => parse_delimited(text, byte, options),
    }
}

// ---------------------------------------------------------------------------
// Row accumulator
// ---------------------------------------------------------------------------

/// Collects rows into one row-major buffer, enforcing a rectangular shape.
#[derive(Default)]
struct MatrixBuilder {
    cols: Option<usize>,
    rows: usize,
    values: Vec<f64>,
}

impl MatrixBuilder {
    fn push_row<'a>(
        &mut self,
        line: usize,
        tokens: impl Iterator<Item = &'a str>,
    ) -> Result<(), LoadCause> {
        let start = self.values.len();
        for (j, token) in tokens.enumerate() {
            let value = token.parse::<f64>().map_err(|_| LoadCause::NonNumeric {
                line,
                column: j + 1,
                token: token.to_string(),
            })?;
            self.values.push(value);
        }

        let found = self.values.len() - start;
        match self.cols {
            None => self.cols = Some(found),
            Some(expected) if expected != found => {
                return Err(LoadCause::Ragged {
                    line,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        self.rows += 1;
        Ok(())
    }

    fn finish(self) -> Result<Dataset, LoadCause> {
        match self.cols {
            Some(cols) if cols > 0 && self.rows > 0 => {
                Ok(Dataset::from_parts(self.rows, cols, self.values))
            }
            _ => Err(LoadCause::Empty),
        }
    }
}

// ---------------------------------------------------------------------------
// Whitespace-separated text
// ---------------------------------------------------------------------------

fn parse_whitespace(text: &str, options: &LoadOptions) -> Result<Dataset, LoadCause> {
    let mut builder = MatrixBuilder::default();

    for (idx, raw) in text.lines().enumerate().skip(options.skip_rows) {
        let content = match options.comment {
            Some(c) => raw.find(c).map_or(raw, |i| &raw[..i]),
            None => raw,
        };
        if content.trim().is_empty() {
            continue;
        }
        builder.push_row(idx + 1, content.split_whitespace())?;
    }

    builder.finish()
}

// ---------------------------------------------------------------------------
// Single-byte delimited text (CSV, TSV, ...)
// ---------------------------------------------------------------------------

fn parse_delimited(text: &str, delimiter: u8, options: &LoadOptions) -> Result<Dataset, LoadCause> {
    let skipped = skip_lines(text, options.skip_rows);
    let body = &text[skipped..];
    let line_offset = options.skip_rows;

    let comment = options
        .comment
        .filter(char::is_ascii)
        .map(|c| c as u8);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .comment(comment)
        .from_reader(body.as_bytes());

    let mut builder = MatrixBuilder::default();

    for result in reader.records() {
        let record = result.map_err(|e| LoadCause::Csv {
            line: e.position().map_or(0, |p| p.line() as usize) + line_offset,
            message: e.to_string(),
        })?;

        // Whitespace-only lines survive the reader as empty fields.
        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record.position().map_or(0, |p| p.line() as usize) + line_offset;
        builder.push_row(line, record.iter())?;
    }

    builder.finish()
}

/// Byte offset just past the first `n` lines.
fn skip_lines(text: &str, n: usize) -> usize {
    text.split_inclusive('\n').take(n).map(str::len).sum()
}
