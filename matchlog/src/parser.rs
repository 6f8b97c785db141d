use std::collections::HashMap;

use thiserror::Error;

/// Errors produced while splitting CSV text into records
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("CSV input is empty or has no data rows")]
    EmptyInput,
}

/// A single unvalidated CSV row, keyed by the header's column names
///
/// Values are kept as raw strings. Typing, defaulting and derived fields all
/// happen later, in [`crate::MatchRecord::from_raw`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    /// Look up a column by its header name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Insert a raw value. Mostly useful for building records in tests.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The result of tokenizing a CSV document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCsv {
    /// Column names from the header row, in order
    pub headers: Vec<String>,
    /// One record per non-blank data line
    pub records: Vec<RawRecord>,
    /// How many rows had a field count different from the header's.
    /// Such rows are kept, with missing positions read as empty strings.
    pub ragged_rows: usize,
}

/// Tokenize raw CSV text into [`RawRecord`]s.
///
/// The first non-empty line is the header and defines column names. Quoted
/// fields may contain embedded commas; blank lines are skipped. A row whose
/// field count does not match the header is tolerated and counted in
/// [`ParsedCsv::ragged_rows`] rather than rejected.
pub fn parse_records(text: &str) -> Result<ParsedCsv, ParseError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let headers = lines.next().map(split_fields).ok_or(ParseError::EmptyInput)?;

    let mut records = Vec::new();
    let mut ragged_rows = 0;

    for line in lines {
        let values = split_fields(line);

        if values.len() != headers.len() {
            ragged_rows += 1;
        }

        let mut values = values.into_iter();
        let record = headers
            .iter()
            .map(|header| (header.clone(), values.next().unwrap_or_default()))
            .collect();

        records.push(record);
    }

    if records.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    Ok(ParsedCsv {
        headers,
        records,
        ragged_rows,
    })
}

/// Split one CSV line into fields, honoring double-quote delimiters
///
/// A `"` toggles quoted mode; commas inside quotes are field content, not
/// separators. Whitespace around unquoted fields is trimmed and the quote
/// characters themselves are dropped.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for char in line.chars() {
        match char {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(char),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
