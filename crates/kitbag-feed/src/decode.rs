//! Tabular decoder for the supplier's comma-separated export.
//!
//! The dialect is forgiving: quoted fields may span lines,
//! `""` inside quotes is a literal quote, short rows are padded on the right,
//! and rows whose field count still disagrees with the header are skipped and
//! counted rather than failing the run.

/// Number of column-count mismatches reported individually in the run log.
const REPORTED_MISMATCHES: usize = 5;

/// One decoded data row: header name to raw field value, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Builds a record from `(column, value)` pairs, keeping their order.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Returns the raw value for `column`, or `None` if the column is absent.
    ///
    /// When a header repeats, the right-most column wins.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value for `column` only when it is present and non-empty.
    #[must_use]
    pub fn field(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A data row dropped because its field count disagreed with the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMismatch {
    /// Index of the logical line (the header is line 0).
    pub row: usize,
    pub expected: usize,
    pub actual: usize,
}

/// Counters describing one decode pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Non-blank logical lines, header included.
    pub logical_lines: usize,
    pub header_count: usize,
    pub skipped_rows: usize,
    /// The first few mismatches, for the run log.
    pub mismatches: Vec<ColumnMismatch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedFeed {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
    pub stats: DecodeStats,
}

/// Decodes raw export text into header-keyed records.
///
/// Never fails: text with fewer than two logical lines yields no records.
#[must_use]
pub fn decode(text: &str) -> DecodedFeed {
    let lines = split_logical_lines(text);
    let mut stats = DecodeStats {
        logical_lines: lines.len(),
        ..DecodeStats::default()
    };
    tracing::info!(logical_lines = lines.len(), "split feed into logical lines");

    if lines.len() < 2 {
        tracing::warn!("feed has no data lines");
        return DecodedFeed {
            stats,
            ..DecodedFeed::default()
        };
    }

    let mut headers = split_fields(&lines[0]);
    while headers.last().is_some_and(|h| h.trim().is_empty()) {
        headers.pop();
    }
    stats.header_count = headers.len();
    let first_headers = headers
        .iter()
        .take(5)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    tracing::info!(
        header_count = headers.len(),
        first_headers = %first_headers,
        "parsed feed header"
    );

    let mut records = Vec::with_capacity(lines.len() - 1);
    for (row, line) in lines.iter().enumerate().skip(1) {
        let mut values = split_fields(line);
        if values.len() < headers.len() {
            values.resize(headers.len(), String::new());
        }

        if values.len() != headers.len() {
            if stats.mismatches.len() < REPORTED_MISMATCHES {
                tracing::warn!(
                    row,
                    expected = headers.len(),
                    actual = values.len(),
                    "column count mismatch, skipping row"
                );
                stats.mismatches.push(ColumnMismatch {
                    row,
                    expected: headers.len(),
                    actual: values.len(),
                });
            }
            stats.skipped_rows += 1;
            continue;
        }

        records.push(RawRecord::from_pairs(headers.iter().cloned().zip(values)));
    }

    tracing::info!(
        skipped_rows = stats.skipped_rows,
        rows_parsed = records.len(),
        "decoded feed rows"
    );

    DecodedFeed {
        headers,
        records,
        stats,
    }
}

/// Splits text into logical lines, keeping line breaks that fall inside an
/// open quoted field. Blank lines are dropped.
fn split_logical_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in normalized.chars() {
        match ch {
            // A doubled quote toggles twice, so escaped quotes leave the
            // state unchanged.
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '\n' if !in_quotes => {
                if !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    if !current.trim().is_empty() {
        lines.push(current);
    }

    lines
}

/// Splits one logical line into fields on unquoted commas.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

/// Serializes records in the dialect [`decode`] reads.
///
/// Fields containing a comma, quote or line break are quoted with embedded
/// quotes doubled. A row that would otherwise render blank gets its first
/// field quoted so the decoder does not drop it.
#[must_use]
pub fn encode_records(headers: &[String], records: &[RawRecord]) -> String {
    let mut out = encode_line(headers.iter().map(String::as_str));
    out.push('\n');

    for record in records {
        let values = headers.iter().map(|h| record.get(h).unwrap_or(""));
        let mut line = encode_line(values);
        if line.trim().is_empty() {
            line.insert_str(0, "\"\"");
        }
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn encode_line<'a>(values: impl Iterator<Item = &'a str>) -> String {
    values.map(encode_field).collect::<Vec<_>>().join(",")
}

fn encode_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod tests;
