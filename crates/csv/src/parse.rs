//! Parse: raw delimited text into rows and canonical-keyed records.

use crate::record::{CsvRecord, Field, simplify_header};

/// Splits raw text into rows of string fields.
///
/// RFC4180-like and permissive: `,` separates fields; `\n`, `\r\n`, or a
/// lone `\r` separates rows; `"` opens a quoted span wherever it appears
/// outside one. Inside quotes, `""` is a literal quote. An unterminated
/// quote at end of input is treated as closed rather than an error.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\n' => end_row(&mut rows, &mut row, &mut field),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                end_row(&mut rows, &mut row, &mut field);
            }
            _ => field.push(c),
        }
    }

    // Flush the in-progress field/row so inputs without a trailing newline
    // still yield their last row.
    if !field.is_empty() || !row.is_empty() {
        end_row(&mut rows, &mut row, &mut field);
    }
    rows
}

fn end_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>, field: &mut String) {
    row.push(std::mem::take(field));
    rows.push(std::mem::take(row));
}

/// Parses delimited text into canonical-keyed records.
///
/// Row 0 is the header row: each cell is simplified and run through the
/// alias table, and unmapped columns are dropped from every record. Data
/// rows whose cells are all blank are skipped. Cells missing from short
/// rows come back as empty strings under their mapped key.
///
/// Returns an empty sequence for input with no rows at all; callers decide
/// whether that is a "no rows found" rejection.
pub fn parse(text: &str) -> Vec<CsvRecord> {
    let rows = parse_rows(text);
    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };
    let columns: Vec<Option<Field>> = header
        .iter()
        .map(|cell| Field::from_alias(&simplify_header(cell)))
        .collect();

    let mut records = Vec::new();
    for row in data {
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let mut record = CsvRecord::new();
        for (idx, column) in columns.iter().enumerate() {
            let Some(field) = column else { continue };
            let value = row.get(idx).cloned().unwrap_or_default();
            record.set(*field, value);
        }
        records.push(record);
    }
    records
}
