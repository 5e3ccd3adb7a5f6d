//! CSV rule source: `Language,Dialect,<grapheme>,<grapheme>,...`

use std::collections::HashSet;

use csv_core::ReadFieldResult;

use super::{RuleError, RuleTable, RuleTableBuilder};

const LANGUAGE_COLUMN: &str = "Language";
const DIALECT_COLUMN: &str = "Dialect";

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Split CSV bytes into records, returning each with its 1-based row number.
///
/// Quoted fields may contain commas. Blank lines are skipped and not counted.
/// Every field must be valid UTF-8.
fn read_records(input: &[u8]) -> Result<Vec<(usize, Vec<String>)>, RuleError> {
    let mut rdr = csv_core::Reader::new();
    let mut bytes = input;
    let mut output = [0; 4096];
    let mut field = Vec::new();
    let mut record = Vec::new();
    let mut records = Vec::new();

    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        bytes = &bytes[nin..];
        field.extend_from_slice(&output[..nout]);
        match result {
            // an empty slice on the next call signals end of input
            ReadFieldResult::InputEmpty | ReadFieldResult::OutputFull => {}
            ReadFieldResult::Field { record_end } => {
                let value = String::from_utf8(std::mem::take(&mut field)).map_err(|_| {
                    RuleError::InvalidUtf8 {
                        row: records.len() + 1,
                    }
                })?;
                record.push(value);
                if record_end {
                    let fields = std::mem::take(&mut record);
                    if !(fields.len() == 1 && fields[0].is_empty()) {
                        records.push((records.len() + 1, fields));
                    }
                }
            }
            ReadFieldResult::End => break,
        }
    }

    Ok(records)
}

/// Parse a CSV rule source into a `RuleTable` using `builder`'s placeholder.
pub(super) fn parse_rule_csv(
    input: &[u8],
    mut builder: RuleTableBuilder,
) -> Result<RuleTable, RuleError> {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    let mut records = read_records(input)?.into_iter();

    let (_, header) = records.next().ok_or(RuleError::MissingHeader)?;
    let header: Vec<&str> = header.iter().map(|h| h.trim()).collect();
    let language_col = column_index(&header, LANGUAGE_COLUMN)?;
    let dialect_col = column_index(&header, DIALECT_COLUMN)?;

    let mut seen = HashSet::new();
    for (i, name) in header.iter().enumerate() {
        if name.is_empty() {
            return Err(RuleError::EmptyHeader { column: i + 1 });
        }
        if !seen.insert(*name) {
            return Err(RuleError::DuplicateHeader(name.to_string()));
        }
    }

    for (row, fields) in records {
        if fields.len() != header.len() {
            return Err(RuleError::FieldCount {
                row,
                expected: header.len(),
                found: fields.len(),
            });
        }
        let language = fields[language_col].trim();
        if language.is_empty() {
            return Err(RuleError::MissingLanguage { row });
        }
        let cells = header
            .iter()
            .zip(&fields)
            .enumerate()
            .filter(|(i, _)| *i != language_col && *i != dialect_col)
            .map(|(_, (name, cell))| (*name, cell.as_str()));
        builder.add_row(language, Some(fields[dialect_col].as_str()), cells)?;
    }

    Ok(builder.build())
}

fn column_index(header: &[&str], name: &'static str) -> Result<usize, RuleError> {
    header
        .iter()
        .position(|h| *h == name)
        .ok_or(RuleError::MissingColumn(name))
}
