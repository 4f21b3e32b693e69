//! CSV serialization for [`Table`]
//!
//! The readers and writers follow the same shape as the rest of the crate's
//! I/O: one required core method over `BufRead`/`Write`, with string and file
//! conveniences layered on top. Quoting is RFC-4180 style — fields containing
//! commas, quotes, or line breaks are wrapped in double quotes, and embedded
//! quotes are doubled.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::error::{TableError, TableReadError, TableWriteError};
use super::Table;

/// Types that can be parsed from CSV.
///
/// Only [`from_csv_reader`](CsvRead::from_csv_reader) must be implemented;
/// the string and file forms delegate to it.
pub trait CsvRead: Sized {
    /// Parse from any buffered reader. The first record is the header row.
    fn from_csv_reader<R: BufRead>(reader: R) -> Result<Self, TableReadError>;

    /// Parse from an in-memory string.
    ///
    /// # Examples
    ///
    /// ```
    /// use faultsift::{CsvRead, Table};
    ///
    /// let table = Table::from_csv_string("Da,Dv\n0,1\n").unwrap();
    /// assert_eq!(table.num_rows(), 1);
    /// assert_eq!(table.cell(0, 1), "1");
    /// ```
    fn from_csv_string(s: &str) -> Result<Self, TableReadError> {
        use std::io::Cursor;
        Self::from_csv_reader(Cursor::new(s.as_bytes()))
    }

    /// Load from a file path.
    fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, TableReadError> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }
}

/// Types that can be serialized to CSV.
pub trait CsvWrite {
    /// Write to any writer, header row first.
    fn write_csv<W: Write>(&self, writer: &mut W) -> Result<(), TableWriteError>;

    /// Serialize to an in-memory string.
    fn to_csv_string(&self) -> Result<String, TableWriteError> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        // CSV output is produced from valid UTF-8 cells only
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write to a file path.
    fn to_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<(), TableWriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_csv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl CsvRead for Table {
    fn from_csv_reader<R: BufRead>(mut reader: R) -> Result<Self, TableReadError> {
        // Quoted fields may span lines, so parse the whole input as one
        // character stream instead of line by line.
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let mut records = parse_records(&text)?;
        if records.is_empty() {
            return Err(TableError::MissingHeader.into());
        }
        let header = records.remove(0);
        let mut table = Table::new(&header);
        for record in records {
            table.push_row(record);
        }
        Ok(table)
    }
}

impl CsvWrite for Table {
    fn write_csv<W: Write>(&self, writer: &mut W) -> Result<(), TableWriteError> {
        write_record(writer, self.columns().iter().map(|c| c.as_ref()))?;
        for row in 0..self.num_rows() {
            write_record(writer, self.row(row).iter().map(|c| c.as_str()))?;
        }
        Ok(())
    }
}

/// Split raw CSV text into records of fields.
///
/// Handles quoted fields (embedded commas, doubled quotes, embedded line
/// breaks) and both `\n` and `\r\n` record terminators. Fully blank records
/// are dropped, matching the leniency of spreadsheet exports that end with a
/// trailing newline.
fn parse_records(text: &str) -> Result<Vec<Vec<String>>, TableError> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_start_line = 0;
    let mut line = 1;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(ch),
            }
            continue;
        }
        match ch {
            '"' => {
                in_quotes = true;
                quote_start_line = line;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
            }
            '\r' => {
                // Consumed as part of a \r\n terminator; bare \r is ignored.
            }
            '\n' => {
                line += 1;
                record.push(std::mem::take(&mut field));
                if !(record.len() == 1 && record[0].is_empty()) {
                    records.push(std::mem::take(&mut record));
                } else {
                    record.clear();
                }
            }
            _ => field.push(ch),
        }
    }
    if in_quotes {
        return Err(TableError::UnterminatedQuote {
            line: quote_start_line,
        });
    }
    // Final record without a trailing newline
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

fn write_record<'a, W: Write>(
    writer: &mut W,
    fields: impl Iterator<Item = &'a str>,
) -> Result<(), TableWriteError> {
    for (i, fieldtext) in fields.enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        if fieldtext.contains(',') || fieldtext.contains('"') || fieldtext.contains('\n') {
            write!(writer, "\"{}\"", fieldtext.replace('"', "\"\""))?;
        } else {
            write!(writer, "{}", fieldtext)?;
        }
    }
    writeln!(writer)?;
    Ok(())
}
