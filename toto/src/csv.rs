//! Utilities for working with CSV files.
//!
//! Fields are separated by commas, one record per line. Quoting is not supported.

use std::io;
use std::io::{BufRead, Lines};

const BYTE_ORDER_MARK: char = '\u{feff}';

pub struct CsvReader<R> {
    lines: Lines<R>,
}
impl<R: BufRead> CsvReader<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    pub fn read(&mut self) -> Option<Result<Vec<String>, io::Error>> {
        self.lines
            .next()
            .map(|line| line.map(|line| line.split(',').map(ToString::to_string).collect()))
    }
}

impl<R: BufRead> Iterator for CsvReader<R> {
    type Item = Result<Vec<String>, io::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

/// Column names from the first record of a file, used to locate fields by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    columns: Vec<String>,
}
impl Header {
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|existing| existing == column)
    }
}

impl From<Vec<String>> for Header {
    fn from(record: Vec<String>) -> Self {
        let columns = record
            .into_iter()
            .map(|column| column.trim().trim_start_matches(BYTE_ORDER_MARK).trim().to_string())
            .collect();
        Self { columns }
    }
}

/// Returns the trimmed field at `index`, or `None` if the record is too short or the field is blank.
pub fn field(record: &[String], index: usize) -> Option<&str> {
    record
        .get(index)
        .map(|datum| datum.trim())
        .filter(|datum| !datum.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_records() {
        let mut reader = CsvReader::from_reader("a,b,c\n1,,3\r\nx".as_bytes());
        assert_eq!(vec!["a", "b", "c"], reader.next().unwrap().unwrap());
        assert_eq!(vec!["1", "", "3"], reader.next().unwrap().unwrap());
        assert_eq!(vec!["x"], reader.next().unwrap().unwrap());
        assert!(reader.next().is_none());
    }

    #[test]
    fn header_strips_byte_order_mark() {
        let header = Header::from(vec![
            "\u{feff}Div".to_string(),
            " HomeTeam ".to_string(),
            "FTHG".to_string(),
        ]);
        assert_eq!(Some(0), header.position("Div"));
        assert_eq!(Some(1), header.position("HomeTeam"));
        assert_eq!(Some(2), header.position("FTHG"));
        assert_eq!(None, header.position("FTAG"));
    }

    #[test]
    fn field_blank_or_missing() {
        let record = vec!["Ajax".to_string(), "  ".to_string()];
        assert_eq!(Some("Ajax"), field(&record, 0));
        assert_eq!(None, field(&record, 1));
        assert_eq!(None, field(&record, 2));
    }
}
