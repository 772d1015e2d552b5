//! Delimited-text point record input
//!
//! Reads labeled points from LIDAR exports: one record per line, fields
//! separated by a delimiter, an optional header line. Only the label and the
//! three coordinate columns are decoded; every other field is ignored.

use crate::error::{IoError, IoResult};
use planecrate_core::{PointRecord, PointSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Supported field delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Space,
    Tab,
    Semicolon,
}

impl Delimiter {
    /// Get the character representation of the delimiter
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Space => ' ',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }

    /// Map a character to a delimiter
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ',' => Some(Delimiter::Comma),
            ' ' => Some(Delimiter::Space),
            '\t' => Some(Delimiter::Tab),
            ';' => Some(Delimiter::Semicolon),
            _ => None,
        }
    }
}

/// What to do with a row that cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Log the row and continue
    #[default]
    Skip,
    /// Stop with [`IoError::ParseError`]
    Fail,
}

/// Column layout of a record file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    pub label_column: usize,
    pub x_column: usize,
    pub y_column: usize,
    pub z_column: usize,
    /// Rows with a different number of fields are malformed
    pub expected_fields: Option<usize>,
    pub has_header: bool,
    pub delimiter: Delimiter,
    pub malformed_rows: MalformedRowPolicy,
}

impl Default for RecordLayout {
    /// The ten-column LIDAR export: label first, coordinates in the last three columns
    fn default() -> Self {
        Self {
            label_column: 0,
            x_column: 7,
            y_column: 8,
            z_column: 9,
            expected_fields: Some(10),
            has_header: true,
            delimiter: Delimiter::Comma,
            malformed_rows: MalformedRowPolicy::Skip,
        }
    }
}

impl RecordLayout {
    /// Fewest fields a row needs to contain every decoded column
    pub fn min_fields(&self) -> usize {
        [self.label_column, self.x_column, self.y_column, self.z_column]
            .into_iter()
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Reads [`PointSet`]s from delimited text
#[derive(Debug, Clone, Default)]
pub struct RecordReader {
    layout: RecordLayout,
}

impl RecordReader {
    pub fn new(layout: RecordLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    /// Read every record of the file at `path`
    pub fn read_point_set<P: AsRef<Path>>(&self, path: P) -> IoResult<PointSet> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IoError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => IoError::Io(e),
        })?;

        self.read_from(BufReader::new(file))
    }

    /// Read every record from a buffered reader
    pub fn read_from<R: BufRead>(&self, reader: R) -> IoResult<PointSet> {
        let mut points = PointSet::new();
        let mut skipped = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            if index == 0 && self.layout.has_header {
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            match self.parse_line(&line) {
                Ok(record) => points.push(record),
                Err(message) => match self.layout.malformed_rows {
                    MalformedRowPolicy::Skip => {
                        tracing::debug!(line = line_number, %message, "skipping malformed row");
                        skipped += 1;
                    }
                    MalformedRowPolicy::Fail => {
                        return Err(IoError::ParseError {
                            line: line_number,
                            message,
                        });
                    }
                },
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, read = points.len(), "skipped malformed rows");
        }

        Ok(points)
    }

    /// Decode one data row
    fn parse_line(&self, line: &str) -> Result<PointRecord, String> {
        // Repeated delimiters produce empty fields, which are dropped
        let fields: Vec<&str> = line
            .split(self.layout.delimiter.as_char())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();

        if let Some(expected) = self.layout.expected_fields {
            if fields.len() != expected {
                return Err(format!("expected {expected} fields, found {}", fields.len()));
            }
        }
        if fields.len() < self.layout.min_fields() {
            return Err(format!(
                "expected at least {} fields, found {}",
                self.layout.min_fields(),
                fields.len()
            ));
        }

        let number = |column: usize, name: &str| -> Result<f32, String> {
            let value = fields[column]
                .parse::<f32>()
                .map_err(|_| format!("invalid {name} value {:?}", fields[column]))?;
            if !value.is_finite() {
                return Err(format!("non-finite {name} value {:?}", fields[column]));
            }
            Ok(value)
        };

        let label = number(self.layout.label_column, "label")?;
        let x = number(self.layout.x_column, "x")?;
        let y = number(self.layout.y_column, "y")?;
        let z = number(self.layout.z_column, "z")?;

        Ok(PointRecord::new(x, y, z, label as i32))
    }
}

/// Read a LIDAR export with the default layout
pub fn read_point_set<P: AsRef<Path>>(path: P) -> IoResult<PointSet> {
    RecordReader::default().read_point_set(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    const EXPORT: &str = "\
label,a,b,c,d,e,f,x,y,z
1,0,0,0,0,0,0,0.5,1.5,2.5
2,0,0,0,0,0,0,-1.0,2.0,-3.0
";

    #[test]
    fn test_reads_label_and_coordinates() {
        let points = RecordReader::default().read_from(Cursor::new(EXPORT)).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].label, 1);
        assert_relative_eq!(points[0].position.x, 0.5);
        assert_relative_eq!(points[0].position.y, 1.5);
        assert_relative_eq!(points[0].position.z, 2.5);
        assert_eq!(points[1].label, 2);
        assert_relative_eq!(points[1].position.z, -3.0);
    }

    #[test]
    fn test_label_is_truncated() {
        let data = "header\n3.9,0,0,0,0,0,0,1,2,3\n";
        let points = RecordReader::default().read_from(Cursor::new(data)).unwrap();
        assert_eq!(points[0].label, 3);
    }

    #[test]
    fn test_wrong_field_count_is_skipped() {
        let data = "header\n1,2,3\n1,0,0,0,0,0,0,1,2,3\n\n1,0,0,0,0,0,0,1,2,3,4\n";
        let points = RecordReader::default().read_from(Cursor::new(data)).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_repeated_delimiters_are_collapsed() {
        let data = "header\n1,,0,0,0,0,0,0,1,2,3,\n";
        let points = RecordReader::default().read_from(Cursor::new(data)).unwrap();
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].position.z, 3.0);
    }

    #[test]
    fn test_non_finite_coordinates_are_malformed() {
        let data = "\
header
1,0,0,0,0,0,0,nan,inf,1
2,0,0,0,0,0,0,1,2,3
3,0,0,0,0,0,0,1,-inf,3
";
        let points = RecordReader::default().read_from(Cursor::new(data)).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].label, 2);

        let strict = RecordReader::new(RecordLayout {
            malformed_rows: MalformedRowPolicy::Fail,
            ..RecordLayout::default()
        });
        match strict.read_from(Cursor::new(data)) {
            Err(IoError::ParseError { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("non-finite x"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_policy_reports_line() {
        let layout = RecordLayout {
            malformed_rows: MalformedRowPolicy::Fail,
            ..RecordLayout::default()
        };
        let data = "header\n1,0,0,0,0,0,0,1,2,3\n1,0,0,0,0,0,0,1,oops,3\n";

        let result = RecordReader::new(layout).read_from(Cursor::new(data));
        match result {
            Err(IoError::ParseError { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("oops"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_headerless_space_separated() {
        let layout = RecordLayout {
            label_column: 3,
            x_column: 0,
            y_column: 1,
            z_column: 2,
            expected_fields: None,
            has_header: false,
            delimiter: Delimiter::Space,
            malformed_rows: MalformedRowPolicy::Fail,
        };
        let data = "1.0  2.0 3.0 7\n4 5 6 8 extra\n";

        let points = RecordReader::new(layout).read_from(Cursor::new(data)).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].label, 8);
        assert_relative_eq!(points[0].position.y, 2.0);
    }

    #[test]
    fn test_delimiter_from_char() {
        assert_eq!(Delimiter::from_char(','), Some(Delimiter::Comma));
        assert_eq!(Delimiter::from_char('\t'), Some(Delimiter::Tab));
        assert_eq!(Delimiter::from_char(';'), Some(Delimiter::Semicolon));
        assert_eq!(Delimiter::from_char('|'), None);
    }

    #[test]
    fn test_min_fields() {
        assert_eq!(RecordLayout::default().min_fields(), 10);
    }
}
