use crate::domain::model::{ImportFormat, RawRecord};
use crate::utils::error::{ImportError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    pub delimiter: u8,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Forward-only record source over one import file.
///
/// CSV sources are pulled one row at a time from the open file handle. JSON
/// sources are parsed as a whole document when opened and then handed out
/// record by record.
pub enum RowReader {
    Csv(CsvRowReader<File>),
    Json(JsonRowReader),
}

impl RowReader {
    /// The format is checked before the path is touched, so an XML request
    /// never opens the file.
    pub fn open(path: &Path, format: ImportFormat, options: ReaderOptions) -> Result<Self> {
        match format {
            ImportFormat::Csv => {
                let file = open_source(path)?;
                Ok(RowReader::Csv(CsvRowReader::from_reader(
                    file,
                    options.delimiter,
                )?))
            }
            ImportFormat::Json => {
                let file = open_source(path)?;
                Ok(RowReader::Json(JsonRowReader::from_reader(BufReader::new(file))?))
            }
            ImportFormat::Xml => Err(ImportError::UnimplementedFormat {
                format: format.to_string(),
            }),
        }
    }
}

impl Iterator for RowReader {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RowReader::Csv(reader) => reader.next(),
            RowReader::Json(reader) => reader.next(),
        }
    }
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| ImportError::SourceUnreadable {
        path: path.display().to_string(),
        source,
    })
}

pub struct CsvRowReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    row: StringRecord,
    yielded: usize,
    done: bool,
}

impl<R: Read> CsvRowReader<R> {
    /// Reads the header row eagerly; data rows are read on demand.
    pub fn from_reader(rdr: R, delimiter: u8) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .trim(Trim::Headers)
            .from_reader(rdr);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ImportError::MalformedDocument {
                message: format!("unreadable header row: {}", e),
            })?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();

        Ok(Self {
            reader,
            headers,
            row: StringRecord::new(),
            yielded: 0,
            done: false,
        })
    }

    fn to_raw_record(&self) -> RawRecord {
        let line = self.row.position().map(|p| p.line());
        let mut raw = RawRecord::new(self.yielded, line);
        // Short rows leave trailing headers absent; extra fields are dropped.
        for (header, value) in self.headers.iter().zip(self.row.iter()) {
            raw.insert(header.clone(), value);
        }
        raw
    }
}

impl<R: Read> Iterator for CsvRowReader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.reader.read_record(&mut self.row) {
                Ok(false) => self.done = true,
                Ok(true) => {
                    if self.row.iter().all(|field| field.trim().is_empty()) {
                        continue;
                    }
                    self.yielded += 1;
                    return Some(Ok(self.to_raw_record()));
                }
                Err(e) => {
                    self.yielded += 1;
                    if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                        self.done = true;
                    }
                    return Some(Err(ImportError::MalformedRow {
                        line: e.position().map(|p| p.line()),
                        message: e.to_string(),
                    }));
                }
            }
        }
        None
    }
}

pub struct JsonRowReader {
    records: std::vec::IntoIter<RawRecord>,
}

impl JsonRowReader {
    /// Parses the whole document; it must be an array of objects.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let document: Value =
            serde_json::from_reader(rdr).map_err(|e| ImportError::MalformedDocument {
                message: e.to_string(),
            })?;

        let Value::Array(items) = document else {
            return Err(ImportError::MalformedDocument {
                message: "expected a top-level JSON array".to_string(),
            });
        };

        let mut records = Vec::with_capacity(items.len());
        for (position, item) in items.into_iter().enumerate() {
            let Value::Object(object) = item else {
                return Err(ImportError::MalformedDocument {
                    message: format!("element {} is not an object", position),
                });
            };

            let mut raw = RawRecord::new(position + 1, None);
            for (key, value) in object {
                if let Some(value) = field_text(value) {
                    raw.insert(key, value);
                }
            }
            records.push(raw);
        }

        Ok(Self {
            records: records.into_iter(),
        })
    }
}

impl Iterator for JsonRowReader {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(Ok)
    }
}

/// `null` counts as an absent key.
fn field_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
