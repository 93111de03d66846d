//! CSV ping source.
//!
//! Reads the sorted dataset: one row per ping with the header columns
//! `id_object`, `latitude`, `longitude`, `online` and `date`. Other columns
//! are ignored. Rows are yielded in file order, single pass.

use crate::error::{CoreError, CoreResult};
use crate::types::{ObjectPing, Ping};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Timestamp layouts with an explicit offset, tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%:z"];

/// Timestamp layouts without offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Deserialize)]
struct PingRow {
    id_object: String,
    latitude: f64,
    longitude: f64,
    online: String,
    date: String,
}

/// Iterator over the pings of a CSV dataset.
///
/// # Example
///
/// ```rust
/// use tracksets_core::PingSource;
///
/// let csv = "id_object,latitude,longitude,online,date\n\
///            A,10.5,20.25,1,2020-01-01 00:00:00\n";
/// let pings: Vec<_> = PingSource::from_reader(csv.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(pings.len(), 1);
/// assert!(pings[0].ping.online);
/// ```
pub struct PingSource<R: Read> {
    rows: csv::DeserializeRecordsIntoIter<R, PingRow>,
    row: u64,
}

impl PingSource<File> {
    /// Opens a CSV dataset file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open(path: &Path) -> CoreResult<Self> {
        let reader = csv::Reader::from_path(path)?;
        Ok(Self {
            rows: reader.into_deserialize(),
            row: 0,
        })
    }
}

impl<R: Read> PingSource<R> {
    /// Reads a CSV dataset from any reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            rows: csv::Reader::from_reader(reader).into_deserialize(),
            row: 0,
        }
    }

    fn convert(&self, row: PingRow) -> CoreResult<ObjectPing> {
        let timestamp = parse_timestamp(&row.date).ok_or_else(|| {
            CoreError::invalid_record(self.row, format!("unparseable date {:?}", row.date))
        })?;

        Ok(ObjectPing {
            object_id: row.id_object,
            ping: Ping::new(row.latitude, row.longitude, row.online == "1", timestamp),
        })
    }
}

impl<R: Read> Iterator for PingSource<R> {
    type Item = CoreResult<ObjectPing>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        self.row += 1;
        Some(row.map_err(CoreError::from).and_then(|row| self.convert(row)))
    }
}

/// Counts the data rows of a CSV file without parsing them.
///
/// Used to report build progress as a percentage.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn count_rows(path: &Path) -> CoreResult<u64> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut record = csv::ByteRecord::new();
    let mut rows = 0;
    while reader.read_byte_record(&mut record)? {
        rows += 1;
    }
    Ok(rows)
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339, the same with a space separator, and offset-less
/// date-times or bare dates, which are taken as UTC.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&parsed));
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
}
