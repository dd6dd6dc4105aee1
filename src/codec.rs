//! CSV persistence for the country dataset.
//!
//! File format:
//! ```text
//! nombre,poblacion,superficie,continente
//! Spain,47000000,505990,Europe
//! Chad,17000000,1284000,Africa
//! ```
//!
//! - The header must match the four columns above, in order. Case is
//!   ignored on read; the header is always written lowercase.
//! - A bad header aborts the load and yields an empty dataset.
//! - A bad data row is skipped with a diagnostic; the rest of the file
//!   still loads.
//! - Loading a path that does not exist yields an empty dataset.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{debug, warn};

use crate::error::{CodecError, LoadDiagnostic};
use crate::record::{Country, validate_row};

/// Required column sequence.
pub const HEADER: [&str; 4] = ["nombre", "poblacion", "superficie", "continente"];

/// Result of a load: the records that passed validation plus everything
/// that was skipped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub countries: Vec<Country>,
    pub diagnostics: Vec<LoadDiagnostic>,
}

impl LoadReport {
    fn rejected(diagnostic: LoadDiagnostic) -> Self {
        warn!("{diagnostic}");
        Self {
            countries: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }
}

/// Load a dataset from `path`. Never fails; see [`LoadReport`].
pub fn load(path: impl AsRef<Path>) -> LoadReport {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "dataset file not found, starting empty");
            return LoadReport::default();
        }
        Err(e) => {
            return LoadReport::rejected(LoadDiagnostic::Unreadable {
                message: format!("{}: {e}", path.display()),
            });
        }
    };

    let report = load_from_reader(file);
    debug!(
        path = %path.display(),
        loaded = report.countries.len(),
        skipped = report.diagnostics.len(),
        "dataset loaded"
    );
    report
}

/// Load a dataset from any reader.
pub fn load_from_reader<R: Read>(reader: R) -> LoadReport {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader);

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            return LoadReport::rejected(LoadDiagnostic::Unreadable {
                message: e.to_string(),
            });
        }
    };
    if !header_matches(&headers) {
        return LoadReport::rejected(LoadDiagnostic::HeaderMismatch {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut report = LoadReport::default();
    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        let diagnostic = match result {
            Ok(record) => match validate_row(row_fields(&record)) {
                Ok(country) => {
                    report.countries.push(country);
                    continue;
                }
                Err(reason) => LoadDiagnostic::SkippedRow { row, reason },
            },
            Err(e) => LoadDiagnostic::MalformedRow {
                row,
                message: e.to_string(),
            },
        };
        warn!("{diagnostic}");
        report.diagnostics.push(diagnostic);
    }
    report
}

fn header_matches(headers: &StringRecord) -> bool {
    headers.len() == HEADER.len()
        && headers
            .iter()
            .zip(HEADER)
            .all(|(found, expected)| found.to_lowercase() == expected)
}

/// Missing trailing fields read as empty; extra ones are ignored.
fn row_fields(record: &StringRecord) -> [&str; 4] {
    let field = |i: usize| record.get(i).unwrap_or("");
    [field(0), field(1), field(2), field(3)]
}

/// Write `countries` to `path`, replacing any existing file.
///
/// The rows are encoded in memory first, so any failure touching the disk
/// is reported as [`CodecError::Io`] with the path.
pub fn save(path: impl AsRef<Path>, countries: &[Country]) -> Result<(), CodecError> {
    let path = path.as_ref();
    let mut buffer = Vec::new();
    save_to_writer(&mut buffer, countries)?;
    fs::write(path, buffer).map_err(|source| CodecError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), rows = countries.len(), "dataset saved");
    Ok(())
}

/// Write the header and one row per country to `writer`.
pub fn save_to_writer<W: Write>(writer: W, countries: &[Country]) -> Result<(), csv::Error> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(HEADER)?;
    for country in countries {
        let population = country.population.to_string();
        let area = country.area.to_string();
        writer.write_record([
            country.name.as_str(),
            population.as_str(),
            area.as_str(),
            country.continent.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
