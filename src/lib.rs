//! # countries-rs
//!
//! An interactive manager for a small CSV dataset of countries.
//!
//! Each record has a name, a population, an area in km² and a continent.
//! The dataset lives in memory in a [`Store`] and is read from and written
//! to a fixed four-column CSV file.
//!
//! ## Overview
//!
//! - **Validation**: raw text is normalized and checked before it becomes a
//!   [`Country`]
//! - **Persistence**: strict header check on load, bad rows skipped with a
//!   diagnostic
//! - **Queries**: substring search, continent and range filters, statistics
//! - **Ordering**: a stable selection sort over name, population or area
//!
//! ## Example
//!
//! ```
//! use countries_rs::{
//!     NumericField, SortKey, SortOrder, filter_by_range, load_from_reader, sort_by,
//! };
//!
//! let csv = "nombre,poblacion,superficie,continente\n\
//!            Spain,47,505,Europe\n\
//!            chad,17,1284,Africa\n";
//!
//! let report = load_from_reader(csv.as_bytes());
//! assert_eq!(report.countries.len(), 2);
//!
//! let large = filter_by_range(&report.countries, NumericField::Area, Some("1000"), None).unwrap();
//! assert_eq!(large[0].name, "chad");
//!
//! let by_name = sort_by(&report.countries, SortKey::Name, SortOrder::Ascending);
//! assert_eq!(by_name[0].name, "chad");
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod query;
pub mod record;
pub mod shell;
pub mod sort;
pub mod store;

pub use codec::{HEADER, LoadReport, load, load_from_reader, save, save_to_writer};
pub use config::{DEFAULT_DATASET_FILE, Settings};
pub use error::{CodecError, LoadDiagnostic, QueryError, RangeBound, StoreError, ValidationError};
pub use query::{Statistics, filter_by_continent, filter_by_range, search, statistics};
pub use record::{
    Country, Field, NumericField, is_non_negative_integer, normalize, parse_non_negative,
    validate_row,
};
pub use shell::Shell;
pub use sort::{SortKey, SortOrder, is_affirmative, selection_sort_by, sort_by};
pub use store::{CountryUpdate, Store};
