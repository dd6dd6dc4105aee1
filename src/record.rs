//! Country records and the validator that builds them from raw text.
//!
//! Every `Country` in the store went through [`validate_row`], so its name
//! and continent are normalized and non-empty and its numbers are
//! non-negative.

use std::fmt;

use crate::error::ValidationError;

/// The four columns of a country record, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Population,
    Area,
    Continent,
}

impl Field {
    /// Column name as written in the CSV header.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Name => "nombre",
            Field::Population => "poblacion",
            Field::Area => "superficie",
            Field::Continent => "continente",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// The numeric columns, usable in range filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Population,
    Area,
}

impl NumericField {
    pub fn value_of(&self, country: &Country) -> u64 {
        match self {
            NumericField::Population => country.population,
            NumericField::Area => country.area,
        }
    }
}

impl From<NumericField> for Field {
    fn from(field: NumericField) -> Self {
        match field {
            NumericField::Population => Field::Population,
            NumericField::Area => Field::Area,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericField::Population => write!(f, "population"),
            NumericField::Area => write!(f, "area"),
        }
    }
}

/// One country entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Country {
    pub name: String,
    pub population: u64,
    /// Surface in km².
    pub area: u64,
    pub continent: String,
}

impl Country {
    /// Validate and build a country from raw field text.
    pub fn new(
        name: &str,
        population: &str,
        area: &str,
        continent: &str,
    ) -> Result<Self, ValidationError> {
        validate_row([name, population, area, continent])
    }

    /// Case-insensitive name equality.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == normalize(name).to_lowercase()
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name
            .to_lowercase()
            .contains(&normalize(needle).to_lowercase())
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True if `s`, once normalized, is a non-empty run of ASCII digits.
pub fn is_non_negative_integer(s: &str) -> bool {
    let s = normalize(s);
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a non-negative integer, or `None` if the text is not one or does
/// not fit in a `u64`.
pub fn parse_non_negative(s: &str) -> Option<u64> {
    if !is_non_negative_integer(s) {
        return None;
    }
    normalize(s).parse().ok()
}

/// Build a `Country` from raw `[name, population, area, continent]` text.
///
/// Text fields are checked before numeric ones, so a row that is wrong in
/// both ways reports the empty field.
pub fn validate_row(fields: [&str; 4]) -> Result<Country, ValidationError> {
    let [name, population, area, continent] = fields;

    let name = normalize(name);
    if name.is_empty() {
        return Err(ValidationError::EmptyRequiredField(Field::Name));
    }
    let continent = normalize(continent);
    if continent.is_empty() {
        return Err(ValidationError::EmptyRequiredField(Field::Continent));
    }

    let population = numeric(Field::Population, population)?;
    let area = numeric(Field::Area, area)?;

    Ok(Country {
        name,
        population,
        area,
        continent,
    })
}

fn numeric(field: Field, raw: &str) -> Result<u64, ValidationError> {
    parse_non_negative(raw).ok_or_else(|| ValidationError::InvalidNumericField {
        field,
        value: raw.to_string(),
    })
}
