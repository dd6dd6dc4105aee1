//! Read-only queries over a slice of countries.
//!
//! Every function returns borrowed records in the order they appear in
//! the input.

use tracing::debug;

use crate::error::{QueryError, RangeBound};
use crate::record::{Country, NumericField, normalize, parse_non_negative};

/// Countries whose name contains `needle`, ignoring case.
pub fn search<'a>(countries: &'a [Country], needle: &str) -> Vec<&'a Country> {
    countries.iter().filter(|c| c.name_contains(needle)).collect()
}

/// Countries whose continent equals `continent`, ignoring case.
pub fn filter_by_continent<'a>(countries: &'a [Country], continent: &str) -> Vec<&'a Country> {
    let wanted = normalize(continent).to_lowercase();
    countries
        .iter()
        .filter(|c| c.continent.to_lowercase() == wanted)
        .collect()
}

/// Countries with `low <= field <= high`.
///
/// A missing or blank bound leaves that side open. A bound that is not a
/// non-negative integer rejects the whole query.
pub fn filter_by_range<'a>(
    countries: &'a [Country],
    field: NumericField,
    low: Option<&str>,
    high: Option<&str>,
) -> Result<Vec<&'a Country>, QueryError> {
    let low = parse_bound(RangeBound::Lower, low)?;
    let high = parse_bound(RangeBound::Upper, high)?;
    debug!(%field, ?low, ?high, "range filter");

    Ok(countries
        .iter()
        .filter(|c| {
            let value = field.value_of(c);
            low.is_none_or(|low| value >= low) && high.is_none_or(|high| value <= high)
        })
        .collect())
}

fn parse_bound(bound: RangeBound, raw: Option<&str>) -> Result<Option<u64>, QueryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_non_negative(value)
            .map(Some)
            .ok_or_else(|| QueryError::InvalidBound {
                bound,
                value: value.to_string(),
            }),
    }
}

/// Summary figures for a non-empty dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics<'a> {
    /// Highest population; the first one wins a tie.
    pub most_populous: &'a Country,
    /// Lowest population; the first one wins a tie.
    pub least_populous: &'a Country,
    pub mean_population: f64,
    pub mean_area: f64,
    /// Country count per exact continent spelling, in order of first
    /// appearance.
    pub per_continent: Vec<(String, usize)>,
}

/// Compute [`Statistics`] in a single pass.
pub fn statistics(countries: &[Country]) -> Result<Statistics<'_>, QueryError> {
    let (first, _) = countries.split_first().ok_or(QueryError::EmptyDataset)?;

    let mut most_populous = first;
    let mut least_populous = first;
    let mut total_population: u128 = 0;
    let mut total_area: u128 = 0;
    let mut per_continent: Vec<(String, usize)> = Vec::new();

    for country in countries {
        if country.population > most_populous.population {
            most_populous = country;
        }
        if country.population < least_populous.population {
            least_populous = country;
        }
        total_population += u128::from(country.population);
        total_area += u128::from(country.area);

        match per_continent
            .iter_mut()
            .find(|(label, _)| *label == country.continent)
        {
            Some((_, count)) => *count += 1,
            None => per_continent.push((country.continent.clone(), 1)),
        }
    }

    let n = countries.len() as f64;
    Ok(Statistics {
        most_populous,
        least_populous,
        mean_population: total_population as f64 / n,
        mean_area: total_area as f64 / n,
        per_continent,
    })
}
