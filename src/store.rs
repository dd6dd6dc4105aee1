//! The in-memory dataset.
//!
//! `Store` owns every record. Positions are append-only: `add` pushes to
//! the end and `update` edits in place, so the order of a store is always
//! the order records were loaded or added. There is no delete.

use tracing::info;

use crate::error::StoreError;
use crate::record::Country;

/// Values to change on an existing record. `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountryUpdate {
    pub population: Option<u64>,
    pub area: Option<u64>,
}

impl CountryUpdate {
    /// True if neither value would change.
    pub fn is_empty(&self) -> bool {
        self.population.is_none() && self.area.is_none()
    }

    fn apply(&self, country: &mut Country) {
        if let Some(population) = self.population {
            country.population = population;
        }
        if let Some(area) = self.area {
            country.area = area;
        }
    }
}

/// Ordered collection of validated countries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    countries: Vec<Country>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-validated records. Duplicate names are kept as-is.
    pub fn from_records(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    /// Replace the whole contents, as a re-load does.
    pub fn replace(&mut self, countries: Vec<Country>) {
        self.countries = countries;
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn as_slice(&self) -> &[Country] {
        &self.countries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Country> {
        self.countries.iter()
    }

    /// True if a record has this name, ignoring case.
    pub fn contains_name(&self, name: &str) -> bool {
        self.countries.iter().any(|c| c.has_name(name))
    }

    /// Append `candidate` unless its name is already taken.
    pub fn add(&mut self, candidate: Country) -> Result<&Country, StoreError> {
        if self.contains_name(&candidate.name) {
            return Err(StoreError::DuplicateName(candidate.name));
        }
        info!(name = %candidate.name, "country added");
        self.countries.push(candidate);
        Ok(&self.countries[self.countries.len() - 1])
    }

    /// Records whose name contains `needle`, ignoring case, in store order.
    ///
    /// This is the candidate list that `update` selections index into.
    pub fn matches(&self, needle: &str) -> Vec<&Country> {
        self.countries
            .iter()
            .filter(|c| c.name_contains(needle))
            .collect()
    }

    /// Apply `changes` to the `selection`-th (1-based) record whose name
    /// contains `needle`.
    pub fn update(
        &mut self,
        needle: &str,
        selection: usize,
        changes: CountryUpdate,
    ) -> Result<&Country, StoreError> {
        let candidates: Vec<usize> = self
            .countries
            .iter()
            .enumerate()
            .filter(|(_, c)| c.name_contains(needle))
            .map(|(i, _)| i)
            .collect();

        if candidates.is_empty() {
            return Err(StoreError::NotFound(needle.to_string()));
        }
        let index = selection
            .checked_sub(1)
            .and_then(|i| candidates.get(i).copied())
            .ok_or(StoreError::InvalidSelection {
                selection,
                candidates: candidates.len(),
            })?;

        let country = &mut self.countries[index];
        changes.apply(country);
        info!(
            name = %country.name,
            population = country.population,
            area = country.area,
            "country updated"
        );
        Ok(&*country)
    }
}
