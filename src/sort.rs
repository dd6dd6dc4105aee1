//! Selection-sort ordering of countries.
//!
//! Sorting never touches the store: [`sort_by`] returns a new list of
//! borrowed records. The algorithm is a plain O(n²) selection sort that
//! rotates the selected element into place, so equal keys keep their
//! original relative order.

use std::cmp::Ordering;
use std::fmt;

use crate::record::Country;

/// Field to order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Population,
    Area,
}

impl SortKey {
    fn compare(&self, a: &Country, b: &Country) -> Ordering {
        match self {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Population => a.population.cmp(&b.population),
            SortKey::Area => a.area.cmp(&b.area),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Population => write!(f, "population"),
            SortKey::Area => write!(f, "area"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Interpret a yes/no answer to "ascending?".
    ///
    /// Only an affirmative answer means ascending. Anything else, including
    /// garbage, means descending.
    pub fn from_answer(answer: &str) -> Self {
        if is_affirmative(answer) {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// True for `s`, `si`, `sí`, `y` or `yes`, ignoring case and padding.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

/// Stable selection sort.
///
/// `precedes(a, b)` must be a strict "a goes before b" test. For each
/// position the first element that no later element strictly precedes is
/// rotated into place.
pub fn selection_sort_by<T, F>(items: &mut [T], mut precedes: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let n = items.len();
    for i in 0..n.saturating_sub(1) {
        let mut selected = i;
        for j in (i + 1)..n {
            if precedes(&items[j], &items[selected]) {
                selected = j;
            }
        }
        if selected != i {
            items[i..=selected].rotate_right(1);
        }
    }
}

/// Return `countries` ordered by `key`. The input is left untouched.
pub fn sort_by(countries: &[Country], key: SortKey, order: SortOrder) -> Vec<&Country> {
    let mut sorted: Vec<&Country> = countries.iter().collect();
    let wanted = match order {
        SortOrder::Ascending => Ordering::Less,
        SortOrder::Descending => Ordering::Greater,
    };
    selection_sort_by(&mut sorted, |a, b| key.compare(a, b) == wanted);
    sorted
}
