//! Collection filter - narrows an in-memory list by a free-text query and
//! categorical selectors.
//!
//! Filtering is a pure function of the records, the query and the selectors.
//! A record is kept iff it matches the query (case-insensitive substring over
//! the entity's search fields, vacuously true for an empty query) AND every
//! active selector (exact equality on the field's display value). Input order
//! is preserved.

use crate::errors::{Error, Result};
use std::{borrow::Cow, collections::BTreeMap, fmt, str::FromStr};

/// A record type that the collection filter can operate on.
pub trait Filterable {
    /// Fields a selector can target.
    type Field: Copy + Ord + fmt::Debug + FromStr<Err = Error> + 'static;

    /// Human-readable entity name used in error messages.
    const ENTITY: &'static str;

    /// Fields the free-text query is matched against.
    const SEARCH_FIELDS: &'static [Self::Field];

    /// Display value of `field` for this record.
    fn field_value(&self, field: Self::Field) -> Cow<'_, str>;
}

/// A categorical selector. `All` is the only inactive value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selector {
    /// Matches every record
    #[default]
    All,
    /// Matches records whose field equals the value exactly
    Is(String),
}

impl Selector {
    /// Sentinel a host dropdown uses for "no restriction".
    pub const ALL: &'static str = "all";

    /// Interprets a raw dropdown value. Only [`Selector::ALL`] is inactive;
    /// an empty string selects records whose field is empty.
    #[must_use]
    pub fn from_host(value: &str) -> Self {
        if value == Self::ALL {
            Self::All
        } else {
            Self::Is(value.to_string())
        }
    }

    /// Shorthand for an active selector.
    #[must_use]
    pub fn is(value: impl Into<String>) -> Self {
        Self::Is(value.into())
    }

    /// Whether this selector restricts anything.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Is(_))
    }

    /// Whether `value` passes this selector.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Is(expected) => expected == value,
        }
    }
}

/// Selector per field. Setting a field again replaces the previous selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors<F: Ord> {
    by_field: BTreeMap<F, Selector>,
}

impl<F: Ord> Default for Selectors<F> {
    fn default() -> Self {
        Self {
            by_field: BTreeMap::new(),
        }
    }
}

impl<F: Copy + Ord + FromStr<Err = Error>> Selectors<F> {
    /// Creates an empty selector set (everything inactive).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selector for `field`.
    pub fn set(&mut self, field: F, selector: Selector) -> &mut Self {
        self.by_field.insert(field, selector);
        self
    }

    /// Returns the selector for `field`, `All` when none was set.
    #[must_use]
    pub fn get(&self, field: F) -> &Selector {
        const ALL: &Selector = &Selector::All;
        self.by_field.get(&field).unwrap_or(ALL)
    }

    /// Iterates over the selectors that actually restrict something.
    pub fn active(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.by_field.iter().filter_map(|(field, selector)| match selector {
            Selector::Is(value) => Some((*field, value.as_str())),
            Selector::All => None,
        })
    }

    /// Parses host-supplied `field=value` pairs.
    ///
    /// # Errors
    /// Returns [`Error::InvalidValue`] for a pair without `=`, or the field
    /// type's parse error (normally [`Error::UnknownField`]).
    pub fn parse<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selectors = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (field, value) = pair.split_once('=').ok_or_else(|| Error::InvalidValue {
                kind: "selector",
                value: pair.to_string(),
            })?;
            selectors.set(field.trim().parse()?, Selector::from_host(value.trim()));
        }
        Ok(selectors)
    }
}

/// Query and selectors as held by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState<F: Ord> {
    /// Free-text query, possibly empty
    pub query: String,
    /// Categorical selectors
    pub selectors: Selectors<F>,
}

impl<F: Ord> Default for FilterState<F> {
    fn default() -> Self {
        Self {
            query: String::new(),
            selectors: Selectors::default(),
        }
    }
}

impl<F: Copy + Ord + FromStr<Err = Error>> FilterState<F> {
    /// State that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets one selector.
    #[must_use]
    pub fn with_selector(mut self, field: F, selector: Selector) -> Self {
        self.selectors.set(field, selector);
        self
    }

    /// True when neither the query nor any selector restricts anything.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.needle().is_none() && self.selectors.active().next().is_none()
    }

    fn needle(&self) -> Option<String> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }
}

fn matches_prepared<T: Filterable>(
    record: &T,
    needle: Option<&str>,
    selectors: &Selectors<T::Field>,
) -> bool {
    let text_ok = needle.is_none_or(|needle| {
        T::SEARCH_FIELDS
            .iter()
            .any(|field| record.field_value(*field).to_lowercase().contains(needle))
    });

    text_ok
        && selectors
            .active()
            .all(|(field, expected)| record.field_value(field) == expected)
}

/// Whether a single record passes the query and all active selectors.
#[must_use]
pub fn matches<T: Filterable>(record: &T, state: &FilterState<T::Field>) -> bool {
    let needle = state.needle();
    matches_prepared(record, needle.as_deref(), &state.selectors)
}

/// Returns the records passing `state`, in input order.
#[must_use]
pub fn filter<'a, T: Filterable>(records: &'a [T], state: &FilterState<T::Field>) -> Vec<&'a T> {
    let needle = state.needle();
    records
        .iter()
        .filter(|record| matches_prepared(*record, needle.as_deref(), &state.selectors))
        .collect()
}

/// Owned variant of [`filter`] for hosts that replace their state wholesale.
#[must_use]
pub fn filter_owned<T: Filterable + Clone>(records: &[T], state: &FilterState<T::Field>) -> Vec<T> {
    filter(records, state).into_iter().cloned().collect()
}
