//! Parameter tables keyed by pairs of identifiers.
//!
//! Each table is a `ParamTable<K>` where the zero-sized marker `K` fixes the
//! table's name and which entity kinds its keys range over, so a demand table
//! can't be passed where a capacity table is expected.

use std::collections::HashMap;
use std::marker::PhantomData;

use super::registry::{EntityKind, IdSet};
use crate::error::ValidationError;

/// Static description of a parameter table.
pub trait TableKind {
    /// Table name used in error messages.
    const NAME: &'static str;
    /// Entity kind of the first key component.
    const ROW: EntityKind;
    /// Entity kind of the second key component.
    const COL: EntityKind;
}

/// Unit transportation cost per (warehouse, customer) lane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cost;

/// Required quantity per (customer, product).
#[derive(Debug, Clone, Copy, Default)]
pub struct Demand;

/// Maximum quantity per (warehouse, product) across all customers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Capacity;

impl TableKind for Cost {
    const NAME: &'static str = "cost";
    const ROW: EntityKind = EntityKind::Warehouse;
    const COL: EntityKind = EntityKind::Customer;
}

impl TableKind for Demand {
    const NAME: &'static str = "demand";
    const ROW: EntityKind = EntityKind::Customer;
    const COL: EntityKind = EntityKind::Product;
}

impl TableKind for Capacity {
    const NAME: &'static str = "capacity";
    const ROW: EntityKind = EntityKind::Warehouse;
    const COL: EntityKind = EntityKind::Product;
}

pub type CostTable = ParamTable<Cost>;
pub type DemandTable = ParamTable<Demand>;
pub type CapacityTable = ParamTable<Capacity>;

/// A sparse mapping from an identifier pair to a real value.
#[derive(Debug, Clone)]
pub struct ParamTable<K> {
    entries: HashMap<(String, String), f64>,
    _kind: PhantomData<K>,
}

impl<K> Default for ParamTable<K> {
    fn default() -> Self {
        ParamTable {
            entries: HashMap::new(),
            _kind: PhantomData,
        }
    }
}

impl<K: TableKind> ParamTable<K> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `(row, col)`, returning the previous value.
    pub fn insert(&mut self, row: impl Into<String>, col: impl Into<String>, value: f64) -> Option<f64> {
        self.entries.insert((row.into(), col.into()), value)
    }

    /// Builder form of `insert`.
    pub fn with(mut self, row: impl Into<String>, col: impl Into<String>, value: f64) -> Self {
        self.insert(row, col, value);
        self
    }

    /// Raw lookup, with no validation.
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        self.entries.get(&(row.to_owned(), col.to_owned())).copied()
    }

    /// Validated lookup of an entry the model needs.
    ///
    /// # Errors
    ///
    /// - `MissingEntry` if there is no value for `(row, col)`
    /// - `NonFiniteValue` if the value is NaN or infinite
    /// - `NegativeValue` if the value is below zero
    pub fn require(&self, row: &str, col: &str) -> Result<f64, ValidationError> {
        let value = self.get(row, col).ok_or_else(|| ValidationError::MissingEntry {
            table: K::NAME,
            row: row.to_owned(),
            col: col.to_owned(),
        })?;

        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                table: K::NAME,
                row: row.to_owned(),
                col: col.to_owned(),
                value,
            });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeValue {
                table: K::NAME,
                row: row.to_owned(),
                col: col.to_owned(),
                value,
            });
        }
        Ok(value)
    }

    /// Check that every key names identifiers present in `rows` and `cols`.
    ///
    /// Keys are checked in sorted order so the reported error is stable.
    pub fn check_keys(&self, rows: &IdSet, cols: &IdSet) -> Result<(), ValidationError> {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();

        for (row, col) in keys {
            let unknown = if !rows.contains(row) {
                Some((K::ROW, row))
            } else if !cols.contains(col) {
                Some((K::COL, col))
            } else {
                None
            };

            if let Some((kind, name)) = unknown {
                return Err(ValidationError::UnknownIdentifier {
                    table: K::NAME,
                    row: row.clone(),
                    col: col.clone(),
                    kind,
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Remove the entry for `(row, col)`.
    pub fn remove(&mut self, row: &str, col: &str) -> Option<f64> {
        self.entries.remove(&(row.to_owned(), col.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.entries
            .iter()
            .map(|((r, c), v)| (r.as_str(), c.as_str(), *v))
    }
}

impl<K, R, C> FromIterator<((R, C), f64)> for ParamTable<K>
where
    R: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = ((R, C), f64)>>(iter: I) -> Self {
        ParamTable {
            entries: iter
                .into_iter()
                .map(|((r, c), v)| ((r.into(), c.into()), v))
                .collect(),
            _kind: PhantomData,
        }
    }
}
