//! Identifier sets for warehouses, customers and products.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;

/// The three kinds of entity a problem instance declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Warehouse,
    Customer,
    Product,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Warehouse => "warehouse",
            EntityKind::Customer => "customer",
            EntityKind::Product => "product",
        };
        f.write_str(name)
    }
}

/// An ordered, deduplicated, non-empty set of identifiers of one kind.
///
/// Positions are assigned in insertion order and never change, so they can be
/// used directly as dense indices.
#[derive(Debug, Clone, PartialEq)]
pub struct IdSet {
    kind: EntityKind,
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl IdSet {
    /// Build a set from names. Duplicates are dropped, keeping the first one.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptySet` if no names are given.
    pub fn new<I, S>(kind: EntityKind, names: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IdSet {
            kind,
            names: Vec::new(),
            positions: HashMap::new(),
        };

        for name in names {
            let name = name.into();
            if set.positions.contains_key(&name) {
                tracing::warn!(%kind, name = %name, "dropping duplicate identifier");
                continue;
            }
            set.positions.insert(name.clone(), set.names.len());
            set.names.push(name);
        }

        if set.names.is_empty() {
            return Err(ValidationError::EmptySet { kind });
        }
        Ok(set)
    }

    /// The entity kind of this set.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Number of identifiers.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; sets are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Identifier at `index`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Index of `name`, if registered.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Identifiers in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

/// The warehouse, customer and product sets of one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    pub warehouses: IdSet,
    pub customers: IdSet,
    pub products: IdSet,
}

impl Registry {
    /// Build a registry from three lists of names.
    pub fn new<W, C, P, S>(warehouses: W, customers: C, products: P) -> Result<Self, ValidationError>
    where
        W: IntoIterator<Item = S>,
        C: IntoIterator<Item = S>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Registry {
            warehouses: IdSet::new(EntityKind::Warehouse, warehouses)?,
            customers: IdSet::new(EntityKind::Customer, customers)?,
            products: IdSet::new(EntityKind::Product, products)?,
        })
    }

    /// The set holding identifiers of `kind`.
    pub fn set(&self, kind: EntityKind) -> &IdSet {
        match kind {
            EntityKind::Warehouse => &self.warehouses,
            EntityKind::Customer => &self.customers,
            EntityKind::Product => &self.products,
        }
    }

    /// Number of (warehouse, customer, product) triples.
    pub fn triple_count(&self) -> usize {
        self.warehouses.len() * self.customers.len() * self.products.len()
    }
}
