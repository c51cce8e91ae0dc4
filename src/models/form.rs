use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::product::ProductField;

/// Per-field validation messages. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrorMap(BTreeMap<ProductField, String>);

impl FieldErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: ProductField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ProductField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: ProductField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: ProductField) -> Option<String> {
        self.0.remove(&field)
    }

    /// Overlay `other` onto this map. Keys absent from `other` are kept.
    pub fn merge(&mut self, other: FieldErrorMap) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = ProductField> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProductField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Fields the user has interacted with. Gates error display only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchedSet(BTreeSet<ProductField>);

impl TouchedSet {
    pub fn mark(&mut self, field: ProductField) {
        self.0.insert(field);
    }

    pub fn mark_all(&mut self, fields: &[ProductField]) {
        self.0.extend(fields.iter().copied());
    }

    pub fn is_touched(&self, field: ProductField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Lifecycle of one screen instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Editing,
    Submitting,
    Navigated,
}
