//! Expected feature columns of a trained model and row alignment against them.

use crate::error::{Result, RiskError, ServiceError};
use crate::features::frame::FeatureFrame;
use crate::features::table::ClientRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of the feature names a model was trained on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    names: Vec<String>,
}

/// Columns that keep a row from matching a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDiff {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

impl SchemaDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

impl FeatureSchema {
    /// Create a schema; names must be unique.
    pub fn new(names: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(RiskError::validation(format!(
                    "duplicate feature name in schema: {name}"
                )));
            }
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Set difference between `columns` and the schema, in schema / column order.
    pub fn diff(&self, columns: &[String]) -> SchemaDiff {
        let present: HashSet<&str> = columns.iter().map(String::as_str).collect();
        let expected: HashSet<&str> = self.names.iter().map(String::as_str).collect();
        SchemaDiff {
            missing: self
                .names
                .iter()
                .filter(|n| !present.contains(n.as_str()))
                .cloned()
                .collect(),
            extra: columns
                .iter()
                .filter(|c| !expected.contains(c.as_str()))
                .cloned()
                .collect(),
        }
    }

    /// Reorder a client row into schema order.
    ///
    /// The row must hold exactly the schema's columns, each with a value;
    /// anything else yields a feature-mismatch [`ServiceError`].
    pub fn align(
        &self,
        record: &ClientRecord<'_>,
    ) -> std::result::Result<FeatureFrame, ServiceError> {
        let diff = self.diff(record.columns);
        if !diff.is_empty() {
            return Err(ServiceError::feature_mismatch(&diff.missing, &diff.extra));
        }

        let values = self
            .names
            .iter()
            .map(|name| record.value(name))
            .collect::<Option<Vec<f64>>>();
        let Some(values) = values else {
            let missing: Vec<String> = self
                .names
                .iter()
                .filter(|name| record.value(name).is_none())
                .cloned()
                .collect();
            return Err(ServiceError::feature_mismatch(&missing, &[]));
        };
        Ok(FeatureFrame::from_trusted_rows(self.names.clone(), vec![values]))
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = RiskError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.names
    }
}
