//! In-memory feature store indexed by loan identifier.

use crate::error::{Result, RiskError};
use crate::features::frame::FeatureFrame;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Applicant identifier (`SK_ID_CURR` in the source data).
pub type LoanId = i64;

/// Feature rows keyed by loan id, all sharing the same columns.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: BTreeMap<LoanId, Vec<f64>>,
}

/// A borrowed view of one applicant's row.
#[derive(Debug, Clone, Copy)]
pub struct ClientRecord<'a> {
    pub loan_id: LoanId,
    pub columns: &'a [String],
    pub values: &'a [f64],
}

impl<'a> ClientRecord<'a> {
    pub fn new(loan_id: LoanId, columns: &'a [String], values: &'a [f64]) -> Self {
        Self {
            loan_id,
            columns,
            values,
        }
    }

    /// Value of the named column, if present.
    pub fn value(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i).copied())
    }
}

impl FeatureTable {
    /// Build a table from explicit rows. Column names and loan ids must be unique.
    pub fn new(columns: Vec<String>, rows: Vec<(LoanId, Vec<f64>)>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(RiskError::validation(format!(
                    "duplicate column in feature table: {column}"
                )));
            }
        }

        let mut indexed = BTreeMap::new();
        for (loan_id, values) in rows {
            if values.len() != columns.len() {
                return Err(RiskError::validation(format!(
                    "loan {loan_id} has {} values but the table has {} columns",
                    values.len(),
                    columns.len()
                )));
            }
            if indexed.insert(loan_id, values).is_some() {
                return Err(RiskError::validation(format!(
                    "duplicate loan id in feature table: {loan_id}"
                )));
            }
        }

        Ok(Self {
            columns,
            rows: indexed,
        })
    }

    /// Build a table from JSON objects, using `id_column` as the index.
    ///
    /// Every record must carry the same keys and every feature value must be a
    /// number or `null`; `null` marks a missing value and is stored as NaN.
    pub fn from_records(records: &[Map<String, Value>], id_column: &str) -> Result<Self> {
        let Some(first) = records.first() else {
            return Self::new(Vec::new(), Vec::new());
        };
        let columns: Vec<String> = first
            .keys()
            .filter(|k| k.as_str() != id_column)
            .cloned()
            .collect();

        let mut rows = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let loan_id = record
                .get(id_column)
                .and_then(parse_loan_id)
                .ok_or_else(|| {
                    RiskError::validation(format!(
                        "record {i} has no integer `{id_column}` identifier"
                    ))
                })?;

            if record.len() != columns.len() + 1 {
                return Err(RiskError::validation(format!(
                    "loan {loan_id} has {} fields, expected {}",
                    record.len(),
                    columns.len() + 1
                )));
            }

            let values = columns
                .iter()
                .map(|column| {
                    record.get(column).and_then(parse_feature).ok_or_else(|| {
                        RiskError::validation(format!(
                            "loan {loan_id}: column `{column}` is missing or not numeric"
                        ))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push((loan_id, values));
        }

        Self::new(columns, rows)
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str, id_column: &str) -> Result<Self> {
        let records: Vec<Map<String, Value>> = serde_json::from_str(json)?;
        Self::from_records(&records, id_column)
    }

    /// Load a JSON array of records from disk.
    pub fn from_json_file(path: &Path, id_column: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content, id_column)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Loan ids in ascending order.
    pub fn loan_ids(&self) -> impl Iterator<Item = LoanId> + '_ {
        self.rows.keys().copied()
    }

    /// Row for `loan_id`, if present.
    pub fn get(&self, loan_id: LoanId) -> Option<ClientRecord<'_>> {
        self.rows
            .get(&loan_id)
            .map(|values| ClientRecord::new(loan_id, &self.columns, values))
    }

    /// Remove a column and return its values in loan-id order.
    pub fn take_column(&mut self, name: &str) -> Result<Vec<f64>> {
        let index = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| RiskError::not_found(format!("column `{name}`")))?;
        self.columns.remove(index);
        Ok(self
            .rows
            .values_mut()
            .map(|values| values.remove(index))
            .collect())
    }

    /// Every row as a frame, in loan-id order.
    pub fn to_frame(&self) -> FeatureFrame {
        let rows = self.rows.values().cloned().collect();
        FeatureFrame::from_trusted_rows(self.columns.clone(), rows)
    }
}

fn parse_feature(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(f64::NAN),
        other => other.as_f64(),
    }
}

fn parse_loan_id(value: &Value) -> Option<LoanId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
