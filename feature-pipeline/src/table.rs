//! Rectangular feature tables: one row per entity id, named f64 columns.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::PipelineError;

/// A rectangular table of numeric features keyed by a string entity id.
///
/// Row `i` of every column belongs to `ids[i]`. Columns are held in sorted
/// name order so downstream projections are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    ids: Vec<String>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl FeatureTable {
    pub fn from_columns(
        ids: Vec<String>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, PipelineError> {
        let mut table = BTreeMap::new();
        for (name, values) in columns {
            if values.len() != ids.len() {
                return Err(PipelineError::ColumnLength {
                    name,
                    expected: ids.len(),
                    actual: values.len(),
                });
            }
            if table.insert(name.clone(), values).is_some() {
                return Err(PipelineError::DuplicateColumn(name));
            }
        }
        Ok(Self { ids, columns: table })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Joins two tables on the id column, keeping only ids present in both.
    /// Row order follows `self`; column sets must be disjoint.
    pub fn inner_join(&self, other: &FeatureTable) -> Result<FeatureTable, PipelineError> {
        let other_rows: HashMap<&str, usize> = other
            .ids
            .iter()
            .enumerate()
            .map(|(row, id)| (id.as_str(), row))
            .collect();

        let mut keep = Vec::new();
        let mut ids = Vec::new();
        for (row, id) in self.ids.iter().enumerate() {
            if let Some(&other_row) = other_rows.get(id.as_str()) {
                keep.push((row, other_row));
                ids.push(id.clone());
            }
        }

        let mut columns: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (name, values) in &self.columns {
            let filtered = keep.iter().map(|&(row, _)| values[row]).collect();
            columns.insert(name.clone(), filtered);
        }
        for (name, values) in &other.columns {
            let filtered = keep.iter().map(|&(_, row)| values[row]).collect();
            if columns.insert(name.clone(), filtered).is_some() {
                return Err(PipelineError::DuplicateColumn(name.clone()));
            }
        }
        Ok(FeatureTable { ids, columns })
    }

    /// Concatenates the columns of two tables built from the same source
    /// slice in the same order. Both row counts and per-row ids must agree.
    pub fn merge_by_position(&self, other: &FeatureTable) -> Result<FeatureTable, PipelineError> {
        if self.ids.len() != other.ids.len() {
            return Err(PipelineError::RowCountMismatch {
                left: self.ids.len(),
                right: other.ids.len(),
            });
        }
        for (index, (left, right)) in self.ids.iter().zip(&other.ids).enumerate() {
            if left != right {
                return Err(PipelineError::RowIdMismatch {
                    index,
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        }

        let mut columns = self.columns.clone();
        for (name, values) in &other.columns {
            if columns.insert(name.clone(), values.clone()).is_some() {
                return Err(PipelineError::DuplicateColumn(name.clone()));
            }
        }
        Ok(FeatureTable {
            ids: self.ids.clone(),
            columns,
        })
    }

    /// Drops columns under `prefix` whose mean falls below `min_mean`.
    /// Columns outside the prefix are never touched.
    pub fn prune_sparse(&mut self, prefix: &str, min_mean: f64) {
        if self.ids.is_empty() {
            return;
        }
        let rows = self.ids.len() as f64;
        self.columns.retain(|name, values| {
            if !name.starts_with(prefix) {
                return true;
            }
            let mean = values.iter().sum::<f64>() / rows;
            mean >= min_mean
        });
    }

    /// Column names present in both tables, in sorted order.
    pub fn common_columns(&self, other: &FeatureTable) -> Vec<String> {
        self.columns
            .keys()
            .filter(|name| other.columns.contains_key(*name))
            .cloned()
            .collect()
    }

    /// Projects the table onto `columns`, returning row-major values.
    /// A column absent from the table contributes zeros.
    pub fn project_row_major(&self, columns: &[String]) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.ids.len() * columns.len());
        for row in 0..self.ids.len() {
            for name in columns {
                out.push(
                    self.columns
                        .get(name)
                        .map(|values| values[row])
                        .unwrap_or(0.0),
                );
            }
        }
        out
    }
}

/// Accumulates sparse rows and rectangularizes them on build: the column
/// set is the union of all row keys and missing values become 0.0.
#[derive(Debug, Default)]
pub struct TableBuilder {
    ids: Vec<String>,
    rows: Vec<HashMap<String, f64>>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, id: String, features: HashMap<String, f64>) {
        self.ids.push(id);
        self.rows.push(features);
    }

    pub fn build(self) -> FeatureTable {
        let mut names: BTreeSet<String> = BTreeSet::new();
        for row in &self.rows {
            names.extend(row.keys().cloned());
        }
        let mut columns = BTreeMap::new();
        for name in names {
            let values = self
                .rows
                .iter()
                .map(|row| row.get(&name).copied().unwrap_or(0.0))
                .collect();
            columns.insert(name, values);
        }
        FeatureTable {
            ids: self.ids,
            columns,
        }
    }
}
