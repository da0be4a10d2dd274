//! Raw entity records.
//!
//! A [`DataTable`] is the ungrouped input of the engine: one
//! [`DataRecord`] per entity. It is the source of singleton clusters and the
//! reference against which distortion is measured.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::data_format::Cluster;
use crate::error::{ClusterError, Result};
use crate::types::{EntityId, Population};

/// Number of comma-separated fields in a CSV record.
const CSV_FIELDS: usize = 5;

/// A single input entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Entity identifier.
    pub id: EntityId,
    /// Horizontal position.
    pub horiz: f64,
    /// Vertical position.
    pub vert: f64,
    /// Population weight.
    pub population: Population,
    /// Risk value.
    pub risk: f64,
}

impl DataRecord {
    /// Create a new record.
    pub fn new(id: impl Into<EntityId>, horiz: f64, vert: f64, population: Population, risk: f64) -> Self {
        Self {
            id: id.into(),
            horiz,
            vert,
            population,
            risk,
        }
    }

    /// The singleton cluster for this record.
    pub fn to_cluster(&self) -> Cluster {
        Cluster::singleton(self.id.clone(), self.horiz, self.vert, self.population, self.risk)
    }

    fn validate(&self) -> Result<()> {
        if !self.horiz.is_finite() || !self.vert.is_finite() {
            return Err(ClusterError::invalid_argument(format!(
                "entity {} has a non-finite position",
                self.id
            )));
        }
        if !self.risk.is_finite() {
            return Err(ClusterError::invalid_argument(format!(
                "entity {} has a non-finite risk",
                self.id
            )));
        }
        Ok(())
    }
}

/// An indexed table of records.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    records: Vec<DataRecord>,
    index: HashMap<EntityId, usize>,
    total_population: Population,
}

impl DataTable {
    /// Build a table, rejecting duplicate ids, non-finite values and a
    /// total population that does not fit in a [`Population`].
    pub fn new(records: Vec<DataRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        let mut total_population: Population = 0;
        for (i, record) in records.iter().enumerate() {
            record.validate()?;
            if index.insert(record.id.clone(), i).is_some() {
                return Err(ClusterError::invalid_argument(format!(
                    "duplicate entity id {}",
                    record.id
                )));
            }
            total_population = total_population.checked_add(record.population).ok_or_else(|| {
                ClusterError::invalid_argument(format!(
                    "total population overflows at entity {}",
                    record.id
                ))
            })?;
        }
        Ok(Self {
            records,
            index,
            total_population,
        })
    }

    /// Parse `id,horiz,vert,population,risk` rows.
    ///
    /// Fields may be quoted and are trimmed. Blank lines are skipped. Errors
    /// name the 1-based line number.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| ClusterError::invalid_argument(format!("malformed CSV: {e}")))?;
            if row.len() == 1 && row[0].is_empty() {
                continue;
            }
            let line_no = row.position().map_or(0, |pos| pos.line());
            records.push(parse_csv_row(&row, line_no)?);
        }
        Self::new(records)
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let records: Vec<DataRecord> = serde_json::from_str(text)
            .map_err(|e| ClusterError::invalid_argument(format!("invalid JSON data table: {e}")))?;
        Self::new(records)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in table order.
    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    /// Look up a record by entity id.
    pub fn get(&self, id: &str) -> Option<&DataRecord> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    /// One singleton cluster per record, in table order.
    pub fn singletons(&self) -> Vec<Cluster> {
        self.records.iter().map(DataRecord::to_cluster).collect()
    }

    /// Sum of all record populations.
    pub fn total_population(&self) -> Population {
        self.total_population
    }
}

fn parse_csv_row(row: &StringRecord, line_no: u64) -> Result<DataRecord> {
    if row.len() != CSV_FIELDS {
        return Err(ClusterError::invalid_argument(format!(
            "line {line_no}: expected {CSV_FIELDS} fields, found {}",
            row.len()
        )));
    }

    let number = |idx: usize, name: &str| -> Result<f64> {
        row[idx].parse::<f64>().map_err(|e| {
            ClusterError::invalid_argument(format!("line {line_no}: invalid {name} {:?}: {e}", &row[idx]))
        })
    };

    let population = row[3].parse::<Population>().map_err(|e| {
        ClusterError::invalid_argument(format!("line {line_no}: invalid population {:?}: {e}", &row[3]))
    })?;

    Ok(DataRecord::new(
        &row[0],
        number(1, "horizontal position")?,
        number(2, "vertical position")?,
        population,
        number(4, "risk")?,
    ))
}
