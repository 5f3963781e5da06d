use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Time unit of the extracted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeAxis {
    #[default]
    Month,
    Day,
}

impl TimeAxis {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Month => "Month",
            Self::Day => "Day",
        }
    }
}

impl fmt::Display for TimeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One cell of a compartment column, kept in the form it was written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompartmentValue {
    Integer(i64),
    Real(f64),
}

impl CompartmentValue {
    pub const ZERO: Self = Self::Integer(0);

    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Real(value) => value,
        }
    }
}

impl Default for CompartmentValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for CompartmentValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CompartmentValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

/// Column-oriented simulation table extracted from a reply.
///
/// Every compartment column always holds exactly one value per time point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationTable {
    time_axis: TimeAxis,
    time_points: Vec<u64>,
    columns: IndexMap<String, Vec<CompartmentValue>>,
}

impl SimulationTable {
    /// Creates an empty table with the given compartment columns.
    ///
    /// Repeated compartment codes collapse onto their first occurrence.
    #[must_use]
    pub fn new<I, S>(time_axis: TimeAxis, variable_order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns = IndexMap::new();
        for name in variable_order {
            columns.entry(name.into()).or_insert_with(Vec::new);
        }
        Self {
            time_axis,
            time_points: Vec::new(),
            columns,
        }
    }

    /// Appends one row with values aligned to `variable_order`. Missing
    /// trailing values are zero-filled and surplus values are ignored.
    pub fn push_row(&mut self, time: u64, values: &[CompartmentValue]) {
        self.time_points.push(time);
        for (index, column) in self.columns.values_mut().enumerate() {
            column.push(values.get(index).copied().unwrap_or_default());
        }
    }

    #[must_use]
    pub fn time_axis(&self) -> TimeAxis {
        self.time_axis
    }

    #[must_use]
    pub fn time_points(&self) -> &[u64] {
        &self.time_points
    }

    /// Compartment codes in header order.
    #[must_use]
    pub fn variable_order(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn compartment_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[CompartmentValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Iterates `(code, values)` pairs in header order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[CompartmentValue])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.time_points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// True when the table carries nothing to plot.
    #[must_use]
    pub fn is_unplottable(&self) -> bool {
        self.time_points.is_empty() || self.columns.is_empty()
    }
}
