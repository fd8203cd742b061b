//! Typed result shape of a report.

use super::ReportId;
use crate::executor::FoodError;
use crate::row::{Cell, Row, RowSet};
use serde::Serialize;

/// Declared type of a report column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    /// Floating point; integer cells are accepted too
    Real,
    Text,
    /// ISO `YYYY-MM-DD` text
    Date,
}

impl ColumnKind {
    /// Whether `cell` may appear in a column of this kind; NULL fits any kind
    pub fn accepts(self, cell: &Cell) -> bool {
        match (self, cell) {
            (_, Cell::Null) => true,
            (ColumnKind::Integer, Cell::Integer(_)) => true,
            (ColumnKind::Real, Cell::Integer(_) | Cell::Real(_)) => true,
            (ColumnKind::Text | ColumnKind::Date, Cell::Text(_)) => true,
            _ => false,
        }
    }
}

/// Name and type of one report column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportColumn {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Bar-chart hint: which column labels the bars and which gives their height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartSpec {
    pub category: &'static str,
    pub value: &'static str,
}

/// Rows of one report under its declared columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub id: ReportId,
    pub title: &'static str,
    pub columns: &'static [ReportColumn],
    pub chart: Option<ChartSpec>,
    pub rows: Vec<Row>,
}

impl ReportTable {
    /// Check `set` against the declared columns of `id` and wrap it
    ///
    /// # Errors
    ///
    /// Returns `FoodError::QueryError` if the column names differ from the declaration or
    /// a cell does not fit its column's kind.
    pub(crate) fn from_set(id: ReportId, set: RowSet) -> Result<Self, FoodError> {
        let declared = id.columns();
        let names: Vec<&str> = declared.iter().map(|c| c.name).collect();
        if set.columns.iter().map(String::as_str).ne(names.iter().copied()) {
            return Err(FoodError::QueryError(format!(
                "report {} returned columns {:?}, expected {:?}",
                id.number(),
                set.columns,
                names
            )));
        }

        for (row_idx, row) in set.rows.iter().enumerate() {
            for (column, cell) in declared.iter().zip(row.cells()) {
                if !column.kind.accepts(cell) {
                    return Err(FoodError::QueryError(format!(
                        "report {} row {}: {:?} is not a valid {:?} for column {}",
                        id.number(),
                        row_idx,
                        cell,
                        column.kind,
                        column.name
                    )));
                }
            }
        }

        Ok(Self {
            id,
            title: id.title(),
            columns: declared,
            chart: id.chart(),
            rows: set.rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column called `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// `(label, value)` pairs for the chart, or `None` when the report has no chart
    ///
    /// Rows whose value is not numeric are left out.
    pub fn chart_points(&self) -> Option<Vec<(String, f64)>> {
        let chart = self.chart?;
        let label_idx = self.column_index(chart.category)?;
        let value_idx = self.column_index(chart.value)?;
        Some(
            self.rows
                .iter()
                .filter_map(|row| {
                    let value = row.cell(value_idx)?.as_f64()?;
                    let label = row.cell(label_idx).map(ToString::to_string).unwrap_or_default();
                    Some((label, value))
                })
                .collect(),
        )
    }
}

/// Result of one report within a catalog run
#[derive(Debug)]
pub struct ReportOutcome {
    pub id: ReportId,
    pub result: Result<ReportTable, FoodError>,
}

impl ReportOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
