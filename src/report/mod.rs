//! Reporting catalog.
//!
//! [`run_report`] executes one report and checks its rows against the declared columns;
//! [`run_catalog`] runs all fifteen and keeps going past failures so one broken report
//! never hides the others.

mod catalog;
mod table;

pub use catalog::ReportId;
pub use table::{ChartSpec, ColumnKind, ReportColumn, ReportOutcome, ReportTable};

use crate::entity::dates::format_date;
use crate::executor::{FoodError, FoodExecutor};
use crate::raw_sql::find_set_by_statement;
use chrono::NaiveDate;

/// Run a single report
///
/// `today` is only read by [`ReportId::ExpiringSoon`].
///
/// # Errors
///
/// Returns `FoodError` if the query fails or its result does not match the declared
/// columns.
pub fn run_report<E: FoodExecutor + ?Sized>(
    executor: &E,
    id: ReportId,
    today: NaiveDate,
) -> Result<ReportTable, FoodError> {
    let set = if id.takes_today() {
        let today = format_date(today);
        find_set_by_statement(executor, id.sql(), &[&today])?
    } else {
        find_set_by_statement(executor, id.sql(), &[])?
    };
    log::debug!("report {} returned {} row(s)", id.number(), set.rows.len());
    ReportTable::from_set(id, set)
}

/// Run every report in catalog order, one outcome each
pub fn run_catalog<E: FoodExecutor + ?Sized>(executor: &E, today: NaiveDate) -> Vec<ReportOutcome> {
    ReportId::ALL
        .into_iter()
        .map(|id| {
            let result = run_report(executor, id, today);
            if let Err(e) = &result {
                log::warn!("report {} ({}) failed: {}", id.number(), id.title(), e);
            }
            ReportOutcome { id, result }
        })
        .collect()
}
