//! Income, expense and balance totals for people, categories and the whole
//! household.

mod aggregation;
mod report;

pub use aggregation::{Totals, aggregate, aggregate_by_category, aggregate_by_person};
pub use report::{CategoryTotals, PersonTotals, TotalsReport, get_totals_report};
