//! Clock port - the current calendar day.

use chrono::NaiveDate;

/// Source of "today" for reminder checks and sample data.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}
