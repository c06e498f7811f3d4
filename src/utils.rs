//! Helpers for operation identifiers

use uuid7::uuid7;

use crate::operation::CalendarDate;

// construct a unique operation id carrying the trade date
pub fn new_operation_id(date: CalendarDate) -> String {
    let uuid = uuid7().to_string();
    let suffix = uuid.rsplit('-').next().unwrap_or_default();
    format!("COE-{}-{suffix}", date.as_naive().format("%Y-%m-%d"))
}
