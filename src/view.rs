//! Collection view engine: filtering, ordering and pagination of operations
//!
//! All functions here are pure. They never mutate the input collection and
//! parse failures never escape: an operation without a sortable key simply
//! orders after every operation that has one.
use std::cmp::Ordering;

use crate::operation::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Kind,
    Asset,
    Protection,
    Date,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Keeps operations whose id, type, asset or issuer contains the query,
/// case-insensitively. An empty query keeps everything; a missing issuer
/// never matches and never errors.
pub fn filter(operations: &[Operation], query: &str) -> Vec<Operation> {
    if query.is_empty() {
        return operations.to_vec();
    }

    let needle = query.to_lowercase();
    operations
        .iter()
        .filter(|op| {
            op.id.to_lowercase().contains(&needle)
                || op.kind.to_lowercase().contains(&needle)
                || op.asset.to_lowercase().contains(&needle)
                || op
                    .issuer
                    .as_ref()
                    .is_some_and(|issuer| issuer.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Returns a new ordered sequence. The sort is stable, so equal keys keep
/// their relative input order, and `Desc` flips only the comparator sign.
pub fn sort(operations: &[Operation], field: SortField, direction: SortDirection) -> Vec<Operation> {
    let mut sorted = operations.to_vec();
    sorted.sort_by(|a, b| compare(a, b, field, direction));
    sorted
}

fn compare(a: &Operation, b: &Operation, field: SortField, direction: SortDirection) -> Ordering {
    match field {
        SortField::Value => rank_optional(a.total_value, b.total_value, direction),
        SortField::Date => rank_optional(a.date, b.date, direction),
        SortField::Id => direction.apply(locale_compare(&a.id, &b.id)),
        SortField::Kind => direction.apply(locale_compare(&a.kind, &b.kind)),
        SortField::Asset => direction.apply(locale_compare(&a.asset, &b.asset)),
        SortField::Protection => direction.apply(locale_compare(&a.protection, &b.protection)),
    }
}

/// Total order over optional keys: missing values sort last regardless of
/// direction, so only the present keys flip with the comparator sign.
fn rank_optional<T: Ord>(a: Option<T>, b: Option<T>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Locale-aware two-level comparison: the primary key folds case and the
/// Portuguese diacritics the data set carries, raw strings break ties.
fn locale_compare(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' => 'a',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ó' | 'ô' | 'õ' => 'o',
            'ú' | 'ü' => 'u',
            'ç' => 'c',
            _ => c,
        })
        .collect()
}

/// Contiguous page slice. Pages are 1-indexed; a zero page size, zero page
/// number or out-of-range page yields an empty sequence.
pub fn paginate(operations: &[Operation], page_size: usize, page_number: usize) -> Vec<Operation> {
    if page_size == 0 || page_number == 0 {
        return Vec::new();
    }

    operations
        .iter()
        .skip((page_number - 1).saturating_mul(page_size))
        .take(page_size)
        .cloned()
        .collect()
}
