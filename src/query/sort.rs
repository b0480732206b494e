//! Stable ordering by a single catalog sort key.

use super::catalog::SortKey;
use super::value::Scalar;
use crate::graph::Page;
use std::cmp::Ordering;

/// Compare two optional values; absent values order after every present value in both
/// directions, and `reverse` only flips the order among present values.
fn compare(a: Option<Scalar<'_>>, b: Option<Scalar<'_>>, reverse: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.total_cmp(&b);
            if reverse {
                ordering.reverse()
            } else {
                ordering
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort `pages` in place. Ties keep their input order.
pub fn sort_pages(pages: &mut [&Page], key: &SortKey) {
    pages.sort_by(|a, b| compare(a.scalar(&key.path), b.scalar(&key.path), key.reverse));
}
