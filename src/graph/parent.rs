//! Parent inference by longest slug-prefix match.
//!
//! Hierarchy is never declared by authors. A page's parent is the page whose slug is the longest
//! path-prefix of the page's parent slug, so `/docs/guide/setup` attaches to `/docs/guide` when it
//! exists, otherwise to `/docs`, otherwise to `/`, otherwise to nothing.

use super::slug::parent_slug;
use super::Page;
use crate::types::NodeId;
use std::collections::HashMap;
use tracing::warn;

/// Path-prefixes of `slug`, longest first: the slug itself, each truncation at a `/`, then `/`.
fn prefixes_longest_first(slug: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(slug);
    std::iter::from_fn(move || {
        let current = next?;
        next = match current {
            "/" => None,
            other => Some(parent_slug(other)),
        };
        Some(current)
    })
}

/// Infer the parent id of every page over the full set.
///
/// The result is independent of processing order. When several pages share a slug, the first
/// one in `pages` order is preferred as a parent.
pub fn infer_parents(pages: &[Page]) -> Vec<Option<NodeId>> {
    let mut by_slug: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, page) in pages.iter().enumerate() {
        by_slug.entry(page.slug.as_str()).or_default().push(idx);
    }
    for (slug, indices) in &by_slug {
        if indices.len() > 1 {
            warn!(slug = %slug, count = indices.len(), "Duplicate slug");
        }
    }

    pages
        .iter()
        .map(|page| {
            prefixes_longest_first(parent_slug(&page.slug)).find_map(|candidate| {
                by_slug.get(candidate).and_then(|indices| {
                    indices
                        .iter()
                        .map(|&idx| &pages[idx])
                        .find(|other| other.id != page.id)
                        .map(|other| other.id.clone())
                })
            })
        })
        .collect()
}

/// Fill in `parent_id` for every page.
pub fn assign_parents(pages: &mut [Page]) {
    let parents = infer_parents(pages);
    for (page, parent_id) in pages.iter_mut().zip(parents) {
        page.parent_id = parent_id;
    }
}
