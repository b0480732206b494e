//! Scalar view of page fields used by filtering and sorting.

use super::catalog::{FieldPath, PageField};
use crate::graph::Page;
use serde_json::Value;
use std::cmp::Ordering;

/// A present, non-null scalar field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
}

impl<'a> Scalar<'a> {
    /// Scalar for a JSON value; None for null, arrays and objects.
    pub fn from_json(value: &'a Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Scalar::Int(i)),
                None => n.as_f64().map(Scalar::Float),
            },
            Value::String(s) => Some(Scalar::Str(s)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Scalar::Str(s) => Some(*s),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Scalar::Bool(_) => 0,
            Scalar::Int(_) | Scalar::Float(_) => 1,
            Scalar::Str(_) => 2,
        }
    }

    /// Total order: numbers numerically, strings lexically, false before true; values of
    /// different types order by type.
    pub fn total_cmp(&self, other: &Scalar<'_>) -> Ordering {
        match (self, other) {
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::Str(a), Scalar::Str(b)) => a.cmp(b),
            (Scalar::Int(a), Scalar::Int(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }
}

impl Page {
    /// Value at a catalog field path, None when absent or null.
    pub fn scalar(&self, path: &FieldPath) -> Option<Scalar<'_>> {
        match path {
            FieldPath::Page(field) => self.page_field(*field).map(Scalar::Str),
            FieldPath::Frontmatter(key) => self
                .frontmatter
                .as_ref()
                .and_then(|fm| fm.get(key))
                .and_then(Scalar::from_json),
        }
    }

    fn page_field(&self, field: PageField) -> Option<&str> {
        match field {
            PageField::Id => Some(&self.id),
            PageField::Slug => Some(&self.slug),
            PageField::Content => self.content.as_deref(),
            PageField::RawContent => self.raw_content.as_deref(),
            PageField::Updated => Some(&self.updated),
            PageField::Created => Some(&self.created),
            PageField::ParentId => self.parent_id.as_deref(),
            PageField::Status => Some(self.status.as_str()),
            PageField::Error => self.error.as_deref(),
        }
    }
}
