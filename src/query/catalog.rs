//! Filter/sort catalog derived from observed field shapes.
//!
//! Page fields have fixed types. Frontmatter keys are typed by the first non-null value observed
//! for each key across the loaded pages. Only boolean, numeric and string fields are filterable
//! and sortable; objects and arrays are listed as nested fields.

use super::{FRONTMATTER_PREFIX, OPERATOR_SEPARATOR};
use crate::graph::Page;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Declared page fields, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PageField {
    Id,
    Slug,
    Content,
    RawContent,
    Updated,
    Created,
    ParentId,
    Status,
    Error,
}

impl PageField {
    pub const ALL: [PageField; 9] = [
        PageField::Id,
        PageField::Slug,
        PageField::Content,
        PageField::RawContent,
        PageField::Updated,
        PageField::Created,
        PageField::ParentId,
        PageField::Status,
        PageField::Error,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PageField::Id => "id",
            PageField::Slug => "slug",
            PageField::Content => "content",
            PageField::RawContent => "rawContent",
            PageField::Updated => "updated",
            PageField::Created => "created",
            PageField::ParentId => "parentId",
            PageField::Status => "status",
            PageField::Error => "error",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            PageField::Id | PageField::ParentId => FieldKind::Id,
            _ => FieldKind::String,
        }
    }
}

/// Location of a queryable value on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum FieldPath {
    Page(PageField),
    Frontmatter(String),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Page(field) => write!(f, "{}", field.name()),
            FieldPath::Frontmatter(key) => write!(f, "frontmatter.{}", key),
        }
    }
}

/// Observed scalar type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    Boolean,
    Int,
    Float,
    String,
    Id,
}

impl FieldKind {
    /// Type tag of an observed JSON value; None for null, arrays and objects.
    pub fn of(value: &Value) -> Option<FieldKind> {
        match value {
            Value::Bool(_) => Some(FieldKind::Boolean),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(FieldKind::Int),
            Value::Number(_) => Some(FieldKind::Float),
            Value::String(_) => Some(FieldKind::String),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn operators(&self) -> &'static [Operator] {
        const BOOLEAN: &[Operator] = &[Operator::Eq, Operator::Ne];
        const NUMERIC: &[Operator] = &[
            Operator::Eq,
            Operator::Ne,
            Operator::Gt,
            Operator::Gte,
            Operator::Lt,
            Operator::Lte,
        ];
        const TEXT: &[Operator] = &[
            Operator::Eq,
            Operator::Ne,
            Operator::Contains,
            Operator::NotContains,
            Operator::StartWith,
            Operator::EndWith,
        ];
        match self {
            FieldKind::Boolean => BOOLEAN,
            FieldKind::Int | FieldKind::Float => NUMERIC,
            FieldKind::String | FieldKind::Id => TEXT,
        }
    }

    pub fn supports(&self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Int | FieldKind::Float)
    }

    /// Whether a non-null filter operand fits this type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Int | FieldKind::Float => value.is_number(),
            FieldKind::String | FieldKind::Id => value.is_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Boolean => "Boolean",
            FieldKind::Int => "Int",
            FieldKind::Float => "Float",
            FieldKind::String => "String",
            FieldKind::Id => "ID",
        }
    }
}

/// Filter operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
    NotContains,
    StartWith,
    EndWith,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartWith => "start_with",
            Operator::EndWith => "end_with",
        }
    }

    pub fn parse(name: &str) -> Option<Operator> {
        Some(match name {
            "eq" => Operator::Eq,
            "ne" => Operator::Ne,
            "gt" => Operator::Gt,
            "gte" => Operator::Gte,
            "lt" => Operator::Lt,
            "lte" => Operator::Lte,
            "contains" => Operator::Contains,
            "not_contains" => Operator::NotContains,
            "start_with" => Operator::StartWith,
            "end_with" => Operator::EndWith,
            _ => return None,
        })
    }

    /// Whether a null operand is meaningful for this operator.
    pub fn accepts_null(&self) -> bool {
        matches!(self, Operator::Eq | Operator::Ne)
    }
}

/// A filterable, sortable field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldEntry {
    /// Exposed name: `slug`, `frontmatter_order`, ...
    pub name: String,
    pub path: FieldPath,
    pub kind: FieldKind,
}

impl FieldEntry {
    /// Filter keys this field contributes: `<name>__<operator>`.
    pub fn filter_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.kind
            .operators()
            .iter()
            .map(move |op| format!("{}{}{}", self.name, OPERATOR_SEPARATOR, op.as_str()))
    }
}

/// Sort entry addressable by name (`<field>_ASC` / `<field>_DESC`) or stable index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortKey {
    pub index: usize,
    pub name: String,
    pub path: FieldPath,
    pub reverse: bool,
}

/// Immutable catalog of legal filter keys and sort keys for one loaded graph
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    fields: Vec<FieldEntry>,
    field_index: HashMap<String, usize>,
    sort_keys: Vec<SortKey>,
    sort_index: HashMap<String, usize>,
    nested: Vec<String>,
}

impl Catalog {
    /// Synthesize the catalog from the declared page fields and the frontmatter keys observed
    /// on `pages`.
    pub fn from_pages(pages: &[Page]) -> Self {
        let mut catalog = Catalog::default();
        for field in PageField::ALL {
            catalog.register(field.name().to_string(), FieldPath::Page(field), field.kind());
        }

        let mut order: Vec<&str> = Vec::new();
        let mut observed: HashMap<&str, Option<FieldKind>> = HashMap::new();
        let mut is_nested: HashMap<&str, bool> = HashMap::new();
        for frontmatter in pages.iter().filter_map(|page| page.frontmatter.as_ref()) {
            for (key, value) in frontmatter {
                if !observed.contains_key(key.as_str()) {
                    order.push(key);
                }
                let slot = observed.entry(key.as_str()).or_default();
                if slot.is_none() && !is_nested.contains_key(key.as_str()) {
                    match value {
                        Value::Null => {}
                        Value::Array(_) | Value::Object(_) => {
                            is_nested.insert(key, true);
                        }
                        other => *slot = FieldKind::of(other),
                    }
                }
            }
        }

        for key in order {
            let name = format!("{}{}", FRONTMATTER_PREFIX, key);
            match observed.get(key).copied().flatten() {
                Some(kind) => {
                    catalog.register(name, FieldPath::Frontmatter(key.to_string()), kind)
                }
                None if is_nested.contains_key(key) => catalog.nested.push(name),
                // Only nulls observed: no type to derive operators from.
                None => {}
            }
        }
        catalog
    }

    fn register(&mut self, name: String, path: FieldPath, kind: FieldKind) {
        for (suffix, reverse) in [("ASC", false), ("DESC", true)] {
            let sort_name = format!("{}_{}", name, suffix);
            let index = self.sort_keys.len();
            self.sort_index.insert(sort_name.clone(), index);
            self.sort_keys.push(SortKey {
                index,
                name: sort_name,
                path: path.clone(),
                reverse,
            });
        }
        self.field_index.insert(name.clone(), self.fields.len());
        self.fields.push(FieldEntry { name, path, kind });
    }

    pub fn field(&self, name: &str) -> Option<&FieldEntry> {
        self.field_index.get(name).map(|&idx| &self.fields[idx])
    }

    pub fn fields(&self) -> &[FieldEntry] {
        &self.fields
    }

    /// Frontmatter fields holding objects or arrays; traversable but not filterable.
    pub fn nested_fields(&self) -> &[String] {
        &self.nested
    }

    pub fn sort_key(&self, name: &str) -> Option<&SortKey> {
        self.sort_index.get(name).map(|&idx| &self.sort_keys[idx])
    }

    pub fn sort_key_at(&self, index: usize) -> Option<&SortKey> {
        self.sort_keys.get(index)
    }

    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort_keys
    }

    /// Every legal `where` key, in catalog order.
    pub fn filter_keys(&self) -> Vec<String> {
        self.fields.iter().flat_map(|f| f.filter_keys()).collect()
    }
}
