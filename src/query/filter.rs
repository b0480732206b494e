//! Compiled `where` filters.
//!
//! A `where` input maps `<field>__<operator>` keys to JSON operands. Every key is validated
//! against the catalog when the filter is compiled; predicates are ANDed when matching.

use super::catalog::{Catalog, FieldKind, FieldPath, Operator};
use super::value::Scalar;
use super::OPERATOR_SEPARATOR;
use crate::error::QueryError;
use crate::graph::Page;
use serde_json::Value;
use std::collections::BTreeMap;

/// Caller-supplied filter keys and operands
pub type WhereInput = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Operand {
    fn from_json(value: &Value) -> Operand {
        match value {
            Value::Bool(b) => Operand::Bool(*b),
            Value::Number(n) => n.as_f64().map(Operand::Number).unwrap_or(Operand::Null),
            Value::String(s) => Operand::Text(s.clone()),
            _ => Operand::Null,
        }
    }

    fn equals(&self, actual: &Scalar<'_>) -> bool {
        match (self, actual) {
            (Operand::Bool(expected), Scalar::Bool(found)) => expected == found,
            (Operand::Text(expected), Scalar::Str(found)) => expected == found,
            (Operand::Number(expected), found) => found.as_f64() == Some(*expected),
            _ => false,
        }
    }
}

/// One validated predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    path: FieldPath,
    operator: Operator,
    operand: Operand,
}

impl Predicate {
    pub fn matches(&self, page: &Page) -> bool {
        let actual = page.scalar(&self.path);
        match self.operator {
            Operator::Eq => match (&self.operand, actual) {
                (Operand::Null, actual) => actual.is_none(),
                (operand, Some(found)) => operand.equals(&found),
                (_, None) => false,
            },
            Operator::Ne => match (&self.operand, actual) {
                (Operand::Null, actual) => actual.is_some(),
                (operand, Some(found)) => !operand.equals(&found),
                (_, None) => true,
            },
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
                let (Operand::Number(expected), Some(found)) = (&self.operand, actual) else {
                    return false;
                };
                let Some(found) = found.as_f64() else {
                    return false;
                };
                match self.operator {
                    Operator::Gt => found > *expected,
                    Operator::Gte => found >= *expected,
                    Operator::Lt => found < *expected,
                    _ => found <= *expected,
                }
            }
            Operator::Contains
            | Operator::NotContains
            | Operator::StartWith
            | Operator::EndWith => {
                let (Operand::Text(expected), Some(found)) =
                    (&self.operand, actual.and_then(|s| s.as_str()))
                else {
                    return false;
                };
                match self.operator {
                    Operator::Contains => found.contains(expected.as_str()),
                    Operator::NotContains => !found.contains(expected.as_str()),
                    Operator::StartWith => found.starts_with(expected.as_str()),
                    _ => found.ends_with(expected.as_str()),
                }
            }
        }
    }
}

/// Conjunction of validated predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// Validate every key and operand of `input` against `catalog`.
    pub fn compile(input: &WhereInput, catalog: &Catalog) -> Result<Filter, QueryError> {
        let predicates = input
            .iter()
            .map(|(key, value)| compile_predicate(key, value, catalog))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Filter { predicates })
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, page: &Page) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(page))
    }
}

fn compile_predicate(key: &str, value: &Value, catalog: &Catalog) -> Result<Predicate, QueryError> {
    let (field_name, operator_name) = key
        .rsplit_once(OPERATOR_SEPARATOR)
        .filter(|(field, op)| !field.is_empty() && !op.is_empty())
        .ok_or_else(|| QueryError::MalformedFilterKey(key.to_string()))?;
    let field = catalog
        .field(field_name)
        .ok_or_else(|| QueryError::UnknownField(field_name.to_string()))?;
    let operator = Operator::parse(operator_name)
        .filter(|op| field.kind.supports(*op))
        .ok_or_else(|| QueryError::UnsupportedOperator {
            field: field_name.to_string(),
            operator: operator_name.to_string(),
        })?;

    let fits = if value.is_null() {
        operator.accepts_null()
    } else {
        field.kind.accepts(value)
    };
    if !fits {
        return Err(QueryError::InvalidValue {
            key: key.to_string(),
            expected: expected_description(field.kind, operator),
        });
    }

    Ok(Predicate {
        path: field.path.clone(),
        operator,
        operand: Operand::from_json(value),
    })
}

fn expected_description(kind: FieldKind, operator: Operator) -> String {
    if operator.accepts_null() {
        format!("{} or null", kind.name())
    } else {
        kind.name().to_string()
    }
}
