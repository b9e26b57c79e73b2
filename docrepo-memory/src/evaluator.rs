//! Filter evaluation against stored BSON documents.

use std::{cmp::Ordering, collections::HashMap};
use bson::{Bson, Document as BsonDocument, datetime::DateTime};

use docrepo_core::{
    query::{QueryVisitor, Expr, FieldOp},
    error::{RepositoryError, RepositoryResult},
};


/// Type-erased, comparable representation of BSON values.
///
/// Numeric types are normalized to f64 so `Int32(3)` equals `Double(3.0)`.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    Null,
    Bool(bool),
    Number(f64),
    DateTime(DateTime),
    String(&'a str),
    Array(Vec<Comparable<'a>>),
    Map(HashMap<&'a str, Comparable<'a>>),
    /// Values compared by exact BSON equality (ids, binary, object ids).
    Opaque(&'a Bson),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Map(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<HashMap<_, _>>()
            ),
            other => Comparable::Opaque(other),
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            (Comparable::Opaque(a), Comparable::Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl<'a> PartialOrd for Comparable<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Comparable::Bool(a), Comparable::Bool(b)) => a.partial_cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.partial_cmp(b),
            (Comparable::String(a), Comparable::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}


pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Bson,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Bson) -> Self {
        Self { document }
    }

    /// Returns whether `document` satisfies `expr`.
    pub fn matches(document: &'a Bson, expr: &Expr) -> RepositoryResult<bool> {
        DocumentEvaluator::new(document).visit_expr(expr)
    }

    fn fields(&self) -> RepositoryResult<&'a BsonDocument> {
        self.document
            .as_document()
            .ok_or_else(|| RepositoryError::InvalidDocument(format!(
                "expected a document, found {:?}",
                self.document.element_type()
            )))
    }
}

fn any_shared(field_value: Comparable<'_>, value: Comparable<'_>) -> bool {
    match (field_value, value) {
        (Comparable::Array(array), Comparable::Array(values)) => values
            .iter()
            .any(|val| array.iter().any(|item| item == val)),
        (Comparable::Array(array), single_value) => array
            .iter()
            .any(|item| *item == single_value),
        (single_value, Comparable::Array(values)) => values
            .iter()
            .any(|val| *val == single_value),
        _ => false,
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = RepositoryError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(!self.visit_expr(expr)?)
    }

    fn visit_exists(&mut self, field: &str, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(self.fields()?.get(field).is_some() == should_exist)
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.fields()?.get(field) else {
            // A missing field only satisfies the negative operators.
            return Ok(matches!(op, FieldOp::Ne | FieldOp::NoneOf));
        };

        let left = Comparable::from(field_value);
        let right = Comparable::from(value);

        Ok(match op {
            FieldOp::Eq => left == right,
            FieldOp::Ne => left != right,
            FieldOp::Gt | FieldOp::Gte | FieldOp::Lt | FieldOp::Lte => match left.partial_cmp(&right) {
                Some(ordering) => match op {
                    FieldOp::Gt => ordering == Ordering::Greater,
                    FieldOp::Gte => ordering != Ordering::Less,
                    FieldOp::Lt => ordering == Ordering::Less,
                    _ => ordering != Ordering::Greater,
                },
                None => false,
            },
            FieldOp::Contains => match (left, right) {
                (Comparable::Array(array), Comparable::Array(values)) => values
                    .iter()
                    .all(|value| array.iter().any(|element| element == value)),
                (Comparable::Array(array), item) => array.iter().any(|element| *element == item),
                (Comparable::String(haystack), Comparable::String(needle)) => haystack.contains(needle),
                _ => false,
            },
            FieldOp::StartsWith => match (left, right) {
                (Comparable::String(text), Comparable::String(prefix)) => text.starts_with(prefix),
                _ => false,
            },
            FieldOp::AnyOf => any_shared(left, right),
            FieldOp::NoneOf => !any_shared(left, right),
        })
    }
}
