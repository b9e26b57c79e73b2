//! Filter translation from docrepo expressions to MongoDB query documents.

use bson::{Bson, Document, doc};

use docrepo_core::{
    error::RepositoryError,
    query::{Expr, FieldOp, QueryVisitor},
};


/// Translates filter expressions into MongoDB query documents.
///
/// String operators become escaped regular expressions, so they match literally
/// and case-sensitively. `Contains` with an array value becomes `$all`: every
/// listed element must be present in the field.
pub(crate) struct MongoQueryTranslator;

impl MongoQueryTranslator {
    /// Translates `expr` into a query document.
    pub(crate) fn translate(expr: &Expr) -> Result<Document, RepositoryError> {
        MongoQueryTranslator.visit_expr(expr)
    }
}

fn escape_regex(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for ch in input.chars() {
        if "\\^$.|?*+()[]{}".contains(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }

    escaped
}

fn expect_array(op: &str, value: &Bson) -> Result<Bson, RepositoryError> {
    match value {
        Bson::Array(_) => Ok(value.clone()),
        other => Err(RepositoryError::InvalidFilter(format!(
            "{op} requires an array value, found {:?}",
            other.element_type()
        ))),
    }
}

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = RepositoryError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$or": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        // `$not` only applies to field operators; `$nor` negates a whole clause.
        Ok(doc! {
            "$nor": [self.visit_expr(expr)?],
        })
    }

    fn visit_exists(&mut self, field: &str, should_exist: bool) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: { "$exists": should_exist },
        })
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value.clone() },
                FieldOp::Ne => doc! { "$ne": value.clone() },
                FieldOp::Gt => doc! { "$gt": value.clone() },
                FieldOp::Gte => doc! { "$gte": value.clone() },
                FieldOp::Lt => doc! { "$lt": value.clone() },
                FieldOp::Lte => doc! { "$lte": value.clone() },
                FieldOp::Contains => match value {
                    Bson::String(s) => doc! { "$regex": escape_regex(s) },
                    Bson::Array(arr) => doc! { "$all": arr.clone() },
                    // Equality against an array field matches any element.
                    other => doc! { "$eq": other.clone() },
                },
                FieldOp::StartsWith => match value {
                    Bson::String(s) => doc! { "$regex": format!("^{}", escape_regex(s)) },
                    _ => return Err(RepositoryError::InvalidFilter(
                        "StartsWith operator requires a string value".to_string(),
                    )),
                },
                FieldOp::AnyOf => doc! { "$in": expect_array("AnyOf", value)? },
                FieldOp::NoneOf => doc! { "$nin": expect_array("NoneOf", value)? },
            }
        })
    }
}
