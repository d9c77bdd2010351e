use crate::error::{ProwlError, Result};
use crate::query::{DatePart, Operator};
use crate::schema::Schema;
use crate::value::Value;

/// One WHERE condition.
///
/// Only constructed through [`Predicate::new`], so a predicate always
/// names a declared field and carries a valid number of operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    field: String,
    operator: Operator,
    operands: Vec<Value>,
    date_part: Option<DatePart>,
}

impl Predicate {
    pub fn new(
        schema: &dyn Schema,
        field: &str,
        operator: Operator,
        operands: Vec<Value>,
        date_part: Option<DatePart>,
    ) -> Result<Self> {
        let declared = schema.require_field(field)?;

        if !operator.arity().accepts(operands.len()) {
            return Err(ProwlError::InvalidOperandCount {
                verb: operator.name(),
                field: declared.name.clone(),
                expected: operator.arity().describe(),
                got: operands.len(),
            });
        }

        if date_part.is_some() && !declared.field_type.is_temporal() {
            return Err(ProwlError::UnsupportedFieldType {
                field: declared.name.clone(),
                field_type: declared.field_type,
                operation: "date part extraction",
            });
        }

        if operator.is_pattern()
            && matches!(
                declared.field_type,
                crate::schema::FieldType::Blob | crate::schema::FieldType::Bool
            )
        {
            return Err(ProwlError::UnsupportedFieldType {
                field: declared.name.clone(),
                field_type: declared.field_type,
                operation: "pattern matching",
            });
        }

        Ok(Self {
            field: declared.name.clone(),
            operator,
            operands,
            date_part,
        })
    }

    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[inline]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[inline]
    pub fn operands(&self) -> &[Value] {
        &self.operands
    }

    #[inline]
    pub fn date_part(&self) -> Option<DatePart> {
        self.date_part
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldType, TableSchema};

    fn schema() -> TableSchema {
        TableSchema::new("foo")
            .with_primary_key("_id", FieldType::Integer)
            .with_field("bar", FieldType::Text)
            .with_field("created", FieldType::DateTime)
            .with_field("data", FieldType::Blob)
    }

    #[test]
    fn resolves_pk_alias_to_declared_name() {
        let p = Predicate::new(&schema(), "pk", Operator::Eq, vec![1.into()], None).unwrap();
        assert_eq!(p.field(), "_id");
    }

    #[test]
    fn empty_in_is_rejected() {
        let err = Predicate::new(&schema(), "bar", Operator::In, vec![], None).unwrap_err();
        assert!(matches!(
            err,
            ProwlError::InvalidOperandCount { verb: "in", got: 0, .. }
        ));
    }

    #[test]
    fn between_needs_two() {
        let err =
            Predicate::new(&schema(), "_id", Operator::Between, vec![1.into()], None).unwrap_err();
        assert!(matches!(err, ProwlError::InvalidOperandCount { got: 1, .. }));
    }

    #[test]
    fn date_part_requires_temporal_field() {
        assert!(
            Predicate::new(&schema(), "created", Operator::Eq, vec![7.into()], Some(DatePart::Day))
                .is_ok()
        );
        let err = Predicate::new(&schema(), "bar", Operator::Eq, vec![7.into()], Some(DatePart::Day))
            .unwrap_err();
        assert!(matches!(
            err,
            ProwlError::UnsupportedFieldType { field_type: FieldType::Text, .. }
        ));
    }

    #[test]
    fn pattern_on_blob_is_rejected() {
        let err = Predicate::new(&schema(), "data", Operator::Contains, vec!["x".into()], None)
            .unwrap_err();
        assert!(matches!(err, ProwlError::UnsupportedFieldType { .. }));
    }
}
