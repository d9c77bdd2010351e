//! Table metadata consumed by the query builder.

use crate::error::{ProwlError, Result};

/// Name accepted anywhere a field is expected and resolved to the primary key.
pub const PK_ALIAS: &str = "pk";

/// Declared storage type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    Integer,
    Float,
    Text,
    Blob,
    Date,
    DateTime,
}

impl FieldType {
    /// Date and datetime fields accept date-part predicates.
    #[inline]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, FieldType::Date | FieldType::DateTime)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Text => "text",
            FieldType::Blob => "blob",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
        }
    }
}

impl core::fmt::Display for FieldType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    pub primary_key: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            primary_key: false,
        }
    }
}

/// Read-only view of a table's declared fields.
///
/// The builder holds a `&dyn Schema`, so implementations only need the two
/// required methods; everything else is derived from [`Schema::fields`].
pub trait Schema: Send + Sync {
    fn table_name(&self) -> &str;

    /// Declared fields, in declaration order.
    fn fields(&self) -> &[Field];

    fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }

    fn has_field(&self, name: &str) -> bool {
        self.resolve_field(name).is_some()
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields().iter().map(|f| f.name.as_str()).collect()
    }

    fn field_type(&self, name: &str) -> Option<FieldType> {
        self.resolve_field(name).map(|f| f.field_type)
    }

    fn is_temporal(&self, name: &str) -> bool {
        self.field_type(name).is_some_and(|t| t.is_temporal())
    }

    fn primary_key(&self) -> Option<&Field> {
        self.fields().iter().find(|f| f.primary_key)
    }

    /// Looks up a field by name, mapping the `pk` alias to the primary key
    /// when no field is literally called `pk`.
    fn resolve_field(&self, name: &str) -> Option<&Field> {
        self.field(name).or_else(|| {
            if name == PK_ALIAS {
                self.primary_key()
            } else {
                None
            }
        })
    }

    /// Like [`Schema::resolve_field`] but returns [`ProwlError::UnknownField`].
    fn require_field(&self, name: &str) -> Result<&Field> {
        self.resolve_field(name)
            .ok_or_else(|| ProwlError::UnknownField {
                table: self.table_name().to_string(),
                field: name.to_string(),
            })
    }

    fn require_primary_key(&self) -> Result<&Field> {
        self.primary_key()
            .ok_or_else(|| ProwlError::NoPrimaryKey(self.table_name().to_string()))
    }
}

/// Runtime-built [`Schema`].
///
/// ```
/// use prowl_core::schema::{FieldType, Schema, TableSchema};
///
/// let users = TableSchema::new("users")
///     .with_primary_key("_id", FieldType::Integer)
///     .with_field("name", FieldType::Text);
///
/// assert_eq!(users.resolve_field("pk").unwrap().name, "_id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    fields: Vec<Field>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(Field::new(name, field_type));
        self
    }

    pub fn with_primary_key(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        for field in &mut self.fields {
            field.primary_key = false;
        }
        self.fields.push(Field {
            primary_key: true,
            ..Field::new(name, field_type)
        });
        self
    }
}

impl Schema for TableSchema {
    fn table_name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema::new("events")
            .with_primary_key("_id", FieldType::Integer)
            .with_field("name", FieldType::Text)
            .with_field("created", FieldType::DateTime)
    }

    #[test]
    fn pk_alias_resolves_to_primary_key() {
        let s = schema();
        assert_eq!(s.resolve_field("pk").unwrap().name, "_id");
        assert_eq!(s.field_type("pk"), Some(FieldType::Integer));
        assert!(s.has_field("created"));
        assert!(s.is_temporal("created"));
        assert!(!s.is_temporal("name"));
        assert!(!s.has_field("missing"));
    }

    #[test]
    fn literal_pk_field_wins_over_alias() {
        let s = TableSchema::new("t")
            .with_primary_key("_id", FieldType::Integer)
            .with_field("pk", FieldType::Text);
        assert_eq!(s.resolve_field("pk").unwrap().field_type, FieldType::Text);
    }

    #[test]
    fn unknown_field_names_table() {
        let err = schema().require_field("nope").unwrap_err();
        assert!(matches!(
            err,
            ProwlError::UnknownField { ref table, ref field } if table == "events" && field == "nope"
        ));
    }

    #[test]
    fn missing_primary_key() {
        let s = TableSchema::new("t").with_field("a", FieldType::Text);
        assert!(s.resolve_field("pk").is_none());
        assert!(matches!(s.require_primary_key(), Err(ProwlError::NoPrimaryKey(_))));
    }
}
