use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub(crate) const fn token(&self) -> crate::sql::Token {
        match self {
            Direction::Asc => crate::sql::Token::ASC,
            Direction::Desc => crate::sql::Token::DESC,
        }
    }
}

/// One ORDER BY clause.
///
/// With `explicit_order`, rows are ranked by the position of the field's
/// value in that list instead of by the value itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Sort {
    pub(crate) field: String,
    pub(crate) direction: Direction,
    pub(crate) explicit_order: Option<Vec<Value>>,
}

impl Sort {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
            explicit_order: None,
        }
    }

    /// An empty list means no explicit order.
    pub fn with_order(mut self, values: Vec<Value>) -> Self {
        self.explicit_order = (!values.is_empty()).then_some(values);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn explicit_order(&self) -> Option<&[Value]> {
        self.explicit_order.as_deref()
    }
}
