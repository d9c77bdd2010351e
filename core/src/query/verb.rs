//! Verb vocabulary for pseudo-method names and date-part keywords.

use crate::error::{ProwlError, Result};
use crate::value::Value;

/// Comparison operator of a [`Predicate`](super::Predicate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Between,
    StartsWith,
    EndsWith,
    Contains,
}

/// How many operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    One,
    Two,
    AtLeastOne,
}

impl Arity {
    pub const fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::One => count == 1,
            Arity::Two => count == 2,
            Arity::AtLeastOne => count >= 1,
        }
    }

    pub const fn describe(&self) -> &'static str {
        match self {
            Arity::One => "exactly 1",
            Arity::Two => "exactly 2",
            Arity::AtLeastOne => "at least 1",
        }
    }
}

impl Operator {
    /// Canonical verb name.
    pub const fn name(&self) -> &'static str {
        match self {
            Operator::Eq => "is",
            Operator::Ne => "not",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::In => "in",
            Operator::NotIn => "nin",
            Operator::Between => "between",
            Operator::StartsWith => "startswith",
            Operator::EndsWith => "endswith",
            Operator::Contains => "contains",
        }
    }

    pub const fn arity(&self) -> Arity {
        match self {
            Operator::In | Operator::NotIn => Arity::AtLeastOne,
            Operator::Between => Arity::Two,
            _ => Arity::One,
        }
    }

    /// LIKE-based operators.
    pub const fn is_pattern(&self) -> bool {
        matches!(
            self,
            Operator::StartsWith | Operator::EndsWith | Operator::Contains
        )
    }

    pub fn parse(name: &str) -> Result<Self> {
        match Verb::parse(name) {
            Some(Verb::Where(op)) => Ok(op),
            _ => Err(ProwlError::InvalidOperator(name.to_string())),
        }
    }
}

/// Leading word of a pseudo-method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Where(Operator),
    Asc,
    Desc,
    Select,
}

/// Every recognised verb spelling, aliases included.
pub static VERBS: &[(&str, Verb)] = &[
    ("is", Verb::Where(Operator::Eq)),
    ("eq", Verb::Where(Operator::Eq)),
    ("not", Verb::Where(Operator::Ne)),
    ("ne", Verb::Where(Operator::Ne)),
    ("in", Verb::Where(Operator::In)),
    ("nin", Verb::Where(Operator::NotIn)),
    ("gt", Verb::Where(Operator::Gt)),
    ("gte", Verb::Where(Operator::Gte)),
    ("lt", Verb::Where(Operator::Lt)),
    ("lte", Verb::Where(Operator::Lte)),
    ("between", Verb::Where(Operator::Between)),
    ("startswith", Verb::Where(Operator::StartsWith)),
    ("endswith", Verb::Where(Operator::EndsWith)),
    ("contains", Verb::Where(Operator::Contains)),
    ("asc", Verb::Asc),
    ("desc", Verb::Desc),
    ("select", Verb::Select),
];

impl Verb {
    pub fn parse(name: &str) -> Option<Self> {
        VERBS
            .iter()
            .find_map(|(spelling, verb)| (*spelling == name).then_some(*verb))
    }
}

/// Component extracted from a date or datetime field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    DayOfWeek,
    DayOfYear,
    /// ISO-8601 week number (1-53, weeks start on Monday and week 1 holds
    /// the year's first Thursday). SQLite renders it with `%V`, which needs
    /// SQLite 3.46 or newer; the bundled build qualifies.
    Week,
}

impl DatePart {
    pub fn parse(key: &str) -> Result<Self> {
        Ok(match key {
            "year" => DatePart::Year,
            "month" => DatePart::Month,
            "day" => DatePart::Day,
            "hour" => DatePart::Hour,
            "minute" => DatePart::Minute,
            "second" => DatePart::Second,
            "dow" => DatePart::DayOfWeek,
            "doy" => DatePart::DayOfYear,
            "week" => DatePart::Week,
            other => return Err(ProwlError::InvalidOperator(other.to_string())),
        })
    }

    /// `EXTRACT` unit on PostgreSQL.
    pub const fn postgres_unit(&self) -> &'static str {
        match self {
            DatePart::Year => "YEAR",
            DatePart::Month => "MONTH",
            DatePart::Day => "DAY",
            DatePart::Hour => "HOUR",
            DatePart::Minute => "MINUTE",
            DatePart::Second => "SECOND",
            DatePart::DayOfWeek => "DOW",
            DatePart::DayOfYear => "DOY",
            DatePart::Week => "WEEK",
        }
    }

    /// `strftime` format on SQLite.
    pub const fn sqlite_format(&self) -> &'static str {
        match self {
            DatePart::Year => "'%Y'",
            DatePart::Month => "'%m'",
            DatePart::Day => "'%d'",
            DatePart::Hour => "'%H'",
            DatePart::Minute => "'%M'",
            DatePart::Second => "'%S'",
            DatePart::DayOfWeek => "'%w'",
            DatePart::DayOfYear => "'%j'",
            DatePart::Week => "'%V'",
        }
    }

    /// Parses a keyword argument such as `day=7` or `month=1,2,3`.
    pub fn parse_kwarg(kwarg: &str) -> Result<(Self, Vec<Value>)> {
        let (key, raw) = kwarg
            .split_once('=')
            .ok_or_else(|| ProwlError::InvalidOperator(kwarg.to_string()))?;
        let part = DatePart::parse(key.trim())?;
        let values = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>()
                    .map(Value::Integer)
                    .map_err(|_| ProwlError::Mapping(format!("`{s}` is not an integer {key}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((part, values))
    }
}
