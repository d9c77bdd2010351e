//! SQL dialects and their placeholder syntax.

use core::fmt::Write;
use std::borrow::Cow;

/// Target SQL backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// SQLite - uses `?` positional placeholders
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "sqlite3"))]
    SQLite,

    /// PostgreSQL - uses `$1, $2, ...` numbered placeholders
    #[cfg_attr(feature = "serde", serde(alias = "postgres"))]
    PostgreSQL,
}

impl Dialect {
    /// Returns `true` if this dialect uses numbered placeholders (`$1, $2, ...`)
    #[inline]
    #[must_use]
    pub const fn uses_numbered_placeholders(&self) -> bool {
        matches!(self, Dialect::PostgreSQL)
    }

    /// Renders a placeholder for this dialect with the given 1-based index.
    ///
    /// Returns `Cow::Borrowed("?")` for SQLite (zero allocation),
    /// `Cow::Owned` for PostgreSQL numbered placeholders.
    #[inline]
    pub fn render_placeholder(&self, index: usize) -> Cow<'static, str> {
        match self {
            Dialect::PostgreSQL => Cow::Owned(format!("${}", index)),
            Dialect::SQLite => Cow::Borrowed("?"),
        }
    }

    /// Writes a placeholder directly into `buf`.
    #[inline]
    pub fn write_placeholder(&self, index: usize, buf: &mut impl Write) {
        let _ = match self {
            Dialect::PostgreSQL => write!(buf, "${}", index),
            Dialect::SQLite => buf.write_char('?'),
        };
    }

    /// Parse a dialect from a string (case-insensitive)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Some(Dialect::SQLite),
            "postgresql" | "postgres" | "pg" => Some(Dialect::PostgreSQL),
            _ => None,
        }
    }
}

impl core::fmt::Display for Dialect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Dialect::SQLite => "sqlite",
            Dialect::PostgreSQL => "postgresql",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders() {
        assert_eq!(Dialect::SQLite.render_placeholder(3), "?");
        assert_eq!(Dialect::PostgreSQL.render_placeholder(3), "$3");

        let mut buf = String::new();
        Dialect::PostgreSQL.write_placeholder(12, &mut buf);
        Dialect::SQLite.write_placeholder(12, &mut buf);
        assert_eq!(buf, "$12?");
    }

    #[test]
    fn parse_names() {
        assert_eq!(Dialect::parse("Postgres"), Some(Dialect::PostgreSQL));
        assert_eq!(Dialect::parse("sqlite3"), Some(Dialect::SQLite));
        assert_eq!(Dialect::parse("mysql"), None);
    }
}
