mod chunk;
mod tokens;

use std::borrow::Cow;

use core::fmt::Write;
use smallvec::SmallVec;

pub use chunk::*;
pub use tokens::*;

use crate::dialect::Dialect;
use crate::value::Value;

/// SQL fragment builder with flat chunk storage.
///
/// Uses `SmallVec<[SQLChunk; 8]>` for inline storage of typical SQL fragments
/// without heap allocation. Rendering is deferred to [`SQL::build`], which
/// numbers placeholders for the target [`Dialect`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SQL<'a> {
    pub chunks: SmallVec<[SQLChunk<'a>; 8]>,
}

impl<'a> SQL<'a> {
    // ==================== constructors ====================

    #[inline]
    pub const fn empty() -> Self {
        Self {
            chunks: SmallVec::new_const(),
        }
    }

    #[inline]
    pub fn token(t: Token) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Token(t)],
        }
    }

    #[inline]
    pub fn ident(name: impl Into<Cow<'a, str>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Ident(name.into())],
        }
    }

    #[inline]
    pub fn raw(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Raw(text.into())],
        }
    }

    #[inline]
    pub fn number(value: i64) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Number(value)],
        }
    }

    #[inline]
    pub fn param(value: impl Into<Cow<'a, Value>>) -> Self {
        Self {
            chunks: smallvec::smallvec![SQLChunk::Param(value.into())],
        }
    }

    /// Function call: `name(args)`
    pub fn func(name: &'static str, args: SQL<'a>) -> Self {
        SQL::raw(name)
            .push(Token::LPAREN)
            .append(args)
            .push(Token::RPAREN)
    }

    // ==================== builder methods ====================

    /// Append another SQL fragment (flat extend)
    #[inline]
    pub fn append(mut self, other: impl Into<SQL<'a>>) -> Self {
        self.append_mut(other);
        self
    }

    #[inline]
    pub fn append_mut(&mut self, other: impl Into<SQL<'a>>) {
        let other = other.into();
        if self.chunks.is_empty() {
            self.chunks = other.chunks;
            return;
        }
        self.chunks.extend(other.chunks);
    }

    #[inline]
    pub fn push(mut self, chunk: impl Into<SQLChunk<'a>>) -> Self {
        self.chunks.push(chunk.into());
        self
    }

    #[inline]
    pub fn push_mut(&mut self, chunk: impl Into<SQLChunk<'a>>) {
        self.chunks.push(chunk.into());
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    // ==================== combinators ====================

    /// Joins multiple SQL fragments with a separator
    pub fn join<I>(sqls: I, separator: Token) -> SQL<'a>
    where
        I: IntoIterator<Item = SQL<'a>>,
    {
        let mut iter = sqls.into_iter();
        let Some(mut result) = iter.next() else {
            return SQL::empty();
        };
        for item in iter {
            result.chunks.push(SQLChunk::Token(separator));
            result.chunks.extend(item.chunks);
        }
        result
    }

    /// Wrap in parentheses: (self)
    #[inline]
    pub fn parens(self) -> Self {
        SQL::token(Token::LPAREN).append(self).push(Token::RPAREN)
    }

    /// Comma-separated list of quoted identifiers.
    pub fn ident_list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        let mut chunks = SmallVec::new();
        for (i, name) in names.into_iter().enumerate() {
            if i > 0 {
                chunks.push(SQLChunk::Token(Token::COMMA));
            }
            chunks.push(SQLChunk::Ident(name.into()));
        }
        SQL { chunks }
    }

    /// Comma-separated list of parameters.
    pub fn param_list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cow<'a, Value>>,
    {
        let iter = values.into_iter();
        let (lower, _) = iter.size_hint();
        let mut chunks = SmallVec::with_capacity(lower.saturating_mul(2));
        for (i, v) in iter.enumerate() {
            if i > 0 {
                chunks.push(SQLChunk::Token(Token::COMMA));
            }
            chunks.push(SQLChunk::Param(v.into()));
        }
        SQL { chunks }
    }

    /// Comma-separated list of column assignments: "col" = ?
    pub fn assignments<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<Cow<'a, str>>,
        T: Into<Cow<'a, Value>>,
    {
        let mut chunks = SmallVec::new();
        for (i, (col, val)) in pairs.into_iter().enumerate() {
            if i > 0 {
                chunks.push(SQLChunk::Token(Token::COMMA));
            }
            chunks.push(SQLChunk::Ident(col.into()));
            chunks.push(SQLChunk::Token(Token::EQ));
            chunks.push(SQLChunk::Param(val.into()));
        }
        SQL { chunks }
    }

    // ==================== rendering ====================

    /// Renders the SQL text and collects the bound values in a single pass.
    pub fn build(&self, dialect: Dialect) -> Statement {
        let mut buf = String::with_capacity(self.chunks.len().saturating_mul(8).max(64));
        let mut params = Vec::new();

        for (i, chunk) in self.chunks.iter().enumerate() {
            match chunk {
                SQLChunk::Param(value) => {
                    params.push(value.clone().into_owned());
                    dialect.write_placeholder(params.len(), &mut buf);
                }
                _ => chunk.write(&mut buf),
            }
            if self.needs_space(i) {
                let _ = buf.write_char(' ');
            }
        }

        Statement { sql: buf, params }
    }

    /// Just the SQL text for `dialect`.
    pub fn sql(&self, dialect: Dialect) -> String {
        self.build(dialect).sql
    }

    /// Returns an iterator over references to parameter values
    pub fn params(&self) -> impl Iterator<Item = &Value> {
        self.chunks.iter().filter_map(|chunk| match chunk {
            SQLChunk::Param(value) => Some(value.as_ref()),
            _ => None,
        })
    }

    fn needs_space(&self, index: usize) -> bool {
        let Some(next) = self.chunks.get(index + 1) else {
            return false;
        };
        chunk_needs_space(&self.chunks[index], next)
    }
}

/// Canonical spacing logic for SQL chunk rendering.
pub(crate) fn chunk_needs_space(current: &SQLChunk<'_>, next: &SQLChunk<'_>) -> bool {
    if let SQLChunk::Raw(text) = current
        && text.ends_with(' ')
    {
        return false;
    }
    if let SQLChunk::Raw(text) = next
        && text.starts_with(' ')
    {
        return false;
    }

    match (current, next) {
        // No space before closing/separator punctuation
        (_, SQLChunk::Token(Token::RPAREN | Token::COMMA)) => false,
        // No space after opening punctuation
        (SQLChunk::Token(Token::LPAREN), _) => false,
        // Space after comma
        (SQLChunk::Token(Token::COMMA), _) => true,
        // Space after closing paren if next is word-like (e.g., ") AS")
        (SQLChunk::Token(Token::RPAREN), next) => next.is_word_like(),
        // Function calls: count(, CAST(, EXTRACT(
        (
            SQLChunk::Raw(_) | SQLChunk::Token(Token::CAST | Token::EXTRACT),
            SQLChunk::Token(Token::LPAREN),
        ) => false,
        // Space before opening paren if preceded by word-like (e.g., "IN (")
        (current, SQLChunk::Token(Token::LPAREN)) => current.is_word_like(),
        // Space around comparison operators
        (SQLChunk::Token(t), _) if t.is_operator() => true,
        (_, SQLChunk::Token(t)) if t.is_operator() => true,
        // Space between all word-like chunks
        _ => current.is_word_like() && next.is_word_like(),
    }
}

impl<'a> From<Token> for SQL<'a> {
    fn from(value: Token) -> Self {
        SQL::token(value)
    }
}

impl<'a> From<SQLChunk<'a>> for SQL<'a> {
    fn from(value: SQLChunk<'a>) -> Self {
        Self {
            chunks: smallvec::smallvec![value],
        }
    }
}

impl<'a> FromIterator<SQLChunk<'a>> for SQL<'a> {
    fn from_iter<I: IntoIterator<Item = SQLChunk<'a>>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

/// A rendered statement: SQL text plus the values bound to its placeholders,
/// in placeholder order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statement {
    pub(crate) sql: String,
    pub(crate) params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    #[inline]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[inline]
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

impl core::fmt::Display for Statement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.sql)
    }
}
