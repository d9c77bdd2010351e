use std::borrow::Cow;

use crate::sql::Token;
use crate::value::Value;

/// A SQL chunk represents a part of an SQL statement.
///
/// - `Token` - SQL keywords and operators (SELECT, FROM, =, etc.)
/// - `Ident` - Quoted identifiers ("table_name", "column_name")
/// - `Raw` - Unquoted raw SQL text (function names, format strings)
/// - `Number` - Inline integer literal (LIMIT / OFFSET, CASE ranks)
/// - `Param` - Bound value, rendered as a dialect placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SQLChunk<'a> {
    Token(Token),
    Ident(Cow<'a, str>),
    Raw(Cow<'a, str>),
    Number(i64),
    Param(Cow<'a, Value>),
}

impl<'a> SQLChunk<'a> {
    #[inline]
    pub const fn token(t: Token) -> Self {
        Self::Token(t)
    }

    #[inline]
    pub const fn ident_static(name: &'static str) -> Self {
        Self::Ident(Cow::Borrowed(name))
    }

    #[inline]
    pub const fn raw_static(text: &'static str) -> Self {
        Self::Raw(Cow::Borrowed(text))
    }

    #[inline]
    pub fn ident(name: impl Into<Cow<'a, str>>) -> Self {
        Self::Ident(name.into())
    }

    #[inline]
    pub fn raw(text: impl Into<Cow<'a, str>>) -> Self {
        Self::Raw(text.into())
    }

    #[inline]
    pub fn param(value: impl Into<Cow<'a, Value>>) -> Self {
        Self::Param(value.into())
    }

    /// Write chunk content to buffer. Params are written by the caller,
    /// which knows the placeholder index.
    pub(crate) fn write(&self, buf: &mut impl core::fmt::Write) {
        match self {
            SQLChunk::Token(token) => {
                let _ = buf.write_str(token.as_str());
            }
            SQLChunk::Ident(name) => {
                let _ = buf.write_char('"');
                for c in name.chars() {
                    if c == '"' {
                        let _ = buf.write_char('"');
                    }
                    let _ = buf.write_char(c);
                }
                let _ = buf.write_char('"');
            }
            SQLChunk::Raw(text) => {
                let _ = buf.write_str(text);
            }
            SQLChunk::Number(n) => {
                let _ = write!(buf, "{n}");
            }
            SQLChunk::Param(_) => {
                let _ = buf.write_char('?');
            }
        }
    }

    /// Check if this chunk is "word-like" (needs space separation from other word-like chunks)
    #[inline]
    pub(crate) const fn is_word_like(&self) -> bool {
        match self {
            SQLChunk::Token(t) => !t.is_punctuation() && !t.is_operator(),
            SQLChunk::Ident(_) | SQLChunk::Raw(_) | SQLChunk::Number(_) | SQLChunk::Param(_) => {
                true
            }
        }
    }
}

impl<'a> From<Token> for SQLChunk<'a> {
    #[inline]
    fn from(value: Token) -> Self {
        Self::Token(value)
    }
}

impl<'a> From<Value> for SQLChunk<'a> {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Param(Cow::Owned(value))
    }
}

impl<'a> From<&'a Value> for SQLChunk<'a> {
    #[inline]
    fn from(value: &'a Value) -> Self {
        Self::Param(Cow::Borrowed(value))
    }
}
