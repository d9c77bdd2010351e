/// SQL keywords, operators and punctuation.
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    SELECT,
    FROM,
    WHERE,
    AND,
    OR,
    ORDER,
    BY,
    ASC,
    DESC,
    LIMIT,
    OFFSET,
    IN,
    NOT,
    LIKE,
    IS,
    NULL,
    CASE,
    WHEN,
    THEN,
    ELSE,
    END,
    AS,
    CAST,
    INTEGER,
    TEXT,
    EXTRACT,
    DELETE,
    UPDATE,
    SET,
    INSERT,
    INTO,
    VALUES,
    DEFAULT,
    RETURNING,

    LPAREN,
    RPAREN,
    COMMA,
    STAR,
    EQ,
    NE,
    LT,
    LE,
    GT,
    GE,
}

impl Token {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Token::SELECT => "SELECT",
            Token::FROM => "FROM",
            Token::WHERE => "WHERE",
            Token::AND => "AND",
            Token::OR => "OR",
            Token::ORDER => "ORDER",
            Token::BY => "BY",
            Token::ASC => "ASC",
            Token::DESC => "DESC",
            Token::LIMIT => "LIMIT",
            Token::OFFSET => "OFFSET",
            Token::IN => "IN",
            Token::NOT => "NOT",
            Token::LIKE => "LIKE",
            Token::IS => "IS",
            Token::NULL => "NULL",
            Token::CASE => "CASE",
            Token::WHEN => "WHEN",
            Token::THEN => "THEN",
            Token::ELSE => "ELSE",
            Token::END => "END",
            Token::AS => "AS",
            Token::CAST => "CAST",
            Token::INTEGER => "INTEGER",
            Token::TEXT => "TEXT",
            Token::EXTRACT => "EXTRACT",
            Token::DELETE => "DELETE",
            Token::UPDATE => "UPDATE",
            Token::SET => "SET",
            Token::INSERT => "INSERT",
            Token::INTO => "INTO",
            Token::VALUES => "VALUES",
            Token::DEFAULT => "DEFAULT",
            Token::RETURNING => "RETURNING",
            Token::LPAREN => "(",
            Token::RPAREN => ")",
            Token::COMMA => ",",
            Token::STAR => "*",
            Token::EQ => "=",
            Token::NE => "!=",
            Token::LT => "<",
            Token::LE => "<=",
            Token::GT => ">",
            Token::GE => ">=",
        }
    }

    /// Comparison operators get a space on both sides.
    #[inline]
    pub const fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::EQ | Token::NE | Token::LT | Token::LE | Token::GT | Token::GE
        )
    }

    #[inline]
    pub const fn is_punctuation(&self) -> bool {
        matches!(self, Token::LPAREN | Token::RPAREN | Token::COMMA)
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
