//! Builder state to SQL.
//!
//! Every function here is pure: the same state always renders to the same
//! text with the same parameter order.

use std::borrow::Cow;

use crate::dialect::Dialect;
use crate::error::{ProwlError, Result};
use crate::query::{Bounds, DatePart, Operator, Predicate, QueryState, Sort};
use crate::schema::{FieldType, Schema};
use crate::sql::{SQL, SQLChunk, Statement, Token};
use crate::value::{DATE_FORMAT, DATETIME_FORMAT, Value};

/// Row window applied to a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// The query's own limit and offset.
    Bounds,
    /// One extra row past the limit, for `has_more` detection.
    Lookahead,
    /// A single row at the query's offset.
    One,
}

type Emitter = for<'a> fn(SQL<'a>, &'a [Value]) -> SQL<'a>;

/// Fragment emitter per operator. Operands are already arity-checked.
static EMITTERS: &[(Operator, Emitter)] = &[
    (Operator::Eq, emit_eq),
    (Operator::Ne, emit_ne),
    (Operator::Gt, emit_gt),
    (Operator::Gte, emit_gte),
    (Operator::Lt, emit_lt),
    (Operator::Lte, emit_lte),
    (Operator::In, emit_in),
    (Operator::NotIn, emit_not_in),
    (Operator::Between, emit_between),
    (Operator::StartsWith, emit_like),
    (Operator::EndsWith, emit_like),
    (Operator::Contains, emit_like),
];

fn emitter(operator: Operator) -> Emitter {
    EMITTERS
        .iter()
        .find_map(|(op, f)| (*op == operator).then_some(*f))
        .unwrap_or(emit_eq)
}

fn compare<'a>(lhs: SQL<'a>, token: Token, value: &'a Value) -> SQL<'a> {
    lhs.push(token).push(SQLChunk::Param(Cow::Borrowed(value)))
}

fn emit_eq<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    match &operands[0] {
        Value::Null => lhs.push(Token::IS).push(Token::NULL),
        v => compare(lhs, Token::EQ, v),
    }
}

fn emit_ne<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    match &operands[0] {
        Value::Null => lhs.push(Token::IS).push(Token::NOT).push(Token::NULL),
        v => compare(lhs, Token::NE, v),
    }
}

fn emit_gt<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    compare(lhs, Token::GT, &operands[0])
}

fn emit_gte<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    compare(lhs, Token::GE, &operands[0])
}

fn emit_lt<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    compare(lhs, Token::LT, &operands[0])
}

fn emit_lte<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    compare(lhs, Token::LE, &operands[0])
}

fn emit_in<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    lhs.push(Token::IN)
        .append(SQL::param_list(operands.iter()).parens())
}

fn emit_not_in<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    lhs.push(Token::NOT)
        .push(Token::IN)
        .append(SQL::param_list(operands.iter()).parens())
}

fn emit_between<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    compare(lhs.clone(), Token::GE, &operands[0])
        .push(Token::AND)
        .append(compare(lhs, Token::LE, &operands[1]))
}

/// The wildcard is attached by [`like_pattern`]; the operand here is the
/// already-wrapped pattern.
fn emit_like<'a>(lhs: SQL<'a>, operands: &'a [Value]) -> SQL<'a> {
    lhs.push(Token::LIKE).push(SQLChunk::Param(Cow::Borrowed(&operands[0])))
}

/// Text form of a LIKE operand.
fn pattern_text(value: &Value) -> String {
    match value {
        Value::Text(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Date(d) => d.format(DATE_FORMAT).to_string(),
        Value::DateTime(dt) => dt.format(DATETIME_FORMAT).to_string(),
        Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
        Value::Null => String::new(),
    }
}

/// Wraps a LIKE operand with `%` according to the operator.
pub fn like_pattern(operator: Operator, value: &Value) -> Value {
    let text = pattern_text(value);
    Value::Text(match operator {
        Operator::StartsWith => format!("{text}%"),
        Operator::EndsWith => format!("%{text}"),
        _ => format!("%{text}%"),
    })
}

fn limit_number<'a>(n: u64) -> SQL<'a> {
    SQL::number(i64::try_from(n).unwrap_or(i64::MAX))
}

/// Renders [`QueryState`] for one schema and dialect.
#[derive(Clone, Copy)]
pub struct Compiler<'s> {
    schema: &'s dyn Schema,
    dialect: Dialect,
}

impl<'s> Compiler<'s> {
    pub fn new(schema: &'s dyn Schema, dialect: Dialect) -> Self {
        Self { schema, dialect }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// SELECT with the query's bounds as set.
    pub fn select(&self, state: &QueryState) -> Statement {
        self.select_window(state, Window::Bounds)
    }

    /// SELECT with the given row window. A raw override is returned as is.
    pub fn select_window(&self, state: &QueryState, window: Window) -> Statement {
        if let Some(raw) = &state.raw {
            return Statement::new(raw.sql.clone(), raw.params.clone());
        }

        let patterns = self.patterns(state);
        let mut sql = SQL::token(Token::SELECT)
            .append(self.projection(state))
            .push(Token::FROM)
            .append(self.table());
        sql.append_mut(self.where_clause(&state.predicates, &patterns));
        sql.append_mut(self.order_by(&state.sorts));
        sql.append_mut(self.window(&state.bounds, window));
        sql.build(self.dialect)
    }

    /// `SELECT count(*) AS ct`, ignoring sorts, bounds and selection.
    ///
    /// A raw statement is counted as a subquery.
    pub fn count(&self, state: &QueryState) -> Statement {
        let count = SQL::token(Token::SELECT)
            .append(SQL::func("count", SQL::token(Token::STAR)))
            .push(Token::AS)
            .append(SQL::raw("ct"))
            .push(Token::FROM);

        if let Some(raw) = &state.raw {
            let sql = count
                .append(SQL::raw(raw.sql.as_str()).parens())
                .push(Token::AS)
                .append(SQL::raw("prowl_raw"));
            let mut stmt = sql.build(self.dialect);
            stmt.params = raw.params.clone();
            return stmt;
        }

        let patterns = self.patterns(state);
        count
            .append(self.table())
            .append(self.where_clause(&state.predicates, &patterns))
            .build(self.dialect)
    }

    /// `DELETE FROM "t" WHERE ...`
    pub fn delete(&self, state: &QueryState) -> Statement {
        let patterns = self.patterns(state);
        SQL::token(Token::DELETE)
            .push(Token::FROM)
            .append(self.table())
            .append(self.where_clause(&state.predicates, &patterns))
            .build(self.dialect)
    }

    /// `UPDATE "t" SET "f" = ?, ... WHERE ...`
    pub fn update(&self, state: &QueryState) -> Result<Statement> {
        if state.assignments.is_empty() {
            return Err(ProwlError::NoAssignments("update"));
        }
        let patterns = self.patterns(state);
        let assignments = state
            .assignments
            .iter()
            .map(|(field, value)| (field.as_str(), value));
        Ok(SQL::token(Token::UPDATE)
            .append(self.table())
            .push(Token::SET)
            .append(SQL::assignments(assignments))
            .append(self.where_clause(&state.predicates, &patterns))
            .build(self.dialect))
    }

    /// `INSERT INTO "t" ("f", ...) VALUES (?, ...) RETURNING "pk"`
    ///
    /// RETURNING is only added when the schema declares a primary key.
    pub fn insert(&self, state: &QueryState) -> Result<Statement> {
        if state.assignments.is_empty() {
            return Err(ProwlError::NoAssignments("insert"));
        }
        let fields = state.assignments.iter().map(|(f, _)| f.as_str());
        let values = state.assignments.iter().map(|(_, v)| v);

        let mut sql = SQL::token(Token::INSERT)
            .push(Token::INTO)
            .append(self.table())
            .append(SQL::ident_list(fields).parens())
            .push(Token::VALUES)
            .append(SQL::param_list(values).parens());
        if let Some(pk) = self.schema.primary_key() {
            sql = sql.push(Token::RETURNING).append(SQL::ident(pk.name.as_str()));
        }
        Ok(sql.build(self.dialect))
    }

    // ==================== clauses ====================

    fn table<'a>(&self) -> SQL<'a>
    where
        's: 'a,
    {
        SQL::ident(self.schema.table_name())
    }

    fn projection<'a>(&self, state: &'a QueryState) -> SQL<'a>
    where
        's: 'a,
    {
        let selection = &state.selection;
        if selection.is_wildcard() {
            return SQL::token(Token::STAR);
        }
        if !selection.fields().is_empty() {
            return SQL::ident_list(selection.fields().iter().map(String::as_str));
        }
        let declared = self.schema.fields();
        if declared.is_empty() {
            return SQL::token(Token::STAR);
        }
        SQL::ident_list(declared.iter().map(|f| f.name.as_str()))
    }

    /// LIKE operands rewritten with their `%` wildcards, one slot per predicate.
    fn patterns(&self, state: &QueryState) -> Vec<Option<[Value; 1]>> {
        state
            .predicates
            .iter()
            .map(|p| {
                p.operator()
                    .is_pattern()
                    .then(|| [like_pattern(p.operator(), &p.operands()[0])])
            })
            .collect()
    }

    fn where_clause<'a>(
        &self,
        predicates: &'a [Predicate],
        patterns: &'a [Option<[Value; 1]>],
    ) -> SQL<'a>
    where
        's: 'a,
    {
        if predicates.is_empty() {
            return SQL::empty();
        }
        let fragments = predicates.iter().zip(patterns).map(|(p, pattern)| {
            let operands = match pattern {
                Some(pattern) => pattern.as_slice(),
                None => p.operands(),
            };
            emitter(p.operator())(self.lhs(p), operands)
        });
        SQL::token(Token::WHERE).append(SQL::join(fragments, Token::AND))
    }

    /// Left hand side of a predicate: the column, or the extracted date part.
    fn lhs<'a>(&self, predicate: &'a Predicate) -> SQL<'a> {
        let column = SQL::ident(predicate.field());
        match predicate.date_part() {
            Some(part) => self.date_part(part, column),
            None if predicate.operator().is_pattern() && self.needs_text_cast(predicate) => {
                SQL::token(Token::CAST).append(column.push(Token::AS).push(Token::TEXT).parens())
            }
            None => column,
        }
    }

    /// PostgreSQL has no `LIKE` for non-text columns.
    fn needs_text_cast(&self, predicate: &Predicate) -> bool {
        self.dialect == Dialect::PostgreSQL
            && self
                .schema
                .field_type(predicate.field())
                .is_some_and(|t| t != FieldType::Text)
    }

    fn date_part<'a>(&self, part: DatePart, column: SQL<'a>) -> SQL<'a> {
        let extracted = match self.dialect {
            Dialect::PostgreSQL => SQL::token(Token::EXTRACT).append(
                SQL::raw(part.postgres_unit())
                    .push(Token::FROM)
                    .append(column)
                    .parens(),
            ),
            Dialect::SQLite => SQL::func(
                "strftime",
                SQL::raw(part.sqlite_format())
                    .push(Token::COMMA)
                    .append(column),
            ),
        };
        SQL::token(Token::CAST).append(
            extracted
                .push(Token::AS)
                .push(Token::INTEGER)
                .parens(),
        )
    }

    fn order_by<'a>(&self, sorts: &'a [Sort]) -> SQL<'a> {
        if sorts.is_empty() {
            return SQL::empty();
        }
        let clauses = sorts.iter().map(|sort| {
            let column = SQL::ident(sort.field());
            let key = match sort.explicit_order() {
                None => column,
                Some(order) => {
                    let mut case = SQL::token(Token::CASE).append(column);
                    for (rank, value) in order.iter().enumerate() {
                        case = case
                            .push(Token::WHEN)
                            .push(SQLChunk::Param(Cow::Borrowed(value)))
                            .push(Token::THEN)
                            .push(SQLChunk::Number(rank as i64));
                    }
                    case.push(Token::ELSE)
                        .push(SQLChunk::Number(order.len() as i64))
                        .push(Token::END)
                }
            };
            key.push(sort.direction().token())
        });
        SQL::token(Token::ORDER)
            .push(Token::BY)
            .append(SQL::join(clauses, Token::COMMA))
    }

    fn window<'a>(&self, bounds: &Bounds, window: Window) -> SQL<'a> {
        let limit = match window {
            Window::Bounds => bounds.limit(),
            Window::Lookahead => bounds.limit().map(|l| l.saturating_add(1)),
            Window::One => Some(1),
        };
        let offset = bounds.offset();

        let mut sql = SQL::empty();
        match (limit, offset) {
            (Some(limit), offset) => {
                sql = sql.push(Token::LIMIT).append(limit_number(limit));
                if let Some(offset) = offset {
                    sql = sql.push(Token::OFFSET).append(limit_number(offset));
                }
            }
            (None, Some(offset)) => {
                if self.dialect == Dialect::SQLite {
                    sql = sql.push(Token::LIMIT).push(SQLChunk::Number(-1));
                }
                sql = sql.push(Token::OFFSET).append(limit_number(offset));
            }
            (None, None) => {}
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use crate::schema::{FieldType, TableSchema};

    fn foo() -> TableSchema {
        TableSchema::new("foo")
            .with_primary_key("_id", FieldType::Integer)
            .with_field("bar", FieldType::Integer)
            .with_field("che", FieldType::Text)
            .with_field("created", FieldType::DateTime)
    }

    #[test]
    fn empty_state_selects_declared_fields() {
        let s = foo();
        let stmt = Query::new(&s, Dialect::SQLite).compile();
        assert_eq!(
            stmt.sql(),
            r#"SELECT "_id", "bar", "che", "created" FROM "foo""#
        );
        assert!(stmt.params().is_empty());
    }

    #[test]
    fn predicates_in_append_order() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::PostgreSQL)
            .gt_field("bar", 5)?
            .in_field("che", ["a", "b"])?
            .nin_field("pk", [1, 2])?
            .not_field("che", "z")?;
        let stmt = q.compile();
        assert_eq!(
            stmt.sql(),
            r#"SELECT "_id", "bar", "che", "created" FROM "foo" WHERE "bar" > $1 AND "che" IN ($2, $3) AND "_id" NOT IN ($4, $5) AND "che" != $6"#
        );
        assert_eq!(
            stmt.params(),
            &[
                Value::Integer(5),
                Value::from("a"),
                Value::from("b"),
                Value::Integer(1),
                Value::Integer(2),
                Value::from("z"),
            ]
        );
        Ok(())
    }

    #[test]
    fn compiling_is_deterministic() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::PostgreSQL)
            .between_field("bar", 1, 10)?
            .asc_in("che", ["x", "y"])?
            .limit(5)?
            .page(3)?;
        assert_eq!(q.compile(), q.compile());
        Ok(())
    }

    #[test]
    fn null_compares_with_is() -> Result<()> {
        let s = foo();
        let stmt = Query::new(&s, Dialect::SQLite)
            .is_field("che", Value::Null)?
            .not_field("bar", None::<i64>)?
            .compile();
        assert!(stmt.sql().ends_with(r#"WHERE "che" IS NULL AND "bar" IS NOT NULL"#));
        assert!(stmt.params().is_empty());
        Ok(())
    }

    #[test]
    fn between_does_not_order_its_bounds() -> Result<()> {
        let s = foo();
        let stmt = Query::new(&s, Dialect::SQLite)
            .select(["bar"])?
            .between_field("bar", 10, 1)?
            .compile();
        assert_eq!(
            stmt.sql(),
            r#"SELECT "bar" FROM "foo" WHERE "bar" >= ? AND "bar" <= ?"#
        );
        assert_eq!(stmt.params(), &[Value::Integer(10), Value::Integer(1)]);
        Ok(())
    }

    #[test]
    fn like_values_are_bound() -> Result<()> {
        let s = foo();
        let stmt = Query::new(&s, Dialect::SQLite)
            .startswith_field("che", "Al")?
            .endswith_field("che", "ce")?
            .contains_field("che", "l'i")?
            .compile();
        assert!(
            stmt.sql()
                .ends_with(r#"WHERE "che" LIKE ? AND "che" LIKE ? AND "che" LIKE ?"#)
        );
        assert!(!stmt.sql().contains("Al"));
        assert_eq!(
            stmt.params(),
            &[Value::from("Al%"), Value::from("%ce"), Value::from("%l'i%")]
        );
        Ok(())
    }

    #[test]
    fn like_on_non_text_columns_casts_on_postgres() -> Result<()> {
        let s = foo();
        let stmt = Query::new(&s, Dialect::PostgreSQL)
            .startswith_field("bar", 12)?
            .contains_field("che", "x")?
            .compile();
        assert!(stmt.sql().ends_with(
            r#"WHERE CAST("bar" AS TEXT) LIKE $1 AND "che" LIKE $2"#
        ));
        assert_eq!(stmt.params(), &[Value::from("12%"), Value::from("%x%")]);

        let stmt = Query::new(&s, Dialect::SQLite).startswith_field("bar", 12)?.compile();
        assert!(stmt.sql().ends_with(r#"WHERE "bar" LIKE ?"#));
        Ok(())
    }

    #[test]
    fn week_is_iso_on_both_dialects() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::SQLite).where_date("is", "created", ["week=52"])?;
        assert!(
            q.compile()
                .sql()
                .ends_with(r#"WHERE CAST(strftime('%V', "created") AS INTEGER) = ?"#)
        );
        let q = Query::new(&s, Dialect::PostgreSQL).where_date("is", "created", ["week=52"])?;
        assert!(
            q.compile()
                .sql()
                .ends_with(r#"WHERE CAST(EXTRACT(WEEK FROM "created") AS INTEGER) = $1"#)
        );
        Ok(())
    }

    #[test]
    fn date_parts_per_dialect() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::SQLite).where_date("is", "created", ["day=7"])?;
        assert!(
            q.compile()
                .sql()
                .ends_with(r#"WHERE CAST(strftime('%d', "created") AS INTEGER) = ?"#)
        );

        let q = Query::new(&s, Dialect::PostgreSQL).where_date("in", "created", ["month=1,2"])?;
        let stmt = q.compile();
        assert!(
            stmt.sql()
                .ends_with(r#"WHERE CAST(EXTRACT(MONTH FROM "created") AS INTEGER) IN ($1, $2)"#)
        );
        assert_eq!(stmt.params(), &[Value::Integer(1), Value::Integer(2)]);
        Ok(())
    }

    #[test]
    fn explicit_order_uses_case_ranking() -> Result<()> {
        let s = foo();
        let stmt = Query::new(&s, Dialect::SQLite)
            .select(["bar"])?
            .in_field("bar", [3, 5, 2, 1])?
            .asc_in("bar", [3, 5, 2, 1])?
            .compile();
        assert_eq!(
            stmt.sql(),
            r#"SELECT "bar" FROM "foo" WHERE "bar" IN (?, ?, ?, ?) ORDER BY CASE "bar" WHEN ? THEN 0 WHEN ? THEN 1 WHEN ? THEN 2 WHEN ? THEN 3 ELSE 4 END ASC"#
        );
        assert_eq!(stmt.params().len(), 8);
        Ok(())
    }

    #[test]
    fn repeated_sort_replaces_previous() -> Result<()> {
        let s = foo();
        let stmt = Query::new(&s, Dialect::SQLite)
            .select(["bar"])?
            .asc_field("bar")?
            .desc_field("che")?
            .desc_field("bar")?
            .compile();
        assert_eq!(
            stmt.sql(),
            r#"SELECT "bar" FROM "foo" ORDER BY "bar" DESC, "che" DESC"#
        );
        Ok(())
    }

    #[test]
    fn page_offsets() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::SQLite).select(["bar"])?.limit(10)?;
        assert!(q.clone().page(2)?.compile().sql().ends_with("LIMIT 10 OFFSET 10"));
        assert!(q.page(1)?.compile().sql().ends_with("LIMIT 10 OFFSET 0"));
        Ok(())
    }

    #[test]
    fn offset_without_limit() {
        let s = foo();
        let q = Query::new(&s, Dialect::SQLite).offset(4);
        assert!(q.compile().sql().ends_with(r#"FROM "foo" LIMIT -1 OFFSET 4"#));
        let q = Query::new(&s, Dialect::PostgreSQL).offset(4);
        assert!(q.compile().sql().ends_with(r#"FROM "foo" OFFSET 4"#));
    }

    #[test]
    fn windows() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::SQLite).select(["bar"])?.limit(10)?.offset(20);
        let c = Compiler::new(&s, Dialect::SQLite);
        assert!(c.select_window(q.state(), Window::Lookahead).sql().ends_with("LIMIT 11 OFFSET 20"));
        assert!(c.select_window(q.state(), Window::One).sql().ends_with("LIMIT 1 OFFSET 20"));
        Ok(())
    }

    #[test]
    fn selection_is_additive() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::SQLite)
            .select(["bar"])?
            .select(["che", "bar"])?;
        assert_eq!(q.compile().sql(), r#"SELECT "bar", "che" FROM "foo""#);
        let q = q.select(["*"])?;
        assert_eq!(q.compile().sql(), r#"SELECT * FROM "foo""#);
        Ok(())
    }

    #[test]
    fn raw_ignores_structured_state() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::SQLite)
            .is_field("bar", 1)?
            .raw("SELECT 1", Vec::<Value>::new());
        let stmt = q.compile();
        assert_eq!(stmt.sql(), "SELECT 1");
        assert!(stmt.params().is_empty());
        assert_eq!(q.state().predicates().len(), 1);
        Ok(())
    }

    #[test]
    fn count_and_delete() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::PostgreSQL)
            .is_field("che", "x")?
            .asc_field("bar")?
            .limit(3)?;
        let c = q.compiler();
        assert_eq!(
            c.count(q.state()).sql(),
            r#"SELECT count(*) AS ct FROM "foo" WHERE "che" = $1"#
        );
        assert_eq!(c.delete(q.state()).sql(), r#"DELETE FROM "foo" WHERE "che" = $1"#);

        let raw = q.raw("SELECT * FROM foo WHERE bar > $1", [2]);
        let stmt = raw.compiler().count(raw.state());
        assert_eq!(
            stmt.sql(),
            "SELECT count(*) AS ct FROM (SELECT * FROM foo WHERE bar > $1) AS prowl_raw"
        );
        assert_eq!(stmt.params(), &[Value::Integer(2)]);
        Ok(())
    }

    #[test]
    fn insert_and_update() -> Result<()> {
        let s = foo();
        let q = Query::new(&s, Dialect::PostgreSQL)
            .set_field("bar", 1)?
            .set_field("che", "a")?
            .set_field("bar", 2)?;
        assert_eq!(
            q.compiler().insert(q.state())?.sql(),
            r#"INSERT INTO "foo" ("bar", "che") VALUES ($1, $2) RETURNING "_id""#
        );

        let q = q.is_field("pk", 9)?;
        let stmt = q.compiler().update(q.state())?;
        assert_eq!(
            stmt.sql(),
            r#"UPDATE "foo" SET "bar" = $1, "che" = $2 WHERE "_id" = $3"#
        );
        assert_eq!(
            stmt.params(),
            &[Value::Integer(2), Value::from("a"), Value::Integer(9)]
        );

        let empty = Query::new(&s, Dialect::SQLite);
        assert!(matches!(
            empty.compiler().update(empty.state()),
            Err(ProwlError::NoAssignments("update"))
        ));
        Ok(())
    }
}
