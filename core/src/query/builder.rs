//! Chainable query state.

use crate::compile::Compiler;
use crate::dialect::Dialect;
use crate::error::{ProwlError, Result};
use crate::query::resolve::{Resolved, resolve};
use crate::query::{Bounds, DatePart, Direction, Operator, Predicate, Sort, Verb};
use crate::schema::Schema;
use crate::sql::Statement;
use crate::value::Value;

/// Marker selecting every physical column.
pub const WILDCARD: &str = "*";

/// Projection accumulated by `select` calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    fields: Vec<String>,
    wildcard: bool,
}

impl Selection {
    /// Selected fields in order of first selection.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Nothing selected: the projection falls back to the declared fields.
    pub fn is_empty(&self) -> bool {
        !self.wildcard && self.fields.is_empty()
    }

    fn add(&mut self, field: String) {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
    }
}

/// Caller-supplied statement that replaces the structured state at compile time.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSql {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Everything a query has accumulated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub(crate) predicates: Vec<Predicate>,
    pub(crate) sorts: Vec<Sort>,
    pub(crate) bounds: Bounds,
    pub(crate) selection: Selection,
    pub(crate) raw: Option<RawSql>,
    pub(crate) assignments: Vec<(String, Value)>,
}

impl QueryState {
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn raw(&self) -> Option<&RawSql> {
        self.raw.as_ref()
    }

    pub fn assignments(&self) -> &[(String, Value)] {
        &self.assignments
    }
}

/// Fluent query builder over one table.
///
/// `E` is whatever executes the query: `()` for a detached builder that can
/// only compile, or `&Executor<S>` once bound (see [`Query::bind`]). Every
/// mutator takes `self` by value and validates immediately, so a bad call
/// fails where it is written:
///
/// ```
/// use prowl_core::dialect::Dialect;
/// use prowl_core::query::Query;
/// use prowl_core::schema::{FieldType, TableSchema};
///
/// let users = TableSchema::new("users")
///     .with_primary_key("_id", FieldType::Integer)
///     .with_field("name", FieldType::Text);
///
/// let stmt = Query::new(&users, Dialect::SQLite)
///     .startswith_field("name", "Al")?
///     .limit(10)?
///     .compile();
///
/// assert_eq!(
///     stmt.sql(),
///     r#"SELECT "_id", "name" FROM "users" WHERE "name" LIKE ? LIMIT 10"#
/// );
/// # Ok::<(), prowl_core::error::ProwlError>(())
/// ```
#[derive(Clone)]
pub struct Query<'q, E = ()> {
    pub(crate) schema: &'q dyn Schema,
    pub(crate) dialect: Dialect,
    pub(crate) exec: E,
    pub(crate) state: QueryState,
}

impl<'q> Query<'q, ()> {
    pub fn new(schema: &'q dyn Schema, dialect: Dialect) -> Self {
        Self {
            schema,
            dialect,
            exec: (),
            state: QueryState::default(),
        }
    }
}

impl<'q, E> core::fmt::Debug for Query<'q, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Query")
            .field("table", &self.schema.table_name())
            .field("dialect", &self.dialect)
            .field("state", &self.state)
            .finish()
    }
}

impl<'q, E> Query<'q, E> {
    /// Attaches an executor, keeping the accumulated state.
    pub fn bind<X>(self, exec: X) -> Query<'q, X> {
        Query {
            schema: self.schema,
            dialect: self.dialect,
            exec,
            state: self.state,
        }
    }

    pub fn schema(&self) -> &'q dyn Schema {
        self.schema
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Compiles the SELECT this query would run, with its bounds as set.
    pub fn compile(&self) -> Statement {
        self.compiler().select(&self.state)
    }

    pub(crate) fn compiler(&self) -> Compiler<'q> {
        Compiler::new(self.schema, self.dialect)
    }

    // ==================== predicates ====================

    /// Appends a predicate using a typed operator.
    pub fn filter<I>(self, field: &str, operator: Operator, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.push_predicate(field, operator, values.into_iter().map(Into::into).collect(), None)
    }

    /// Appends a predicate, naming the verb at runtime (`"gte"`, `"in"`, ...).
    pub fn where_field<I>(self, verb: &str, field: &str, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let operator = Operator::parse(verb)?;
        self.filter(field, operator, values)
    }

    /// Appends one date-part predicate per keyword argument, e.g.
    /// `where_date("is", "created", ["day=7", "month=3"])`.
    pub fn where_date<'k, K>(mut self, verb: &str, field: &str, kwargs: K) -> Result<Self>
    where
        K: IntoIterator<Item = &'k str>,
    {
        let operator = Operator::parse(verb)?;
        for kwarg in kwargs {
            let (part, values) = DatePart::parse_kwarg(kwarg)?;
            self = self.push_predicate(field, operator, values, Some(part))?;
        }
        Ok(self)
    }

    /// Typed date-part predicate.
    pub fn date_part<I>(
        self,
        field: &str,
        part: DatePart,
        operator: Operator,
        values: I,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push_predicate(field, operator, values, Some(part))
    }

    pub fn is_field(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.filter(field, Operator::Eq, [value])
    }

    pub fn not_field(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.filter(field, Operator::Ne, [value])
    }

    pub fn gt_field(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.filter(field, Operator::Gt, [value])
    }

    pub fn gte_field(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.filter(field, Operator::Gte, [value])
    }

    pub fn lt_field(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.filter(field, Operator::Lt, [value])
    }

    pub fn lte_field(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.filter(field, Operator::Lte, [value])
    }

    pub fn in_field<I>(self, field: &str, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.filter(field, Operator::In, values)
    }

    pub fn nin_field<I>(self, field: &str, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.filter(field, Operator::NotIn, values)
    }

    /// Inclusive range. `low > high` is accepted and simply matches nothing.
    pub fn between_field(
        self,
        field: &str,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Result<Self> {
        let range: [Value; 2] = [low.into(), high.into()];
        self.filter(field, Operator::Between, range)
    }

    pub fn startswith_field(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.filter(field, Operator::StartsWith, [value])
    }

    pub fn endswith_field(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.filter(field, Operator::EndsWith, [value])
    }

    pub fn contains_field(self, field: &str, value: impl Into<Value>) -> Result<Self> {
        self.filter(field, Operator::Contains, [value])
    }

    fn push_predicate(
        mut self,
        field: &str,
        operator: Operator,
        operands: Vec<Value>,
        date_part: Option<DatePart>,
    ) -> Result<Self> {
        let predicate = Predicate::new(self.schema, field, operator, operands, date_part)?;
        self.state.predicates.push(predicate);
        Ok(self)
    }

    // ==================== sorting ====================

    /// Sorts on `field`. A later sort on the same field replaces this one.
    pub fn sort_field<I>(mut self, field: &str, direction: Direction, order: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let name = self.schema.require_field(field)?.name.clone();
        let sort = Sort::new(name, direction).with_order(order.into_iter().map(Into::into).collect());
        match self.state.sorts.iter_mut().find(|s| s.field == sort.field) {
            Some(existing) => *existing = sort,
            None => self.state.sorts.push(sort),
        }
        Ok(self)
    }

    pub fn asc_field(self, field: &str) -> Result<Self> {
        self.sort_field(field, Direction::Asc, Vec::<Value>::new())
    }

    pub fn desc_field(self, field: &str) -> Result<Self> {
        self.sort_field(field, Direction::Desc, Vec::<Value>::new())
    }

    /// Orders rows by the position of `field`'s value in `order`.
    pub fn asc_in<I>(self, field: &str, order: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.sort_field(field, Direction::Asc, order)
    }

    /// Reverse of [`Query::asc_in`].
    pub fn desc_in<I>(self, field: &str, order: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.sort_field(field, Direction::Desc, order)
    }

    // ==================== projection ====================

    /// Adds fields to the projection. Repeated calls accumulate; [`WILDCARD`]
    /// switches to every physical column.
    pub fn select<I, S>(mut self, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for field in fields {
            let field = field.as_ref();
            if field == WILDCARD {
                self.state.selection.wildcard = true;
            } else {
                let name = self.schema.require_field(field)?.name.clone();
                self.state.selection.add(name);
            }
        }
        Ok(self)
    }

    pub fn select_all(mut self) -> Self {
        self.state.selection.wildcard = true;
        self
    }

    pub fn reset_select(mut self) -> Self {
        self.state.selection = Selection::default();
        self
    }

    // ==================== bounds ====================

    pub fn limit(mut self, limit: u64) -> Result<Self> {
        self.state.bounds.set_limit(limit)?;
        Ok(self)
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.state.bounds.set_offset(offset);
        self
    }

    /// 1-based page of `limit` rows. Requires a limit.
    pub fn page(mut self, page: u64) -> Result<Self> {
        self.state.bounds.set_page(page)?;
        Ok(self)
    }

    // ==================== raw / assignments ====================

    /// Runs `sql` verbatim instead of the structured state, which is kept
    /// but ignored when compiling.
    pub fn raw<I>(mut self, sql: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.state.raw = Some(RawSql {
            sql: sql.into(),
            params: params.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Sets a field for [`insert`](Query::insert) / [`update`](Query::update).
    pub fn set_field(mut self, field: &str, value: impl Into<Value>) -> Result<Self> {
        let name = self.schema.require_field(field)?.name.clone();
        let value = value.into();
        match self.state.assignments.iter_mut().find(|(f, _)| *f == name) {
            Some((_, existing)) => *existing = value,
            None => self.state.assignments.push((name, value)),
        }
        Ok(self)
    }

    pub fn set_fields<I, S, V>(mut self, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: Into<Value>,
    {
        for (field, value) in fields {
            self = self.set_field(field.as_ref(), value)?;
        }
        Ok(self)
    }

    // ==================== dynamic dispatch ====================

    /// Resolves and applies a pseudo-method such as `gte_age` or `asc_name`.
    ///
    /// In the explicit form (`is_field`, or a bare verb like `in`) the first
    /// argument is the field name.
    pub fn call<I>(self, method: &str, args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let Resolved { verb, field } = resolve(self.schema, method)?;
        let mut args: Vec<Value> = args.into_iter().map(Into::into).collect();
        let explicit = field.is_none();
        let field = match field {
            Some(field) => field,
            None => take_field_arg(self.schema, method, &mut args)?,
        };

        match verb {
            Verb::Where(operator) => self.push_predicate(&field, operator, args, None),
            Verb::Asc => self.sort_field(&field, Direction::Asc, args),
            Verb::Desc => self.sort_field(&field, Direction::Desc, args),
            // `select("a", "b")` projects every named field; `select_a` takes none.
            Verb::Select if explicit => {
                let mut fields = vec![field];
                for arg in args {
                    fields.push(field_arg(self.schema, arg)?);
                }
                self.select(fields)
            }
            Verb::Select if !args.is_empty() => Err(ProwlError::InvalidOperandCount {
                verb: "select",
                field,
                expected: "no",
                got: args.len(),
            }),
            Verb::Select => self.select([field]),
        }
    }

    /// Like [`Query::call`] with keyword-style date parts
    /// (`call_kw("is_created", ["day=7"])`).
    pub fn call_kw<'k, K>(self, method: &str, kwargs: K) -> Result<Self>
    where
        K: IntoIterator<Item = &'k str>,
    {
        let Resolved { verb, field } = resolve(self.schema, method)?;
        let Verb::Where(operator) = verb else {
            return Err(ProwlError::InvalidOperator(method.to_string()));
        };
        let mut kwargs = kwargs.into_iter();
        let field = match field {
            Some(field) => field,
            None => kwargs
                .next()
                .map(str::to_string)
                .ok_or_else(|| missing_field(self.schema, method))?,
        };
        self.where_date(operator.name(), &field, kwargs)
    }
}

fn missing_field(schema: &dyn Schema, method: &str) -> ProwlError {
    ProwlError::UnknownField {
        table: schema.table_name().to_string(),
        field: method.to_string(),
    }
}

fn take_field_arg(schema: &dyn Schema, method: &str, args: &mut Vec<Value>) -> Result<String> {
    if args.is_empty() {
        return Err(missing_field(schema, method));
    }
    field_arg(schema, args.remove(0))
}

fn field_arg(schema: &dyn Schema, arg: Value) -> Result<String> {
    match arg {
        Value::Text(field) => Ok(field),
        other => Err(ProwlError::UnknownField {
            table: schema.table_name().to_string(),
            field: other.to_string(),
        }),
    }
}
