//! Splits `<verb>_<field>` pseudo-method names.

use crate::error::{ProwlError, Result};
use crate::query::{VERBS, Verb};
use crate::schema::Schema;

/// Suffix marking the explicit form, where the field is the first argument.
const EXPLICIT_SUFFIX: &str = "field";

/// Outcome of resolving a pseudo-method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub verb: Verb,
    /// `None` for the explicit form (`is_field("name", ..)`), where the
    /// field comes from the call arguments.
    pub field: Option<String>,
}

/// Resolves `method` against `schema`.
///
/// Verbs are tried longest first. A split is accepted only when its
/// remainder names a declared field, so a field whose own name starts with
/// a verb still resolves. A bare verb or `<verb>_field` is the explicit form.
pub fn resolve(schema: &dyn Schema, method: &str) -> Result<Resolved> {
    if let Some(verb) = Verb::parse(method) {
        return Ok(Resolved { verb, field: None });
    }

    let mut candidates: Vec<(&str, Verb)> = VERBS
        .iter()
        .filter_map(|(spelling, verb)| {
            method
                .strip_prefix(spelling)
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|rest| !rest.is_empty())
                .map(|rest| (rest, *verb))
        })
        .collect();

    if candidates.is_empty() {
        return Err(ProwlError::InvalidOperator(method.to_string()));
    }

    // shorter remainder = longer verb
    candidates.sort_by_key(|(rest, _)| rest.len());

    if let Some((rest, verb)) = candidates
        .iter()
        .find(|(rest, _)| schema.resolve_field(rest).is_some())
    {
        let field = schema.resolve_field(rest).map(|f| f.name.clone());
        return Ok(Resolved { verb: *verb, field });
    }

    if let Some((_, verb)) = candidates.iter().find(|(rest, _)| *rest == EXPLICIT_SUFFIX) {
        return Ok(Resolved {
            verb: *verb,
            field: None,
        });
    }

    Err(ProwlError::UnknownField {
        table: schema.table_name().to_string(),
        field: candidates[0].0.to_string(),
    })
}
