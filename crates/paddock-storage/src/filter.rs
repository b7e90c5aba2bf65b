//! Filter compiler: turns a `ListFilter` into a WHERE clause.
//!
//! Meeting ids are bound as positional parameters. The visibility flag is
//! rendered into the SQL text as a `true`/`false` literal. That path is not
//! parameterized; it only ever emits one of those two keywords.

use rusqlite::types::Value;

use paddock_core::types::ListFilter;

/// Append the WHERE clause for `filter` to `query`.
///
/// Returns the augmented query and the positional arguments in placeholder
/// order. A `None` filter, or one with no constraints, leaves the query
/// untouched.
pub fn apply_filter(query: &str, filter: Option<&ListFilter>) -> (String, Vec<Value>) {
    let mut sql = query.to_string();
    let mut args = Vec::new();

    let Some(filter) = filter else {
        return (sql, args);
    };

    let mut clauses: Vec<String> = Vec::new();

    if !filter.meeting_ids.is_empty() {
        let placeholders = vec!["?"; filter.meeting_ids.len()].join(", ");
        clauses.push(format!("meeting_id IN ({})", placeholders));
        args.extend(filter.meeting_ids.iter().copied().map(Value::Integer));
    }

    if let Some(visible) = filter.visible {
        clauses.push(format!("visible = {}", visible));
    }

    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    (sql, args)
}
