//! Order compiler: turns an `OrderBy` into an ORDER BY clause.
//!
//! Field names are copied into the SQL text as given. An unknown column is
//! not caught here; the store rejects it when the query runs, surfacing as
//! `PaddockError::Query`. Callers must only pass trusted field names: this
//! is an injection surface.

use paddock_core::types::OrderBy;

/// Append `ORDER BY <field> <DIR>, ...` to `query`, preserving request order.
///
/// A `None` or empty `order_by` leaves the query untouched.
pub fn apply_order_by(query: &str, order_by: Option<&OrderBy>) -> String {
    let mut sql = query.to_string();

    let Some(order_by) = order_by else {
        return sql;
    };
    if order_by.is_empty() {
        return sql;
    }

    let expressions: Vec<String> = order_by
        .fields
        .iter()
        .map(|f| format!("{} {}", f.field, f.direction.as_sql()))
        .collect();

    sql.push_str(" ORDER BY ");
    sql.push_str(&expressions.join(", "));
    sql
}
