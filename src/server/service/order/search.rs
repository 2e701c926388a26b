//! Composition of the supplier and customer filters used when listing orders.

use sea_orm::{
    sea_query::{Expr, ExprTrait, Func, LikeExpr, SimpleExpr},
    Condition,
};

const LIKE_ESCAPE: char = '\\';

/// A parsed order search.
///
/// Blank queries are treated as absent. A supplier query matches supplier names containing
/// it, a customer query is split into terms any one of which the customer name must contain.
/// All matching ignores case, and `%` and `_` in queries match literally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderSearch {
    supplier_query: Option<String>,
    customer_terms: Vec<String>,
}

impl OrderSearch {
    pub fn new(supplier_query: Option<&str>, customer_query: Option<&str>) -> Self {
        let supplier_query = supplier_query
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_string);

        let customer_terms = customer_query
            .map(split_customer_terms)
            .unwrap_or_default();

        Self {
            supplier_query,
            customer_terms,
        }
    }

    /// Supplier is constant across results of a supplier search, so the column is hidden
    /// whenever one is active, even alongside a customer filter.
    pub fn hide_supplier_column(&self) -> bool {
        self.supplier_query.is_some()
    }

    /// The trimmed supplier term, echoed back for display
    pub fn searched_supplier_name(&self) -> Option<&str> {
        self.supplier_query.as_deref()
    }

    pub fn customer_terms(&self) -> &[String] {
        &self.customer_terms
    }

    /// Builds the filter condition: supplier AND (term1 OR term2 ...)
    ///
    /// With no active filters the condition matches every order.
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(supplier_query) = &self.supplier_query {
            condition = condition.add(contains_ignore_case(
                entity::orderdesk_order::Column::SupplierName,
                supplier_query,
            ));
        }

        if !self.customer_terms.is_empty() {
            let customer_condition = self.customer_terms.iter().fold(
                Condition::any(),
                |any, term| {
                    any.add(contains_ignore_case(
                        entity::orderdesk_order::Column::CustomerName,
                        term,
                    ))
                },
            );
            condition = condition.add(customer_condition);
        }

        condition
    }
}

/// Splits a customer query on commas, semicolons (ASCII or full-width) and whitespace.
///
/// Empty terms are dropped and terms differing only by case are kept once, in first-seen
/// order.
pub fn split_customer_terms(query: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for term in query.split(|c: char| matches!(c, ',' | ';' | '，' | '；') || c.is_whitespace()) {
        if term.is_empty() {
            continue;
        }
        if terms.iter().any(|seen| seen.to_lowercase() == term.to_lowercase()) {
            continue;
        }
        terms.push(term.to_string());
    }

    terms
}

/// Escapes LIKE wildcards so `value` matches literally.
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }

    escaped
}

fn contains_ignore_case(column: entity::orderdesk_order::Column, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));

    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}
