//! Query-string builder for PostgREST views.
//!
//! Filter values are passed as query parameters and URL-encoded by the HTTP
//! client, never spliced into the path. Builder methods return `&mut Self`
//! for chaining.
//!
//! # Example
//!
//! ```rust
//! use hocg_inventory::RestQuery;
//! let (view, params) = RestQuery::new("v_portfolio_positions_jpy_v2")
//!     .select(&["card_code", "qty"])
//!     .where_gt("qty", "0")
//!     .order_by(&["card_code.asc"])
//!     .limit(100)
//!     .build();
//! assert_eq!(view, "v_portfolio_positions_jpy_v2");
//! assert!(params.contains(&("qty".to_string(), "gt.0".to_string())));
//! ```

use crate::config;

/// Builds PostgREST query parameters for one view.
#[derive(Debug, Clone)]
pub struct RestQuery {
    view: String,
    select_cols: Vec<String>,
    filters: Vec<(String, String)>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
    offset_val: Option<usize>,
}

impl RestQuery {
    /// Create a query targeting the given view.
    pub fn new(view: &str) -> Self {
        Self {
            view: view.to_string(),
            select_cols: vec!["*".to_string()],
            filters: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
            offset_val: None,
        }
    }

    /// The default positions query: configured columns and ordering.
    pub fn positions(view: &str) -> Self {
        let mut q = Self::new(view);
        q.select(&config::position_columns())
            .order_by(&config::position_order());
        q
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// `column = value`.
    pub fn where_eq(&mut self, column: &str, value: &str) -> &mut Self {
        self.filter(column, "eq", value)
    }

    /// `column > value`.
    pub fn where_gt(&mut self, column: &str, value: &str) -> &mut Self {
        self.filter(column, "gt", value)
    }

    /// `column >= value`.
    pub fn where_gte(&mut self, column: &str, value: &str) -> &mut Self {
        self.filter(column, "gte", value)
    }

    /// Case-insensitive substring match.
    pub fn where_contains(&mut self, column: &str, needle: &str) -> &mut Self {
        let needle = needle.replace('*', "");
        self.filter(column, "ilike", &format!("*{}*", needle))
    }

    fn filter(&mut self, column: &str, op: &str, value: &str) -> &mut Self {
        self.filters
            .push((column.to_string(), format!("{}.{}", op, value)));
        self
    }

    /// Append ordering clauses such as `card_code.asc`.
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Set the maximum number of rows to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Set the number of rows to skip before returning results.
    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset_val = Some(n);
        self
    }

    /// Build the view name and query parameter list.
    pub fn build(&self) -> (String, Vec<(String, String)>) {
        let mut params = vec![("select".to_string(), self.select_cols.join(","))];

        params.extend(self.filters.iter().cloned());

        if !self.order_by_cols.is_empty() {
            params.push(("order".to_string(), self.order_by_cols.join(",")));
        }

        if let Some(n) = self.limit_val {
            params.push(("limit".to_string(), n.to_string()));
        }

        if let Some(n) = self.offset_val {
            params.push(("offset".to_string(), n.to_string()));
        }

        (self.view.clone(), params)
    }
}
