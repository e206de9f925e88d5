//! Aggregate-query boundary types.
//!
//! Everything the external query executor consumes or produces lives here:
//! the query specification handed to it, and the loosely typed row/cell
//! shapes it returns. Raw cells are narrowed into display data at the
//! formatter boundary so the summarizers never carry unchecked dynamic
//! shapes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub mod executor;
pub mod expr;

pub use executor::QueryExecutor;
pub use expr::{bin_assignment_expr, Expr};

/// Aggregate function applied by a derived measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFn {
    /// Minimum of the based-on field.
    Min,
    /// Maximum of the based-on field.
    Max,
    /// Average of the based-on field.
    Average,
}

/// A field defined inline on the query rather than in the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DynamicField {
    /// A derived aggregate over an existing field.
    Measure {
        /// Name the result rows are keyed by.
        name: String,
        /// The model field being aggregated.
        based_on: String,
        /// The aggregate to apply.
        aggregate: AggregateFn,
    },
    /// A derived categorical dimension computed from an expression.
    Dimension {
        /// Name the result rows are keyed by.
        name: String,
        /// Expression in the query language's textual syntax.
        expression: String,
    },
}

impl DynamicField {
    /// Creates a derived aggregate measure.
    pub fn measure(
        name: impl Into<String>,
        based_on: impl Into<String>,
        aggregate: AggregateFn,
    ) -> Self {
        Self::Measure {
            name: name.into(),
            based_on: based_on.into(),
            aggregate,
        }
    }

    /// Creates a derived dimension from a rendered expression.
    pub fn dimension(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::Dimension {
            name: name.into(),
            expression: expression.into(),
        }
    }

    /// The name result rows are keyed by.
    pub fn name(&self) -> &str {
        match self {
            Self::Measure { name, .. } | Self::Dimension { name, .. } => name,
        }
    }
}

/// Sort direction for a query sort spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

/// One entry of a query's sort specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    /// Field or dynamic-field name to sort by.
    pub field: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl Sort {
    /// Sorts ascending by the given field.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Sorts descending by the given field.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// An ad-hoc aggregate query against one view of a semantic model.
///
/// Grouping is implicit: the executor groups by every non-aggregated field
/// in `fields` (and every derived dimension), as semantic query services do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateQuery {
    /// Target model name.
    pub model: String,
    /// Target view (explore) name.
    pub view: String,
    /// Requested fields and measures, by name.
    pub fields: Vec<String>,
    /// Fields defined inline on this query.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dynamic_fields: Vec<DynamicField>,
    /// Sort specification, applied in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    /// Maximum number of rows to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Whether to also compute a grand-totals row.
    #[serde(default)]
    pub totals: bool,
}

impl AggregateQuery {
    /// Creates a query against the given model and view.
    pub fn new(model: impl Into<String>, view: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            view: view.into(),
            fields: Vec::new(),
            dynamic_fields: Vec::new(),
            sorts: Vec::new(),
            limit: None,
            totals: false,
        }
    }

    /// Sets the requested field names.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds an inline field definition.
    pub fn with_dynamic_field(mut self, field: DynamicField) -> Self {
        self.dynamic_fields.push(field);
        self
    }

    /// Adds a sort entry.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Sets the row limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Requests a grand-totals row.
    pub fn with_totals(mut self) -> Self {
        self.totals = true;
        self
    }
}

/// A hyperlink attached to a result cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellLink {
    /// Link target.
    pub url: String,
    /// Optional link label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// One raw result cell as returned by the executor.
///
/// The value is deliberately loose (numeric, string, or null); it is
/// narrowed once, at the formatter boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCell {
    /// The cell's raw value; `null` when the executor produced none.
    #[serde(default)]
    pub value: serde_json::Value,
    /// Pre-rendered display string, when the executor supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
    /// Drill links attached to the cell.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<CellLink>,
}

impl RawCell {
    /// Creates a cell from a raw JSON value.
    pub fn new(value: serde_json::Value) -> Self {
        Self {
            value,
            rendered: None,
            links: Vec::new(),
        }
    }

    /// Creates a null cell.
    pub fn null() -> Self {
        Self::default()
    }

    /// Creates a string-valued cell.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(serde_json::Value::String(value.into()))
    }

    /// Creates a numeric cell.
    pub fn number(value: f64) -> Self {
        let value = serde_json::Number::from_f64(value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null);
        Self::new(value)
    }

    /// Attaches a pre-rendered display string.
    pub fn with_rendered(mut self, rendered: impl Into<String>) -> Self {
        self.rendered = Some(rendered.into());
        self
    }

    /// Attaches a drill link.
    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.links.push(CellLink {
            url: url.into(),
            label: None,
        });
        self
    }

    /// The cell value as a number, if its runtime type is numeric.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

/// One result row: a mapping from field name to cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRow(pub HashMap<String, RawCell>);

impl ResultRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the cell for a field name.
    pub fn cell(&self, field: &str) -> Option<&RawCell> {
        self.0.get(field)
    }

    /// Inserts a cell, replacing any existing one for the field.
    pub fn with_cell(mut self, field: impl Into<String>, cell: RawCell) -> Self {
        self.0.insert(field.into(), cell);
        self
    }
}

impl FromIterator<(String, RawCell)> for ResultRow {
    fn from_iter<I: IntoIterator<Item = (String, RawCell)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The executor's answer to an aggregate query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Result rows, in the order the executor produced them.
    pub rows: Vec<ResultRow>,
    /// Grand-totals row, present when the query requested totals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<ResultRow>,
}

impl QueryResponse {
    /// Creates a response with the given rows and no totals.
    pub fn with_rows(rows: Vec<ResultRow>) -> Self {
        Self { rows, totals: None }
    }

    /// Attaches a grand-totals row.
    pub fn with_totals(mut self, totals: ResultRow) -> Self {
        self.totals = Some(totals);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = AggregateQuery::new("ecommerce", "orders")
            .with_fields(["orders.status", "orders.count"])
            .with_sort(Sort::descending("orders.count"))
            .with_limit(10)
            .with_totals();

        assert_eq!(query.model, "ecommerce");
        assert_eq!(query.view, "orders");
        assert_eq!(query.fields, vec!["orders.status", "orders.count"]);
        assert_eq!(query.sorts[0].direction, SortDirection::Descending);
        assert_eq!(query.limit, Some(10));
        assert!(query.totals);
    }

    #[test]
    fn test_raw_cell_numeric_narrowing() {
        assert_eq!(RawCell::number(42.0).numeric_value(), Some(42.0));
        assert_eq!(RawCell::string("42").numeric_value(), None);
        assert_eq!(RawCell::null().numeric_value(), None);
    }

    #[test]
    fn test_result_row_lookup() {
        let row = ResultRow::new()
            .with_cell("orders.status", RawCell::string("Shipped"))
            .with_cell("orders.count", RawCell::number(120.0));

        assert_eq!(
            row.cell("orders.status").unwrap().value,
            serde_json::json!("Shipped")
        );
        assert!(row.cell("orders.total").is_none());
    }

    #[test]
    fn test_dynamic_field_names() {
        let min = DynamicField::measure("min", "orders.price", AggregateFn::Min);
        assert_eq!(min.name(), "min");

        let bin = DynamicField::dimension("bin", "coalesce(...)");
        assert_eq!(bin.name(), "bin");
    }
}
