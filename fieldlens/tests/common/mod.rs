//! Shared test plumbing: a scripted mock query executor and explore fixtures.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use fieldlens::prelude::*;

/// Query executor that replays scripted responses in order and records every
/// query it receives.
#[derive(Default)]
pub struct MockExecutor {
    responses: Mutex<VecDeque<std::result::Result<QueryResponse, String>>>,
    queries: Mutex<Vec<AggregateQuery>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful response for the next query.
    pub fn respond_with(self, response: QueryResponse) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    /// Scripts a failure for the next query.
    pub fn fail_with(self, message: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Err(message.into()));
        self
    }

    /// Every query issued so far, in order.
    pub fn queries(&self) -> Vec<AggregateQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Number of queries issued so far.
    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn run_aggregate(&self, query: &AggregateQuery) -> Result<QueryResponse> {
        self.queries.lock().unwrap().push(query.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(SummaryError::query_execution(message)),
            None => Err(SummaryError::query_execution("no scripted response left")),
        }
    }
}

/// An ecommerce orders explore with string and numeric dimensions, an
/// in-view count measure, and a second count measure from another view.
pub fn orders_explore() -> Explore {
    Explore::new("orders", "ecommerce")
        .with_dimension(
            Field::dimension("orders.status")
                .with_label_short("Status")
                .with_view_label("Orders"),
        )
        .with_dimension(
            Field::dimension("orders.price")
                .with_label_short("Price")
                .with_view_label("Orders")
                .with_type("number"),
        )
        .with_measure(
            Field::measure("orders.count")
                .with_label_short("Count")
                .with_view_label("Orders"),
        )
        .with_measure(
            Field::measure("products.count")
                .with_label_short("Count")
                .with_view_label("Products"),
        )
}

pub fn status_field() -> Field {
    orders_explore().dimensions[0].clone()
}

pub fn price_field() -> Field {
    orders_explore().dimensions[1].clone()
}

/// Builds a result row from (field, cell) pairs.
pub fn row(cells: Vec<(&str, RawCell)>) -> ResultRow {
    cells
        .into_iter()
        .map(|(field, cell)| (field.to_string(), cell))
        .collect()
}
