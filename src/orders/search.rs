use crate::orders::model::Order;
use crate::orders::store::OrderStore;

/// Prompt shown when the query is too short to search.
pub const QUERY_TOO_SHORT: &str = "Please enter at least 2 characters.";
/// Prompt shown when nothing is waiting under the searched name.
pub const NO_PENDING_ORDERS: &str =
    "No pending orders found for this name. Please see an associate for help";

/// Result of a customer name search at the kiosk.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Query shorter than the configured minimum.
    QueryTooShort {
        /// Minimum accepted length in characters.
        min_len: usize,
    },
    /// No awaiting orders matched.
    NoPendingOrders,
    /// Awaiting orders, newest first.
    Found(Vec<Order>),
}

impl SearchOutcome {
    /// Customer-facing message for the non-result outcomes.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::QueryTooShort { min_len } if *min_len == 2 => Some(QUERY_TOO_SHORT.to_string()),
            Self::QueryTooShort { min_len } => {
                Some(format!("Please enter at least {min_len} characters."))
            }
            Self::NoPendingOrders => Some(NO_PENDING_ORDERS.to_string()),
            Self::Found(_) => None,
        }
    }
}

/// Search awaiting orders by customer name.
#[tracing::instrument(skip(store))]
pub fn search_pending(store: &dyn OrderStore, query: &str, min_len: usize) -> SearchOutcome {
    let query = query.trim();
    if query.chars().count() < min_len {
        return SearchOutcome::QueryTooShort { min_len };
    }
    let found: Vec<Order> = store
        .find_orders_by_name(query)
        .into_iter()
        .filter(Order::is_awaiting)
        .collect();
    tracing::debug!(matches = found.len(), "pending order search");
    if found.is_empty() {
        SearchOutcome::NoPendingOrders
    } else {
        SearchOutcome::Found(found)
    }
}
