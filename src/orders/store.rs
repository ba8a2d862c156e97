use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::mpsc;

use crate::capture::export::EncodedImage;
use crate::foundation::core::Timestamp;
use crate::foundation::error::{SigntrackError, SigntrackResult};
use crate::orders::model::{Order, OrderFields, OrderStatus};

/// Time source for creation and pickup timestamps.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Externally driven clock. Clones share the same instant.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    ms: Arc<AtomicI64>,
}

impl ManualClock {
    /// Clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            ms: Arc::new(AtomicI64::new(start.0)),
        }
    }

    /// Jump to `at`.
    pub fn set(&self, at: Timestamp) {
        self.ms.store(at.0, Ordering::Relaxed);
    }

    /// Move forward by `ms` milliseconds.
    pub fn advance(&self, ms: i64) {
        self.ms.fetch_add(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.ms.load(Ordering::Relaxed))
    }
}

/// Persistence seam for orders.
///
/// Every mutation is followed by a full snapshot on each live subscription.
pub trait OrderStore {
    /// Validate `fields` and insert a new awaiting order.
    fn create_order(&mut self, fields: &OrderFields) -> SigntrackResult<Order>;

    /// Orders whose customer, first or last name contains `query`, ignoring case.
    fn find_orders_by_name(&self, query: &str) -> Vec<Order>;

    /// Order by id.
    fn get_order(&self, id: &str) -> Option<Order>;

    /// Record a pickup with its signature.
    fn mark_picked_up(&mut self, id: &str, signature: &EncodedImage) -> SigntrackResult<Order>;

    /// Revalidate and rewrite the editable fields of an order.
    fn update_order(&mut self, id: &str, fields: &OrderFields) -> SigntrackResult<Order>;

    /// Remove an order.
    fn delete_order(&mut self, id: &str) -> SigntrackResult<()>;

    /// All orders, newest first.
    fn list_orders(&self) -> Vec<Order>;

    /// Live snapshot feed. The current snapshot is queued immediately.
    fn subscribe(&mut self) -> mpsc::Receiver<Vec<Order>>;
}

/// In-memory [`OrderStore`].
pub struct MemoryOrderStore<C: Clock = SystemClock> {
    // Insertion order; `list_orders` derives the newest-first view.
    orders: Vec<Order>,
    clock: C,
    subscribers: Vec<mpsc::Sender<Vec<Order>>>,
}

impl MemoryOrderStore<SystemClock> {
    /// Empty store on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryOrderStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryOrderStore<C> {
    /// Empty store using `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            orders: Vec::new(),
            clock,
            subscribers: Vec::new(),
        }
    }

    /// Store seeded from an existing snapshot, e.g. one loaded from JSON.
    pub fn from_orders(orders: Vec<Order>, clock: C) -> SigntrackResult<Self> {
        let mut store = Self::with_clock(clock);
        for order in orders {
            if store.position(&order.id).is_some() {
                return Err(SigntrackError::validation(format!(
                    "duplicate order id '{}'",
                    order.id
                )));
            }
            store.orders.push(order);
        }
        Ok(store)
    }

    /// Number of stored orders.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the store holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.orders.iter().position(|o| o.id == id)
    }

    fn index_of(&self, id: &str) -> SigntrackResult<usize> {
        self.position(id)
            .ok_or_else(|| SigntrackError::not_found(format!("order '{id}'")))
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.list_orders();
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
        let dropped = before - self.subscribers.len();
        if dropped > 0 {
            tracing::debug!(dropped, "pruned closed order subscriptions");
        }
    }
}

impl<C: Clock> OrderStore for MemoryOrderStore<C> {
    #[tracing::instrument(skip(self, fields))]
    fn create_order(&mut self, fields: &OrderFields) -> SigntrackResult<Order> {
        let fields = fields.validated()?;
        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            customer_name: fields.customer_name(),
            order_number: fields.order_number,
            first_name: fields.first_name,
            last_name: fields.last_name,
            bin_number: fields.bin_number,
            status: OrderStatus::AwaitingPickup,
            created_at: self.clock.now(),
            picked_up_at: None,
            signature: None,
        };
        tracing::info!(
            id = %order.id,
            order_number = %order.order_number,
            bin = %order.bin_number,
            "order created"
        );
        self.orders.push(order.clone());
        self.publish();
        Ok(order)
    }

    fn find_orders_by_name(&self, query: &str) -> Vec<Order> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.list_orders()
            .into_iter()
            .filter(|o| o.name_matches(&needle))
            .collect()
    }

    fn get_order(&self, id: &str) -> Option<Order> {
        self.position(id).map(|i| self.orders[i].clone())
    }

    #[tracing::instrument(skip(self, signature))]
    fn mark_picked_up(&mut self, id: &str, signature: &EncodedImage) -> SigntrackResult<Order> {
        if id.trim().is_empty() || signature.is_empty() {
            return Err(SigntrackError::validation(
                "Order ID and signature are required.",
            ));
        }
        let idx = self.index_of(id)?;
        let now = self.clock.now();

        let order = &mut self.orders[idx];
        if !order.is_awaiting() {
            return Err(SigntrackError::validation(format!(
                "order {} was already picked up",
                order.order_number
            )));
        }
        order.status = OrderStatus::PickedUp;
        order.picked_up_at = Some(now);
        order.signature = Some(signature.clone());
        let order = order.clone();

        tracing::info!(
            id = %order.id,
            order_number = %order.order_number,
            picked_up_at = %now,
            "order picked up"
        );
        self.publish();
        Ok(order)
    }

    #[tracing::instrument(skip(self, fields))]
    fn update_order(&mut self, id: &str, fields: &OrderFields) -> SigntrackResult<Order> {
        let fields = fields.validated()?;
        let idx = self.index_of(id)?;

        let order = &mut self.orders[idx];
        order.customer_name = fields.customer_name();
        order.first_name = fields.first_name;
        order.last_name = fields.last_name;
        order.order_number = fields.order_number;
        order.bin_number = fields.bin_number;
        let order = order.clone();

        tracing::info!(id = %order.id, "order updated");
        self.publish();
        Ok(order)
    }

    #[tracing::instrument(skip(self))]
    fn delete_order(&mut self, id: &str) -> SigntrackResult<()> {
        let idx = self.index_of(id)?;
        let removed = self.orders.remove(idx);
        tracing::info!(id = %removed.id, order_number = %removed.order_number, "order deleted");
        self.publish();
        Ok(())
    }

    fn list_orders(&self) -> Vec<Order> {
        // Reverse first so that, among equal timestamps, later inserts still come first.
        let mut out: Vec<Order> = self.orders.iter().rev().cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    fn subscribe(&mut self) -> mpsc::Receiver<Vec<Order>> {
        let (tx, rx) = mpsc::channel();
        if tx.send(self.list_orders()).is_ok() {
            self.subscribers.push(tx);
        }
        rx
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orders/store.rs"]
mod tests;
