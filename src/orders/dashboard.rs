use crate::foundation::core::CalendarDate;
use crate::orders::model::Order;

/// Associate dashboard view of an order snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dashboard {
    /// Orders still waiting, newest first.
    pub awaiting: Vec<Order>,
    /// Every picked-up order, newest first.
    pub completed: Vec<Order>,
    /// Orders picked up on the dashboard's UTC day.
    pub picked_up_today: Vec<Order>,
}

impl Dashboard {
    /// Partition `snapshot` (already newest first) relative to `today`.
    pub fn from_snapshot(snapshot: &[Order], today: CalendarDate) -> Self {
        let mut out = Self::default();
        for order in snapshot {
            if order.is_awaiting() {
                out.awaiting.push(order.clone());
                continue;
            }
            if order.picked_up_at.is_some_and(|t| t.date() == today) {
                out.picked_up_today.push(order.clone());
            }
            out.completed.push(order.clone());
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orders/dashboard.rs"]
mod tests;
