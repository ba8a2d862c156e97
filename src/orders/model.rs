use std::fmt;

use crate::capture::export::EncodedImage;
use crate::foundation::core::Timestamp;
use crate::foundation::error::{SigntrackError, SigntrackResult};

/// Pickup state of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum OrderStatus {
    /// Waiting in its bin.
    #[serde(rename = "Awaiting Pickup")]
    AwaitingPickup,
    /// Collected and signed for.
    #[serde(rename = "Picked Up")]
    PickedUp,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingPickup => "Awaiting Pickup",
            Self::PickedUp => "Picked Up",
        })
    }
}

/// A persisted order record.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-assigned identifier.
    pub id: String,
    /// Order number printed on the receipt.
    pub order_number: String,
    /// `"{first_name} {last_name}"`.
    pub customer_name: String,
    /// Customer first name.
    #[serde(default)]
    pub first_name: String,
    /// Customer last name.
    #[serde(default)]
    pub last_name: String,
    /// Shelf bin holding the order.
    pub bin_number: String,
    /// Pickup state.
    pub status: OrderStatus,
    /// Creation time.
    pub created_at: Timestamp,
    /// Pickup time, set only on pickup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picked_up_at: Option<Timestamp>,
    /// Customer signature, set only on pickup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<EncodedImage>,
}

impl Order {
    /// Whether the order is still waiting to be collected.
    pub fn is_awaiting(&self) -> bool {
        self.status == OrderStatus::AwaitingPickup
    }

    /// Case-insensitive substring match of `needle_lower` against the customer's names.
    pub(crate) fn name_matches(&self, needle_lower: &str) -> bool {
        [&self.customer_name, &self.first_name, &self.last_name]
            .iter()
            .any(|name| name.to_lowercase().contains(needle_lower))
    }
}

/// Associate-entered fields for creating or editing an order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFields {
    /// Customer first name.
    pub first_name: String,
    /// Customer last name.
    pub last_name: String,
    /// Order number.
    pub order_number: String,
    /// Bin number.
    pub bin_number: String,
}

impl OrderFields {
    /// Build a field set.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        order_number: impl Into<String>,
        bin_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            order_number: order_number.into(),
            bin_number: bin_number.into(),
        }
    }

    /// Trimmed copy, or a validation error naming every missing field.
    pub fn validated(&self) -> SigntrackResult<Self> {
        let trimmed = Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            order_number: self.order_number.trim().to_string(),
            bin_number: self.bin_number.trim().to_string(),
        };

        let missing: Vec<&str> = [
            (&trimmed.first_name, "First name is required"),
            (&trimmed.last_name, "Last name is required"),
            (&trimmed.order_number, "Order number is required"),
            (&trimmed.bin_number, "Bin number is required"),
        ]
        .into_iter()
        .filter(|(value, _)| value.is_empty())
        .map(|(_, msg)| msg)
        .collect();

        if !missing.is_empty() {
            return Err(SigntrackError::validation(missing.join("; ")));
        }
        Ok(trimmed)
    }

    /// Display name stored on the order.
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orders/model.rs"]
mod tests;
