use crate::capture::surface::SignatureSurface;
use crate::foundation::error::{SigntrackError, SigntrackResult};
use crate::orders::model::Order;
use crate::orders::store::OrderStore;

/// Message shown when confirming with a blank signature.
pub const SIGNATURE_REQUIRED: &str =
    "Signature Required: Please provide a signature before confirming.";

/// Signature page for one order: owns the surface and confirms the pickup.
pub struct SignatureCapture<S: SignatureSurface> {
    order: Order,
    surface: S,
}

impl<S: SignatureSurface> SignatureCapture<S> {
    /// Load `order_id` and attach `surface`. Orders already picked up are refused.
    #[tracing::instrument(skip(store, surface))]
    pub fn open(store: &dyn OrderStore, order_id: &str, surface: S) -> SigntrackResult<Self> {
        let order = store
            .get_order(order_id)
            .ok_or_else(|| SigntrackError::not_found(format!("order '{order_id}'")))?;
        if !order.is_awaiting() {
            return Err(SigntrackError::validation(format!(
                "order {} has already been picked up",
                order.order_number
            )));
        }
        Ok(Self { order, surface })
    }

    /// The order being signed for, as loaded.
    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Borrow the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the surface, e.g. to feed it input.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Wipe the signature.
    pub fn clear(&mut self) {
        self.surface.clear();
    }

    /// Export the signature and record the pickup.
    ///
    /// A blank surface is rejected before the store is touched.
    #[tracing::instrument(skip(self, store), fields(order = %self.order.id))]
    pub fn confirm(&mut self, store: &mut dyn OrderStore) -> SigntrackResult<Order> {
        if self.surface.is_empty() {
            return Err(SigntrackError::validation(SIGNATURE_REQUIRED));
        }
        let image = self.surface.export_image();
        if image.is_empty() {
            tracing::error!("non-empty surface produced no image");
            return Err(SigntrackError::validation(SIGNATURE_REQUIRED));
        }
        let order = store.mark_picked_up(&self.order.id, &image)?;
        self.order = order.clone();
        Ok(order)
    }

    /// Detach and return the surface.
    pub fn close(self) -> S {
        self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kiosk/capture.rs"]
mod tests;
