use crate::capture::surface::CaptureSurface;
use crate::config::KioskConfig;
use crate::foundation::core::{CalendarDate, LogicalSize, Timestamp};
use crate::foundation::error::{SigntrackError, SigntrackResult};
use crate::kiosk::capture::SignatureCapture;
use crate::orders::dashboard::Dashboard;
use crate::orders::model::{Order, OrderFields};
use crate::orders::report::EodReport;
use crate::orders::search::{SearchOutcome, search_pending};
use crate::orders::store::OrderStore;

/// Message shown for a wrong associate passphrase.
pub const INCORRECT_PASSWORD: &str = "Incorrect password. Please try again.";

/// Kiosk UI state from mount to teardown.
///
/// Customer operations are always available; dashboard and order management need associate
/// mode, entered with [`KioskSession::unlock`].
#[derive(Debug)]
pub struct KioskSession {
    config: KioskConfig,
    started_at: Timestamp,
    associate: bool,
}

impl KioskSession {
    /// Mount a session in customer mode.
    pub fn new(config: KioskConfig) -> Self {
        let started_at = Timestamp::now();
        tracing::info!(%started_at, "kiosk session started");
        Self {
            config,
            started_at,
            associate: false,
        }
    }

    /// Tear the session down.
    pub fn end(self) {
        tracing::info!(
            started_at = %self.started_at,
            associate = self.associate,
            "kiosk session ended"
        );
    }

    /// Active configuration.
    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    /// Whether associate mode is unlocked.
    pub fn is_associate(&self) -> bool {
        self.associate
    }

    /// Enter associate mode.
    pub fn unlock(&mut self, passphrase: &str) -> SigntrackResult<()> {
        if passphrase != self.config.associate_passphrase {
            tracing::warn!("rejected associate passphrase");
            return Err(SigntrackError::access_denied(INCORRECT_PASSWORD));
        }
        self.associate = true;
        tracing::info!("associate mode unlocked");
        Ok(())
    }

    /// Return to customer mode.
    pub fn lock(&mut self) {
        self.associate = false;
    }

    /// Fail unless associate mode is unlocked.
    pub fn require_associate(&self) -> SigntrackResult<()> {
        if self.associate {
            Ok(())
        } else {
            Err(SigntrackError::access_denied("associate mode is locked"))
        }
    }

    /// Customer name search honoring the configured minimum length.
    pub fn search(&self, store: &dyn OrderStore, query: &str) -> SearchOutcome {
        search_pending(store, query, self.config.min_search_len)
    }

    /// Open the signature page for `order_id` with a surface `width` logical pixels wide.
    pub fn begin_capture(
        &self,
        store: &dyn OrderStore,
        order_id: &str,
        width: f64,
    ) -> SigntrackResult<SignatureCapture<CaptureSurface>> {
        let size = LogicalSize::new(width, self.config.surface_height);
        SignatureCapture::open(store, order_id, CaptureSurface::mount(size, self.config.surface))
    }

    /// Associate dashboard for `today`.
    pub fn dashboard(&self, store: &dyn OrderStore, today: CalendarDate) -> SigntrackResult<Dashboard> {
        self.require_associate()?;
        Ok(Dashboard::from_snapshot(&store.list_orders(), today))
    }

    /// End-of-day report for `date`.
    pub fn eod_report(&self, store: &dyn OrderStore, date: CalendarDate) -> SigntrackResult<EodReport> {
        self.require_associate()?;
        Ok(EodReport::build(&store.list_orders(), date))
    }

    /// Add an order from the dashboard.
    pub fn create_order(
        &self,
        store: &mut dyn OrderStore,
        fields: &OrderFields,
    ) -> SigntrackResult<Order> {
        self.require_associate()?;
        store.create_order(fields)
    }

    /// Edit an order from the dashboard.
    pub fn update_order(
        &self,
        store: &mut dyn OrderStore,
        id: &str,
        fields: &OrderFields,
    ) -> SigntrackResult<Order> {
        self.require_associate()?;
        store.update_order(id, fields)
    }

    /// Delete an order from the dashboard.
    pub fn delete_order(&self, store: &mut dyn OrderStore, id: &str) -> SigntrackResult<()> {
        self.require_associate()?;
        store.delete_order(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kiosk/session.rs"]
mod tests;
