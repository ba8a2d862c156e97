//! Kiosk flows on top of the capture surface and the order store.

/// Signature page and pickup confirmation.
pub mod capture;
/// Session state and the associate access gate.
pub mod session;
