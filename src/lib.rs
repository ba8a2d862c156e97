//! signtrack is an order-pickup tracker for a self-service kiosk.
//!
//! Customers find their order by name and sign for it on a pointer-driven capture surface; the
//! signature is stored with the order as a PNG data URI. Associates manage orders from a
//! passphrase-gated dashboard and print an end-of-day pickup report.
//!
//! - [`CaptureSurface`] implements [`SignatureSurface`] over a CPU ink raster
//! - [`OrderStore`] is the persistence seam, with [`MemoryOrderStore`] in-process
//! - [`KioskSession`] and [`SignatureCapture`] drive the customer and associate flows
#![forbid(unsafe_code)]

mod foundation;

/// Signature capture surface.
pub mod capture;
/// Kiosk configuration.
pub mod config;
/// Kiosk flows.
pub mod kiosk;
/// Orders and the order store.
pub mod orders;

pub use crate::capture::ResizePolicy;
pub use crate::capture::export::EncodedImage;
pub use crate::capture::host::{CaptureHost, DetachedHost};
pub use crate::capture::input::{InputPhase, InputSample, PointerId, SurfaceEvent, TouchPoint};
pub use crate::capture::stroke::StrokePoint;
pub use crate::capture::surface::{CaptureSurface, SignatureSurface, SurfaceOpts};
pub use crate::config::KioskConfig;
pub use crate::foundation::core::{CalendarDate, LogicalSize, Point, Rgba8, Timestamp};
pub use crate::foundation::error::{SigntrackError, SigntrackResult};
pub use crate::kiosk::capture::SignatureCapture;
pub use crate::kiosk::session::KioskSession;
pub use crate::orders::dashboard::Dashboard;
pub use crate::orders::model::{Order, OrderFields, OrderStatus};
pub use crate::orders::report::{EodReport, ReportRow};
pub use crate::orders::search::SearchOutcome;
pub use crate::orders::store::{Clock, ManualClock, MemoryOrderStore, OrderStore, SystemClock};
