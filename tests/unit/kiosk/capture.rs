use super::*;
use crate::capture::export::EncodedImage;
use crate::capture::input::InputSample;
use crate::capture::surface::{CaptureSurface, SurfaceOpts};
use crate::foundation::core::{LogicalSize, Timestamp};
use crate::orders::model::{OrderFields, OrderStatus};
use crate::orders::store::{ManualClock, MemoryOrderStore};

/// Surface double that reports a fixed state and counts calls.
#[derive(Default)]
struct FakeSurface {
    empty: bool,
    export: String,
    clears: u32,
}

impl SignatureSurface for FakeSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.empty = true;
    }

    fn is_empty(&self) -> bool {
        self.empty
    }

    fn export_image(&self) -> EncodedImage {
        EncodedImage::from_data_uri(self.export.clone())
    }

    fn on_resize(&mut self, _width: f64, _height: f64) {}
}

fn seeded() -> (MemoryOrderStore<ManualClock>, String) {
    let mut store = MemoryOrderStore::with_clock(ManualClock::new(Timestamp(7_000)));
    let order = store
        .create_order(&OrderFields::new("Ada", "Lovelace", "1001", "B7"))
        .unwrap();
    (store, order.id)
}

#[test]
fn blank_signature_is_rejected_without_store_call() {
    let (mut store, id) = seeded();
    let rx = store.subscribe();
    let _ = rx.try_recv();

    let surface = FakeSurface {
        empty: true,
        ..FakeSurface::default()
    };
    let mut page = SignatureCapture::open(&store, &id, surface).unwrap();
    let err = page.confirm(&mut store).unwrap_err();
    assert!(err.to_string().contains("Signature Required"));
    assert!(rx.try_recv().is_err());
    assert!(store.get_order(&id).unwrap().is_awaiting());
}

#[test]
fn confirm_records_exported_image() {
    let (mut store, id) = seeded();
    let surface = FakeSurface {
        empty: false,
        export: "data:image/png;base64,AAAA".to_string(),
        clears: 0,
    };
    let mut page = SignatureCapture::open(&store, &id, surface).unwrap();
    let order = page.confirm(&mut store).unwrap();
    assert_eq!(order.status, OrderStatus::PickedUp);
    assert_eq!(order.picked_up_at, Some(Timestamp(7_000)));
    assert_eq!(
        order.signature.as_ref().map(EncodedImage::as_str),
        Some("data:image/png;base64,AAAA")
    );
    assert_eq!(page.order(), &order);
}

#[test]
fn clear_forwards_to_surface() {
    let (store, id) = seeded();
    let mut page = SignatureCapture::open(&store, &id, FakeSurface::default()).unwrap();
    page.clear();
    page.clear();
    assert_eq!(page.close().clears, 2);
}

#[test]
fn open_refuses_missing_and_picked_up_orders() {
    let (mut store, id) = seeded();
    assert!(matches!(
        SignatureCapture::open(&store, "nope", FakeSurface::default()),
        Err(SigntrackError::NotFound(_))
    ));

    store
        .mark_picked_up(&id, &EncodedImage::from_data_uri("data:image/png;base64,AA=="))
        .unwrap();
    let err = SignatureCapture::open(&store, &id, FakeSurface::default())
        .err()
        .unwrap();
    assert!(err.to_string().contains("already been picked up"));
}

#[test]
fn real_surface_round_trip() {
    let (mut store, id) = seeded();
    let surface = CaptureSurface::mount(LogicalSize::new(200.0, 80.0), SurfaceOpts::default());
    let mut page = SignatureCapture::open(&store, &id, surface).unwrap();

    assert!(page.confirm(&mut store).is_err());

    let s = page.surface_mut();
    s.press(&InputSample::mouse(20.0, 40.0), 0.0);
    s.drag(&InputSample::mouse(60.0, 30.0), 16.0);
    s.drag(&InputSample::mouse(120.0, 50.0), 32.0);
    s.release(&InputSample::mouse(120.0, 50.0));

    let order = page.confirm(&mut store).unwrap();
    let png = order.signature.unwrap().decode().unwrap();
    assert_eq!(png.dimensions(), (200, 80));
    assert!(png.pixels().any(|p| p.0[3] > 0));
}
