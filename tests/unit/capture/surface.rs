use super::*;
use crate::foundation::error::{SigntrackError, SigntrackResult};

#[derive(Debug, Default)]
struct RecordingHost {
    fail_capture: bool,
    fail_scroll_lock: bool,
    captured: Vec<PointerId>,
    released: Vec<PointerId>,
    scroll_locks: u32,
    scroll_unlocks: u32,
}

impl CaptureHost for RecordingHost {
    fn acquire_pointer_capture(&mut self, pointer: PointerId) -> SigntrackResult<()> {
        if self.fail_capture {
            return Err(SigntrackError::surface("setPointerCapture unsupported"));
        }
        self.captured.push(pointer);
        Ok(())
    }

    fn release_pointer_capture(&mut self, pointer: PointerId) {
        self.released.push(pointer);
    }

    fn lock_scroll(&mut self) -> SigntrackResult<()> {
        if self.fail_scroll_lock {
            return Err(SigntrackError::surface("overscroll-behavior unsupported"));
        }
        self.scroll_locks += 1;
        Ok(())
    }

    fn unlock_scroll(&mut self) {
        self.scroll_unlocks += 1;
    }
}

fn surface(w: f64, h: f64) -> CaptureSurface {
    CaptureSurface::mount(LogicalSize::new(w, h), SurfaceOpts::default())
}

fn draw(s: &mut CaptureSurface<impl CaptureHost>, pointer: PointerId, pts: &[(f64, f64)]) {
    let (first, rest) = pts.split_first().unwrap();
    s.press(&InputSample::pointer(pointer, first.0, first.1), 0.0);
    for (i, &(x, y)) in rest.iter().enumerate() {
        s.drag(&InputSample::pointer(pointer, x, y), (i + 1) as f64 * 16.0);
    }
    let last = pts.last().unwrap();
    s.release(&InputSample::pointer(pointer, last.0, last.1));
}

#[test]
fn fresh_surface_is_empty_and_exports_blank_png() {
    let s = surface(300.0, 150.0);
    assert!(s.is_empty());
    let img = s.export_image().decode().unwrap();
    assert_eq!(img.dimensions(), (300, 150));
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn stroke_then_clear_toggles_emptiness() {
    let mut s = surface(120.0, 60.0);
    draw(&mut s, 1, &[(10.0, 10.0), (40.0, 20.0), (80.0, 30.0)]);
    assert!(!s.is_empty());
    draw(&mut s, 1, &[(10.0, 50.0), (100.0, 50.0)]);
    s.clear();
    assert!(s.is_empty());
    s.clear();
    assert!(s.is_empty());
}

#[test]
fn tap_without_movement_leaves_a_dot() {
    let mut s = surface(50.0, 50.0);
    s.press(&InputSample::mouse(25.0, 25.0), 0.0);
    assert!(s.is_empty());
    s.release(&InputSample::mouse(25.0, 25.0));
    assert!(!s.is_empty());
    assert!(s.inked_pixel_count() > 0);
}

#[test]
fn tap_with_zero_delta_moves_leaves_a_dot() {
    let opts = SurfaceOpts::default().with_device_pixel_ratio(2.0);
    for moves in 1..=2 {
        let mut s = CaptureSurface::mount(LogicalSize::new(300.0, 150.0), opts);
        s.press(&InputSample::touch(1, 50.0, 50.0), 0.0);
        for i in 0..moves {
            s.drag(&InputSample::touch(1, 50.0, 50.0), f64::from(i + 1));
        }
        s.release(&InputSample::touch(1, 50.0, 50.0));
        assert!(!s.is_empty(), "{moves} stationary moves left no ink");
        let img = s.export_image().decode().unwrap();
        assert!(img.get_pixel(100, 100).0[3] > 0);
    }
}

#[test]
fn collinear_input_stays_on_the_line() {
    let mut s = surface(200.0, 100.0);
    draw(
        &mut s,
        1,
        &[(10.0, 50.0), (50.0, 50.0), (90.0, 50.0), (130.0, 50.0), (170.0, 50.0)],
    );
    let data = s.pixels().unwrap();
    let tolerance = s.opts().stroke_width;
    let mut inked = 0;
    for (i, px) in data.chunks_exact(4).enumerate() {
        if px[3] == 0 {
            continue;
        }
        inked += 1;
        let x = (i % 200) as f64 + 0.5;
        let y = (i / 200) as f64 + 0.5;
        assert!((y - 50.0).abs() <= tolerance, "ink at y={y} strays from the line");
        assert!((10.0 - tolerance..=170.0 + tolerance).contains(&x));
    }
    assert!(inked > 0);
    // The whole span is covered on the center row.
    for x in 12..168 {
        assert!(data[(50 * 200 + x) * 4 + 3] > 0, "gap at x={x}");
    }
}

#[test]
fn second_pointer_press_is_ignored() {
    let mut s = surface(100.0, 100.0);
    s.press(&InputSample::pointer(1, 10.0, 10.0), 0.0);
    s.drag(&InputSample::pointer(1, 20.0, 10.0), 1.0);
    s.press(&InputSample::pointer(2, 90.0, 90.0), 2.0);
    s.drag(&InputSample::pointer(2, 80.0, 80.0), 3.0);
    s.release(&InputSample::pointer(2, 80.0, 80.0));

    assert!(s.is_drawing());
    let pts = s.active_points();
    assert_eq!(pts.len(), 2);
    assert!(pts.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    assert_eq!(pts[1].x, 20.0);

    s.release(&InputSample::pointer(1, 20.0, 10.0));
    assert!(!s.is_drawing());
    assert!(s.active_points().is_empty());
}

#[test]
fn nan_samples_never_enter_the_stroke() {
    let mut s = surface(100.0, 100.0);
    s.press(&InputSample::mouse(f64::NAN, 5.0), 0.0);
    assert!(!s.is_drawing());
    s.press(&InputSample::mouse(5.0, 5.0), 0.0);
    s.drag(&InputSample::mouse(f64::NAN, f64::NAN), 1.0);
    assert_eq!(s.active_points().len(), 1);
}

#[test]
fn client_origin_is_subtracted() {
    let mut s = surface(100.0, 100.0);
    s.set_client_origin(Point::new(200.0, 300.0));
    s.press(&InputSample::touch(9, 210.0, 320.0), 4.0);
    let p = s.active_points()[0];
    assert_eq!((p.x, p.y, p.t), (10.0, 20.0, 4.0));
}

#[test]
fn emptied_touch_list_ends_the_active_stroke() {
    let mut s = surface(100.0, 100.0);
    s.press(&InputSample::touch(3, 10.0, 10.0), 0.0);
    s.drag(&InputSample::touch(3, 30.0, 10.0), 1.0);
    s.handle(&SurfaceEvent::new(
        InputPhase::Up,
        InputSample::Touch { touches: vec![] },
        2.0,
    ));
    assert!(!s.is_drawing());
    assert!(!s.is_empty());
}

#[test]
fn host_capture_and_scroll_lock_bracket_each_stroke() {
    let mut s = CaptureSurface::mount_with_host(
        LogicalSize::new(100.0, 100.0),
        SurfaceOpts::default(),
        RecordingHost::default(),
    );
    s.press(&InputSample::pointer(5, 10.0, 10.0), 0.0);
    assert_eq!(s.host().captured, vec![5]);
    assert_eq!(s.host().scroll_locks, 1);
    assert_eq!(s.host().scroll_unlocks, 0);

    s.cancel(&InputSample::pointer(5, 10.0, 10.0));
    assert_eq!(s.host().released, vec![5]);
    assert_eq!(s.host().scroll_unlocks, 1);
    // Cancel ends like release: the tap dot is kept.
    assert!(!s.is_empty());
}

#[test]
fn capture_failures_do_not_block_drawing() {
    let host = RecordingHost {
        fail_capture: true,
        fail_scroll_lock: true,
        ..RecordingHost::default()
    };
    let mut s =
        CaptureSurface::mount_with_host(LogicalSize::new(100.0, 100.0), SurfaceOpts::default(), host);
    draw(&mut s, 1, &[(10.0, 10.0), (60.0, 60.0)]);
    assert!(!s.is_empty());
    // Nothing acquired, so nothing released.
    assert!(s.host().released.is_empty());
    assert_eq!(s.host().scroll_unlocks, 0);

    // Once the page grants capture again, strokes are bracketed as usual.
    s.host_mut().fail_capture = false;
    s.host_mut().fail_scroll_lock = false;
    draw(&mut s, 2, &[(20.0, 20.0), (70.0, 70.0)]);
    assert_eq!(s.host().captured, vec![2]);
    assert_eq!(s.host().released, vec![2]);
    assert_eq!(s.host().scroll_unlocks, 1);
}

#[test]
fn resize_mid_stroke_cancels_and_preserves_ink() {
    let mut s = CaptureSurface::mount_with_host(
        LogicalSize::new(100.0, 50.0),
        SurfaceOpts::default(),
        RecordingHost::default(),
    );
    s.press(&InputSample::pointer(1, 10.0, 10.0), 0.0);
    s.drag(&InputSample::pointer(1, 40.0, 10.0), 1.0);
    s.on_resize(200.0, 80.0);

    assert!(!s.is_drawing());
    assert_eq!(s.host().scroll_unlocks, 1);
    assert_eq!(s.device_size(), (200, 80));
    assert!(!s.is_empty());

    // The export carries the pre-resize ink at its original device position.
    let img = s.export_image().decode().unwrap();
    assert_eq!(img.dimensions(), (200, 80));
    assert!(img.get_pixel(25, 10).0[3] > 0);
    assert_eq!(img.get_pixel(25, 40).0[3], 0);
    assert_eq!(img.get_pixel(150, 10).0[3], 0);

    // Later moves from the old pointer are ignored.
    s.drag(&InputSample::pointer(1, 90.0, 70.0), 2.0);
    assert!(s.active_points().is_empty());
}

#[test]
fn clear_resize_policy_blanks_on_resize() {
    let opts = SurfaceOpts::default().with_resize_policy(ResizePolicy::Clear);
    let mut s = CaptureSurface::mount(LogicalSize::new(100.0, 50.0), opts);
    draw(&mut s, 1, &[(10.0, 10.0), (40.0, 10.0)]);
    s.on_resize(100.0, 50.0);
    assert!(s.is_empty());
}

#[test]
fn device_pixel_ratio_scales_buffer() {
    let mut s = surface(300.0, 150.0);
    assert_eq!(s.device_size(), (300, 150));
    s.set_device_pixel_ratio(2.0);
    assert_eq!(s.device_size(), (600, 300));
    s.set_device_pixel_ratio(f64::NAN);
    assert_eq!(s.opts().device_pixel_ratio, 1.0);
    assert_eq!(s.device_size(), (300, 150));
}

#[test]
fn unready_surface_reads_as_empty() {
    let mut s = surface(0.0, 0.0);
    assert!(!s.is_ready());
    assert!(s.is_empty());
    assert!(s.export_image().is_empty());
    draw(&mut s, 1, &[(1.0, 1.0), (2.0, 2.0)]);
    assert!(s.is_empty());

    s.on_resize(20.0, 20.0);
    assert!(s.is_ready());
    assert!(s.is_empty());
    assert!(!s.export_image().is_empty());
}

#[test]
fn zero_opacity_ink_keeps_surface_empty() {
    let opts = SurfaceOpts::default().with_stroke_color(Rgba8::new(0, 0, 0, 0));
    let mut s = CaptureSurface::mount(LogicalSize::new(60.0, 60.0), opts);
    draw(&mut s, 1, &[(10.0, 10.0), (30.0, 30.0), (50.0, 10.0)]);
    assert!(s.is_empty());
}

#[test]
fn unmount_releases_an_active_stroke() {
    let mut s = CaptureSurface::mount_with_host(
        LogicalSize::new(40.0, 40.0),
        SurfaceOpts::default(),
        RecordingHost::default(),
    );
    s.press(&InputSample::pointer(4, 5.0, 5.0), 0.0);
    let host = s.unmount();
    assert_eq!(host.released, vec![4]);
    assert_eq!(host.scroll_unlocks, 1);
}

#[test]
fn invalid_stroke_width_falls_back_to_default() {
    let opts = SurfaceOpts::default().with_stroke_width(f64::INFINITY);
    let s = CaptureSurface::mount(LogicalSize::new(10.0, 10.0), opts);
    assert_eq!(s.opts().stroke_width, 3.0);
}
