use crate::capture::export::EncodedImage;
use crate::capture::host::{CaptureHost, DetachedHost};
use crate::capture::input::{InputPhase, InputSample, PointerId, SurfaceEvent};
use crate::capture::raster::{InkRaster, InkStyle, ResizePolicy};
use crate::capture::stroke::{InkSegment, Stroke, StrokePoint};
use crate::foundation::core::{LogicalSize, Point, Rgba8};

/// Capability interface a signature host depends on.
///
/// None of these report errors: a surface that cannot do its job degrades to "no content" and
/// logs, so a cosmetic failure never blocks the pickup flow.
pub trait SignatureSurface {
    /// Erase all rendered content. Idempotent.
    fn clear(&mut self);

    /// `true` iff no pixel differs from blank.
    fn is_empty(&self) -> bool;

    /// Current content as a PNG data URI. Empty when the surface is not sized yet.
    fn export_image(&self) -> EncodedImage;

    /// The surface's logical size changed.
    fn on_resize(&mut self, width: f64, height: f64);
}

/// Ink and buffer settings for a capture surface.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceOpts {
    /// Stroke width in logical pixels.
    pub stroke_width: f64,
    /// Ink color.
    pub stroke_color: Rgba8,
    /// Device pixels per logical pixel.
    pub device_pixel_ratio: f64,
    /// Pixel policy applied on every resize.
    pub resize_policy: ResizePolicy,
}

impl Default for SurfaceOpts {
    fn default() -> Self {
        Self {
            stroke_width: 3.0,
            stroke_color: Rgba8::BLACK,
            device_pixel_ratio: 1.0,
            resize_policy: ResizePolicy::Preserve,
        }
    }
}

impl SurfaceOpts {
    /// Return options with a different stroke width.
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Return options with a different ink color.
    pub fn with_stroke_color(mut self, color: Rgba8) -> Self {
        self.stroke_color = color;
        self
    }

    /// Return options with a different device pixel ratio.
    pub fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = dpr;
        self
    }

    /// Return options with a different resize policy.
    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }

    /// Replace out-of-range values with defaults.
    pub(crate) fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0) {
            tracing::warn!(
                dpr = self.device_pixel_ratio,
                "invalid device pixel ratio, using 1.0"
            );
            self.device_pixel_ratio = defaults.device_pixel_ratio;
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            tracing::warn!(
                width = self.stroke_width,
                "invalid stroke width, using default"
            );
            self.stroke_width = defaults.stroke_width;
        }
        self
    }
}

struct ActiveStroke {
    pointer: PointerId,
    stroke: Stroke,
    captured: bool,
    scroll_locked: bool,
}

enum CaptureState {
    Idle,
    Drawing(ActiveStroke),
}

/// Pointer-driven signature canvas backed by a CPU ink raster.
///
/// At most one stroke is active; presses from other pointers are ignored until it ends.
pub struct CaptureSurface<H: CaptureHost = DetachedHost> {
    opts: SurfaceOpts,
    size: LogicalSize,
    origin: Point,
    raster: InkRaster,
    state: CaptureState,
    host: H,
}

impl CaptureSurface<DetachedHost> {
    /// Mount a surface with no page integration.
    pub fn mount(size: LogicalSize, opts: SurfaceOpts) -> Self {
        Self::mount_with_host(size, opts, DetachedHost)
    }
}

impl<H: CaptureHost> CaptureSurface<H> {
    /// Mount a surface of `size` logical pixels using `host` for pointer capture and scroll lock.
    pub fn mount_with_host(size: LogicalSize, opts: SurfaceOpts, host: H) -> Self {
        let opts = opts.sanitized();
        let (w, h) = size.to_device(opts.device_pixel_ratio);
        tracing::debug!(
            width = size.width,
            height = size.height,
            device_width = w,
            device_height = h,
            "mounting capture surface"
        );
        Self {
            opts,
            size,
            origin: Point::ORIGIN,
            raster: InkRaster::new(w, h),
            state: CaptureState::Idle,
            host,
        }
    }

    /// End any active stroke and hand back the host.
    pub fn unmount(mut self) -> H {
        self.end_active_stroke();
        self.host
    }

    /// Client-space position of the surface's top-left corner.
    pub fn set_client_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Change the device pixel ratio and rebuild the buffer at the current logical size.
    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.opts = self.opts.with_device_pixel_ratio(dpr).sanitized();
        self.on_resize(self.size.width, self.size.height);
    }

    /// Active options.
    pub fn opts(&self) -> &SurfaceOpts {
        &self.opts
    }

    /// Logical size.
    pub fn logical_size(&self) -> LogicalSize {
        self.size
    }

    /// Backing buffer size in device pixels.
    pub fn device_size(&self) -> (u16, u16) {
        (self.raster.width(), self.raster.height())
    }

    /// Whether the backing buffer has a non-zero area.
    pub fn is_ready(&self) -> bool {
        self.raster.is_ready()
    }

    /// Premultiplied RGBA8 device pixels, or `None` before the surface has a non-zero size.
    pub fn pixels(&self) -> Option<&[u8]> {
        self.raster.data()
    }

    /// Number of device pixels carrying ink.
    pub fn inked_pixel_count(&self) -> usize {
        self.raster.inked_pixel_count()
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, CaptureState::Drawing(_))
    }

    /// Points buffered for the active stroke; empty when idle.
    pub fn active_points(&self) -> &[StrokePoint] {
        match &self.state {
            CaptureState::Drawing(active) => active.stroke.points(),
            CaptureState::Idle => &[],
        }
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutably borrow the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: &SurfaceEvent) {
        match event.phase {
            InputPhase::Down => self.press(&event.sample, event.t),
            InputPhase::Move => self.drag(&event.sample, event.t),
            InputPhase::Up => self.release(&event.sample),
            InputPhase::Cancel => self.cancel(&event.sample),
        }
    }

    /// Begin a stroke.
    pub fn press(&mut self, sample: &InputSample, t: f64) {
        let Some(located) = sample.locate(self.origin) else {
            tracing::debug!("ignoring press without usable coordinates");
            return;
        };
        if let CaptureState::Drawing(active) = &self.state {
            tracing::debug!(
                pointer = located.pointer,
                active = active.pointer,
                "ignoring press while another stroke is active"
            );
            return;
        }

        let captured = match self.host.acquire_pointer_capture(located.pointer) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, pointer = located.pointer, "pointer capture unavailable");
                false
            }
        };
        let scroll_locked = match self.host.lock_scroll() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "scroll lock unavailable, page may scroll while signing");
                false
            }
        };

        let first = StrokePoint::new(located.pos.x, located.pos.y, t);
        self.state = CaptureState::Drawing(ActiveStroke {
            pointer: located.pointer,
            stroke: Stroke::begin(first),
            captured,
            scroll_locked,
        });
    }

    /// Extend the active stroke.
    pub fn drag(&mut self, sample: &InputSample, t: f64) {
        let Some(located) = sample.locate(self.origin) else {
            return;
        };
        let CaptureState::Drawing(active) = &mut self.state else {
            return;
        };
        if active.pointer != located.pointer {
            return;
        }
        let segment = active
            .stroke
            .push(StrokePoint::new(located.pos.x, located.pos.y, t));
        if let Some(segment) = segment {
            self.render(&segment);
        }
    }

    /// End the active stroke on release.
    pub fn release(&mut self, sample: &InputSample) {
        self.end_stroke_for(sample, InputPhase::Up);
    }

    /// End the active stroke on cancel. Ink already rendered stays.
    pub fn cancel(&mut self, sample: &InputSample) {
        self.end_stroke_for(sample, InputPhase::Cancel);
    }

    /// End whichever stroke is active, keeping its ink.
    pub fn end_stroke(&mut self) {
        self.end_active_stroke();
    }

    fn end_stroke_for(&mut self, sample: &InputSample, phase: InputPhase) {
        let CaptureState::Drawing(active) = &self.state else {
            return;
        };
        // End events without coordinates (an emptied touch list) end whichever stroke is active.
        if let Some(located) = sample.locate(self.origin)
            && located.pointer != active.pointer
        {
            tracing::debug!(
                ?phase,
                pointer = located.pointer,
                active = active.pointer,
                "ignoring end event from inactive pointer"
            );
            return;
        }
        self.end_active_stroke();
    }

    fn end_active_stroke(&mut self) {
        let CaptureState::Drawing(active) = std::mem::replace(&mut self.state, CaptureState::Idle)
        else {
            return;
        };
        if let Some(segment) = active.stroke.finish() {
            self.render(&segment);
        }
        if active.captured {
            self.host.release_pointer_capture(active.pointer);
        }
        if active.scroll_locked {
            self.host.unlock_scroll();
        }
    }

    fn render(&mut self, segment: &InkSegment) {
        let dpr = self.opts.device_pixel_ratio;
        let style = InkStyle {
            width: self.opts.stroke_width * dpr,
            color: self.opts.stroke_color,
        };
        if let Err(err) = self.raster.paint(&segment.scaled(dpr), style) {
            tracing::warn!(%err, "dropping ink segment");
        }
    }
}

impl<H: CaptureHost> SignatureSurface for CaptureSurface<H> {
    fn clear(&mut self) {
        self.raster.clear();
    }

    fn is_empty(&self) -> bool {
        self.raster.is_blank()
    }

    fn export_image(&self) -> EncodedImage {
        let Some(data) = self.pixels() else {
            tracing::debug!("export requested before the surface has a size");
            return EncodedImage::default();
        };
        let (w, h) = self.device_size();
        match EncodedImage::encode_rgba8_premul(u32::from(w), u32::from(h), data) {
            Ok(image) => image,
            Err(err) => {
                tracing::error!(%err, "signature export failed");
                EncodedImage::default()
            }
        }
    }

    #[tracing::instrument(skip(self))]
    fn on_resize(&mut self, width: f64, height: f64) {
        if self.is_drawing() {
            tracing::debug!("resize during an active stroke, ending it as a cancel");
            self.end_active_stroke();
        }
        self.size = LogicalSize::new(width, height);
        let (w, h) = self.size.to_device(self.opts.device_pixel_ratio);
        self.raster = self.raster.resized(w, h, self.opts.resize_policy);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/surface.rs"]
mod tests;
