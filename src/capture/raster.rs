use crate::capture::stroke::InkSegment;
use crate::foundation::core::{BezPath, Rect, Rgba8};
use crate::foundation::error::{SigntrackError, SigntrackResult};
use crate::foundation::math::{PremulRgba8, over};

/// Packed value of a blank (fully transparent) pixel.
const BLANK_PIXEL: u32 = 0;

/// Extra device pixels around a segment's stroke extent, for antialiasing coverage.
const AA_MARGIN: f64 = 2.0;

/// Ink appearance in device pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct InkStyle {
    pub(crate) width: f64,
    pub(crate) color: Rgba8,
}

/// What happens to drawn pixels when the backing buffer changes size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Copy existing pixels into the new buffer at the top-left origin, clipped, unscaled.
    #[default]
    Preserve,
    /// Start over with a blank buffer.
    Clear,
}

/// The durable pixel buffer behind a capture surface.
///
/// Premultiplied RGBA8 in device pixels. A zero-area raster is "unready": it holds no pixmap,
/// reads as blank and ignores paint requests.
pub(crate) struct InkRaster {
    width: u16,
    height: u16,
    pixmap: Option<vello_cpu::Pixmap>,
}

impl InkRaster {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        let pixmap = (width > 0 && height > 0).then(|| vello_cpu::Pixmap::new(width, height));
        Self {
            width,
            height,
            pixmap,
        }
    }

    pub(crate) fn width(&self) -> u16 {
        self.width
    }

    pub(crate) fn height(&self) -> u16 {
        self.height
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.pixmap.is_some()
    }

    /// Premultiplied RGBA8 bytes, row-major, or `None` when unready.
    pub(crate) fn data(&self) -> Option<&[u8]> {
        self.pixmap.as_ref().map(|p| p.data_as_u8_slice())
    }

    pub(crate) fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.data_as_u8_slice_mut().fill(0);
        }
    }

    /// Exact scan of every pixel against the blank value.
    pub(crate) fn is_blank(&self) -> bool {
        let Some(data) = self.data() else {
            return true;
        };
        data.chunks_exact(4)
            .all(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) == BLANK_PIXEL)
    }

    /// Count of pixels that differ from blank.
    pub(crate) fn inked_pixel_count(&self) -> usize {
        self.data().map_or(0, |data| {
            data.chunks_exact(4)
                .filter(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) != BLANK_PIXEL)
                .count()
        })
    }

    /// A raster of the new size, carrying pixels over according to `policy`.
    pub(crate) fn resized(&self, width: u16, height: u16, policy: ResizePolicy) -> Self {
        let mut next = Self::new(width, height);
        if policy == ResizePolicy::Clear {
            return next;
        }
        let (Some(src), Some(dst)) = (self.pixmap.as_ref(), next.pixmap.as_mut()) else {
            return next;
        };

        let copy_w = usize::from(self.width.min(width)) * 4;
        let copy_h = usize::from(self.height.min(height));
        let src_stride = usize::from(self.width) * 4;
        let dst_stride = usize::from(width) * 4;
        let src_bytes = src.data_as_u8_slice();
        let dst_bytes = dst.data_as_u8_slice_mut();
        for row in 0..copy_h {
            let s = row * src_stride;
            let d = row * dst_stride;
            dst_bytes[d..d + copy_w].copy_from_slice(&src_bytes[s..s + copy_w]);
        }
        next
    }

    /// Render one device-space segment and composite it over the buffer.
    ///
    /// The segment is rasterized into a scratch pixmap covering only its clipped extent, so the
    /// work per call is proportional to the segment, not the surface.
    pub(crate) fn paint(&mut self, segment: &InkSegment, style: InkStyle) -> SigntrackResult<()> {
        let (buf_w, buf_h) = (self.width, self.height);
        let Some(pixmap) = self.pixmap.as_mut() else {
            return Ok(());
        };

        let half = style.width * 0.5;
        let area = segment
            .hull_bounds()
            .inflate(half + AA_MARGIN, half + AA_MARGIN)
            .expand()
            .intersect(Rect::new(0.0, 0.0, f64::from(buf_w), f64::from(buf_h)));
        if !(area.width() > 0.0 && area.height() > 0.0) {
            return Ok(());
        }
        let (x0, y0) = (area.x0 as usize, area.y0 as usize);
        let scratch_w: u16 = (area.width() as u32)
            .try_into()
            .map_err(|_| SigntrackError::surface("segment extent exceeds u16"))?;
        let scratch_h: u16 = (area.height() as u32)
            .try_into()
            .map_err(|_| SigntrackError::surface("segment extent exceeds u16"))?;

        let path = segment.to_path(half);
        let mut ctx = vello_cpu::RenderContext::new(scratch_w, scratch_h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate(
            vello_cpu::kurbo::Vec2::new(-area.x0, -area.y0),
        ));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            style.color.r,
            style.color.g,
            style.color.b,
            style.color.a,
        ));
        let cpu_path = bezpath_to_cpu(&path);
        if segment.is_fill() {
            ctx.fill_path(&cpu_path);
        } else {
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(style.width)
                    .with_caps(vello_cpu::kurbo::Cap::Round)
                    .with_join(vello_cpu::kurbo::Join::Round),
            );
            ctx.stroke_path(&cpu_path);
        }
        ctx.flush();

        let mut scratch = vello_cpu::Pixmap::new(scratch_w, scratch_h);
        ctx.render_to_pixmap(&mut scratch);

        let dst_stride = usize::from(buf_w) * 4;
        let src_stride = usize::from(scratch_w) * 4;
        let dst = pixmap.data_as_u8_slice_mut();
        for (row, src_row) in scratch
            .data_as_u8_slice()
            .chunks_exact(src_stride)
            .enumerate()
        {
            let start = (y0 + row) * dst_stride + x0 * 4;
            let dst_row = &mut dst[start..start + src_stride];
            for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                let out: PremulRgba8 = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                d.copy_from_slice(&out);
            }
        }
        Ok(())
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/capture/raster.rs"]
mod tests;
