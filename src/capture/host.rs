use crate::capture::input::PointerId;
use crate::foundation::error::SigntrackResult;

/// Platform services a capture surface asks of the page hosting it.
///
/// Acquisition failures are non-fatal: the surface logs them and keeps drawing without the
/// exclusive capture or scroll lock.
pub trait CaptureHost {
    /// Route subsequent events of `pointer` exclusively to the surface.
    fn acquire_pointer_capture(&mut self, pointer: PointerId) -> SigntrackResult<()>;

    /// Undo [`CaptureHost::acquire_pointer_capture`].
    fn release_pointer_capture(&mut self, pointer: PointerId);

    /// Disable page scroll and overscroll while a stroke is in progress.
    fn lock_scroll(&mut self) -> SigntrackResult<()>;

    /// Restore the scroll settings saved by [`CaptureHost::lock_scroll`].
    fn unlock_scroll(&mut self);
}

/// Host for environments without pointer capture or a scrollable page (tests, offline replay).
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedHost;

impl CaptureHost for DetachedHost {
    fn acquire_pointer_capture(&mut self, _pointer: PointerId) -> SigntrackResult<()> {
        Ok(())
    }

    fn release_pointer_capture(&mut self, _pointer: PointerId) {}

    fn lock_scroll(&mut self) -> SigntrackResult<()> {
        Ok(())
    }

    fn unlock_scroll(&mut self) {}
}
