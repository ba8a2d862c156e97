//! Raw input normalization.
//!
//! Mouse, touch and pointer payloads arrive in client (page) coordinates. Every variant resolves to
//! the same [`Located`] contract, in surface-local logical pixels, before it reaches the stroke
//! algorithm.

use crate::foundation::core::Point;

/// Identifier of the pointer (or touch) driving a stroke.
pub type PointerId = i64;

/// Pointer id used for mouse samples, which carry none of their own.
pub const MOUSE_POINTER_ID: PointerId = -1;

/// Lifecycle phase of an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPhase {
    /// Press (mousedown, touchstart, pointerdown).
    Down,
    /// Motion (mousemove, touchmove, pointermove).
    Move,
    /// Release (mouseup, mouseleave, touchend, pointerup).
    Up,
    /// Cancellation (touchcancel, pointercancel). Ends a stroke exactly like `Up`.
    Cancel,
}

/// One active touch contact.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TouchPoint {
    /// Touch identifier as reported by the platform.
    pub id: PointerId,
    /// Client-space position.
    pub client: Point,
}

/// Input payload, tagged by the device family that produced it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputSample {
    /// Mouse event.
    Mouse {
        /// Client-space position.
        client: Point,
    },
    /// Touch event. Only the first listed touch is used.
    Touch {
        /// Touch list (changed touches for end/cancel events).
        touches: Vec<TouchPoint>,
    },
    /// Unified pointer event.
    Pointer {
        /// Pointer identifier.
        pointer_id: PointerId,
        /// Client-space position.
        client: Point,
    },
}

/// An input sample resolved into surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Located {
    /// Pointer that produced the sample.
    pub pointer: PointerId,
    /// Surface-local position in logical pixels.
    pub pos: Point,
}

impl InputSample {
    /// Convenience constructor for a mouse sample.
    pub fn mouse(x: f64, y: f64) -> Self {
        Self::Mouse {
            client: Point::new(x, y),
        }
    }

    /// Convenience constructor for a single-touch sample.
    pub fn touch(id: PointerId, x: f64, y: f64) -> Self {
        Self::Touch {
            touches: vec![TouchPoint {
                id,
                client: Point::new(x, y),
            }],
        }
    }

    /// Convenience constructor for a pointer sample.
    pub fn pointer(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self::Pointer {
            pointer_id,
            client: Point::new(x, y),
        }
    }

    /// Resolve into surface-local coordinates by subtracting the surface's client-space `origin`.
    ///
    /// Returns `None` for an empty touch list or non-finite coordinates.
    pub fn locate(&self, origin: Point) -> Option<Located> {
        let (pointer, client) = match self {
            Self::Mouse { client } => (MOUSE_POINTER_ID, *client),
            Self::Touch { touches } => {
                let first = touches.first()?;
                (first.id, first.client)
            }
            Self::Pointer { pointer_id, client } => (*pointer_id, *client),
        };
        let pos = Point::new(client.x - origin.x, client.y - origin.y);
        if !(pos.x.is_finite() && pos.y.is_finite()) {
            return None;
        }
        Some(Located { pointer, pos })
    }
}

/// A timestamped input event addressed to a capture surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceEvent {
    /// Event phase.
    pub phase: InputPhase,
    /// Device payload.
    pub sample: InputSample,
    /// Event timestamp in milliseconds.
    #[serde(default)]
    pub t: f64,
}

impl SurfaceEvent {
    /// Build an event.
    pub fn new(phase: InputPhase, sample: InputSample, t: f64) -> Self {
        Self { phase, sample, t }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/input.rs"]
mod tests;
