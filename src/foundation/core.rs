use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::error::{SigntrackError, SigntrackResult};

pub use kurbo::{BezPath, Point, Rect};

const MS_PER_DAY: i64 = 86_400_000;

/// Surface dimensions in logical (CSS) pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSize {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl LogicalSize {
    /// Create a size; negative or non-finite components collapse to `0.0`.
    pub fn new(width: f64, height: f64) -> Self {
        fn sane(v: f64) -> f64 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    /// Backing buffer size in device pixels for `dpr`, rounded to the nearest pixel.
    ///
    /// Each axis saturates at `u16::MAX`, the largest raster the CPU backend supports.
    pub fn to_device(self, dpr: f64) -> (u16, u16) {
        fn axis(v: f64, dpr: f64) -> u16 {
            (v * dpr).round().clamp(0.0, f64::from(u16::MAX)) as u16
        }
        (axis(self.width, dpr), axis(self.height, dpr))
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black, the default ink color.
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Create a color from straight-alpha channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> SigntrackResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| SigntrackError::validation(format!("color '{s}' must start with '#'")))?;
        let nibble = |c: u8| -> SigntrackResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| SigntrackError::validation(format!("color '{s}' is not hex")))
        };
        let b = hex.as_bytes();
        match b.len() {
            3 => {
                let r = nibble(b[0])?;
                let g = nibble(b[1])?;
                let bl = nibble(b[2])?;
                Ok(Self::new(r * 17, g * 17, bl * 17, 255))
            }
            6 | 8 => {
                let byte = |i: usize| -> SigntrackResult<u8> {
                    Ok(nibble(b[i])? << 4 | nibble(b[i + 1])?)
                };
                let a = if b.len() == 8 { byte(6)? } else { 255 };
                Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, a))
            }
            _ => Err(SigntrackError::validation(format!(
                "color '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Wall-clock instant as milliseconds since the Unix epoch (UTC).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current system time. Clocks before the epoch read as the epoch.
    pub fn now() -> Self {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        Self(ms)
    }

    /// UTC calendar date containing this instant.
    pub fn date(self) -> CalendarDate {
        CalendarDate::from_days(self.0.div_euclid(MS_PER_DAY))
    }

    /// Milliseconds elapsed since UTC midnight.
    fn ms_of_day(self) -> i64 {
        self.0.rem_euclid(MS_PER_DAY)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.ms_of_day();
        let secs = ms / 1000;
        write!(
            f,
            "{} {:02}:{:02}:{:02} UTC",
            self.date(),
            secs / 3600,
            (secs / 60) % 60,
            secs % 60
        )
    }
}

/// Proleptic Gregorian UTC calendar date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    /// Year, e.g. `2026`.
    pub year: i32,
    /// Month `1..=12`.
    pub month: u32,
    /// Day of month `1..=31`.
    pub day: u32,
}

impl CalendarDate {
    /// Date for a day count relative to 1970-01-01.
    pub fn from_days(days: i64) -> Self {
        // Civil-from-days over 400-year eras.
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as i32;
        Self { year, month, day }
    }

    /// Day count relative to 1970-01-01.
    pub fn to_days(self) -> i64 {
        let y = i64::from(self.year) - i64::from(self.month <= 2);
        let era = y.div_euclid(400);
        let yoe = y.rem_euclid(400);
        let m = i64::from(self.month);
        let mp = if m > 2 { m - 3 } else { m + 9 };
        let doy = (153 * mp + 2) / 5 + i64::from(self.day) - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = SigntrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SigntrackError::validation(format!("date '{s}' must be YYYY-MM-DD"));
        let mut parts = s.trim().splitn(3, '-');
        let year = parts.next().and_then(|p| p.parse::<i32>().ok()).ok_or_else(bad)?;
        let month = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(bad)?;
        let day = parts.next().and_then(|p| p.parse::<u32>().ok()).ok_or_else(bad)?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(bad());
        }
        let date = Self { year, month, day };
        // Rejects e.g. 2026-02-30, which would normalize to another day.
        if Self::from_days(date.to_days()) != date {
            return Err(bad());
        }
        Ok(date)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
