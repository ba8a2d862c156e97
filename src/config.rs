use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::capture::ResizePolicy;
use crate::capture::surface::SurfaceOpts;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{SigntrackError, SigntrackResult};

/// Kiosk settings, loadable from JSON with environment overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KioskConfig {
    /// Signature surface options.
    pub surface: SurfaceOpts,
    /// Logical height of the signature surface.
    pub surface_height: f64,
    /// Passphrase unlocking associate mode.
    pub associate_passphrase: String,
    /// Minimum customer search length in characters.
    pub min_search_len: usize,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceOpts::default(),
            surface_height: 192.0,
            associate_passphrase: "admin".to_string(),
            min_search_len: 2,
        }
    }
}

impl KioskConfig {
    /// Parse a config from a JSON reader. Missing keys take defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> SigntrackResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SigntrackError::config(format!("parse kiosk config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SigntrackResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SigntrackError::config(format!("open kiosk config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply `SIGNTRACK_*` overrides from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply `SIGNTRACK_*` overrides from `lookup`. Malformed values are ignored.
    pub fn apply_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(width) = lookup("SIGNTRACK_STROKE_WIDTH")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|w| w.is_finite() && *w >= 0.0)
        {
            self.surface.stroke_width = width;
        }
        if let Some(color) = lookup("SIGNTRACK_STROKE_COLOR").and_then(|v| Rgba8::from_hex(&v).ok())
        {
            self.surface.stroke_color = color;
        }
        if let Some(dpr) = lookup("SIGNTRACK_DPR")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d > 0.0)
        {
            self.surface.device_pixel_ratio = dpr;
        }
        if let Some(policy) = lookup("SIGNTRACK_RESIZE_POLICY").and_then(|v| {
            match v.trim().to_ascii_lowercase().as_str() {
                "preserve" => Some(ResizePolicy::Preserve),
                "clear" => Some(ResizePolicy::Clear),
                _ => None,
            }
        }) {
            self.surface.resize_policy = policy;
        }
        if let Some(pass) = lookup("SIGNTRACK_ASSOCIATE_PASSPHRASE").filter(|p| !p.is_empty()) {
            self.associate_passphrase = pass;
        }
        self
    }
}
