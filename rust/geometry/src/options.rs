// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Conversion options

use serde::{Deserialize, Serialize};

/// Default coincidence and trimming tolerance
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Options threaded through every conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Distance under which points are treated as coincident when wires are
    /// chained, faces trimmed and shells sewn
    pub tolerance: f64,
}

impl ConvertOptions {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Load options from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            tolerance: std::env::var("TOPOBRIDGE_TOLERANCE")
                .unwrap_or_else(|_| DEFAULT_TOLERANCE.to_string())
                .parse()
                .ok()
                .filter(|t: &f64| t.is_finite() && *t > 0.0)
                .unwrap_or(DEFAULT_TOLERANCE),
        }
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tolerance() {
        assert_eq!(ConvertOptions::default().tolerance, 1e-4);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let options: ConvertOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ConvertOptions::default());

        let options: ConvertOptions = serde_json::from_str(r#"{"tolerance": 0.01}"#).unwrap();
        assert_eq!(options.tolerance, 0.01);
    }
}
