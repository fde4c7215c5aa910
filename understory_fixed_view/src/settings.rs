// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Reader settings that affect a fixed-layout view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ViewSettings {
    /// Show facing pages side by side. When `false`, every item opens alone in
    /// the center slot.
    #[cfg_attr(feature = "serde", serde(rename = "isSyntheticSpread"))]
    pub synthetic_spread: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            synthetic_spread: true,
        }
    }
}

impl ViewSettings {
    /// Sets [`synthetic_spread`](Self::synthetic_spread).
    #[must_use]
    pub fn with_synthetic_spread(mut self, synthetic_spread: bool) -> Self {
        self.synthetic_spread = synthetic_spread;
        self
    }
}
