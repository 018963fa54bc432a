#![forbid(unsafe_code)]

//! Drawer configuration.

use std::fmt;

/// Furthest the sheet may be dragged above its resting position.
pub const UPWARD_LIMIT_PX: f64 = -80.0;

/// Downward drag bound used when the host has no viewport.
pub const FALLBACK_DOWNWARD_LIMIT_PX: f64 = 480.0;

/// Release offset that must be exceeded for a drag to dismiss the sheet.
pub const CLOSE_THRESHOLD_PX: f64 = 120.0;

/// Trail label shown at the root level.
pub const ROOT_TRAIL_LABEL: &str = "Top-level navigation";

/// Separator between crumb titles in the trail label.
pub const TRAIL_SEPARATOR: &str = " → ";

/// What a platform-cancelled drag (`pointercancel`) does past the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CancelPolicy {
    /// A cancelled gesture is an abort and always snaps back.
    #[default]
    Abort,
    /// A cancelled gesture closes the sheet like a release would.
    CloseIfPastThreshold,
}

/// Configuration for a [`NestedDrawer`](crate::drawer::NestedDrawer).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DrawerConfig {
    /// Upward drag bound (must be `<= 0`). Default: -80.
    pub upward_limit_px: f64,
    /// Downward drag bound when the viewport height is unknown. Default: 480.
    pub fallback_downward_limit_px: f64,
    /// Release offset that dismisses the sheet (strictly greater). Default: 120.
    pub close_threshold_px: f64,
    /// Cancelled-gesture policy. Default: [`CancelPolicy::Abort`].
    pub cancel_policy: CancelPolicy,
    /// Accessible name of the dialog.
    pub dialog_label: String,
    /// Accessible name of the back button.
    pub back_label: String,
    /// Trail label used at the root level.
    pub root_trail_label: String,
    /// Separator between crumb titles.
    pub trail_separator: String,
    /// Heading shown at the root level.
    pub root_heading: String,
    /// Subheading shown at the root level.
    pub root_subheading: String,
    /// Snap-back/slide transition length hint for hosts. Default: 300.
    pub transition_ms: u32,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            upward_limit_px: UPWARD_LIMIT_PX,
            fallback_downward_limit_px: FALLBACK_DOWNWARD_LIMIT_PX,
            close_threshold_px: CLOSE_THRESHOLD_PX,
            cancel_policy: CancelPolicy::default(),
            dialog_label: "Navigation menu".to_string(),
            back_label: "Go back one level".to_string(),
            root_trail_label: ROOT_TRAIL_LABEL.to_string(),
            trail_separator: TRAIL_SEPARATOR.to_string(),
            root_heading: "Browse our menu".to_string(),
            root_subheading: "Tap an item to dive deeper. Swipe down or hit close to dismiss."
                .to_string(),
            transition_ms: 300,
        }
    }
}

impl DrawerConfig {
    /// Set the close threshold.
    #[must_use]
    pub fn with_close_threshold(mut self, px: f64) -> Self {
        self.close_threshold_px = px;
        self
    }

    /// Set the upward drag bound.
    #[must_use]
    pub fn with_upward_limit(mut self, px: f64) -> Self {
        self.upward_limit_px = px;
        self
    }

    /// Set the fallback downward drag bound.
    #[must_use]
    pub fn with_fallback_downward_limit(mut self, px: f64) -> Self {
        self.fallback_downward_limit_px = px;
        self
    }

    /// Set the cancelled-gesture policy.
    #[must_use]
    pub fn with_cancel_policy(mut self, policy: CancelPolicy) -> Self {
        self.cancel_policy = policy;
        self
    }

    /// Set the dialog's accessible name.
    #[must_use]
    pub fn with_dialog_label(mut self, label: impl Into<String>) -> Self {
        self.dialog_label = label.into();
        self
    }

    /// Set the root trail label and crumb separator.
    #[must_use]
    pub fn with_trail(mut self, root_label: impl Into<String>, separator: impl Into<String>) -> Self {
        self.root_trail_label = root_label.into();
        self.trail_separator = separator.into();
        self
    }

    /// Set the root heading and subheading.
    #[must_use]
    pub fn with_root_heading(
        mut self,
        heading: impl Into<String>,
        subheading: impl Into<String>,
    ) -> Self {
        self.root_heading = heading.into();
        self.root_subheading = subheading.into();
        self
    }

    /// Check the numeric fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.close_threshold_px.is_finite() || self.close_threshold_px <= 0.0 {
            return Err(ConfigError::InvalidCloseThreshold(self.close_threshold_px));
        }
        if !self.upward_limit_px.is_finite() || self.upward_limit_px > 0.0 {
            return Err(ConfigError::InvalidUpwardLimit(self.upward_limit_px));
        }
        if !self.fallback_downward_limit_px.is_finite() || self.fallback_downward_limit_px <= 0.0
        {
            return Err(ConfigError::InvalidFallbackHeight(
                self.fallback_downward_limit_px,
            ));
        }
        Ok(())
    }
}

/// A [`DrawerConfig`] that cannot drive the drawer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Close threshold is not a positive finite number.
    InvalidCloseThreshold(f64),
    /// Upward limit is positive or not finite.
    InvalidUpwardLimit(f64),
    /// Fallback downward limit is not a positive finite number.
    InvalidFallbackHeight(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCloseThreshold(v) => {
                write!(f, "close threshold must be positive and finite, got {v}")
            }
            Self::InvalidUpwardLimit(v) => {
                write!(f, "upward drag limit must be <= 0 and finite, got {v}")
            }
            Self::InvalidFallbackHeight(v) => {
                write!(f, "fallback downward limit must be positive and finite, got {v}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
