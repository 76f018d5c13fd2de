//! Error types for configuration loading and the text tools.
//!
//! The particle field itself has no failure modes: bad colours fall back to
//! the default accent and a missing window leaves the component inert.  What
//! can fail is reading the tuning file and running a tool on user input.
//!
//! ## Usage
//!
//! ```rust
//! use clickoz::error::{ClickozError, ClickozResult};
//!
//! fn require_text(input: &str) -> ClickozResult<&str> {
//!     if input.trim().is_empty() {
//!         return Err(ClickozError::EmptyInput { tool: "example" });
//!     }
//!     Ok(input)
//! }
//! # assert!(require_text("  ").is_err());
//! ```

use thiserror::Error;

/// Top-level error enum for the crate.
#[derive(Debug, Error, PartialEq)]
pub enum ClickozError {
    /// The tuning file exists but is not valid TOML for [`crate::config::FieldConfig`].
    #[error("failed to parse {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Tuning value is outside its safe operating range.
    #[error("constant '{name}' = {value} is outside safe range {safe_range}")]
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// A tool was run on empty (or whitespace-only) input.
    #[error("{tool}: input is empty")]
    EmptyInput { tool: &'static str },

    /// JSON failed to parse; position is 1-based.
    #[error("invalid JSON near line {line}, col {column}: {message}")]
    InvalidJson {
        line: usize,
        column: usize,
        message: String,
    },

    /// Base64 input could not be decoded.
    #[error("invalid Base64: {0}")]
    InvalidBase64(String),

    /// A link could not be turned into an absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Convenience alias: a `Result` using `ClickozError` as the error type.
pub type ClickozResult<T> = Result<T, ClickozError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Rejects values outside `[0, 1]`.
pub fn validate_unit_interval(name: &'static str, value: f32) -> ClickozResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ClickozError::UnsafeConstant {
            name,
            value: value as f64,
            safe_range: "[0.0, 1.0]",
        })
    }
}

pub fn validate_probability(name: &'static str, value: f64) -> ClickozResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ClickozError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 1.0]",
        })
    }
}

pub fn validate_positive(name: &'static str, value: f32) -> ClickozResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ClickozError::UnsafeConstant {
            name,
            value: value as f64,
            safe_range: "(0.0, ∞)",
        })
    }
}

pub fn validate_non_negative(name: &'static str, value: f32) -> ClickozResult<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ClickozError::UnsafeConstant {
            name,
            value: value as f64,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// A `min..max` sampling range must be non-negative and non-empty.
pub fn validate_range(name: &'static str, min: f32, max: f32) -> ClickozResult<()> {
    if min >= 0.0 && max > min {
        Ok(())
    } else {
        Err(ClickozError::UnsafeConstant {
            name,
            value: min as f64,
            safe_range: "0 ≤ min < max",
        })
    }
}

pub fn validate_lifetime(name: &'static str, min: u32, max: u32) -> ClickozResult<()> {
    if min >= 1 && max > min {
        Ok(())
    } else {
        Err(ClickozError::UnsafeConstant {
            name,
            value: min as f64,
            safe_range: "1 ≤ min < max",
        })
    }
}

/// Device pixel ratio caps below 1 would shrink the surface below CSS size.
pub fn validate_device_pixel_ratio(value: f32) -> ClickozResult<()> {
    if (1.0..=4.0).contains(&value) {
        Ok(())
    } else {
        Err(ClickozError::UnsafeConstant {
            name: "max_device_pixel_ratio",
            value: value as f64,
            safe_range: "[1.0, 4.0]",
        })
    }
}

/// Swirl above 0.01 turns the gentle orbit into a visible spiral collapse.
pub fn validate_swirl(value: f32) -> ClickozResult<()> {
    if (0.0..=0.01).contains(&value) {
        Ok(())
    } else {
        Err(ClickozError::UnsafeConstant {
            name: "swirl",
            value: value as f64,
            safe_range: "[0.0, 0.01]",
        })
    }
}
