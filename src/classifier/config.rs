use serde::Serialize;

use crate::constants::{DEFAULT_ABSOLUTE_THRESHOLD, DEFAULT_MARGIN_THRESHOLD};

use super::error::ClassifierError;

/// Tunable knobs of the abstention policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    /// Minimum required gap between the best and second-best score.
    pub margin: f32,
    /// Minimum acceptable best score.
    pub absolute: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN_THRESHOLD,
            absolute: DEFAULT_ABSOLUTE_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new(margin: f32, absolute: f32) -> Result<Self, ClassifierError> {
        let thresholds = Self { margin, absolute };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        validate_margin(self.margin)?;
        validate_absolute(self.absolute)
    }
}

pub(crate) fn validate_margin(value: f32) -> Result<(), ClassifierError> {
    if !value.is_finite() {
        return Err(ClassifierError::InvalidThreshold {
            name: "margin",
            value,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(ClassifierError::InvalidThreshold {
            name: "margin",
            value,
            reason: "must not be negative",
        });
    }
    Ok(())
}

pub(crate) fn validate_absolute(value: f32) -> Result<(), ClassifierError> {
    if !value.is_finite() {
        return Err(ClassifierError::InvalidThreshold {
            name: "absolute",
            value,
            reason: "must be finite",
        });
    }
    Ok(())
}
