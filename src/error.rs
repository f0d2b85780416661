use thiserror::Error;

/// Top-level error type for the trajectory engine.
#[derive(Debug, Error)]
pub enum TrajectraError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors caused by caller-supplied values.
///
/// A call that fails with one of these leaves its target untouched.
#[derive(Debug, Error, PartialEq)]
pub enum ArgumentError {
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("positive X ({x}) and positive Y ({y}) must lie on different axes")]
    AxisConflict { x: &'static str, y: &'static str },
}

/// Errors related to geometric computations.
///
/// The sampler treats these as "skip this segment"; they never escape a
/// sampling call.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Convenience type alias for results using [`TrajectraError`].
pub type Result<T> = std::result::Result<T, TrajectraError>;

/// Returns `value` unchanged if it is finite.
///
/// # Errors
///
/// Returns [`ArgumentError::NonFinite`] for `NaN` and infinities.
pub fn ensure_finite(name: &'static str, value: f64) -> std::result::Result<f64, ArgumentError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArgumentError::NonFinite { name, value })
    }
}

/// Returns `value` unchanged if it is finite and strictly positive.
///
/// # Errors
///
/// Returns [`ArgumentError::NonFinite`] or [`ArgumentError::NonPositive`].
pub fn ensure_positive(name: &'static str, value: f64) -> std::result::Result<f64, ArgumentError> {
    let value = ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ArgumentError::NonPositive { name, value })
    }
}
