//! Mean, dispersion and z-score.

use crate::error::EngineError;

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> Result<f64, EngineError> {
    if xs.is_empty() {
        return Err(EngineError::InsufficientData(
            "mean of an empty sequence".to_string(),
        ));
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(xs: &[f64]) -> Result<f64, EngineError> {
    let m = mean(xs)?;
    let variance = xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64;
    Ok(variance.sqrt())
}

/// Distance of `x` from the mean of `xs`, in standard deviations.
///
/// A sequence with no dispersion has no meaningful z-score and is rejected.
pub fn z_score(x: f64, xs: &[f64]) -> Result<f64, EngineError> {
    let m = mean(xs)?;
    let sd = std_dev(xs)?;
    if sd <= f64::EPSILON * m.abs().max(1.0) {
        return Err(EngineError::InsufficientData(
            "zero variance in closes".to_string(),
        ));
    }
    Ok((x - m) / sd)
}
