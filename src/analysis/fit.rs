use serde::Serialize;

use crate::dataset::Sample;

/// Straight line `pressure = slope * time + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    /// Pressure change per unit time
    pub slope: f64,
    /// Pressure at time zero
    pub intercept: f64,
}

/// Ordinary least-squares fit of pressure against time.
///
/// Evaluates `slope = (n*Σtp - Σt*Σp) / (n*Σt² - (Σt)²)` in its centred form
/// `Σ(t-t̄)(p-p̄) / Σ(t-t̄)²`, so times far from zero keep their spacing.
/// Sums run in sample order and identical input always gives bit-identical
/// output. Returns `None` for fewer than two samples or when every time is
/// the same.
pub fn least_squares(samples: &[Sample]) -> Option<LinearFit> {
    let first = match samples {
        [first, _, ..] => first,
        _ => return None,
    };
    if samples.iter().all(|s| s.time == first.time) {
        return None;
    }

    let n = samples.len() as f64;
    let mean_t = samples.iter().map(|s| s.time).sum::<f64>() / n;
    let mean_p = samples.iter().map(|s| s.pressure).sum::<f64>() / n;

    let (mut s_tp, mut s_tt) = (0.0f64, 0.0f64);
    for s in samples {
        let dt = s.time - mean_t;
        s_tp += dt * (s.pressure - mean_p);
        s_tt += dt * dt;
    }
    if s_tt == 0.0 || !s_tt.is_finite() {
        return None;
    }

    let slope = s_tp / s_tt;
    let intercept = mean_p - slope * mean_t;
    Some(LinearFit { slope, intercept })
}
