/// Laakso-Taagepera effective number of components: `1 / sum(p_i^2)`.
/// An all-zero (or empty) input divides by zero and propagates as
/// `f64::INFINITY`.
pub fn effective_number(proportions: &[f64]) -> f64 {
    1.0 / proportions.iter().map(|p| p * p).sum::<f64>()
}
