/// G-test statistic between observed and theoretical isotope intensities.
///
/// `observed` is normalised to sum to one before comparison;
/// `theoretical` is expected to already be. Lower is better and an exact
/// match scores zero.
///
/// ```
/// use gagfinder::scoring::g_score;
///
/// let theo = [0.7, 0.3];
/// assert!(g_score(&[70.0, 30.0], &theo).abs() < 1e-12);
/// assert!(g_score(&[50.0, 50.0], &theo) > 0.0);
/// ```
pub fn g_score(observed: &[f64], theoretical: &[f64]) -> f64 {
    debug_assert_eq!(observed.len(), theoretical.len());
    let total: f64 = observed.iter().sum();
    2.0 * observed
        .iter()
        .zip(theoretical.iter())
        .map(|(&o, &t)| {
            let e = o / total;
            if e > 0.0 { e * (e / t).ln() } else { 0.0 }
        })
        .sum::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_intensity_raises_score() {
        let theo = [0.6, 0.3, 0.1];
        let exact = g_score(&[6.0, 3.0, 1.0], &theo);
        let floored = g_score(&[6.0, 3.0, 1e-100], &theo);
        assert!(exact.abs() < 1e-12);
        assert!(floored > exact);
    }

    #[test]
    fn test_scale_invariant() {
        let theo = [0.5, 0.35, 0.15];
        let a = g_score(&[10.0, 8.0, 2.0], &theo);
        let b = g_score(&[1000.0, 800.0, 200.0], &theo);
        assert!((a - b).abs() < 1e-12);
    }
}
