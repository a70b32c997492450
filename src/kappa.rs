//! Cohen's Kappa from overlap counters.

use crate::errors::{AgreementError, AgreementResult};
use crate::overlap::ComparisonMode;

/// Compute Cohen's Kappa for two annotators over a universe of `n` units.
///
/// `overlap1`/`total1` and `overlap2`/`total2` are the matched and total
/// counts of the first and second annotator. Each annotator's disagreement
/// is its unmatched units; agreement is whatever remains of the universe.
///
/// Returns `0.0` for an empty universe and when chance agreement is 1. A
/// counter whose match exceeds its total, unequal match counts outside
/// binary mode, or a chance agreement above 1 are reported as
/// [`AgreementError::InvariantViolation`].
pub fn kappa(
    overlap1: usize,
    total1: usize,
    overlap2: usize,
    total2: usize,
    n: usize,
    mode: ComparisonMode,
) -> AgreementResult<f64> {
    if n == 0 {
        return Ok(0.0);
    }
    if overlap1 > total1 {
        return Err(AgreementError::invariant(format!(
            "the number of matched units of the first annotator ({}) exceeds its total ({})",
            overlap1, total1
        )));
    }
    if overlap2 > total2 {
        return Err(AgreementError::invariant(format!(
            "the number of matched units of the second annotator ({}) exceeds its total ({})",
            overlap2, total2
        )));
    }
    if overlap1 != overlap2 && !mode.allows_unequal_matches() {
        return Err(AgreementError::invariant(format!(
            "different numbers of matched units for two annotators ({} vs. {}) in {} mode",
            overlap1, overlap2, mode
        )));
    }

    let n = n as f64;
    let disagreement = (total1 - overlap1) as f64 + (total2 - overlap2) as f64;
    let agreement = (n - disagreement) / n;

    // probability that each annotator marks a unit at random
    let chance1 = total1 as f64 / n;
    let chance2 = total2 as f64 / n;
    let chance = chance1 * chance2 + (1.0 - chance1) * (1.0 - chance2);
    if chance > 1.0 {
        return Err(AgreementError::invariant(format!(
            "invalid value of chance agreement: {:.2}",
            chance
        )));
    }

    let kappa = if chance < 1.0 {
        (agreement - chance) / (1.0 - chance)
    } else {
        0.0
    };
    if kappa > 1.0 + f64::EPSILON {
        return Err(AgreementError::invariant(format!(
            "invalid kappa value: {:.4}",
            kappa
        )));
    }
    Ok(kappa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComparisonMode::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    #[test]
    fn test_empty_universe_is_zero() {
        assert_eq!(kappa(0, 0, 0, 0, 0, Binary), Ok(0.0));
        assert_eq!(kappa(3, 5, 1, 4, 0, Binary), Ok(0.0));
        assert_eq!(kappa(9, 1, 2, 1, 0, Exact), Ok(0.0));
    }

    #[test]
    fn test_no_annotations_is_zero() {
        for n in [1, 10, 1000] {
            assert_eq!(kappa(0, 0, 0, 0, n, Proportional), Ok(0.0));
        }
    }

    #[test]
    fn test_perfect_agreement() {
        assert_eq!(kappa(4, 4, 4, 4, 20, Exact), Ok(1.0));
        assert_eq!(kappa(3, 3, 3, 3, 10, Binary), Ok(1.0));
    }

    #[test]
    fn test_partial_agreement() {
        // 10 tokens; {1,2,3} vs. {2,3,4}
        let k = kappa(2, 3, 2, 3, 10, Proportional).unwrap();
        assert!(close(k, 0.22 / 0.42), "{}", k);
    }

    #[test]
    fn test_negative_kappa() {
        let k = kappa(0, 5, 0, 5, 10, Proportional).unwrap();
        assert!(k < 0.0);
        assert!(close(k, -1.0), "{}", k);
    }

    #[test]
    fn test_symmetric_in_annotators() {
        let k1 = kappa(2, 7, 5, 6, 40, Binary).unwrap();
        let k2 = kappa(5, 6, 2, 7, 40, Binary).unwrap();
        assert!(close(k1, k2));
    }

    #[test]
    fn test_overlap_exceeding_total() {
        assert!(matches!(
            kappa(4, 3, 0, 0, 10, Binary),
            Err(AgreementError::InvariantViolation { .. })
        ));
        assert!(matches!(
            kappa(0, 0, 4, 3, 10, Binary),
            Err(AgreementError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_unequal_overlaps_only_in_binary_mode() {
        assert!(kappa(2, 3, 1, 3, 10, Binary).is_ok());
        assert!(matches!(
            kappa(2, 3, 1, 3, 10, Proportional),
            Err(AgreementError::InvariantViolation { .. })
        ));
        assert!(matches!(
            kappa(2, 3, 1, 3, 10, Exact),
            Err(AgreementError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_chance_above_one() {
        // totals larger than the universe push chance agreement past 1
        assert!(matches!(
            kappa(0, 20, 0, 20, 10, Binary),
            Err(AgreementError::InvariantViolation { .. })
        ));
    }
}
