//! Ranking weights.

/// Relative importance of the three cost dimensions.
///
/// Weights are normalized to sum to 1 on construction, so callers can
/// pass any non-negative magnitudes. An all-zero input stays all-zero
/// rather than dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostWeights {
    pub energy: f64,
    pub usage: f64,
    pub co2: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            energy: 0.4,
            usage: 0.3,
            co2: 0.3,
        }
    }
}

impl CostWeights {
    /// Builds normalized weights from relative magnitudes.
    pub fn new(energy: f64, usage: f64, co2: f64) -> Self {
        let total = energy + usage + co2;
        let denominator = if total == 0.0 { 1.0 } else { total };
        Self {
            energy: energy / denominator,
            usage: usage / denominator,
            co2: co2 / denominator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = CostWeights::default();
        assert!((weights.energy + weights.usage + weights.co2 - 1.0).abs() < 1e-9);
        assert!((weights.energy - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_magnitudes_are_normalized() {
        let weights = CostWeights::new(4.0, 3.0, 3.0);
        assert!((weights.energy - 0.4).abs() < 1e-9);
        assert!((weights.usage - 0.3).abs() < 1e-9);
        assert!((weights.co2 - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_all_zero_weights_stay_zero() {
        let weights = CostWeights::new(0.0, 0.0, 0.0);
        assert_eq!(weights.energy, 0.0);
        assert_eq!(weights.usage, 0.0);
        assert_eq!(weights.co2, 0.0);
    }

    proptest! {
        #[test]
        fn prop_normalization_sums_to_one(
            energy in 0.0f64..1e6,
            usage in 0.0f64..1e6,
            co2 in 0.0f64..1e6,
        ) {
            let weights = CostWeights::new(energy, usage, co2);
            let sum = weights.energy + weights.usage + weights.co2;
            if energy + usage + co2 == 0.0 {
                prop_assert_eq!(sum, 0.0);
            } else {
                prop_assert!((sum - 1.0).abs() < 1e-9);
            }
        }
    }
}
