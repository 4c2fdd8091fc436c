//! The Smart Rate calculator.

use helix_pattern::{golden_ratio_constant, VortexPattern};
use tracing::trace;

use crate::error::Result;
use crate::metrics::BlockMetrics;

/// Base fractal energy per block.
pub const BASE_ENERGY: f64 = 369.0;

/// Sierpinski triangle dimension, log2(3) truncated.
pub const SIERPINSKI_DIMENSION: f64 = 1.585;

/// Target seconds between blocks.
pub const TARGET_BLOCK_TIME: f64 = 5.0;

/// Smart rate of a candidate whose normalised metrics are all 1.0.
pub const BASE_SMART_RATE: f64 = 1000.0;

const VER_SCALE: f64 = 5000.0;
const SCORE_SCALE: f64 = 100.0;

const VER_WEIGHT: f64 = 0.35;
const FCS_WEIGHT: f64 = 0.25;
const MEI_WEIGHT: f64 = 0.25;
const NHF_WEIGHT: f64 = 0.15;

/// Full breakdown of one score. Raw and normalised sub-metrics are both kept
/// so the block record can embed whichever it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmartRateResult {
    pub ver: f64,
    pub fcs: f64,
    pub mei: f64,
    pub nhf: f64,
    pub ver_normalized: f64,
    pub fcs_normalized: f64,
    pub mei_normalized: f64,
    pub nhf_normalized: f64,
    pub weighted_mean: f64,
    pub pattern_multiplier: f64,
    pub smart_rate: f64,
}

/// Stateless scorer over a pair of immutable height patterns.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartRateCalculator {
    energy: VortexPattern<f64>,
    multiplier: VortexPattern<f64>,
}

impl Default for SmartRateCalculator {
    fn default() -> Self {
        Self::standard()
    }
}

impl SmartRateCalculator {
    /// Calculator using the network patterns.
    pub fn standard() -> Self {
        Self {
            energy: VortexPattern::energy(),
            multiplier: VortexPattern::multiplier(),
        }
    }

    /// Calculator with custom patterns. Both must be non-empty.
    pub fn with_patterns(energy: Vec<f64>, multiplier: Vec<f64>) -> Result<Self> {
        Ok(Self {
            energy: VortexPattern::new(energy)?,
            multiplier: VortexPattern::new(multiplier)?,
        })
    }

    /// Score a candidate.
    ///
    /// Fails with `InvalidMetrics` for zero height, zero active nodes, or a
    /// current time not after genesis.
    pub fn compute(&self, metrics: &BlockMetrics) -> Result<SmartRateResult> {
        metrics.validate()?;

        let height = metrics.height as f64;
        let tx_count = metrics.tx_count as f64;
        let active_nodes = metrics.active_nodes as f64;

        let network_activity = (tx_count / height).min(10.0);
        let ver = BASE_ENERGY * self.energy.value_at(metrics.height) * (1.0 + network_activity * 0.1);

        let fcs = (height.log2() * SIERPINSKI_DIMENSION + tx_count.sqrt() * 0.1).min(SCORE_SCALE);

        let avg_block_time = metrics.elapsed() as f64 / height;
        let mei = (TARGET_BLOCK_TIME / avg_block_time).min(2.0) * 50.0;

        let node_harmony = active_nodes.log2() * golden_ratio_constant();
        let consistency = (height / active_nodes).min(10.0) * 0.1;
        let nhf = ((node_harmony + consistency) * 10.0).min(SCORE_SCALE);

        // Clamp before exponentiation so every base is in [0, 1].
        let ver_normalized = normalize(ver, VER_SCALE);
        let fcs_normalized = normalize(fcs, SCORE_SCALE);
        let mei_normalized = normalize(mei, SCORE_SCALE);
        let nhf_normalized = normalize(nhf, SCORE_SCALE);

        let weighted_mean = ver_normalized.powf(VER_WEIGHT)
            * fcs_normalized.powf(FCS_WEIGHT)
            * mei_normalized.powf(MEI_WEIGHT)
            * nhf_normalized.powf(NHF_WEIGHT);

        let pattern_multiplier = self.multiplier.value_at(metrics.height);
        let smart_rate = BASE_SMART_RATE * weighted_mean * pattern_multiplier;

        trace!(height = metrics.height, ver, fcs, mei, nhf, smart_rate, "smart rate computed");

        Ok(SmartRateResult {
            ver,
            fcs,
            mei,
            nhf,
            ver_normalized,
            fcs_normalized,
            mei_normalized,
            nhf_normalized,
            weighted_mean,
            pattern_multiplier,
            smart_rate,
        })
    }
}

#[inline]
fn normalize(value: f64, scale: f64) -> f64 {
    (value / scale).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use proptest::prelude::*;

    const GENESIS: u64 = 1_640_995_200;

    fn calc() -> SmartRateCalculator {
        SmartRateCalculator::standard()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn first_block_single_node() {
        let r = calc()
            .compute(&BlockMetrics::new(1, 0, 1, GENESIS + 5, GENESIS))
            .unwrap();

        // height 1 selects the second energy weight (2.0)
        assert_eq!(r.ver, 738.0);
        assert_eq!(r.fcs, 0.0);
        assert_eq!(r.mei, 50.0);
        assert_eq!(r.nhf, 1.0);
        assert_eq!(r.fcs_normalized, 0.0);
        assert_eq!(r.mei_normalized, 0.5);
        assert_eq!(r.nhf_normalized, 0.01);
        assert_eq!(r.pattern_multiplier, 1.2);
        // fcs = 0 zeroes the geometric mean
        assert_eq!(r.weighted_mean, 0.0);
        assert_eq!(r.smart_rate, 0.0);
    }

    #[test]
    fn mid_chain_components() {
        let r = calc()
            .compute(&BlockMetrics::new(100, 250, 8, GENESIS + 500, GENESIS))
            .unwrap();

        // 100 mod 6 = 4 -> energy 7.0, multiplier 1.7
        assert!(close(r.ver, 369.0 * 7.0 * 1.25));
        assert!(close(r.fcs, 100f64.log2() * 1.585 + 250f64.sqrt() * 0.1));
        assert!(close(r.mei, 50.0));
        assert!(close(r.nhf, (3.0 * 1.618033988749 + 1.0) * 10.0));
        assert_eq!(r.pattern_multiplier, 1.7);

        let expected_mean = (r.ver / 5000.0).powf(0.35)
            * (r.fcs / 100.0).powf(0.25)
            * (r.mei / 100.0).powf(0.25)
            * (r.nhf / 100.0).powf(0.15);
        assert_eq!(r.weighted_mean, expected_mean);
        assert_eq!(r.smart_rate, 1000.0 * expected_mean * 1.7);
        assert!(r.smart_rate > 0.0);
    }

    #[test]
    fn fast_blocks_cap_efficiency() {
        // 1 second per block: 5/1 capped at 2 -> 100
        let r = calc()
            .compute(&BlockMetrics::new(10, 0, 2, GENESIS + 10, GENESIS))
            .unwrap();
        assert_eq!(r.mei, 100.0);
        assert_eq!(r.mei_normalized, 1.0);
    }

    #[test]
    fn large_network_saturates() {
        let r = calc()
            .compute(&BlockMetrics::new(1 << 40, u64::MAX, 1 << 30, GENESIS + (1 << 42), GENESIS))
            .unwrap();
        assert_eq!(r.fcs, 100.0);
        assert_eq!(r.nhf, 100.0);
        assert_eq!(r.fcs_normalized, 1.0);
        assert_eq!(r.nhf_normalized, 1.0);
    }

    #[test]
    fn domain_violations() {
        for metrics in [
            BlockMetrics::new(0, 0, 1, GENESIS + 5, GENESIS),
            BlockMetrics::new(1, 0, 0, GENESIS + 5, GENESIS),
            BlockMetrics::new(1, 0, 1, GENESIS, GENESIS),
        ] {
            assert!(matches!(
                calc().compute(&metrics),
                Err(Error::InvalidMetrics { .. })
            ));
        }
    }

    #[test]
    fn empty_custom_pattern_is_configuration_error() {
        assert_eq!(
            SmartRateCalculator::with_patterns(vec![], vec![1.0]),
            Err(Error::Pattern(helix_pattern::Error::Configuration))
        );
    }

    #[test]
    fn custom_patterns_are_used() {
        let flat = SmartRateCalculator::with_patterns(vec![1.0], vec![1.0]).unwrap();
        let r = flat
            .compute(&BlockMetrics::new(100, 250, 8, GENESIS + 500, GENESIS))
            .unwrap();
        assert!(close(r.ver, 369.0 * 1.25));
        assert_eq!(r.pattern_multiplier, 1.0);
    }

    fn valid_metrics() -> impl Strategy<Value = BlockMetrics> {
        (1u64..=u32::MAX as u64, any::<u64>(), 1u64..=u32::MAX as u64, 1u64..=u32::MAX as u64, 0u64..GENESIS)
            .prop_map(|(height, tx, nodes, elapsed, genesis)| {
                BlockMetrics::new(height, tx, nodes, genesis + elapsed, genesis)
            })
    }

    proptest! {
        #[test]
        fn normalized_metrics_stay_in_unit_interval(metrics in valid_metrics()) {
            let r = calc().compute(&metrics).unwrap();
            for n in [r.ver_normalized, r.fcs_normalized, r.mei_normalized, r.nhf_normalized] {
                prop_assert!((0.0..=1.0).contains(&n), "{n} out of range for {metrics:?}");
            }
            prop_assert!((0.0..=1.0).contains(&r.weighted_mean));
            prop_assert!(r.smart_rate >= 0.0 && r.smart_rate <= 1800.0);
        }

        #[test]
        fn bit_identical_on_repeat(metrics in valid_metrics()) {
            let a = calc().compute(&metrics).unwrap();
            let b = calc().compute(&metrics).unwrap();
            prop_assert_eq!(a.smart_rate.to_bits(), b.smart_rate.to_bits());
            prop_assert_eq!(a.weighted_mean.to_bits(), b.weighted_mean.to_bits());
        }
    }
}
