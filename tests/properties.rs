//! Property tests for the numerical stages

use proptest::prelude::*;
use stratum_pcm::preprocessing::quantize::{quantize, QuantizePolicy};
use stratum_pcm::preprocessing::resample::{resample, resampled_len};
use stratum_pcm::preprocessing::trim::trim;
use stratum_pcm::Waveform;

const RATES: [u32; 6] = [8000, 11025, 16000, 22050, 44100, 48000];

fn waveform_strategy() -> impl Strategy<Value = Waveform> {
    (
        prop::sample::select(RATES.to_vec()),
        prop::collection::vec(-4.0f64..4.0, 2..400),
    )
        .prop_map(|(rate, samples)| Waveform::new(rate, samples))
}

proptest! {
    #[test]
    fn resample_to_same_rate_is_identity(w in waveform_strategy()) {
        let out = resample(w.clone(), w.sample_rate).unwrap();
        prop_assert_eq!(out, w);
    }

    #[test]
    fn resample_length_follows_ratio(
        w in waveform_strategy(),
        target in prop::sample::select(RATES.to_vec()),
    ) {
        let expected = resampled_len(w.len(), w.sample_rate, target);
        let expected_direct =
            (w.len() as f64 * (target as f64 / w.sample_rate as f64)).round_ties_even() as usize;
        let out = resample(w, target).unwrap();
        prop_assert_eq!(out.len(), expected);
        prop_assert_eq!(out.len(), expected_direct);
        prop_assert_eq!(out.sample_rate, target);
    }

    #[test]
    fn resample_stays_within_input_bounds(
        w in waveform_strategy(),
        target in prop::sample::select(RATES.to_vec()),
    ) {
        let lo = w.samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = w.samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let first = w.samples[0];
        let out = resample(w, target).unwrap();
        for &s in &out.samples {
            prop_assert!(s >= lo - 1e-12 && s <= hi + 1e-12);
        }
        if !out.is_empty() {
            prop_assert_eq!(out.samples[0], first);
        }
    }

    #[test]
    fn quantize_output_within_declared_range(
        samples in prop::collection::vec(-10.0f64..10.0, 1..200),
        bit_depth in 1u32..=32,
        minmax in any::<bool>(),
    ) {
        let policy = if minmax { QuantizePolicy::MinMax } else { QuantizePolicy::Symmetric };
        let q = quantize(&samples, bit_depth, policy).unwrap();
        let (lo, hi) = policy.range(bit_depth);
        prop_assert_eq!(q.values.len(), samples.len());
        for &v in &q.values {
            prop_assert!(v >= lo && v <= hi, "{} outside [{}, {}]", v, lo, hi);
        }
    }

    #[test]
    fn minmax_constant_input_maps_to_midpoint(
        value in -5.0f64..5.0,
        len in 1usize..64,
        bit_depth in 1u32..=32,
    ) {
        let q = quantize(&vec![value; len], bit_depth, QuantizePolicy::MinMax).unwrap();
        let mid = (((1u64 << bit_depth) - 1) as f64 / 2.0).round_ties_even() as i64;
        prop_assert!(q.values.iter().all(|&v| v == mid));
    }

    #[test]
    fn trim_with_enough_time_is_noop(w in waveform_strategy(), extra in 1e-6f64..10.0) {
        let secs = w.len() as f64 / w.sample_rate as f64 + extra;
        prop_assert_eq!(trim(w.clone(), secs), w);
    }

    #[test]
    fn trim_non_positive_empties(w in waveform_strategy(), secs in -10.0f64..=0.0) {
        let out = trim(w, secs);
        prop_assert!(out.is_empty());
    }
}
