//! Property-based tests for the Chudnovsky engine.

use proptest::prelude::*;

use picalc_core::context::PrecisionContext;
use picalc_core::series::SeriesAccumulator;
use picalc_core::term::{direct_term, TermGenerator};
use picalc_core::{compute_pi, pi, ProgressEvent};

fn drain(digits: i64) -> Vec<ProgressEvent> {
    compute_pi(digits)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Fractions never decrease, the last event is the only one with a result.
    #[test]
    fn event_stream_shape(digits in 1i64..400) {
        let events = drain(digits);
        prop_assert!(events.windows(2).all(|w| w[0].fraction() <= w[1].fraction()));
        let (last, rest) = events.split_last().unwrap();
        prop_assert!(last.is_done());
        prop_assert!((last.fraction() - 1.0).abs() < f64::EPSILON);
        prop_assert!(rest.iter().all(|e| e.result().is_none()));
        prop_assert_eq!(last.result().unwrap().len(), digits as usize + 2);
    }

    /// Same digit count, same string.
    #[test]
    fn deterministic(digits in 1i64..200) {
        prop_assert_eq!(pi(digits).unwrap(), pi(digits).unwrap());
    }

    /// A shorter run is a prefix of a longer one.
    #[test]
    fn shorter_result_is_prefix(a in 1i64..300, b in 1i64..300) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        let short_pi = pi(short).unwrap();
        let long_pi = pi(long).unwrap();
        prop_assert!(long_pi.starts_with(&short_pi), "{} vs {}", short_pi, long_pi);
    }

    /// Non-positive digit counts fail before any event.
    #[test]
    fn non_positive_rejected(digits in i64::MIN..=0) {
        prop_assert!(compute_pi(digits).is_err());
    }

    /// The incremental generator reproduces the factorial formula exactly.
    #[test]
    fn incremental_equals_direct(index in 1u32..40, scale in 10u32..600) {
        let incremental = TermGenerator::new().nth(index as usize - 1).unwrap();
        let direct = direct_term(index);
        prop_assert!(incremental.same_value(&direct));
        prop_assert_eq!(incremental.to_term(scale).unwrap(), direct.to_term(scale).unwrap());
    }

    /// The last summed term is below 10^-digits, the one before it is not.
    #[test]
    fn convergence_bound(digits in 1i64..500) {
        let mut acc = SeriesAccumulator::new(PrecisionContext::new(digits).unwrap());
        let mut magnitudes = Vec::new();
        while let Some(step) = acc.step().unwrap() {
            magnitudes.push(step.term.value.abs());
        }
        let threshold = acc.context().convergence_threshold();
        let last = magnitudes.last().unwrap();
        prop_assert!(last < threshold);
        if magnitudes.len() > 1 {
            prop_assert!(&magnitudes[magnitudes.len() - 2] >= threshold);
        }
    }
}
