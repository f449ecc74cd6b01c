use rand::Rng;
use thiserror::Error;

/// Upper bound for generated values and for a requested count.
pub const MAX_RANDOM_VALUE: i32 = 1_000;

/// Values at or below this are "small": the UI lets them be clicked to
/// regenerate the sequence using the value as the new count.
pub const SMALL_VALUE_THRESHOLD: i32 = 30;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GenerateError {
    #[error("count must be between 1 and {max}, got {count}")]
    InvalidCount { count: usize, max: usize },
    #[error("threshold must be between 1 and {max_value}, got {threshold}")]
    InvalidThreshold { threshold: i32, max_value: i32 },
}

/// Draws `count` uniform values in `[1, max_value]` and guarantees at least
/// one of them ends up `<= threshold`.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    max_value: i32,
    threshold: i32,
) -> Result<Vec<i32>, GenerateError> {
    let max_count = MAX_RANDOM_VALUE as usize;
    if count == 0 || count > max_count {
        return Err(GenerateError::InvalidCount {
            count,
            max: max_count,
        });
    }
    if threshold < 1 || max_value < 1 || threshold > max_value {
        return Err(GenerateError::InvalidThreshold {
            threshold,
            max_value,
        });
    }

    let mut values: Vec<i32> = (0..count).map(|_| rng.random_range(1..=max_value)).collect();
    ensure_small_value(rng, &mut values, threshold);
    Ok(values)
}

/// If no value is `<= threshold`, overwrites one uniformly chosen position
/// with a fresh uniform value in `[1, threshold]`. Leaves the sequence
/// untouched otherwise.
pub fn ensure_small_value<R: Rng + ?Sized>(rng: &mut R, values: &mut [i32], threshold: i32) {
    if values.is_empty() || values.iter().any(|&v| v <= threshold) {
        return;
    }
    let slot = rng.random_range(0..values.len());
    values[slot] = rng.random_range(1..=threshold);
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn rejects_out_of_range_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        for count in [0_usize, 1_001, usize::MAX] {
            let err = generate(&mut rng, count, MAX_RANDOM_VALUE, SMALL_VALUE_THRESHOLD)
                .expect_err("count should be rejected");
            assert_eq!(err, GenerateError::InvalidCount { count, max: 1_000 });
        }
    }

    #[test]
    fn rejects_bad_thresholds() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(matches!(
            generate(&mut rng, 10, 1_000, 0),
            Err(GenerateError::InvalidThreshold { .. })
        ));
        assert!(matches!(
            generate(&mut rng, 10, 100, 101),
            Err(GenerateError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn generated_sequences_hold_the_contract() {
        for seed in 0..200_u64 {
            let mut rng = StdRng::seed_from_u64(0x6E6_2026 + seed);
            let count = (seed as usize % 1_000) + 1;
            let values = generate(&mut rng, count, MAX_RANDOM_VALUE, SMALL_VALUE_THRESHOLD)
                .expect("valid arguments");

            assert_eq!(values.len(), count, "seed={seed}");
            assert!(
                values.iter().all(|&v| (1..=MAX_RANDOM_VALUE).contains(&v)),
                "seed={seed}"
            );
            assert!(
                values.iter().any(|&v| v <= SMALL_VALUE_THRESHOLD),
                "seed={seed}"
            );
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = StdRng::seed_from_u64(0xDEAD_2026);
        let mut b = StdRng::seed_from_u64(0xDEAD_2026);
        let first = generate(&mut a, 250, 1_000, 30).expect("valid arguments");
        let second = generate(&mut b, 250, 1_000, 30).expect("valid arguments");
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_seeds_diverge() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(12);
        let first = generate(&mut a, 250, 1_000, 30).expect("valid arguments");
        let second = generate(&mut b, 250, 1_000, 30).expect("valid arguments");
        assert_ne!(first, second);
    }

    #[test]
    fn ensure_small_value_patches_exactly_one_slot() {
        let mut rng = StdRng::seed_from_u64(0xF17_2026);
        let mut values = vec![500, 900, 31, 777];
        let before = values.clone();

        ensure_small_value(&mut rng, &mut values, 30);

        let changed: Vec<usize> = (0..values.len()).filter(|&i| values[i] != before[i]).collect();
        assert_eq!(changed.len(), 1);
        assert!((1..=30).contains(&values[changed[0]]));
    }

    #[test]
    fn ensure_small_value_is_a_no_op_when_satisfied() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut values = vec![500, 30, 900];
        let before = values.clone();
        ensure_small_value(&mut rng, &mut values, 30);
        assert_eq!(values, before);

        let mut empty: Vec<i32> = Vec::new();
        ensure_small_value(&mut rng, &mut empty, 30);
        assert!(empty.is_empty());
    }
}
