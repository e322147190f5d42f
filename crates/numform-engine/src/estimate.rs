//! Guardrail estimator and admission checks.
//!
//! Estimates are closed-form upper bounds on a generator's output size,
//! computed in checked integer arithmetic and clamped: anything above the
//! ceiling (or anything that overflows) comes back as
//! `max_groups_estimate + 1`, so the caller only ever compares against the
//! ceiling.

use numform_core::enums::Mode;
use numform_core::guardrails::Guardrails;

use crate::types::{RejectReason, Rejection};

/// `C(n, k)`, or 0 when `k > n`.
pub fn combination_estimate(n: usize, k: usize, guardrails: &Guardrails) -> u64 {
    if k > n {
        return 0;
    }
    let n = n as u128;
    let k = k as u128;
    let max = u128::from(guardrails.max_groups_estimate);
    // After step i the accumulator holds C(n - k + i, i), which never
    // decreases, so the loop can stop as soon as it passes the ceiling.
    let mut acc: u128 = 1;
    for i in 1..=k {
        acc = match acc.checked_mul(n - k + i) {
            Some(v) => v / i,
            None => return guardrails.over_budget(),
        };
        if acc > max {
            return guardrails.over_budget();
        }
    }
    clamp(Some(acc), guardrails)
}

/// Falling factorial `n * (n - 1) * .. * (n - k + 1)`, or 0 when `k > n`.
pub fn permutation_estimate(n: usize, k: usize, guardrails: &Guardrails) -> u64 {
    if k > n {
        return 0;
    }
    let max = u128::from(guardrails.max_groups_estimate);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = match acc.checked_mul((n - i) as u128) {
            Some(v) => v,
            None => return guardrails.over_budget(),
        };
        if acc > max {
            return guardrails.over_budget();
        }
    }
    clamp(Some(acc), guardrails)
}

/// `n^k`. Used for both modes when repeats are allowed; it bounds the
/// multiset count `C(n + k - 1, k)` from above.
pub fn with_repeats_estimate(n: usize, k: usize, guardrails: &Guardrails) -> u64 {
    let value = u32::try_from(k)
        .ok()
        .and_then(|k| (n as u128).checked_pow(k));
    clamp(value, guardrails)
}

/// Estimate for a generator of the given mode and repeat policy.
pub fn estimate_groups(
    n: usize,
    k: usize,
    mode: Mode,
    allow_repeats: bool,
    guardrails: &Guardrails,
) -> u64 {
    match (mode, allow_repeats) {
        (_, true) => with_repeats_estimate(n, k, guardrails),
        (Mode::Combination, false) => combination_estimate(n, k, guardrails),
        (Mode::Permutation, false) => permutation_estimate(n, k, guardrails),
    }
}

/// Run the three admission checks in order: pool size, group size, then
/// estimated cardinality. The first failure wins.
pub fn check(
    n: usize,
    k: usize,
    estimated_groups: u64,
    guardrails: &Guardrails,
) -> Result<(), Rejection> {
    if n > guardrails.max_n {
        return Err(Rejection::new(RejectReason::InputTooLarge {
            size: n,
            max: guardrails.max_n,
        }));
    }
    if k > guardrails.max_k {
        return Err(Rejection::new(RejectReason::GroupSizeTooLarge {
            size: k,
            max: guardrails.max_k,
        }));
    }
    if estimated_groups > guardrails.max_groups_estimate {
        return Err(Rejection::new(RejectReason::TooManyGroups {
            max: guardrails.max_groups_estimate,
        })
        .with_estimate(estimated_groups));
    }
    Ok(())
}

fn clamp(value: Option<u128>, guardrails: &Guardrails) -> u64 {
    match value {
        Some(v) if v <= u128::from(guardrails.max_groups_estimate) => v as u64,
        _ => guardrails.over_budget(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: Guardrails = Guardrails::new(usize::MAX, usize::MAX, u64::MAX - 1);

    fn exact_binomial(n: u128, k: u128) -> u128 {
        if k > n {
            return 0;
        }
        (1..=k).fold(1, |acc, i| acc * (n - k + i) / i)
    }

    #[test]
    fn combination_values() {
        assert_eq!(combination_estimate(10, 3, &WIDE), 120);
        assert_eq!(combination_estimate(5, 0, &WIDE), 1);
        assert_eq!(combination_estimate(5, 5, &WIDE), 1);
    }

    #[test]
    fn permutation_values() {
        assert_eq!(permutation_estimate(10, 3, &WIDE), 720);
        assert_eq!(permutation_estimate(4, 4, &WIDE), 24);
    }

    #[test]
    fn with_repeats_values() {
        assert_eq!(with_repeats_estimate(10, 3, &WIDE), 1000);
        assert_eq!(with_repeats_estimate(0, 2, &WIDE), 0);
        assert_eq!(
            estimate_groups(3, 2, Mode::Combination, true, &WIDE),
            9,
            "combination with repeats uses n^k"
        );
    }

    #[test]
    fn k_above_n_is_zero_not_sentinel() {
        let g = Guardrails::new(10, 10, 500);
        assert_eq!(combination_estimate(3, 4, &g), 0);
        assert_eq!(permutation_estimate(3, 4, &g), 0);
        assert_eq!(combination_estimate(0, 1, &g), 0);
    }

    #[test]
    fn over_ceiling_returns_sentinel() {
        let g = Guardrails::new(10, 10, 500);
        assert_eq!(with_repeats_estimate(10, 3, &g), 501);
        assert_eq!(permutation_estimate(10, 3, &g), 501);
        assert_eq!(combination_estimate(10, 5, &g), 252);
        assert_eq!(combination_estimate(20, 10, &g), 501);
    }

    #[test]
    fn overflow_returns_sentinel() {
        let g = Guardrails::new(usize::MAX, usize::MAX, 1_000_000);
        assert_eq!(with_repeats_estimate(usize::MAX, 64, &g), 1_000_001);
        assert_eq!(permutation_estimate(usize::MAX, 8, &g), 1_000_001);
        assert_eq!(combination_estimate(usize::MAX, 8, &g), 1_000_001);
    }

    #[test]
    fn no_false_negatives_against_true_counts() {
        let g = Guardrails::new(64, 64, 700);
        for n in 0..=14u128 {
            for k in 0..=8u128 {
                let (nu, ku) = (n as usize, k as usize);
                let true_comb = exact_binomial(n, k);
                let true_multi = if n == 0 { 0 } else { exact_binomial(n + k - 1, k) };
                let true_perm: u128 = if k > n { 0 } else { (0..k).map(|i| n - i).product() };
                let max = u128::from(g.max_groups_estimate);
                for (truth, est) in [
                    (true_comb, estimate_groups(nu, ku, Mode::Combination, false, &g)),
                    (true_multi, estimate_groups(nu, ku, Mode::Combination, true, &g)),
                    (true_perm, estimate_groups(nu, ku, Mode::Permutation, false, &g)),
                    (n.pow(k as u32), estimate_groups(nu, ku, Mode::Permutation, true, &g)),
                ] {
                    if truth > max {
                        assert!(u128::from(est) > max, "n={n} k={k} truth={truth} est={est}");
                    } else {
                        assert!(u128::from(est) >= truth, "n={n} k={k} truth={truth} est={est}");
                    }
                }
            }
        }
    }

    #[test]
    fn monotone_in_n() {
        let g = Guardrails::new(64, 64, 5000);
        for mode in [Mode::Combination, Mode::Permutation] {
            for repeats in [false, true] {
                for k in 1..=6 {
                    let mut prev = 0;
                    for n in 0..=12 {
                        let est = estimate_groups(n, k, mode, repeats, &g);
                        assert!(est >= prev, "{mode} repeats={repeats} n={n} k={k}");
                        prev = est;
                    }
                }
            }
        }
    }

    #[test]
    fn monotone_in_k_for_ordered_and_repeating_modes() {
        let g = Guardrails::new(64, 64, 5000);
        for n in 1..=10 {
            let mut prev_perm = 0;
            let mut prev_rep = 0;
            for k in 1..=n {
                let perm = estimate_groups(n, k, Mode::Permutation, false, &g);
                let rep = estimate_groups(n, k, Mode::Combination, true, &g);
                assert!(perm >= prev_perm, "P n={n} k={k}");
                assert!(rep >= prev_rep, "R n={n} k={k}");
                prev_perm = perm;
                prev_rep = rep;
            }
        }
    }

    #[test]
    fn check_order_pool_then_group_then_estimate() {
        let g = Guardrails::new(10, 3, 500);
        let err = check(11, 4, 10_000, &g).unwrap_err();
        assert_eq!(err.reason, RejectReason::InputTooLarge { size: 11, max: 10 });
        assert_eq!(err.reason.to_string(), "Input too large");

        let err = check(10, 4, 10_000, &g).unwrap_err();
        assert_eq!(err.reason.to_string(), "Group size too large");
        assert_eq!(err.estimate, None);

        let err = check(10, 3, 501, &g).unwrap_err();
        assert_eq!(err.reason, RejectReason::TooManyGroups { max: 500 });
        assert_eq!(err.estimate, Some(501));

        assert!(check(10, 3, 500, &g).is_ok());
    }

    #[test]
    fn ten_digits_triples_with_repeats_blocked() {
        let g = Guardrails::new(10, 3, 500);
        let est = estimate_groups(10, 3, Mode::Permutation, true, &g);
        assert!(est > 500);
        assert!(check(10, 3, est, &g).is_err());
    }
}
