//! The four combinatorial primitives.
//!
//! All take a pool of characters and a group size `k` and return strings of
//! length `k`. The pool is deduplicated (first occurrence wins) before use;
//! repeats only appear when the algorithm itself re-selects a position.
//! Output order follows the pool's scan order and is stable across calls.
//!
//! None of these fail. An empty pool or `k == 0` yields no results, and the
//! no-repeat variants yield nothing when `k` exceeds the pool size.

use numform_core::enums::Mode;

/// Dispatch to the primitive for `mode` × `allow_repeats`.
pub fn generate(pool: &[char], k: usize, mode: Mode, allow_repeats: bool) -> Vec<String> {
    match (mode, allow_repeats) {
        (Mode::Combination, false) => combinations(pool, k),
        (Mode::Combination, true) => combinations_with_repeats(pool, k),
        (Mode::Permutation, false) => permutations(pool, k),
        (Mode::Permutation, true) => permutations_with_repeats(pool, k),
    }
}

/// k-subsets of the pool; `C(n, k)` results.
pub fn combinations(pool: &[char], k: usize) -> Vec<String> {
    let pool = unique(pool);
    let mut out = Vec::new();
    if k == 0 || k > pool.len() {
        return out;
    }
    choose(&pool, k, 0, false, &mut Vec::with_capacity(k), &mut out);
    out
}

/// k-multisets of the pool; `C(n + k - 1, k)` results.
pub fn combinations_with_repeats(pool: &[char], k: usize) -> Vec<String> {
    let pool = unique(pool);
    let mut out = Vec::new();
    if k == 0 || pool.is_empty() {
        return out;
    }
    choose(&pool, k, 0, true, &mut Vec::with_capacity(k), &mut out);
    out
}

/// Ordered k-selections without reuse; `n! / (n - k)!` results.
pub fn permutations(pool: &[char], k: usize) -> Vec<String> {
    let pool = unique(pool);
    let mut out = Vec::new();
    if k == 0 || k > pool.len() {
        return out;
    }
    let mut used = vec![false; pool.len()];
    arrange(&pool, k, Some(&mut used), &mut Vec::with_capacity(k), &mut out);
    out
}

/// Ordered k-selections with reuse; `n^k` results.
pub fn permutations_with_repeats(pool: &[char], k: usize) -> Vec<String> {
    let pool = unique(pool);
    let mut out = Vec::new();
    if k == 0 || pool.is_empty() {
        return out;
    }
    arrange(&pool, k, None, &mut Vec::with_capacity(k), &mut out);
    out
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn unique(pool: &[char]) -> Vec<char> {
    let mut seen = Vec::with_capacity(pool.len());
    for &c in pool {
        if !seen.contains(&c) {
            seen.push(c);
        }
    }
    seen
}

/// Recursive choose. With `reuse` the next position may pick the same index
/// again, which still visits each multiset exactly once because indices
/// never decrease.
fn choose(
    pool: &[char],
    k: usize,
    start: usize,
    reuse: bool,
    current: &mut Vec<char>,
    out: &mut Vec<String>,
) {
    if current.len() == k {
        out.push(current.iter().collect());
        return;
    }
    for i in start..pool.len() {
        current.push(pool[i]);
        let next = if reuse { i } else { i + 1 };
        choose(pool, k, next, reuse, current, out);
        current.pop();
    }
}

/// Recursive arrangement. `used` tracks taken positions when reuse is not
/// allowed; `None` leaves the whole pool available at every position.
fn arrange(
    pool: &[char],
    k: usize,
    mut used: Option<&mut Vec<bool>>,
    current: &mut Vec<char>,
    out: &mut Vec<String>,
) {
    if current.len() == k {
        out.push(current.iter().collect());
        return;
    }
    for i in 0..pool.len() {
        if let Some(ref mut taken) = used {
            if taken[i] {
                continue;
            }
            taken[i] = true;
        }
        current.push(pool[i]);
        arrange(pool, k, used.as_deref_mut(), current, out);
        current.pop();
        if let Some(ref mut taken) = used {
            taken[i] = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn binomial(n: u64, k: u64) -> u64 {
        if k > n {
            return 0;
        }
        (1..=k).fold(1, |acc, i| acc * (n - k + i) / i)
    }

    fn falling(n: u64, k: u64) -> u64 {
        (0..k).map(|i| n - i).product()
    }

    #[test]
    fn combinations_of_three() {
        assert_eq!(combinations(&chars("123"), 2), vec!["12", "13", "23"]);
    }

    #[test]
    fn permutations_of_three() {
        assert_eq!(
            permutations(&chars("123"), 2),
            vec!["12", "13", "21", "23", "31", "32"]
        );
    }

    #[test]
    fn combinations_with_repeats_of_three() {
        assert_eq!(
            combinations_with_repeats(&chars("123"), 2),
            vec!["11", "12", "13", "22", "23", "33"]
        );
    }

    #[test]
    fn permutations_with_repeats_of_two() {
        assert_eq!(
            permutations_with_repeats(&chars("12"), 2),
            vec!["11", "12", "21", "22"]
        );
    }

    #[test]
    fn duplicate_pool_entries_are_ignored() {
        assert_eq!(combinations(&chars("1123"), 2), combinations(&chars("123"), 2));
        assert_eq!(permutations(&chars("3311"), 2), vec!["31", "13"]);
    }

    #[test]
    fn empty_pool_and_zero_k_yield_nothing() {
        for mode in [Mode::Combination, Mode::Permutation] {
            for repeats in [false, true] {
                assert!(generate(&[], 2, mode, repeats).is_empty());
                assert!(generate(&chars("12"), 0, mode, repeats).is_empty());
            }
        }
    }

    #[test]
    fn k_larger_than_pool_without_repeats_is_empty() {
        assert!(combinations(&chars("12"), 3).is_empty());
        assert!(permutations(&chars("12"), 3).is_empty());
        // With repeats the pool can be shorter than k.
        assert_eq!(combinations_with_repeats(&chars("1"), 3), vec!["111"]);
        assert_eq!(permutations_with_repeats(&chars("1"), 3), vec!["111"]);
    }

    #[test]
    fn counts_match_closed_forms() {
        let digits = "0123456789";
        for n in 1..=digits.len() {
            let pool = chars(&digits[..n]);
            let n = n as u64;
            for k in 1..=n.min(4) {
                let ku = k as usize;
                assert_eq!(combinations(&pool, ku).len() as u64, binomial(n, k), "C({n},{k})");
                assert_eq!(
                    combinations_with_repeats(&pool, ku).len() as u64,
                    binomial(n + k - 1, k),
                    "multiset({n},{k})"
                );
                assert_eq!(permutations(&pool, ku).len() as u64, falling(n, k), "P({n},{k})");
                assert_eq!(
                    permutations_with_repeats(&pool, ku).len() as u64,
                    n.pow(k as u32),
                    "{n}^{k}"
                );
            }
        }
    }

    #[test]
    fn combinations_follow_pool_order_without_repeats() {
        let pool = chars("0123456789");
        for group in combinations(&pool, 4) {
            let positions: Vec<usize> = group
                .chars()
                .map(|c| pool.iter().position(|&p| p == c).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{group}");
        }
    }

    #[test]
    fn permutations_have_distinct_characters() {
        let pool = chars("13579");
        for group in permutations(&pool, 3) {
            let mut seen: Vec<char> = group.chars().collect();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), 3, "{group}");
            assert!(group.chars().all(|c| pool.contains(&c)));
        }
    }

    #[test]
    fn output_is_stable_between_runs() {
        let pool = chars("9081");
        for mode in [Mode::Combination, Mode::Permutation] {
            for repeats in [false, true] {
                assert_eq!(
                    generate(&pool, 3, mode, repeats),
                    generate(&pool, 3, mode, repeats)
                );
            }
        }
    }
}
