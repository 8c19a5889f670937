//! Fixed-size subset enumeration by recursive backtracking.
//!
//! Subsets are handed to the callback as a selection vector: `selection[i]`
//! is `true` iff index `i` belongs to the current subset. The vector is
//! restored after each recursive step, so it is only meaningful for the
//! duration of a single callback invocation.

/// Call `visit` once for every `k`-element subset of `0..n`.
///
/// Subsets are visited in lexicographic order of their chosen indices.
/// Returns the number of subsets visited. `n == 0` and `k > n` visit
/// nothing; `k == 0` with `n > 0` visits the empty subset once.
///
/// # Examples
///
/// ```
/// use rastrum::backtrack::for_each_subset;
///
/// let mut pairs = Vec::new();
/// for_each_subset(3, 2, |selection| {
///     let chosen: Vec<usize> = (0..selection.len()).filter(|&i| selection[i]).collect();
///     pairs.push(chosen);
/// });
/// assert_eq!(pairs, vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
/// ```
pub fn for_each_subset<F>(n: usize, k: usize, mut visit: F) -> usize
where
    F: FnMut(&[bool]),
{
    if n == 0 || k > n {
        return 0;
    }

    let mut used = vec![false; n];
    descend(0, k, 0, &mut used, &mut visit)
}

/// One level of the decision tree: `depth` indices chosen, candidates start
/// at `start`.
fn descend<F>(depth: usize, target: usize, start: usize, used: &mut [bool], visit: &mut F) -> usize
where
    F: FnMut(&[bool]),
{
    if depth == target {
        visit(used);
        return 1;
    }

    let mut visited = 0;
    // Leave enough indices after `i` to complete the subset
    let last = used.len() - (target - depth - 1);
    for i in start..last {
        if !used[i] {
            used[i] = true;
            visited += descend(depth + 1, target, i + 1, used, visit);
            used[i] = false;
        }
    }
    visited
}

/// Binomial coefficient `C(n, k)`, saturating at `u128::MAX`.
pub fn subset_count(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut count: u128 = 1;
    for i in 0..k {
        // count * (n - i) is divisible by (i + 1) at every step
        count = match count.checked_mul((n - i) as u128) {
            Some(product) => product / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    count
}
