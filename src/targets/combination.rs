//! Combination ranking.
//!
//! Maps a rank to the matching `r`-subset of a pool without enumerating the
//! subsets before it. Rank `i` is the `i`-th subset in lexicographic order of
//! pool positions, the same order as iterating nested loops `a < b < c ...`.
//!
//! ```
//! use pet_targeting::targets::{combination_count, nth_combination};
//!
//! let pool = ['a', 'b', 'c', 'd'];
//! assert_eq!(combination_count(4, 2).unwrap(), 6);
//! assert_eq!(nth_combination(&pool, 2, 0).unwrap(), vec!['a', 'b']);
//! assert_eq!(nth_combination(&pool, 2, 2).unwrap(), vec!['a', 'd']);
//! assert_eq!(nth_combination(&pool, 2, 5).unwrap(), vec!['c', 'd']);
//! assert!(nth_combination(&pool, 2, 6).is_err());
//! ```

use thiserror::Error;

/// Errors raised by combination ranking.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CombinationError {
    /// Rank outside `0..C(n, r)`.
    #[error("combination index {index} out of range for {count} combinations")]
    IndexOutOfRange { index: u128, count: u128 },

    /// `C(n, r)` does not fit in a `u128`.
    #[error("C({n}, {r}) does not fit in 128 bits")]
    CountOverflow { n: usize, r: usize },
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `count * num / den`, where `den` is known to divide `count * num`.
///
/// Cancels the common factor of `count` and `den` first, so the only
/// multiplication left is the exact result.
fn scale(count: u128, num: u128, den: u128) -> Option<u128> {
    let g = gcd(count, den);
    (count / g).checked_mul(num / (den / g))
}

/// Number of `r`-subsets of an `n`-element pool.
///
/// Exact for every pool whose count fits in a `u128`, e.g.
/// `C(130, 65)`. Fails with [`CombinationError::CountOverflow`] otherwise.
pub fn combination_count(n: usize, r: usize) -> Result<u128, CombinationError> {
    if r > n {
        return Ok(0);
    }
    let k = r.min(n - r) as u128;
    let total = n as u128;
    let mut count: u128 = 1;
    for i in 0..k {
        // C(total, i + 1) = C(total, i) * (total - i) / (i + 1)
        count = scale(count, total - i, i + 1).ok_or(CombinationError::CountOverflow { n, r })?;
    }
    Ok(count)
}

/// The `index`-th `r`-subset of `pool`, in lexicographic order.
///
/// Runs in `O(n)` arithmetic steps by walking down the pool and skipping whole
/// blocks of combinations that share a prefix.
pub fn nth_combination<T: Clone>(pool: &[T], r: usize, index: u128) -> Result<Vec<T>, CombinationError> {
    let total = combination_count(pool.len(), r)?;
    if index >= total {
        return Err(CombinationError::IndexOutOfRange { index, count: total });
    }

    let len = pool.len();
    let overflow = CombinationError::CountOverflow { n: len, r };
    let mut index = index;
    let mut count = total;
    let mut n = len as u128;
    let mut r = r as u128;
    let mut out = Vec::with_capacity(r as usize);

    while r > 0 {
        // Combinations that start with the current head element:
        // C(n - 1, r - 1) = C(n, r) * r / n.
        count = scale(count, r, n).ok_or_else(|| overflow.clone())?;
        n -= 1;
        r -= 1;
        while index >= count {
            index -= count;
            // C(n - 1, r) = C(n, r) * (n - r) / n.
            count = scale(count, n - r, n).ok_or_else(|| overflow.clone())?;
            n -= 1;
        }
        out.push(pool[len - 1 - n as usize].clone());
    }
    Ok(out)
}
