//! Prime capacity utilities shared by both table variants.

/// Returns whether `n` is prime.
///
/// 2 and 3 are prime; 0, 1 and every even number above 2 are not. Anything
/// else is trial-divided by odd factors up to `√n`.
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }
    let mut factor = 3;
    while factor * factor <= n {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// Smallest odd prime `>= n`.
///
/// Even inputs are bumped to the next odd number first and the search steps
/// by 2 from there, so the result is never 2.
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}
