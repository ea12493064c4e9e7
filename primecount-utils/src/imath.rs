//! Integer math helpers

/// Integer square root, `floor(sqrt(n))`, exact for every `u128`.
///
/// Seeds from the `f64` square root and corrects the estimate, which is
/// off by at most a few units once `n` exceeds 2^53.
pub fn isqrt(n: u128) -> u64 {
    if n == 0 {
        return 0;
    }

    let mut r = ((n as f64).sqrt() as u128).min(u64::MAX as u128);
    while r * r > n {
        r -= 1;
    }
    while r < u64::MAX as u128 && (r + 1) * (r + 1) <= n {
        r += 1;
    }

    r as u64
}

/// `ceil(x / y)` without the `x + y - 1` overflow. Panics if `y == 0`.
pub fn ceil_div(x: u64, y: u64) -> u64 {
    x / y + (x % y != 0) as u64
}

/// `100 * part / total` clamped to `[0, 100]`. An empty total is complete.
pub fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (100.0 * part as f64 / total as f64).clamp(0.0, 100.0)
}
