//! Auxiliary functions.

/// Integer logarithm base 2 of a number, rounded up.
pub(crate) fn log2_ceil(mut n: usize) -> usize {
    let mut ret = 0;
    let mut sticky = 0;
    while n > 1 {
        if n & 1 != 0 {
            sticky = 1;
        }
        ret += 1;
        n >>= 1;
    }
    ret + sticky
}

/// Number of terms `l` of the exponential series such that `r^l / l!` is below `2^-w`,
/// where `r` is an upper bound of the argument given as a binary exponent `r_exp`, i.e. `r < 2^r_exp`.
pub(crate) fn exp_series_len(r_exp: i64, w: usize) -> usize {
    let lr = r_exp as f64;
    let target = -(w as f64);
    let mut acc = 0.0;
    let mut l = 0;
    while acc > target || l == 0 {
        l += 1;
        acc += lr - (l as f64).log2();
    }
    l
}
