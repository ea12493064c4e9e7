//! Hardware 128 / 64 -> 64 division

/// Whether [`div_u128_by_u64`] uses a dedicated instruction on this target
pub const HAS_HARDWARE_DIV128: bool = cfg!(all(target_arch = "x86_64", not(miri)));

/// Divide a 128-bit dividend by a 64-bit divisor with a single `div`.
///
/// The instruction faults when the quotient does not fit in 64 bits, so
/// that case (and `d == 0`) returns `None` and the caller divides the
/// general way.
#[cfg(all(target_arch = "x86_64", not(miri)))]
#[inline]
pub(super) fn div_u128_by_u64(x: u128, d: u64) -> Option<u64> {
    let lo = x as u64;
    let hi = (x >> 64) as u64;

    // quotient < 2^64 <=> hi < d
    if hi >= d {
        return None;
    }

    let quotient: u64;
    // SAFETY: hi < d rules out both #DE causes (zero divisor, quotient
    // overflow). Only rax and rdx are touched.
    unsafe {
        core::arch::asm!(
            "div {d}",
            d = in(reg) d,
            inout("rax") lo => quotient,
            inout("rdx") hi => _,
            options(pure, nomem, nostack)
        );
    }

    Some(quotient)
}

#[cfg(not(all(target_arch = "x86_64", not(miri))))]
#[inline]
pub(super) fn div_u128_by_u64(_x: u128, _d: u64) -> Option<u64> {
    None
}
