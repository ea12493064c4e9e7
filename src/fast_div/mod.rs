//! Width-narrowing integer division
//!
//! Dividing small integer types is much cheaper than dividing large ones on
//! most CPUs, and a 128-bit division usually ends up in a slow library
//! routine. [`fast_div`] checks the runtime magnitudes of its operands and
//! divides in half the declared width whenever both fit there. The result
//! is always exactly `x / y`; only the cost changes.
//!
//! Two narrowing policies exist:
//!
//! * [`Aggressive`] also narrows 64-bit divisions to 32-bit. This pays off
//!   on CPUs where 64-bit division is much slower than 32-bit division
//!   (most CPUs before 2020).
//! * [`Conservative`] treats divisions up to 64 bits as cheap enough and
//!   only switches them to unsigned division. 128-bit divisions are still
//!   narrowed to 64-bit.
//!
//! [`DefaultPolicy`] is picked at compile time by the `fast-div32` feature.
//!
//! Callers guarantee `x >= 0` and `y > 0`. Signed operands are divided with
//! unsigned instructions, which is only correct under that precondition.

mod hw;

pub use hw::HAS_HARDWARE_DIV128;

/// Integer division with a narrowing fast path, `Self / Rhs -> Self`.
///
/// Implemented for every pair of same-signedness primitive integers from
/// 32 to 128 bits where the divisor is not wider than the dividend.
pub trait FastDiv<Rhs = Self>: Copy {
    /// Narrow whenever both operands fit in half the dividend's width,
    /// including 64-bit to 32-bit.
    fn div_aggressive(self, y: Rhs) -> Self;

    /// Use plain unsigned division up to 64 bits, narrow 128-bit operands
    /// to 64-bit when they fit.
    fn div_conservative(self, y: Rhs) -> Self;
}

/// Choice of narrowing granularity
pub trait DivPolicy {
    const NAME: &'static str;

    fn div<X: FastDiv<Y>, Y>(x: X, y: Y) -> X;
}

/// Narrow 128 -> 64 and 64 -> 32 bits
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggressive;

/// Narrow 128 -> 64 bits only
#[derive(Debug, Clone, Copy, Default)]
pub struct Conservative;

impl DivPolicy for Aggressive {
    const NAME: &'static str = "aggressive";

    #[inline]
    fn div<X: FastDiv<Y>, Y>(x: X, y: Y) -> X {
        x.div_aggressive(y)
    }
}

impl DivPolicy for Conservative {
    const NAME: &'static str = "conservative";

    #[inline]
    fn div<X: FastDiv<Y>, Y>(x: X, y: Y) -> X {
        x.div_conservative(y)
    }
}

#[cfg(feature = "fast-div32")]
pub type DefaultPolicy = Aggressive;

#[cfg(not(feature = "fast-div32"))]
pub type DefaultPolicy = Conservative;

/// `x / y` using the compile-time default narrowing policy
#[inline]
pub fn fast_div<X: FastDiv<Y>, Y>(x: X, y: Y) -> X {
    DefaultPolicy::div(x, y)
}

/// `x / y` truncated to 64 bits.
///
/// Meant for 128-bit dividends whose quotient is known to fit in 64 bits.
/// On x86_64 this issues a single `div` instruction instead of a full
/// 128-bit division.
#[inline]
pub fn fast_div64<X: FastDiv64<Y>, Y>(x: X, y: Y) -> u64 {
    x.fast_div64(y)
}

/// Division yielding a 64-bit quotient, see [`fast_div64`]
pub trait FastDiv64<Rhs = Self>: Copy {
    fn fast_div64(self, y: Rhs) -> u64;
}

/// Plain unsigned division at the dividend's width.
macro_rules! impl_unsigned_div {
    ($method:ident, $x:ty, $y:ty, $ux:ty) => {
        #[inline]
        #[allow(unused_comparisons)]
        fn $method(self, y: $y) -> $x {
            debug_assert!(y > 0 as $y, "fast_div: divisor must be positive");
            debug_assert!(self >= 0 as $x, "fast_div: dividend must be non-negative");
            ((self as $ux) / (y as $x as $ux)) as $x
        }
    };
}

/// Divide in `$half` when both operands fit, at full width otherwise.
/// Negative operands never pass the range check, so the full-width path
/// keeps signed semantics for them.
macro_rules! impl_narrowing_div {
    ($method:ident, $x:ty, $y:ty, $ux:ty, $half:ty) => {
        #[inline]
        #[allow(unused_comparisons)]
        fn $method(self, y: $y) -> $x {
            debug_assert!(y > 0 as $y, "fast_div: divisor must be positive");
            debug_assert!(self >= 0 as $x, "fast_div: dividend must be non-negative");
            let ux = self as $ux;
            let uy = y as $x as $ux;
            if ux <= <$half>::MAX as $ux && uy <= <$half>::MAX as $ux {
                ((ux as $half) / (uy as $half)) as $x
            } else {
                self / (y as $x)
            }
        }
    };
}

// 32-bit: nothing narrower worth using, both policies divide unsigned.
macro_rules! impl_fast_div_32 {
    ($(($x:ty, $y:ty, $ux:ty)),* $(,)?) => {$(
        impl FastDiv<$y> for $x {
            impl_unsigned_div!(div_aggressive, $x, $y, $ux);
            impl_unsigned_div!(div_conservative, $x, $y, $ux);
        }
    )*};
}

// 64-bit: only the aggressive policy narrows to 32-bit.
macro_rules! impl_fast_div_64 {
    ($(($x:ty, $y:ty, $ux:ty)),* $(,)?) => {$(
        impl FastDiv<$y> for $x {
            impl_narrowing_div!(div_aggressive, $x, $y, $ux, u32);
            impl_unsigned_div!(div_conservative, $x, $y, $ux);
        }
    )*};
}

// 128-bit: both policies narrow to 64-bit.
macro_rules! impl_fast_div_128 {
    ($(($x:ty, $y:ty, $ux:ty)),* $(,)?) => {$(
        impl FastDiv<$y> for $x {
            impl_narrowing_div!(div_aggressive, $x, $y, $ux, u64);
            impl_narrowing_div!(div_conservative, $x, $y, $ux, u64);
        }
    )*};
}

impl_fast_div_32!((u32, u32, u32), (i32, i32, u32));

impl_fast_div_64!(
    (u64, u64, u64),
    (u64, u32, u64),
    (i64, i64, u64),
    (i64, i32, u64),
);

impl_fast_div_128!(
    (u128, u128, u128),
    (u128, u64, u128),
    (u128, u32, u128),
    (i128, i128, u128),
    (i128, i64, u128),
    (i128, i32, u128),
);

// Double-width dividend, native-width divisor: eligible for the hardware
// 128 / 64 -> 64 instruction.
macro_rules! impl_fast_div64_wide {
    ($(($x:ty, $y:ty)),* $(,)?) => {$(
        impl FastDiv64<$y> for $x {
            #[inline]
            #[allow(unused_comparisons)]
            fn fast_div64(self, y: $y) -> u64 {
                debug_assert!(self >= 0 as $x && y > 0 as $y, "fast_div64: requires x >= 0, y > 0");
                match hw::div_u128_by_u64(self as u128, y as u64) {
                    Some(q) => q,
                    None => fast_div(self, y) as u64,
                }
            }
        }
    )*};
}

macro_rules! impl_fast_div64_narrow {
    ($(($x:ty, $y:ty)),* $(,)?) => {$(
        impl FastDiv64<$y> for $x {
            #[inline]
            fn fast_div64(self, y: $y) -> u64 {
                fast_div(self, y) as u64
            }
        }
    )*};
}

impl_fast_div64_wide!((u128, u64), (u128, u32), (i128, i64), (i128, i32));

impl_fast_div64_narrow!(
    (u32, u32),
    (i32, i32),
    (u64, u64),
    (u64, u32),
    (i64, i64),
    (i64, i32),
    (u128, u128),
    (i128, i128),
);
