/// Numeric sample type a volume can carry.
///
/// Implemented for the fixed set of pixel types a volume file may declare:
/// 8- to 64-bit signed and unsigned integers and 32/64-bit floats. The
/// arithmetic is constrained: results outside the representable range clamp
/// to the range bounds instead of wrapping.
pub trait Pixel: Copy + PartialOrd + Send + Sync + 'static {
    /// Additive identity; also the resampler's default pixel value.
    const ZERO: Self;

    /// Addition clamped to the representable range.
    fn saturating_add(self, rhs: Self) -> Self;

    /// Subtraction clamped to the representable range. Unsigned types clamp
    /// negative results to zero.
    fn saturating_sub(self, rhs: Self) -> Self;

    fn to_f64(self) -> f64;

    /// Conversion from `f64`, rounding to the nearest integer and clamping
    /// to the representable range for integer types. NaN maps to zero.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_pixel_int {
    ($($t:ty),*) => {$(
        impl Pixel for $t {
            const ZERO: Self = 0;

            #[inline]
            fn saturating_add(self, rhs: Self) -> Self {
                <$t>::saturating_add(self, rhs)
            }

            #[inline]
            fn saturating_sub(self, rhs: Self) -> Self {
                <$t>::saturating_sub(self, rhs)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                // `as` saturates on overflow and maps NaN to zero.
                value.round() as $t
            }
        }
    )*};
}

impl_pixel_int!(u8, i8, u16, i16, u32, i32, u64, i64);

macro_rules! impl_pixel_float {
    ($($t:ty),*) => {$(
        impl Pixel for $t {
            const ZERO: Self = 0.0;

            #[inline]
            fn saturating_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn saturating_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_pixel_float!(f32, f64);
