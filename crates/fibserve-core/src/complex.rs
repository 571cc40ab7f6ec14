use std::ops::{Add, Mul, Neg, Sub};

/// A complex number represented as two `f64` components.
///
/// This is a lightweight `Copy` type. We roll our own instead of using
/// `num::Complex` because the codec needs bit-level control over signed
/// zeros, and the evaluator only needs a handful of operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// A purely real value; the imaginary part is positive zero.
    #[inline]
    pub fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Complex exponential: `e^re · (cos im + i·sin im)`.
    pub fn exp(self) -> Self {
        let scale = self.re.exp();
        Self {
            re: scale * self.im.cos(),
            im: scale * self.im.sin(),
        }
    }

    /// Principal branch of the complex logarithm:
    /// `ln|z| + i·atan2(im, re)`. For a negative real argument the
    /// imaginary part is π, which is what extends Binet's formula
    /// beyond integer indices.
    pub fn ln(self) -> Self {
        Self {
            re: self.norm().ln(),
            im: self.im.atan2(self.re),
        }
    }

    /// Returns `√(re² + im²)`.
    #[inline]
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// True if either component is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    /// True if either component is infinite.
    #[inline]
    pub fn is_infinite(self) -> bool {
        self.re.is_infinite() || self.im.is_infinite()
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl Neg for Complex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}
