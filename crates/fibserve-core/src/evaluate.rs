//! Closed-form Fibonacci evaluation over the complex plane.
//!
//! Binet's formula `F(z) = (φ^z − ψ^z) / √5` is computed through
//! logarithms: `exp(z·ln φ) − exp(z·ln ψ)`. Since ψ is negative real,
//! its principal logarithm carries an iπ component, which is exactly
//! what gives the formula meaning for arbitrary complex indices.

use std::sync::LazyLock;

use crate::complex::Complex;
use crate::error::InstabilityError;

/// 1/√5 as a complex value with zero imaginary part.
static INV_SQRT_5: LazyLock<Complex> = LazyLock::new(|| Complex::real(1.0 / 5.0f64.sqrt()));

/// ln((1+√5)/2), the logarithm of the golden ratio.
static LOG_PHI: LazyLock<Complex> = LazyLock::new(|| Complex::real((1.0 + 5.0f64.sqrt()) / 2.0).ln());

/// ln((1−√5)/2); negative real argument, so the imaginary part is π.
static LOG_PSI: LazyLock<Complex> = LazyLock::new(|| Complex::real((1.0 - 5.0f64.sqrt()) / 2.0).ln());

/// Evaluate the Fibonacci function at a complex index.
///
/// Fails with [`InstabilityError`] if either component of the result is
/// NaN or infinite; large-magnitude inputs overflow the complex
/// exponential and must not leak `NaN`/`Infinity` into any encoding.
pub fn evaluate(z: Complex) -> Result<Complex, InstabilityError> {
    let result = ((z * *LOG_PHI).exp() - (z * *LOG_PSI).exp()) * *INV_SQRT_5;
    if result.is_nan() || result.is_infinite() {
        return Err(InstabilityError);
    }
    Ok(result)
}

/// Seam for the computation step, so orchestration can be tested with
/// counting or failing implementations.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, z: Complex) -> Result<Complex, InstabilityError>;
}

/// Production evaluator backed by [`evaluate`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BinetEvaluator;

impl Evaluator for BinetEvaluator {
    fn evaluate(&self, z: Complex) -> Result<Complex, InstabilityError> {
        evaluate(z)
    }
}
