// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use num_traits::Float;
use std::fmt::Debug;

/// An Exponentially Weighted Moving Average accumulator.
///
/// Uninitialized until the first observation; the first value seeds the
/// average directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Ewma<F> {
    alpha: F,
    value: Option<F>,
}

/// Error type for an invalid alpha value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAlphaError<F> {
    value: F,
}

impl<F: Float + Debug> InvalidAlphaError<F> {
    pub fn new(value: F) -> Self {
        Self { value }
    }

    pub fn value(&self) -> F {
        self.value
    }
}

impl<F: Float + Debug> std::fmt::Display for InvalidAlphaError<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid alpha value {:?}. Allowed range is 0.0..=1.0.",
            self.value
        )
    }
}

impl<F: Float + Debug> std::error::Error for InvalidAlphaError<F> {}

impl<F: Float + Debug> Ewma<F> {
    #[inline]
    pub fn new(alpha: F) -> Result<Self, InvalidAlphaError<F>> {
        if !alpha.is_finite() || alpha <= F::zero() || alpha > F::one() {
            return Err(InvalidAlphaError::new(alpha));
        }
        Ok(Self { alpha, value: None })
    }

    /// An EWMA pre-seeded with `value`, so the first observation blends
    /// instead of replacing.
    #[inline]
    pub fn with_initial(alpha: F, value: F) -> Result<Self, InvalidAlphaError<F>> {
        let mut ew = Self::new(alpha)?;
        ew.value = Some(value);
        Ok(ew)
    }

    #[inline]
    pub fn alpha(&self) -> F {
        self.alpha
    }

    #[inline]
    pub fn initialized(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub fn value(&self) -> Option<F> {
        self.value
    }

    #[inline]
    pub fn value_or(&self, fallback: F) -> F {
        self.value.unwrap_or(fallback)
    }

    #[inline]
    pub fn reset(&mut self) {
        self.value = None;
    }

    /// Observes a value and returns the updated average.
    pub fn observe(&mut self, x: F) -> F {
        let new_value = match self.value {
            None => x,
            Some(current) => self.alpha * x + (F::one() - self.alpha) * current,
        };
        self.value = Some(new_value);
        new_value
    }
}
