use crate::{ArithError, Result, SafeArith};

/// Integer square roots and perfect squares over any `SafeArith` type.
pub trait SafeSqrt: SafeArith + Ord {
    /// Floor of the square root, i.e. the largest `r` such that `r * r <= self`.
    ///
    /// Uses the Babylonian (Newton) iteration starting from `self / 2 + 1`, which never
    /// overflows the type width.
    fn safe_isqrt(&self) -> Result<Self> {
        let two = Self::ONE.safe_add(Self::ONE)?;
        if *self < two.safe_add(Self::ONE)? {
            return Ok(if *self == Self::ZERO {
                Self::ZERO
            } else {
                Self::ONE
            });
        }

        let mut root = *self;
        let mut next = self.safe_div(two)?.safe_add(Self::ONE)?;
        while next < root {
            root = next;
            next = self.safe_div(next)?.safe_add(next)?.safe_div(two)?;
        }
        Ok(root)
    }

    /// Smallest `h` such that `h * h >= self`.
    fn safe_ceil_sqrt(&self) -> Result<Self> {
        let root = self.safe_isqrt()?;
        if root.safe_mul(root)? == *self {
            Ok(root)
        } else {
            root.safe_add(Self::ONE)
        }
    }

    /// Smallest perfect square that is `>= self`.
    ///
    /// Fails with `ArithError::Overflow` when that square does not fit the type.
    fn safe_next_perfect_square(&self) -> Result<Self> {
        let root = self.safe_ceil_sqrt()?;
        root.safe_mul(root).map_err(|_| ArithError::Overflow)
    }
}

impl<T: SafeArith + Ord> SafeSqrt for T {}
