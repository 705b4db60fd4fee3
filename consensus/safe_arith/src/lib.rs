//! Library for safe arithmetic on fixed-width integers, avoiding overflow and division by zero.
//!
//! Both the native integer types and the 256-bit `U256` used by the shuffling engines are
//! covered, so every engine shares one audited set of checked operations.
mod sqrt;

pub use sqrt::SafeSqrt;

use ethereum_types::U256;

/// Error representing the failure of an arithmetic operation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ArithError {
    Overflow,
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, ArithError>;

macro_rules! assign_method {
    ($name:ident, $op:ident, $doc_op:expr) => {
        assign_method!($name, $op, Self, $doc_op);
    };
    ($name:ident, $op:ident, $rhs_ty:ty, $doc_op:expr) => {
        #[doc = "Safe variant of `"]
        #[doc = $doc_op]
        #[doc = "`."]
        #[inline]
        fn $name(&mut self, other: $rhs_ty) -> Result<()> {
            *self = self.$op(other)?;
            Ok(())
        }
    };
}

/// Trait providing safe arithmetic operations for fixed-width integer types.
pub trait SafeArith<Rhs = Self>: Sized + Copy {
    const ZERO: Self;
    const ONE: Self;

    /// Safe variant of `+` that guards against overflow.
    fn safe_add(&self, other: Rhs) -> Result<Self>;

    /// Safe variant of `-` that guards against overflow.
    fn safe_sub(&self, other: Rhs) -> Result<Self>;

    /// Safe variant of `*` that guards against overflow.
    fn safe_mul(&self, other: Rhs) -> Result<Self>;

    /// Safe variant of `/` that guards against division by 0.
    fn safe_div(&self, other: Rhs) -> Result<Self>;

    /// Safe variant of `%` that guards against division by 0.
    fn safe_rem(&self, other: Rhs) -> Result<Self>;

    /// Safe variant of `<<` that guards against overflow.
    ///
    /// Unlike the native operator, shifting set bits out of the top is an overflow.
    fn safe_shl(&self, other: u32) -> Result<Self>;

    /// Safe variant of `>>` that guards against overflow.
    fn safe_shr(&self, other: u32) -> Result<Self>;

    /// Safe exponentiation, failing if `self ** exp` does not fit.
    fn safe_pow(&self, exp: u32) -> Result<Self>;

    assign_method!(safe_add_assign, safe_add, Rhs, "+=");
    assign_method!(safe_sub_assign, safe_sub, Rhs, "-=");
    assign_method!(safe_mul_assign, safe_mul, Rhs, "*=");
    assign_method!(safe_div_assign, safe_div, Rhs, "/=");
    assign_method!(safe_rem_assign, safe_rem, Rhs, "%=");
    assign_method!(safe_shl_assign, safe_shl, u32, "<<=");
    assign_method!(safe_shr_assign, safe_shr, u32, ">>=");
}

macro_rules! impl_safe_arith {
    ($typ:ty) => {
        impl SafeArith for $typ {
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn safe_add(&self, other: Self) -> Result<Self> {
                self.checked_add(other).ok_or(ArithError::Overflow)
            }

            #[inline]
            fn safe_sub(&self, other: Self) -> Result<Self> {
                self.checked_sub(other).ok_or(ArithError::Overflow)
            }

            #[inline]
            fn safe_mul(&self, other: Self) -> Result<Self> {
                self.checked_mul(other).ok_or(ArithError::Overflow)
            }

            #[inline]
            fn safe_div(&self, other: Self) -> Result<Self> {
                self.checked_div(other).ok_or(ArithError::DivisionByZero)
            }

            #[inline]
            fn safe_rem(&self, other: Self) -> Result<Self> {
                self.checked_rem(other).ok_or(ArithError::DivisionByZero)
            }

            #[inline]
            fn safe_shl(&self, other: u32) -> Result<Self> {
                if other >= <$typ>::BITS || (*self != 0 && self.leading_zeros() < other) {
                    return Err(ArithError::Overflow);
                }
                Ok(self << other)
            }

            #[inline]
            fn safe_shr(&self, other: u32) -> Result<Self> {
                self.checked_shr(other).ok_or(ArithError::Overflow)
            }

            #[inline]
            fn safe_pow(&self, exp: u32) -> Result<Self> {
                self.checked_pow(exp).ok_or(ArithError::Overflow)
            }
        }
    };
}

impl_safe_arith!(u8);
impl_safe_arith!(u16);
impl_safe_arith!(u32);
impl_safe_arith!(u64);
impl_safe_arith!(u128);
impl_safe_arith!(usize);

/// Bit width of `U256`.
const U256_BITS: u32 = 256;

impl SafeArith for U256 {
    const ZERO: Self = U256([0; 4]);
    const ONE: Self = U256([1, 0, 0, 0]);

    #[inline]
    fn safe_add(&self, other: Self) -> Result<Self> {
        self.checked_add(other).ok_or(ArithError::Overflow)
    }

    #[inline]
    fn safe_sub(&self, other: Self) -> Result<Self> {
        self.checked_sub(other).ok_or(ArithError::Overflow)
    }

    #[inline]
    fn safe_mul(&self, other: Self) -> Result<Self> {
        self.checked_mul(other).ok_or(ArithError::Overflow)
    }

    #[inline]
    fn safe_div(&self, other: Self) -> Result<Self> {
        self.checked_div(other).ok_or(ArithError::DivisionByZero)
    }

    #[inline]
    fn safe_rem(&self, other: Self) -> Result<Self> {
        self.checked_rem(other).ok_or(ArithError::DivisionByZero)
    }

    #[inline]
    fn safe_shl(&self, other: u32) -> Result<Self> {
        if other >= U256_BITS || (!self.is_zero() && self.leading_zeros() < other) {
            return Err(ArithError::Overflow);
        }
        Ok(*self << other)
    }

    #[inline]
    fn safe_shr(&self, other: u32) -> Result<Self> {
        if other >= U256_BITS {
            return Err(ArithError::Overflow);
        }
        Ok(*self >> other)
    }

    #[inline]
    fn safe_pow(&self, exp: u32) -> Result<Self> {
        self.checked_pow(U256::from(exp))
            .ok_or(ArithError::Overflow)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic() {
        let x = 10u32;
        let y = 11;
        assert_eq!(x.safe_add(y), Ok(x + y));
        assert_eq!(y.safe_sub(x), Ok(y - x));
        assert_eq!(x.safe_mul(y), Ok(x * y));
        assert_eq!(x.safe_div(y), Ok(x / y));
        assert_eq!(x.safe_rem(y), Ok(x % y));
        assert_eq!(x.safe_pow(3), Ok(1000));

        assert_eq!(x.safe_shl(1), Ok(x << 1));
        assert_eq!(x.safe_shr(1), Ok(x >> 1));
    }

    #[test]
    fn basic_u256() {
        let x = U256::from(10);
        let y = U256::from(11);
        assert_eq!(x.safe_add(y), Ok(U256::from(21)));
        assert_eq!(y.safe_sub(x), Ok(U256::one()));
        assert_eq!(x.safe_mul(y), Ok(U256::from(110)));
        assert_eq!(y.safe_div(x), Ok(U256::one()));
        assert_eq!(y.safe_rem(x), Ok(U256::one()));
        assert_eq!(x.safe_pow(2), Ok(U256::from(100)));
        assert_eq!(x.safe_shl(2), Ok(U256::from(40)));
        assert_eq!(x.safe_shr(1), Ok(U256::from(5)));
        assert_eq!(U256::ZERO, U256::zero());
        assert_eq!(U256::ONE, U256::one());
    }

    #[test]
    fn mutate() {
        let mut x = 0u8;
        x.safe_add_assign(2).unwrap();
        assert_eq!(x, 2);
        x.safe_sub_assign(1).unwrap();
        assert_eq!(x, 1);
        x.safe_shl_assign(1).unwrap();
        assert_eq!(x, 2);
        x.safe_mul_assign(3).unwrap();
        assert_eq!(x, 6);
        x.safe_div_assign(4).unwrap();
        assert_eq!(x, 1);
        x.safe_shr_assign(1).unwrap();
        assert_eq!(x, 0);
    }

    #[test]
    fn errors() {
        assert!(u32::MAX.safe_add(1).is_err());
        assert!(u32::MIN.safe_sub(1).is_err());
        assert!(u32::MAX.safe_mul(2).is_err());
        assert_eq!(u32::MAX.safe_div(0), Err(ArithError::DivisionByZero));
        assert_eq!(u32::MAX.safe_rem(0), Err(ArithError::DivisionByZero));
        assert!(u32::MAX.safe_shl(32).is_err());
        assert!(u32::MAX.safe_shl(1).is_err());
        assert!(u32::MAX.safe_shr(32).is_err());
        assert!(2u32.safe_pow(32).is_err());
    }

    #[test]
    fn errors_u256() {
        let two_pow_128 = U256::one() << 128;
        assert_eq!(U256::MAX.safe_add(U256::one()), Err(ArithError::Overflow));
        assert_eq!(U256::zero().safe_sub(U256::one()), Err(ArithError::Overflow));
        assert_eq!(two_pow_128.safe_mul(two_pow_128), Err(ArithError::Overflow));
        assert_eq!(two_pow_128.safe_pow(2), Err(ArithError::Overflow));
        assert_eq!(
            U256::MAX.safe_div(U256::zero()),
            Err(ArithError::DivisionByZero)
        );
        assert_eq!(U256::one().safe_shl(256), Err(ArithError::Overflow));
        assert_eq!(U256::MAX.safe_shl(1), Err(ArithError::Overflow));
        assert_eq!(U256::MAX.safe_shr(256), Err(ArithError::Overflow));
    }

    #[test]
    fn pow_boundary_u256() {
        let below = (U256::one() << 128) - 1;
        assert!(below.safe_pow(2).is_ok());
        assert!(below.safe_pow(3).is_err());
        assert_eq!(U256::from(2).safe_pow(255), Ok(U256::one() << 255));
        assert!(U256::from(2).safe_pow(256).is_err());
        assert_eq!(U256::from(12345).safe_pow(0), Ok(U256::one()));
    }
}
