use anchor_lang::prelude::*;

use crate::error::ErrorCode;
use crate::utils::U256;

/// `a * b / denominator` with floor rounding; overflow and a zero
/// denominator both surface as `MathOverflow`.
pub trait CheckedMulDiv: Sized {
    fn checked_mul_div(self, multiplier: Self, denominator: Self) -> Result<Self>;
}

impl CheckedMulDiv for U256 {
    fn checked_mul_div(self, multiplier: U256, denominator: U256) -> Result<U256> {
        let product = self
            .checked_mul(multiplier)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(product
            .checked_div(denominator)
            .ok_or(ErrorCode::MathOverflow)?)
    }
}

/// Floor square root of `a * b`, the geometric mean used for pool sizing.
pub fn sqrt_product(a: U256, b: U256) -> Result<U256> {
    let product = a.checked_mul(b).ok_or(ErrorCode::MathOverflow)?;
    Ok(product.integer_sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_product_floors() {
        assert_eq!(
            sqrt_product(U256::from(100_000_000u64), U256::from(1_900_000_000u64)).unwrap(),
            U256::from(435_889_894u64)
        );
        assert_eq!(sqrt_product(U256::from(3u64), U256::from(3u64)).unwrap(), U256::from(3u64));
        assert_eq!(sqrt_product(U256::from(3u64), U256::from(5u64)).unwrap(), U256::from(3u64));
    }

    #[test]
    fn mul_div_rejects_zero_denominator_and_overflow() {
        assert!(U256::one().checked_mul_div(U256::one(), U256::zero()).is_err());
        assert!(U256::MAX.checked_mul_div(U256::from(2u64), U256::one()).is_err());
        assert_eq!(
            U256::from(7u64)
                .checked_mul_div(U256::from(3u64), U256::from(2u64))
                .unwrap(),
            U256::from(10u64)
        );
    }
}
