//! 256-bit unsigned integer used for token-side reserves, liquidity and rewards.

use anchor_lang::prelude::*;
use std::io::{Read, Write};

use crate::error::ErrorCode;

// kept clear of the anchor prelude, whose one-parameter `Result` would shadow
// the one the macro expands to
mod construct {
    uint::construct_uint! {
        /// Little-endian 256-bit unsigned integer (four 64-bit words).
        pub struct U256(4);
    }
}

pub use construct::U256;

impl AnchorSerialize for U256 {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for word in self.0.iter() {
            writer.write_all(&word.to_le_bytes())?;
        }
        Ok(())
    }
}

impl AnchorDeserialize for U256 {
    fn deserialize_reader<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut words = [0u64; 4];
        for word in words.iter_mut() {
            let mut bytes = [0u8; 8];
            reader.read_exact(&mut bytes)?;
            *word = u64::from_le_bytes(bytes);
        }
        Ok(U256(words))
    }
}

impl U256 {
    /// Narrow to `u64`, failing instead of truncating.
    pub fn checked_as_u64(&self) -> Result<u64> {
        require!(self.bits() <= 64, ErrorCode::MathOverflow);
        Ok(self.low_u64())
    }

    pub fn checked_add_err(self, other: U256) -> Result<U256> {
        Ok(self.checked_add(other).ok_or(ErrorCode::MathOverflow)?)
    }

    pub fn checked_sub_err(self, other: U256) -> Result<U256> {
        Ok(self.checked_sub(other).ok_or(ErrorCode::MathOverflow)?)
    }

    pub fn checked_mul_err(self, other: U256) -> Result<U256> {
        Ok(self.checked_mul(other).ok_or(ErrorCode::MathOverflow)?)
    }

    pub fn checked_div_err(self, other: U256) -> Result<U256> {
        Ok(self.checked_div(other).ok_or(ErrorCode::MathOverflow)?)
    }
}
