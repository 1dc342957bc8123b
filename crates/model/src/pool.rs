//! Weighted pool snapshots as supplied by the external pool-data provider.

use {
    anyhow::{Context, Result, ensure},
    primitive_types::{H160, U256},
    serde::{Deserialize, Deserializer, Serialize, Serializer, de},
    std::{fmt, str::FromStr},
};

/// 10^18, the fixed-point representation of `1.0` used by the pools.
pub fn bone() -> U256 {
    U256::exp10(18)
}

/// Opaque identifier of a weighted pool (its 20 byte on-chain address).
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PoolId(pub H160);

impl PoolId {
    pub fn repeat_byte(byte: u8) -> Self {
        Self(H160::repeat_byte(byte))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl fmt::Debug for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PoolId({self})")
    }
}

impl FromStr for PoolId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).context("pool id is not valid hex")?;
        ensure!(bytes.len() == 20, "pool id must be 20 bytes");
        Ok(Self(H160::from_slice(&bytes)))
    }
}

impl From<H160> for PoolId {
    fn from(address: H160) -> Self {
        Self(address)
    }
}

impl Serialize for PoolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PoolId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// State of one weighted pool for a fixed ordered token pair, captured at a
/// single consistent snapshot by the pool-data provider.
///
/// Balances are wei amounts, weights are the pool-relative fractions already
/// normalized against the pool's total weight, and the swap fee is the
/// proportional fee taken from the input side; all three in the 18-decimal
/// fixed-point scale.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: PoolId,
    #[serde(with = "crate::u256_decimal")]
    pub balance_in: U256,
    #[serde(with = "crate::u256_decimal")]
    pub balance_out: U256,
    #[serde(with = "crate::u256_decimal")]
    pub weight_in: U256,
    #[serde(with = "crate::u256_decimal")]
    pub weight_out: U256,
    #[serde(with = "crate::u256_decimal")]
    pub swap_fee: U256,
}

impl Pool {
    /// Validates raw snapshot values. The invariant formulas are undefined
    /// for empty reserves or zero weights, and a fee of 1.0 or more would
    /// consume the entire input.
    pub fn new(
        id: PoolId,
        balance_in: U256,
        balance_out: U256,
        weight_in: U256,
        weight_out: U256,
        swap_fee: U256,
    ) -> Result<Self> {
        ensure!(!balance_in.is_zero(), "pool {id} has no balance in");
        ensure!(!balance_out.is_zero(), "pool {id} has no balance out");
        ensure!(!weight_in.is_zero(), "pool {id} has zero weight in");
        ensure!(!weight_out.is_zero(), "pool {id} has zero weight out");
        ensure!(swap_fee < bone(), "pool {id} swap fee must be below 1.0");
        Ok(Self {
            id,
            balance_in,
            balance_out,
            weight_in,
            weight_out,
            swap_fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(n: u64) -> U256 {
        U256::from(n) * bone()
    }

    #[test]
    fn pool_id_hex_round_trip() {
        let id = PoolId::repeat_byte(0x42);
        let encoded = id.to_string();
        assert_eq!(encoded, format!("0x{}", "42".repeat(20)));
        assert_eq!(encoded.parse::<PoolId>().unwrap(), id);
    }

    #[test]
    fn pool_id_rejects_malformed_input() {
        assert!("0x1234".parse::<PoolId>().is_err());
        assert!("not hex".parse::<PoolId>().is_err());
    }

    #[test]
    fn validates_snapshot_values() {
        let id = PoolId::repeat_byte(1);
        assert!(Pool::new(id, wei(100), wei(100), wei(1) / 2, wei(1) / 2, 0.into()).is_ok());
        assert!(Pool::new(id, 0.into(), wei(100), wei(1), wei(1), 0.into()).is_err());
        assert!(Pool::new(id, wei(100), wei(100), 0.into(), wei(1), 0.into()).is_err());
        assert!(Pool::new(id, wei(100), wei(100), wei(1), wei(1), bone()).is_err());
    }

    #[test]
    fn serializes_amounts_as_decimal_strings() {
        let pool = Pool::new(
            PoolId::repeat_byte(7),
            wei(100),
            wei(50),
            wei(1) / 2,
            wei(1) / 2,
            U256::from(3_000_000_000_000_000u64),
        )
        .unwrap();
        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(json["balanceIn"], "100000000000000000000");
        assert_eq!(json["swapFee"], "3000000000000000");
        let decoded: Pool = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, pool);
    }
}
