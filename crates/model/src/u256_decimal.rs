//! Serde helpers serializing `U256` amounts as decimal strings, the format
//! used by allocation selectors and transaction builders for wei quantities.

use {
    primitive_types::U256,
    serde::{Deserialize, Deserializer, Serializer, de},
    std::fmt,
};

pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl de::Visitor<'_> for Visitor {
        type Value = U256;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a decimal encoded 256 bit unsigned integer")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            U256::from_dec_str(s).map_err(|err| {
                de::Error::custom(format!("failed to decode {s:?} as decimal u256: {err}"))
            })
        }
    }

    deserializer.deserialize_str(Visitor)
}

/// Same as the module level functions but for `Vec<U256>`.
pub mod vec {
    use {super::*, serde::ser::SerializeSeq};

    pub fn serialize<S>(values: &[U256], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for value in values {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<U256>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings = Vec::<String>::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| U256::from_dec_str(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde::Serialize, serde_json::json};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct S(#[serde(with = "super")] U256);

    #[test]
    fn serializes_as_decimal_string() {
        let value = S(U256::from_dec_str("1000000000000000000").unwrap());
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!("1000000000000000000")
        );
    }

    #[test]
    fn deserializes_decimal_string() {
        let value: S = serde_json::from_value(json!("1010000000000000000000")).unwrap();
        assert_eq!(value, S(U256::from(1010u64) * U256::exp10(18)));
    }

    #[test]
    fn rejects_non_decimal_input() {
        assert!(serde_json::from_value::<S>(json!("0xff")).is_err());
        assert!(serde_json::from_value::<S>(json!("1.5")).is_err());
    }
}
