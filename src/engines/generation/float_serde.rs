//! JSON-safe (de)serialization of objective values.
//!
//! `serde_json` writes `inf` and `NaN` as `null`, which then fails to parse
//! back into `f64`. Failed evaluations carry infinite sentinels, so finite
//! values are written as numbers and the rest as `"inf"`, `"-inf"` or `"NaN"`.
//! `null` reads back as NaN.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Float(f64);

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

impl Serialize for Float {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.is_finite() {
            serializer.serialize_f64(value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }
}

impl<'de> Deserialize<'de> for Float {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(Float(f64::NAN)),
            Some(Repr::Number(value)) => Ok(Float(value)),
            Some(Repr::Text(text)) => match text.to_ascii_lowercase().as_str() {
                "inf" | "+inf" | "infinity" => Ok(Float(f64::INFINITY)),
                "-inf" | "-infinity" => Ok(Float(f64::NEG_INFINITY)),
                "nan" => Ok(Float(f64::NAN)),
                _ => Err(D::Error::custom(format!("invalid float value '{}'", text))),
            },
        }
    }
}

/// `#[serde(with = "float_serde::value")]` for a single `f64`
pub mod value {
    use super::Float;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        Float(*value).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Float::deserialize(deserializer).map(|f| f.0)
    }
}

/// `#[serde(with = "float_serde::values")]` for a `Vec<f64>`
pub mod values {
    use super::Float;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|v| Float(*v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let floats = Vec::<Float>::deserialize(deserializer)?;
        Ok(floats.into_iter().map(|f| f.0).collect())
    }
}
