// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tolerant field decoders.
//!
//! The two endpoints disagree on scalar types: the home feed sends
//! `duration` and `order` as numbers, search sends the same fields as
//! strings. Values that cannot be interpreted become `None` instead of
//! failing the whole response.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) if f.fract() == 0.0 && f.is_finite() => (f as i64).to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Text(s) => s,
        }
    }

    fn into_int(self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(n),
            Scalar::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Scalar::Float(_) | Scalar::Bool(_) => None,
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    fn into_float(self) -> Option<f64> {
        match self {
            Scalar::Int(n) => Some(n as f64),
            Scalar::Float(f) => Some(f),
            Scalar::Bool(_) => None,
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Scalar>, D::Error> {
    // Arrays or objects where a scalar belongs are dropped rather than rejected
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Accept a string or a number, yielding its textual form
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar(deserializer)?.map(Scalar::into_text))
}

/// Accept an integer, a float or a numeric string
pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(scalar(deserializer)?.and_then(Scalar::into_int))
}

pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(scalar(deserializer)?.and_then(Scalar::into_float))
}
