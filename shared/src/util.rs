//! Serde helpers for the backend's loosely typed fields, plus money display.
//!
//! The backend is not consistent about JSON types: `table_id` comes back as
//! `"7"` from `POST /order` but as `7` from `GET /order`, quantities are
//! `"1"` on one endpoint and `1` on another. Fields that suffer from this are
//! decoded through the helpers below.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    fn into_i64<E: de::Error>(self) -> Result<i64, E> {
        match self {
            IntOrString::Int(v) => Ok(v),
            IntOrString::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected integer, got {s:?}"))),
        }
    }
}

/// Decode an `i64` from either a JSON number or a numeric string.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    IntOrString::deserialize(deserializer)?.into_i64()
}

/// Like [`lenient_i64`] for optional fields. Use with `#[serde(default)]`.
pub fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IntOrString>::deserialize(deserializer)?
        .map(IntOrString::into_i64)
        .transpose()
}

/// Decode a label that the backend sends either as text or as a bare number
/// (table numbers are `"A1"` on some floors and `12` on others).
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(v) => v.to_string(),
        IntOrString::Str(s) => s,
    })
}

/// Decode a non-negative quantity from either a JSON number or a numeric string.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value: i64 = IntOrString::deserialize(deserializer)?.into_i64()?;
    u32::try_from(value).map_err(|_| de::Error::custom(format!("quantity out of range: {value}")))
}

/// Render an amount the way the front desk reads it: `Rp 12,000`, `Rp 7,500.5`.
pub fn format_rupiah(amount: Decimal) -> String {
    let normalized = amount.normalize();
    let text = normalized.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if normalized.is_sign_negative() && !normalized.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("Rp {sign}{grouped}.{frac}"),
        None => format!("Rp {sign}{grouped}"),
    }
}
