//! Forgiving deserializers for numeric settings fields
//!
//! Settings files written by hand often carry numbers as strings or hold
//! values of the wrong type. These deserializers accept both and never fail
//! on the value itself. Anything unusable becomes an out-of-range marker
//! (0 for counts, NaN for lengths and rates) that `sanitized()` replaces
//! with the default while logging the key.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Some(value),
        NumberOrText::Text(text) => text.trim().parse().ok(),
        NumberOrText::Other(_) => None,
    })
}

/// Floating point field. Unusable values become NaN.
pub(crate) fn float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?.unwrap_or(f64::NAN))
}

/// Count field. Fractions are truncated, unusable values become 0.
pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number(deserializer)?
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.min(u32::MAX as f64).trunc() as u32)
        .unwrap_or(0))
}
