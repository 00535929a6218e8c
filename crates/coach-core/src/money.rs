//! Monetary rounding at the presentation boundary
//!
//! Sums are kept as full-precision `f64` while computing; values are rounded to
//! cents only when serialized or displayed.

use serde::Serializer;

/// Round to two decimal places (half away from zero)
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid serializing "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// serde helper: `#[serde(serialize_with = "crate::money::serialize")]`
pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_cents(*value))
}

/// serde helper for optional amounts
pub fn serialize_opt<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&round_cents(*v)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.004), 10.0);
        assert_eq!(round_cents(10.005000001), 10.01);
        assert_eq!(round_cents(-0.001), 0.0);
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_serialize_rounds() {
        #[derive(serde::Serialize)]
        struct Wrapper {
            #[serde(serialize_with = "serialize")]
            amount: f64,
            #[serde(serialize_with = "serialize_opt")]
            maybe: Option<f64>,
        }

        let json = serde_json::to_value(Wrapper {
            amount: 1234.5678,
            maybe: None,
        })
        .unwrap();
        assert_eq!(json["amount"], 1234.57);
        assert!(json["maybe"].is_null());
    }
}
