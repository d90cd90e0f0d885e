//! QR payment payload codec.
//!
//! Merchant stalls publish `{"merchant": <name>, "harga": <price>}` inside a QR
//! code. Anyone can print a QR code, so every payload is treated as hostile:
//! counterparty names are sanitized and anything that is not the structured
//! form degrades to a fixed-price payment instead of failing.

use crate::domain::money::Amount;
use crate::error::{Result, WalletError};
use serde::Serialize;
use serde_json::Value;

/// Price assumed for QR codes that do not carry a structured payload.
pub const DEFAULT_FALLBACK_AMOUNT: u64 = 15_000;

const FALLBACK_AMOUNT: Amount = Amount::from_const(DEFAULT_FALLBACK_AMOUNT);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentPayload {
    pub counterparty: String,
    pub amount: Amount,
}

impl PaymentPayload {
    /// A payload is actionable when there is someone to pay.
    pub fn is_actionable(&self) -> bool {
        !self.counterparty.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    Structured,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub payload: PaymentPayload,
    pub source: PayloadSource,
}

#[derive(Serialize)]
struct WirePayload<'a> {
    merchant: &'a str,
    harga: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadCodec {
    fallback_amount: Amount,
}

impl Default for PayloadCodec {
    fn default() -> Self {
        Self {
            fallback_amount: FALLBACK_AMOUNT,
        }
    }
}

impl PayloadCodec {
    pub fn new(fallback_amount: Amount) -> Self {
        Self { fallback_amount }
    }

    pub fn fallback_amount(&self) -> Amount {
        self.fallback_amount
    }

    /// Produces the canonical payload text for a merchant QR code.
    ///
    /// A name that sanitizes to nothing is refused, since its payload would
    /// decode as unstructured text at the fallback price.
    pub fn encode(counterparty: &str, amount: Amount) -> Result<String> {
        let merchant = sanitize(counterparty);
        if merchant.is_empty() {
            return Err(WalletError::InvalidPayload(
                "merchant name is empty".to_string(),
            ));
        }
        let wire = WirePayload {
            merchant: &merchant,
            harga: amount.value(),
        };
        Ok(serde_json::to_string(&wire)?)
    }

    /// Decodes scanned text. Never fails: unstructured text becomes a payment
    /// to the raw text at the fallback price.
    pub fn decode(&self, text: &str) -> Decoded {
        match parse_structured(text) {
            Ok(payload) => Decoded {
                payload,
                source: PayloadSource::Structured,
            },
            Err(reason) => {
                tracing::debug!(reason, "payload is not structured, using fallback price");
                Decoded {
                    payload: PaymentPayload {
                        counterparty: sanitize(text),
                        amount: self.fallback_amount,
                    },
                    source: PayloadSource::Fallback,
                }
            }
        }
    }
}

fn parse_structured(text: &str) -> std::result::Result<PaymentPayload, &'static str> {
    let value: Value = serde_json::from_str(text).map_err(|_| "not JSON")?;
    let object = value.as_object().ok_or("not a JSON object")?;

    let counterparty = object
        .get("merchant")
        .and_then(Value::as_str)
        .map(sanitize)
        .filter(|merchant| !merchant.is_empty())
        .ok_or("missing merchant")?;
    let amount = object
        .get("harga")
        .and_then(parse_price)
        .ok_or("missing or invalid harga")?;

    Ok(PaymentPayload {
        counterparty,
        amount,
    })
}

/// Accepts a positive JSON integer or a string of decimal digits.
fn parse_price(value: &Value) -> Option<Amount> {
    let price = match value {
        Value::Number(number) => number.as_u64()?,
        Value::String(digits) => {
            let digits = digits.trim();
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.parse().ok()?
        }
        _ => return None,
    };
    Amount::new(price).ok()
}

/// Strips markup delimiters and control characters, then trims.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '<' | '>') && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(value: u64) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_decode_structured_payload() {
        let decoded = PayloadCodec::default().decode(r#"{"merchant":"Bakso Pak Kumis","harga":20000}"#);
        assert_eq!(decoded.source, PayloadSource::Structured);
        assert_eq!(decoded.payload.counterparty, "Bakso Pak Kumis");
        assert_eq!(decoded.payload.amount, amount(20_000));
    }

    #[test]
    fn test_decode_accepts_numeric_string_price() {
        let decoded = PayloadCodec::default().decode(r#"{"merchant":"Es Teh","harga":" 5000 "}"#);
        assert_eq!(decoded.source, PayloadSource::Structured);
        assert_eq!(decoded.payload.amount, amount(5_000));
    }

    #[test]
    fn test_decode_plain_text_falls_back() {
        let decoded = PayloadCodec::default().decode("hello world");
        assert_eq!(decoded.source, PayloadSource::Fallback);
        assert_eq!(decoded.payload.counterparty, "hello world");
        assert_eq!(decoded.payload.amount, amount(DEFAULT_FALLBACK_AMOUNT));
    }

    #[test]
    fn test_decode_invalid_prices_fall_back() {
        let codec = PayloadCodec::new(amount(1_000));
        for text in [
            r#"{"merchant":"A","harga":0}"#,
            r#"{"merchant":"A","harga":-10}"#,
            r#"{"merchant":"A","harga":12.5}"#,
            r#"{"merchant":"A","harga":"abc"}"#,
            r#"{"merchant":"A","harga":null}"#,
            r#"{"merchant":"A"}"#,
            r#"{"merchant":"","harga":100}"#,
            r#"{"merchant":42,"harga":100}"#,
            r#"[1,2,3]"#,
            "12345",
        ] {
            let decoded = codec.decode(text);
            assert_eq!(decoded.source, PayloadSource::Fallback, "input: {text}");
            assert_eq!(decoded.payload.amount, amount(1_000));
        }
    }

    #[test]
    fn test_decode_sanitizes_markup() {
        let decoded = PayloadCodec::default()
            .decode(r#"{"merchant":"<script>alert(1)</script>Warung","harga":100}"#);
        assert_eq!(decoded.payload.counterparty, "scriptalert(1)/scriptWarung");

        let fallback = PayloadCodec::default().decode("  <b>Toko</b>\n");
        assert_eq!(fallback.payload.counterparty, "bToko/b");
    }

    #[test]
    fn test_decode_blank_text_is_not_actionable() {
        let decoded = PayloadCodec::default().decode("  <> \t");
        assert_eq!(decoded.source, PayloadSource::Fallback);
        assert!(!decoded.payload.is_actionable());
    }

    #[test]
    fn test_encode_round_trip() {
        let text = PayloadCodec::encode("Bakso Pak Kumis", amount(15_000)).unwrap();
        assert_eq!(text, r#"{"merchant":"Bakso Pak Kumis","harga":15000}"#);

        let decoded = PayloadCodec::default().decode(&text);
        assert_eq!(decoded.source, PayloadSource::Structured);
        assert_eq!(
            decoded.payload,
            PaymentPayload {
                counterparty: "Bakso Pak Kumis".to_string(),
                amount: amount(15_000),
            }
        );
    }

    #[test]
    fn test_encode_escapes_quotes() {
        let text = PayloadCodec::encode(r#"Kedai "Enak""#, amount(7_500)).unwrap();
        let decoded = PayloadCodec::default().decode(&text);
        assert_eq!(decoded.source, PayloadSource::Structured);
        assert_eq!(decoded.payload.counterparty, r#"Kedai "Enak""#);
    }

    #[test]
    fn test_encode_rejects_blank_merchant() {
        for name in ["<>", "   ", "\n<\t>", ""] {
            let result = PayloadCodec::encode(name, amount(100));
            assert!(
                matches!(result, Err(WalletError::InvalidPayload(_))),
                "{name:?} was encoded"
            );
        }
    }
}
