//! Stripe wire types: the `Stripe-Signature` header, the event envelope and
//! the checkout session object.

use std::collections::HashMap;

use serde::Deserialize;

use crate::ports::CheckoutSessionData;

/// Why a `Stripe-Signature` header could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureParseError {
    Empty,
    MissingTimestamp,
    MissingV1Signature,
    InvalidTimestamp,
    /// Signature is not even-length hex.
    InvalidSignatureFormat,
}

impl std::fmt::Display for SignatureParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Empty => "empty Stripe-Signature header",
            Self::MissingTimestamp => "missing t= component",
            Self::MissingV1Signature => "missing v1= component",
            Self::InvalidTimestamp => "timestamp is not an integer",
            Self::InvalidSignatureFormat => "signature is not valid hex",
        };
        f.write_str(s)
    }
}

impl std::error::Error for SignatureParseError {}

/// Parsed `t=<unix>,v1=<hex>[,v1=<hex>...]` header.
///
/// Stripe sends one `v1` per active signing secret during secret rotation,
/// so every candidate is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    pub fn parse(header: &str) -> Result<Self, SignatureParseError> {
        let header = header.trim();
        if header.is_empty() {
            return Err(SignatureParseError::Empty);
        }

        let mut timestamp = None;
        let mut signatures = Vec::new();

        for (key, value) in header.split(',').filter_map(|part| part.split_once('=')) {
            match key.trim() {
                "t" => {
                    let parsed = value
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| SignatureParseError::InvalidTimestamp)?;
                    timestamp = Some(parsed);
                }
                "v1" => {
                    let bytes =
                        hex_decode(value.trim()).ok_or(SignatureParseError::InvalidSignatureFormat)?;
                    signatures.push(bytes);
                }
                // v0 and unknown schemes are ignored.
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureParseError::MissingTimestamp)?;
        if signatures.is_empty() {
            return Err(SignatureParseError::MissingV1Signature);
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.is_empty() || hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Event envelope as posted to the webhook endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeWebhookEvent {
    pub id: String,

    #[serde(rename = "type")]
    pub event_type: String,

    pub created: i64,

    pub data: StripeEventData,

    #[serde(default)]
    pub livemode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

/// Checkout Session object, from the create response or a webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeCheckoutSession {
    pub id: String,

    /// Hosted page URL; null once the session is complete or expired.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub payment_status: Option<String>,

    #[serde(default)]
    pub amount_total: Option<i64>,

    #[serde(default)]
    pub currency: Option<String>,

    /// Either an id or an expanded object; only the id form is used.
    #[serde(default)]
    pub payment_intent: Option<serde_json::Value>,

    #[serde(default)]
    pub client_reference_id: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl StripeCheckoutSession {
    pub fn payment_intent_id(&self) -> Option<String> {
        self.payment_intent
            .as_ref()
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }

    pub fn into_session_data(self) -> CheckoutSessionData {
        CheckoutSessionData {
            payment_intent_id: self.payment_intent_id(),
            session_id: self.id,
            payment_status: self.payment_status,
            amount_total: self.amount_total,
            currency: self.currency,
            client_reference_id: self.client_reference_id,
            metadata: self.metadata,
        }
    }
}

/// Error body returned by the Stripe API.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    pub error: StripeErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_timestamp_and_signature() {
        let header = SignatureHeader::parse("t=1704067200,v1=abcdef01").unwrap();
        assert_eq!(header.timestamp, 1704067200);
        assert_eq!(header.signatures, vec![vec![0xab, 0xcd, 0xef, 0x01]]);
    }

    #[test]
    fn keeps_every_v1_and_ignores_v0() {
        let header = SignatureHeader::parse("t=1,v1=aa,v0=ff,v1=bb").unwrap();
        assert_eq!(header.signatures, vec![vec![0xaa], vec![0xbb]]);
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(SignatureHeader::parse(""), Err(SignatureParseError::Empty));
        assert_eq!(
            SignatureHeader::parse("v1=aa"),
            Err(SignatureParseError::MissingTimestamp)
        );
        assert_eq!(
            SignatureHeader::parse("t=1"),
            Err(SignatureParseError::MissingV1Signature)
        );
        assert_eq!(
            SignatureHeader::parse("t=soon,v1=aa"),
            Err(SignatureParseError::InvalidTimestamp)
        );
        assert_eq!(
            SignatureHeader::parse("t=1,v1=abc"),
            Err(SignatureParseError::InvalidSignatureFormat)
        );
        assert_eq!(
            SignatureHeader::parse("t=1,v1=zz"),
            Err(SignatureParseError::InvalidSignatureFormat)
        );
    }

    #[test]
    fn hex_encode_is_lowercase() {
        assert_eq!(hex_encode(&[0x0f, 0xa0]), "0fa0");
    }

    #[test]
    fn checkout_session_from_webhook_payload() {
        let session: StripeCheckoutSession = serde_json::from_value(serde_json::json!({
            "id": "cs_test_a1",
            "object": "checkout.session",
            "url": null,
            "payment_status": "paid",
            "amount_total": 2500,
            "currency": "gbp",
            "payment_intent": "pi_123",
            "client_reference_id": "user-1",
            "metadata": {"user_id": "user-1", "fund_id": "f", "gift_aid": "true"}
        }))
        .unwrap();

        let data = session.into_session_data();
        assert_eq!(data.session_id, "cs_test_a1");
        assert_eq!(data.amount_total, Some(2500));
        assert_eq!(data.payment_intent_id.as_deref(), Some("pi_123"));
        assert_eq!(data.metadata.get("gift_aid").map(String::as_str), Some("true"));
    }

    #[test]
    fn expanded_payment_intent_is_ignored() {
        let session: StripeCheckoutSession = serde_json::from_value(serde_json::json!({
            "id": "cs_test_a2",
            "payment_intent": {"id": "pi_9", "object": "payment_intent"}
        }))
        .unwrap();
        assert_eq!(session.payment_intent_id(), None);
    }
}
