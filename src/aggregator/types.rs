use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters for a quote request against the aggregator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub chain_id: u64,
    pub in_token: String,
    pub out_token: String,
    /// Base-10 integer in the input token's smallest unit
    pub in_amount: String,
    /// Slippage tolerance in percent
    pub slippage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_code: Option<u64>,
}

/// One fill of a hop on a single exchange venue
///
/// Exchange-specific routing data is opaque to this crate: every field we do
/// not model is captured verbatim in `routing` and passed through to the
/// build endpoint untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeLeg {
    pub exchange: String,
    pub in_amount: String,
    pub out_amount: String,
    pub percent: f64,
    #[serde(flatten)]
    pub routing: Map<String, Value>,
}

/// One token-to-token conversion step, possibly split across exchanges
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hop {
    pub in_token: String,
    pub in_decimals: u8,
    pub out_token: String,
    pub out_decimals: u8,
    pub exchanges: Vec<ExchangeLeg>,
}

/// A sequence of hops carrying a percent share of the total input amount
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitPath {
    pub percent: f64,
    pub hops: Vec<Hop>,
}

/// The full percent-weighted execution plan for one swap
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    pub paths: Vec<SplitPath>,
}

/// Quote returned by the aggregator for one swap request
///
/// Unknown fields round-trip through `extra` so the build endpoint receives
/// the quote payload exactly as the aggregator produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub chain_id: u64,
    pub in_token: String,
    pub out_token: String,
    pub in_amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_decimals: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_decimals: Option<u8>,
    pub out_amount: String,
    pub min_received: String,
    pub best_route: Route,
    pub contract_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_method: Option<String>,
    /// Freshness marker: the block at which the route was priced
    pub block_number: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Signable transaction produced by the build endpoint
///
/// Derived from one quote, immutable once built, single-use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutableTransaction {
    pub to: String,
    /// 0x-prefixed hex call data
    pub data: String,
    /// Native value in wei, decimal string
    pub value: String,
}

/// Payload of a successful build response
#[derive(Debug, Clone, Deserialize)]
pub struct BuildData {
    pub transaction: ExecutableTransaction,
}

/// Response envelope shared by the quote and build endpoints
///
/// A 200 response with `success: false` is a valid rejection, not a
/// transport error.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Case-insensitive address comparison; quote responses do not always
/// preserve the checksum casing of the request
pub fn same_token(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Parse a wire amount (base-10 integer string) into its smallest-unit value
pub fn parse_amount(raw: &str) -> Option<u128> {
    raw.parse::<u128>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quote_json() -> &'static str {
        r#"{
            "chainId": 146,
            "inToken": "0x039e2fB66102314Ce7b64Ce5Ce3E5183bc94aD38",
            "outToken": "0x29219dd400f2bf60e5a23d13be72b486d4038894",
            "inAmount": "1000000000000000000",
            "inDecimals": 18,
            "outDecimals": 6,
            "outAmount": "703174",
            "minReceived": "696212",
            "bestRoute": [
                {
                    "percent": 100,
                    "hops": [
                        {
                            "inToken": "0x039e2fB66102314Ce7b64Ce5Ce3E5183bc94aD38",
                            "inDecimals": 18,
                            "outToken": "0x29219dd400f2bf60e5a23d13be72b486d4038894",
                            "outDecimals": 6,
                            "exchanges": [
                                {
                                    "exchange": "shadow-v3",
                                    "inAmount": "1000000000000000000",
                                    "outAmount": "703174",
                                    "percent": 100,
                                    "poolAddress": "0xdeadbeef00000000000000000000000000000000",
                                    "fee": 500
                                }
                            ]
                        }
                    ]
                }
            ],
            "contractAddress": "0x1111111111111111111111111111111111111111",
            "contractMethod": "swap",
            "blockNumber": 42042042,
            "pathVisualization": {"nodes": []}
        }"#
    }

    #[test]
    fn test_quote_deserializes_with_unknown_fields() {
        let quote: Quote = serde_json::from_str(sample_quote_json()).unwrap();
        assert_eq!(quote.chain_id, 146);
        assert_eq!(quote.out_amount, "703174");
        assert_eq!(quote.best_route.paths.len(), 1);
        assert_eq!(quote.best_route.paths[0].hops[0].exchanges[0].exchange, "shadow-v3");
        // top-level unknowns land in `extra`
        assert!(quote.extra.contains_key("pathVisualization"));
    }

    #[test]
    fn test_quote_round_trips_opaque_routing_data() {
        let quote: Quote = serde_json::from_str(sample_quote_json()).unwrap();
        let value = serde_json::to_value(&quote).unwrap();
        // exchange-specific fields survive the round trip untouched
        assert_eq!(
            value["bestRoute"][0]["hops"][0]["exchanges"][0]["poolAddress"],
            "0xdeadbeef00000000000000000000000000000000"
        );
        assert_eq!(value["bestRoute"][0]["hops"][0]["exchanges"][0]["fee"], 500);
        assert_eq!(value["pathVisualization"]["nodes"], serde_json::json!([]));
    }

    #[test]
    fn test_min_received_matches_slippage_within_rounding() {
        let quote: Quote = serde_json::from_str(sample_quote_json()).unwrap();
        let out = parse_amount(&quote.out_amount).unwrap();
        let min = parse_amount(&quote.min_received).unwrap();
        assert!(min <= out);
        // 1% slippage: minReceived within one unit of out * 0.99
        let expected = out * 99 / 100;
        assert!(min.abs_diff(expected) <= 1, "min={} expected={}", min, expected);
    }

    #[test]
    fn test_envelope_failure_carries_message() {
        let raw = r#"{"success": false, "message": "no route found", "timestamp": "2025-03-01T00:00:00Z"}"#;
        let envelope: ApiEnvelope<Quote> = serde_json::from_str(raw).unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("no route found"));
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = SwapRequest {
            chain_id: 146,
            in_token: "0xA".to_string(),
            out_token: "0xB".to_string(),
            in_amount: "1".to_string(),
            slippage: 1.0,
            ref_code: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["chainId"], 146);
        assert_eq!(value["inAmount"], "1");
        assert!(value.get("refCode").is_none());
    }

    #[test]
    fn test_same_token_ignores_checksum_case() {
        assert!(same_token(
            "0x039e2fB66102314Ce7b64Ce5Ce3E5183bc94aD38",
            "0x039E2FB66102314CE7B64CE5CE3E5183BC94AD38"
        ));
        assert!(!same_token("0xA", "0xB"));
    }
}
