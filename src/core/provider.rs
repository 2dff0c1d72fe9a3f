//! Cofactr parts API client
//!
//! Issues one blocking `GET /products/` per part lookup. The client does not
//! retry; any failure other than "no match" is returned as an
//! [`UpstreamError`] and ends the run.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::core::config::Credentials;
use crate::core::strategy::SearchStrategy;
use crate::entities::{PartMatch, PriceBreak};

const PRODUCT_SCHEMA: &str = "product-offers-v0";

/// Longest response body echoed back in an error message
const MAX_ERROR_BODY: usize = 200;

/// Errors from the pricing API that invalidate the whole report
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("credentials rejected (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("rate limited (HTTP 429)")]
    RateLimited,

    #[error("unexpected HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

/// A single part search against the pricing API
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartQuery {
    pub part_number: String,
    pub manufacturer: String,
    pub strategy: SearchStrategy,
}

impl PartQuery {
    /// Build a query. The manufacturer is dropped for strategies that ignore
    /// it, so equivalent searches compare equal.
    pub fn new(part_number: &str, manufacturer: &str, strategy: SearchStrategy) -> Self {
        let manufacturer = if strategy.uses_manufacturer() {
            manufacturer.to_string()
        } else {
            String::new()
        };

        Self {
            part_number: part_number.to_string(),
            manufacturer,
            strategy,
        }
    }

    /// Free-text `q` parameter
    pub fn text(&self) -> String {
        self.strategy.query_text(&self.part_number, &self.manufacturer)
    }
}

impl std::fmt::Display for PartQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.manufacturer.is_empty() {
            write!(f, "{}", self.part_number)
        } else {
            write!(f, "{} ({})", self.part_number, self.manufacturer)
        }
    }
}

/// Source of part matches
///
/// `Ok(None)` means the API answered but had no match for the query.
pub trait PartLookup {
    fn lookup(&mut self, query: &PartQuery) -> Result<Option<PartMatch>, UpstreamError>;
}

/// Blocking client for the Cofactr products endpoint
pub struct CofactrClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl CofactrClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn products_url(&self) -> String {
        format!("{}/products/", self.base_url)
    }
}

impl PartLookup for CofactrClient {
    fn lookup(&mut self, query: &PartQuery) -> Result<Option<PartMatch>, UpstreamError> {
        let text = query.text();
        tracing::debug!(q = %text, strategy = query.strategy.query_value(), "Searching Cofactr");

        let response = self
            .http
            .get(self.products_url())
            .header("X-API-KEY", &self.credentials.api_key)
            .header("X-CLIENT-ID", &self.credentials.client_id)
            .query(&[
                ("q", text.as_str()),
                ("search_strategy", query.strategy.query_value()),
                ("schema", PRODUCT_SCHEMA),
                ("external", "true"),
                ("limit", "1"),
            ])
            .send()?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(UpstreamError::Unauthorized {
                    status: status.as_u16(),
                });
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(UpstreamError::RateLimited),
            s if !s.is_success() => {
                let body = response.text().unwrap_or_default();
                return Err(UpstreamError::Status {
                    status: s.as_u16(),
                    body: truncate_body(&body),
                });
            }
            _ => {}
        }

        let body = response.text()?;
        parse_search_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<ProductOffer>,
}

#[derive(Debug, Deserialize)]
struct ProductOffer {
    id: String,
    #[serde(default)]
    reference_prices: Option<Vec<ReferencePrice>>,
}

#[derive(Debug, Deserialize)]
struct ReferencePrice {
    quantity: Numeric,
    price: Numeric,
}

/// The API has been seen returning both `1` and `"1"`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl ReferencePrice {
    fn to_price_break(&self) -> Result<PriceBreak, UpstreamError> {
        let qty = self
            .quantity
            .as_f64()
            .filter(|q| q.is_finite() && *q >= 0.0 && q.fract() == 0.0)
            .ok_or_else(|| UpstreamError::InvalidResponse {
                message: format!("bad price break quantity {:?}", self.quantity),
            })?;
        let price = self
            .price
            .as_f64()
            .filter(|p| p.is_finite())
            .ok_or_else(|| UpstreamError::InvalidResponse {
                message: format!("bad price break price {:?}", self.price),
            })?;

        Ok(PriceBreak::new(qty as u64, price))
    }
}

/// Decode a products search body into the first match, if any
fn parse_search_response(body: &str) -> Result<Option<PartMatch>, UpstreamError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| UpstreamError::InvalidResponse {
            message: e.to_string(),
        })?;

    let Some(offer) = response.data.into_iter().next() else {
        return Ok(None);
    };

    let breaks = offer
        .reference_prices
        .unwrap_or_default()
        .iter()
        .map(ReferencePrice::to_price_break)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(PartMatch::new(offer.id, breaks)))
}

fn truncate_body(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
