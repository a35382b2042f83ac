use crate::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One collected tweet, kept exactly as the API returned it.
///
/// Every accessor is an explicit presence check: a field that is missing or
/// carries an unexpected JSON type reads as absent, so consumers skip the post
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostRecord(Value);

impl PostRecord {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn id(&self) -> Option<u64> {
        self.0.get("id").and_then(Value::as_u64)
    }

    pub fn full_text(&self) -> Option<&str> {
        self.0.get("full_text").and_then(Value::as_str)
    }

    /// Hashtag texts in entity order, without the leading `#`.
    pub fn hashtags(&self) -> impl Iterator<Item = &str> {
        self.0
            .get("entities")
            .and_then(|entities| entities.get("hashtags"))
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|tag| tag.get("text").and_then(Value::as_str))
    }

    pub fn raw(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for PostRecord {
    fn from(raw: Value) -> Self {
        Self(raw)
    }
}

/// Circular geographic bound: centre point plus radius in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCode {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl fmt::Display for GeoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}km", self.latitude, self.longitude, self.radius_km)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub geocode: GeoCode,
    pub lang: String,
    /// Request `tweet_mode=extended` so statuses carry `full_text`.
    pub extended: bool,
}

impl SearchParams {
    pub const SERVICE_DELIVERY_QUERY: &'static str = "(#servicedelivery OR #municipality OR #eskom OR #citypower OR #joburgwater) AND (complaint OR issue OR problem)";

    /// Service delivery complaints within 30km of central Johannesburg.
    pub fn service_delivery_johannesburg() -> Self {
        Self {
            query: Self::SERVICE_DELIVERY_QUERY.to_string(),
            geocode: GeoCode {
                latitude: -26.2041,
                longitude: 28.0473,
                radius_km: 30.0,
            },
            lang: "en".to_string(),
            extended: true,
        }
    }
}

/// A paginated source of posts.
///
/// `Ok(None)` and `Ok(Some(vec![]))` both mean the source is exhausted.
pub trait PageSource {
    async fn next_page(&mut self) -> Result<Option<Vec<PostRecord>>, CoreError>;
}
