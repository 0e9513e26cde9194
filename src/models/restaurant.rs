use serde::{Deserialize, Serialize};

/// Geographic position of a restaurant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: f64,
}

/// Structured restaurant fields returned by the extraction API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedRestaurantData {
    pub name: String,

    #[serde(default)]
    pub cuisines: Vec<String>,

    /// Price tier as shown on the review site (e.g. "$$ - $$$")
    #[serde(default, alias = "priceRange")]
    pub price_tier: String,

    /// Average review score out of 5
    #[serde(default)]
    pub rating: Option<f64>,

    /// City or neighbourhood
    #[serde(default)]
    pub location: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,

    /// Ranking text such as "#12 of 1,204 restaurants in Lyon"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opening_hours: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    /// Page the data was extracted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl ExtractedRestaurantData {
    /// Cuisines joined for display, or "-" when none were found
    pub fn cuisine_summary(&self) -> String {
        if self.cuisines.is_empty() {
            "-".to_string()
        } else {
            self.cuisines.join(", ")
        }
    }
}
