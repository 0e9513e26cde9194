//! URL handling module for Dinescout
//!
//! This module validates that extraction requests point at a supported
//! review site, canonicalizes source URLs, and classifies the kind of page a
//! URL refers to.

mod domain;
mod matcher;
mod normalize;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::extract_domain;
pub use matcher::matches_wildcard;
pub use normalize::normalize_url;

/// The kind of review-site page a URL refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourcePageKind {
    /// A single restaurant's review page
    RestaurantReview,
    /// A restaurant listing for a city or region
    RestaurantListing,
    /// Any other page on the review site
    Other,
}

impl SourcePageKind {
    /// Returns true if the page describes exactly one restaurant
    pub fn is_single_restaurant(&self) -> bool {
        matches!(self, Self::RestaurantReview)
    }
}

/// Classifies a review-site URL by its path
///
/// # Examples
///
/// ```
/// use url::Url;
/// use dinescout::url::{classify_page, SourcePageKind};
///
/// let url = Url::parse(
///     "https://www.tripadvisor.com/Restaurant_Review-g187147-d718469-Reviews-Le_Cinq-Paris.html",
/// )
/// .unwrap();
/// assert_eq!(classify_page(&url), SourcePageKind::RestaurantReview);
/// ```
pub fn classify_page(url: &Url) -> SourcePageKind {
    let path = url.path().trim_start_matches('/');
    if path.starts_with("Restaurant_Review-") {
        SourcePageKind::RestaurantReview
    } else if path.starts_with("Restaurants-") {
        SourcePageKind::RestaurantListing
    } else {
        SourcePageKind::Other
    }
}

/// Returns true if the domain matches any of the allowed patterns
pub fn is_allowed_source(domain: &str, allowed_domains: &[String]) -> bool {
    allowed_domains
        .iter()
        .any(|pattern| matches_wildcard(pattern, domain))
}

/// Validates that a user-supplied URL references a supported review site
///
/// # Arguments
///
/// * `url_str` - The raw URL as typed by the user
/// * `allowed_domains` - Domain patterns accepted as sources
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL, unchanged apart from trimming
/// * `Err(UrlError)` - The URL is empty, malformed, or on another site
pub fn validate_source_url(url_str: &str, allowed_domains: &[String]) -> UrlResult<Url> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    let domain = extract_domain(&url).ok_or(UrlError::MissingDomain)?;
    if !is_allowed_source(&domain, allowed_domains) {
        return Err(UrlError::UnsupportedSource(domain));
    }

    Ok(url)
}
