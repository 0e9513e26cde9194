//! Markdown export of a reviewed restaurant
//!
//! Produces the page an editor pastes into the guide after checking the
//! extracted data.

use crate::models::ExtractedRestaurantData;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a restaurant as markdown
///
/// # Arguments
///
/// * `data` - The extracted restaurant
/// * `source_url` - The review page the data came from, if known
/// * `output_path` - Path where the markdown file should be written
pub fn write_restaurant_markdown(
    data: &ExtractedRestaurantData,
    source_url: Option<&str>,
    output_path: &Path,
) -> std::io::Result<()> {
    let markdown = format_restaurant_markdown(data, source_url);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a restaurant as markdown
pub fn format_restaurant_markdown(data: &ExtractedRestaurantData, source_url: Option<&str>) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", data.name));

    if let Some(description) = &data.description {
        md.push_str(&format!("{}\n\n", description.trim()));
    }

    md.push_str("## Details\n\n");
    md.push_str(&format!("- **Cuisine**: {}\n", data.cuisine_summary()));
    if !data.price_tier.is_empty() {
        md.push_str(&format!("- **Price**: {}\n", data.price_tier));
    }
    if let Some(rating) = data.rating {
        match data.review_count {
            Some(count) => md.push_str(&format!(
                "- **Rating**: {:.1} / 5 ({} reviews)\n",
                rating, count
            )),
            None => md.push_str(&format!("- **Rating**: {:.1} / 5\n", rating)),
        }
    }
    if let Some(ranking) = &data.ranking {
        md.push_str(&format!("- **Ranking**: {}\n", ranking));
    }
    if !data.location.is_empty() {
        md.push_str(&format!("- **Location**: {}\n", data.location));
    }
    if let Some(address) = &data.address {
        md.push_str(&format!("- **Address**: {}\n", address));
    }
    if let Some(phone) = &data.phone {
        md.push_str(&format!("- **Phone**: {}\n", phone));
    }
    if let Some(website) = &data.website {
        md.push_str(&format!("- **Website**: <{}>\n", website));
    }
    if let Some(coordinates) = &data.coordinates {
        md.push_str(&format!(
            "- **Coordinates**: {:.5}, {:.5}\n",
            coordinates.latitude, coordinates.longitude
        ));
    }
    md.push('\n');

    if !data.opening_hours.is_empty() {
        md.push_str("## Opening Hours\n\n");
        for line in &data.opening_hours {
            md.push_str(&format!("- {}\n", line));
        }
        md.push('\n');
    }

    if let Some(url) = source_url.or(data.source_url.as_deref()) {
        md.push_str("---\n\n");
        md.push_str(&format!("*Source: <{}>*\n", url));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_cinq() -> ExtractedRestaurantData {
        serde_json::from_value(serde_json::json!({
            "name": "Le Cinq",
            "cuisines": ["French", "European"],
            "priceRange": "$$$$",
            "rating": 4.5,
            "reviewCount": 2104,
            "location": "Paris",
            "address": "31 Avenue George V, 75008 Paris",
            "openingHours": ["Tue-Sat 12:30-14:00", "Tue-Sat 19:00-22:00"]
        }))
        .unwrap()
    }

    #[test]
    fn test_format_full_restaurant() {
        let md = format_restaurant_markdown(&le_cinq(), Some("https://tripadvisor.com/x"));

        assert!(md.starts_with("# Le Cinq\n"));
        assert!(md.contains("- **Cuisine**: French, European"));
        assert!(md.contains("- **Price**: $$$$"));
        assert!(md.contains("- **Rating**: 4.5 / 5 (2104 reviews)"));
        assert!(md.contains("## Opening Hours"));
        assert!(md.contains("*Source: <https://tripadvisor.com/x>*"));
    }

    #[test]
    fn test_format_minimal_restaurant() {
        let data: ExtractedRestaurantData =
            serde_json::from_str(r#"{"name": "Chez Nous"}"#).unwrap();
        let md = format_restaurant_markdown(&data, None);

        assert!(md.contains("- **Cuisine**: -"));
        assert!(!md.contains("Price"));
        assert!(!md.contains("Rating"));
        assert!(!md.contains("Opening Hours"));
        assert!(!md.contains("Source"));
    }

    #[test]
    fn test_write_markdown_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("le-cinq.md");

        write_restaurant_markdown(&le_cinq(), None, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("# Le Cinq"));
    }
}
