//! Output module for presenting extraction results and diagnostics
//!
//! This module handles:
//! - Printing an extracted restaurant for review before it is saved
//! - Exporting a reviewed restaurant as markdown
//! - Printing endpoint health reports, statistics, and resolved configuration

mod markdown;
pub mod stats;

pub use markdown::{format_restaurant_markdown, write_restaurant_markdown};
pub use stats::{print_statistics, StatisticsSummary};

use crate::client::ApiInfo;
use crate::models::{EndpointHealthReport, ExtractedRestaurantData};
use crate::storage::RestaurantRecord;

/// Prints an extracted restaurant so an operator can review it
pub fn print_restaurant(data: &ExtractedRestaurantData) {
    println!("=== {} ===\n", data.name);
    println!("  Cuisine:  {}", data.cuisine_summary());
    if !data.price_tier.is_empty() {
        println!("  Price:    {}", data.price_tier);
    }
    match data.rating {
        Some(rating) => println!("  Rating:   {:.1}", rating),
        None => println!("  Rating:   -"),
    }
    if !data.location.is_empty() {
        println!("  Location: {}", data.location);
    }
    if let Some(address) = &data.address {
        println!("  Address:  {}", address);
    }
    if let Some(phone) = &data.phone {
        println!("  Phone:    {}", phone);
    }
    if let Some(website) = &data.website {
        println!("  Website:  {}", website);
    }
    if let Some(description) = &data.description {
        println!("\n{}", description.trim());
    }
    println!();
}

/// Prints the result of probing every endpoint
pub fn print_health_reports(reports: &[EndpointHealthReport]) {
    println!("=== Endpoint Health ===\n");

    for report in reports {
        println!(
            "  {:<40} {:<10} {:>6} ms",
            report.endpoint,
            report.status.as_str(),
            report.response_time_ms
        );
        if let Some(details) = &report.details {
            if let Some(version) = &details.version {
                println!("    version: {}", version);
            }
            if let Some(uptime) = details.uptime {
                println!("    uptime:  {:.0}s", uptime);
            }
        }
        if let Some(error) = &report.error {
            println!("    error:   {}", error);
        }
    }

    let healthy = reports.iter().filter(|r| r.status.is_healthy()).count();
    println!("\n{}/{} endpoints healthy", healthy, reports.len());
}

/// Prints the client's resolved configuration
pub fn print_api_info(info: &ApiInfo) {
    println!("=== Scraping API ===\n");
    println!("  Environment:     {}", info.environment.as_str());
    println!("  Endpoint source: {}", info.endpoint_source);
    println!(
        "  API key:         {}",
        if info.has_api_key { "configured" } else { "missing" }
    );
    println!("  Timeout:         {:?}", info.timeout);
    println!("  Retry delay:     {:?}", info.retry_delay);
    println!("  Health timeout:  {:?}", info.health_timeout);
    println!(
        "  Circuit breaker: open after {} failures, reset after {:?}",
        info.failure_threshold, info.reset_timeout
    );
    println!("\n  Endpoints:");
    for endpoint in &info.endpoints {
        println!("    - {}", endpoint);
    }
}

/// Prints saved restaurants as a compact table
pub fn print_saved_restaurants(records: &[RestaurantRecord], total: u64) {
    println!("=== Saved Restaurants ({} total) ===\n", total);

    for record in records {
        let rating = record
            .data
            .rating
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  [{}] {:<32} {:<24} {:>4}  {}",
            record.id,
            record.data.name,
            record.data.cuisine_summary(),
            rating,
            record.updated_at
        );
    }
}
