//! Data types exchanged with the extraction API

mod api;
mod restaurant;

pub use api::{
    EndpointHealthReport, ExtractionRequest, HealthResponse, ScrapeOptions, ScrapeResponse,
    ServiceStatus,
};
pub use restaurant::{Coordinates, ExtractedRestaurantData};
