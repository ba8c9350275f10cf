//! Request and response types of the HTTP surface

pub mod dashboard;
pub mod error;
pub mod json;

pub use dashboard::{
    AssistantRequest, FacilitiesResponse, LocationQuery, LocationsResponse, MarketPricesResponse,
    NewsQuery, NewsResponse, StatusResponse, WeatherResponse,
};
pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;
