//! Domain layer - Core dashboard logic and entities

pub mod assistant;
pub mod cache;
pub mod chain;
pub mod clock;
pub mod error;
pub mod facility;
pub mod geo;
pub mod locale;
pub mod location;
pub mod market;
pub mod news;
pub mod refresh;
pub mod source;
pub mod weather;

pub use assistant::TextCompletion;
pub use cache::{CacheEntry, CacheKey, CachePayload, CacheStore, DataKind, SourceStatus};
pub use chain::{ChainOutcome, FallbackChain, Producer, StepOutcome, StepResult};
pub use clock::{Clock, SystemClock};
pub use error::DomainError;
pub use facility::{FacilityAttributes, FacilityKind, LocatedPoi};
pub use geo::{Coordinates, GeoRanker, Located};
pub use locale::Language;
pub use location::{Location, LocationCatalog};
pub use market::{PricePoint, PriceSimulator, PriceUnit, SeedKey, Trend};
pub use news::{Categorizer, Category, CategoryFilter, Item};
pub use refresh::{KeyOutcome, RefreshCycle, RefreshIntervals, RefreshSchedule};
pub use source::SourceAdapter;
pub use weather::{CurrentConditions, DailyForecast, WeatherReport};
