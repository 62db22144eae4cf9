// Reservation mapping library: canonical model, partner strategies, registry and dispatcher

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod fields;
pub mod model;
pub mod partners;
pub mod registry;
pub mod server;
pub mod strategy;

// Re-export key types for convenience
pub use config::{AppSettings, Config};
pub use dispatcher::{Direction, Dispatcher, MappingOutput, CANONICAL_TYPE_PREFIX};
pub use error::{ConfigError, MappingError};
pub use model::{Reservation, Room};
pub use partners::{BookingComMappingStrategy, GoogleMappingStrategy};
pub use registry::{MappingConfig, MappingKey, StrategyRegistry};
pub use strategy::{MappingStrategy, StrategyCatalog};
