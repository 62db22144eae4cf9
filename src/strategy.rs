// Mapping strategy capability and the compile-time catalog of implementations
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::MappingError;
use crate::model::Reservation;
use crate::partners::{BookingComMappingStrategy, GoogleMappingStrategy};

// One implementation per partner format
pub trait MappingStrategy: Send + Sync + 'static {
    // Name the strategy is registered under in the catalog
    fn name(&self) -> &'static str;

    // Parse a partner JSON object into the canonical model.
    // `source_type` must match the partner's expected source label.
    fn to_internal(
        &self,
        data: &Map<String, Value>,
        source_type: &str,
    ) -> Result<Reservation, MappingError>;

    // Render the canonical model into the partner's JSON shape.
    // `target_type` must match the partner's expected target label.
    fn to_external(
        &self,
        reservation: &Reservation,
        target_type: &str,
    ) -> Result<Value, MappingError>;
}

impl fmt::Debug for dyn MappingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MappingStrategy").field(&self.name()).finish()
    }
}

pub type StrategyFactory = fn() -> Arc<dyn MappingStrategy>;

// Name → constructor table used to resolve configured strategy names.
#[derive(Clone)]
pub struct StrategyCatalog {
    entries: Vec<(&'static str, StrategyFactory)>,
}

impl StrategyCatalog {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::empty()
            .with(BookingComMappingStrategy::NAME, BookingComMappingStrategy::shared)
            .with(GoogleMappingStrategy::NAME, GoogleMappingStrategy::shared)
    }

    // Adds a strategy. A name that is already present keeps the first factory.
    pub fn with(mut self, name: &'static str, factory: StrategyFactory) -> Self {
        if self.resolve(name).is_none() {
            self.entries.push((name, factory));
        }
        self
    }

    pub fn resolve(&self, name: &str) -> Option<StrategyFactory> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, factory)| *factory)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for StrategyCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
