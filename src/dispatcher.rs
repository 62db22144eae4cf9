// Dispatcher: routes a payload to the strategy registered for its type pair
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::MappingError;
use crate::model::{is_canonical_shape, Reservation};
use crate::registry::{MappingKey, StrategyRegistry};

// Source types starting with this prefix (any case) denote the canonical model.
pub const CANONICAL_TYPE_PREFIX: &str = "Model";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    // Canonical model -> partner format
    Outbound,
    // Partner format -> canonical model
    Inbound,
}

impl Direction {
    pub fn infer(source_type: &str) -> Self {
        let is_canonical = source_type
            .get(..CANONICAL_TYPE_PREFIX.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(CANONICAL_TYPE_PREFIX));
        if is_canonical {
            Direction::Outbound
        } else {
            Direction::Inbound
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outbound => f.write_str("internal->external"),
            Direction::Inbound => f.write_str("external->internal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MappingOutput {
    Internal(Reservation),
    External(Value),
}

impl MappingOutput {
    pub fn into_json(self) -> Result<Value, MappingError> {
        match self {
            MappingOutput::External(value) => Ok(value),
            MappingOutput::Internal(reservation) => serde_json::to_value(reservation)
                .map_err(|e| MappingError::Conversion(e.to_string())),
        }
    }
}

// Cheap to clone; every clone shares the same read-only registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<StrategyRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self { registry }
    }

    // Only outbound payloads go through the canonical-shape check
    pub fn map(
        &self,
        data: &Value,
        source_type: &str,
        target_type: &str,
    ) -> Result<MappingOutput, MappingError> {
        let strategy = self
            .registry
            .get(source_type, target_type)
            .ok_or_else(|| MappingError::NoStrategy {
                source_type: source_type.to_string(),
                target_type: target_type.to_string(),
            })?;

        let object = data
            .as_object()
            .ok_or_else(|| MappingError::MalformedInput("expected a JSON object".to_string()))?;

        let direction = Direction::infer(source_type);
        debug!(
            key = %MappingKey::new(source_type, target_type),
            %direction,
            strategy = strategy.name(),
            "Dispatching mapping"
        );

        match direction {
            Direction::Outbound => {
                if !is_canonical_shape(object) {
                    return Err(MappingError::ShapeMismatch);
                }
                let reservation = Reservation::from_canonical_json(object)?;
                strategy
                    .to_external(&reservation, target_type)
                    .map(MappingOutput::External)
            }
            Direction::Inbound => strategy
                .to_internal(object, source_type)
                .map(MappingOutput::Internal),
        }
    }

    pub fn map_str(
        &self,
        json: &str,
        source_type: &str,
        target_type: &str,
    ) -> Result<MappingOutput, MappingError> {
        let data: Value =
            serde_json::from_str(json).map_err(|e| MappingError::MalformedInput(e.to_string()))?;
        self.map(&data, source_type, target_type)
    }
}
