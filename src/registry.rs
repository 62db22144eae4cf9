// Strategy registry: (source type, target type) -> strategy, built once at startup
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::strategy::{MappingStrategy, StrategyCatalog};

// One configured route: requests from `source_type` to `target_type` go to the
// strategy registered under `strategy_name`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MappingConfig {
    #[serde(rename = "Strategy", alias = "strategyName", alias = "StrategyName")]
    pub strategy_name: String,
    #[serde(rename = "SourceType", alias = "sourceType")]
    pub source_type: String,
    #[serde(rename = "TargetType", alias = "targetType")]
    pub target_type: String,
}

impl MappingConfig {
    pub fn new(
        strategy_name: impl Into<String>,
        source_type: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            source_type: source_type.into(),
            target_type: target_type.into(),
        }
    }
}

// Composite lookup key, `"{source}->{target}"`. Case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey(String);

impl MappingKey {
    pub fn new(source_type: &str, target_type: &str) -> Self {
        MappingKey(format!("{}->{}", source_type, target_type))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MappingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Default)]
pub struct StrategyRegistry {
    strategies: HashMap<MappingKey, Arc<dyn MappingStrategy>>,
    // registration order, for listing
    order: Vec<MappingKey>,
}

impl StrategyRegistry {
    // One instance per strategy name; on a duplicate key the first entry wins
    pub fn build(
        configs: &[MappingConfig],
        catalog: &StrategyCatalog,
    ) -> Result<Self, ConfigError> {
        let mut instances: HashMap<&str, Arc<dyn MappingStrategy>> = HashMap::new();
        let mut registry = StrategyRegistry::default();

        for config in configs {
            let name = config.strategy_name.as_str();
            let strategy = match instances.get(name) {
                Some(strategy) => Arc::clone(strategy),
                None => {
                    let factory = catalog
                        .resolve(name)
                        .ok_or_else(|| ConfigError::UnknownStrategy(name.to_string()))?;
                    let strategy = factory();
                    instances.insert(name, Arc::clone(&strategy));
                    strategy
                }
            };

            registry.register(&config.source_type, &config.target_type, strategy);
        }

        Ok(registry)
    }

    fn register(&mut self, source_type: &str, target_type: &str, strategy: Arc<dyn MappingStrategy>) {
        match self.strategies.entry(MappingKey::new(source_type, target_type)) {
            Entry::Occupied(existing) => {
                debug!(
                    key = %existing.key(),
                    kept = existing.get().name(),
                    ignored = strategy.name(),
                    "Duplicate mapping key ignored"
                );
            }
            Entry::Vacant(slot) => {
                debug!(key = %slot.key(), strategy = strategy.name(), "Registered mapping");
                self.order.push(slot.key().clone());
                slot.insert(strategy);
            }
        }
    }

    pub fn get(&self, source_type: &str, target_type: &str) -> Option<&Arc<dyn MappingStrategy>> {
        self.strategies.get(&MappingKey::new(source_type, target_type))
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &MappingKey> {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partners::{BookingComMappingStrategy, GoogleMappingStrategy};

    fn default_configs() -> Vec<MappingConfig> {
        vec![
            MappingConfig::new("BookingComMappingStrategy", "Model.Reservation", "Booking.Reservation"),
            MappingConfig::new("BookingComMappingStrategy", "Booking.Reservation", "Model.Reservation"),
            MappingConfig::new("GoogleMappingStrategy", "Model.Reservation", "Google.Reservation"),
            MappingConfig::new("GoogleMappingStrategy", "Google.Reservation", "Model.Reservation"),
        ]
    }

    #[test]
    fn test_mapping_key_format() {
        let key = MappingKey::new("Model.Reservation", "Google.Reservation");
        assert_eq!(key.as_str(), "Model.Reservation->Google.Reservation");
        assert_eq!(key.to_string(), key.as_str());
        assert_ne!(key, MappingKey::new("model.reservation", "Google.Reservation"));
    }

    #[test]
    fn test_build_indexes_every_entry() {
        let registry = StrategyRegistry::build(&default_configs(), &StrategyCatalog::builtin()).unwrap();

        assert_eq!(registry.len(), 4);
        assert_eq!(
            registry.get("Booking.Reservation", "Model.Reservation").unwrap().name(),
            BookingComMappingStrategy::NAME
        );
        assert_eq!(
            registry.get("Model.Reservation", "Google.Reservation").unwrap().name(),
            GoogleMappingStrategy::NAME
        );
        assert!(registry.get("Model.Reservation", "Expedia.Reservation").is_none());
        assert!(registry.get("model.reservation", "Google.Reservation").is_none());

        let keys: Vec<&str> = registry.keys().map(MappingKey::as_str).collect();
        assert_eq!(keys[0], "Model.Reservation->Booking.Reservation");
        assert_eq!(keys[3], "Google.Reservation->Model.Reservation");
    }

    #[test]
    fn test_no_entries_builds_empty_registry() {
        let registry = StrategyRegistry::build(&[], &StrategyCatalog::builtin()).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.keys().count(), 0);

        let registry = StrategyRegistry::build(&default_configs(), &StrategyCatalog::builtin()).unwrap();
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_same_name_shares_one_instance() {
        let registry = StrategyRegistry::build(&default_configs(), &StrategyCatalog::builtin()).unwrap();

        let outbound = registry.get("Model.Reservation", "Booking.Reservation").unwrap();
        let inbound = registry.get("Booking.Reservation", "Model.Reservation").unwrap();
        assert!(Arc::ptr_eq(outbound, inbound));
    }

    #[test]
    fn test_duplicate_key_keeps_first_registration() {
        let configs = vec![
            MappingConfig::new("GoogleMappingStrategy", "Partner.Reservation", "Model.Reservation"),
            MappingConfig::new("BookingComMappingStrategy", "Partner.Reservation", "Model.Reservation"),
        ];

        let registry = StrategyRegistry::build(&configs, &StrategyCatalog::builtin()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get("Partner.Reservation", "Model.Reservation").unwrap().name(),
            GoogleMappingStrategy::NAME
        );
    }

    #[test]
    fn test_unknown_strategy_fails_build() {
        let mut configs = default_configs();
        configs.push(MappingConfig::new("ExpediaMappingStrategy", "Expedia.Reservation", "Model.Reservation"));

        let err = StrategyRegistry::build(&configs, &StrategyCatalog::builtin()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownStrategy(ref name) if name == "ExpediaMappingStrategy"));
    }

    #[test]
    fn test_config_entry_accepts_both_key_styles() {
        let pascal: MappingConfig = serde_json::from_str(
            r#"{"Strategy": "GoogleMappingStrategy", "SourceType": "A", "TargetType": "B"}"#,
        )
        .unwrap();
        let camel: MappingConfig = serde_json::from_str(
            r#"{"strategyName": "GoogleMappingStrategy", "sourceType": "A", "targetType": "B"}"#,
        )
        .unwrap();
        assert_eq!(pascal, camel);
    }
}
