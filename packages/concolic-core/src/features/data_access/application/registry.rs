//! Per-model manager registry
//!
//! The driver registers every model's manager at setup time and swaps them
//! once with `substitute`; views look managers up by model name
//! (`Model.objects`).

use std::collections::BTreeMap;
use std::sync::Arc;

use super::manager::MutationAwareManager;
use crate::errors::{ConcolicError, Result};
use crate::features::data_access::ports::Manager;
use crate::features::mutation::MutationEngine;

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    managers: BTreeMap<String, Arc<dyn Manager>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a manager under its model's name, replacing any previous one
    pub fn register(&mut self, manager: impl Manager + 'static) -> &mut Self {
        let name = manager.model().name.clone();
        self.managers.insert(name, Arc::new(manager));
        self
    }

    /// Builder form of `register`
    pub fn with(mut self, manager: impl Manager + 'static) -> Self {
        self.register(manager);
        self
    }

    /// Manager of a registered model
    pub fn objects(&self, model: &str) -> Result<Arc<dyn Manager>> {
        self.managers
            .get(model)
            .cloned()
            .ok_or_else(|| ConcolicError::store(format!("No manager registered for model '{}'", model)))
    }

    /// Wrap every registered manager so its query sets go through `engine`.
    ///
    /// Each model keeps its own manager binding; only `get_queryset` changes.
    pub fn substitute(&self, engine: &Arc<MutationEngine>) -> Self {
        let managers = self
            .managers
            .iter()
            .map(|(name, manager)| {
                tracing::info!("substituting mutation-aware manager for {}", name);
                let wrapped: Arc<dyn Manager> =
                    Arc::new(MutationAwareManager::new(manager.clone(), engine.clone()));
                (name.clone(), wrapped)
            })
            .collect();
        Self { managers }
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.managers.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}
