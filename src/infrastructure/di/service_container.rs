//! Service container for dependency injection
//!
//! Wires up services with their dependencies.

use std::sync::Arc;

use crate::application::services::OutlineService;
use crate::config::Settings;
use crate::infrastructure::traits::{DocumentDeserializer, FileSystem, RealFileSystem};
use crate::infrastructure::yaml::YamlDeserializer;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Document deserializer
    pub deserializer: Arc<dyn DocumentDeserializer>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(YamlDeserializer))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        deserializer: Arc<dyn DocumentDeserializer>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            deserializer,
        }
    }

    /// Outline service configured from the settings.
    pub fn outline_service(&self) -> OutlineService {
        OutlineService::new(
            Arc::clone(&self.fs),
            Arc::clone(&self.deserializer),
            self.settings.max_depth,
        )
    }
}
