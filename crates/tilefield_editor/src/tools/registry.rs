use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

use super::{EditTool, RectFillTool, RegisteredTool, TileBrushTool, ToolCapabilities, ToolInit};
use crate::error::ConfigurationError;
use crate::settings::ToolReference;

/// Builds a tool for one session
pub type ToolFactory = Box<dyn Fn(&ToolInit<'_>) -> Box<dyn EditTool> + Send + Sync>;

struct ToolRegistration {
    capabilities: ToolCapabilities,
    factory: ToolFactory,
}

/// Registry of every tool type that settings may reference by path.
///
/// When the `bevy` feature is enabled, this type derives `bevy::prelude::Resource`
/// so it can be inserted into a Bevy `App`.
#[derive(Default)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct ToolRegistry {
    tools: BTreeMap<String, ToolRegistration>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ToolRegistry {
    /// Registry holding the brush and rectangle fill tools
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::default();
        registry.register::<TileBrushTool>();
        registry.register::<RectFillTool>();
        registry
    }

    /// Register a tool type under its `TYPE_PATH`
    pub fn register<T: RegisteredTool>(&mut self) -> &mut Self {
        self.register_fn(T::TYPE_PATH, T::CAPABILITIES, |init| Box::new(T::create(init)))
    }

    /// Register a factory under an arbitrary path. A later registration
    /// replaces an earlier one with the same path.
    pub fn register_fn(
        &mut self,
        type_path: impl Into<String>,
        capabilities: ToolCapabilities,
        factory: impl Fn(&ToolInit<'_>) -> Box<dyn EditTool> + Send + Sync + 'static,
    ) -> &mut Self {
        let type_path = type_path.into();
        debug!("Registering tool '{}'", type_path);
        let previous = self.tools.insert(
            type_path.clone(),
            ToolRegistration {
                capabilities,
                factory: Box::new(factory),
            },
        );
        if previous.is_some() {
            warn!("Tool '{}' was registered twice; keeping the latest", type_path);
        }
        self
    }

    pub fn contains(&self, type_path: &str) -> bool {
        self.tools.contains_key(type_path)
    }

    pub fn type_paths(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn capabilities_of(&self, type_path: &str) -> Option<ToolCapabilities> {
        self.tools.get(type_path).map(|r| r.capabilities)
    }

    /// Paths a settings author can pick for a reference with the given base.
    ///
    /// `base` names a capability; with no base every registered path is a
    /// candidate.
    pub fn candidates(&self, base: Option<&str>) -> Result<Vec<&str>, ConfigurationError> {
        let required = match base {
            None => ToolCapabilities::NONE,
            Some(name) => ToolCapabilities::from_name(name)
                .ok_or_else(|| ConfigurationError::UnknownCapability(name.to_string()))?,
        };
        Ok(self
            .tools
            .iter()
            .filter(|(_, registration)| registration.capabilities.contains(required))
            .map(|(path, _)| path.as_str())
            .collect())
    }

    /// Instantiate one tool
    pub fn resolve(
        &self,
        reference: &ToolReference,
        init: &ToolInit<'_>,
    ) -> Result<Box<dyn EditTool>, ConfigurationError> {
        let registration = self.tools.get(reference.type_path.as_str()).ok_or_else(|| {
            ConfigurationError::UnresolvedTool {
                type_path: reference.type_path.clone(),
            }
        })?;
        Ok((registration.factory)(init))
    }

    /// Instantiate a whole toolset in order. Fails on the first reference
    /// that cannot be resolved, returning no tools at all.
    pub fn instantiate_toolset(
        &self,
        references: &[ToolReference],
        init: &ToolInit<'_>,
    ) -> Result<Vec<Box<dyn EditTool>>, ConfigurationError> {
        references
            .iter()
            .map(|reference| self.resolve(reference, init))
            .collect()
    }
}
