use crate::core::registry::StepRegistry;
use crate::core::step::{Step, StepId, StepState};
use crate::error::ConfigError;
use indexmap::IndexSet;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_SIDEBAR_WIDTH: u16 = 30;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DialogConfig {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub initial_step: Option<StepId>,
    #[serde(default)]
    pub reset_on_reopen: bool,
    #[serde(default)]
    pub layout: LayoutConfig,
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
        }
    }
}

fn default_sidebar_width() -> u16 {
    DEFAULT_SIDEBAR_WIDTH
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepConfig {
    pub id: StepId,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub state: Option<StepState>,
    #[serde(default)]
    pub body: Option<String>,
}

impl DialogConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&raw)?;
        tracing::info!(path = %path.display(), steps = config.steps.len(), "loaded dialog config");
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::NoSteps);
        }
        let mut ids = IndexSet::with_capacity(self.steps.len());
        for step in &self.steps {
            if !ids.insert(step.id.as_str()) {
                return Err(ConfigError::DuplicateStepId(step.id.clone()));
            }
        }
        if let Some(initial) = self.initial_step.as_deref()
            && !ids.contains(initial)
        {
            return Err(ConfigError::UnknownInitialStep(initial.to_owned()));
        }
        Ok(())
    }

    /// Step bodies become the content; a step without a body renders the
    /// dialog's empty-content placeholder.
    pub fn to_registry(&self) -> StepRegistry<Option<String>> {
        self.steps
            .iter()
            .map(|step| {
                let mut out = Step::new(step.id.clone(), step.label.clone(), step.body.clone());
                out.description = step.description.clone();
                out.icon = step.icon.clone();
                out.state = step.state;
                out
            })
            .collect::<Vec<_>>()
            .into()
    }
}
