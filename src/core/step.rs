use serde::{Deserialize, Serialize};
use std::fmt;

pub type StepId = String;

/// Visual tag a host may attach to a step. Never read by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    #[default]
    Idle,
    Valid,
    Error,
    Complete,
}

impl StepState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Valid => "valid",
            Self::Error => "error",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for StepState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step<C> {
    pub id: StepId,
    pub label: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub content: C,
    pub state: Option<StepState>,
}

impl<C> Step<C> {
    pub fn new(id: impl Into<StepId>, label: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            icon: None,
            content,
            state: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_state(mut self, state: StepState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    pub fn state_or_idle(&self) -> StepState {
        self.state.unwrap_or_default()
    }
}
