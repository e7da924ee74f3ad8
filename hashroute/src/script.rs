//! Scripted replay of navigation events against an in-memory environment.
//!
//! Used by `hashroute replay` and by scenario tests. Each step is one of:
//!
//! - `navigate:<key>`: programmatic navigation through the controller
//! - `external:<fragment>`: fragment changed from outside (address bar)
//! - `back` / `forward`: history traversal
//! - `flush`: deliver queued notifications (deferred dispatch only)

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::controller::{NavigationController, NavigationError};
use crate::core::types::RouteView;
use crate::io::signal::{MemorySignal, NavigationSignal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Navigate(String),
    External(String),
    Back,
    Forward,
    Flush,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unrecognized step '{0}' (expected navigate:<key>, external:<fragment>, back, forward, flush)")]
    Parse(String),

    #[error("step {index} ({step}) failed: {source}")]
    Navigation {
        index: usize,
        step: String,
        source: NavigationError,
    },
}

impl FromStr for Step {
    type Err = ScriptError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Some(key) = raw.strip_prefix("navigate:") {
            return Ok(Self::Navigate(key.to_string()));
        }
        if let Some(fragment) = raw.strip_prefix("external:") {
            return Ok(Self::External(fragment.to_string()));
        }
        match raw {
            "back" => Ok(Self::Back),
            "forward" => Ok(Self::Forward),
            "flush" => Ok(Self::Flush),
            _ => Err(ScriptError::Parse(raw.to_string())),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate(key) => write!(f, "navigate:{key}"),
            Self::External(fragment) => write!(f, "external:{fragment}"),
            Self::Back => f.write_str("back"),
            Self::Forward => f.write_str("forward"),
            Self::Flush => f.write_str("flush"),
        }
    }
}

pub fn parse_steps<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Step>, ScriptError> {
    raw.iter().map(|step| step.as_ref().parse()).collect()
}

/// State observed after one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: String,
    pub fragment: String,
    #[serde(flatten)]
    pub view: RouteView,
}

/// Apply `steps` in order, recording the view after each one.
///
/// Stops at the first failing navigation.
pub fn replay(
    controller: &NavigationController,
    signal: &MemorySignal,
    steps: &[Step],
) -> Result<Vec<StepRecord>, ScriptError> {
    let mut records = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        debug!(index, %step, "replay step");
        match step {
            Step::Navigate(key) => {
                controller
                    .navigate(key)
                    .map_err(|source| ScriptError::Navigation {
                        index,
                        step: step.to_string(),
                        source,
                    })?;
            }
            Step::External(fragment) => signal.external(fragment),
            Step::Back => {
                signal.back();
            }
            Step::Forward => {
                signal.forward();
            }
            Step::Flush => {
                signal.flush();
            }
        }
        records.push(StepRecord {
            step: step.to_string(),
            fragment: signal.read(),
            view: controller.view(),
        });
    }
    Ok(records)
}
