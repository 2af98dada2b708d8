//! Wire protocol between `quaytwind` and its clients.
//!
//! Newline-delimited JSON, one object per line, tagged by `"type"`. A
//! connection is a session: requests mutate that connection's state only.

use serde::{Deserialize, Serialize};

use crate::dashboard::DashboardView;
use crate::scenario::{Benchmark, Scenario, ScenarioParams};

pub const DEFAULT_ADDR: &str = "127.0.0.1:9877";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    ListScenarios,
    /// Render the session's current frame without advancing it.
    GetView,
    GetSvg {
        #[serde(default)]
        width: Option<u32>,
        #[serde(default)]
        height: Option<u32>,
    },
    SelectScenario {
        scenario: Benchmark,
    },
    /// Toggle the "Optimizar con IA" override.
    SetOptimize {
        enabled: bool,
    },
    /// Start or stop streaming one `Frame` per render cycle.
    Watch {
        enabled: bool,
    },
    Shutdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioEntry {
    pub scenario: Scenario,
    pub label: String,
    pub selectable: bool,
    pub params: ScenarioParams,
}

impl ScenarioEntry {
    pub fn catalog() -> Vec<ScenarioEntry> {
        Scenario::all()
            .iter()
            .map(|&scenario| ScenarioEntry {
                scenario,
                label: scenario.label().to_string(),
                selectable: !scenario.is_optimized(),
                params: *scenario.params(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Scenarios { entries: Vec<ScenarioEntry> },
    View(Box<DashboardView>),
    /// Pushed once per cycle while watching.
    Frame(Box<DashboardView>),
    Svg { frame: u64, svg: String },
    Success { message: String },
    Error { message: String },
}
