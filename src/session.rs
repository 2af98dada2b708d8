//! Session-scoped dashboard state.
//!
//! One `SessionState` exists per viewer session. It is owned by whatever runs
//! that session's render loop and is passed by value through
//! [`crate::dashboard::Dashboard::cycle`]; nothing here is global.

use crate::scenario::{Benchmark, Scenario, ScenarioParams};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SessionState {
    frame: u64,
    selected: Benchmark,
    ai_active: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animation clock. Only ever increases.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn selected(&self) -> Benchmark {
        self.selected
    }

    pub fn ai_active(&self) -> bool {
        self.ai_active
    }

    pub fn select_scenario(&mut self, benchmark: Benchmark) {
        self.selected = benchmark;
    }

    /// "Optimizar con IA" override. Persists until cleared.
    pub fn set_ai_active(&mut self, active: bool) {
        self.ai_active = active;
    }

    /// The scenario actually rendered: the AI override wins over the selector.
    pub fn effective_scenario(&self) -> Scenario {
        if self.ai_active {
            Scenario::OptimizadoIa
        } else {
            self.selected.scenario()
        }
    }

    pub fn resolve_params(&self) -> &'static ScenarioParams {
        self.effective_scenario().params()
    }

    pub fn tick(&mut self) {
        self.frame += 1;
    }
}
