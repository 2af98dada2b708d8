//! The scenario dashboard: one render cycle.
//!
//! [`Dashboard::render`] reads a [`SessionState`] and produces a
//! [`DashboardView`]; [`Dashboard::cycle`] additionally returns the ticked
//! state. Scheduling the next cycle is the host's job.

use crate::explanation::{render_explanation, Explanation};
use crate::kpi::{render_kpis, KpiPanel};
use crate::logo::LogoAsset;
use crate::scenario::{Benchmark, Scenario};
use crate::scene::{render_frame, Scene};
use crate::session::SessionState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const TITLE: &str = "Gemelo Digital - Terminal APM Barcelona";
pub const SELECTOR_LABEL: &str = "Selecciona escenario:";
pub const OPTIMIZE_LABEL: &str = "Optimizar con IA";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Selector {
    pub label: String,
    pub options: Vec<Benchmark>,
    pub selected: Benchmark,
    pub optimize_label: String,
    pub ai_active: bool,
}

/// Everything a front-end needs to draw one frame of the dashboard.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DashboardView {
    pub title: String,
    pub logo: Option<LogoAsset>,
    pub selector: Selector,
    pub scenario: Scenario,
    pub frame: u64,
    pub scene: Scene,
    pub kpis: KpiPanel,
    pub explanation: Option<Explanation>,
}

/// Session-independent parts of the page (title, logo).
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    logo: Option<LogoAsset>,
}

impl Dashboard {
    pub fn new(logo: Option<LogoAsset>) -> Self {
        Self { logo }
    }

    pub fn logo(&self) -> Option<&LogoAsset> {
        self.logo.as_ref()
    }

    pub fn render(&self, state: &SessionState) -> DashboardView {
        let scenario = state.effective_scenario();
        let params = state.resolve_params();

        DashboardView {
            title: TITLE.to_string(),
            logo: self.logo.clone(),
            selector: Selector {
                label: SELECTOR_LABEL.to_string(),
                options: Benchmark::all().to_vec(),
                selected: state.selected(),
                optimize_label: OPTIMIZE_LABEL.to_string(),
                ai_active: state.ai_active(),
            },
            scenario,
            frame: state.frame(),
            scene: render_frame(params, state.frame()),
            kpis: render_kpis(params),
            explanation: render_explanation(scenario),
        }
    }

    /// Render the current state, then advance the clock.
    pub fn cycle(&self, mut state: SessionState) -> (DashboardView, SessionState) {
        let view = self.render(&state);
        state.tick();
        (view, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Prop;

    #[test]
    fn cycle_renders_then_ticks() {
        let d = Dashboard::new(None);
        let mut state = SessionState::new();
        for expected in 0..10 {
            let (view, next) = d.cycle(state);
            assert_eq!(view.frame, expected);
            assert_eq!(next.frame(), expected + 1);
            state = next;
        }
    }

    #[test]
    fn view_tracks_selection_and_override() {
        let d = Dashboard::new(None);
        let mut state = SessionState::new();
        state.select_scenario(Benchmark::Energetico);

        let view = d.render(&state);
        assert_eq!(view.scenario, Scenario::Energetico);
        assert_eq!(view.kpis.metrics[1].value, 28.16);
        assert_eq!(view.scene.count(Prop::Smoke), 2);
        assert!(view.explanation.is_none());

        state.set_ai_active(true);
        let view = d.render(&state);
        assert_eq!(view.scenario, Scenario::OptimizadoIa);
        assert_eq!(view.selector.selected, Benchmark::Energetico);
        assert!(view.selector.ai_active);
        assert_eq!(view.kpis.metrics[2].value, 9500.0);
        assert!(view.explanation.is_some());
    }

    #[test]
    fn missing_logo_leaves_rest_untouched() {
        let with = Dashboard::new(Some(LogoAsset {
            path: "apm_logo.png".into(),
            width_px: 120,
        }));
        let without = Dashboard::new(LogoAsset::probe("/nonexistent/quaytwin/apm_logo.png"));
        assert!(without.logo().is_none());

        let state = SessionState::new();
        let mut a = with.render(&state);
        let b = without.render(&state);
        assert!(a.logo.is_some());
        a.logo = None;
        assert_eq!(a, b);
    }

    #[test]
    fn selector_lists_benchmarks_only() {
        let view = Dashboard::default().render(&SessionState::new());
        assert_eq!(view.selector.options.len(), 4);
        assert_eq!(view.selector.label, SELECTOR_LABEL);
        assert_eq!(view.title, TITLE);
    }
}
