//! # quaytwin
//!
//! Scenario dashboard for a container-terminal digital twin.
//!
//! The crate is the presentational core: a constant scenario catalog, the
//! per-session state, and pure render steps that turn `(state, frame)` into a
//! serializable [`dashboard::DashboardView`]. Hosting (sessions, the frame
//! timer, transport) lives in the `quaytwind` daemon.
//!
//! ## Quick Start
//!
//! ```
//! use quaytwin::prelude::*;
//!
//! let dashboard = Dashboard::new(None);
//! let mut state = SessionState::new();
//! state.select_scenario(Benchmark::Productivo);
//!
//! let (view, next) = dashboard.cycle(state);
//! assert_eq!(view.frame, 0);
//! assert_eq!(next.frame(), 1);
//! assert_eq!(view.kpis.metrics[0].value, 45.85);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization for views and the wire protocol
//!
//! ## Modules
//!
//! - [`scenario`]: Scenario names and the KPI/animation catalog
//! - [`session`]: Session-scoped state (frame clock, selection, AI override)
//! - [`scene`]: Pure frame renderer producing drawing commands
//! - [`kpi`]: Metric readouts
//! - [`explanation`]: Static copy for the optimized scenario
//! - [`logo`]: Best-effort header logo probing
//! - [`dashboard`]: Composition of one render cycle
//! - [`svg`]: Scene export to SVG
//! - [`protocol`]: Newline-delimited JSON messages shared by daemon and CLI

pub mod dashboard;
pub mod explanation;
pub mod kpi;
pub mod logo;
pub mod scenario;
pub mod scene;
pub mod session;
pub mod svg;

#[cfg(feature = "serde")]
pub mod protocol;

pub mod prelude {
    pub use crate::dashboard::{Dashboard, DashboardView, Selector};
    pub use crate::explanation::{render_explanation, Explanation};
    pub use crate::kpi::{render_kpis, KpiPanel, Metric};
    pub use crate::logo::LogoAsset;
    pub use crate::scenario::{Benchmark, ParseScenarioError, Scenario, ScenarioParams};
    pub use crate::scene::{render_frame, Primitive, Prop, Scene, Shape};
    pub use crate::session::SessionState;
    pub use crate::svg::scene_to_svg;
}
