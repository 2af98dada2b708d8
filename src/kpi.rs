//! KPI readouts.

use crate::scenario::ScenarioParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const KPI_HEADING: &str = "📊 Indicadores KPI";

pub const LABEL_THROUGHPUT: &str = "GMPH";
pub const LABEL_ENERGY: &str = "Energía (GWh/año)";
pub const LABEL_CO2: &str = "CO2 (ton/año)";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metric {
    pub label: String,
    pub value: f64,
}

impl Metric {
    fn new(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }

    /// Shortest decimal that round-trips (`33.90` shows as `33.9`, `11203.0` as `11203`).
    pub fn display_value(&self) -> String {
        format!("{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KpiPanel {
    pub heading: String,
    /// Throughput, energy, emissions; always in that order.
    pub metrics: [Metric; 3],
}

pub fn render_kpis(params: &ScenarioParams) -> KpiPanel {
    KpiPanel {
        heading: KPI_HEADING.to_string(),
        metrics: [
            Metric::new(LABEL_THROUGHPUT, params.throughput_gmph),
            Metric::new(LABEL_ENERGY, params.energy_gwh_per_year),
            Metric::new(LABEL_CO2, params.co2_tons_per_year),
        ],
    }
}
