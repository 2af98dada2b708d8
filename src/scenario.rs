//! Scenario names and the constant catalog.
//!
//! Two closed sets:
//! - [`Scenario`]: every entry of the catalog (what gets rendered).
//! - [`Benchmark`]: the options offered by the selector. The optimized
//!   scenario is reached through the session's AI override, not the selector.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Scenario {
    Baseline,
    Productivo,
    Energetico,
    Ambiental,
    OptimizadoIa,
}

/// KPI and animation constants for one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScenarioParams {
    /// Gross moves per hour.
    pub throughput_gmph: f64,
    pub energy_gwh_per_year: f64,
    pub co2_tons_per_year: f64,
    /// Crane sway angular multiplier.
    pub animation_speed: f64,
    pub smoke_count: usize,
    pub co2_bubble_count: usize,
}

const BASELINE: ScenarioParams = ScenarioParams {
    throughput_gmph: 35.0,
    energy_gwh_per_year: 33.90,
    co2_tons_per_year: 11203.0,
    animation_speed: 1.5,
    smoke_count: 4,
    co2_bubble_count: 4,
};

const PRODUCTIVO: ScenarioParams = ScenarioParams {
    throughput_gmph: 45.85,
    energy_gwh_per_year: 44.42,
    co2_tons_per_year: 14676.0,
    animation_speed: 3.0,
    smoke_count: 7,
    co2_bubble_count: 7,
};

const ENERGETICO: ScenarioParams = ScenarioParams {
    throughput_gmph: 35.0,
    energy_gwh_per_year: 28.16,
    co2_tons_per_year: 9310.0,
    animation_speed: 1.2,
    smoke_count: 2,
    co2_bubble_count: 2,
};

const AMBIENTAL: ScenarioParams = ScenarioParams {
    throughput_gmph: 35.0,
    energy_gwh_per_year: 33.90,
    co2_tons_per_year: 10172.0,
    animation_speed: 1.5,
    smoke_count: 4,
    co2_bubble_count: 1,
};

const OPTIMIZADO_IA: ScenarioParams = ScenarioParams {
    throughput_gmph: 40.0,
    energy_gwh_per_year: 30.0,
    co2_tons_per_year: 9500.0,
    animation_speed: 2.0,
    smoke_count: 3,
    co2_bubble_count: 2,
};

impl Scenario {
    /// Catalog lookup. Total over the enum.
    pub fn params(self) -> &'static ScenarioParams {
        match self {
            Scenario::Baseline => &BASELINE,
            Scenario::Productivo => &PRODUCTIVO,
            Scenario::Energetico => &ENERGETICO,
            Scenario::Ambiental => &AMBIENTAL,
            Scenario::OptimizadoIa => &OPTIMIZADO_IA,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scenario::Baseline => "Baseline",
            Scenario::Productivo => "Productivo",
            Scenario::Energetico => "Energético",
            Scenario::Ambiental => "Ambiental",
            Scenario::OptimizadoIa => "Optimizado IA",
        }
    }

    /// Stable ASCII key used on the wire and in the CLI.
    pub fn key(self) -> &'static str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::Productivo => "productivo",
            Scenario::Energetico => "energetico",
            Scenario::Ambiental => "ambiental",
            Scenario::OptimizadoIa => "optimizado_ia",
        }
    }

    pub fn all() -> &'static [Scenario] {
        &[
            Scenario::Baseline,
            Scenario::Productivo,
            Scenario::Energetico,
            Scenario::Ambiental,
            Scenario::OptimizadoIa,
        ]
    }

    pub fn is_optimized(self) -> bool {
        self == Scenario::OptimizadoIa
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Scenario {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Scenario::all()
            .iter()
            .copied()
            .find(|sc| normalize(sc.key()) == wanted || normalize(sc.label()) == wanted)
            .ok_or_else(|| ParseScenarioError {
                input: s.to_string(),
            })
    }
}

/// Selector options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Benchmark {
    #[default]
    Baseline,
    Productivo,
    Energetico,
    Ambiental,
}

impl Benchmark {
    pub fn all() -> &'static [Benchmark] {
        &[
            Benchmark::Baseline,
            Benchmark::Productivo,
            Benchmark::Energetico,
            Benchmark::Ambiental,
        ]
    }

    pub fn scenario(self) -> Scenario {
        match self {
            Benchmark::Baseline => Scenario::Baseline,
            Benchmark::Productivo => Scenario::Productivo,
            Benchmark::Energetico => Scenario::Energetico,
            Benchmark::Ambiental => Scenario::Ambiental,
        }
    }

    pub fn label(self) -> &'static str {
        self.scenario().label()
    }

    pub fn key(self) -> &'static str {
        self.scenario().key()
    }
}

impl From<Benchmark> for Scenario {
    fn from(b: Benchmark) -> Self {
        b.scenario()
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Benchmark {
    type Err = ParseScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let scenario: Scenario = s.parse()?;
        Benchmark::all()
            .iter()
            .copied()
            .find(|b| b.scenario() == scenario)
            .ok_or_else(|| ParseScenarioError {
                input: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseScenarioError {
    input: String,
}

impl ParseScenarioError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown scenario '{}' (expected baseline|productivo|energetico|ambiental|optimizado_ia)",
            self.input
        )
    }
}

impl std::error::Error for ParseScenarioError {}

// Lowercase, fold the accent in "Energético", treat spaces/dashes as '_'.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            'é' | 'É' => 'e',
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
