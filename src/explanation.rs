//! Copy shown under the KPIs when the optimized scenario is active.
//!
//! The figures in the prose are literals; they are not derived from the
//! catalog.

use crate::scenario::Scenario;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const EXPLANATION_HEADING: &str = "🧠 Explicación del modelo de optimización";

pub const EXPLANATION_BODY: &str = "\
La solución propuesta por la Inteligencia Artificial se basa en el análisis de los tres benchmarks desarrollados en este estudio: productivo, energético y ambiental.

En primer lugar, el benchmark productivo demuestra que es posible aumentar significativamente la eficiencia operativa de la terminal, alcanzando 45,85 GMPH y reduciendo el tiempo de estancia de los buques en un 25,2%. Sin embargo, esta mejora implica un incremento del 31% tanto en el consumo energético como en las emisiones de CO2, lo que lo convierte en un escenario poco sostenible.

Por otro lado, el benchmark energético reduce el consumo en un 16,9%, lo que conlleva una disminución proporcional de emisiones. No obstante, este escenario no mejora la productividad operativa.

Finalmente, el benchmark ambiental consigue reducir las emisiones sin afectar a la productividad ni al consumo energético.

Ante estos resultados, la IA propone un escenario híbrido que equilibra los tres enfoques:

• Productividad eficiente (40 GMPH)  \n\
• Menor consumo energético (30 GWh)  \n\
• Reducción de emisiones (9.500 t CO2)  \n\
\n\
Este enfoque maximiza la eficiencia global de la terminal, evitando trade-offs extremos.";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Explanation {
    pub heading: String,
    pub body: String,
}

pub fn render_explanation(effective: Scenario) -> Option<Explanation> {
    effective.is_optimized().then(|| Explanation {
        heading: EXPLANATION_HEADING.to_string(),
        body: EXPLANATION_BODY.to_string(),
    })
}
