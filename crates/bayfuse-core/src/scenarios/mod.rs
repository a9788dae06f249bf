//! Named pairs of example networks that share events and can be merged.
//!
//! Scenarios are resolved through an explicit registry rather than any
//! dynamic lookup: [`all`] lists them, [`find`] resolves a name
//! case-insensitively, and [`Scenario::networks`] builds a fresh,
//! finalized, validated pair on every call.

mod diagnosis;
mod intrusion;
mod simple;
mod tiebreak;

use crate::engine::errors::ModelError;
use crate::engine::network::BayesNet;

/// A freshly built pair of networks ready to merge.
pub type ScenarioNetworks = (BayesNet, BayesNet);

/// A named, self-describing network-pair builder.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    name: &'static str,
    summary: &'static str,
    build: fn() -> Result<ScenarioNetworks, ModelError>,
}

impl Scenario {
    /// The registry name used to select this scenario.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// One-line description of the pair.
    pub fn summary(&self) -> &'static str {
        self.summary
    }

    /// Builds the pair. Both networks come back finalized and validated.
    pub fn networks(&self) -> Result<ScenarioNetworks, ModelError> {
        (self.build)()
    }
}

static SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "simple",
        summary: "two two-node chains sharing one effect",
        build: simple::networks,
    },
    Scenario {
        name: "tiebreak",
        summary: "equal-arity shared prior plus a shared three-parent effect",
        build: tiebreak::networks,
    },
    Scenario {
        name: "diagnosis",
        summary: "respiratory-illness networks from two clinics",
        build: diagnosis::networks,
    },
    Scenario {
        name: "intrusion",
        summary: "security-alert networks with and without an SQL-injection branch",
        build: intrusion::networks,
    },
];

/// All registered scenarios, in presentation order.
pub fn all() -> &'static [Scenario] {
    SCENARIOS
}

/// Resolves a scenario by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS
        .iter()
        .find(|scenario| scenario.name.eq_ignore_ascii_case(name))
}
