//! Two minimal chains, `A -> B` and `C -> B`, agreeing only on `B`.
//!
//! Neither source sees the other's cause of `B`, so the merge has to union
//! the parents and combine the two tables.

use crate::engine::errors::ModelError;
use crate::engine::network::BayesNet;

use super::ScenarioNetworks;

pub(super) fn networks() -> Result<ScenarioNetworks, ModelError> {
    let mut first = BayesNet::default();
    first.create_event("A")?;
    first.create_event("B")?;
    first.create_dependency("A", "B")?;
    first.finalize_structure()?;

    first.event_mut("A")?.table_mut()?.add_line(0.3, true, &[])?;
    let table = first.event_mut("B")?.table_mut()?;
    table.add_line(0.6, true, &[true])?;
    table.add_line(0.2, true, &[false])?;
    first.validate()?;

    let mut second = BayesNet::default();
    second.create_event("C")?;
    second.create_event("B")?;
    second.create_dependency("C", "B")?;
    second.finalize_structure()?;

    second.event_mut("C")?.table_mut()?.add_line(0.5, true, &[])?;
    let table = second.event_mut("B")?.table_mut()?;
    table.add_line(0.3, true, &[true])?;
    table.add_line(0.8, true, &[false])?;
    second.validate()?;

    Ok((first, second))
}
