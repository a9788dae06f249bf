//! A pair exercising the delete-rule tie-break and the parent union.
//!
//! `B` is shared with no parents on either side and different priors, so
//! only the tie-break decides whose value survives. `C` is shared but each
//! source conditions it on a private cause (`A` vs `D`), which forces a
//! three-parent combined table.

use crate::engine::errors::ModelError;
use crate::engine::network::BayesNet;

use super::ScenarioNetworks;

pub(super) fn networks() -> Result<ScenarioNetworks, ModelError> {
    let mut first = BayesNet::default();
    first.create_event("A")?;
    first.create_event("B")?;
    first.create_event("C")?;
    first.create_dependency("A", "C")?;
    first.create_dependency("B", "C")?;
    first.finalize_structure()?;

    first.event_mut("A")?.table_mut()?.add_line(0.4, true, &[])?;
    first.event_mut("B")?.table_mut()?.add_line(0.3, true, &[])?;
    let table = first.event_mut("C")?.table_mut()?;
    table.add_line(0.9, true, &[true, true])?;
    table.add_line(0.7, true, &[true, false])?;
    table.add_line(0.5, true, &[false, true])?;
    table.add_line(0.1, true, &[false, false])?;
    first.validate()?;

    let mut second = BayesNet::default();
    second.create_event("C")?;
    second.create_event("D")?;
    second.create_event("B")?;
    second.create_dependency("B", "C")?;
    second.create_dependency("D", "C")?;
    second.finalize_structure()?;

    second.event_mut("B")?.table_mut()?.add_line(0.6, true, &[])?;
    second.event_mut("D")?.table_mut()?.add_line(0.7, true, &[])?;
    let table = second.event_mut("C")?.table_mut()?;
    table.add_line(0.8, true, &[true, true])?;
    table.add_line(0.6, true, &[true, false])?;
    table.add_line(0.2, true, &[false, true])?;
    table.add_line(0.01, true, &[false, false])?;
    second.validate()?;

    Ok((first, second))
}
