//! Respiratory-illness networks from two clinics with overlapping models.
//!
//! The first clinic models influenza as the driving cause; the second
//! attributes the same symptoms to colds, smoking, and asthma. Six events
//! are shared, and `Fever` ends up conditioned on a private cause in both
//! sources.

use crate::engine::errors::ModelError;
use crate::engine::network::BayesNet;

use super::ScenarioNetworks;

pub(super) fn networks() -> Result<ScenarioNetworks, ModelError> {
    let mut first = BayesNet::default();
    first.create_event("Influenza")?;
    first.create_event("Sore Throat")?;
    first.create_event("Fever")?;
    first.create_dependency("Influenza", "Sore Throat")?;
    first.create_dependency("Influenza", "Fever")?;

    first.create_event("Smokes")?;
    first.create_event("Bronchitis")?;
    first.create_dependency("Influenza", "Bronchitis")?;
    first.create_dependency("Smokes", "Bronchitis")?;

    first.create_event("Wheezing")?;
    first.create_event("Coughing")?;
    first.create_dependency("Bronchitis", "Wheezing")?;
    first.create_dependency("Bronchitis", "Coughing")?;
    first.finalize_structure()?;

    first
        .event_mut("Influenza")?
        .table_mut()?
        .add_line(0.05, true, &[])?;

    let table = first.event_mut("Sore Throat")?.table_mut()?;
    table.add_line(0.3, true, &[true])?;
    table.add_line(0.001, true, &[false])?;

    let table = first.event_mut("Fever")?.table_mut()?;
    table.add_line(0.9, true, &[true])?;
    table.add_line(0.05, true, &[false])?;

    let table = first.event_mut("Bronchitis")?.table_mut()?;
    table.add_line(0.99, true, &[true, true])?;
    table.add_line(0.90, true, &[true, false])?;
    table.add_line(0.7, true, &[false, true])?;
    table.add_line(1.0e-4, true, &[false, false])?;

    let table = first.event_mut("Wheezing")?.table_mut()?;
    table.add_line(0.6, true, &[true])?;
    table.add_line(0.001, true, &[false])?;

    first.event_mut("Smokes")?.table_mut()?.add_line(0.2, true, &[])?;

    let table = first.event_mut("Coughing")?.table_mut()?;
    table.add_line(0.8, true, &[true])?;
    table.add_line(0.07, true, &[false])?;

    first.validate()?;

    let mut second = BayesNet::default();
    second.create_event("Smokes")?;
    second.create_event("Sore Throat")?;
    second.create_dependency("Smokes", "Sore Throat")?;

    second.create_event("Cold")?;
    second.create_event("Fever")?;
    second.create_dependency("Cold", "Fever")?;

    second.create_event("Bronchitis")?;
    second.create_dependency("Sore Throat", "Bronchitis")?;

    second.create_event("Wheezing")?;
    second.create_dependency("Bronchitis", "Wheezing")?;

    second.create_event("Asthma")?;
    second.create_event("Coughing")?;
    second.create_dependency("Bronchitis", "Coughing")?;
    second.create_dependency("Asthma", "Coughing")?;
    second.finalize_structure()?;

    let table = second.event_mut("Sore Throat")?.table_mut()?;
    table.add_line(0.7, true, &[true])?;
    table.add_line(0.2, true, &[false])?;

    let table = second.event_mut("Fever")?.table_mut()?;
    table.add_line(0.8, true, &[true])?;
    table.add_line(0.3, true, &[false])?;

    let table = second.event_mut("Bronchitis")?.table_mut()?;
    table.add_line(0.4, true, &[true])?;
    table.add_line(0.001, true, &[false])?;

    let table = second.event_mut("Wheezing")?.table_mut()?;
    table.add_line(0.6, true, &[true])?;
    table.add_line(0.1, true, &[false])?;

    second.event_mut("Smokes")?.table_mut()?.add_line(0.2, true, &[])?;

    let table = second.event_mut("Coughing")?.table_mut()?;
    table.add_line(0.99, true, &[true, true])?;
    table.add_line(0.85, true, &[true, false])?;
    table.add_line(0.5, true, &[false, true])?;
    table.add_line(0.1, true, &[false, false])?;

    second.event_mut("Cold")?.table_mut()?.add_line(0.3, true, &[])?;

    second
        .event_mut("Asthma")?
        .table_mut()?
        .add_line(0.15, true, &[])?;

    second.validate()?;

    Ok((first, second))
}
