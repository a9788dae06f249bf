//! Security-alert networks for a monitored installation.
//!
//! Both analysts model the same alerting pipeline (phishing, firewall
//! maintenance, DDoS exposure, activity logging); the second additionally
//! tracks an SQL-injection branch feeding the alert. Every shared event
//! keeps its parents inside the shared set except `Alert`, whose second
//! model gains the extra detector parent.

use crate::engine::errors::ModelError;
use crate::engine::network::BayesNet;

use super::ScenarioNetworks;

/// Builds the events and dependencies both analysts agree on. The second
/// network extends this before finalization.
fn common_structure() -> Result<BayesNet, ModelError> {
    let mut net = BayesNet::default();

    // Alert is the sink every branch feeds.
    net.create_event("Alert")?;

    // Phishing branch
    net.create_event("Phishing")?;
    net.create_event("Email")?;
    net.create_event("Phishing Detected")?;
    net.create_dependency("Phishing", "Phishing Detected")?;
    net.create_dependency("Email", "Phishing Detected")?;
    net.create_dependency("Phishing Detected", "Alert")?;

    // Maintenance branch
    net.create_event("Maintenance")?;
    net.create_event("Firewall")?;
    net.create_dependency("Maintenance", "Firewall")?;
    net.create_event("Maintenance Info Outdated")?;
    net.create_event("Network Protected")?;
    net.create_dependency("Firewall", "Network Protected")?;
    net.create_dependency("Maintenance Info Outdated", "Network Protected")?;
    net.create_dependency("Network Protected", "Alert")?;

    // Work day branch
    net.create_event("Work Day")?;
    net.create_event("DDoS Chance")?;
    net.create_dependency("Work Day", "DDoS Chance")?;
    net.create_dependency("DDoS Chance", "Alert")?;

    // Activity branch
    net.create_event("Activity")?;
    net.create_event("Logged")?;
    net.create_dependency("Activity", "Logged")?;
    net.create_dependency("Logged", "Alert")?;

    Ok(net)
}

/// Fills the tables of the shared events (everything except `Alert`).
fn add_common_tables(net: &mut BayesNet) -> Result<(), ModelError> {
    // Phishing branch
    net.event_mut("Phishing")?.table_mut()?.add_line(0.2, true, &[])?;
    net.event_mut("Email")?.table_mut()?.add_line(0.1, true, &[])?;
    let table = net.event_mut("Phishing Detected")?.table_mut()?;
    table.add_line(0.99, true, &[true, true])?;
    table.add_line(0.967, true, &[true, false])?;
    table.add_line(0.15, true, &[false, true])?;
    table.add_line(0.0165, true, &[false, false])?;

    // Maintenance branch
    net.event_mut("Maintenance")?.table_mut()?.add_line(0.2, true, &[])?;
    let table = net.event_mut("Firewall")?.table_mut()?;
    table.add_line(0.95, true, &[true])?;
    table.add_line(1.00, true, &[false])?;

    net.event_mut("Maintenance Info Outdated")?
        .table_mut()?
        .add_line(0.02, true, &[])?;
    let table = net.event_mut("Network Protected")?.table_mut()?;
    table.add_line(0.9, true, &[true, true])?;
    table.add_line(1.0, true, &[true, false])?;
    table.add_line(0.0, true, &[false, true])?;
    table.add_line(0.01, true, &[false, false])?;

    // Work day branch
    net.event_mut("Work Day")?.table_mut()?.add_line(0.72, true, &[])?;
    let table = net.event_mut("DDoS Chance")?.table_mut()?;
    table.add_line(0.01, true, &[true])?;
    table.add_line(0.10, true, &[false])?;

    // Activity branch
    net.event_mut("Activity")?.table_mut()?.add_line(0.9, true, &[])?;
    let table = net.event_mut("Logged")?.table_mut()?;
    table.add_line(0.3, true, &[true])?;
    table.add_line(0.7, true, &[false])?;

    Ok(())
}

pub(super) fn networks() -> Result<ScenarioNetworks, ModelError> {
    let mut first = common_structure()?;
    first.finalize_structure()?;
    add_common_tables(&mut first)?;

    // Arguments: Phishing Detected, Network Protected, DDoS Chance, Logged
    let alert = first.event_mut("Alert")?.table_mut()?;
    alert.add_line(0.48, true, &[true, true, true, true])?;
    alert.add_line(0.40, true, &[true, true, true, false])?;
    alert.add_line(0.24, true, &[true, true, false, true])?;
    alert.add_line(0.16, true, &[true, true, false, false])?;

    alert.add_line(0.80, true, &[true, false, true, true])?;
    alert.add_line(0.72, true, &[true, false, true, false])?;
    alert.add_line(0.56, true, &[true, false, false, true])?;
    alert.add_line(0.48, true, &[true, false, false, false])?;

    alert.add_line(0.32, true, &[false, true, true, true])?;
    alert.add_line(0.24, true, &[false, true, true, false])?;
    alert.add_line(0.08, true, &[false, true, false, true])?;
    alert.add_line(8.0e-5, true, &[false, true, false, false])?;

    alert.add_line(0.64, true, &[false, false, true, true])?;
    alert.add_line(0.56, true, &[false, false, true, false])?;
    alert.add_line(0.40, true, &[false, false, false, true])?;
    alert.add_line(0.32, true, &[false, false, false, false])?;
    first.validate()?;

    let mut second = common_structure()?;

    // SQL injection branch
    second.create_event("SQL Inject")?;
    second.create_event("SQL Inject Detected")?;
    second.create_dependency("SQL Inject", "SQL Inject Detected")?;
    second.create_dependency("SQL Inject Detected", "Alert")?;
    second.finalize_structure()?;

    add_common_tables(&mut second)?;
    second
        .event_mut("SQL Inject")?
        .table_mut()?
        .add_line(0.2, true, &[])?;
    let table = second.event_mut("SQL Inject Detected")?.table_mut()?;
    table.add_line(0.9, true, &[true])?;
    table.add_line(0.1, true, &[false])?;

    // Arguments: Phishing Detected, Network Protected, DDoS Chance, Logged,
    // SQL Inject Detected
    let alert = second.event_mut("Alert")?.table_mut()?;
    alert.add_line(0.52, true, &[true, true, true, true, true])?;
    alert.add_line(0.40, true, &[true, true, true, true, false])?;
    alert.add_line(0.48, true, &[true, true, true, false, true])?;
    alert.add_line(0.36, true, &[true, true, true, false, false])?;
    alert.add_line(0.28, true, &[true, true, false, true, true])?;
    alert.add_line(0.16, true, &[true, true, false, true, false])?;
    alert.add_line(0.24, true, &[true, true, false, false, true])?;
    alert.add_line(0.12, true, &[true, true, false, false, false])?;

    alert.add_line(0.80, true, &[true, false, true, true, true])?;
    alert.add_line(0.68, true, &[true, false, true, true, false])?;
    alert.add_line(0.76, true, &[true, false, true, false, true])?;
    alert.add_line(0.64, true, &[true, false, true, false, false])?;
    alert.add_line(0.56, true, &[true, false, false, true, true])?;
    alert.add_line(0.44, true, &[true, false, false, true, false])?;
    alert.add_line(0.52, true, &[true, false, false, false, true])?;
    alert.add_line(0.40, true, &[true, false, false, false, false])?;

    alert.add_line(0.40, true, &[false, true, true, true, true])?;
    alert.add_line(0.28, true, &[false, true, true, true, false])?;
    alert.add_line(0.36, true, &[false, true, true, false, true])?;
    alert.add_line(0.24, true, &[false, true, true, false, false])?;
    alert.add_line(0.16, true, &[false, true, false, true, true])?;
    alert.add_line(0.40, true, &[false, true, false, true, false])?;
    alert.add_line(0.12, true, &[false, true, false, false, true])?;
    alert.add_line(8.0e-5, true, &[false, true, false, false, false])?;

    alert.add_line(0.68, true, &[false, false, true, true, true])?;
    alert.add_line(0.56, true, &[false, false, true, true, false])?;
    alert.add_line(0.64, true, &[false, false, true, false, true])?;
    alert.add_line(0.52, true, &[false, false, true, false, false])?;
    alert.add_line(0.44, true, &[false, false, false, true, true])?;
    alert.add_line(0.32, true, &[false, false, false, true, false])?;
    alert.add_line(0.40, true, &[false, false, false, false, true])?;
    alert.add_line(0.28, true, &[false, false, false, false, false])?;
    second.validate()?;

    Ok((first, second))
}
