//! Bayfuse CLI - build a named scenario, merge its two networks, and print
//! the result.
//!
//! Usage:
//!   bayfuse <scenario>             # merge and print the tables
//!   bayfuse <scenario> -o json     # machine-readable output
//!   bayfuse --list                 # list available scenarios
//!
//! Set RUST_LOG=debug to see the merge pipeline's stage log.

use std::process;

use clap::Parser;

use bayfuse_core::{merge, scenarios, BayesNet, Event};

#[derive(Parser)]
#[command(name = "bayfuse")]
#[command(version)]
#[command(about = "Merge two Bayesian networks from a named scenario")]
struct Cli {
    /// Scenario to build and merge (see --list)
    #[arg(value_name = "SCENARIO")]
    scenario: Option<String>,

    /// Output format: summary, json, or debug
    #[arg(short, long, default_value = "summary", value_name = "FORMAT")]
    output: String,

    /// List available scenarios instead of merging
    #[arg(short, long)]
    list: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.list {
        println!("Available scenarios:");
        for scenario in scenarios::all() {
            println!("  {:<12} {}", scenario.name(), scenario.summary());
        }
        return;
    }

    let Some(name) = &cli.scenario else {
        eprintln!("No scenario given; run with --list to see the choices");
        process::exit(1);
    };
    let Some(scenario) = scenarios::find(name) else {
        eprintln!("Unknown scenario '{}'; run with --list to see the choices", name);
        process::exit(1);
    };

    let (first, second) = match scenario.networks() {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("Error building scenario '{}': {}", scenario.name(), e);
            process::exit(1);
        }
    };

    let merged = match merge(&first, &second) {
        Ok(net) => net,
        Err(e) => {
            eprintln!("Error merging scenario '{}': {}", scenario.name(), e);
            process::exit(1);
        }
    };

    match cli.output.as_str() {
        "json" => {
            let value = serde_json::json!({
                "scenario": scenario.name(),
                "first": network_json(&first),
                "second": network_json(&second),
                "merged": network_json(&merged),
            });
            match serde_json::to_string_pretty(&value) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error serializing to JSON: {}", e);
                    process::exit(1);
                }
            }
        }
        "debug" => {
            println!("{:#?}", merged);
        }
        _ => {
            print_network("BN1", &first);
            print_network("BN2", &second);
            print_network("BNT", &merged);
        }
    }
}

/// Prints every event of a network as a CPT block.
fn print_network(title: &str, net: &BayesNet) {
    println!("{} {{", title);
    for event in net.events() {
        println!("{}", render_event(event));
    }
    println!("}}\n");
}

/// Renders one event: label, parent labels, then one `p 1-p` row per
/// parent assignment.
fn render_event(event: &Event) -> String {
    let mut out = String::new();
    out.push_str(event.label());
    out.push('\n');

    if !event.parents().is_empty() {
        out.push_str(&event.parents().join(", "));
        out.push('\n');
    }

    if let Ok(table) = event.table() {
        for line in table.lines() {
            if !line.arguments().is_empty() {
                let args: Vec<&str> = line
                    .arguments()
                    .iter()
                    .map(|&v| if v { "True" } else { "False" })
                    .collect();
                out.push_str(&args.join(", "));
                out.push('\t');
            }
            out.push_str(&format!(
                "{:.2} {:.2}\n",
                line.probability(true),
                line.probability(false)
            ));
        }
    }

    out
}

/// Shapes a network for JSON output: events in creation order with their
/// parents and TRUE-probability lines.
fn network_json(net: &BayesNet) -> serde_json::Value {
    let events: Vec<serde_json::Value> = net
        .events()
        .map(|event| {
            let lines: Vec<serde_json::Value> = event
                .table()
                .map(|table| {
                    table
                        .lines()
                        .iter()
                        .map(|line| {
                            serde_json::json!({
                                "arguments": line.arguments(),
                                "p_true": line.probability(true),
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();
            serde_json::json!({
                "label": event.label(),
                "parents": event.parents(),
                "lines": lines,
            })
        })
        .collect();
    serde_json::json!({ "events": events })
}
