//! One-shot module listing command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{presets, ContentArrangement, Table};
use console::style;

use verihub_infra::scan::build_snapshot;
use verihub_infra::verifier::builtin_catalog;
use verihub_types::manifest::ParameterSpec;

/// Scan `modules_dir` once and print every module that would be registered.
pub fn run(modules_dir: &Path, json: bool) -> Result<()> {
    let catalog = builtin_catalog();
    let snapshot = build_snapshot(modules_dir, &catalog)?;
    let infos = snapshot.infos();

    if json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    if infos.is_empty() {
        println!();
        println!(
            "  No modules found in {}",
            style(modules_dir.display()).yellow()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Description", "Parameters"]);

    for info in &infos {
        table.add_row(vec![
            info.name.clone(),
            info.description.clone(),
            format_parameters(&info.parameters),
        ]);
    }

    println!();
    println!(
        "  {} {} module(s) registered from {}",
        style("✓").green().bold(),
        infos.len(),
        style(modules_dir.display()).cyan()
    );
    println!();
    println!("{table}");

    Ok(())
}

fn format_parameters(parameters: &[ParameterSpec]) -> String {
    if parameters.is_empty() {
        return "-".to_owned();
    }
    parameters
        .iter()
        .map(|p| {
            let requirement = if p.required { "required" } else { "optional" };
            format!("{} ({}, {})", p.name, p.type_tag, requirement)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
