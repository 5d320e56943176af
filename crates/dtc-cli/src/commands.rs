use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use dtc_cli::logging::redact_value;
use dtc_cli::render::{
    analysis_heading, analysis_table, dealers_table, overview_tables, roster_table,
    vocabulary_table,
};
use dtc_cli::workspace::{Workspace, resolve_config};
use dtc_core::{TrainingAnalyzer, mapping_vocabulary};
use dtc_model::dealer_code;
use dtc_report::{export_all, export_dealer};

use crate::cli::{Cli, Command, ExportArgs, MappingsCommand, PersonArgs, SummaryArgs};

pub fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(
        cli.config.as_deref(),
        cli.resources.clone(),
        cli.mappings.clone(),
    )?;
    debug!(
        resources = %config.resource_dir.display(),
        mappings = %config.mapping_dir.display(),
        "configuration resolved"
    );
    let workspace = Workspace::open(config);
    match &cli.command {
        Command::Dealers => run_dealers(&workspace),
        Command::Roster(args) => run_roster(&workspace, &args.dealer),
        Command::Summary(args) => run_summary(&workspace, args),
        Command::Person(args) => run_person(&workspace, args),
        Command::Export(args) => run_export(&workspace, args),
        Command::Mappings(command) => run_mappings(&workspace, command),
    }
}

fn run_dealers(workspace: &Workspace) -> Result<()> {
    let dataset = workspace.load_dataset();
    let names = dataset.dealer_names();
    let rows = names
        .iter()
        .map(|&name| (name, dealer_code(name), dataset.dealer_categories(name)));
    println!("{}", dealers_table(rows));
    Ok(())
}

fn run_roster(workspace: &Workspace, dealer: &str) -> Result<()> {
    let dataset = workspace.load_dataset();
    let mappings = workspace.mappings();
    let rules = &workspace.config().criterion_rules;
    let analyzer = TrainingAnalyzer::new(&dataset, &mappings, rules);
    let entries = analyzer.roster(dealer);
    if entries.is_empty() {
        println!("No personnel found for {dealer}.");
        return Ok(());
    }
    println!("{}", roster_table(&entries));
    Ok(())
}

fn run_summary(workspace: &Workspace, args: &SummaryArgs) -> Result<()> {
    let _span = info_span!("summary", dealer = %args.dealer).entered();
    let dataset = workspace.load_dataset();
    let mappings = workspace.mappings();
    let rules = &workspace.config().criterion_rules;
    let analyzer = TrainingAnalyzer::new(&dataset, &mappings, rules);
    let overview = analyzer.dealer_overview(&args.dealer);
    if args.json {
        let json = serde_json::to_string_pretty(&overview).context("serialize overview")?;
        println!("{json}");
        return Ok(());
    }
    println!("{}", overview.dealer_name);
    for (source, table) in overview_tables(&overview) {
        println!("{}", source.label());
        println!("{table}");
    }
    Ok(())
}

fn run_person(workspace: &Workspace, args: &PersonArgs) -> Result<()> {
    let dataset = workspace.load_dataset();
    let mappings = workspace.mappings();
    let rules = &workspace.config().criterion_rules;
    let analyzer = TrainingAnalyzer::new(&dataset, &mappings, rules);
    debug!(
        dealer = %args.dealer,
        code = %redact_value(&args.code),
        position = %args.position,
        "analyzing person"
    );
    let Some(result) = analyzer.analyze(&args.code, &args.dealer, &args.position) else {
        println!("No data for {} at {}.", args.code, args.dealer);
        return Ok(());
    };
    if args.json {
        let json = serde_json::to_string_pretty(&result).context("serialize analysis")?;
        println!("{json}");
        return Ok(());
    }
    println!("{}", analysis_heading(&result));
    if result.requirements.is_empty() {
        println!("No requirements apply.");
    } else {
        println!("{}", analysis_table(&result));
    }
    let courses: Vec<&str> = result.passed_courses.iter().map(String::as_str).collect();
    if courses.is_empty() {
        println!("Passed courses: -");
    } else {
        println!("Passed courses: {}", courses.join(", "));
    }
    Ok(())
}

fn run_export(workspace: &Workspace, args: &ExportArgs) -> Result<()> {
    let dataset = workspace.load_dataset();
    let mappings = workspace.mappings();
    let rules = &workspace.config().criterion_rules;
    let analyzer = TrainingAnalyzer::new(&dataset, &mappings, rules);
    let paths = match &args.dealer {
        Some(dealer) => vec![
            export_dealer(&analyzer, dealer, &args.output)
                .with_context(|| format!("export {dealer}"))?,
        ],
        None => export_all(&analyzer, &args.output).context("export dealers")?,
    };
    for path in &paths {
        println!("{}", path.display());
    }
    info!(files = paths.len(), "export finished");
    Ok(())
}

fn run_mappings(workspace: &Workspace, command: &MappingsCommand) -> Result<()> {
    match command {
        MappingsCommand::List {
            kind,
            unmapped,
            filter,
        } => {
            let dataset = workspace.load_dataset();
            let mut vocabulary = mapping_vocabulary(&dataset, &workspace.mappings(), *kind);
            if let Some(filter) = filter {
                vocabulary = vocabulary.filtered(filter);
            }
            println!("{}", vocabulary_table(&vocabulary, *unmapped));
            let pending = vocabulary.unmapped().count();
            println!(
                "{} values, {} unmapped, {} standard candidates",
                vocabulary.entries.len(),
                pending,
                vocabulary.standards.len()
            );
        }
        MappingsCommand::Set {
            kind,
            raw,
            standard,
        } => {
            let path = workspace.set_mapping(*kind, raw, standard)?;
            println!("{raw} -> {standard} ({})", path.display());
        }
        MappingsCommand::Remove { kind, raw } => match workspace.remove_mapping(*kind, raw)? {
            Some(standard) => println!("removed {raw} -> {standard}"),
            None => println!("{raw} has no {kind} mapping"),
        },
    }
    Ok(())
}
