//! Subcommand handlers
//!
//! Each handler runs one assembler pass, writes its output and prints a
//! short summary to stdout. Outcomes are returned so callers (and tests)
//! can inspect what happened.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use colored::Colorize;
use std::path::{Path, PathBuf};

use ontoforge::assembler::{self, AuditReport, FixOutcome, MergeOutcome, UnifyOutcome};
use ontoforge::config::{render_preamble, OntologyConfig};
use ontoforge::normalize::{NormalizeReport, Normalizer};
use ontoforge::yaml_io;

fn date_string(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

/// Merge per-entity files from `dir` into `output`
pub fn run_merge(
    config: &OntologyConfig,
    dir: &Path,
    output: &Path,
    normalize: bool,
    today: NaiveDate,
) -> Result<MergeOutcome> {
    let normalizer = Normalizer::new(config.normalizer.clone());
    let outcome = assembler::merge_entity_files(dir, &config.merge, normalize.then_some(&normalizer))
        .with_context(|| format!("Failed to merge entity files from {}", dir.display()))?;

    let preamble = render_preamble(&config.merge.header, &date_string(today));
    yaml_io::save_document(output, &preamble, &outcome.document)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("\n{}\n", "🔗 Merge Summary".bold());
    println!("  ✓ {} entities merged into {}", outcome.merged.len(), output.display());
    if !outcome.missing.is_empty() {
        println!(
            "  {} {} listed file(s) not found: {}",
            "⚠️".yellow(),
            outcome.missing.len(),
            outcome.missing.join(", ")
        );
    }
    if !outcome.unlisted.is_empty() {
        println!(
            "  {} {} file(s) not in the merge order: {}",
            "⚠️".yellow(),
            outcome.unlisted.len(),
            outcome.unlisted.join(", ")
        );
    }
    if let Some(report) = &outcome.report {
        print_normalize_report(report);
    }

    Ok(outcome)
}

/// Split `input` into one file per entity under `output_dir`
pub fn run_split(config: &OntologyConfig, input: &Path, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let written = assembler::split_ontology_file(input, output_dir, &config.split)
        .with_context(|| format!("Failed to split {}", input.display()))?;

    println!("\n{}\n", "✂️  Split Summary".bold());
    for path in &written {
        if let Some(name) = path.file_name() {
            println!("  ✓ {}", name.to_string_lossy());
        }
    }
    println!("\n📈 {} entity files written to {}", written.len(), output_dir.display());

    Ok(written)
}

/// Unify the Time & Attendance and Absence ontologies into `output`
pub fn run_unify(
    config: &OntologyConfig,
    time_attendance: &Path,
    absence: &Path,
    output: &Path,
    normalize: bool,
    today: NaiveDate,
) -> Result<UnifyOutcome> {
    let normalizer = Normalizer::new(config.normalizer.clone());
    let outcome = assembler::unify_ontology_files(
        time_attendance,
        absence,
        &config.unify,
        normalize.then_some(&normalizer),
        today,
    )
    .context("Failed to unify ontologies")?;

    let preamble = render_preamble(&config.unify.header, &date_string(today));
    yaml_io::save_document(output, &preamble, &outcome.document)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("\n{}\n", "🧩 Unify Summary".bold());
    if let Some(sub_modules) = &outcome.document.sub_modules {
        for (name, sub) in sub_modules.iter() {
            println!("  ✓ {}: {} entities", name, sub.entities.len());
        }
    }
    println!(
        "  ✓ {} entities in total, written to {}",
        outcome.document.entities.len(),
        output.display()
    );
    if let Some(report) = &outcome.report {
        print_normalize_report(report);
    }

    Ok(outcome)
}

/// Apply the review fixes to `input` and write the result to `output`
pub fn run_fix(config: &OntologyConfig, input: &Path, output: &Path, today: NaiveDate) -> Result<FixOutcome> {
    let normalizer = Normalizer::new(config.normalizer.clone());
    let outcome = assembler::fix_ontology_file(input, &config.fix, &normalizer, today)
        .with_context(|| format!("Failed to fix {}", input.display()))?;

    let preamble = render_preamble(&config.fix.header, &date_string(today));
    yaml_io::save_document(output, &preamble, &outcome.document)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("\n{}\n", "🛠️  Fix Summary".bold());
    if outcome.added.is_empty() {
        println!("  ✓ No missing entities");
    } else {
        println!("  ✓ Added {} entities: {}", outcome.added.len(), outcome.added.join(", "));
    }
    if !outcome.replaced.is_empty() {
        println!(
            "  ✓ Replaced {} entities: {}",
            outcome.replaced.len(),
            outcome.replaced.join(", ")
        );
    }
    print_normalize_report(&outcome.report);

    Ok(outcome)
}

/// Run the normalizer alone over `input`
pub fn run_normalize(config: &OntologyConfig, input: &Path, output: &Path) -> Result<NormalizeReport> {
    let mut document = yaml_io::load_document(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let normalizer = Normalizer::new(config.normalizer.clone());
    let report = normalizer
        .normalize_entities(&mut document.entities)
        .with_context(|| format!("Failed to normalize {}", input.display()))?;

    yaml_io::save_document(output, "", &document)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("\n{}\n", "🧹 Normalize Summary".bold());
    print_normalize_report(&report);

    Ok(report)
}

/// Report entities lacking audit or versioning fields
pub fn run_analyze(input: &Path, json: bool) -> Result<AuditReport> {
    let document = yaml_io::load_document(input)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let report = assembler::analyze_ontology(&document)
        .with_context(|| format!("Failed to analyze {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_audit_report(&report);
    }

    Ok(report)
}

fn print_normalize_report(report: &NormalizeReport) {
    println!("\n{}", "📊 Normalization".bold());
    println!("  Entities:               {}", report.entities);
    println!("  Legacy fields converted: {}", report.converted_fields);
    println!("  Temporal entities:      {}", report.temporal_entities);
    println!("  Audit fields added:     {}", report.audit_fields_added);
    println!("  Indexes:                {}", report.indexes);
    if !report.diagnostics.is_empty() {
        println!(
            "\n{}",
            format!("⚠️  {} attribute entries dropped:", report.diagnostics.len()).yellow()
        );
        for diagnostic in &report.diagnostics {
            println!("  - {}: {:?} ({})", diagnostic.entity, diagnostic.entry, diagnostic.reason);
        }
    }
}

fn print_audit_report(report: &AuditReport) {
    let total = report.total;
    println!("\n{}\n", "🔍 Audit Field Analysis".bold());
    println!("  Total entities: {}", total);
    println!(
        "  {} Complete audit trail: {} ({}%)",
        "✓".green(),
        report.complete_audit.len(),
        assembler::percent(report.complete_audit.len(), total)
    );
    print_entity_list("Missing created_by", &report.missing_created_by, total);
    print_entity_list("Missing updated_by", &report.missing_updated_by, total);

    if !report.needs_temporal.is_empty() {
        println!(
            "\n{}",
            format!("⏳ Potentially needing SCD Type 2 ({}):", report.needs_temporal.len()).yellow()
        );
        for name in &report.needs_temporal {
            println!("  - {}", name);
        }
    }
}

fn print_entity_list(label: &str, entities: &[String], total: usize) {
    println!(
        "  {} {}: {} ({}%)",
        "✗".red(),
        label,
        entities.len(),
        assembler::percent(entities.len(), total)
    );
    for name in entities {
        println!("      {}", name);
    }
}
