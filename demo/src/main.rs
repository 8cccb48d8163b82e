//! labelscan Reference Runtime — Demo CLI
//!
//! Runs one or all of the three label-scan scenarios, or scores an ad-hoc
//! ingredient list against profile flags and prints the JSON result.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- allergy-alert
//!   cargo run -p demo -- diet-conflict
//!   cargo run -p demo -- anonymous-scan
//!   cargo run -p demo -- score --ingredients "Peanut Oil, Sugar, Salt" --allergy peanuts
//!   cargo run -p demo -- knowledge-base

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use labelscan_contracts::{
    error::{LabelscanError, LabelscanResult},
    profile::UserProfile,
    scan::ScanInput,
};
use labelscan_core::traits::{ResultVerifier, RiskScorer};
use labelscan_engine::ScoringEngine;
use labelscan_knowledge::KnowledgeBase;
use labelscan_ref::scenarios::{allergy_alert, anonymous_scan, diet_conflict};
use labelscan_verify::ContractVerifier;

// ── CLI definition ────────────────────────────────────────────────────────────

/// labelscan — deterministic ingredient risk scoring demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "labelscan reference runtime demo",
    long_about = "Runs labelscan demo scenarios through the full scan pipeline\n\
                  (vision, profile, scoring, verification, speech), or scores\n\
                  an ingredient list directly."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three scenarios in sequence.
    RunAll,
    /// Scenario 1: Allergy Alert (peanut oil vs. a peanut allergy).
    AllergyAlert,
    /// Scenario 2: Diet & Condition Conflicts (vegan, diabetic shopper).
    DietConflict,
    /// Scenario 3: Anonymous Scan with Audio.
    AnonymousScan,
    /// Score a comma-separated ingredient list and print the JSON result.
    Score(ScoreArgs),
    /// Load a knowledge base and print its size and fingerprint.
    KnowledgeBase(KnowledgeArgs),
}

#[derive(Args)]
struct KnowledgeArgs {
    /// Knowledge-base TOML file. Defaults to the bundled knowledge base.
    #[arg(long, env = "LABELSCAN_KNOWLEDGE_BASE")]
    knowledge_base: Option<PathBuf>,
}

#[derive(Args)]
struct ScoreArgs {
    /// Ingredients as printed on the label, comma-separated.
    #[arg(long)]
    ingredients: String,

    /// Allergen categories (repeat or comma-separate).
    #[arg(long = "allergy", value_delimiter = ',')]
    allergies: Vec<String>,

    /// Dietary restrictions, e.g. vegan, gluten-free.
    #[arg(long = "diet", value_delimiter = ',')]
    diets: Vec<String>,

    /// Health conditions, e.g. diabetes, hypertension.
    #[arg(long = "condition", value_delimiter = ',')]
    conditions: Vec<String>,

    /// Health goals, e.g. weight-loss.
    #[arg(long = "goal", value_delimiter = ',')]
    goals: Vec<String>,

    /// Score without personalization even if profile flags are given.
    #[arg(long)]
    anonymous: bool,

    /// Pretty-print the JSON result.
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    kb: KnowledgeArgs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Logs go to stderr so `score` output stays valid JSON.
    // Set RUST_LOG=debug to see every rule decision.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => with_banner(run_all),
        Command::AllergyAlert => with_banner(|| allergy_alert::run_scenario().map(drop)),
        Command::DietConflict => with_banner(|| diet_conflict::run_scenario().map(drop)),
        Command::AnonymousScan => with_banner(|| anonymous_scan::run_scenario().map(drop)),
        Command::Score(args) => run_score(args),
        Command::KnowledgeBase(args) => run_knowledge_base(args),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn with_banner(run: impl FnOnce() -> LabelscanResult<()>) -> LabelscanResult<()> {
    print_banner();
    run()?;
    println!("All selected scenarios completed successfully.");
    Ok(())
}

fn run_all() -> LabelscanResult<()> {
    allergy_alert::run_scenario()?;
    diet_conflict::run_scenario()?;
    anonymous_scan::run_scenario()?;
    Ok(())
}

// ── Ad-hoc scoring ────────────────────────────────────────────────────────────

fn load_knowledge_base(args: &KnowledgeArgs) -> LabelscanResult<KnowledgeBase> {
    match &args.knowledge_base {
        Some(path) => {
            info!(path = %path.display(), "loading knowledge base from file");
            KnowledgeBase::from_file(path)
        }
        None => KnowledgeBase::bundled(),
    }
}

fn run_score(args: ScoreArgs) -> LabelscanResult<()> {
    let kb = Arc::new(load_knowledge_base(&args.kb)?);
    let engine = ScoringEngine::new(kb);
    let verifier = ContractVerifier::new();

    let raw: Vec<&str> = args.ingredients.split(',').collect();
    let profile = if args.anonymous {
        None
    } else {
        Some(
            UserProfile::new()
                .with_allergies(&args.allergies)
                .with_dietary_restrictions(&args.diets)
                .with_health_conditions(&args.conditions)
                .with_health_goals(&args.goals),
        )
    };

    let result = engine.score(&ScanInput::new(raw, profile));

    let report = verifier.verify(&result)?;
    if !report.passed {
        return Err(LabelscanError::VerificationFailed {
            reason: report.summary(),
        });
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .map_err(|e| LabelscanError::ConfigError {
        reason: format!("failed to serialize result: {}", e),
    })?;
    println!("{}", json);
    Ok(())
}

fn run_knowledge_base(args: KnowledgeArgs) -> LabelscanResult<()> {
    let kb = load_knowledge_base(&args)?;
    let source = args
        .knowledge_base
        .as_ref()
        .map_or_else(|| "bundled".to_string(), |p| p.display().to_string());

    println!("Knowledge base:  {}", source);
    println!("Ingredients:     {}", kb.len());
    println!("Aliases:         {}", kb.alias_count());
    println!("Fingerprint:     {}", kb.fingerprint());
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("labelscan — Ingredient Risk Engine");
    println!("Reference Demo");
    println!("==================================");
    println!();
    println!("Scan pipeline per label:");
    println!("  [1] Vision extracts raw ingredient strings from the label image");
    println!("  [2] Profile store supplies allergies, diets, conditions, and goals");
    println!("  [3] Engine normalizes, matches rules, aggregates a 0-100 score");
    println!("  [4] Verifier checks the result against the wire contract");
    println!("  [5] Speech renders the summary on request");
    println!();
}
