//! # VoltMaster CLI Application
//!
//! Command-line front end for the field calculators, the project log, the
//! pre-work safety checklist, and the technical assistant.
//!
//! Results print as text, or as JSON with `--json`. Engine errors also print
//! their structured JSON to stderr so scripts can branch on `type`.

mod advisor;
mod telemetry;

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use volt_core::advisory::{Advisor, AdvisoryContext, Language};
use volt_core::calculations::{
    BreakerSizingInput, BreakerSizingRequest, CalculationOutput, CalculationRequest,
    ConduitFillInput, ElectricalQuantitySet, PhaseCount, PowerFactorInput, Quantity,
    VoltageDropInput,
};
use volt_core::calculations::{conduit_fill::MAX_FILL_PERCENT, voltage_drop::MAX_DROP_PERCENT};
use volt_core::catalogs::ConductorMaterial;
use volt_core::project::{self, Project, ProjectDraft};
use volt_core::safety::{ChecklistCategory, ChecklistOutcome, SafetyChecklist};
use volt_core::{CalcError, ProjectStore, Settings};

use advisor::GeminiAdvisor;

/// VoltMaster - electrical field calculator and project log
#[derive(Parser)]
#[command(name = "voltmaster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, global = true, env = "VOLTMASTER_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve voltage, current, resistance and power from any two of them
    #[command(allow_negative_numbers = true)]
    Ohms {
        /// Voltage (V)
        #[arg(short, long)]
        voltage: Option<f64>,

        /// Current (A)
        #[arg(short = 'i', long)]
        current: Option<f64>,

        /// Resistance (Ω)
        #[arg(short, long)]
        resistance: Option<f64>,

        /// Power (W)
        #[arg(short, long)]
        power: Option<f64>,
    },

    /// Voltage drop along a two-wire circuit
    Vdrop {
        /// Supply voltage (V)
        #[arg(long, default_value_t = 220.0)]
        voltage: f64,

        /// Load current (A)
        #[arg(long)]
        current: f64,

        /// One-way length (m)
        #[arg(long)]
        distance: f64,

        /// Conductor cross-section (mm²)
        #[arg(long, default_value_t = 2.5)]
        section: f64,

        /// Conductor material (copper, aluminum)
        #[arg(long, default_value = "copper")]
        material: ConductorMaterial,
    },

    /// Conduit fill percentage
    Conduit {
        /// Conduit trade size (1/2, 3/4, 1, 1 1/4, 1 1/2, 2)
        #[arg(long, default_value = "3/4")]
        size: String,

        /// Wire cross-section (mm²)
        #[arg(long, default_value_t = 2.5)]
        section: f64,

        /// Number of wires
        #[arg(long, default_value_t = 3)]
        count: u32,
    },

    /// Capacitor bank for power factor correction
    Pf {
        /// Active power (kW)
        #[arg(long)]
        power_kw: f64,

        /// Present power factor
        #[arg(long, default_value_t = 0.75)]
        current_pf: f64,

        /// Target power factor
        #[arg(long, default_value_t = 0.92)]
        target_pf: f64,
    },

    /// Breaker rating and minimum cable for a load
    Breaker {
        /// Known design current (A), instead of power
        #[arg(long, conflicts_with = "power")]
        current: Option<f64>,

        /// Load power (W)
        #[arg(long, required_unless_present = "current")]
        power: Option<f64>,

        /// Supply voltage (V)
        #[arg(long, default_value_t = 220.0)]
        voltage: f64,

        /// Number of phases (1, 2 or 3)
        #[arg(long, default_value_t = 1)]
        phases: u8,

        /// Power factor
        #[arg(long, default_value_t = 0.9)]
        pf: f64,
    },

    /// Run a JSON calculation request ("-" reads stdin); always prints JSON
    Run {
        file: PathBuf,
    },

    /// Manage the project log
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Export or restore the project log
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },

    /// Pre-work safety checklist
    Checklist {
        /// Confirmed item ids (head, eyes, hands, boots, loto, test, tools, dry)
        #[arg(long = "check", value_name = "ID")]
        checked: Vec<String>,

        /// Confirm every item
        #[arg(long)]
        all: bool,
    },

    /// Ask the technical assistant
    Advise {
        /// Answer style (norm, general, safety)
        #[arg(long, default_value = "general")]
        context: AdvisoryContext,

        /// Response language (pt, en, es); defaults to settings
        #[arg(long)]
        language: Option<Language>,

        /// The question
        #[arg(required = true, trailing_var_arg = true)]
        prompt: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// List all projects, newest first
    List,

    /// Add a project
    Add {
        name: String,

        #[arg(long, default_value = "")]
        client: String,

        /// Start date (YYYY-MM-DD), default today
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD), default start + 7 days
        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Change fields of a project
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        client: Option<String>,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,

        /// Mark or unmark as completed
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Mark a project completed
    Complete { id: String },

    /// Delete a project
    Delete { id: String },

    /// Find projects by name or client
    Search { query: String },
}

#[derive(Subcommand)]
enum BackupAction {
    /// Write all projects to a JSON file
    Export { file: PathBuf },

    /// Replace all projects with a JSON backup
    Import { file: PathBuf },
}

fn main() -> ExitCode {
    telemetry::init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(error: &anyhow::Error) {
    eprintln!("Error: {:#}", error);
    if let Some(calc) = error.downcast_ref::<CalcError>() {
        if let Ok(json) = serde_json::to_string_pretty(calc) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(data_dir = %settings.data_dir.display(), "settings loaded");
    let json = cli.json;

    match cli.command {
        Commands::Ohms {
            voltage,
            current,
            resistance,
            power,
        } => {
            let set = ElectricalQuantitySet {
                voltage,
                current,
                resistance,
                power,
            };
            calculate(CalculationRequest::OhmsLaw(set), &settings, json)
        }
        Commands::Vdrop {
            voltage,
            current,
            distance,
            section,
            material,
        } => {
            let input = VoltageDropInput {
                voltage,
                current,
                distance_m: distance,
                cross_section_mm2: section,
                material,
            };
            calculate(CalculationRequest::VoltageDrop(input), &settings, json)
        }
        Commands::Conduit { size, section, count } => {
            let input = ConduitFillInput {
                conduit_size: size,
                wire_cross_section_mm2: section,
                wire_count: count,
            };
            calculate(CalculationRequest::ConduitFill(input), &settings, json)
        }
        Commands::Pf {
            power_kw,
            current_pf,
            target_pf,
        } => {
            let input = PowerFactorInput {
                active_power_kw: power_kw,
                current_pf,
                target_pf,
            };
            calculate(CalculationRequest::PowerFactor(input), &settings, json)
        }
        Commands::Breaker {
            current,
            power,
            voltage,
            phases,
            pf,
        } => {
            let input = match (current, power) {
                (Some(current_amps), _) => BreakerSizingInput::FromCurrent { current_amps },
                (None, Some(power_watts)) => BreakerSizingInput::FromPower {
                    power_watts,
                    voltage,
                    phases: PhaseCount::try_from(phases).map_err(anyhow::Error::msg)?,
                    power_factor: pf,
                },
                (None, None) => bail!("either --power or --current is required"),
            };
            calculate(
                CalculationRequest::BreakerSizing(BreakerSizingRequest { input }),
                &settings,
                json,
            )
        }
        Commands::Run { file } => run_request_file(&file, &settings),
        Commands::Project { action } => project_command(action, &settings, json),
        Commands::Backup { action } => backup_command(action, &settings),
        Commands::Checklist { checked, all } => checklist_command(checked, all, json),
        Commands::Advise {
            context,
            language,
            prompt,
        } => {
            let language = language.unwrap_or(settings.language);
            let advisor = GeminiAdvisor::from_settings(&settings.advisory)?;
            let answer = advisor.advise(&prompt.join(" "), context, language)?;
            if json {
                print_json(&json!({ "context": context, "language": language, "answer": answer }))
            } else {
                println!("{}", answer);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Calculations
// ============================================================================

fn calculate(request: CalculationRequest, settings: &Settings, json: bool) -> Result<()> {
    let catalogs = settings.load_catalogs()?;
    let output = request.run(&catalogs)?;
    if json {
        print_json(&output)
    } else {
        print_output(&output);
        Ok(())
    }
}

fn run_request_file(file: &Path, settings: &Settings) -> Result<()> {
    let contents = if file == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading request from stdin")?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?
    };

    let request: CalculationRequest = serde_json::from_str(&contents).map_err(CalcError::from)?;
    let output = request.run(&settings.load_catalogs()?)?;
    print_json(&output)
}

fn print_output(output: &CalculationOutput) {
    match output {
        CalculationOutput::OhmsLaw(result) => {
            for quantity in Quantity::ALL {
                println!(
                    "  {:<12} {:>12.2} {:<2} {}",
                    quantity.name(),
                    result.get(quantity),
                    quantity.unit(),
                    if result.is_derived(quantity) { "(calculated)" } else { "" }
                );
            }
        }
        CalculationOutput::VoltageDrop(result) => {
            println!("  Drop:       {:.2} V ({:.2} %)", result.drop_volts, result.drop_percentage);
            println!(
                "  Limit:      {:.1} % {}",
                MAX_DROP_PERCENT,
                status_icon(result.acceptable)
            );
            if let Some(section) = result.suggested_cross_section_mm2 {
                println!("  Suggested:  {} mm²", section);
            }
        }
        CalculationOutput::ConduitFill(result) => {
            println!(
                "  Fill:       {:.1} % ({:.1} of {:.0} mm²)",
                result.fill_percentage, result.wire_area_mm2, result.conduit_area_mm2
            );
            println!(
                "  Limit:      {:.0} % {}",
                MAX_FILL_PERCENT,
                status_icon(!result.over_limit)
            );
        }
        CalculationOutput::PowerFactor(result) => {
            println!("  Capacitor bank:  {:.2} kvar", result.required_kvar);
            println!(
                "  Apparent power:  {:.2} kVA -> {:.2} kVA",
                result.apparent_power_before_kva, result.apparent_power_after_kva
            );
            if result.required_kvar < 0.0 {
                println!("  Target is below the present power factor; no compensation needed.");
            }
        }
        CalculationOutput::BreakerSizing(result) => {
            println!("  Design current (Ib):  {:.2} A", result.computed_current);
            println!("  Breaker (In):         {} A", result.recommended_breaker_rating);
            println!("  Minimum cable:        {}", result.minimum_cable_size);
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(CalcError::from)?;
    println!("{}", json);
    Ok(())
}

// ============================================================================
// Projects
// ============================================================================

fn project_command(action: ProjectAction, settings: &Settings, json: bool) -> Result<()> {
    let store = ProjectStore::new(&settings.data_dir);
    let today = project::today();
    let mut projects = store.load_all(today)?;

    match action {
        ProjectAction::List => print_projects(projects.projects().iter().collect(), json),
        ProjectAction::Search { query } => print_projects(projects.search(&query), json),
        ProjectAction::Add {
            name,
            client,
            start,
            end,
            notes,
        } => {
            let mut draft =
                ProjectDraft::starting(name, client, start.unwrap_or(today)).with_notes(notes);
            if let Some(end) = end {
                draft.end_date = end;
            }
            let id = projects.create(draft, today)?;
            store.save_all(&projects)?;
            print_saved(projects.get(&id), json)
        }
        ProjectAction::Edit {
            id,
            name,
            client,
            start,
            end,
            notes,
            completed,
        } => {
            let mut draft = ProjectDraft::from_project(find_project(&projects, &id)?);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(client) = client {
                draft.client = client;
            }
            if let Some(start) = start {
                draft.start_date = start;
            }
            if let Some(end) = end {
                draft.end_date = end;
            }
            if let Some(notes) = notes {
                draft.notes = notes;
            }
            if let Some(completed) = completed {
                draft.completed = completed;
            }
            projects.update(&id, draft, today)?;
            store.save_all(&projects)?;
            print_saved(projects.get(&id), json)
        }
        ProjectAction::Complete { id } => {
            let draft =
                ProjectDraft::from_project(find_project(&projects, &id)?).with_completed(true);
            projects.update(&id, draft, today)?;
            store.save_all(&projects)?;
            print_saved(projects.get(&id), json)
        }
        ProjectAction::Delete { id } => {
            let removed = projects.remove(&id)?;
            store.save_all(&projects)?;
            if json {
                print_json(&removed)
            } else {
                println!("Deleted {} ({})", removed.name, removed.id);
                Ok(())
            }
        }
    }
}

fn find_project<'a>(projects: &'a volt_core::ProjectList, id: &str) -> Result<&'a Project> {
    projects
        .get(id)
        .ok_or_else(|| CalcError::ProjectNotFound { id: id.to_string() }.into())
}

fn print_saved(project: Option<&Project>, json: bool) -> Result<()> {
    match project {
        Some(project) if json => print_json(project),
        Some(project) => {
            print_project_row(project);
            Ok(())
        }
        None => Ok(()),
    }
}

fn print_projects(projects: Vec<&Project>, json: bool) -> Result<()> {
    if json {
        return print_json(&projects);
    }
    if projects.is_empty() {
        println!("No projects.");
    }
    for project in projects {
        print_project_row(project);
    }
    Ok(())
}

fn print_project_row(project: &Project) {
    println!(
        "{}  {:<11}  {} .. {}  {} ({})",
        project.id,
        project.status,
        project.start_date,
        project.end_date,
        project.name,
        project.client
    );
    if !project.notes.is_empty() {
        println!("    {}", project.notes);
    }
}

fn backup_command(action: BackupAction, settings: &Settings) -> Result<()> {
    let store = ProjectStore::new(&settings.data_dir);
    let today = project::today();

    match action {
        BackupAction::Export { file } => {
            let projects = store.load_all(today)?;
            store.export_backup(&projects, &file)?;
            println!("Exported {} projects to {}", projects.len(), file.display());
        }
        BackupAction::Import { file } => {
            let projects = store.import_backup(&file, today)?;
            println!("Imported {} projects from {}", projects.len(), file.display());
        }
    }
    Ok(())
}

// ============================================================================
// Safety checklist
// ============================================================================

fn checklist_command(checked: Vec<String>, all: bool, json: bool) -> Result<()> {
    let mut checklist = SafetyChecklist::new();
    let confirmed: BTreeSet<String> = if all {
        checklist.items().iter().map(|item| item.id.to_string()).collect()
    } else {
        checked.into_iter().map(|id| id.trim().to_lowercase()).collect()
    };
    for id in &confirmed {
        checklist.toggle(id)?;
    }

    let outcome = checklist.validate();
    if json {
        print_json(&json!({ "items": checklist.items(), "outcome": outcome }))?;
    } else {
        for category in ChecklistCategory::ALL {
            println!("{}", category.label());
            for item in checklist.items_in(category) {
                println!("  [{}] {}", if item.checked { "x" } else { " " }, item.label);
            }
        }
        println!();
    }

    match outcome {
        ChecklistOutcome::Ready => {
            if !json {
                println!("All checks confirmed. Work may proceed.");
            }
            Ok(())
        }
        ChecklistOutcome::Incomplete { missing } => {
            bail!("checklist incomplete, unconfirmed: {}", missing.join(", "))
        }
    }
}
