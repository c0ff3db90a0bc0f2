#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use turnos::{
    analyze_patterns, io, suggest_week, EmployeeId, PatternOptions, ShiftTemplates,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de contrôle des horarios (validation, normalisation, suggestions)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des Turnos (tableau)
    #[arg(long, global = true)]
    templates: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Valider toutes les cellules
    Check {
        /// Horario JSON (objet seul ou tableau)
        #[arg(long)]
        schedule: String,
        /// Export CSV des erreurs et avertissements (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Réécrire les cellules sous forme courante
    Normalize {
        #[arg(long)]
        schedule: String,
        #[arg(long)]
        out: String,
    },

    /// Lister les motifs d'un employé
    Patterns {
        /// Historique d'horarios JSON
        #[arg(long)]
        history: String,
        #[arg(long)]
        employee: String,
        #[arg(long, default_value_t = 12)]
        window_weeks: u32,
    },

    /// Suggérer les affectations d'une nouvelle semaine
    Suggest {
        #[arg(long)]
        history: String,
        #[arg(long)]
        employee: String,
        /// Premier jour de la semaine (YYYY-MM-DD)
        #[arg(long)]
        week: String,
        #[arg(long, default_value_t = 12)]
        window_weeks: u32,
        #[arg(long, default_value_t = 3)]
        min_consecutive_weeks: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let templates = match &cli.templates {
        Some(path) => io::load_templates_json(path)?,
        None => ShiftTemplates::new(),
    };

    let code = match cli.cmd {
        Commands::Check { schedule, report } => {
            let horarios = io::load_schedules_json(&schedule)?;
            let reports: Vec<_> = horarios
                .iter()
                .flat_map(|h| h.validate_all(&templates))
                .collect();
            for r in &reports {
                for error in &r.validation.errors {
                    println!("{} {} | ERROR {}", r.date, r.employee, error);
                }
                for warning in &r.validation.warnings {
                    println!("{} {} | WARN {}", r.date, r.employee, warning);
                }
            }
            if let Some(path) = report {
                io::export_report_csv(path, &reports)?;
            }
            let invalid = reports.iter().filter(|r| !r.validation.is_valid()).count();
            if invalid == 0 {
                println!("OK: {} cell(s) valid", reports.len());
                0
            } else {
                eprintln!("Found {invalid} invalid cell(s)");
                // Code 2 = cellule(s) à corriger
                2
            }
        }
        Commands::Normalize { schedule, out } => {
            let horarios: Vec<_> = io::load_schedules_json(&schedule)?
                .iter()
                .map(|h| h.normalized(&templates))
                .collect();
            if let [single] = horarios.as_slice() {
                io::export_schedule_json(&out, single)?;
            } else {
                io::export_schedules_json(&out, &horarios)?;
            }
            println!("{} schedule(s) written to {out}", horarios.len());
            0
        }
        Commands::Patterns {
            history,
            employee,
            window_weeks,
        } => {
            let horarios = io::load_schedules_json(&history)?;
            let opts = PatternOptions {
                window_weeks,
                ..PatternOptions::default()
            };
            let patterns =
                analyze_patterns(&EmployeeId::new(&employee), &horarios, &templates, &opts);
            for p in &patterns {
                println!(
                    "{} | {} | freq {} | streak {} | last {}",
                    p.day_of_week, p.signature, p.frequency, p.consecutive_weeks, p.last_seen_week
                );
            }
            0
        }
        Commands::Suggest {
            history,
            employee,
            week,
            window_weeks,
            min_consecutive_weeks,
        } => {
            let week = NaiveDate::parse_from_str(&week, "%Y-%m-%d")
                .with_context(|| format!("invalid week date: {week}"))?;
            let horarios = io::load_schedules_json(&history)?;
            let opts = PatternOptions {
                window_weeks,
                min_consecutive_weeks,
            };
            let employee = EmployeeId::new(&employee);
            let patterns = analyze_patterns(&employee, &horarios, &templates, &opts);
            let suggestions = suggest_week(&employee, week, &patterns, &opts);
            if suggestions.is_empty() {
                println!("no suggestion for {employee}");
            }
            for (date, s) in &suggestions {
                let what: Vec<String> = s.assignments.iter().map(|a| a.describe()).collect();
                println!(
                    "{date} ({}) | confidence {:.1} | {}",
                    s.day_of_week,
                    s.confidence,
                    what.join(", ")
                );
            }
            0
        }
    };

    std::process::exit(code);
}
