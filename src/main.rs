use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{ArgGroup, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

mod db;
mod grading;
mod input;
mod models;
mod report;

use models::{Cohort, CourseEntry, CumulativeInput, Internship, SavedResult, SemesterResult};

#[derive(Parser)]
#[command(name = "cgpa-calculator")]
#[command(about = "Semester GPA and cumulative CGPA calculator with policy deductions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic sample results
    Seed,
    /// Compute a semester GPA from a course CSV
    Gpa {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "new")]
        cohort: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Merge a semester into the cumulative average
    #[command(group(
        ArgGroup::new("internship")
            .args(["internship_hours", "internship_term"])
            .multiple(false)
    ))]
    Cgpa {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "new")]
        cohort: String,
        #[arg(long, default_value_t = 0.0)]
        prior_credit_hours: f64,
        #[arg(long, default_value_t = 0.0)]
        prior_cgpa: f64,
        #[arg(long)]
        cocurricular: bool,
        #[arg(long)]
        internship_hours: Option<f64>,
        #[arg(long)]
        internship_term: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        json: bool,
        /// Persist the result for later listing; requires --name
        #[arg(long, requires = "name")]
        save: bool,
    },
    /// Generate a markdown report
    #[command(group(
        ArgGroup::new("internship")
            .args(["internship_hours", "internship_term"])
            .multiple(false)
    ))]
    Report {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long, default_value = "new")]
        cohort: String,
        #[arg(long)]
        prior_credit_hours: Option<f64>,
        #[arg(long)]
        prior_cgpa: Option<f64>,
        #[arg(long)]
        cocurricular: bool,
        #[arg(long)]
        internship_hours: Option<f64>,
        #[arg(long)]
        internship_term: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// List saved results
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Delete a saved result
    Delete {
        #[arg(long)]
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            db::seed(&pool).await?;
            println!("Sample results inserted.");
        }
        Commands::Gpa {
            csv,
            cohort,
            name,
            json,
        } => {
            let cohort = parse_cohort(&cohort)?;
            let entries = load_valid_entries(&csv)?;
            let semester = grading::semester_gpa(&entries, cohort);

            if json {
                print_json(name.as_deref(), cohort, &semester, None)?;
            } else {
                println!(
                    "Semester GPA {:.2} across {:.1} credit hours.",
                    semester.gpa, semester.total_credit_hours
                );
            }
        }
        Commands::Cgpa {
            csv,
            cohort,
            prior_credit_hours,
            prior_cgpa,
            cocurricular,
            internship_hours,
            internship_term,
            name,
            json,
            save,
        } => {
            let cohort = parse_cohort(&cohort)?;
            let internship = parse_internship(internship_hours, internship_term.as_deref())?;
            let entries = load_valid_entries(&csv)?;
            let semester = grading::semester_gpa(&entries, cohort);
            let cgpa = grading::cumulative_cgpa(&CumulativeInput {
                prior_credit_hours,
                prior_cgpa,
                new_credit_hours: semester.total_credit_hours,
                new_gpa: semester.gpa,
                cocurricular,
                internship,
            });

            if json {
                print_json(name.as_deref(), cohort, &semester, Some(cgpa))?;
            } else {
                println!(
                    "Semester GPA {:.2} across {:.1} credit hours.",
                    semester.gpa, semester.total_credit_hours
                );
                println!("Cumulative CGPA {:.2}.", cgpa);
            }

            if save {
                let student_name = name.context("--save requires --name")?;
                let pool = connect().await?;
                let result = SavedResult {
                    id: Uuid::new_v4(),
                    student_name,
                    cohort: cohort.label().to_string(),
                    gpa: semester.gpa,
                    cgpa,
                    total_credit_hours: semester.total_credit_hours,
                    calculated_on: Utc::now().date_naive(),
                };
                db::save_result(&pool, &result).await?;
                println!("Saved result {} for {}.", result.id, result.student_name);
            }
        }
        Commands::Report {
            csv,
            cohort,
            prior_credit_hours,
            prior_cgpa,
            cocurricular,
            internship_hours,
            internship_term,
            name,
            out,
        } => {
            let cohort = parse_cohort(&cohort)?;
            let internship = parse_internship(internship_hours, internship_term.as_deref())?;
            let entries = load_valid_entries(&csv)?;
            let semester = grading::semester_gpa(&entries, cohort);

            let has_prior = prior_credit_hours.is_some()
                || prior_cgpa.is_some()
                || cocurricular
                || !matches!(internship, Internship::None);
            let cumulative = has_prior.then(|| {
                grading::cumulative_cgpa(&CumulativeInput {
                    prior_credit_hours: prior_credit_hours.unwrap_or(0.0),
                    prior_cgpa: prior_cgpa.unwrap_or(0.0),
                    new_credit_hours: semester.total_credit_hours,
                    new_gpa: semester.gpa,
                    cocurricular,
                    internship,
                })
            });

            let report =
                report::build_report(name.as_deref(), cohort, &entries, &semester, cumulative);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::History { limit } => {
            let pool = connect().await?;
            let results = db::list_results(&pool).await?;

            if results.is_empty() {
                println!("No saved results.");
                return Ok(());
            }

            println!("Saved results:");
            for result in results.iter().take(limit) {
                println!(
                    "- {} ({}, {} scale) GPA {:.2} CGPA {:.2} over {:.1} credit hours on {}",
                    result.student_name,
                    result.id,
                    result.cohort,
                    result.gpa,
                    result.cgpa,
                    result.total_credit_hours,
                    result.calculated_on
                );
            }
        }
        Commands::Delete { id } => {
            let pool = connect().await?;
            if db::delete_result(&pool, id).await? {
                println!("Deleted result {id}.");
            } else {
                println!("No saved result with id {id}.");
            }
        }
    }

    Ok(())
}

// Only the subcommands that touch saved results connect; the calculation
// subcommands run without a database.
async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a Postgres instance")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

fn parse_cohort(value: &str) -> anyhow::Result<Cohort> {
    Cohort::parse(value)
        .with_context(|| format!("unknown cohort {value:?} (expected new or returning)"))
}

fn parse_internship(hours: Option<f64>, term: Option<&str>) -> anyhow::Result<Internship> {
    match (hours, term) {
        (Some(hours), _) => Ok(Internship::Credited(hours)),
        (None, Some(term)) => match term.to_lowercase().as_str() {
            "short" => Ok(Internship::ShortSemester),
            "long" => Ok(Internship::LongSemester),
            other => anyhow::bail!("unknown internship term {other:?} (expected short or long)"),
        },
        (None, None) => Ok(Internship::None),
    }
}

fn load_valid_entries(csv: &Path) -> anyhow::Result<Vec<CourseEntry>> {
    let entries = input::filter_valid(input::load_entries(csv)?);

    if entries.is_empty() {
        anyhow::bail!(
            "no valid course entries in {} (each row needs a grade and positive credit hours)",
            csv.display()
        );
    }

    Ok(entries)
}

fn print_json(
    student: Option<&str>,
    cohort: Cohort,
    semester: &SemesterResult,
    cgpa: Option<f64>,
) -> anyhow::Result<()> {
    #[derive(serde::Serialize)]
    struct Output<'a> {
        student: Option<&'a str>,
        cohort: &'a str,
        gpa: f64,
        total_credit_hours: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        cgpa: Option<f64>,
    }

    let output = Output {
        student,
        cohort: cohort.label(),
        gpa: semester.gpa,
        total_credit_hours: semester.total_credit_hours,
        cgpa,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
