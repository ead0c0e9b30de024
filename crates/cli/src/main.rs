//! LaserNest command line.

mod job;
mod report;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lasernest_core::{validate_parts, validate_sheets, OptimizationGoal};
use lasernest_cutting::{CostBreakdown, ProductionSchedule};
use lasernest_d2::SheetNester;
use log::LevelFilter;

use crate::job::{Job, Overrides};
use crate::report::RunReport;
use crate::settings::Settings;

#[derive(Parser)]
#[command(name = "lasernest")]
#[command(about = "Sheet nesting and cost planning for laser cutting")]
#[command(version)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Nest a job file and print the result
    Nest {
        /// Path to the JSON job file
        job: PathBuf,

        /// TOML file with shop defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sheet selection goal
        #[arg(short, long, value_enum)]
        goal: Option<GoalArg>,

        /// Maximum number of sheets
        #[arg(short, long)]
        max_sheets: Option<u32>,

        /// Time limit in milliseconds (0 = unlimited)
        #[arg(short, long)]
        time_limit: Option<u64>,

        /// Never use a sheet beyond its stock
        #[arg(long)]
        strict_stock: bool,

        /// Include the production schedule projection
        #[arg(long)]
        schedule: bool,

        /// Output file for the run (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a job file without nesting it
    Validate {
        /// Path to the JSON job file
        job: PathBuf,
    },

    /// Write a sample job file
    Sample {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the available sheet selection goals
    Goals,
}

#[derive(Clone, Copy, ValueEnum)]
enum GoalArg {
    /// Highest estimated utilization
    MaterialUsage,
    /// Utilization per unit of sheet cost
    CostMinimization,
    /// Favor large sheets to open fewer of them
    SheetCount,
    /// Blend of utilization and cost
    Balanced,
}

impl From<GoalArg> for OptimizationGoal {
    fn from(arg: GoalArg) -> Self {
        match arg {
            GoalArg::MaterialUsage => OptimizationGoal::MaterialUsage,
            GoalArg::CostMinimization => OptimizationGoal::CostMinimization,
            GoalArg::SheetCount => OptimizationGoal::SheetCount,
            GoalArg::Balanced => OptimizationGoal::Balanced,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LevelFilter::Error
    } else {
        match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Nest {
            job,
            config,
            goal,
            max_sheets,
            time_limit,
            strict_stock,
            schedule,
            output,
        } => {
            let settings = match config {
                Some(path) => Settings::load(&path)?,
                None => Settings::default(),
            };
            let overrides = Overrides {
                goal: goal.map(Into::into),
                max_sheets,
                time_limit_ms: time_limit,
                strict_stock,
            };
            let plan = Job::load(&job)?.into_plan(&settings, &overrides);

            let nester = SheetNester::new(plan.constraints, plan.cutting, plan.run.clone());
            log::info!(
                "Nesting {} part types onto {} sheet specs ({}, spacing {} mm, margin {} mm)",
                plan.parts.len(),
                plan.sheets.len(),
                nester.config().goal,
                nester.constraints().min_spacing,
                nester.constraints().edge_margin
            );

            let run = nester.optimize(&plan.parts, &plan.sheets)?;

            let schedule = if schedule {
                Some(ProductionSchedule::project(&run, &plan.cutting, &plan.schedule)?)
            } else {
                None
            };
            let report = RunReport {
                run: &run,
                summary: run.summary(),
                cost: CostBreakdown::from_run(&run, &plan.cutting),
                schedule,
            };
            report.print();

            if let Some(path) = output {
                report.save_json(&path)?;
                println!("\nResults saved to: {}", path.display());
            }
        }

        Commands::Validate { job } => {
            let job = Job::load(&job)?;
            validate_parts(&job.parts)?;
            validate_sheets(&job.sheets)?;
            if let Some(constraints) = &job.constraints {
                constraints.validate()?;
            }
            if let Some(cutting) = &job.cutting {
                cutting.validate()?;
            }
            let instances: u32 = job.parts.iter().map(|p| p.quantity).sum();
            println!(
                "OK: {} part types ({} instances), {} sheet specs",
                job.parts.len(),
                instances,
                job.sheets.len()
            );
        }

        Commands::Sample { output } => {
            let json = serde_json::to_string_pretty(&Job::sample())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Sample job written to: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Goals => {
            println!("Available goals:");
            for goal in OptimizationGoal::ALL {
                println!("  - {}", goal);
            }
        }
    }

    Ok(())
}
