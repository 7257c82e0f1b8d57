//! WoofWell CLI
//!
//! Command-line front-end over the local record store:
//! - Sign up / log in (demo only, nothing is verified)
//! - Show the dashboard and profile
//! - Set the current mood
//! - Tick off daily tasks
//! - Manage vaccination records
//! - Get food suggestions

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use woofwell::config::{generate_default_config, Config, StorageConfig};
use woofwell::food::{recommend, DogSize, FoodQuery, HealthNeed, LifeStage};
use woofwell::logging::init_logging;
use woofwell::mood::{current_mood, set_mood};
use woofwell::profile::{ensure_profile_seeded, load_profile, record_login, signup, Dog, Profile};
use woofwell::store::{FileStore, RecordKey, RecordStoreExt};
use woofwell::tracker::{load_tracker, reset_tracker, set_task, toggle_task, Task};
use woofwell::vaccination::{
    add_vaccination, default_vaccinations, list_vaccinations, parse_date, remove_vaccination,
    NewVaccination, VaccinationRecord,
};
use woofwell::view::{DashboardView, FoodView, ProfileCard, TrackerView, VaccinationListView};
use woofwell::ParseError;

#[derive(Parser)]
#[command(name = "woofwell")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pet-care tracker: profile, mood, daily tasks and vaccinations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config dir>/woofwell/config.toml or ./woofwell.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory (overrides config and WOOFWELL_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save a new profile, replacing the current one
    Signup {
        #[arg(long, default_value = "")]
        email: String,
        /// Stored as-is for the demo flow; never checked
        #[arg(long, default_value = "")]
        password: String,
        /// Dog's name
        #[arg(long)]
        name: Option<String>,
        /// Dog's age (free text, e.g. "3 years")
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        breed: Option<String>,
        #[arg(long)]
        size: Option<String>,
        /// Favourite activity
        #[arg(long)]
        favourite: Option<String>,
    },

    /// Record a login (any email is accepted)
    Login {
        #[arg(long)]
        email: String,
    },

    /// Show the dashboard
    Dashboard,

    /// Show the dog's profile
    Profile,

    /// Set the current mood (e.g. happy, calm, tired)
    Mood { tag: String },

    /// Daily task checklist
    Tracker {
        #[command(subcommand)]
        action: Option<TrackerAction>,
    },

    /// Vaccination records
    Vax {
        #[command(subcommand)]
        action: Option<VaxAction>,
    },

    /// Food suggestions
    Food {
        /// puppy, adult or senior
        #[arg(long, default_value = "adult")]
        age: LifeStage,
        /// small, medium or large
        #[arg(long, default_value = "medium")]
        size: DogSize,
        /// normal or sensitive
        #[arg(long, default_value = "normal")]
        health: HealthNeed,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum TrackerAction {
    /// Show tasks, progress and points
    Show,
    /// Flip a task (walk, play, food, water, groom)
    Toggle { task: Task },
    /// Mark a task done
    Done { task: Task },
    /// Mark a task not done
    Undo { task: Task },
    /// Clear all tasks
    Reset,
}

#[derive(Subcommand)]
pub enum VaxAction {
    /// List vaccinations with status
    List,
    /// Add a vaccination to the top of the list
    Add {
        /// Vaccine name (default: Unnamed)
        #[arg(long)]
        name: Option<String>,
        /// Date given, YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_given)]
        given: Option<NaiveDate>,
        /// Next due date, YYYY-MM-DD
        #[arg(long, value_parser = parse_next)]
        next: Option<NaiveDate>,
    },
    /// Remove the vaccination at a list position
    Remove { index: usize },
}

fn parse_given(s: &str) -> Result<NaiveDate, ParseError> {
    parse_date("given", s)
}

fn parse_next(s: &str) -> Result<NaiveDate, ParseError> {
    parse_date("next", s)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }

    init_logging(&config.logging);

    let mut store = open_store(&config.storage)?;
    ensure_profile_seeded(&mut store).context("Failed to seed demo profile")?;

    run(cli.command, &mut store)
}

fn open_store(config: &StorageConfig) -> anyhow::Result<FileStore> {
    let path = config.data_path();
    tracing::debug!("Data directory: {:?}", path);

    let store = FileStore::open(&path)
        .with_context(|| format!("Failed to open data directory {:?}", path))?;
    Ok(match config.quota() {
        Some(quota) => store.with_quota(quota),
        None => store,
    })
}

fn run(command: Commands, store: &mut FileStore) -> anyhow::Result<()> {
    let today = Local::now().date_naive();

    match command {
        Commands::Signup {
            email,
            password,
            name,
            age,
            breed,
            size,
            favourite,
        } => {
            let profile = Profile {
                email,
                password,
                dog: Some(Dog {
                    name,
                    age,
                    breed,
                    size,
                    favourite,
                }),
            };
            signup(store, &profile).context("Failed to save profile")?;
            println!("{}", ProfileCard::new(&profile));
        }

        Commands::Login { email } => {
            record_login(store, &email, Utc::now()).context("Failed to record login")?;
            let dashboard = DashboardView::new(
                load_profile(&*store).as_ref(),
                current_mood(&*store).as_ref(),
                today,
            );
            println!("{}", dashboard);
        }

        Commands::Dashboard => {
            let dashboard = DashboardView::new(
                load_profile(&*store).as_ref(),
                current_mood(&*store).as_ref(),
                today,
            );
            let tracker = load_tracker(&*store);
            let vaccinations: Vec<VaccinationRecord> = store
                .read_opt(RecordKey::Vaccinations)
                .unwrap_or_else(default_vaccinations);
            let due = VaccinationListView::new(&vaccinations, Utc::now()).attention_count();

            println!("{}", dashboard);
            println!();
            println!(
                "Today: {}% done, {} points",
                tracker.percent(),
                tracker.points()
            );
            println!("Vaccinations needing attention: {}", due);
        }

        Commands::Profile => match load_profile(&*store) {
            Some(profile) => println!("{}", ProfileCard::new(&profile)),
            None => println!("No profile saved. Create one with: woofwell signup --name <dog>"),
        },

        Commands::Mood { tag } => {
            if tag.trim().is_empty() {
                bail!("Mood tag cannot be empty");
            }
            let mood = set_mood(store, &tag, Utc::now()).context("Failed to save mood")?;
            println!("Mood set to {}", mood.mood);
        }

        Commands::Tracker { action } => {
            let state = match action.unwrap_or(TrackerAction::Show) {
                TrackerAction::Show => load_tracker(&*store),
                TrackerAction::Toggle { task } => toggle_task(store, task)?,
                TrackerAction::Done { task } => set_task(store, task, true)?,
                TrackerAction::Undo { task } => set_task(store, task, false)?,
                TrackerAction::Reset => reset_tracker(store)?,
            };
            println!("{}", TrackerView::from(&state));
        }

        Commands::Vax { action } => {
            let list = match action.unwrap_or(VaxAction::List) {
                VaxAction::List => list_vaccinations(store)?,
                VaxAction::Add { name, given, next } => {
                    let given_default = Utc::now().date_naive();
                    let record = NewVaccination { name, given, next }.into_record(given_default);
                    add_vaccination(store, record).context("Failed to add vaccination")?
                }
                VaxAction::Remove { index } => {
                    let len = list_vaccinations(store)?.len();
                    if index >= len {
                        bail!("No vaccination at position {} ({} entries)", index, len);
                    }
                    remove_vaccination(store, index).context("Failed to remove vaccination")?
                }
            };
            println!("{}", VaccinationListView::new(&list, Utc::now()));
        }

        Commands::Food { age, size, health } => {
            let cards = recommend(&FoodQuery { age, size, health });
            println!("{}", FoodView::new(cards));
        }

        Commands::Config { output } => write_default_config(output.as_ref())?,
    }

    Ok(())
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}
