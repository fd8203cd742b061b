//! foodlink CLI
//!
//! Terminal front end for the surplus-food dashboard core: initializes the database from
//! the dataset CSVs, manages listings and prints the report catalog.

mod render;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use foodlink::config::FoodlinkConfig;
use foodlink::entity::dates::parse_date;
use foodlink::session::today;
use foodlink::{ListingColumn, ListingFilter, NewListing, ReportId, Session};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "foodlink")]
#[command(about = "Surplus-food donation dashboard")]
#[command(version = "0.1.0")]
struct Cli {
    /// SQLite database file (default: dataset/food_wastage.db)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Directory holding the CSV sources (default: dataset)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (default: config/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the tables and load every CSV found in the data directory
    Init,

    /// Print every listing
    Listings,

    /// Add a listing
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: i64,
        /// Expiry date, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        expiry: NaiveDate,
        #[arg(long)]
        provider_id: i64,
        #[arg(long)]
        provider_type: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        food_type: String,
        #[arg(long)]
        meal_type: String,
        /// Refuse the listing when the provider id is unknown
        #[arg(long)]
        check_provider: bool,
    },

    /// Overwrite the quantity of a listing
    UpdateQuantity {
        food_id: i64,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },

    /// Delete a listing
    Delete { food_id: i64 },

    /// Search listings; "All" disables a filter
    Search {
        #[arg(long, default_value = "All")]
        location: String,
        #[arg(long, default_value = "All")]
        provider_type: String,
        #[arg(long, default_value = "All")]
        food_type: String,
    },

    /// Show the values each search filter can take
    Filters,

    /// Run one report (1-15) or the whole catalog
    Report {
        number: Option<ReportId>,
        /// Print JSON instead of text tables
        #[arg(long)]
        json: bool,
        /// Date used as "today" by the expiry report (default: local date)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&config, cli.command, cli.quiet) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<FoodlinkConfig> {
    let mut config = match &cli.config {
        Some(path) => FoodlinkConfig::load_from(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => FoodlinkConfig::load().context("loading configuration")?,
    };
    if let Some(database) = &cli.database {
        config.database.path = database.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.dataset.dir = dir.clone();
    }
    Ok(config)
}

fn handle_init(config: &FoodlinkConfig, quiet: bool) -> anyhow::Result<()> {
    let summary = foodlink::initialize(config)?;
    if !quiet {
        println!("{}", "Database initialized".green().bold());
        for (table, load) in summary.tables() {
            println!("  {:<14} {}", table, load);
        }
        println!("  database: {}", config.database.path.display());
    }
    Ok(())
}

fn open(config: &FoodlinkConfig) -> anyhow::Result<Session> {
    Session::open(config).with_context(|| format!("opening {}", config.database.path.display()))
}

fn run(config: &FoodlinkConfig, command: Commands, quiet: bool) -> anyhow::Result<()> {
    match command {
        Commands::Init => handle_init(config, quiet)?,
        Commands::Listings => {
            let session = open(config)?;
            print!("{}", render::listings(&session.all_listings()?));
        }
        Commands::Add {
            name,
            quantity,
            expiry,
            provider_id,
            provider_type,
            location,
            food_type,
            meal_type,
            check_provider,
        } => {
            let session = open(config)?;
            let listing = NewListing {
                name,
                quantity,
                expiry_date: expiry,
                provider_id,
                provider_type,
                location,
                food_type,
                meal_type,
            };
            let id = if check_provider {
                session.insert_listing_checked(&listing)?
            } else {
                session.insert_listing(&listing)?
            };
            println!("{} listing {}", "Added".green(), id);
        }
        Commands::UpdateQuantity { food_id, quantity } => {
            let session = open(config)?;
            let changed = session.update_quantity(food_id, quantity)?;
            if changed == 0 {
                println!("No listing with id {}; nothing changed", food_id);
            } else {
                println!("{} listing {} quantity to {}", "Updated".green(), food_id, quantity);
            }
        }
        Commands::Delete { food_id } => {
            let session = open(config)?;
            let removed = session.delete_listing(food_id)?;
            if removed == 0 {
                println!("No listing with id {}; nothing deleted", food_id);
            } else {
                println!("{} listing {}", "Deleted".green(), food_id);
            }
        }
        Commands::Search {
            location,
            provider_type,
            food_type,
        } => {
            let session = open(config)?;
            let filter = ListingFilter::new(location.as_str(), provider_type.as_str(), food_type.as_str());
            let found = session.search_listings(&filter)?;
            if found.listings.is_empty() {
                println!("No listings match");
                return Ok(());
            }
            print!("{}", render::listings(&found.listings));
            println!("\n{}", "Provider contacts".bold());
            if found.contacts.is_empty() {
                println!("No matching providers found.");
            } else {
                print!("{}", render::contacts(&found.contacts));
            }
        }
        Commands::Filters => {
            let session = open(config)?;
            for column in ListingColumn::ALL {
                let values = session.distinct_values(column)?;
                println!("{}: All, {}", column.label().bold(), values.join(", "));
            }
        }
        Commands::Report { number, json, today: date } => {
            let session = open(config)?;
            let today = date.unwrap_or_else(today);
            match number {
                Some(id) => {
                    let table = session.run_report(id, today)?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&table)?);
                    } else {
                        print!("{}", render::report(&table));
                    }
                }
                None => {
                    let outcomes = session.run_reports(today)?;
                    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
                    if json {
                        let all: Vec<_> = outcomes.iter().map(render::outcome_json).collect();
                        println!("{}", serde_json::to_string_pretty(&all)?);
                    } else {
                        for outcome in &outcomes {
                            match &outcome.result {
                                Ok(table) => print!("{}", render::report(table)),
                                Err(e) => println!(
                                    "{} {}\n{} {}",
                                    format!("{}.", outcome.id.number()).bold(),
                                    outcome.id.title().bold(),
                                    "failed:".red(),
                                    e
                                ),
                            }
                            println!();
                        }
                    }
                    if failed > 0 {
                        bail!("{} of {} reports failed", failed, outcomes.len());
                    }
                }
            }
        }
    }
    Ok(())
}
