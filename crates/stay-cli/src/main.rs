//! `stay` CLI — check availability and manage bookings in a ledger file.
//!
//! ## Usage
//!
//! ```sh
//! # List properties open on or before March 1st
//! stay --ledger ledger.json properties --available-from 2025-03-01
//!
//! # Free date ranges of property 1
//! stay --ledger ledger.json free -p 1
//!
//! # Only free ranges of at least a week, as JSON
//! stay --ledger ledger.json --json free -p 1 --min-days 7
//!
//! # Booked and free days in one view
//! stay --ledger ledger.json calendar -p 1
//!
//! # Would these dates be accepted? (exit code 1 when not)
//! stay --ledger ledger.json check -p 1 --start 2025-03-01 --end 2025-03-05
//!
//! # Book, move and cancel stays (writes the ledger back in place)
//! stay --ledger ledger.json book -p 1 --guest "John Doe" --start 2025-03-01 --end 2025-03-05
//! stay --ledger ledger.json rebook -b 1 --end 2025-03-07
//! stay --ledger ledger.json --output out.json cancel -b 1
//! ```
//!
//! Log verbosity is controlled with `RUST_LOG` (default `warn`); logs go to
//! stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use stay_engine::{parse_date, DateRange, FreeRange};
use stay_ledger::{BookingId, BookingUpdate, Ledger, NewBooking, PropertyFilter, PropertyId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stay",
    version,
    about = "Availability checks and bookings for short-term rentals"
)]
struct Cli {
    /// Ledger snapshot file (JSON)
    #[arg(short, long)]
    ledger: PathBuf,

    /// Write the updated ledger here instead of back to --ledger
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List properties, newest first
    Properties {
        /// Only properties whose window opens on or before this date
        #[arg(long, value_parser = date_arg)]
        available_from: Option<NaiveDate>,
        /// Only properties whose window closes on or after this date
        #[arg(long, value_parser = date_arg)]
        available_to: Option<NaiveDate>,
    },
    /// Show the free date ranges of a property
    Free {
        #[arg(short, long)]
        property: u64,
        /// Only ranges of at least this many days
        #[arg(long)]
        min_days: Option<i64>,
    },
    /// Show booked and free ranges of a property as JSON
    Calendar {
        #[arg(short, long)]
        property: u64,
    },
    /// Check whether dates can be booked, without booking them
    Check {
        #[arg(short, long)]
        property: u64,
        #[arg(long, value_parser = date_arg)]
        start: NaiveDate,
        #[arg(long, value_parser = date_arg)]
        end: NaiveDate,
        /// Booking to ignore in the conflict check (when moving it)
        #[arg(long)]
        exclude: Option<u64>,
    },
    /// Create a booking
    Book {
        #[arg(short, long)]
        property: u64,
        #[arg(long)]
        guest: String,
        #[arg(long, value_parser = date_arg)]
        start: NaiveDate,
        #[arg(long, value_parser = date_arg)]
        end: NaiveDate,
    },
    /// Change a booking's guest name and/or dates
    Rebook {
        #[arg(short, long)]
        booking: u64,
        #[arg(long)]
        guest: Option<String>,
        #[arg(long, value_parser = date_arg)]
        start: Option<NaiveDate>,
        #[arg(long, value_parser = date_arg)]
        end: Option<NaiveDate>,
    },
    /// Delete a booking
    Cancel {
        #[arg(short, long)]
        booking: u64,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let ledger = Ledger::load(&cli.ledger)
        .with_context(|| format!("Failed to load ledger: {}", cli.ledger.display()))?;
    let output = cli.output.as_deref().unwrap_or(cli.ledger.as_path());
    debug!(path = %cli.ledger.display(), "ledger loaded");

    match cli.command {
        Commands::Properties {
            available_from,
            available_to,
        } => {
            let properties = ledger.list_properties(&PropertyFilter {
                available_from,
                available_to,
            });
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&properties)?);
            } else {
                for p in &properties {
                    println!("{}\t{}\t{}", p.id, p.availability_window, p.title);
                }
            }
        }
        Commands::Free { property, min_days } => {
            let ranges: Vec<FreeRange> = ledger
                .free_ranges(PropertyId(property))?
                .into_iter()
                .filter(|r| min_days.is_none_or(|min| r.days >= min))
                .collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ranges)?);
            } else {
                for r in &ranges {
                    println!("{}..{}\t{} days", r.start, r.end, r.days);
                }
            }
        }
        Commands::Calendar { property } => {
            let calendar = ledger.calendar(PropertyId(property))?;
            println!("{}", serde_json::to_string_pretty(&calendar)?);
        }
        Commands::Check {
            property,
            start,
            end,
            exclude,
        } => {
            let candidate = DateRange::new(start, end)?;
            ledger.check_availability(PropertyId(property), &candidate, exclude.map(BookingId))?;
            println!("available: {}", candidate);
        }
        Commands::Book {
            property,
            guest,
            start,
            end,
        } => {
            let booking = ledger.create_booking(NewBooking {
                property_id: PropertyId(property),
                guest_name: guest,
                range: DateRange::new(start, end)?,
            })?;
            save(&ledger, output)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&booking)?);
            } else {
                println!(
                    "Booking {} created for property {}: {}",
                    booking.id, booking.property_id, booking.range
                );
            }
        }
        Commands::Rebook {
            booking,
            guest,
            start,
            end,
        } => {
            let booking = ledger.update_booking(
                BookingId(booking),
                BookingUpdate {
                    guest_name: guest,
                    start,
                    end,
                },
            )?;
            save(&ledger, output)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&booking)?);
            } else {
                println!("Booking {} updated: {}", booking.id, booking.range);
            }
        }
        Commands::Cancel { booking } => {
            ledger.delete_booking(BookingId(booking))?;
            save(&ledger, output)?;
            println!("Booking {} cancelled", booking);
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn save(ledger: &Ledger, path: &Path) -> Result<()> {
    ledger
        .save(path)
        .with_context(|| format!("Failed to write ledger: {}", path.display()))?;
    debug!(path = %path.display(), "ledger saved");
    Ok(())
}
