//! Command-line interface.
//!
//! `demo` replays the classic driver scenario (a handful of tracked
//! allocations, the diagnostic report, bulk teardown); `scopes` walks
//! through checkpointed push/pop release.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use minnesvakt_config::MinnesvaktConfig;
use minnesvakt_core::prelude::*;
use minnesvakt_telemetry::EventLogger;

#[derive(Parser)]
#[command(name = "minnesvakt", version, about = "Tracked-memory registry demo driver")]
pub struct Cli {
    /// Path to the configuration YAML file; defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Allocate a mixed set of tracked values, print the report, release all
    Demo,
    /// Demonstrate scoped (checkpoint-based) bulk release
    Scopes,
}

pub fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => MinnesvaktConfig::load_from_path(path)?,
        None => MinnesvaktConfig::load_defaults()?,
    };
    EventLogger::init(&config.telemetry.log_level);
    tracing::debug!(
        initial_slots = config.core.registry.initial_slots,
        "configuration loaded"
    );

    let mut registry = MemoryRegistry::new(config.core.registry.initial_slots);
    match cli.command {
        Commands::Demo => run_demo(&mut registry),
        Commands::Scopes => run_scopes(&mut registry),
    }
}

fn run_demo(registry: &mut MemoryRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let _b1 = registry.new_bool()?;
    let _b2 = registry.new_bool()?;
    let _i1 = registry.new_int()?;
    let _i2 = registry.new_int()?;
    let _s1 = registry.new_string_of_len(10)?;
    let _s2 = registry.new_string_of_len(100)?;
    let mut s3 = registry.new_string("Hello World")?;
    s3 = registry.concat_string(" Joe", Some(s3))?;

    // format() borrows the registry mutably, so tracked text fed back in as
    // an argument is copied out first.
    let joined = registry.string_text(s3)?.to_owned();
    let banner = registry.format(
        "strings:%s, tracked:%b, slots:%u",
        &[
            FormatArg::Str(&joined),
            FormatArg::Bool(true),
            FormatArg::Uint(registry.slot_count() as u64),
        ],
    )?;
    println!("{}", registry.string_text(banner)?);

    let today = registry.new_date(&SystemClock)?;
    let stamp = registry.format_date(today, "%Y-%m-%d %H:%M:%S")?;
    println!("captured at {}", registry.string_text(stamp)?);

    print!("{}", registry.report_string());
    println!("Total Used {}", registry.total_bytes_used());

    EventLogger::log_registry_event(
        "teardown",
        registry.slot_count(),
        registry.total_bytes_used(),
    );
    registry.release_all();
    Ok(())
}

fn run_scopes(registry: &mut MemoryRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let keeper = registry.new_string("survives the scope")?;
    println!("before scope: {} slots", registry.slot_count());

    registry.push_context()?;
    for n in 0..8 {
        registry.format("scratch %d", &[FormatArg::Int(n)])?;
    }
    println!("inside scope: {} slots", registry.slot_count());

    registry.pop_context()?;
    println!("after pop:    {} slots", registry.slot_count());
    println!("keeper still reads {:?}", registry.string_text(keeper)?);

    print!("{}", registry.report_string());
    registry.release_all();
    Ok(())
}
