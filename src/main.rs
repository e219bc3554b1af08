// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use bio_record::cli::render_summary;
use bio_record::{BiographicalRecord, Cli, Command, ShowArgs};
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let Cli { log_level, command } = Cli::parse();

    match command.unwrap_or(Command::Form) {
        Command::Show(args) => {
            init_tracing(&log_level);
            run_show(&args)?;
        }
        Command::Form => {
            // The form owns the terminal; only log when explicitly asked to
            if std::env::var_os("RUST_LOG").is_some() {
                init_tracing(&log_level);
            }
            run_form_mode()?;
        }
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_show(args: &ShowArgs) -> Result<()> {
    let raw = args.raw_record();
    info!(?raw, "validating record");

    let record = match BiographicalRecord::from_fields(raw) {
        Ok(record) => record,
        Err(errors) => {
            for err in &errors {
                eprintln!("❌ {}", err);
            }
            std::process::exit(1);
        }
    };

    let missing = record.missing_fields();
    if !missing.is_empty() {
        warn!(?missing, "record is incomplete");
    }

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    println!("{}", render_summary(&record.summary_on(today), args.format)?);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_form_mode() -> Result<()> {
    let mut app = ui::FormApp::new(Local::now().date_naive());
    ui::run_ui(&mut app)?;

    if app.record.is_complete() {
        println!("{}", app.record);
    } else {
        println!("Form closed with an incomplete record: {}", app.record);
    }

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_form_mode() -> Result<()> {
    eprintln!("❌ Form mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: bio-record show --id 13-8994 --name \"Ada Lovelace\" --dob 10/12/1815 --major CSEN");
    std::process::exit(1);
}
