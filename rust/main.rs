use chrono::{Datelike, Local};
use clap::Parser;
use itertools::Itertools;
use std::io::Write;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fedcal::json::JSON;
use fedcal::scheduling::{holiday_schedule, BusinessDayCalculator, DateRoll};
use fedcal::settings::{Settings, DEFAULT_CONFIG_FILE};
use fedcal::Result;

/// Find the date a number of U.S. federal business days after a start date.
///
/// The start date counts as day 1 if it is a business day. Weekends and observed federal
/// holidays are skipped.
#[derive(Parser, Debug)]
#[command(name = "fedcal", version, about)]
struct Args {
    /// Start date in MM/DD/YYYY format. Defaults to today.
    date: Option<String>,

    /// Number of business days to count. Overrides the configured value.
    #[arg(short = 'n', long)]
    days: Option<i32>,

    /// Print the full calculation as JSON.
    #[arg(long)]
    json: bool,

    /// Print every business day counted.
    #[arg(long)]
    list: bool,

    /// Print the month containing the result, marking weekends and holidays.
    #[arg(long)]
    month: bool,

    /// List the observed federal holidays of a year and exit.
    #[arg(long, value_name = "YEAR")]
    holidays: Option<i32>,

    /// Settings file, without extension.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let mut settings = Settings::load_from(&args.config)?;
    if let Some(days) = args.days {
        settings.business_days = days;
    }
    debug!(?settings, "loaded settings");
    let calc = BusinessDayCalculator::new(settings);

    if let Some(year) = args.holidays {
        for (holiday, date) in holiday_schedule(year)? {
            writeln!(out, "{}  {}", calc.format(&date), holiday.name())?;
        }
        return Ok(());
    }

    let input = match &args.date {
        Some(date) => date.clone(),
        None => Local::now().date_naive().format("%m/%d/%Y").to_string(),
    };
    let calculation = calc.calculate(&input)?;

    if args.json {
        writeln!(out, "{}", calculation.to_json_pretty()?)?;
        return Ok(());
    }
    if args.list {
        let lines = calculation
            .dates
            .iter()
            .enumerate()
            .map(|(i, d)| format!("{:>3}  {}", i + 1, calc.format(d)))
            .join("\n");
        writeln!(out, "{}", lines)?;
    } else {
        writeln!(out, "{}", calc.format(&calculation.result))?;
    }
    if args.month {
        let result = calculation.result;
        writeln!(out)?;
        write!(out, "{}", calc.calendar().print_month(result.year(), result.month())?)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(&args, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(?err, "calculation failed");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
