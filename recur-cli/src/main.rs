use clap::Parser;
use jiff::tz::TimeZone;
use recur::{count_occurrences, DayOfWeek, EventDateParams, EventError, RecurrenceRequest};
use std::io::Read;
use std::process;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "recur",
    about = "Expand a weekly recurrence into event dates",
    version
)]
struct Cli {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[arg(long)]
    until: Option<String>,

    /// Days of the week: numbers 0 (sunday) to 6 (saturday) or names, comma separated
    #[arg(long, value_delimiter = ',')]
    days: Vec<String>,

    /// Daily start time (HH:mm, default 00:00)
    #[arg(long)]
    from: Option<String>,

    /// Daily end time (HH:mm, default 23:59)
    #[arg(long)]
    to: Option<String>,

    /// IANA timezone (default: system timezone)
    #[arg(long)]
    tz: Option<String>,

    /// Read the request as JSON from a file ("-" for stdin) instead of flags
    #[arg(long, conflicts_with_all = ["start", "until", "days", "from", "to", "tz"])]
    request: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Validate the request without expanding
    #[arg(long)]
    check: bool,

    /// Print how often each requested weekday occurs in the range
    #[arg(long)]
    count: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn fail(e: &EventError) -> ! {
    eprintln!("{}", e.display_rich());
    process::exit(1);
}

fn system_tz_name() -> String {
    TimeZone::system()
        .iana_name()
        .map(str::to_string)
        .unwrap_or_else(|| "UTC".to_string())
}

fn read_request(path: &str) -> Result<EventDateParams, String> {
    let input = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("error: cannot read stdin: {e}"))?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("error: cannot read {path}: {e}"))?
    };
    EventDateParams::from_json(&input).map_err(|e| e.display_rich())
}

fn params_from_flags(cli: &Cli) -> Result<EventDateParams, EventError> {
    let (Some(start), Some(until)) = (cli.start.as_ref(), cli.until.as_ref()) else {
        eprintln!("error: --start and --until are required (or use --request)");
        process::exit(2);
    };
    if cli.days.is_empty() {
        eprintln!("error: --days is required (or use --request)");
        process::exit(2);
    }
    let days = cli
        .days
        .iter()
        .map(|d| d.parse::<DayOfWeek>())
        .collect::<Result<Vec<_>, _>>()?;
    let tz = cli.tz.clone().unwrap_or_else(system_tz_name);

    let mut params = EventDateParams::new(start.as_str(), days, until.as_str(), tz);
    params.start_time = cli.from.clone();
    params.end_time = cli.to.clone();
    Ok(params)
}

fn print_counts(request: &RecurrenceRequest, json: bool) -> Result<(), EventError> {
    let tz = request.time_zone().clone();
    let start = request
        .start_date()
        .to_zoned(tz.clone())
        .map_err(|e| EventError::eval(format!("cannot create zoned datetime: {e}")))?;
    let end = request
        .repeat_until()
        .at(23, 59, 59, 999_000_000)
        .to_zoned(tz)
        .map_err(|e| EventError::eval(format!("cannot create zoned datetime: {e}")))?;

    let counts: Vec<(DayOfWeek, usize)> = request
        .days()
        .iter()
        .map(|&day| (day, count_occurrences(&start, &end, day)))
        .collect();

    if json {
        let map: serde_json::Map<String, serde_json::Value> = counts
            .iter()
            .map(|(day, n)| (day.as_str().to_string(), serde_json::json!(n)))
            .collect();
        println!("{}", serde_json::Value::Object(map));
    } else {
        for (day, n) in &counts {
            println!("{day}: {n}");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let params = match cli.request {
        Some(ref path) => match read_request(path) {
            Ok(p) => p,
            Err(msg) => {
                eprintln!("{msg}");
                process::exit(1);
            }
        },
        None => params_from_flags(&cli).unwrap_or_else(|e| fail(&e)),
    };
    tracing::debug!(?params, "resolved request parameters");

    let request = params.to_request().unwrap_or_else(|e| fail(&e));

    if cli.check {
        println!("\u{2713} valid");
        process::exit(0);
    }

    if cli.count {
        if let Err(e) = print_counts(&request, cli.json) {
            fail(&e);
        }
        process::exit(0);
    }

    let events = request.expand().unwrap_or_else(|e| fail(&e));

    if cli.json {
        match serde_json::to_string(&events) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize: {e}");
                process::exit(1);
            }
        }
        process::exit(0);
    }

    if events.is_empty() {
        eprintln!("no occurrences in range");
        process::exit(0);
    }

    for event in &events {
        println!("{event}");
    }
}
