//! lrudemo - walk a keyedlru cache through adds and lookups

mod scenario;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::scenario::Report;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 4)]
    capacity: usize,

    /// Keys to add, in order
    #[arg(short, long, value_delimiter = ',', default_values = ["kA", "kB", "kC", "kD", "kE", "kF"])]
    keys: Vec<String>,

    /// Keys to look up after all adds, in order
    #[arg(short, long, value_delimiter = ',', default_values = ["kF", "kC", "kC"])]
    get: Vec<String>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!("Starting lrudemo v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    let report = scenario::run(args.capacity, &args.keys, &args.get)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &Report) {
    println!("capacity: {}", report.capacity);

    if report.evicted.is_empty() {
        println!("evicted:  (none)");
    } else {
        println!("evicted:  {}", report.evicted.join(", "));
    }

    for lookup in &report.lookups {
        match &lookup.found {
            Some(record) => println!(
                "get {:<6} -> {} (payload {})   order: [{}]",
                lookup.key,
                record.id,
                record.payload,
                lookup.order.join(", ")
            ),
            None => println!(
                "get {:<6} -> miss   order: [{}]",
                lookup.key,
                lookup.order.join(", ")
            ),
        }
    }

    println!("final order (most -> least recent): [{}]", report.order.join(", "));
    println!(
        "stats: {} hits, {} misses, {} inserts, {} updates, {} evictions, hit ratio {:.2}",
        report.stats.hits(),
        report.stats.misses(),
        report.stats.inserts(),
        report.stats.updates(),
        report.stats.evictions(),
        report.stats.hit_ratio()
    );
}
