use clap::Parser;
use faultline_radar::fault::{FaultProximityResolver, FaultQuery, DEFAULT_RADIUS_KM};

/// Faultline Radar: fault-line proximity lookup
///
/// Ranks the geological faults nearest to a point by great-circle distance,
/// with compass direction and slip classification. Prints the ranked results
/// as JSON on stdout and a human-readable summary on stderr.
///
/// Examples:
///   faultline --lat 35.6762 --lng 139.6503
///   faultline --lat 37.7749 --lng -122.4194 --radius 250
///   faultline --serve --port 8080
#[derive(Parser)]
#[command(name = "faultline", version, about, long_about = None)]
struct Cli {
    /// Latitude (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Search radius in kilometers. If nothing is found, the search is
    /// widened once to 500 km.
    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius: f64,

    /// Start the HTTP API server instead of a one-shot lookup.
    #[arg(long)]
    serve: bool,

    /// Server bind host.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server bind port.
    #[arg(long, short = 'p', default_value_t = 8080)]
    port: u16,
}

fn main() {
    let cli = Cli::parse();

    if cli.serve {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap_or_else(|e| {
                eprintln!("Error: Cannot start runtime: {}", e);
                std::process::exit(1);
            });
        runtime.block_on(faultline_radar::server::start(&cli.host, cli.port));
        return;
    }

    // ── Validate input ──────────────────────────────────────────

    let (lat, lng) = match (cli.lat, cli.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            eprintln!("Error: No query point specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  faultline --lat 35.6762 --lng 139.6503");
            eprintln!("  faultline --lat 37.7749 --lng -122.4194 --radius 250");
            eprintln!("  faultline --serve --port 8080");
            std::process::exit(1);
        }
    };

    let query = FaultQuery::new(lat, lng, cli.radius).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // ── Resolve ─────────────────────────────────────────────────

    let resolver = FaultProximityResolver::new();
    let outcome = resolver
        .resolve_widened(&query.point, query.radius_km)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    // ── Summary to stderr, JSON to stdout ───────────────────────

    if outcome.widened {
        eprintln!(
            "  Nothing within {} km, widened the search to {} km.",
            cli.radius, outcome.radius_km
        );
    }

    if outcome.results.is_empty() {
        eprintln!("  No fault lines within {} km.", outcome.radius_km);
    } else {
        for result in &outcome.results {
            eprintln!(
                "  {:<30} {:>7.1} km {:<3} ({})",
                result.name, result.distance, result.direction, result.fault_type
            );
        }
    }

    if outcome.skipped > 0 {
        eprintln!("  Skipped {} malformed feature(s).", outcome.skipped);
    }

    println!("{}", serde_json::to_string_pretty(&outcome.results).unwrap());
}
