use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use signtrack::{OrderStore as _, SignatureSurface as _};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "signtrack", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay recorded surface events and write the signature PNG.
    Replay(ReplayArgs),
    /// Print the end-of-day pickup report for an order snapshot.
    Report(ReportArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// JSON array of surface events.
    #[arg(long)]
    script: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Logical surface width.
    #[arg(long, default_value_t = 300.0)]
    width: f64,

    /// Logical surface height.
    #[arg(long, default_value_t = 150.0)]
    height: f64,

    /// Device pixel ratio (default: from config, else 1).
    #[arg(long)]
    dpr: Option<f64>,

    /// Kiosk config JSON supplying surface options.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// JSON array of orders.
    #[arg(long)]
    orders: PathBuf,

    /// UTC day as YYYY-MM-DD (default: today).
    #[arg(long)]
    date: Option<signtrack::CalendarDate>,

    /// Emit JSON instead of a text table.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Report(args) => cmd_report(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON"))
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => signtrack::KioskConfig::from_path(path)?,
        None => signtrack::KioskConfig::default(),
    }
    .apply_env();
    let events: Vec<signtrack::SurfaceEvent> = read_json(&args.script, "event script")?;

    let opts = match args.dpr {
        Some(dpr) => config.surface.with_device_pixel_ratio(dpr),
        None => config.surface,
    };
    let mut surface =
        signtrack::CaptureSurface::mount(signtrack::LogicalSize::new(args.width, args.height), opts);
    for event in &events {
        surface.handle(event);
    }
    // A script may stop mid-stroke.
    surface.end_stroke();

    let empty = surface.is_empty();
    let image = surface.export_image();
    anyhow::ensure!(
        !image.is_empty(),
        "surface of {}x{} has no pixels to export",
        args.width,
        args.height
    );
    let png = image.png_bytes()?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    let (w, h) = surface.device_size();
    println!("events: {}", events.len());
    println!("empty: {empty}");
    println!("size: {w}x{h}");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_report(args: ReportArgs) -> anyhow::Result<()> {
    let orders: Vec<signtrack::Order> = read_json(&args.orders, "orders")?;
    let store = signtrack::MemoryOrderStore::from_orders(orders, signtrack::SystemClock)
        .with_context(|| format!("load orders '{}'", args.orders.display()))?;
    let date = args
        .date
        .unwrap_or_else(|| signtrack::Timestamp::now().date());
    let report = signtrack::EodReport::build(&store.list_orders(), date);

    if args.json {
        let out = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{out}");
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
