use std::io::Read as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wallfit::{
    Applied, Canvas, DefaultImageSource, DirectorySurfaceWriter, InputKind, Invocation,
    InvocationDefaults, LayoutMode, Response, WallfitConfig, WallfitError, WallfitResult,
};

#[derive(Parser, Debug)]
#[command(name = "wallfit", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set the wallpaper from an http(s) URL.
    Url(SetArgs),
    /// Set the wallpaper from a base64 payload (`-` reads stdin).
    Base64(SetArgs),
    /// Set the wallpaper from a local image file.
    File(SetArgs),
    /// Print the transform a layout mode resolves to, as JSON.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct SetArgs {
    /// Image reference: URL, base64 payload or path depending on the subcommand.
    input: Option<String>,

    /// Surface to update: home, lock or both.
    #[arg(long)]
    target: Option<String>,

    /// Layout mode: fill, fit, stretch or center.
    #[arg(long)]
    display: Option<String>,

    /// Display width in pixels (overrides config).
    #[arg(long)]
    width: Option<u32>,

    /// Display height in pixels (overrides config).
    #[arg(long)]
    height: Option<u32>,

    /// Directory receiving home.png / lock.png (overrides config).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as a JSON object on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Source size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    src: (u32, u32),

    /// Destination size as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_size)]
    dst: (u32, u32),

    /// Layout mode: fill, fit, stretch or center.
    #[arg(long, default_value = "fill")]
    display: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Url(args) => cmd_set(args, InputKind::Url),
        Command::Base64(args) => cmd_set(args, InputKind::Base64),
        Command::File(args) => cmd_set(args, InputKind::File),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &SetArgs) -> WallfitResult<WallfitConfig> {
    let mut cfg = match &args.config {
        Some(path) => WallfitConfig::from_path(path)?,
        None => WallfitConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.display.width = w;
    }
    if let Some(h) = args.height {
        cfg.display.height = h;
    }
    if let Some(dir) = &args.out_dir {
        cfg.output_dir = dir.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_set(args: SetArgs, kind: InputKind) -> anyhow::Result<ExitCode> {
    let json = args.json;
    let result = run_set(args, kind);

    let response = Response::from(&result);
    if json {
        println!("{}", serde_json::to_string(&response)?);
    } else {
        eprintln!("{}", response.message);
    }
    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_set(args: SetArgs, kind: InputKind) -> WallfitResult<Applied> {
    let cfg = load_config(&args)?;
    let defaults = InvocationDefaults {
        target: cfg.default_target,
        display: cfg.default_display,
    };
    let destination = Canvas::new(cfg.display.width, cfg.display.height)?;

    let input = match (kind, args.input) {
        (InputKind::Base64, Some(s)) if s == "-" => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| {
                    WallfitError::fetch(format!("read base64 payload from stdin: {e}"))
                })?;
            Some(buf)
        }
        (_, input) => input,
    };
    let invocation = Invocation {
        input,
        target: args.target,
        display: args.display,
    };

    let source = DefaultImageSource::new(&cfg.fetch)?;
    let mut writer = DirectorySurfaceWriter::new(&cfg.output_dir);
    wallfit::apply_invocation(
        invocation,
        kind,
        defaults,
        destination,
        &source,
        &mut writer,
    )
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<ExitCode> {
    let mode = args.display.parse::<LayoutMode>()?;
    let t = wallfit::resolve(args.src.0, args.src.1, args.dst.0, args.dst.1, mode)?;
    println!("{}", serde_json::to_string_pretty(&t)?);
    Ok(ExitCode::SUCCESS)
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad width '{w}': {e}"))?;
    let h = h
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("bad height '{h}': {e}"))?;
    Ok((w, h))
}
