use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "gyre", version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a full animation as a GIF.
    Render(RenderArgs),
    /// Render a single step as a PNG.
    Frame(FrameArgs),
    /// Print a JSON summary of a variant.
    Describe(DescribeArgs),
    /// List the built-in variants.
    List,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Animation to render.
    #[arg(long, value_enum, default_value_t = VariantChoice::Heptagram)]
    variant: VariantChoice,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Render steps one after another on the calling thread.
    #[arg(long)]
    sequential: bool,

    /// Worker threads for parallel rendering (defaults to one per core).
    #[arg(long, conflicts_with = "sequential")]
    threads: Option<usize>,

    /// Delay between frames in hundredths of a second.
    #[arg(long, default_value_t = 0)]
    delay_cs: u16,

    /// Fail instead of replacing an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Step index (0-based).
    #[arg(long)]
    step: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct DescribeArgs {
    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantChoice {
    Circle,
    Squares,
    Heptagram,
    Overlay,
    Cross,
    Crosses,
}

impl From<VariantChoice> for gyre::Variant {
    fn from(v: VariantChoice) -> Self {
        match v {
            VariantChoice::Circle => Self::Circle,
            VariantChoice::Squares => Self::Squares,
            VariantChoice::Heptagram => Self::Heptagram,
            VariantChoice::Overlay => Self::Overlay,
            VariantChoice::Cross => Self::Cross,
            VariantChoice::Crosses => Self::Crosses,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Describe(args) => cmd_describe(args),
        Command::List => cmd_list(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = gyre::SceneConfig::default();
    let variant = gyre::Variant::from(args.scene.variant);
    let pattern = variant
        .build(&cfg)
        .with_context(|| format!("build variant '{}'", variant.name()))?;

    let threading = gyre::RenderThreading {
        parallel: !args.sequential,
        threads: args.threads,
    };
    let started = Instant::now();
    let (seq, stats) = gyre::assemble(
        cfg.canvas,
        pattern.as_ref(),
        &gyre::RenderSettings::default(),
        &threading,
        args.delay_cs,
    )?;
    tracing::info!(
        variant = variant.name(),
        frames = stats.frames_total,
        unique = stats.frames_unique,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "rendered"
    );

    let enc = gyre::GifEncodeConfig {
        overwrite: !args.no_overwrite,
        ..gyre::GifEncodeConfig::new(&args.out)
    };
    gyre::write_gif(&seq, &gyre::Palette::standard(), &enc)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = gyre::SceneConfig::default();
    let variant = gyre::Variant::from(args.scene.variant);
    let pattern = variant
        .build(&cfg)
        .with_context(|| format!("build variant '{}'", variant.name()))?;

    let frame = gyre::render_step(
        cfg.canvas,
        args.step,
        pattern.as_ref(),
        &gyre::RenderSettings::default(),
    )?;
    gyre::write_frame_png(&frame, &gyre::Palette::standard(), &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_describe(args: DescribeArgs) -> anyhow::Result<()> {
    let summary = gyre::describe(args.scene.variant.into(), &gyre::SceneConfig::default())?;
    let json = serde_json::to_string_pretty(&summary).context("serialize summary")?;
    println!("{json}");
    Ok(())
}

fn cmd_list() -> anyhow::Result<()> {
    for v in gyre::Variant::ALL {
        println!("{:<10} {}", v.name(), v.summary());
    }
    Ok(())
}
