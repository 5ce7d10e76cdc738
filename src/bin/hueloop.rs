use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hueloop", version)]
struct Cli {
    /// Log more (-v info, -vv debug with per-frame hue and brightness, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full animation.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print the hue and brightness of every frame.
    Schedule(ScheduleArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON config file. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input image.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Animation length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Full hue turns over the duration.
    #[arg(long, allow_negative_numbers = true)]
    shifts: Option<f64>,

    /// Brightness cycles over the duration.
    #[arg(long, allow_negative_numbers = true)]
    blinks: Option<f64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output animation path (.apng or .png).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Play the animation this many times instead of looping forever.
    #[arg(long)]
    loops: Option<u16>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Reuse frames whose hue and brightness repeat.
    #[arg(long, default_value_t = false)]
    static_frame_elision: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Schedule(args) => cmd_schedule(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<hueloop::AnimationConfig> {
    let mut cfg = match &args.config {
        Some(path) => hueloop::AnimationConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => hueloop::AnimationConfig::default(),
    };
    if let Some(p) = &args.in_path {
        cfg.input_path = p.clone();
    }
    if let Some(fps) = args.fps {
        cfg.frame_rate = fps;
    }
    if let Some(d) = args.duration {
        cfg.duration = d;
    }
    if let Some(s) = args.shifts {
        cfg.shifts = s;
    }
    if let Some(b) = args.blinks {
        cfg.blinks = b;
    }
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.config)?;
    if let Some(out) = args.out {
        cfg.output_path = out;
    }
    if let Some(n) = args.loops {
        cfg.loop_mode = hueloop::LoopMode::Finite(n);
    }

    let threading = hueloop::RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
        static_frame_elision: args.static_frame_elision,
    };
    let report = hueloop::run(&cfg, &threading)?;

    eprintln!(
        "wrote {} ({} frames, {})",
        report.output_path.display(),
        report.stats.frames_total,
        report.canvas
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    hueloop::render_preview(&cfg, hueloop::FrameIndex(args.frame), &args.out)
        .with_context(|| format!("render frame {} to '{}'", args.frame, args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.config)?;
    let schedule = cfg.schedule()?;
    println!("frame elapsed_s hue brightness");
    for p in schedule.iter() {
        println!(
            "{} {:.6} {:.6} {:.6}",
            p.index.0, p.elapsed_secs, p.hue, p.brightness
        );
    }
    Ok(())
}
