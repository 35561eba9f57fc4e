use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "crossreel", version)]
struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render all frames, then encode an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the timing plan for the current inputs without writing anything.
    Plan(SettingsArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Write the numbered frames only; skip the encoder.
    #[arg(long)]
    no_encode: bool,
}

#[derive(Args, Debug)]
struct SettingsArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of numerically named input images.
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// Directory the numbered PNG frames are written to.
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Output MP4 path.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    fps: Option<u32>,

    /// Total video length as mm:ss.
    #[arg(long)]
    duration: Option<String>,

    /// Cross-fade length in milliseconds.
    #[arg(long)]
    transition_ms: Option<u64>,

    /// x264 constant rate factor.
    #[arg(long)]
    crf: Option<u8>,

    /// Fail instead of overwriting an existing output file.
    #[arg(long)]
    no_overwrite: bool,
}

impl SettingsArgs {
    fn resolve(self) -> anyhow::Result<crossreel::SlideshowConfig> {
        let mut cfg = match &self.config {
            Some(path) => crossreel::SlideshowConfig::from_json_file(path)
                .map_err(staged)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => crossreel::SlideshowConfig::default(),
        };

        if let Some(v) = self.inputs {
            cfg.inputs_dir = v;
        }
        if let Some(v) = self.frames {
            cfg.frames_dir = v;
        }
        if let Some(v) = self.out {
            cfg.output = v;
        }
        if let Some(v) = self.width {
            cfg.width = v;
        }
        if let Some(v) = self.height {
            cfg.height = v;
        }
        if let Some(v) = self.fps {
            cfg.fps = v;
        }
        if let Some(v) = self.duration {
            cfg.duration = v;
        }
        if let Some(v) = self.transition_ms {
            cfg.transition_ms = v;
        }
        if let Some(v) = self.crf {
            cfg.crf = v;
        }
        if self.no_overwrite {
            cfg.overwrite = false;
        }
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn staged(err: crossreel::CrossreelError) -> anyhow::Error {
    let stage = err.stage();
    anyhow::Error::new(err).context(format!("{stage} stage failed"))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = args.settings.resolve()?;
    let opts = crossreel::RunOpts {
        encode: !args.no_encode,
    };

    let summary = crossreel::run_slideshow(&cfg, opts).map_err(staged)?;

    eprintln!(
        "wrote {} frames to {}",
        summary.stats.frames_total,
        cfg.frames_dir.display()
    );
    if let Some(video) = summary.video {
        eprintln!("wrote {}", video.display());
    }
    Ok(())
}

fn cmd_plan(args: SettingsArgs) -> anyhow::Result<()> {
    let cfg = args.resolve()?;
    let (supplier, plan) = crossreel::plan_slideshow(&cfg).map_err(staged)?;

    println!("images:            {}", plan.item_count);
    println!("frame budget:      {}", plan.frame_budget);
    println!("hold:              {} ms", plan.hold_ms);
    println!("first hold frames: {}", plan.first_hold_frames);
    println!("hold frames:       {}", plan.hold_frames);
    println!("transition frames: {}", plan.transition_frames);
    println!("planned frames:    {}", plan.planned_frames());
    println!("padding frames:    {}", plan.padding_frames());
    for (i, path) in supplier.paths().enumerate() {
        println!("  {i:>4}  {}", path.display());
    }
    Ok(())
}
