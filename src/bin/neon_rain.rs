use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "neon-rain", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one loop and write it as an animated GIF.
    Render(RenderArgs),
    /// Render a single preview frame as a PNG.
    Frame(FrameArgs),
    /// Write the default scene configuration as JSON.
    Init(InitArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Scene configuration JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed overriding the configuration's `seed`.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output GIF path. A numeric suffix is added if it already exists.
    #[arg(long, default_value = "neon_rain.gif")]
    out: PathBuf,

    /// Loop duration in seconds.
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Open the result in the default image viewer.
    #[arg(long)]
    open: bool,

    /// Stream frames straight into the GIF instead of keeping the whole loop in memory.
    #[arg(long)]
    stream: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InitArgs {
    /// Where to write the configuration.
    #[arg(long, default_value = "scene.json")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Init(args) => cmd_init(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<neon_rain::SceneConfig> {
    let mut cfg = match &args.config {
        Some(path) => neon_rain::SceneConfig::from_json_file(path)?,
        None => neon_rain::SceneConfig::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_scene(&args.scene)?;
    let mut generator = neon_rain::RainGenerator::new(cfg)?;

    let out = if args.stream {
        let mut sink = neon_rain::GifSink::new(
            &args.out,
            neon_rain::GifOpts {
                duration_secs: args.duration,
                ..neon_rain::GifOpts::default()
            },
        )?;
        generator.render_into(&mut sink, draw_progress)?;
        let out = sink
            .output_path()
            .map(Path::to_path_buf)
            .context("gif sink did not report an output path")?;
        if args.open {
            neon_rain::open_in_viewer(&out);
        }
        out
    } else {
        generator.generate_frames_with_progress(draw_progress)?;
        eprintln!();
        eprintln!("saving gif...");
        generator.save_gif(&args.out, args.duration, args.open)?
    };

    eprintln!();
    let abs = std::fs::canonicalize(&out).unwrap_or(out);
    eprintln!("wrote {}", abs.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_scene(&args.scene)?;
    let mut generator = neon_rain::RainGenerator::new(cfg)?;
    let frame = generator.preview_frame(args.index)?;

    neon_rain::ensure_parent_dir(&args.out)?;
    frame
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_init(args: InitArgs) -> anyhow::Result<()> {
    let json = neon_rain::SceneConfig::default().to_json_pretty()?;
    neon_rain::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write config '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn draw_progress(done: u64, total: u64) {
    const WIDTH: u64 = 40;
    let filled = (done * WIDTH).checked_div(total).unwrap_or(WIDTH);
    let bar: String = (0..WIDTH)
        .map(|i| if i < filled { '#' } else { '-' })
        .collect();
    let mut err = std::io::stderr().lock();
    let _ = write!(err, "\rgenerating frames [{bar}] {done}/{total}");
    let _ = err.flush();
}
