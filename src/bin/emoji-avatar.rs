use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use emoji_avatar::{AvatarApp, AvatarConfig, HostEngine, HostEngineDef, SessionCommand};

#[derive(Parser, Debug)]
#[command(name = "emoji-avatar", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one avatar and save it as emoji-avatar.png.
    Render(RenderArgs),
    /// List the palette as `index<TAB>#rrggbb`.
    Palette(CommonArgs),
    /// Read `emoji`, `color`, `download`, `show`, `quit` lines from stdin.
    Session(SessionArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logical avatar side in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Device pixel ratio of the output surface.
    #[arg(long)]
    dpr: Option<f64>,

    /// Host text-metrics family.
    #[arg(long, value_enum, conflicts_with = "user_agent")]
    engine: Option<EngineChoice>,

    /// Resolve the host text-metrics family from a user agent string.
    #[arg(long)]
    user_agent: Option<String>,

    /// Extra font file (ttf/otf/ttc); repeatable.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Do not discover installed system fonts.
    #[arg(long)]
    no_system_fonts: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Emoji glyph to draw (defaults to the placeholder).
    #[arg(long)]
    emoji: Option<String>,

    /// Palette swatch index.
    #[arg(long, default_value_t = 0)]
    color: usize,

    /// Directory the PNG is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also print the PNG as a data URI on stdout.
    #[arg(long)]
    data_uri: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Directory `download` writes to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EngineChoice {
    Safari,
    Other,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("emoji_avatar=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Palette(args) => cmd_palette(args),
        Command::Session(args) => cmd_session(args),
    }
}

fn load_config(args: &CommonArgs) -> anyhow::Result<AvatarConfig> {
    let mut cfg = match &args.config {
        Some(path) => AvatarConfig::from_path(path)?,
        None => AvatarConfig::default(),
    };

    if let Some(size) = args.size {
        cfg.size = size;
    }
    if let Some(dpr) = args.dpr {
        cfg.device_pixel_ratio = dpr;
    }
    if let Some(engine) = args.engine {
        cfg.host_engine = HostEngineDef::Named(match engine {
            EngineChoice::Safari => HostEngine::Safari,
            EngineChoice::Other => HostEngine::Other,
        });
    }
    if let Some(ua) = &args.user_agent {
        cfg.host_engine = HostEngineDef::Probe {
            user_agent: ua.clone(),
        };
    }
    cfg.fonts.files.extend(args.fonts.iter().cloned());
    if args.no_system_fonts {
        cfg.fonts.system = false;
    }

    cfg.validate().with_context(|| "invalid avatar config")?;
    tracing::debug!(engine = ?cfg.host_engine(), "config resolved");
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let mut app = AvatarApp::new(&cfg)?;

    if let Some(emoji) = args.emoji {
        app.select_emoji(emoji);
    }
    if !app.click_swatch(args.color) {
        anyhow::bail!(
            "color {} is not a palette swatch (0..{})",
            args.color,
            cfg.palette.len()
        );
    }

    let path = app.download(&args.out_dir)?;
    if args.data_uri {
        println!("{}", app.data_uri()?);
    }
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_palette(args: CommonArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let palette = cfg.palette()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (i, color) in palette.colors().iter().enumerate() {
        writeln!(out, "{i}\t{color}")?;
    }
    Ok(())
}

fn cmd_session(args: SessionArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    let mut app = AvatarApp::new(&cfg)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("read session input")?;
        let cmd = match SessionCommand::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        match cmd {
            SessionCommand::Emoji(glyph) => app.select_emoji(glyph),
            SessionCommand::Color(i) => {
                if !app.click_swatch(i) {
                    writeln!(out, "error: no swatch {i}")?;
                }
            }
            SessionCommand::Download => {
                let path = app.download(&args.out_dir)?;
                writeln!(out, "saved {}", path.display())?;
            }
            SessionCommand::Show => show(&app, &mut out)?,
            SessionCommand::Quit => break,
        }
        out.flush()?;
    }
    Ok(())
}

fn show(app: &AvatarApp, out: &mut impl Write) -> anyhow::Result<()> {
    let (glyph, color) = app.resolved();
    let index = app.selection().color_index;
    match app.image() {
        Some(img) => writeln!(
            out,
            "emoji {glyph} color {index} {color} image {}x{}",
            img.width, img.height
        )?,
        None => writeln!(out, "emoji {glyph} color {index} {color} image none")?,
    }
    Ok(())
}
