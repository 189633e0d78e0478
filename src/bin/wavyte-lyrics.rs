use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "wavyte-lyrics", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a scene payload and write the compiled scene as JSON.
    Compile(CompileArgs),
    /// Sample one frame of a compiled payload and print it as JSON.
    Sample(SampleArgs),
    /// Step every frame at a fixed rate and print a digest of the frame stream.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Input scene payload JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Compile options JSON (every field optional).
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Override canvas width.
    #[arg(long)]
    width: Option<u32>,

    /// Override canvas height.
    #[arg(long)]
    height: Option<u32>,

    /// Font files used for text measurement (repeatable). Without any, glyph widths are estimated.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct CompileArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Song time in seconds.
    #[arg(long)]
    time: f64,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Write one JSON frame per line to this path.
    #[arg(long)]
    frames_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli_verbose() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn cli_verbose() -> bool {
    std::env::var_os("WAVYTE_LYRICS_DEBUG").is_some_and(|v| !v.is_empty() && v != "0")
}

fn read_payload(path: &Path) -> anyhow::Result<wavyte_lyrics::ScenePayload> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read payload '{}'", path.display()))?;
    let payload = wavyte_lyrics::ScenePayload::from_json(&text)
        .with_context(|| format!("parse payload '{}'", path.display()))?;
    Ok(payload)
}

fn read_opts(args: &SceneArgs) -> anyhow::Result<wavyte_lyrics::CompileOpts> {
    let mut opts = match &args.opts {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("open compile options '{}'", path.display()))?;
            serde_json::from_reader(BufReader::new(f))
                .with_context(|| "parse compile options JSON")?
        }
        None => wavyte_lyrics::CompileOpts::default(),
    };
    if let Some(w) = args.width {
        opts.canvas.width = w;
    }
    if let Some(h) = args.height {
        opts.canvas.height = h;
    }
    Ok(opts)
}

fn make_measurer(fonts: &[PathBuf]) -> anyhow::Result<wavyte_lyrics::ParleyMeasurer> {
    let mut m = wavyte_lyrics::ParleyMeasurer::new();
    for path in fonts {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        let family = m
            .register_font(&bytes)
            .with_context(|| format!("register font '{}'", path.display()))?;
        tracing::info!(family = %family, sha256 = %sha256_hex(&bytes), "registered font");
    }
    Ok(m)
}

fn compile(args: &SceneArgs) -> anyhow::Result<wavyte_lyrics::CompiledScene> {
    let payload = read_payload(&args.in_path)?;
    let opts = read_opts(args)?;
    let mut measurer = make_measurer(&args.fonts)?;
    let scene = wavyte_lyrics::compile_scene(&payload, &mut measurer, &opts)?;
    if !scene.diagnostics.collision_converged {
        eprintln!(
            "warning: collision resolution did not converge after {} passes",
            scene.diagnostics.collision_passes
        );
    }
    Ok(scene)
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let scene = compile(&args.scene)?;
    let json = serde_json::to_string_pretty(&scene).with_context(|| "serialize scene")?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write scene '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    eprintln!(
        "groups={} chapters={} beats={} fingerprint={}",
        scene.groups.len(),
        scene.chapters.len(),
        scene.beats.len(),
        wavyte_lyrics::fingerprint_of(&scene)?.to_hex()
    );
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let scene = compile(&args.scene)?;
    let frame =
        wavyte_lyrics::sample_scene(&scene, args.time, &wavyte_lyrics::PhysicsState::default());
    println!(
        "{}",
        serde_json::to_string_pretty(&frame).with_context(|| "serialize frame")?
    );
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let scene = std::sync::Arc::new(compile(&args.scene)?);
    let fps = wavyte_lyrics::Fps::new(args.fps, 1)?;
    let mut stepper = wavyte_lyrics::ExportStepper::new(scene, fps, wavyte_lyrics::NullPhysics)?;

    let mut frames_out = match &args.frames_out {
        Some(path) => Some(std::io::BufWriter::new(
            File::create(path).with_context(|| format!("create '{}'", path.display()))?,
        )),
        None => None,
    };
    let mut hasher = sha2::Sha256::new();
    let stats = stepper.run(|_, frame| {
        let line = serde_json::to_vec(frame)?;
        hasher.update(&line);
        if let Some(w) = frames_out.as_mut() {
            w.write_all(&line)
                .and_then(|()| w.write_all(b"\n"))
                .map_err(|e| wavyte_lyrics::LyricError::Other(e.into()))?;
        }
        Ok(())
    })?;
    if let Some(mut w) = frames_out {
        w.flush().with_context(|| "flush frames output")?;
    }

    println!("frames={} sha256={}", stats.frames, hex(&hasher.finalize()));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex(&sha2::Sha256::digest(bytes))
}

fn hex(digest: &[u8]) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
