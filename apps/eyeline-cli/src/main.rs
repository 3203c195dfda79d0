use anyhow::Context;
use clap::{Parser, Subcommand};
use eyeline_camera::{Camera, CameraConfig};
use eyeline_input::{InputScript, InputState};
use eyeline_render::{DebugTextRenderer, Projection, RenderView, Renderer};
use glam::Mat4;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eyeline-cli", about = "Headless camera probe and input replay")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the camera basis and view matrix for a pose
    Probe {
        /// Camera config (JSON); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Override yaw in degrees
        #[arg(long, allow_negative_numbers = true)]
        yaw: Option<f32>,
        /// Override pitch in degrees
        #[arg(long, allow_negative_numbers = true)]
        pitch: Option<f32>,
    },
    /// Replay a recorded input script and print every frame
    Replay {
        /// Input script (JSON)
        script: PathBuf,
        /// Camera config (JSON); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Viewport width for the projection
        #[arg(long, default_value = "800")]
        width: u32,
        /// Viewport height for the projection
        #[arg(long, default_value = "600")]
        height: u32,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CameraConfig> {
    match path {
        Some(path) => CameraConfig::load(path)
            .with_context(|| format!("loading camera config {}", path.display())),
        None => Ok(CameraConfig::default()),
    }
}

fn probe_camera(
    config: Option<&Path>,
    yaw: Option<f32>,
    pitch: Option<f32>,
) -> anyhow::Result<Camera> {
    let mut config = load_config(config)?;
    if let Some(yaw) = yaw {
        config.yaw = yaw;
    }
    if let Some(pitch) = pitch {
        config.pitch = pitch;
    }
    Ok(Camera::from_config(&config)?)
}

fn format_matrix(m: &Mat4) -> String {
    let mut out = String::new();
    for r in 0..4 {
        let row = m.row(r);
        out.push_str(&format!(
            "  [{:>8.4} {:>8.4} {:>8.4} {:>8.4}]\n",
            row.x, row.y, row.z, row.w
        ));
    }
    out
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("eyeline-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("camera: {}", eyeline_camera::crate_info());
            println!("input: {}", eyeline_input::crate_info());
            println!("render: {}", eyeline_render::crate_info());
        }
        Commands::Probe { config, yaw, pitch } => {
            let camera = probe_camera(config.as_deref(), yaw, pitch)?;
            let view = RenderView::from_camera(&camera, &Projection::default(), 0);

            println!("yaw={:.2} pitch={:.2}", camera.yaw(), camera.pitch());
            print!("{}", DebugTextRenderer::new().render(&view));
            println!("View matrix:");
            print!("{}", format_matrix(&view.view));
        }
        Commands::Replay {
            script,
            config,
            width,
            height,
        } => {
            let config = load_config(config.as_deref())?;
            let mut camera = Camera::from_config(&config)?;
            let script = InputScript::load(&script)
                .with_context(|| format!("loading input script {}", script.display()))?;
            let projection = Projection::from_viewport(width, height);
            let renderer = DebugTextRenderer::new();
            let mut state = InputState::new();

            tracing::info!(frames = script.frames.len(), "replaying input script");
            let ran = script.run(&mut state, &mut camera, |index, camera| {
                let view = RenderView::from_camera(camera, &projection, index as u64);
                print!("{}", renderer.render(&view));
            });
            println!("Replayed {ran}/{} frames", script.frames.len());
        }
    }

    Ok(())
}
