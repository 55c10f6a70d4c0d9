use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use layerkit::{Editor, EditorConfig, Layer, LayerKind, Layers};

#[derive(Parser, Debug)]
#[command(name = "layerkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a layer project as a PNG.
    Render(RenderArgs),
    /// Print each layer's transform and bounding box as JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input project JSON (a layer array or `{"layers": [...]}`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Editor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ProjectFile {
    Layers(Layers),
    Wrapped { layers: Layers },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    match cli.cmd {
        Command::Render(args) => rt.block_on(cmd_render(args)),
        Command::Inspect(args) => rt.block_on(cmd_inspect(args)),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EditorConfig> {
    let cfg = match path {
        Some(p) => EditorConfig::from_json_file(p)?,
        None => {
            let cfg = EditorConfig::default().with_env_overrides();
            cfg.validate()?;
            cfg
        }
    };
    Ok(cfg)
}

/// Load the project, resolving relative image sources against its directory.
fn load_project(path: &Path) -> anyhow::Result<Layers> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read project '{}'", path.display()))?;
    let project: ProjectFile = serde_json::from_str(&text)
        .with_context(|| format!("parse project '{}'", path.display()))?;
    let mut layers = match project {
        ProjectFile::Layers(l) | ProjectFile::Wrapped { layers: l } => l,
    };

    let root = path.parent().unwrap_or_else(|| Path::new("."));
    for layer in &mut layers {
        resolve_source(layer, root);
    }
    Ok(layers)
}

fn resolve_source(layer: &mut Layer, root: &Path) {
    if layer.kind != LayerKind::Image {
        return;
    }
    let Some(src) = layer.options.get_mut("src") else {
        return;
    };
    if let Some(s) = src.as_str()
        && !s.is_empty()
        && Path::new(s).is_relative()
    {
        *src = serde_json::Value::String(root.join(s).to_string_lossy().into_owned());
    }
}

async fn open_editor(in_path: &Path, config: Option<&Path>) -> anyhow::Result<Editor> {
    let mut editor = Editor::new(load_config(config)?);
    editor.load(load_project(in_path)?)?;
    let stats = editor.refresh().await?;
    tracing::info!(computed = stats.stored, "refreshed layer computes");
    Ok(editor)
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut editor = open_editor(&args.in_path, args.config.as_deref()).await?;
    let frame = editor.render()?.to_straight_alpha();

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    editor.shutdown().await;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

async fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut editor = open_editor(&args.in_path, args.config.as_deref()).await?;
    let mut rows = Vec::with_capacity(editor.layers().len());
    for (index, layer) in editor.layers().iter().enumerate() {
        let geom = editor.geometry(&layer.id)?;
        rows.push(serde_json::json!({
            "index": index,
            "id": layer.id,
            "kind": layer.kind,
            "transform": geom.to_screen.as_coeffs(),
            "bbox": geom.bbox.map(|b| [b.x0, b.y0, b.x1, b.y1]),
        }));
    }
    println!("{}", serde_json::to_string_pretty(&rows)?);
    editor.shutdown().await;
    Ok(())
}
