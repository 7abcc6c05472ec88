use std::path::PathBuf;

use anyhow::{anyhow, Result};
use blockcraft_render::{describe, Platform, Previewer, RenderMode, RenderNode, Renderer};
use blockcraft_schema::Project;
use clap::{Args, ValueEnum};
use colored::Colorize;

use super::read_project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Web,
    Android,
    Ios,
    All,
}

impl PlatformArg {
    fn platforms(self) -> Vec<Platform> {
        match self {
            PlatformArg::Web => vec![Platform::Web],
            PlatformArg::Android => vec![Platform::Android],
            PlatformArg::Ios => vec![Platform::Ios],
            PlatformArg::All => Platform::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Edit,
    Preview,
}

impl From<ModeArg> for RenderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Edit => RenderMode::Edit,
            ModeArg::Preview => RenderMode::Preview,
        }
    }
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Project file to render
    pub file: PathBuf,

    /// Target platform
    #[arg(short, long, value_enum, default_value = "web")]
    pub platform: PlatformArg,

    /// Page id (defaults to the first page)
    #[arg(long)]
    pub page: Option<String>,

    /// Render as the editor canvas or as the interactive preview
    #[arg(short, long, value_enum, default_value = "preview")]
    pub mode: ModeArg,

    /// Print visible fragments as JSON instead of the render tree
    #[arg(long)]
    pub json: bool,
}

pub fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let project = read_project(&PathBuf::from(cwd).join(&args.file))?;
    println!("{}", render_output(&project, &args)?);
    Ok(())
}

/// Rendered text for every requested platform
pub(crate) fn render_output(project: &Project, args: &PreviewArgs) -> Result<String> {
    let mut trees = Vec::new();
    for platform in args.platform.platforms() {
        trees.push((platform, render(project, platform, args)?));
    }

    if args.json {
        let mut out = serde_json::Map::new();
        for (platform, tree) in &trees {
            out.insert(platform.to_string(), serde_json::to_value(describe(tree))?);
        }
        return Ok(serde_json::to_string_pretty(&out)?);
    }

    let mut text = String::new();
    for (platform, tree) in &trees {
        text.push_str(&format!("{}\n", format!("── {} ──", platform).bright_blue().bold()));
        text.push_str(&tree.to_string());
    }
    Ok(text)
}

fn render(project: &Project, platform: Platform, args: &PreviewArgs) -> Result<RenderNode> {
    tracing::debug!("rendering {} on {} ({:?})", project.id, platform, args.mode);
    let mut previewer = Previewer::new(platform.renderer(), project.clone());
    if let Some(page_id) = &args.page {
        if !previewer.go_to(page_id) {
            return Err(anyhow!("No page with id '{}'", page_id));
        }
    }

    match (RenderMode::from(args.mode), previewer.current_page()) {
        (RenderMode::Edit, Some(page)) => Ok(platform.renderer().render_page(page, RenderMode::Edit)),
        _ => Ok(previewer.render()),
    }
}
