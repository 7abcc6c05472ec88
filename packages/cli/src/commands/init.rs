use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use blockcraft_editor::template_project;
use blockcraft_workspace::{WorkspaceConfig, CONFIG_FILE};
use clap::Args;
use colored::Colorize;

pub const PROJECT_FILE: &str = "project.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current one)
    pub dir: Option<PathBuf>,

    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => PathBuf::from(cwd).join(dir),
        None => PathBuf::from(cwd),
    };
    let project_path = dir.join(PROJECT_FILE);
    let config_path = dir.join(CONFIG_FILE);

    if project_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), PROJECT_FILE.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Blockcraft project...".bright_blue().bold());

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
        println!("  {} Created {}/", "✓".green(), dir.display());
    }

    let project = match &args.name {
        Some(name) => blockcraft_editor::new_project(name)?,
        None => template_project(),
    };
    fs::write(&project_path, project.to_json_pretty()?)?;
    println!("  {} Created {}", "✓".green(), PROJECT_FILE);

    if !config_path.exists() || args.force {
        fs::write(&config_path, WorkspaceConfig::default().to_json_pretty()?)?;
        println!("  {} Created {}", "✓".green(), CONFIG_FILE);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: blockcraft check {}", project_path.display());
    println!("  2. Run: blockcraft preview {}", project_path.display());

    Ok(())
}
