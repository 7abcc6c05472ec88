use std::path::PathBuf;

use anyhow::Result;
use blockcraft_schema::{Issue, Severity};
use blockcraft_workspace::WorkspaceConfig;
use clap::Args;
use colored::Colorize;

use super::read_project;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project file to check
    pub file: PathBuf,

    /// Fail on warnings too
    #[arg(long)]
    pub strict: bool,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let path = PathBuf::from(cwd).join(&args.file);
    println!("🔍 {} {}", "Checking".green().bold(), args.file.display());

    let project = read_project(&path)?;
    let mut issues = project.check();

    // A config next to the project must parse too
    if let Some(dir) = path.parent() {
        if let Err(e) = WorkspaceConfig::load(dir) {
            issues.push(Issue {
                severity: Severity::Error,
                message: e.to_string(),
            });
        }
    }

    for issue in &issues {
        match issue.severity {
            Severity::Error => println!("   {} {}", "✗".red(), issue.message),
            Severity::Warning => println!("   {} {}", "⚠".yellow(), issue.message),
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;

    println!();
    println!(
        "   {} page(s), {} block(s)",
        project.pages.len(),
        project.pages.iter().map(|p| p.blocks.len()).sum::<usize>()
    );
    if errors == 0 && warnings == 0 {
        println!("✨ {}", "No issues found".green().bold());
        return Ok(());
    }
    if errors > 0 {
        println!("   {} {}", "Errors:".red(), errors);
    }
    if warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), warnings);
    }

    if errors > 0 || (args.strict && warnings > 0) {
        anyhow::bail!("{} has {} error(s) and {} warning(s)", args.file.display(), errors, warnings);
    }
    Ok(())
}
