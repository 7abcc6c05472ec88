//! Built-in starting documents.

use blockcraft_schema::{fresh_id, Page, Project, ProjectId};

use crate::MutationError;

/// Starter project used until something is loaded
pub fn template_project() -> Project {
    Project::new(ProjectId::provisional(), "My App", vec![home_page()])
}

/// Blank project with a provisional id; the name is required
pub fn new_project(name: &str) -> Result<Project, MutationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MutationError::Validation("project name is required".to_string()));
    }
    Ok(Project::new(ProjectId::provisional(), name, vec![home_page()]))
}

/// Give a project with no pages a `Home` page
pub fn ensure_page(mut project: Project) -> Project {
    if project.pages.is_empty() {
        tracing::debug!("project {} has no pages; adding Home", project.id);
        project.pages.push(home_page());
    }
    project
}

fn home_page() -> Page {
    Page::new(fresh_id(), "Home", "/home")
}
