//! Structural checks over a loaded project.
//!
//! Loading never fails on these; they are reported so tooling can decide.

use std::collections::HashSet;
use std::fmt;

use crate::{Project, SCHEMA_VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub message: String,
}

impl Issue {
    fn error(message: impl Into<String>) -> Self {
        Self { severity: Severity::Error, message: message.into() }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

impl Project {
    /// Report invariant violations and forward-compatibility notes
    pub fn check(&self) -> Vec<Issue> {
        let mut issues = Vec::new();

        if self.schema_version > SCHEMA_VERSION {
            issues.push(Issue::warning(format!(
                "schema version {} is newer than {}; unknown fields are kept as-is",
                self.schema_version, SCHEMA_VERSION
            )));
        }

        if self.pages.is_empty() {
            issues.push(Issue::error("project has no pages"));
        }

        let mut page_ids = HashSet::new();
        let mut paths = HashSet::new();
        let mut block_ids = HashSet::new();

        for page in &self.pages {
            if !page_ids.insert(page.id.as_str()) {
                issues.push(Issue::error(format!("duplicate page id {:?}", page.id)));
            }
            if !page.path.is_empty() && !paths.insert(page.path.as_str()) {
                issues.push(Issue::error(format!("duplicate page path {:?}", page.path)));
            }

            for block in &page.blocks {
                if !block_ids.insert(block.id.as_str()) {
                    issues.push(Issue::error(format!("duplicate block id {:?}", block.id)));
                }
                if block.kind().is_none() {
                    issues.push(Issue::warning(format!(
                        "block {:?} on page {:?} has unknown type {:?} and will render empty",
                        block.id, page.id, block.block_type
                    )));
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use crate::{Block, Page, Project, ProjectId, Props};

    fn project(pages: Vec<Page>) -> Project {
        Project::new(ProjectId::parse("p1").unwrap(), "Demo", pages)
    }

    #[test]
    fn test_clean_project_has_no_issues() {
        let mut home = Page::new("home", "Home", "/home");
        home.blocks.push(Block::new("b1", "hero", Props::new()));
        assert!(project(vec![home]).check().is_empty());
    }

    #[test]
    fn test_reports_structural_errors() {
        let mut a = Page::new("a", "A", "/same");
        a.blocks.push(Block::new("dup", "text", Props::new()));
        let mut b = Page::new("a", "B", "/same");
        b.blocks.push(Block::new("dup", "text", Props::new()));

        let issues = project(vec![a, b]).check();
        let errors: Vec<_> = issues.iter().filter(|i| i.is_error()).collect();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_unknown_type_is_warning() {
        let mut home = Page::new("home", "Home", "/home");
        home.blocks.push(Block::new("b1", "bogus", Props::new()));

        let issues = project(vec![home]).check();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
        assert!(issues[0].to_string().contains("bogus"));
    }

    #[test]
    fn test_empty_project_is_error() {
        let issues = project(vec![]).check();
        assert!(issues.iter().any(|i| i.is_error() && i.message.contains("no pages")));
    }
}
