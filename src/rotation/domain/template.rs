//! Sprint name and ticket text templates.

use super::{RotationDomainError, RotationKind};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

fn render(
    template: &'static str,
    source: &str,
    context: impl Serialize,
) -> Result<String, RotationDomainError> {
    let mut environment = Environment::new();
    environment.set_undefined_behavior(UndefinedBehavior::Strict);
    environment
        .render_str(source, context)
        .map_err(|error| RotationDomainError::TemplateRender {
            template,
            reason: error.to_string(),
        })
}

#[derive(Serialize)]
struct SprintContext {
    sprint_number: u64,
}

/// Template producing sprint names from sprint numbers, for example
/// `Pulse {{ sprint_number }}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintNameTemplate {
    source: String,
}

impl SprintNameTemplate {
    /// Creates a validated sprint name template.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::TemplateRender`] when the template does
    /// not render and [`RotationDomainError::MissingSprintNumber`] when the
    /// rendered name does not change with the sprint number.
    pub fn new(source: impl Into<String>) -> Result<Self, RotationDomainError> {
        let template = Self {
            source: source.into(),
        };
        if template.render(0)? == template.render(1)? {
            return Err(RotationDomainError::MissingSprintNumber(template.source));
        }
        Ok(template)
    }

    /// Renders the name of sprint `number`.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::TemplateRender`] when rendering fails.
    pub fn render(&self, number: u64) -> Result<String, RotationDomainError> {
        render(
            "sprint name",
            &self.source,
            SprintContext {
                sprint_number: number,
            },
        )
    }

    /// Returns the template source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Values available to ticket templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotContext {
    /// Name of the sprint the ticket belongs to.
    pub sprint_name: String,
    /// Week within the sprint, `1` or `2`.
    pub week: u8,
    /// First day of the week, `YYYY-MM-DD`.
    pub start_date: String,
    /// Email of the assignee.
    pub assignee: String,
}

/// Summary and description templates of rotation tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTemplates {
    summary: String,
    description: String,
}

impl IssueTemplates {
    /// Creates templates from sources.
    #[must_use]
    pub fn new(summary: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            description: description.into(),
        }
    }

    /// Returns the default templates of a rotation kind.
    #[must_use]
    pub fn for_kind(kind: RotationKind) -> Self {
        Self::new(
            kind.default_summary_template(),
            kind.default_description_template(),
        )
    }

    /// Renders the ticket summary.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::TemplateRender`] when rendering fails.
    pub fn summary(&self, context: &SlotContext) -> Result<String, RotationDomainError> {
        render("summary", &self.summary, context)
    }

    /// Renders the ticket description.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::TemplateRender`] when rendering fails.
    pub fn description(&self, context: &SlotContext) -> Result<String, RotationDomainError> {
        render("description", &self.description, context)
    }
}
