//! Template record definitions.
//!
//! Remote repositories serve an index of [`TemplateSummary`] entries. The
//! registry normalizes each one into a [`TemplateRecord`], which is the shape
//! handed to callers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Style assumed for templates that don't declare one.
pub const DEFAULT_PROJECT_STYLE: &str = "Codewind";

/// One entry of a remote template index, as served by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateSummary {
    pub display_name: String,
    pub description: String,
    pub language: String,
    /// Where the template source lives.
    pub location: String,
    pub project_type: String,
    pub project_style: Option<String>,
}

/// A normalized template, ready to be listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    /// Display label (from `displayName`)
    pub label: String,

    /// Human-readable description
    pub description: String,

    /// Implementation language
    pub language: String,

    /// Template source location (from `location`)
    pub url: String,

    /// Project type identifier
    pub project_type: String,

    /// Project style; absent means [`DEFAULT_PROJECT_STYLE`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_style: Option<String>,
}

impl TemplateRecord {
    /// The effective style of this template.
    pub fn style(&self) -> &str {
        self.project_style
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_PROJECT_STYLE)
    }
}

impl From<TemplateSummary> for TemplateRecord {
    fn from(summary: TemplateSummary) -> Self {
        Self {
            label: summary.display_name,
            description: summary.description,
            language: summary.language,
            url: summary.location,
            project_type: summary.project_type,
            project_style: summary.project_style.filter(|s| !s.is_empty()),
        }
    }
}

/// Keep only templates whose effective style equals `project_style`.
pub fn filter_templates_by_style(
    templates: &[TemplateRecord],
    project_style: &str,
) -> Vec<TemplateRecord> {
    templates
        .iter()
        .filter(|t| t.style() == project_style)
        .cloned()
        .collect()
}

/// Distinct effective styles, in the order they first appear.
pub fn template_styles(templates: &[TemplateRecord]) -> Vec<String> {
    let mut styles: Vec<String> = Vec::new();
    for template in templates {
        let style = template.style();
        if !styles.iter().any(|s| s == style) {
            styles.push(style.to_string());
        }
    }
    styles
}

/// Compare two labels the way a locale collator orders them.
///
/// Base letters compare case-insensitively first, so accented letters sort
/// next to their unaccented forms. Ties are broken by accents, then by case
/// with lowercase ahead of uppercase.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| compare_case(a, b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn compare_case(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            return match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            };
        }
    }
    a.len().cmp(&b.len())
}

/// Stable sort by label.
pub fn sort_by_label(templates: &mut [TemplateRecord]) {
    templates.sort_by(|a, b| compare_labels(&a.label, &b.label));
}
