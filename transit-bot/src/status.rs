//! On-demand status page: a template with `{{ name }}` placeholders,
//! rendered to disk and attached to the reply.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::warn;

use crate::stats::StatsSnapshot;

const TEMPLATE_PATH: &str = "templates/status.html";
const OUTPUT_PATH: &str = "status.html";
const ERROR_PAGE: &str = "<html><body><h1>Error rendering template</h1></body></html>";

// Placeholder until real handler latency tracking exists.
const AVG_RESPONSE_TIME_MS: u64 = 42;

/// Substitute `{{ name }}` placeholders in `template` with `context` values.
/// Unknown placeholders are left untouched.
fn render(template: &str, context: &[(&str, String)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in context {
        let placeholder = format!("{{{{ {key} }}}}");
        rendered = rendered.replace(&placeholder, value);
    }
    rendered
}

/// Render from a template file; a missing or unreadable template yields a
/// minimal error document instead of failing the command.
fn render_file(template_path: &Path, context: &[(&str, String)]) -> String {
    match fs::read_to_string(template_path) {
        Ok(template) => render(&template, context),
        Err(err) => {
            warn!(
                "failed to read status template {}: {}",
                template_path.display(),
                err
            );
            ERROR_PAGE.to_string()
        }
    }
}

/// Write the rendered status page to disk and return the written path, so
/// the caller can re-read and attach it.
pub fn render_status_file(snapshot: StatsSnapshot) -> Result<PathBuf> {
    let context = [
        ("online", "true".to_string()),
        (
            "timestamp",
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        (
            "commands_processed",
            snapshot.commands_processed.to_string(),
        ),
        ("users_count", snapshot.users_count.to_string()),
        ("avg_response_time", AVG_RESPONSE_TIME_MS.to_string()),
    ];

    let html = render_file(Path::new(TEMPLATE_PATH), &context);

    fs::write(OUTPUT_PATH, &html)
        .with_context(|| format!("Failed to write status page: {OUTPUT_PATH}"))?;

    Ok(PathBuf::from(OUTPUT_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_substituted() {
        let template = "<p>{{ online }} since {{ timestamp }}</p>";
        let rendered = render(
            template,
            &[
                ("online", "true".to_string()),
                ("timestamp", "2026-01-01 12:00:00".to_string()),
            ],
        );

        assert_eq!(rendered, "<p>true since 2026-01-01 12:00:00</p>");
    }

    #[test]
    fn unknown_placeholders_are_left_alone() {
        let rendered = render("{{ mystery }}", &[("online", "true".to_string())]);
        assert_eq!(rendered, "{{ mystery }}");
    }

    #[test]
    fn missing_template_yields_error_page() {
        let rendered = render_file(Path::new("does/not/exist.html"), &[]);
        assert!(rendered.contains("Error rendering template"));
    }
}
