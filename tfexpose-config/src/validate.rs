//! Post-parse validation of the configuration.

use std::path::Path;

use miette::SourceSpan;

use crate::{Config, Result, SourceContext};

/// Validate the configuration after parsing.
pub(crate) fn validate_config(config: &Config, ctx: &SourceContext) -> Result<()> {
    validate_marker(&config.settings.marker, ctx)?;
    validate_output_dir(&config.settings.output_dir, ctx)?;

    for (i, project) in config.projects.iter().enumerate() {
        if let Some(marker) = &project.marker {
            validate_marker(marker, ctx)?;
        }
        if let Some(dir) = &project.output_dir {
            validate_output_dir(dir, ctx)?;
        }
        if project.path.as_os_str().is_empty() {
            return Err(ctx.validation_error(
                "project path must not be empty",
                find_value_spans(ctx.src(), "").first().copied(),
            ));
        }

        let duplicate = config.projects[..i].iter().any(|p| p.path == project.path);
        if duplicate {
            let path = project.path.display().to_string();
            let spans = find_value_spans(ctx.src(), &path);
            return Err(match spans.as_slice() {
                [first, second, ..] => ctx.duplicate_project_error(path, *first, *second),
                _ => ctx.validation_error(
                    format!("project '{}' is listed more than once", path),
                    spans.first().copied(),
                ),
            });
        }
    }

    Ok(())
}

fn validate_marker(marker: &str, ctx: &SourceContext) -> Result<()> {
    if marker.is_empty() {
        return Err(ctx.validation_error(
            "marker must not be empty",
            find_key_span(ctx.src(), "marker"),
        ));
    }
    if marker.chars().any(char::is_whitespace) {
        return Err(ctx.validation_error(
            format!("marker '{}' must not contain whitespace", marker),
            find_value_spans(ctx.src(), marker).first().copied(),
        ));
    }
    Ok(())
}

fn validate_output_dir(dir: &Path, ctx: &SourceContext) -> Result<()> {
    if dir.is_absolute() {
        let shown = dir.display().to_string();
        return Err(ctx.validation_error(
            format!("output_dir '{}' must be relative to the project", shown),
            find_value_spans(ctx.src(), &shown).first().copied(),
        ));
    }
    Ok(())
}

/// Find the span of a `key =` assignment's key.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        let assigns = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if assigns {
            return Some(SourceSpan::from((offset + indent, key.len())));
        }
        offset += line.len();
    }
    None
}

/// Find every quoted occurrence of `value`, returning the spans inside the quotes.
pub(crate) fn find_value_spans(src: &str, value: &str) -> Vec<SourceSpan> {
    let mut spans = Vec::new();
    for quote in ['"', '\''] {
        let needle = format!("{quote}{value}{quote}");
        spans.extend(
            src.match_indices(&needle)
                .map(|(pos, _)| SourceSpan::from((pos + 1, value.len()))),
        );
    }
    spans.sort_by_key(|s| s.offset());
    spans
}
