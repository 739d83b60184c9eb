// src/tasks/style.rs

//! Style task: compile every matched stylesheet source, concatenate, and
//! (in release mode) minify and vendor-prefix the result.

use anyhow::{Context, Result};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use tracing::{debug, warn};

use crate::errors::TransformError;
use crate::tasks::{collect_matches, source_map_json, BuildContext, Category, TaskReport};

pub async fn run(ctx: &BuildContext) -> Result<TaskReport> {
    let cfg = &ctx.config.style;
    let sources = collect_matches(ctx, &cfg.sources, &cfg.exclude)?;

    let mut report = TaskReport::new(Category::Style);
    if sources.is_empty() {
        debug!("no stylesheet sources matched; nothing to write");
        return Ok(report);
    }

    // (root-relative path, original text, compiled css) per surviving source.
    let mut pieces: Vec<(String, String, String)> = Vec::new();

    for rel in &sources {
        let abs = ctx.root.join(rel);
        let rel_str = rel.to_string_lossy().replace('\\', "/");

        let raw = match tokio::fs::read_to_string(&abs).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    error = %TransformError::Read { path: rel_str, source: err },
                    "stylesheet source skipped"
                );
                report.skipped += 1;
                continue;
            }
        };

        let options = grass::Options::default().style(grass::OutputStyle::Expanded);
        match grass::from_path(&abs, &options) {
            Ok(css) => pieces.push((rel_str, raw, css)),
            Err(err) => {
                warn!(
                    error = %TransformError::Compile {
                        path: rel_str,
                        message: err.to_string(),
                    },
                    "stylesheet source skipped"
                );
                report.skipped += 1;
            }
        }
    }

    let mut css = pieces
        .iter()
        .map(|(_, _, compiled)| compiled.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    if ctx.profile.optimize() {
        // Demote preserved-comment markers so the minifier drops them too.
        css = css.replace("/*!", "/*");
        match optimize_stylesheet(&css) {
            Ok(optimized) => css = optimized,
            Err(err) => {
                warn!(error = %err, "stylesheet optimization skipped");
                report.skipped += 1;
            }
        }
    }

    let dest = ctx.dest_dir(Category::Style);
    tokio::fs::create_dir_all(&dest)
        .await
        .with_context(|| format!("creating destination directory {:?}", dest))?;

    // The ".min" suffix is part of the output contract in every mode.
    let file_name = format!("{}.min.css", cfg.file_name);

    if ctx.profile.source_maps() {
        let map_name = format!("{file_name}.map");
        let entries: Vec<(String, String)> = pieces
            .iter()
            .map(|(path, raw, _)| (path.clone(), raw.clone()))
            .collect();

        let map_path = dest.join(&map_name);
        tokio::fs::write(&map_path, source_map_json(&file_name, &entries))
            .await
            .with_context(|| format!("writing source map {:?}", map_path))?;
        report.written.push(map_path);

        css.push_str(&format!("\n/*# sourceMappingURL={map_name} */\n"));
    }

    let out_path = dest.join(&file_name);
    tokio::fs::write(&out_path, css)
        .await
        .with_context(|| format!("writing stylesheet {:?}", out_path))?;

    debug!(path = ?out_path, skipped = report.skipped, "stylesheet written");
    report.written.push(out_path);
    Ok(report)
}

/// Minify and vendor-prefix a CSS stream for the fixed browser-target set.
fn optimize_stylesheet(css: &str) -> std::result::Result<String, TransformError> {
    let options = ParserOptions {
        error_recovery: true,
        ..ParserOptions::default()
    };

    let mut stylesheet = StyleSheet::parse(css, options)
        .map_err(|err| TransformError::Optimize(err.to_string()))?;

    stylesheet
        .minify(MinifyOptions {
            targets: browser_targets(),
            ..MinifyOptions::default()
        })
        .map_err(|err| TransformError::Optimize(err.to_string()))?;

    let output = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            targets: browser_targets(),
            ..PrinterOptions::default()
        })
        .map_err(|err| TransformError::Optimize(err.to_string()))?;

    Ok(output.code)
}

/// The browser floor prefixes are generated for. Old enough that flexbox
/// and transition prefixes still appear for Safari.
fn browser_targets() -> Targets {
    let browsers = Browsers {
        chrome: Some(version(90, 0)),
        edge: Some(version(90, 0)),
        firefox: Some(version(88, 0)),
        safari: Some(version(8, 0)),
        ios_saf: Some(version(8, 0)),
        ..Browsers::default()
    };
    Targets {
        browsers: Some(browsers),
        ..Targets::default()
    }
}

fn version(major: u32, minor: u32) -> u32 {
    (major << 16) | (minor << 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimize_minifies_and_prefixes() {
        let css = "a {\n  color: #ff0000;\n}\n.box {\n  user-select: none;\n}\n";
        let out = optimize_stylesheet(css).expect("optimize");
        assert!(!out.contains('\n'));
        assert!(out.contains("red") || out.contains("#f00"));
        assert!(out.contains("-webkit-user-select"), "expected vendor prefix in {out:?}");
    }
}
