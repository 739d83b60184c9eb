// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::tasks::Category;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [project]
/// source_root = "src"
/// out_dir = "dist"
///
/// [build]
/// fast = true
///
/// [style]
/// sources = ["src/scss/*.scss"]
/// watch = ["src/scss/**/*.scss"]
/// out_dir = "css"
/// ```
///
/// All sections are optional. The defaults reproduce the conventional
/// project layout (`src/scss`, `src/js`, `src/fonts`, `src/assets`,
/// `src/templates` under one source root, outputs under `dist/`), so a
/// project following that layout needs no config file at all.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Source and output roots from `[project]`.
    #[serde(default)]
    pub project: ProjectSection,

    /// Build-profile defaults from `[build]`.
    #[serde(default)]
    pub build: BuildSection,

    /// Dev-server bind address from `[serve]`.
    #[serde(default)]
    pub serve: ServeSection,

    #[serde(default)]
    pub style: StyleSection,

    #[serde(default)]
    pub script: ScriptSection,

    #[serde(default)]
    pub template: TemplateSection,

    #[serde(default)]
    pub font: FontSection,

    #[serde(default)]
    pub assets: AssetsSection,
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Root directory of authored sources, relative to the project root.
    ///
    /// The script task uses this prefix to tell authored files (which pass
    /// the syntax gate) from vendored ones (copied verbatim).
    #[serde(default = "default_source_root")]
    pub source_root: String,

    /// Output root, relative to the project root. Deleted by `clean`.
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            out_dir: default_out_dir(),
        }
    }
}

/// `[build]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// Fast dev mode: skip source maps during development builds.
    #[serde(default = "default_fast")]
    pub fast: bool,
}

fn default_fast() -> bool {
    true
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            fast: default_fast(),
        }
    }
}

/// `[serve]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServeSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServeSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// `[style]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleSection {
    /// Globs for the stylesheet entry files that get compiled and
    /// concatenated, in sorted path order.
    #[serde(default = "default_style_sources")]
    pub sources: Vec<String>,

    /// Globs the watcher listens on. Wider than `sources` by default so
    /// edits to partials re-trigger the task.
    #[serde(default = "default_style_watch")]
    pub watch: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    /// Destination directory, relative to the output root.
    #[serde(default = "default_style_out_dir")]
    pub out_dir: String,

    /// Base name of the concatenated output (`<file_name>.min.css`).
    #[serde(default = "default_style_file_name")]
    pub file_name: String,
}

fn default_style_sources() -> Vec<String> {
    vec!["src/scss/*.scss".to_string()]
}

fn default_style_watch() -> Vec<String> {
    vec!["src/scss/**/*.scss".to_string()]
}

fn default_style_out_dir() -> String {
    "css".to_string()
}

fn default_style_file_name() -> String {
    "style".to_string()
}

impl Default for StyleSection {
    fn default() -> Self {
        Self {
            sources: default_style_sources(),
            watch: default_style_watch(),
            exclude: Vec::new(),
            out_dir: default_style_out_dir(),
            file_name: default_style_file_name(),
        }
    }
}

/// `[script]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptSection {
    /// Prebuilt bundles prepended verbatim to the output, before any
    /// authored source. Paths or globs, relative to the project root.
    #[serde(default)]
    pub vendor: Vec<String>,

    #[serde(default = "default_script_sources")]
    pub sources: Vec<String>,

    /// Watch globs; `None` means watch `sources`.
    #[serde(default)]
    pub watch: Option<Vec<String>>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_script_out_dir")]
    pub out_dir: String,

    /// Base name of the concatenated output (`<file_name>.min.js`).
    #[serde(default = "default_script_file_name")]
    pub file_name: String,
}

fn default_script_sources() -> Vec<String> {
    vec!["src/js/**/*.js".to_string()]
}

fn default_script_out_dir() -> String {
    "js".to_string()
}

fn default_script_file_name() -> String {
    "script".to_string()
}

impl Default for ScriptSection {
    fn default() -> Self {
        Self {
            vendor: Vec::new(),
            sources: default_script_sources(),
            watch: None,
            exclude: Vec::new(),
            out_dir: default_script_out_dir(),
            file_name: default_script_file_name(),
        }
    }
}

/// `[template]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSection {
    #[serde(default = "default_template_sources")]
    pub sources: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    /// Destination directory relative to the output root; empty means the
    /// output root itself.
    #[serde(default)]
    pub out_dir: String,
}

fn default_template_sources() -> Vec<String> {
    vec!["src/templates/**/*.html".to_string()]
}

impl Default for TemplateSection {
    fn default() -> Self {
        Self {
            sources: default_template_sources(),
            exclude: Vec::new(),
            out_dir: String::new(),
        }
    }
}

/// `[font]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct FontSection {
    /// Third-party font files copied alongside the project's own fonts.
    #[serde(default)]
    pub vendor: Vec<String>,

    #[serde(default = "default_font_sources")]
    pub sources: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_font_out_dir")]
    pub out_dir: String,
}

fn default_font_sources() -> Vec<String> {
    vec!["src/fonts/**/*".to_string()]
}

fn default_font_out_dir() -> String {
    "fonts".to_string()
}

impl Default for FontSection {
    fn default() -> Self {
        Self {
            vendor: Vec::new(),
            sources: default_font_sources(),
            exclude: Vec::new(),
            out_dir: default_font_out_dir(),
        }
    }
}

/// `[assets]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsSection {
    #[serde(default = "default_assets_sources")]
    pub sources: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub out_dir: String,
}

fn default_assets_sources() -> Vec<String> {
    vec!["src/assets/**/*".to_string()]
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            sources: default_assets_sources(),
            exclude: Vec::new(),
            out_dir: String::new(),
        }
    }
}

impl ConfigFile {
    /// Output root relative to the project root.
    pub fn out_root(&self) -> PathBuf {
        PathBuf::from(&self.project.out_dir)
    }

    /// Source globs for a category.
    pub fn sources_for(&self, category: Category) -> &[String] {
        match category {
            Category::Style => &self.style.sources,
            Category::Script => &self.script.sources,
            Category::Template => &self.template.sources,
            Category::Font => &self.font.sources,
            Category::Assets => &self.assets.sources,
        }
    }

    /// Exclude globs for a category.
    pub fn exclude_for(&self, category: Category) -> &[String] {
        match category {
            Category::Style => &self.style.exclude,
            Category::Script => &self.script.exclude,
            Category::Template => &self.template.exclude,
            Category::Font => &self.font.exclude,
            Category::Assets => &self.assets.exclude,
        }
    }

    /// Watch globs for a category; categories without an explicit watch
    /// list are watched on their source globs.
    pub fn watch_for(&self, category: Category) -> Vec<String> {
        match category {
            Category::Style => self.style.watch.clone(),
            Category::Script => self
                .script
                .watch
                .clone()
                .unwrap_or_else(|| self.script.sources.clone()),
            Category::Template => self.template.sources.clone(),
            Category::Font => self.font.sources.clone(),
            Category::Assets => self.assets.sources.clone(),
        }
    }

    /// Destination directory for a category, relative to the project root.
    pub fn dest_for(&self, category: Category) -> PathBuf {
        let sub = match category {
            Category::Style => self.style.out_dir.as_str(),
            Category::Script => self.script.out_dir.as_str(),
            Category::Template => self.template.out_dir.as_str(),
            Category::Font => self.font.out_dir.as_str(),
            Category::Assets => self.assets.out_dir.as_str(),
        };
        if sub.is_empty() {
            self.out_root()
        } else {
            self.out_root().join(sub)
        }
    }
}
