use std::error::Error;
use std::path::PathBuf;

use sitebake::config::loader::{load_and_validate, load_or_default};
use sitebake::config::model::ConfigFile;
use sitebake::config::validate_config;
use sitebake::tasks::Category;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn defaults_form_a_complete_registry() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = load_or_default(dir.path().join("Sitebake.toml"))?;

    assert_eq!(cfg.sources_for(Category::Style), ["src/scss/*.scss"]);
    assert_eq!(cfg.watch_for(Category::Style), ["src/scss/**/*.scss"]);
    assert_eq!(cfg.dest_for(Category::Style), PathBuf::from("dist/css"));
    assert_eq!(cfg.dest_for(Category::Script), PathBuf::from("dist/js"));
    assert_eq!(cfg.dest_for(Category::Font), PathBuf::from("dist/fonts"));
    assert_eq!(cfg.dest_for(Category::Template), PathBuf::from("dist"));
    assert_eq!(cfg.dest_for(Category::Assets), PathBuf::from("dist"));
    assert!(cfg.build.fast);
    assert_eq!(cfg.serve.port, 3000);
    Ok(())
}

#[test]
fn toml_overrides_are_applied() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Sitebake.toml");
    std::fs::write(
        &path,
        r#"
[project]
out_dir = "public"

[build]
fast = false

[serve]
port = 4200

[style]
sources = ["styles/*.scss"]
watch = ["styles/**/*.scss"]
out_dir = "stylesheets"
file_name = "site"

[script]
vendor = ["vendor/runtime.js"]
"#,
    )?;

    let cfg = load_and_validate(&path)?;
    assert_eq!(cfg.project.out_dir, "public");
    assert!(!cfg.build.fast);
    assert_eq!(cfg.serve.port, 4200);
    assert_eq!(cfg.sources_for(Category::Style), ["styles/*.scss"]);
    assert_eq!(
        cfg.dest_for(Category::Style),
        PathBuf::from("public/stylesheets")
    );
    assert_eq!(cfg.style.file_name, "site");
    assert_eq!(cfg.script.vendor, ["vendor/runtime.js"]);
    // Unspecified sections keep their defaults.
    assert_eq!(cfg.dest_for(Category::Font), PathBuf::from("public/fonts"));
    Ok(())
}

#[test]
fn overlapping_named_destinations_are_rejected() {
    let mut cfg = ConfigFile::default();
    cfg.script.out_dir = "css".to_string();
    let err = validate_config(&cfg).expect_err("overlap must be rejected");
    assert!(err.to_string().contains("disjoint"));
}

#[test]
fn invalid_glob_is_rejected() {
    let mut cfg = ConfigFile::default();
    cfg.assets.sources = vec!["src/assets/[".to_string()];
    assert!(validate_config(&cfg).is_err());
}

#[test]
fn destination_escaping_the_output_root_is_rejected() {
    let mut cfg = ConfigFile::default();
    cfg.style.out_dir = "../elsewhere".to_string();
    assert!(validate_config(&cfg).is_err());
}
