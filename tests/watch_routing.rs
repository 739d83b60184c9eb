use std::error::Error;

use sitebake::config::model::ConfigFile;
use sitebake::engine::CategoryStates;
use sitebake::tasks::Category;
use sitebake::watch::build_category_profiles;

type TestResult = Result<(), Box<dyn Error>>;

fn matching_categories(cfg: &ConfigFile, path: &str) -> Result<Vec<Category>, Box<dyn Error>> {
    let profiles = build_category_profiles(cfg)?;
    Ok(profiles
        .iter()
        .filter(|profile| profile.matches(path))
        .map(|profile| profile.category())
        .collect())
}

#[test]
fn font_change_routes_to_the_font_task_only() -> TestResult {
    let cfg = ConfigFile::default();
    let hits = matching_categories(&cfg, "src/fonts/body.woff2")?;
    assert_eq!(hits, vec![Category::Font]);
    Ok(())
}

#[test]
fn nested_partial_matches_the_style_watch_glob() -> TestResult {
    // The style watch glob is wider than its source glob, so edits to
    // partials in sub-directories still re-trigger the task.
    let cfg = ConfigFile::default();
    let hits = matching_categories(&cfg, "src/scss/components/_button.scss")?;
    assert_eq!(hits, vec![Category::Style]);
    Ok(())
}

#[test]
fn unrelated_paths_match_nothing() -> TestResult {
    let cfg = ConfigFile::default();
    assert!(matching_categories(&cfg, "dist/css/style.min.css")?.is_empty());
    assert!(matching_categories(&cfg, "README.md")?.is_empty());
    Ok(())
}

#[test]
fn change_bursts_coalesce_into_one_follow_up_pass() {
    let mut states = CategoryStates::new();

    // First change dispatches immediately.
    assert!(states.on_change(Category::Style));
    // Changes while running queue exactly one follow-up.
    assert!(!states.on_change(Category::Style));
    assert!(!states.on_change(Category::Style));
    assert!(!states.on_change(Category::Style));

    // Completion of the in-flight pass dispatches the queued one.
    assert!(states.on_finished(Category::Style));
    // Completion with nothing queued returns to idle.
    assert!(!states.on_finished(Category::Style));
    assert!(states.is_idle());
}

#[test]
fn categories_do_not_interfere() {
    let mut states = CategoryStates::new();

    assert!(states.on_change(Category::Style));
    assert!(states.on_change(Category::Font));
    assert!(!states.on_change(Category::Style));

    assert!(!states.on_finished(Category::Font));
    // Font going idle does not release style's queued pass.
    assert!(states.on_finished(Category::Style));
}
