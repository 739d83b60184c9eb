mod common;

use std::error::Error;

use sitebake::profile::BuildProfile;
use sitebake::tasks::{self, Category};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn fast_dev_concatenates_without_maps_or_minification() -> TestResult {
    let dir = common::project();
    let ctx = common::context(&dir, BuildProfile { fast: true, release: false });

    let report = tasks::run(&ctx, Category::Style).await?;
    assert_eq!(report.skipped, 0);

    let css = common::read(dir.path(), "dist/css/style.min.css");
    assert!(css.contains("#ff0000"));
    assert!(css.contains("body .nested"), "nesting should be compiled out");
    assert!(css.contains('\n'), "fast-dev output stays expanded");
    assert!(!css.contains("sourceMappingURL"));
    assert!(!dir.path().join("dist/css/style.min.css.map").exists());
    Ok(())
}

#[tokio::test]
async fn slow_dev_writes_a_source_map() -> TestResult {
    let dir = common::project();
    let ctx = common::context(&dir, BuildProfile { fast: false, release: false });

    tasks::run(&ctx, Category::Style).await?;

    let css = common::read(dir.path(), "dist/css/style.min.css");
    assert!(css.contains("sourceMappingURL=style.min.css.map"));
    assert!(css.contains('\n'), "slow-dev output is still unminified");

    let map = common::read(dir.path(), "dist/css/style.min.css.map");
    assert!(map.contains("\"version\":3"));
    assert!(map.contains("src/scss/style.scss"));
    Ok(())
}

#[tokio::test]
async fn release_minifies_and_drops_preserved_comment_markers() -> TestResult {
    let dir = common::project();
    common::write(
        dir.path(),
        "src/scss/banner.scss",
        "/*! keep-out banner */\nh1 {\n  user-select: none;\n}\n",
    );
    let ctx = common::context(&dir, BuildProfile { fast: true, release: false }.release());

    tasks::run(&ctx, Category::Style).await?;

    let css = common::read(dir.path(), "dist/css/style.min.css");
    assert!(!css.contains("keep-out banner"), "marker comments are demoted and minified away");
    assert!(!css.contains('\n'), "release output is minified");
    assert!(css.contains("-webkit-user-select"), "release output is vendor-prefixed");
    assert!(!css.contains("sourceMappingURL"));
    assert!(!dir.path().join("dist/css/style.min.css.map").exists());
    Ok(())
}

#[tokio::test]
async fn broken_stylesheet_is_fail_soft() -> TestResult {
    let dir = common::project();
    common::write(dir.path(), "src/scss/broken.scss", "body { color: $undefined-var; }\n");
    let ctx = common::context(&dir, BuildProfile::default());

    let report = tasks::run(&ctx, Category::Style).await?;
    assert_eq!(report.skipped, 1);

    let css = common::read(dir.path(), "dist/css/style.min.css");
    assert!(css.contains("#ff0000"), "valid sources still contribute");
    Ok(())
}
