mod common;

use std::error::Error;

use sitebake::config::model::ConfigFile;
use sitebake::profile::BuildProfile;
use sitebake::tasks::{self, BuildContext, Category};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn invalid_authored_file_is_skipped_not_fatal() -> TestResult {
    let dir = common::project();
    common::write(dir.path(), "src/js/broken.js", "function ( { nope ]]");
    let ctx = common::context(&dir, BuildProfile::default());

    let report = tasks::run(&ctx, Category::Script).await?;
    assert_eq!(report.skipped, 1);

    let js = common::read(dir.path(), "dist/js/script.min.js");
    assert!(js.contains("greet"), "valid sources still contribute");
    assert!(!js.contains("nope"), "the broken file yields no output");
    Ok(())
}

#[tokio::test]
async fn vendor_prelude_comes_first_and_skips_the_syntax_gate() -> TestResult {
    let dir = common::project();
    common::write(dir.path(), "vendor/runtime.js", "var RUNTIME=1;\n");

    let mut cfg = ConfigFile::default();
    cfg.script.vendor = vec!["vendor/runtime.js".to_string()];
    let ctx = BuildContext::new(dir.path(), cfg, BuildProfile::default());

    let report = tasks::run(&ctx, Category::Script).await?;
    assert_eq!(report.skipped, 0);

    let js = common::read(dir.path(), "dist/js/script.min.js");
    let vendor_at = js.find("RUNTIME").expect("vendor bundle present");
    let authored_at = js.find("greet").expect("authored source present");
    assert!(vendor_at < authored_at, "vendor bundle is prepended");
    Ok(())
}

#[tokio::test]
async fn release_minification_strips_line_comments() -> TestResult {
    let dir = common::project();
    let ctx = common::context(&dir, BuildProfile::default().release());

    tasks::run(&ctx, Category::Script).await?;

    let js = common::read(dir.path(), "dist/js/script.min.js");
    assert!(!js.contains("say hello"), "full-line comments are dropped");
    assert!(js.contains("function greet(name) {"));
    assert!(!js.contains("  "), "indentation is trimmed");
    Ok(())
}

#[tokio::test]
async fn slow_dev_writes_a_script_source_map() -> TestResult {
    let dir = common::project();
    let ctx = common::context(&dir, BuildProfile { fast: false, release: false });

    tasks::run(&ctx, Category::Script).await?;

    let js = common::read(dir.path(), "dist/js/script.min.js");
    assert!(js.contains("//# sourceMappingURL=script.min.js.map"));

    let map = common::read(dir.path(), "dist/js/script.min.js.map");
    assert!(map.contains("src/js/app.js"));
    Ok(())
}
