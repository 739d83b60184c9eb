mod common;

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sitebake::pipeline;
use sitebake::profile::BuildProfile;

use walkdir::WalkDir;

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn build_twice_with_unchanged_inputs_is_byte_identical() -> TestResult {
    let dir = common::project();
    let ctx = Arc::new(common::context(&dir, BuildProfile::default()));

    pipeline::build(&ctx).await?;
    let first = snapshot(&dir.path().join("dist"));
    assert!(!first.is_empty());

    pipeline::build(&ctx).await?;
    let second = snapshot(&dir.path().join("dist"));

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn build_writes_every_category_to_its_own_destination() -> TestResult {
    let dir = common::project();
    let ctx = Arc::new(common::context(&dir, BuildProfile::default()));

    let reports = pipeline::build(&ctx).await?;
    assert_eq!(reports.len(), 5);

    for rel in [
        "dist/css/style.min.css",
        "dist/js/script.min.js",
        "dist/index.html",
        "dist/fonts/body.woff2",
        "dist/img/logo.svg",
    ] {
        assert!(dir.path().join(rel).exists(), "missing {rel}");
    }
    Ok(())
}

fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(root)
                .expect("under root")
                .to_path_buf();
            files.insert(rel, fs::read(entry.path()).expect("read"));
        }
    }
    files
}
