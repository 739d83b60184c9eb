use std::fs;
use std::path::Path;

use tempfile::TempDir;

use sitebake::config::model::ConfigFile;
use sitebake::profile::BuildProfile;
use sitebake::tasks::BuildContext;

/// A small project tree following the default registry layout.
pub fn project() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        "src/scss/style.scss",
        "$accent: #ff0000;\nbody {\n  color: $accent;\n\n  .nested {\n    margin: 0;\n  }\n}\n",
    );
    write(
        dir.path(),
        "src/js/app.js",
        "function greet(name) {\n  // say hello\n  return 'hello ' + name;\n}\n",
    );
    write(
        dir.path(),
        "src/templates/index.html",
        "<html>\n  <body>\n    <!-- page header -->\n    <p>hello   world</p>\n  </body>\n</html>\n",
    );
    write(dir.path(), "src/fonts/body.woff2", "woff2-bytes");
    write(dir.path(), "src/assets/img/logo.svg", "<svg></svg>");
    dir
}

pub fn context(dir: &TempDir, profile: BuildProfile) -> BuildContext {
    BuildContext::new(dir.path(), ConfigFile::default(), profile)
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

pub fn read(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).expect("read")
}
