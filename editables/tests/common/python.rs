//! Running a Python interpreter against an install.

use std::path::Path;
use std::process::Command;

/// Interpreter used by the import round-trip tests.
const PYTHON: &str = "python3";

/// Whether a usable interpreter is on `PATH`.
///
/// Import round-trip tests return early when it is not.
#[allow(dead_code)]
pub fn available() -> bool {
    Command::new(PYTHON)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Dotted import name of a target path.
///
/// `foo/__init__.py` -> `foo`, `bar/baz/__init__.py` -> `bar.baz`,
/// `foo.py` -> `foo`.
#[allow(dead_code)]
pub fn import_name(target: &str) -> String {
    let stem = target
        .strip_suffix("/__init__.py")
        .or_else(|| target.strip_suffix(".py"))
        .unwrap_or(target);
    stem.replace('/', ".")
}

/// Import every target with `site_dir` registered as a site directory, so
/// its `.pth` files are processed. Panics with the interpreter's stderr on
/// failure.
#[allow(dead_code)]
pub fn assert_importable(site_dir: &Path, targets: &[&str]) {
    let imports: Vec<String> = targets.iter().map(|t| import_name(t)).collect();
    let script = "import importlib, site, sys\n\
                  site.addsitedir(sys.argv[1])\n\
                  for name in sys.argv[2:]:\n    importlib.import_module(name)\n";

    let output = Command::new(PYTHON)
        .arg("-c")
        .arg(script)
        .arg(site_dir)
        .args(&imports)
        .env_remove("PYTHONPATH")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "importing {imports:?} from {} failed:\n{}",
        site_dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Run `script` with `site_dir` registered as a site directory and return
/// its trimmed stdout.
#[allow(dead_code)]
pub fn run_in_site(site_dir: &Path, script: &str) -> String {
    let prelude = "import site, sys\nsite.addsitedir(sys.argv[1])\n";
    let output = Command::new(PYTHON)
        .arg("-c")
        .arg(format!("{prelude}{script}"))
        .arg(site_dir)
        .env_remove("PYTHONPATH")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "script failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
