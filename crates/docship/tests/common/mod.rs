use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// A project directory with stub generator and publisher executables.
///
/// Both stubs append their arguments to `calls.log` and print a line to stdout. The generator writes
/// `<module>.m.html` into its `--html-dir`, like pdoc does.
pub struct TestEnv {
    _tmp: TempDir,
    pub root: PathBuf,
    pub log: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_publisher_exit(0)
    }

    pub fn with_publisher_exit(code: i32) -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let root = tmp.path().to_path_buf();
        let log = root.join("calls.log");
        let bin = root.join("bin");
        fs::create_dir_all(&bin).expect("create stub bin dir");

        let pdoc = bin.join("pdoc");
        write_script(
            &pdoc,
            &format!(
                r#"#!/bin/sh
echo "pdoc $*" >> "{log}"
out=""
prev=""
last=""
for arg in "$@"; do
  if [ "$prev" = "--html-dir" ]; then out="$arg"; fi
  prev="$arg"
  last="$arg"
done
if [ ! -f "$last" ]; then
  echo "pdoc: no such module: $last" >&2
  exit 1
fi
name=$(basename "$last" .py)
mkdir -p "$out"
echo "<html>$name</html>" > "$out/$name.m.html"
echo "pdoc: wrote $out/$name.m.html"
echo "<html>sub</html>" > "$out/$name.sub.m.html"
"#,
                log = log.display()
            ),
        );

        let ghp = bin.join("ghp-import");
        write_script(
            &ghp,
            &format!(
                "#!/bin/sh\necho \"ghp-import $*\" >> \"{log}\"\necho \"ghp-import: committed\"\nexit {code}\n",
                log = log.display(),
                code = code
            ),
        );

        fs::write(root.join("billing.py"), "\"Billing API client\"\n").expect("write module");
        fs::write(
            root.join("docship.toml"),
            format!(
                r#"reminder = "push gh-pages when done"

[generate]
program = "{pdoc}"
source = "billing.py"
output = "docs"

[publish]
program = "{ghp}"
message = "Regenerate docs"
"#,
                pdoc = pdoc.display(),
                ghp = ghp.display()
            ),
        )
        .expect("write config");

        Self {
            _tmp: tmp,
            root,
            log,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("docship");
        cmd.current_dir(&self.root);
        cmd
    }

    /// Lines written by the stubs, in invocation order.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn docs(&self) -> PathBuf {
        self.root.join("docs")
    }
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).expect("write stub");
    let mut perms = fs::metadata(path).expect("stat stub").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("chmod stub");
}
