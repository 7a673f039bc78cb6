use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const FAKE_CURL: &str = r#"#!/bin/sh
echo "$@" >> "__LOG__"
out=""
url=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    -*) shift ;;
    *) url="$1"; shift ;;
  esac
done
exec cp "${url#file://}" "$out"
"#;

const FAKE_GH: &str = r#"#!/bin/sh
echo "$@" >> "__LOG__"
exit 0
"#;

/// Installer fixture: records its arguments and drops a binary into `-b <dir>`.
pub const RECORDING_INSTALLER: &str = r#"#!/bin/sh
echo "$@" > "$2/args.txt"
printf '#!/bin/sh\necho mytool\n' > "$2/mytool"
"#;

// Not every test binary uses every helper
#[allow(dead_code)]
pub struct TestContext {
    pub _temp_dir: TempDir,
    pub fake_bin: PathBuf,
    pub served_dir: PathBuf,
    pub tmp_dir: PathBuf,
    pub runner_temp: PathBuf,
    pub github_path: PathBuf,
    pub github_output: PathBuf,
    pub curl_log: PathBuf,
    pub gh_log: PathBuf,
    pub bin_path: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        let fake_bin = root.join("fake-bin");
        let served_dir = root.join("served");
        let tmp_dir = root.join("tmp");
        let runner_temp = root.join("runner-temp");
        for dir in [&fake_bin, &served_dir, &tmp_dir, &runner_temp] {
            fs::create_dir_all(dir).expect("Failed to create test dir");
        }

        let github_path = root.join("github_path");
        let github_output = root.join("github_output");
        let curl_log = root.join("curl.log");
        let gh_log = root.join("gh.log");
        write_executable(
            &fake_bin.join("curl"),
            &FAKE_CURL.replace("__LOG__", &curl_log.display().to_string()),
        );
        write_executable(
            &fake_bin.join("gh"),
            &FAKE_GH.replace("__LOG__", &gh_log.display().to_string()),
        );

        Self {
            _temp_dir: temp_dir,
            github_path,
            github_output,
            fake_bin,
            served_dir,
            tmp_dir,
            runner_temp,
            curl_log,
            gh_log,
            bin_path: PathBuf::from(env!("CARGO_BIN_EXE_script-installer")),
        }
    }

    /// A command with a scrubbed environment: fake tools first on PATH and
    /// every Actions variable pointing into the sandbox.
    pub fn cmd(&self) -> Command {
        let mut paths = vec![self.fake_bin.clone()];
        if let Some(path) = env::var_os("PATH") {
            paths.extend(env::split_paths(&path));
        }

        let mut cmd = Command::new(&self.bin_path);
        cmd.env_clear()
            .env("PATH", env::join_paths(paths).expect("Invalid PATH"))
            .env("HOME", self._temp_dir.path())
            .env("TMPDIR", &self.tmp_dir)
            .env("RUNNER_TEMP", &self.runner_temp)
            .env("GITHUB_PATH", &self.github_path)
            .env("GITHUB_OUTPUT", &self.github_output);
        cmd
    }

    /// Serve `body` as an installer script and return its URL.
    pub fn serve_script(&self, body: &str) -> String {
        let path = self.served_dir.join("install.sh");
        fs::write(&path, body).expect("Failed to write installer fixture");
        format!("file://{}", path.display())
    }

    pub fn github_path_lines(&self) -> Vec<String> {
        fs::read_to_string(&self.github_path)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn install_dirs(&self) -> Vec<PathBuf> {
        entries(&self.runner_temp)
    }

    pub fn leftover_temp_entries(&self) -> Vec<PathBuf> {
        entries(&self.tmp_dir)
    }
}

fn entries(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.expect("Failed to read entry").path())
        .collect()
}

fn write_executable(path: &Path, body: &str) {
    fs::write(path, body).expect("Failed to write fake tool");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake tool");
    }
}

#[allow(dead_code)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status,
        }
    }
}

#[allow(dead_code)]
impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        if !self.status.success() {
            panic!(
                "Command failed with status {:?}\nstdout: {}\nstderr: {}",
                self.status.code(),
                self.stdout,
                self.stderr
            );
        }
        self
    }

    pub fn assert_exit_code(&self, code: i32) -> &Self {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Unexpected exit status\nstdout: {}\nstderr: {}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Stdout did not contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Stderr did not contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }

    pub fn warning_count(&self) -> usize {
        self.stderr.matches("warning:").count()
    }
}
