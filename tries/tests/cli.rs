use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

fn tries_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tries"))
}

/// Isolated config, cache, base directory and `PATH` for one invocation.
struct TestEnv {
    tmp: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("bin")).unwrap();
        Self { tmp }
    }

    fn base(&self) -> PathBuf {
        self.tmp.path().join("tries")
    }

    fn bin(&self) -> PathBuf {
        self.tmp.path().join("bin")
    }

    fn config_file(&self) -> PathBuf {
        self.tmp.path().join("config").join("tries").join("config.toml")
    }

    #[cfg(unix)]
    fn fake_git(&self, body: &str) {
        use std::os::unix::fs::PermissionsExt;
        let path = self.bin().join("git");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(tries_binary());
        cmd.args(args)
            .env("XDG_CONFIG_HOME", self.tmp.path().join("config"))
            .env("XDG_CACHE_HOME", self.tmp.path().join("cache"))
            .env("PATH", self.bin())
            .env_remove("TRIES_LOG")
            .env_remove("TRIES_PATH")
            .stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .env("TRIES_PATH", self.base())
            .output()
            .unwrap()
    }

    fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.base())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_lists_flags() {
    let env = TestEnv::new();
    let output = env.run(&["--help"]);
    assert!(output.status.success());
    let help = stdout(&output);
    for flag in ["--select-only", "--clone", "--config"] {
        assert!(help.contains(flag), "{flag} missing from:\n{help}");
    }
}

#[test]
fn test_picker_requires_a_terminal() {
    let env = TestEnv::new();
    let output = env.run(&["redis"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: tries requires an interactive terminal"));
    assert!(env.base().is_dir());
}

#[test]
fn test_invalid_clone_url() {
    let env = TestEnv::new();
    let output = env.run(&["--clone", "https://example.com/acme/widgets"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output)
            .contains("Error: not a recognised repository URL: https://example.com/acme/widgets"),
        "{}",
        stderr(&output)
    );
    assert!(env.entries().is_empty());
}

#[test]
fn test_clone_without_git_on_path() {
    let env = TestEnv::new();
    let output = env.run(&["--clone", "gh:acme/widgets"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("git is not installed or not on PATH"));
    assert!(env.entries().is_empty());
}

#[test]
fn test_invalid_config_is_exit_code_2() {
    let env = TestEnv::new();
    let file = env.config_file();
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, "path = \"/tmp\"\nbogus = [\n").unwrap();

    let output = env.run(&["--clone", "gh:acme/widgets"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Invalid config file"));
}

#[test]
fn test_one_line_toml_typo_is_not_migrated() {
    let env = TestEnv::new();
    let file = env.config_file();
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, "shel = \"/bin/zsh\"\n").unwrap();

    let output = env.run(&["--clone", "gh:acme/widgets"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Invalid config file"));
    assert!(!stderr(&output).contains("Note: converting"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "shel = \"/bin/zsh\"\n");
}

#[test]
fn test_missing_base_path_without_terminal() {
    let env = TestEnv::new();
    let output = env.command(&["redis"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("No experiment directory configured"));
}

#[cfg(unix)]
#[test]
fn test_failed_clone_leaves_no_directory() {
    let env = TestEnv::new();
    env.fake_git(r#": > "$5/partial"; exit 128"#);

    let output = env.run(&["--clone", "gh:acme/widgets"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Cloning https://github.com/acme/widgets.git into"), "{err}");
    assert!(err.contains("Error: clone failed"), "{err}");
    assert!(env.entries().is_empty(), "{:?}", env.entries());
}

#[cfg(unix)]
#[test]
fn test_clone_select_only_prints_path() {
    let env = TestEnv::new();
    env.fake_git(r#": > "$5/README""#);

    let first = env.run(&["-s", "--clone", "git@github.com:acme/widgets.git"]);
    assert!(first.status.success(), "{}", stderr(&first));
    let printed = PathBuf::from(stdout(&first).trim());
    assert!(printed.starts_with(env.base()));
    assert!(printed.join("README").is_file());
    assert!(printed.to_string_lossy().ends_with("-widgets"));

    let second = env.run(&["-s", "--clone", "gh:acme/widgets"]);
    assert!(second.status.success(), "{}", stderr(&second));
    assert!(stdout(&second).trim().ends_with("-widgets-2"));
    assert_eq!(env.entries().len(), 2);
}

#[cfg(unix)]
#[test]
fn test_legacy_config_is_migrated() {
    let env = TestEnv::new();
    env.fake_git(r#": > "$5/README""#);
    let file = env.config_file();
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(&file, format!("{}\n", env.base().display())).unwrap();

    let output = env
        .command(&["-s", "--clone", "gh:acme/widgets"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Note: converting"));

    let migrated = fs::read_to_string(&file).unwrap();
    let expected = format!("path = \"{}\"", env.base().display());
    assert!(migrated.contains(&expected), "{migrated}");
    assert!(Path::new(stdout(&output).trim()).starts_with(env.base()));
}
