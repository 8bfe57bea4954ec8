use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn spectra_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("spectra"));
    cmd.env("HOME", home).env("USERPROFILE", home);
    cmd
}

fn write_registry(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("machines.yaml");
    fs::write(&path, contents).expect("write registry");
    path
}

#[test]
fn missing_registry_is_fatal() {
    let home = TempDir::new().expect("home");
    let gone = home.path().join("nope.yaml");

    spectra_cmd(home.path())
        .arg("av700")
        .arg("--config")
        .arg(&gone)
        .assert()
        .failure()
        .stderr(contains("machine registry not found"));
}

#[test]
fn unknown_machine_is_fatal_before_any_work() {
    let home = TempDir::new().expect("home");
    let registry = write_registry(
        home.path(),
        "version: 1\nmachines:\n  - name: av700\n    pairs:\n      - source: /mnt/av700/data\n        dest: /srv/mirror/av700\n",
    );

    spectra_cmd(home.path())
        .arg("mystery")
        .arg("--config")
        .arg(&registry)
        .assert()
        .failure()
        .stderr(contains("unknown machine 'mystery'"))
        .stderr(contains("av700"));
}

#[cfg(unix)]
mod end_to_end {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const ACQU: &str = "\
##$NusTD= 0
##$SOLVENT= <CDCl3>
##$NUC1= <1H>
##$TD= 65536
";

    struct Fixture {
        home: TempDir,
        work: TempDir,
        registry: PathBuf,
        experiment: PathBuf,
    }

    /// Replace the fake tool's script body; `EXP` expands to the
    /// fixture's experiment folder path.
    fn write_tool(fx: &Fixture, body: &str) {
        let tool = fx.work.path().join("fake-mirror.sh");
        let body = body.replace("EXP", &fx.experiment.display().to_string());
        fs::write(&tool, format!("#!/bin/sh\n{body}")).expect("tool");
    }

    /// A registry whose mirror program is a shell script echoing
    /// robocopy-shaped lines that point at a real experiment folder.
    fn fixture() -> Fixture {
        let home = TempDir::new().expect("home");
        let work = TempDir::new().expect("work");

        // Source tree with one recent candidate (u1/s1, freshly created).
        fs::create_dir_all(work.path().join("source").join("u1").join("s1")).expect("source");

        // Real experiment folder the fake tool claims to have copied.
        let experiment = work.path().join("exp").join("10");
        fs::create_dir_all(experiment.join("pdata").join("1")).expect("exp dirs");
        fs::write(experiment.join("acqu"), ACQU).expect("acqu");
        fs::write(
            experiment.join("pdata").join("1").join("proc"),
            "##$FTSIZE= 131072\n",
        )
        .expect("proc");
        fs::write(experiment.join("precom.output"), "").expect("precom");
        fs::write(experiment.join("fid"), vec![0u8; 16]).expect("fid");

        let tool = work.path().join("fake-mirror.sh");
        fs::write(&tool, "#!/bin/sh\nexit 0\n").expect("tool");
        let mut perms = fs::metadata(&tool).expect("meta").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&tool, perms).expect("chmod");

        let registry = write_registry(
            work.path(),
            &format!(
                "version: 1\n\
                 log_dir: {logs}\n\
                 mirror_program: {tool}\n\
                 path_prefix: {prefix}\n\
                 machines:\n\
                 \x20 - name: testmach\n\
                 \x20   instrument_id: TEST\n\
                 \x20   pairs:\n\
                 \x20     - source: {source}\n\
                 \x20       dest: {dest}\n",
                logs = work.path().join("logs").display(),
                tool = tool.display(),
                prefix = work.path().display(),
                source = work.path().join("source").display(),
                dest = work.path().join("dest").display(),
            ),
        );

        Fixture {
            home,
            work,
            registry,
            experiment,
        }
    }

    #[test]
    fn full_run_logs_one_record_and_prints_paths() {
        let fx = fixture();
        write_tool(
            &fx,
            "echo \"  New File  16  EXP/fid\"\n\
             echo \"  New File  20  EXP/pdata/1/proc\"\n\
             exit 1\n",
        );

        let assert = spectra_cmd(fx.home.path())
            .arg("testmach")
            .arg("--config")
            .arg(&fx.registry)
            .assert()
            .success()
            .stdout(contains(fx.experiment.display().to_string()))
            .stdout(contains("elapsed:"));
        let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
        assert!(
            stdout.contains("1 logged"),
            "expected one logged record in summary: {stdout}"
        );

        let log = fx.work.path().join("logs").join("TEST.log");
        let contents = fs::read_to_string(&log).expect("log file");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        let fields: Vec<&str> = lines[0].split(',').collect();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[1], "CDCl3");
        assert_eq!(fields[5], "TEST");
    }

    #[test]
    fn silent_tool_surfaces_warning_not_failure() {
        let fx = fixture();
        write_tool(&fx, "exit 16\n");

        spectra_cmd(fx.home.path())
            .arg("testmach")
            .arg("--config")
            .arg(&fx.registry)
            .assert()
            .success()
            .stderr(contains("nothing copy-confirmed"));

        assert!(!fx.work.path().join("logs").join("TEST.log").exists());
    }

    #[test]
    fn json_summary_reports_counts() {
        let fx = fixture();
        write_tool(&fx, "echo \"  New File  16  EXP/fid\"\nexit 0\n");

        let assert = spectra_cmd(fx.home.path())
            .arg("testmach")
            .arg("--config")
            .arg(&fx.registry)
            .arg("--json")
            .assert()
            .success();
        let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
        let summary: serde_json::Value = serde_json::from_str(&stdout).expect("json summary");

        assert_eq!(summary["machine"], "testmach");
        assert_eq!(summary["candidates"], 1);
        assert_eq!(summary["copied_folders"], 1);
        assert_eq!(summary["records_written"], 1);
        assert_eq!(summary["records_dropped"], 0);
    }
}
