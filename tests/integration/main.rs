//! Integration tests for dagcache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    const SEED: &str = "290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563";
    const FILE_NAME: &str = "full-R23-290decd9548b62a8";
    const MAGIC: u64 = 0xFEE1_DEAD_BADD_CAFE;

    /// Command isolated from the user's config file
    fn dagcache(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("dagcache");
        cmd.env("DAGCACHE_CONFIG", temp.path().join("config.toml"));
        cmd
    }

    fn prepare(temp: &TempDir, dir: &std::path::Path, size: u64) -> Command {
        let size = size.to_string();
        let mut cmd = dagcache(temp);
        cmd.args(["prepare", "--seed", SEED, "--size", size.as_str(), "--dir"])
            .arg(dir);
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("proof-of-work dataset"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("dagcache"));
    }

    #[test]
    fn prepare_creates_then_refuses_unsealed() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");

        prepare(&temp, &dir, 1_048_576)
            .assert()
            .success()
            .stdout(predicate::str::contains("mismatch"));

        let path = dir.join(FILE_NAME);
        assert_eq!(fs::metadata(&path).unwrap().len(), 1_048_576 + 8);

        prepare(&temp, &dir, 1_048_576)
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot be trusted"))
            .stderr(predicate::str::contains("--force"));
    }

    #[test]
    fn prepare_reuses_sealed_dataset() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");

        prepare(&temp, &dir, 64).assert().success();

        let path = dir.join(FILE_NAME);
        let mut file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.write_all(&MAGIC.to_ne_bytes()).unwrap();
        drop(file);

        prepare(&temp, &dir, 64)
            .args(["--format", "plain"])
            .assert()
            .success()
            .stdout("match\n");
    }

    #[test]
    fn prepare_wrong_size_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");

        prepare(&temp, &dir, 64).assert().success();
        prepare(&temp, &dir, 128).assert().failure();

        assert_eq!(fs::metadata(dir.join(FILE_NAME)).unwrap().len(), 64 + 8);
    }

    #[test]
    fn prepare_force_recreates() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");

        prepare(&temp, &dir, 64).assert().success();
        prepare(&temp, &dir, 128)
            .arg("--force")
            .args(["--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"outcome\": \"mismatch\""));

        assert_eq!(fs::metadata(dir.join(FILE_NAME)).unwrap().len(), 128 + 8);
    }

    #[test]
    fn prepare_rejects_bad_seed() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .args(["prepare", "--seed", "nothex", "--size", "8"])
            .assert()
            .failure();
    }

    #[test]
    fn prepare_rejects_huge_epoch() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .args(["prepare", "--seed", SEED, "--epoch", "18446744073709551615", "--dir"])
            .arg(temp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("too large"));

        assert!(!temp.path().join(FILE_NAME).exists());
    }

    #[test]
    fn path_prints_file_name() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .args(["path", "--seed", SEED, "--dir"])
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains(FILE_NAME));
    }

    #[test]
    fn inspect_reports_unsealed() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");
        prepare(&temp, &dir, 64).assert().success();

        dagcache(&temp)
            .args(["inspect", "--seed", SEED, "--size", "64", "--format", "plain", "--dir"])
            .arg(&dir)
            .assert()
            .success()
            .stdout("size-mismatch\n");
    }

    #[test]
    fn inspect_missing_dataset() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .args(["inspect", "--seed", SEED, "--dir"])
            .arg(temp.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("No dataset at"));
    }

    #[test]
    fn list_empty() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .args(["list", "--dir"])
            .arg(temp.path().join("none"))
            .assert()
            .success()
            .stdout(predicate::str::contains("No datasets found"));
    }

    #[test]
    fn list_shows_prepared_dataset() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");
        prepare(&temp, &dir, 64).assert().success();

        dagcache(&temp)
            .args(["list", "--format", "plain", "--dir"])
            .arg(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains(FILE_NAME));
    }

    #[test]
    fn prune_dry_run_keeps_files() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");
        prepare(&temp, &dir, 64).assert().success();

        dagcache(&temp)
            .args(["prune", "--keep", "0", "--dry-run", "--dir"])
            .arg(&dir)
            .assert()
            .success()
            .stdout(predicate::str::contains("Dry run"));

        assert!(dir.join(FILE_NAME).exists());
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[dataset]"));
    }

    #[test]
    fn config_init_writes_file() {
        let temp = TempDir::new().unwrap();
        dagcache(&temp)
            .args(["config", "init"])
            .assert()
            .success();

        let written = fs::read_to_string(temp.path().join("config.toml")).unwrap();
        assert!(written.contains("datasets_on_disk = 2"));
    }

    #[test]
    fn config_rejects_zero_datasets_on_disk() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            "[dataset]\ndatasets_on_disk = 0\n",
        )
        .unwrap();

        dagcache(&temp)
            .args(["config", "show"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("datasets_on_disk"));
    }
}
