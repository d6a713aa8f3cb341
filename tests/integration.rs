use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn rig_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("rig");
    path
}

const CPU_HEADER: &str =
    "brand,model,cores,threads,base_clock,boost_clock,tdp,price,amazon_link,flipkart_link";
const GPU_HEADER: &str =
    "brand,model,memory,memory_type,base_clock,boost_clock,tdp,price,amazon_link,flipkart_link";

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let tables_dir = root.join("tables");
    fs::create_dir_all(&tables_dir).unwrap();

    fs::write(
        tables_dir.join("cpus.csv"),
        format!(
            "{}\n\
             AMD,Ryzen 5 5600,6,12,3.5,4.4,65,150,https://a/r5,https://f/r5\n\
             Intel,Core i5-12400F,6,12,2.5,4.4,117,180,https://a/i5,https://f/i5\n\
             Intel,Core i9-13900K,24,32,3.0,5.8,253,590,https://a/i9,https://f/i9",
            CPU_HEADER
        ),
    )
    .unwrap();

    fs::write(
        tables_dir.join("gpus.csv"),
        format!(
            "{}\n\
             NVIDIA,RTX 3060,12,GDDR6,1320,1777,170,330,https://a/3060,https://f/3060\n\
             NVIDIA,RTX 4090,24,GDDR6X,2235,2520,450,1600,https://a/4090,https://f/4090",
            GPU_HEADER
        ),
    )
    .unwrap();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[catalog]
cpus = "{}/tables/cpus.csv"
gpus = "{}/tables/gpus.csv"
"#,
        root.display(),
        root.display()
    );

    let config_path = config_dir.join("rig.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_rig(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = rig_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run rig binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_recommend_picks_parts_within_budget() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_rig(&config_path, &["recommend", "1500", "gaming"]);
    assert!(
        success,
        "recommend failed: stdout={}, stderr={}",
        stdout, stderr
    );
    assert!(stdout.contains("CPU:"), "stdout: {}", stdout);
    assert!(stdout.contains("GPU:"), "stdout: {}", stdout);
    assert!(stdout.contains("Total:"), "stdout: {}", stdout);
    // gaming: CPU share 450, so the i9 (590) can never appear.
    assert!(!stdout.contains("i9-13900K"), "stdout: {}", stdout);
}

#[test]
fn test_recommend_reports_absent_cpu_slot() {
    let (_tmp, config_path) = setup_test_env();

    // gaming: CPU share = 200 * 0.3 = 60, below every CPU price.
    let (stdout, _, success) = run_rig(&config_path, &["recommend", "200", "gaming"]);
    assert!(success);
    assert!(
        stdout.contains("CPU: no suitable part within budget"),
        "stdout: {}",
        stdout
    );
}

#[test]
fn test_recommend_json_output() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_rig(
        &config_path,
        &["recommend", "2000", "productivity", "--hint", "video editing", "--json"],
    );
    assert!(success);

    let build: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(build.get("cpu").is_some());
    assert!(build.get("gpu").is_some());
    assert!(build.get("total_price").is_some());
}

#[test]
fn test_recommend_deterministic() {
    let (_tmp, config_path) = setup_test_env();

    let args = ["recommend", "1200", "gaming", "--hint", "high fps"];
    let (first, _, ok1) = run_rig(&config_path, &args);
    let (second, _, ok2) = run_rig(&config_path, &args);
    assert!(ok1 && ok2);
    assert_eq!(first, second);
}

#[test]
fn test_recommend_rejects_non_positive_budget() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_rig(&config_path, &["recommend", "0", "gaming"]);
    assert!(!success);
    assert!(
        stderr.contains("budget must be a positive number"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_recommend_fails_on_missing_table() {
    let (tmp, config_path) = setup_test_env();

    fs::remove_file(tmp.path().join("tables/gpus.csv")).unwrap();
    let (_, stderr, success) = run_rig(&config_path, &["recommend", "1500", "gaming"]);
    assert!(!success);
    assert!(
        stderr.contains("failed to read catalog table"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_recommend_fails_on_malformed_row() {
    let (tmp, config_path) = setup_test_env();

    fs::write(
        tmp.path().join("tables/cpus.csv"),
        format!("{}\nAMD,R5,six,12,3.5,4.4,65,150,a,f", CPU_HEADER),
    )
    .unwrap();
    let (_, stderr, success) = run_rig(&config_path, &["recommend", "1500", "gaming"]);
    assert!(!success);
    assert!(stderr.contains("cores"), "stderr: {}", stderr);
}

#[test]
fn test_train_runs_smoke_scenarios() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_rig(&config_path, &["train"]);
    assert!(success, "train failed: stderr={}", stderr);
    assert!(stdout.contains("Fitting description model"), "stdout: {}", stdout);
    assert!(stdout.contains("use case: gaming, budget: $1000"), "stdout: {}", stdout);
    assert!(stdout.contains("Training completed."), "stdout: {}", stdout);
}

#[test]
fn test_catalog_overview() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_rig(&config_path, &["catalog"]);
    assert!(success);
    assert!(stdout.contains("CPUs:        3"), "stdout: {}", stdout);
    assert!(stdout.contains("GPUs:        2"), "stdout: {}", stdout);
    assert!(stdout.contains("Vocabulary:"), "stdout: {}", stdout);
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    // No config file: the binary should still start and fail only because
    // the default table paths do not exist in the temp working directory.
    let tmp = TempDir::new().unwrap();
    let binary = rig_binary();
    let output = Command::new(&binary)
        .current_dir(tmp.path())
        .args(["recommend", "1500", "gaming"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to read catalog table"),
        "stderr: {}",
        stderr
    );
}
