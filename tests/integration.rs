use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn mundart_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("mundart");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = r#"[server]
bind = "127.0.0.1:7331"

[home]
district_code = "AN"
town = "Ansbach"
"#;

    let config_path = config_dir.join("mundart.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_mundart(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = mundart_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run mundart binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

const SAMPLE_DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<wbf>
  <info>
    <result_count>3</result_count>
    <timestamp>2024-03-01T12:00:00</timestamp>
  </info>
  <artikel>
    <lemma>klein</lemma>
    <bedeutung>klein, winzig</bedeutung>
    <beleg-angabe>
      <beleg-text>glaa</beleg-text>
      <beleg-region ort="Feuchtwangen" landkreis="AN"/>
    </beleg-angabe>
    <grammatik wortart="Adjektiv"/>
    <etymologie>mhd. kleine</etymologie>
  </artikel>
  <artikel>
    <lemma>klein</lemma>
    <bedeutung>von geringer bedeutung</bedeutung>
    <beleg-angabe>
      <beleg-text>winzich</beleg-text>
      <beleg-region ort="Hof" landkreis="HO"/>
    </beleg-angabe>
  </artikel>
  <artikel>
    <bedeutung>entry without a headword</bedeutung>
    <beleg-angabe>
      <beleg-text>kaputt</beleg-text>
      <beleg-region ort="Bamberg" landkreis="BA"/>
    </beleg-angabe>
  </artikel>
</wbf>
"#;

#[test]
fn test_scopes_lists_catalog() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_mundart(&config_path, &["scopes"]);
    assert!(
        success,
        "scopes failed: stdout={}, stderr={}",
        stdout, stderr
    );

    let catalog: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let scopes = catalog.as_array().unwrap();
    assert_eq!(scopes.len(), 52);
    assert!(scopes
        .iter()
        .any(|s| s["token"] == "landkreis_ansbach" && s["landkreise"] == "AN"));
    assert!(scopes
        .iter()
        .any(|s| s["token"] == "custom_town" && s["family"] == "custom_town"));
}

#[test]
fn test_compile_default_scope() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_mundart(&config_path, &["compile", "Haus"]);
    assert!(success);

    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["scope"], "landkreis_ansbach");
    assert_eq!(output["parameters"]["dictionary"], "wbf");
    assert_eq!(output["parameters"]["bedeutung"], "Haus");
    assert_eq!(output["parameters"]["case"], "no");
    assert_eq!(output["parameters"]["exact"], "no");
    assert_eq!(output["parameters"]["landkreise"], "AN");
}

#[test]
fn test_compile_area_with_town_override() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_mundart(
        &config_path,
        &[
            "compile",
            "Haus",
            "--scope",
            "area_ansbach",
            "--town",
            "Feuchtwangen",
            "--exact",
        ],
    );
    assert!(success);

    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["parameters"]["orte"], "Feuchtwangen");
    assert_eq!(output["parameters"]["landkreise"], "AN");
    assert_eq!(output["parameters"]["exact"], "yes");
}

#[test]
fn test_compile_region_joins_district_codes() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_mundart(
        &config_path,
        &["compile", "Haus", "--scope", "mittelfranken"],
    );
    assert!(success);

    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["parameters"]["landkreise"], "AN,ERH,FÜ,NEA,LAU,RH,WUG");
}

#[test]
fn test_compile_rejects_invalid_word() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_mundart(&config_path, &["compile", "Haus42"]);
    assert!(!success);
    assert!(stderr.contains("characters"), "stderr={}", stderr);
}

#[test]
fn test_compile_rejects_unknown_scope() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_mundart(
        &config_path,
        &["compile", "Haus", "--scope", "landkreis_atlantis"],
    );
    assert!(!success);
    assert!(stderr.contains("unknown search scope"), "stderr={}", stderr);
}

#[test]
fn test_compile_rejects_custom_town_without_town() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) =
        run_mundart(&config_path, &["compile", "Haus", "--scope", "custom_town"]);
    assert!(!success);
    assert!(stderr.contains("town"), "stderr={}", stderr);
}

#[test]
fn test_extract_ranks_records() {
    let (tmp, config_path) = setup_test_env();

    let doc_path = tmp.path().join("response.xml");
    fs::write(&doc_path, SAMPLE_DOC).unwrap();

    let (stdout, stderr, success) = run_mundart(
        &config_path,
        &["extract", doc_path.to_str().unwrap(), "klein"],
    );
    assert!(
        success,
        "extract failed: stdout={}, stderr={}",
        stdout, stderr
    );

    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["metadata"]["result_count"], 3);
    assert_eq!(output["metadata"]["api_version"], "1.0");
    assert_eq!(output["metadata"]["licence"], "CC-BY");

    // The headword-less third entry is dropped.
    let translations = output["translations"].as_array().unwrap();
    assert_eq!(translations.len(), 2);

    // The exact meaning outranks the unrelated one.
    assert_eq!(translations[0]["franconian_word"], "glaa");
    assert_eq!(translations[0]["location"], "Feuchtwangen, Landkreis AN");
    assert_eq!(translations[0]["grammar"], "Adjektiv");
    assert_eq!(translations[0]["etymology"], "mhd. kleine");
    assert_eq!(translations[0]["source"], "BDO-WBF");
    let first = translations[0]["confidence"].as_f64().unwrap();
    let second = translations[1]["confidence"].as_f64().unwrap();
    assert!(first >= second);
    assert!((0.0..=1.0).contains(&first));
}

#[test]
fn test_extract_limit_truncates_after_ranking() {
    let (tmp, config_path) = setup_test_env();

    let doc_path = tmp.path().join("response.xml");
    fs::write(&doc_path, SAMPLE_DOC).unwrap();

    let (stdout, _, success) = run_mundart(
        &config_path,
        &["extract", doc_path.to_str().unwrap(), "klein", "--limit", "1"],
    );
    assert!(success);

    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let translations = output["translations"].as_array().unwrap();
    assert_eq!(translations.len(), 1);
    // The best-ranked record survives the cut.
    assert_eq!(translations[0]["franconian_word"], "glaa");
}

#[test]
fn test_extract_is_deterministic_across_runs() {
    let (tmp, config_path) = setup_test_env();

    let doc_path = tmp.path().join("response.xml");
    fs::write(&doc_path, SAMPLE_DOC).unwrap();

    let (first, _, ok1) = run_mundart(
        &config_path,
        &["extract", doc_path.to_str().unwrap(), "klein"],
    );
    let (second, _, ok2) = run_mundart(
        &config_path,
        &["extract", doc_path.to_str().unwrap(), "klein"],
    );
    assert!(ok1 && ok2);
    assert_eq!(first, second);
}

#[test]
fn test_extract_empty_document_fails() {
    let (tmp, config_path) = setup_test_env();

    let doc_path = tmp.path().join("empty.xml");
    fs::write(&doc_path, "   \n").unwrap();

    let (_, stderr, success) = run_mundart(
        &config_path,
        &["extract", doc_path.to_str().unwrap(), "klein"],
    );
    assert!(!success);
    assert!(stderr.contains("empty"), "stderr={}", stderr);
}

#[test]
fn test_extract_missing_metadata_fails() {
    let (tmp, config_path) = setup_test_env();

    let doc_path = tmp.path().join("nometa.xml");
    fs::write(
        &doc_path,
        "<wbf><artikel><lemma>klein</lemma></artikel></wbf>",
    )
    .unwrap();

    let (_, stderr, success) = run_mundart(
        &config_path,
        &["extract", doc_path.to_str().unwrap(), "klein"],
    );
    assert!(!success);
    assert!(stderr.contains("metadata"), "stderr={}", stderr);
}

#[test]
fn test_extract_malformed_document_fails() {
    let (tmp, config_path) = setup_test_env();

    let doc_path = tmp.path().join("broken.xml");
    fs::write(&doc_path, "<wbf><info></wbf>").unwrap();

    let (_, stderr, success) = run_mundart(
        &config_path,
        &["extract", doc_path.to_str().unwrap(), "klein"],
    );
    assert!(!success);
    assert!(stderr.contains("malformed"), "stderr={}", stderr);
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("does-not-exist.toml");

    let (stdout, _, success) = run_mundart(&config_path, &["compile", "Haus"]);
    assert!(success);
    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["scope"], "landkreis_ansbach");
}

#[test]
fn test_invalid_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("mundart.toml");
    fs::write(&config_path, "[home]\ntown = \"\"\n").unwrap();

    let (_, stderr, success) = run_mundart(&config_path, &["compile", "Haus"]);
    assert!(!success);
    assert!(stderr.contains("home.town"), "stderr={}", stderr);
}

#[test]
fn test_custom_home_area_changes_evidence_choice() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("mundart.toml");
    fs::write(
        &config_path,
        "[home]\ndistrict_code = \"HO\"\ntown = \"Hof\"\n",
    )
    .unwrap();

    let doc = r#"<wbf>
  <info><result_count>1</result_count><timestamp>t</timestamp></info>
  <artikel>
    <lemma>klein</lemma>
    <bedeutung>klein</bedeutung>
    <beleg-angabe>
      <beleg-text>glaa</beleg-text>
      <beleg-region ort="Feuchtwangen" landkreis="AN"/>
    </beleg-angabe>
    <beleg-angabe>
      <beleg-text>winzich</beleg-text>
      <beleg-region ort="Hof" landkreis="HO"/>
    </beleg-angabe>
  </artikel>
</wbf>"#;
    let doc_path = tmp.path().join("response.xml");
    fs::write(&doc_path, doc).unwrap();

    let (stdout, _, success) = run_mundart(
        &config_path,
        &["extract", doc_path.to_str().unwrap(), "klein"],
    );
    assert!(success);
    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(output["translations"][0]["franconian_word"], "winzich");
    assert_eq!(output["translations"][0]["location"], "Hof, Landkreis HO");
}
