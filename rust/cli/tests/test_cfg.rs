use brandi_cli::run;
use serial_test::serial;
use std::io::Write;

const VARS: [&str; 5] = [
    "BRANDI_CONFIG",
    "BRANDI_SEED",
    "BRANDI_GAMES",
    "BRANDI_BOT",
    "BRANDI_MAX_EVENTS",
];

fn clear_env() {
    for v in VARS {
        unsafe { std::env::remove_var(v) };
    }
}

fn cfg_json() -> (i32, serde_json::Value, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(["brandi", "cfg"], &mut out, &mut err);
    let json = serde_json::from_slice(&out).unwrap_or(serde_json::Value::Null);
    (code, json, String::from_utf8_lossy(&err).into_owned())
}

#[test]
#[serial]
fn defaults_are_reported_with_source() {
    clear_env();
    let (code, json, _) = cfg_json();
    assert_eq!(code, 0);
    assert_eq!(json["bot"]["value"], "baseline");
    assert_eq!(json["bot"]["source"], "default");
    assert_eq!(json["games"]["value"], 1);
    assert!(json["seed"]["value"].is_null());
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 5\ngames = 3\nbot = \"random\"").unwrap();
    unsafe {
        std::env::set_var("BRANDI_CONFIG", file.path());
        std::env::set_var("BRANDI_SEED", "9");
    }
    let (code, json, _) = cfg_json();
    clear_env();
    assert_eq!(code, 0);
    assert_eq!(json["seed"]["value"], 9);
    assert_eq!(json["seed"]["source"], "env");
    assert_eq!(json["games"]["value"], 3);
    assert_eq!(json["games"]["source"], "file");
    assert_eq!(json["bot"]["value"], "random");
    assert_eq!(json["max_events"]["source"], "default");
}

#[test]
#[serial]
fn invalid_env_value_fails() {
    clear_env();
    unsafe { std::env::set_var("BRANDI_GAMES", "many") };
    let (code, _, stderr) = cfg_json();
    clear_env();
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid games"));
}
