use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

fn plugin_types_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_plugin-types"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(plugin_types_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ELECTRON_APP_PATH")
        .output()
        .expect("Failed to execute plugin-types command")
}

fn run_plugin_types(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    run_in(dir.path(), args)
}

fn output_to_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_to_string(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path.display().to_string()
}

fn valid_manifest() -> Value {
    json!({
        "id": "machine-monitor",
        "name": "Machine Monitor",
        "version": "1.0.0",
        "description": "Real-time machine status monitoring",
        "author": "CNC Controls Team",
        "category": "monitoring",
        "placement": "dashboard",
        "permissions": ["machine.read", "status.read"]
    })
}

mod version_command_tests {
    use super::*;

    #[test]
    fn test_version_command_basic() {
        let output = run_plugin_types(&["version"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "version command should succeed");
        assert!(stdout.contains("plugin-types"));
        assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_version_command_detailed() {
        let output = run_plugin_types(&["version", "--detailed"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        assert!(stdout.contains("Version"));
        assert!(stdout.contains("License"));
        assert!(stdout.contains("Permissions"));
    }
}

mod logging_env_tests {
    use super::*;

    fn run_with_rust_log(filter: &str, args: &[&str]) -> Output {
        let dir = tempfile::tempdir().unwrap();
        Command::new(plugin_types_binary())
            .args(args)
            .current_dir(dir.path())
            .env("NO_COLOR", "1")
            .env("RUST_LOG", filter)
            .env_remove("PLUGIN_TYPES_LOG_LEVEL")
            .output()
            .expect("Failed to execute plugin-types command")
    }

    #[test]
    fn test_rust_log_off_does_not_abort() {
        let output = run_with_rust_log("off", &["version"]);
        assert!(output.status.success(), "{}", stderr_to_string(&output));
        assert!(output_to_string(&output).contains("plugin-types"));
    }

    #[test]
    fn test_rust_log_directive_list() {
        let output = run_with_rust_log("warn,plugin_types_core=debug", &["permissions"]);
        assert!(output.status.success(), "{}", stderr_to_string(&output));
    }

    #[test]
    fn test_unknown_log_level_reports_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = Command::new(plugin_types_binary())
            .arg("version")
            .current_dir(dir.path())
            .env("NO_COLOR", "1")
            .env("PLUGIN_TYPES_LOG_LEVEL", "loud")
            .output()
            .expect("Failed to execute plugin-types command");

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("E1002"));
    }
}

mod help_tests {
    use super::*;

    #[test]
    fn test_help_lists_commands() {
        let output = run_plugin_types(&["--help"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        for command in ["validate", "compat", "sync", "permissions", "rules", "config", "version"] {
            assert!(stdout.contains(command), "help should mention {}", command);
        }
    }

    #[test]
    fn test_invalid_command() {
        let output = run_plugin_types(&["frobnicate"]);
        assert!(!output.status.success());
    }

    #[test]
    fn test_invalid_kind_rejected() {
        let output = run_plugin_types(&["rules", "--kind", "widget"]);
        assert!(!output.status.success());
    }
}

mod validate_command_tests {
    use super::*;

    #[test]
    fn test_valid_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_json(&dir, "plugin.json", &valid_manifest());

        let output = run_in(dir.path(), &["validate", &file]);
        assert!(output.status.success(), "{}", stderr_to_string(&output));
        assert!(output_to_string(&output).contains("is a valid registry manifest"));
    }

    #[test]
    fn test_invalid_manifest_exits_nonzero() {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = valid_manifest();
        manifest["id"] = json!("Machine Monitor");
        manifest["placement"] = json!("floating");
        let file = write_json(&dir, "plugin.json", &manifest);

        let output = run_in(dir.path(), &["validate", &file]);
        let stdout = output_to_string(&output);

        assert!(!output.status.success());
        assert!(stdout.contains("2 violation(s)"));
        assert!(stdout.contains("pattern_mismatch"));
        assert!(stdout.contains("not_in_enum"));
    }

    #[test]
    fn test_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_json(&dir, "plugin.json", &json!({ "id": "x" }));

        let output = run_in(dir.path(), &["validate", &file, "--format", "json"]);
        assert!(!output.status.success());

        let report: Value = serde_json::from_str(&output_to_string(&output)).unwrap();
        let violations = report["violations"].as_array().unwrap();
        assert_eq!(violations.len(), 5);
        assert!(violations
            .iter()
            .all(|v| v["code"] == json!("missing_required")));
        assert_eq!(violations[0]["field_path"], json!("name"));
    }

    #[test]
    fn test_host_manifest_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugin.yaml");
        std::fs::write(
            &path,
            "id: spindle-panel\nname: Spindle Panel\nversion: 0.2.0\ndescription: Spindle controls\n\
             author: CNC Controls Team\nplacement: sidebar\npermissions:\n  - machine.control\n",
        )
        .unwrap();

        let output = run_in(
            dir.path(),
            &["validate", path.to_str().unwrap(), "--kind", "host-manifest"],
        );
        assert!(output.status.success(), "{}", output_to_string(&output));
    }

    #[test]
    fn test_registry_with_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let entry = json!({
            "id": "dup",
            "name": "Dup",
            "description": "d",
            "author": "a",
            "version": "1.0.0",
            "downloadUrl": "https://example.com/dup.zip",
            "manifestUrl": "https://example.com/dup.json",
            "category": "utility"
        });
        let file = write_json(
            &dir,
            "registry.json",
            &json!({
                "version": "1.0.0",
                "categories": ["utility"],
                "plugins": [entry.clone(), entry]
            }),
        );

        let output = run_in(dir.path(), &["validate", &file, "--kind", "registry"]);
        assert!(!output.status.success());
        assert!(output_to_string(&output).contains("plugins[1].id"));
    }

    #[test]
    fn test_missing_file_reports_error() {
        let output = run_plugin_types(&["validate", "does-not-exist.json"]);
        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("Error"));
    }

    #[test]
    fn test_unsupported_extension_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugin.ini");
        std::fs::write(&path, "id=x").unwrap();

        let output = run_in(dir.path(), &["validate", path.to_str().unwrap()]);
        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("Suggestion"));
    }
}

mod compat_command_tests {
    use super::*;

    #[test]
    fn test_compat_passes() {
        let output = run_plugin_types(&["compat"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "{}", stdout);
        assert!(stdout.contains("5 of 5 checks passed"));
    }

    #[test]
    fn test_compat_json() {
        let output = run_plugin_types(&["compat", "--format", "json"]);
        assert!(output.status.success());

        let report: Value = serde_json::from_str(&output_to_string(&output)).unwrap();
        let checks = report["checks"].as_array().unwrap();
        assert_eq!(checks.len(), 5);
        assert!(checks.iter().all(|c| c["passed"] == json!(true)));
    }
}

mod catalogue_command_tests {
    use super::*;

    #[test]
    fn test_permissions_text() {
        let output = run_plugin_types(&["permissions"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        assert!(stdout.contains("machine.read"));
        assert!(stdout.contains("network.access"));
    }

    #[test]
    fn test_permissions_json() {
        let output = run_plugin_types(&["permissions", "--format", "json"]);
        let permissions: Value = serde_json::from_str(&output_to_string(&output)).unwrap();
        let permissions = permissions.as_array().unwrap();

        assert_eq!(permissions.len(), 9);
        assert_eq!(permissions[0]["name"], json!("machine.read"));
        assert_eq!(permissions[0]["critical"], json!(true));
    }

    #[test]
    fn test_rules_for_host_manifest() {
        let output = run_plugin_types(&["rules", "--kind", "host-manifest"]);
        let stdout = output_to_string(&output);

        assert!(output.status.success());
        assert!(stdout.contains("permissions"));
        assert!(stdout.contains("dependencies"));
    }
}

mod sync_command_tests {
    use super::*;

    #[test]
    fn test_sync_missing_app_path() {
        let dir = tempfile::tempdir().unwrap();
        let output = run_in(dir.path(), &["sync", "--app-path", "missing-app"]);

        assert!(!output.status.success());
        assert!(stderr_to_string(&output).contains("E4001"));
    }

    #[test]
    fn test_sync_dry_run() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("app/src/services/database");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(source.join("types.ts"), "export type Id = string;\n").unwrap();

        let output = run_in(
            dir.path(),
            &["sync", "--app-path", "app", "--target", "out", "--dry-run"],
        );
        let stdout = output_to_string(&output);

        assert!(output.status.success(), "{}", stderr_to_string(&output));
        assert!(stdout.contains("1 synced, 1 skipped"));
        assert!(stdout.contains("(dry run)"));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_sync_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("app/src/services/config/types");
        std::fs::create_dir_all(&source).unwrap();
        std::fs::write(
            source.join("AppTypes.ts"),
            "export interface App { name: string; }\n",
        )
        .unwrap();

        let output = run_in(dir.path(), &["sync", "--app-path", "app", "--target", "out"]);
        assert!(output.status.success(), "{}", stderr_to_string(&output));

        let written = std::fs::read_to_string(dir.path().join("out/config/AppTypes.ts")).unwrap();
        assert!(written.starts_with("// This file is auto-generated from AppTypes.ts"));
    }
}

mod config_command_tests {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let output = run_plugin_types(&["config", "show"]);
        assert!(output.status.success());

        let settings: Value = serde_json::from_str(&output_to_string(&output)).unwrap();
        assert_eq!(settings["sync"]["target_dir"], json!("src"));
    }

    #[test]
    fn test_config_reads_local_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("plugin-types.toml"),
            "[sync]\ntarget_dir = \"generated\"\n",
        )
        .unwrap();

        let output = run_in(dir.path(), &["config", "show"]);
        let settings: Value = serde_json::from_str(&output_to_string(&output)).unwrap();
        assert_eq!(settings["sync"]["target_dir"], json!("generated"));
    }

    #[test]
    fn test_config_get_from_host_directory() {
        let dir = tempfile::tempdir().unwrap();
        write_json(
            &dir,
            "machine.json",
            &json!({ "connection": { "port": "/dev/ttyUSB0", "baudRate": 115200 } }),
        );
        let config_dir = dir.path().display().to_string();

        let output = run_in(
            dir.path(),
            &["config", "get", "machine.connection.baudRate", "--dir", &config_dir],
        );
        assert!(output.status.success(), "{}", stderr_to_string(&output));
        assert_eq!(output_to_string(&output).trim(), "115200");

        let missing = run_in(dir.path(), &["config", "get", "ui.theme", "--dir", &config_dir]);
        assert!(!missing.status.success());
    }
}
