use plugin_types_core::sync::{SyncAction, SyncMapping, SyncOptions, TypeSyncer};
use std::path::Path;
use tempfile::TempDir;

const CONFIG_INDEX: &str = "import { Units } from '../../shared/units';\n\
export interface MachineConfig {\n  name: string;\n  units: Units;\n}\n";

const DATABASE_TYPES: &str = "export type PluginStatus = 'active' | 'inactive';\n\
export function isActive(status: PluginStatus): boolean {\n  return status === 'active';\n}\n";

async fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
    tokio::fs::write(path, content).await.unwrap();
}

async fn fixture_app() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("electron-app");
    write(&app, "src/services/config/types/index.ts", CONFIG_INDEX).await;
    write(
        &app,
        "src/services/config/types/nested/units.ts",
        "export type Units = 'mm' | 'inch';\n",
    )
    .await;
    write(&app, "src/services/config/types/index.test.ts", "test('x', () => {});\n").await;
    write(&app, "src/services/config/types/README.md", "# Types\n").await;
    write(&app, "src/services/database/types.ts", DATABASE_TYPES).await;
    dir
}

mod type_sync_tests {
    use super::*;

    #[tokio::test]
    async fn test_sync_default_mappings() {
        let dir = fixture_app().await;
        let target = dir.path().join("package/src");
        let syncer = TypeSyncer::new(SyncOptions::new(dir.path().join("electron-app"), &target));

        let report = syncer.run().await.unwrap();
        assert_eq!(report.synced, 2);
        assert_eq!(report.skipped, 0);
        assert!(!report.has_errors());
        assert_eq!(report.files.len(), 3);
        assert!(report.files.iter().all(|f| f.action == SyncAction::Transformed));

        let index = tokio::fs::read_to_string(target.join("config/index.ts")).await.unwrap();
        assert!(index.starts_with(
            "// This file is auto-generated from index.ts\n// Do not edit manually - changes will be overwritten\n\n"
        ));
        assert!(index.contains("from './shared/units'"));
        assert!(index.contains("export interface MachineConfig {\n  name: string;"));

        assert!(target.join("config/nested/units.ts").exists());
        assert!(!target.join("config/index.test.ts").exists());
        assert!(!target.join("config/README.md").exists());

        let database = tokio::fs::read_to_string(target.join("database/index.ts")).await.unwrap();
        assert!(database.starts_with("// This file is auto-generated from types.ts\n"));
        assert!(database.contains("export function isActive(status: PluginStatus): boolean;"));
        assert!(!database.contains("return status"));
    }

    #[tokio::test]
    async fn test_resync_does_not_duplicate_header() {
        let dir = fixture_app().await;
        let target = dir.path().join("out");
        let options = SyncOptions::new(dir.path().join("electron-app"), &target);

        TypeSyncer::new(options.clone()).run().await.unwrap();
        let first = tokio::fs::read_to_string(target.join("database/index.ts")).await.unwrap();

        // feed the generated output back in as the source
        write(
            &dir.path().join("electron-app"),
            "src/services/database/types.ts",
            &first,
        )
        .await;
        TypeSyncer::new(options).run().await.unwrap();
        let second = tokio::fs::read_to_string(target.join("database/index.ts")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.matches("auto-generated").count(), 1);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let dir = fixture_app().await;
        let target = dir.path().join("dry");
        let options =
            SyncOptions::new(dir.path().join("electron-app"), &target).with_dry_run(true);

        let report = TypeSyncer::new(options).run().await.unwrap();
        assert!(report.dry_run);
        assert_eq!(report.synced, 2);
        assert_eq!(report.files.len(), 3);
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_missing_mapping_source_is_skipped() {
        let dir = fixture_app().await;
        let target = dir.path().join("out");
        let options = SyncOptions::new(dir.path().join("electron-app"), &target).with_mappings(vec![
            SyncMapping::new("database/", "src/services/database/types.ts"),
            SyncMapping::new("ipc/", "src/services/ipc/types/"),
        ]);

        let report = TypeSyncer::new(options).run().await.unwrap();
        assert_eq!(report.synced, 1);
        assert_eq!(report.skipped, 1);
        assert!(!target.join("ipc").exists());
    }

    #[tokio::test]
    async fn test_non_ts_single_file_is_copied() {
        let dir = fixture_app().await;
        write(
            &dir.path().join("electron-app"),
            "src/schemas/plugin.schema.json",
            "{\"type\":\"object\"}",
        )
        .await;
        let target = dir.path().join("out");
        let options = SyncOptions::new(dir.path().join("electron-app"), &target).with_mappings(vec![
            SyncMapping::new("schemas/plugin.schema.json", "src/schemas/plugin.schema.json"),
        ]);

        let report = TypeSyncer::new(options).run().await.unwrap();
        assert_eq!(report.files[0].action, SyncAction::Copied);
        let copied = tokio::fs::read_to_string(target.join("schemas/plugin.schema.json"))
            .await
            .unwrap();
        assert_eq!(copied, "{\"type\":\"object\"}");
    }

    #[tokio::test]
    async fn test_missing_app_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = TypeSyncer::new(SyncOptions::new(dir.path().join("missing"), dir.path()))
            .run()
            .await
            .unwrap_err();
        assert!(err.is_sync_error());
        assert_eq!(err.error_code(), "E4001");
    }
}
