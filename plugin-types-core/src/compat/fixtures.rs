//! Manifests and records of plugins already published, used as compatibility baselines.

use serde_json::{json, Value};

/// Registry manifests of the plugins shipped so far.
pub fn existing_plugins() -> Vec<Value> {
    vec![
        json!({
            "id": "quick-settings",
            "name": "Quick Settings",
            "version": "1.0.0",
            "description": "Quick Settings plugin for CNC Controls application",
            "author": "Your Name",
            "license": "MIT",
            "keywords": ["modal", "cnc", "control"],
            "category": "utility",
            "placement": "modal",
            "screen": "main",
            "priority": 50,
            "autoStart": false,
            "permissions": ["machine.read"],
            "compatibility": { "minAppVersion": "1.0.0", "maxAppVersion": "2.0.0" },
            "dependencies": { "react": "^18.0.0", "antd": "^5.0.0" },
            "size": { "width": "auto", "height": "auto" }
        }),
        json!({
            "id": "gcode-snippets",
            "name": "G-Code Snippets",
            "version": "1.1.0",
            "description": "Quick access to common G-code commands and snippets with customizable library and one-click insertion",
            "author": "CNC Controls Team",
            "license": "MIT",
            "homepage": "https://github.com/whttlr/gcode-snippets-plugin",
            "repository": {
                "type": "git",
                "url": "https://github.com/whttlr/gcode-snippets-plugin.git"
            },
            "keywords": ["gcode", "snippets", "productivity", "commands"],
            "category": "utility",
            "placement": "standalone",
            "screen": "new",
            "menuTitle": "G-Code Snippets",
            "menuIcon": "CodeOutlined",
            "routePath": "/gcode-snippets",
            "size": { "width": "auto", "height": "auto" },
            "priority": 10,
            "autoStart": false,
            "permissions": ["files.read", "files.write", "machine.write"],
            "compatibility": { "minAppVersion": "1.0.0", "maxAppVersion": "2.0.0" },
            "dependencies": { "react": "^18.0.0", "antd": "^5.0.0", "monaco-editor": "^0.43.0" },
            "screenshots": [
                "https://raw.githubusercontent.com/whttlr/gcode-snippets-plugin/main/screenshots/main-view.png",
                "https://raw.githubusercontent.com/whttlr/gcode-snippets-plugin/main/screenshots/editor.png"
            ],
            "changelog": "https://raw.githubusercontent.com/whttlr/gcode-snippets-plugin/main/CHANGELOG.md"
        }),
        json!({
            "id": "machine-monitor",
            "name": "Machine Monitor",
            "version": "1.0.0",
            "description": "Real-time machine status monitoring with comprehensive dashboard displaying position, speed, and connectivity status",
            "author": "CNC Controls Team",
            "license": "MIT",
            "homepage": "https://github.com/whttlr/machine-monitor-plugin",
            "repository": {
                "type": "git",
                "url": "https://github.com/whttlr/machine-monitor-plugin.git"
            },
            "keywords": ["monitoring", "dashboard", "real-time", "status"],
            "category": "monitoring",
            "placement": "dashboard",
            "screen": "main",
            "size": { "width": 400, "height": 300 },
            "priority": 1,
            "autoStart": true,
            "permissions": ["machine.read", "status.read"],
            "compatibility": { "minAppVersion": "1.0.0", "maxAppVersion": "2.0.0" },
            "dependencies": { "react": "^18.0.0", "antd": "^5.0.0" },
            "screenshots": [
                "https://raw.githubusercontent.com/whttlr/machine-monitor-plugin/main/screenshots/dashboard.png"
            ],
            "changelog": "https://raw.githubusercontent.com/whttlr/machine-monitor-plugin/main/CHANGELOG.md"
        }),
        json!({
            "id": "tool-library",
            "name": "Tool Library",
            "version": "1.0.0",
            "description": "Comprehensive tool management system for organizing CNC tool collection with specifications, usage tracking, and maintenance schedules",
            "author": "CNC Controls Team",
            "license": "MIT",
            "homepage": "https://github.com/whttlr/tool-library-plugin",
            "repository": {
                "type": "git",
                "url": "https://github.com/whttlr/tool-library-plugin.git"
            },
            "keywords": ["tools", "library", "organization", "management", "inventory"],
            "category": "management",
            "placement": "standalone",
            "screen": "new",
            "menuTitle": "Tool Library",
            "menuIcon": "ToolOutlined",
            "routePath": "/tool-library",
            "size": { "width": "auto", "height": "auto" },
            "priority": 20,
            "autoStart": false,
            "permissions": ["config.read", "config.write", "files.read", "files.write"],
            "compatibility": { "minAppVersion": "1.0.0", "maxAppVersion": "2.0.0" },
            "dependencies": { "react": "^18.0.0", "antd": "^5.0.0", "lodash": "^4.17.21" },
            "screenshots": [
                "https://raw.githubusercontent.com/whttlr/tool-library-plugin/main/screenshots/library-view.png",
                "https://raw.githubusercontent.com/whttlr/tool-library-plugin/main/screenshots/tool-details.png"
            ],
            "changelog": "https://raw.githubusercontent.com/whttlr/tool-library-plugin/main/CHANGELOG.md"
        }),
    ]
}

/// Only the required fields.
pub fn minimal_manifest() -> Value {
    json!({
        "id": "minimal-test",
        "name": "Minimal Test",
        "version": "1.0.0",
        "description": "Minimal plugin for testing",
        "author": "Test",
        "placement": "dashboard"
    })
}

/// Every optional field populated.
pub fn full_manifest() -> Value {
    json!({
        "id": "full-test",
        "name": "Full Test Plugin",
        "version": "2.1.0",
        "description": "Full featured plugin for comprehensive testing with all optional fields populated",
        "author": "Test Team",
        "license": "MIT",
        "homepage": "https://example.com",
        "repository": { "type": "git", "url": "https://github.com/test/plugin.git" },
        "keywords": ["test", "example"],
        "category": "utility",
        "placement": "standalone",
        "screen": "main",
        "size": { "width": 800, "height": 600 },
        "priority": 10,
        "autoStart": true,
        "permissions": ["machine.read", "config.read"],
        "menuTitle": "Test Plugin",
        "menuIcon": "TestOutlined",
        "routePath": "/test-plugin",
        "compatibility": { "minAppVersion": "1.0.0", "maxAppVersion": "2.0.0" },
        "dependencies": { "react": "^18.0.0", "antd": "^5.0.0" },
        "screenshots": [
            "https://example.com/screenshot1.png",
            "https://example.com/screenshot2.png"
        ],
        "changelog": "https://example.com/changelog.md"
    })
}

pub fn sample_plugin_record() -> Value {
    json!({
        "id": "test-plugin",
        "pluginId": "test-plugin",
        "name": "Test Plugin",
        "version": "1.0.0",
        "description": "Test plugin description",
        "type": "utility",
        "source": "registry",
        "status": "active",
        "installedAt": "2024-01-15T10:30:00.000Z",
        "updatedAt": "2024-01-15T10:30:00.000Z",
        "updateAvailable": false
    })
}

pub fn sample_plugin_state() -> Value {
    json!({
        "id": "test-state",
        "pluginId": "test-plugin",
        "enabled": true,
        "placement": "dashboard",
        "screen": "main",
        "priority": 50,
        "autoStart": false,
        "createdAt": "2024-01-15T10:30:00.000Z",
        "updatedAt": "2024-01-15T10:30:00.000Z"
    })
}
