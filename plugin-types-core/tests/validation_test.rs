use plugin_types_core::validation::{
    resolve_path, validate, Check, FieldRule, RuleSet, RuleSetError, ValidationReport,
    ViolationCode,
};
use serde_json::json;

fn server_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::required("server.host"),
        FieldRule::required("server.port")
            .pattern_with_hint(r"^\d{2,5}$", "must be a port number"),
        FieldRule::optional("server.protocol").one_of(["http", "https"]),
        FieldRule::optional("server.secure").one_of(["true", "false"]),
        FieldRule::optional("docs").url(),
        FieldRule::optional("tags").array_of(Check::pattern("^[a-z]+$")),
    ]
}

mod evaluation_tests {
    use super::*;

    #[test]
    fn test_valid_document_has_no_violations() {
        let candidate = json!({
            "server": { "host": "localhost", "port": 3000, "protocol": "https", "secure": true },
            "docs": "https://example.com/docs",
            "tags": ["cnc", "api"]
        });

        let violations = validate(server_rules(), &candidate).unwrap();
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_reports_every_violation_in_rule_order() {
        let candidate = json!({
            "server": { "port": "abc", "protocol": "ftp" },
            "docs": "not a url",
            "tags": ["ok", "Not Ok", 7]
        });

        let violations = validate(server_rules(), &candidate).unwrap();
        let paths: Vec<&str> = violations.iter().map(|v| v.field_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "server.host",
                "server.port",
                "server.protocol",
                "docs",
                "tags[1]",
                "tags[2]"
            ]
        );

        assert_eq!(violations[0].code, ViolationCode::MissingRequired);
        assert_eq!(violations[1].code, ViolationCode::PatternMismatch);
        assert!(violations[1].message.contains("must be a port number"));
        assert_eq!(violations[2].code, ViolationCode::NotInEnum);
        assert!(violations[2].message.contains("http, https"));
        assert_eq!(violations[3].code, ViolationCode::InvalidUrl);
        assert_eq!(violations[4].code, ViolationCode::NestedFailure);
        assert_eq!(violations[5].code, ViolationCode::NestedFailure);
    }

    #[test]
    fn test_null_counts_as_absent() {
        let candidate = json!({ "server": { "host": null, "port": 8080 }, "docs": null });

        let violations = validate(server_rules(), &candidate).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "server.host");
        assert_eq!(violations[0].code, ViolationCode::MissingRequired);
    }

    #[test]
    fn test_empty_string_counts_as_present() {
        let rules = vec![FieldRule::required("name")];
        assert!(validate(rules, &json!({ "name": "" })).unwrap().is_empty());
    }

    #[test]
    fn test_non_scalar_fails_pattern_check() {
        let rules = vec![FieldRule::required("version").pattern(r"^\d+\.\d+\.\d+$")];
        let violations = validate(rules, &json!({ "version": { "major": 1 } })).unwrap();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, ViolationCode::PatternMismatch);
        assert!(violations[0].message.starts_with("Expected a scalar"));
    }

    #[test]
    fn test_array_of_rejects_non_array() {
        let violations = validate(server_rules(), &json!({
            "server": { "host": "h", "port": 80 },
            "tags": "cnc"
        }))
        .unwrap();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_path, "tags");
        assert_eq!(violations[0].code, ViolationCode::NestedFailure);
    }

    #[test]
    fn test_custom_check_sees_whole_candidate() {
        let rules = vec![FieldRule::optional("limits.max").custom(
            "max must exceed min",
            |candidate, value| {
                let min = candidate["limits"]["min"].as_f64().unwrap_or(f64::MIN);
                value.as_f64().is_some_and(|max| max > min)
            },
        )];
        let set = RuleSet::compile(rules).unwrap();

        assert!(set.is_valid(&json!({ "limits": { "min": 0, "max": 10 } })));
        let violations = set.validate(&json!({ "limits": { "min": 5, "max": 1 } }));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "max must exceed min");
    }

    #[test]
    fn test_rule_set_is_reusable() {
        let set = RuleSet::compile(server_rules()).unwrap();
        assert_eq!(set.len(), 6);
        assert_eq!(
            set.required_paths().collect::<Vec<_>>(),
            vec!["server.host", "server.port"]
        );

        for port in [80, 443, 8080] {
            assert!(set.is_valid(&json!({ "server": { "host": "h", "port": port } })));
        }
        assert!(!set.is_valid(&json!({})));
    }

    #[test]
    fn test_repeated_validation_is_identical() {
        let candidate = json!({
            "server": { "port": "abc", "protocol": "ftp" },
            "docs": "not a url",
            "tags": ["Bad", "ok", "Also Bad"]
        });
        let before = candidate.clone();

        let set = RuleSet::compile(server_rules()).unwrap();
        let first = set.validate(&candidate);
        let second = set.validate(&candidate);
        let fresh = validate(server_rules(), &candidate).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, fresh);
        assert_eq!(candidate, before);

        let array_paths: Vec<&str> = first
            .iter()
            .filter(|v| v.code == ViolationCode::NestedFailure)
            .map(|v| v.field_path.as_str())
            .collect();
        assert_eq!(array_paths, vec!["tags[0]", "tags[2]"]);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_resolve_path() {
        let doc = json!({ "a": { "b": { "c": 1 } }, "list": [1, 2] });
        assert_eq!(resolve_path(&doc, "a.b.c"), Some(&json!(1)));
        assert_eq!(resolve_path(&doc, "a.x"), None);
        assert_eq!(resolve_path(&doc, "list.0"), None);
    }

    #[test]
    fn test_validation_report() {
        let violations = validate(server_rules(), &json!({})).unwrap();
        let report = ValidationReport::new("server.json", violations);

        assert!(!report.is_valid());
        assert_eq!(report.count(ViolationCode::MissingRequired), 2);
    }
}

mod compile_error_tests {
    use super::*;

    #[test]
    fn test_empty_field_path() {
        let err = RuleSet::compile(vec![FieldRule::required("id"), FieldRule::required("")])
            .unwrap_err();
        assert!(matches!(err, RuleSetError::EmptyFieldPath { index: 1 }));
    }

    #[test]
    fn test_empty_path_segment() {
        let err = RuleSet::compile(vec![FieldRule::optional("a..b")]).unwrap_err();
        assert!(matches!(err, RuleSetError::EmptyPathSegment { .. }));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = RuleSet::compile(vec![FieldRule::optional("id").pattern("([a-z")]).unwrap_err();
        assert!(matches!(err, RuleSetError::InvalidPattern { ref path, .. } if path == "id"));
    }

    #[test]
    fn test_empty_allowed_set() {
        let rules = vec![FieldRule::optional("kind").with_check(Check::OneOf(vec![]))];
        let err = RuleSet::compile(rules).unwrap_err();
        assert!(matches!(err, RuleSetError::EmptyAllowedSet { .. }));
    }

    #[test]
    fn test_array_without_nested_check() {
        let err = validate(
            vec![FieldRule::optional("tags").with_check(Check::ArrayOf(None))],
            &json!({ "tags": [] }),
        )
        .unwrap_err();
        assert!(matches!(err, RuleSetError::MissingNestedCheck { .. }));
    }
}
