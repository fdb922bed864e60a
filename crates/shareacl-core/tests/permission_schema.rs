//! Serde roundtrip and JsonSchema validation for the permission resource and enums.

use schemars::schema_for;
use serde_json::json;
use shareacl_core::{ApiPermission, Role, ScopeType};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    user_permission,
    ApiPermission,
    ApiPermission {
        id: Some("perm-a3f8b2c1".into()),
        scope_type: Some("user".into()),
        role: Some("writer".into()),
        email_address: Some("a@example.com".into()),
        domain: None,
        with_link: Some(false),
        additional_roles: Some(vec!["commenter".into()]),
        display_name: Some("Alice".into()),
        extra: serde_json::Map::new(),
    }
);

roundtrip_and_validate!(
    anyone_permission,
    ApiPermission,
    ApiPermission {
        id: Some("anyoneWithLink".into()),
        scope_type: Some("anyone".into()),
        role: Some("reader".into()),
        with_link: Some(true),
        ..ApiPermission::default()
    }
);

roundtrip_and_validate!(
    permission_with_unmodelled_fields,
    ApiPermission,
    ApiPermission {
        id: Some("perm-0badf00d".into()),
        scope_type: Some("anyone".into()),
        extra: [("allowFileDiscovery".to_owned(), json!(true))].into_iter().collect(),
        ..ApiPermission::default()
    }
);

roundtrip_and_validate!(empty_permission, ApiPermission, ApiPermission::default());

roundtrip_and_validate!(role_enum, Role, Role::Writer);

roundtrip_and_validate!(scope_type_enum, ScopeType, ScopeType::Group);

#[test]
fn schema_rejects_non_string_role() {
    let schema = serde_json::to_value(schema_for!(ApiPermission)).unwrap();
    let errors = validate_against_schema(&schema, &json!({"role": 3}));
    assert!(!errors.is_empty());
}
