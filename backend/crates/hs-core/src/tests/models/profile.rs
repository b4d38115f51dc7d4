use crate::{Profile, ProfileLookup, Role};

fn profile() -> Profile {
    Profile::new(
        "uid-1".to_string(),
        "ada@example.com".to_string(),
        "Ada Lovelace".to_string(),
        Role::Patient,
    )
}

#[test]
fn given_complete_profile_when_validated_then_ok() {
    assert!(profile().validate().is_ok());
}

#[test]
fn given_blank_name_when_validated_then_error_mentions_full_name() {
    let mut p = profile();
    p.full_name = "   ".to_string();

    let err = p.validate().unwrap_err();

    assert!(err.to_string().contains("full_name"));
}

#[test]
fn given_email_without_at_when_validated_then_error() {
    let mut p = profile();
    p.email = "not-an-email".to_string();

    assert!(p.validate().is_err());
}

#[test]
fn given_lookup_variants_when_into_profile_then_only_found_yields_profile() {
    let p = profile();

    assert_eq!(ProfileLookup::Found(p.clone()).into_profile(), Some(p));
    assert!(ProfileLookup::NotFound.into_profile().is_none());
    assert!(ProfileLookup::RoleMissing.into_profile().is_none());
}

#[test]
fn given_profile_json_without_avatar_when_deserialized_then_avatar_is_none() {
    let json = r#"{
        "id": "uid-9",
        "email": "doc@example.com",
        "full_name": "Dr Who",
        "role": "doctor",
        "avatar_url": null,
        "created_at": "2024-01-01T00:00:00Z"
    }"#;

    let p: Profile = serde_json::from_str(json).unwrap();

    assert_eq!(p.role, Role::Doctor);
    assert!(p.avatar_url.is_none());
}
