use rstest::rstest;
use session_guard::Environment;

use crate::helpers::spawn_app;

#[rstest]
#[case::missing_user_id(r#"{ "user": { "role": "admin" } }"#)]
#[case::missing_user_role(r#"{ "user": { "id": "u1" } }"#)]
#[case::role_outside_set(r#"{ "user": { "id": "u1", "role": "owner" } }"#)]
#[case::empty_session_id(r#"{ "user": { "id": "u1", "role": "user", "sessionId": "" } }"#)]
#[case::not_json("user=u1")]
fn malformed_sessions_rejected(#[case] raw: &str) {
    // Arrange
    let app = spawn_app(Environment::Local);

    // Act
    let outcome = app.validator.validate_raw_session(raw).unwrap_err();

    // Assert
    assert!(outcome.is_malformed(), "{outcome:?}");
}

#[test]
fn local_accepts_session_without_session_id() {
    let app = spawn_app(Environment::Local);

    let session = app
        .validator
        .validate_raw_session(r#"{ "user": { "id": "u1", "role": "admin" }, "forceLogout": false }"#)
        .unwrap();

    assert_eq!(session.user.id.as_ref(), "u1");
    assert_eq!(session.force_logout, Some(false));
}
