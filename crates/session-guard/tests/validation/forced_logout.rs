use chrono::{TimeDelta, Utc};
use session_guard::{Environment, SessionRegistry as _, SessionRejection};
use session_shape::{token::Token, uac::UserRole};

use crate::helpers::spawn_app;

#[test]
fn logged_in_session_is_valid() {
    // Arrange
    let app = spawn_app(Environment::Production);
    let session = app.login("alice", UserRole::Admin);

    // Act
    let outcome = app.validator.validate_session(&session);

    // Assert
    assert!(outcome.is_ok(), "{outcome:?}");
}

#[test]
fn forcing_logout_of_a_user_invalidates_every_session_and_token() {
    // Arrange
    let app = spawn_app(Environment::Production);
    let laptop = app.login("bob", UserRole::User);
    let phone = app.login("bob", UserRole::User);
    let other = app.login("carol", UserRole::User);
    let phone_token = Token::from(&phone);

    // Act
    let marked = app.tracker.force_logout_user(&laptop.user.id);

    // Assert
    assert_eq!(marked, 2);
    for session in [&laptop, &phone] {
        let outcome = app.validator.validate_session(session).unwrap_err();
        assert!(outcome.is_forced_logout(), "{outcome:?}");
    }
    let outcome = app.validator.validate_token(&phone_token).unwrap_err();
    assert!(outcome.is_forced_logout(), "{outcome:?}");
    assert!(app.validator.validate_session(&other).is_ok());
}

#[test]
fn re_login_on_a_forced_out_session_stays_invalid() {
    // Arrange
    let app = spawn_app(Environment::Production);
    let session = app.login("gina", UserRole::User);
    let session_id = session.session_id().cloned().unwrap();
    assert!(app.tracker.force_logout_session(&session_id));

    // Act
    app.tracker.track(session_id, session.user.id.clone());

    // Assert
    let outcome = app.validator.validate_session(&session).unwrap_err();
    assert!(outcome.is_forced_logout(), "{outcome:?}");
}

#[test]
fn forced_logout_flag_beats_a_future_expiry() {
    let app = spawn_app(Environment::Production);
    let session = app
        .login("dave", UserRole::Moderator)
        .with_expires(Utc::now() + TimeDelta::days(365))
        .with_force_logout(true);

    let outcome = app.validator.validate_session(&session).unwrap_err();

    assert!(outcome.is_forced_logout(), "{outcome:?}");
}

#[test]
fn revoked_session_is_unknown() {
    let app = spawn_app(Environment::Production);
    let session = app.login("erin", UserRole::User);
    let session_id = session.session_id().cloned().unwrap();

    assert!(app.tracker.revoke(&session_id));

    assert!(!app.validator.registry().is_tracked(&session_id));
    let outcome = app.validator.validate_session(&session).unwrap_err();
    assert!(
        matches!(outcome, SessionRejection::UnknownSession(_)),
        "{outcome:?}"
    );
}

#[test]
fn production_requires_a_session_id() {
    let app = spawn_app(Environment::Production);
    assert!(app.configuration.session.require_session_id);
    let mut session = app.login("frank", UserRole::User);
    session.user.session_id = None;

    let outcome = app.validator.validate_session(&session).unwrap_err();

    assert!(
        matches!(outcome, SessionRejection::MissingSessionId),
        "{outcome:?}"
    );
}
