use std::{
    path::PathBuf,
    sync::{Arc, LazyLock},
};

use session_guard::{
    get_configuration_from, telemetry, Configuration, Environment, SessionTracker,
    SessionValidator,
};
use session_shape::{
    id::{SessionId, UserId},
    session::{Session, SessionUser},
    uac::UserRole,
};
use uuid::Uuid;

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let settings = load_configuration(Environment::Local).telemetry;
    if std::env::var("TEST_LOG").is_ok() {
        let log_file_name = format!("validation_tests{}", Uuid::new_v4());
        let (file, path) = telemetry::create_trace_file(&log_file_name).unwrap();
        let subscriber = telemetry::subscriber_from_settings(&settings, file);
        telemetry::init_subscriber(subscriber).unwrap();
        format!("Traces for tests being written to: {path:?}")
    } else {
        let subscriber = telemetry::subscriber_from_settings(&settings, std::io::sink);
        telemetry::init_subscriber(subscriber).unwrap();
        "Traces set to std::io::sink".to_string()
    }
});

fn load_configuration(environment: Environment) -> Configuration {
    let configuration_directory = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configuration");
    get_configuration_from(&configuration_directory, environment)
        .expect("failed to load the shipped configuration")
}

pub struct TestApp {
    pub configuration: Configuration,
    pub tracker: Arc<SessionTracker>,
    pub validator: SessionValidator<Arc<SessionTracker>>,
}

pub fn spawn_app(environment: Environment) -> TestApp {
    LazyLock::force(&TRACING);
    let configuration = load_configuration(environment);
    let tracker = Arc::new(SessionTracker::new(
        configuration.tracker.record_lifetime(),
    ));
    let validator = SessionValidator::new(configuration.session.clone(), Arc::clone(&tracker));
    TestApp {
        configuration,
        tracker,
        validator,
    }
}

impl TestApp {
    /// Tracks a fresh session for `user_id` and returns the session a client
    /// would present for it
    pub fn login(&self, user_id: &str, role: UserRole) -> Session {
        let user_id: UserId = user_id.try_into().unwrap();
        let session_id = SessionId::new_rand();
        self.tracker.track(session_id.clone(), user_id.clone());
        let mut user = SessionUser::new(user_id, role);
        user.session_id = Some(session_id);
        Session::new(user)
    }
}
