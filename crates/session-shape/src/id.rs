use std::fmt::Display;

use crate::{errors::ConversionError, random_string_def_len};

/// Identifies a user, constrained to be a non-empty string
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

/// Identifies a tracked session, constrained to be a non-empty string
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl UserId {
    pub const MAX_LENGTH: usize = 128;
}

impl SessionId {
    pub const MAX_LENGTH: usize = 128;

    pub fn new_rand() -> Self {
        Self(random_string_def_len())
    }
}

fn check_length(value: &str, max: usize) -> Result<(), ConversionError> {
    if value.is_empty() {
        return Err(ConversionError::Empty);
    }
    if value.len() > max {
        return Err(ConversionError::MaxExceeded {
            max,
            actual: value.len(),
        });
    }
    Ok(())
}

impl TryFrom<String> for UserId {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check_length(&value, Self::MAX_LENGTH)?;
        Ok(Self(value))
    }
}

impl TryFrom<&str> for UserId {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl TryFrom<String> for SessionId {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        check_length(&value, Self::MAX_LENGTH)?;
        Ok(Self(value))
    }
}

impl TryFrom<&str> for SessionId {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl From<SessionId> for String {
    fn from(value: SessionId) -> Self {
        value.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("a".repeat(129), ConversionError::MaxExceeded{max:128, actual:129})]
    fn illegal_user_id(#[case] value: String, #[case] expect: ConversionError) {
        // Act
        let actual: Result<UserId, ConversionError> = value.try_into();

        // Assert
        assert_eq!(actual.unwrap_err(), expect);
    }

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("a".repeat(129), ConversionError::MaxExceeded{max:128, actual:129})]
    fn illegal_session_id(#[case] value: String, #[case] expect: ConversionError) {
        // Act
        let actual: Result<SessionId, ConversionError> = value.try_into();

        // Assert
        assert_eq!(actual.unwrap_err(), expect);
    }

    #[test]
    fn empty_session_id_does_not_deserialize() {
        let actual: Result<SessionId, _> = serde_json::from_str(r#""""#);
        assert!(actual.is_err());
    }

    #[test]
    fn random_session_ids_are_valid_and_distinct() {
        let first = SessionId::new_rand();
        let second = SessionId::new_rand();
        assert!(!first.as_ref().is_empty());
        assert_ne!(first, second);
        assert!(SessionId::try_from(first.to_string()).is_ok());
    }
}
