//! Chat messages sent to a completion provider.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A message in a completion request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelMessage {
    pub role: Role,
    pub content: String,
}

impl ModelMessage {
    /// Create a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_carry_system_and_user_roles() {
        let value = serde_json::to_value(ModelMessage::system("be brief")).unwrap();

        assert_eq!(value, serde_json::json!({"role": "system", "content": "be brief"}));
        assert_eq!(Role::User.to_string(), "user");
        assert!(serde_json::from_str::<Role>("\"assistant\"").is_err());
    }
}
