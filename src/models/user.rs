use serde::{Deserialize, Serialize};

/// A registered forum user, keyed by nickname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub nickname: String,
    pub fullname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub email: String,
}

/// Body of a user-creation request; the nickname comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub fullname: String,
    #[serde(default)]
    pub about: Option<String>,
    pub email: String,
}

impl UserCreate {
    pub fn into_user(self, nickname: String) -> User {
        User {
            nickname,
            fullname: self.fullname,
            about: self.about,
            email: self.email,
        }
    }
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserUpdate {
    /// True when the update carries no fields to apply.
    pub fn is_empty(&self) -> bool {
        self.fullname.is_none() && self.about.is_none() && self.email.is_none()
    }
}
