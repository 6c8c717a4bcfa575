use serde::{Deserialize, Serialize};

/// The authenticated caller of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub email: String,
    #[serde(default)]
    pub is_super_user: bool,
    /// Networks this account is individually entitled to.
    #[serde(default)]
    pub network_ids: Vec<String>,
}

impl Principal {
    pub fn new(email: impl Into<String>, is_super_user: bool, network_ids: &[&str]) -> Self {
        Self {
            email: email.into(),
            is_super_user,
            network_ids: network_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}
