use serde::{Deserialize, Serialize};

/// Tenant grouping that bounds which networks are visible at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
    #[serde(default)]
    pub network_ids: Vec<String>,
}

impl Organization {
    pub fn new(name: impl Into<String>, network_ids: &[&str]) -> Self {
        Self {
            name: name.into(),
            network_ids: network_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}
