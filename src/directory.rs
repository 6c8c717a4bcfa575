//! Static directory of users and organizations, loaded from a JSON file.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::models::{Organization, Principal};

#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub email: String,
    /// Hex SHA-256 digest of the user's API key
    pub api_key_sha256: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub is_super_user: bool,
    #[serde(default)]
    pub network_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    organizations: Vec<Organization>,
    #[serde(default)]
    users: Vec<UserEntry>,
}

#[derive(Debug, Default)]
pub struct Directory {
    organizations: HashMap<String, Organization>,
    users: Vec<UserEntry>,
}

pub fn hash_api_key(api_key: &str) -> String {
    hex::encode(Sha256::digest(api_key.as_bytes()))
}

impl Directory {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("reading {}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: DirectoryFile = serde_json::from_str(raw)
            .map_err(|e| AppError::Config(format!("invalid directory: {}", e)))?;
        Self::new(file.organizations, file.users)
    }

    pub fn new(organizations: Vec<Organization>, mut users: Vec<UserEntry>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(organizations.len());
        for organization in organizations {
            let name = organization.name.clone();
            if by_name.insert(name.clone(), organization).is_some() {
                return Err(AppError::Config(format!("duplicate organization '{}'", name)));
            }
        }

        let mut digests = HashSet::with_capacity(users.len());
        for user in &mut users {
            user.api_key_sha256 = user.api_key_sha256.trim().to_ascii_lowercase();
            if !digests.insert(user.api_key_sha256.clone()) {
                return Err(AppError::Config(format!(
                    "API key of user {} is already assigned to another user",
                    user.email
                )));
            }
        }

        Ok(Self {
            organizations: by_name,
            users,
        })
    }

    /// Find the user owning `api_key`.
    ///
    /// Every stored digest is compared so lookup time doesn't depend on
    /// where (or whether) the key matches.
    pub fn user_by_api_key(&self, api_key: &str) -> Option<&UserEntry> {
        let digest = hash_api_key(api_key);
        let mut found = None;
        for user in &self.users {
            if bool::from(user.api_key_sha256.as_bytes().ct_eq(digest.as_bytes())) {
                found = Some(user);
            }
        }
        found
    }

    pub fn organization(&self, name: &str) -> Option<&Organization> {
        self.organizations.get(name)
    }

    /// Resolve the organization scope for `user`.
    ///
    /// A user without an organization, or naming one we don't know, is an
    /// error rather than an unscoped request.
    pub fn organization_for(&self, user: &UserEntry) -> Result<Organization> {
        let name = user.organization.as_deref().ok_or_else(|| {
            AppError::Internal(format!("user {} has no organization", user.email))
        })?;
        self.organization(name).cloned().ok_or_else(|| {
            AppError::Internal(format!(
                "organization '{}' for user {} not found",
                name, user.email
            ))
        })
    }
}

impl UserEntry {
    pub fn principal(&self) -> Principal {
        Principal {
            email: self.email.clone(),
            is_super_user: self.is_super_user,
            network_ids: self.network_ids.clone(),
        }
    }
}
