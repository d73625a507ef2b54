//! Provider configuration loading and validation

use assetguard_core::NodePath;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::error::{AuthzError, Result};

/// Complete configuration file
///
/// ```toml
/// [provider]
/// asset_mount = "/content/dam"
/// ownership_region = "/content/dam/poc"
///
/// [authorization]
/// mode = "publish"
/// admin_user_ids = "admin,replication-service"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AssetGuardConfig {
    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub authorization: AuthorizationConfig,
}

impl AssetGuardConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.as_ref().display(), "Loaded asset authorization configuration");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AssetGuardConfig = toml::from_str(contents)?;
        config.provider.validate()?;
        Ok(config)
    }
}

/// Settings of the asset permission provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Root of the subtree this provider renders opinions for
    #[serde(default = "default_asset_mount")]
    pub asset_mount: NodePath,

    /// Sub-region of the mount where ownership can be granted
    #[serde(default = "default_ownership_region")]
    pub ownership_region: NodePath,

    /// Property holding a node's resource kind
    #[serde(default = "default_resource_kind_property")]
    pub resource_kind_property: String,

    /// Resource kind that marks a node as an asset
    #[serde(default = "default_asset_kind")]
    pub asset_kind: String,

    /// Segment under which an asset keeps its renditions and metadata
    #[serde(default = "default_content_marker")]
    pub content_marker: String,

    /// Name of the metadata node below the content node
    #[serde(default = "default_metadata_folder")]
    pub metadata_folder: String,

    /// Privileges reported for owners
    #[serde(default = "default_owner_privileges")]
    pub owner_privileges: Vec<String>,

    #[serde(default)]
    pub classification: ClassificationConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            asset_mount: default_asset_mount(),
            ownership_region: default_ownership_region(),
            resource_kind_property: default_resource_kind_property(),
            asset_kind: default_asset_kind(),
            content_marker: default_content_marker(),
            metadata_folder: default_metadata_folder(),
            owner_privileges: default_owner_privileges(),
            classification: ClassificationConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// Default settings for a different mount and ownership region
    pub fn for_mount(asset_mount: &str, ownership_region: &str) -> Result<Self> {
        let config = Self {
            asset_mount: NodePath::parse(asset_mount)?,
            ownership_region: NodePath::parse(ownership_region)?,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.asset_mount.is_root() {
            return Err(AuthzError::InvalidConfig(
                "asset_mount must not be the store root".to_string(),
            ));
        }

        if !self.ownership_region.is_same_or_descendant_of(&self.asset_mount) {
            return Err(AuthzError::InvalidConfig(format!(
                "ownership_region '{}' must lie within asset_mount '{}'",
                self.ownership_region, self.asset_mount
            )));
        }

        for (field, value) in [
            ("resource_kind_property", &self.resource_kind_property),
            ("asset_kind", &self.asset_kind),
            ("content_marker", &self.content_marker),
            ("metadata_folder", &self.metadata_folder),
        ] {
            if value.trim().is_empty() {
                return Err(AuthzError::InvalidConfig(format!("{} cannot be empty", field)));
            }
        }

        if self.owner_privileges.is_empty() {
            return Err(AuthzError::InvalidConfig(
                "owner_privileges must name at least one privilege".to_string(),
            ));
        }

        Ok(())
    }

    /// Owner privilege names as a set
    pub fn owner_privilege_set(&self) -> BTreeSet<String> {
        self.owner_privileges.iter().cloned().collect()
    }
}

/// Structural markers that take a node out of ordinary content
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassificationConfig {
    /// Node names that start an internal subtree
    #[serde(default = "default_internal_names")]
    pub internal_names: Vec<String>,

    /// Node names that hold access control policies
    #[serde(default = "default_policy_names")]
    pub policy_names: Vec<String>,

    /// Resource kinds of access control nodes
    #[serde(default = "default_access_control_kinds")]
    pub access_control_kinds: Vec<String>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            internal_names: default_internal_names(),
            policy_names: default_policy_names(),
            access_control_kinds: default_access_control_kinds(),
        }
    }
}

/// Operational mode of the deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Authoring environment; the asset provider is not wired in
    #[default]
    Author,
    /// Delivery environment; the asset provider decides reads under the mount
    Publish,
}

/// Provider selection settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthorizationConfig {
    #[serde(default)]
    pub mode: DeploymentMode,

    /// Comma-separated principal names that bypass the provider
    #[serde(default)]
    pub admin_user_ids: String,
}

impl AuthorizationConfig {
    /// Parsed bypass list; blanks are dropped and names trimmed
    pub fn admin_ids(&self) -> BTreeSet<String> {
        parse_id_list(&self.admin_user_ids)
    }
}

/// Splits a comma-separated list into trimmed, non-empty names
pub fn parse_id_list(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_asset_mount() -> NodePath {
    NodePath::parse("/content/dam").unwrap_or_else(|_| NodePath::root())
}

fn default_ownership_region() -> NodePath {
    NodePath::parse("/content/dam/poc").unwrap_or_else(|_| NodePath::root())
}

fn default_resource_kind_property() -> String {
    "jcr:primaryType".to_string()
}

fn default_asset_kind() -> String {
    "dam:Asset".to_string()
}

fn default_content_marker() -> String {
    "jcr:content".to_string()
}

fn default_metadata_folder() -> String {
    "metadata".to_string()
}

fn default_owner_privileges() -> Vec<String> {
    vec![crate::permissions::privileges::JCR_READ.to_string()]
}

fn default_internal_names() -> Vec<String> {
    vec!["jcr:system".to_string()]
}

fn default_policy_names() -> Vec<String> {
    vec!["rep:policy".to_string(), "rep:repoPolicy".to_string()]
}

fn default_access_control_kinds() -> Vec<String> {
    vec![
        "rep:ACL".to_string(),
        "rep:GrantACE".to_string(),
        "rep:DenyACE".to_string(),
        "rep:Restrictions".to_string(),
    ]
}
