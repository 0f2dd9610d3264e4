use serde::{Deserialize, Serialize};

/// Requirement name whose value carries the application's bundle identifier.
pub const BUNDLE_ID_REQUIREMENT: &str = "Application Bundle ID";

// ── Titles ──

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Title {
    pub title_name: Option<String>,
    pub title_display_name: Option<String>,
    pub title_description: Option<String>,
    pub title_version: Option<String>,
    pub minimum_os: Option<String>,
    pub maximum_os: Option<String>,
    pub icon_hires: Option<String>,
    pub extension_attribute: Option<String>,
    pub content_filter_profile: Option<String>,
    pub kernel_extension_profile: Option<String>,
    pub managed_login_items_profile: Option<String>,
    pub notifications_profile: Option<String>,
    pub pppcp_profile: Option<String>,
    pub screen_recording_profile: Option<String>,
    pub system_extension_profile: Option<String>,
    #[serde(default)]
    pub patch_definition: Option<PatchDefinition>,
}

impl Title {
    pub fn name(&self) -> Option<&str> {
        self.title_name.as_deref()
    }

    pub fn requirements(&self) -> &[Requirement] {
        self.patch_definition
            .as_ref()
            .and_then(|p| p.requirements.as_deref())
            .unwrap_or_default()
    }
}

// ── Patch definitions ──

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PatchDefinition {
    #[serde(default)]
    pub requirements: Option<Vec<Requirement>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Requirement {
    pub name: Option<String>,
    pub value: Option<String>,
}
