use serde::Serialize;
use thiserror::Error;

use crate::api::models::{Requirement, Title, BUNDLE_ID_REQUIREMENT};
use crate::icon::{self, IconError};

/// Output-facing copy of a [`Title`] with the derived fields filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TitleState {
    pub title_name: Option<String>,
    pub title_display_name: Option<String>,
    pub title_description: Option<String>,
    pub title_version: Option<String>,
    pub minimum_os: Option<String>,
    pub maximum_os: Option<String>,
    pub icon_base64: Option<String>,
    pub uninstall_icon_base64: Option<String>,
    pub extension_attribute: Option<String>,
    pub content_filter_profile: Option<String>,
    pub kernel_extension_profile: Option<String>,
    pub managed_login_items_profile: Option<String>,
    pub notifications_profile: Option<String>,
    pub pppcp_profile: Option<String>,
    pub screen_recording_profile: Option<String>,
    pub system_extension_profile: Option<String>,
    pub app_bundle_id: Option<String>,
}

#[derive(Debug, Error)]
#[error("Could not process icon for title '{title}': {source}")]
pub struct TitleError {
    pub title: String,
    #[source]
    pub source: IconError,
}

/// Finds the bundle identifier among a title's patch requirements.
pub fn extract_bundle_id(requirements: &[Requirement]) -> Option<String> {
    requirements
        .iter()
        .find(|r| r.name.as_deref() == Some(BUNDLE_ID_REQUIREMENT))
        .and_then(|r| r.value.clone())
}

impl TitleState {
    pub fn from_title(title: &Title) -> Result<Self, TitleError> {
        let uninstall_icon_base64 = title
            .icon_hires
            .as_deref()
            .map(icon::composite_uninstall_icon)
            .transpose()
            .map_err(|source| TitleError {
                title: title.name().unwrap_or("unnamed").to_string(),
                source,
            })?;

        Ok(Self {
            title_name: title.title_name.clone(),
            title_display_name: title.title_display_name.clone(),
            title_description: title.title_description.clone(),
            title_version: title.title_version.clone(),
            minimum_os: title.minimum_os.clone(),
            maximum_os: title.maximum_os.clone(),
            icon_base64: title.icon_hires.clone(),
            uninstall_icon_base64,
            extension_attribute: title.extension_attribute.clone(),
            content_filter_profile: title.content_filter_profile.clone(),
            kernel_extension_profile: title.kernel_extension_profile.clone(),
            managed_login_items_profile: title.managed_login_items_profile.clone(),
            notifications_profile: title.notifications_profile.clone(),
            pppcp_profile: title.pppcp_profile.clone(),
            screen_recording_profile: title.screen_recording_profile.clone(),
            system_extension_profile: title.system_extension_profile.clone(),
            app_bundle_id: extract_bundle_id(title.requirements()),
        })
    }
}

/// Builds output states in source order, stopping at the first icon that fails.
pub fn build_title_states(titles: &[Title]) -> Result<Vec<TitleState>, TitleError> {
    titles.iter().map(TitleState::from_title).collect()
}
