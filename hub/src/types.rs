//! Request and result types shared by every [`HubFetcher`](crate::HubFetcher) implementation.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::{HubError, Result};

/// Hub HTTP endpoints used by the fetchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HubEndpoint {
    ValidateMessage,
    LinkById,
    ReactionById,
    VerificationsByFid,
    OnChainIdRegistryEventByFid,
    UserDataByFid,
}

impl HubEndpoint {
    /// Path of the endpoint relative to the hub base URL.
    pub fn path(&self) -> &'static str {
        match self {
            HubEndpoint::ValidateMessage => "/v1/validateMessage",
            HubEndpoint::LinkById => "/v1/linkById",
            HubEndpoint::ReactionById => "/v1/reactionById",
            HubEndpoint::VerificationsByFid => "/v1/verificationsByFid",
            HubEndpoint::OnChainIdRegistryEventByFid => "/v1/onChainIdRegistryEventByFid",
            HubEndpoint::UserDataByFid => "/v1/userDataByFid",
        }
    }
}

impl std::fmt::Display for HubEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkType {
    Follow,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Follow => "follow",
        }
    }
}

/// Reaction kinds, numbered as the hub expects them in `reaction_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionType {
    Like = 1,
    Recast = 2,
}

impl ReactionType {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Profile data a user has published to the hub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
}

impl UserData {
    /// Record one `userDataBody` entry. Unknown types are ignored.
    pub(crate) fn apply(&mut self, kind: &str, value: String) {
        match kind {
            "USER_DATA_TYPE_PFP" => self.profile_image = Some(value),
            "USER_DATA_TYPE_DISPLAY" => self.display_name = Some(value),
            "USER_DATA_TYPE_USERNAME" => self.username = Some(value),
            "USER_DATA_TYPE_BIO" => self.bio = Some(value),
            _ => {}
        }
    }
}

/// Extra options applied to every hub request, e.g. an API key header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HubRequestOptions {
    pub headers: BTreeMap<String, String>,
}

impl HubRequestOptions {
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub(crate) fn header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| HubError::InvalidHeader(format!("{}: {}", name, e)))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| HubError::InvalidHeader(format!("{}: {}", name, e)))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}
