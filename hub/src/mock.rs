//! Mock hub client for testing and local development.
//!
//! The `MockHubClient` answers from a [`MockHubData`] snapshot and records
//! every endpoint it was asked about, allowing tests to run without network
//! access and to assert which lookups happened.
//!
//! # Example
//!
//! ```ignore
//! use hub::{HubFetcher, LinkType, MockHubClient, MockHubData};
//!
//! let client = MockHubClient::with_data(
//!     MockHubData::default().with_valid(true).with_follow(2, 3),
//! );
//! assert!(client.link_exists(2, 3, LinkType::Follow).await?);
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{HubEndpoint, HubError, HubFetcher, LinkType, ReactionType, Result, UserData};

/// Hub state served by a [`MockHubClient`].
#[derive(Debug, Clone, Default)]
pub struct MockHubData {
    /// Result of every `validate_message` call.
    pub valid: bool,
    /// `(fid, target_fid)` follow links.
    pub follows: HashSet<(u64, u64)>,
    /// `(fid, reaction_type, target_fid, target_hash)` reactions.
    pub reactions: HashSet<(u64, ReactionType, u64, String)>,
    pub verified_addresses: HashMap<u64, String>,
    pub custody_addresses: HashMap<u64, String>,
    pub user_data: HashMap<u64, UserData>,
    /// Endpoints that fail with a network error.
    pub failing: HashSet<HubEndpoint>,
}

impl MockHubData {
    pub fn with_valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    pub fn with_follow(mut self, fid: u64, target_fid: u64) -> Self {
        self.follows.insert((fid, target_fid));
        self
    }

    pub fn with_reaction(
        mut self,
        fid: u64,
        reaction_type: ReactionType,
        target_fid: u64,
        target_hash: impl Into<String>,
    ) -> Self {
        self.reactions
            .insert((fid, reaction_type, target_fid, target_hash.into()));
        self
    }

    pub fn with_verified_address(mut self, fid: u64, address: impl Into<String>) -> Self {
        self.verified_addresses.insert(fid, address.into());
        self
    }

    pub fn with_custody_address(mut self, fid: u64, address: impl Into<String>) -> Self {
        self.custody_addresses.insert(fid, address.into());
        self
    }

    pub fn with_user_data(mut self, fid: u64, user_data: UserData) -> Self {
        self.user_data.insert(fid, user_data);
        self
    }

    pub fn with_failing(mut self, endpoint: HubEndpoint) -> Self {
        self.failing.insert(endpoint);
        self
    }
}

/// Mock hub client that answers from pre-configured state.
///
/// Use this for testing and local development without network access.
pub struct MockHubClient {
    data: MockHubData,
    calls: Mutex<Vec<HubEndpoint>>,
}

impl MockHubClient {
    /// Create a mock hub with no links, reactions or profiles, rejecting every message.
    pub fn new() -> Self {
        Self::with_data(MockHubData::default())
    }

    pub fn with_data(data: MockHubData) -> Self {
        Self {
            data,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Endpoints queried so far, in call order.
    pub fn calls(&self) -> Vec<HubEndpoint> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times `endpoint` was queried.
    pub fn call_count(&self, endpoint: HubEndpoint) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == endpoint)
            .count()
    }

    fn record(&self, endpoint: HubEndpoint) -> Result<()> {
        self.calls.lock().unwrap().push(endpoint);
        if self.data.failing.contains(&endpoint) {
            return Err(HubError::NetworkError(format!(
                "mock failure for {}",
                endpoint
            )));
        }
        Ok(())
    }
}

impl Default for MockHubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HubFetcher for MockHubClient {
    async fn validate_message(&self, _message_bytes: &[u8]) -> Result<bool> {
        self.record(HubEndpoint::ValidateMessage)?;
        Ok(self.data.valid)
    }

    async fn link_exists(&self, fid: u64, target_fid: u64, link_type: LinkType) -> Result<bool> {
        self.record(HubEndpoint::LinkById)?;
        match link_type {
            LinkType::Follow => Ok(self.data.follows.contains(&(fid, target_fid))),
        }
    }

    async fn reaction_exists(
        &self,
        fid: u64,
        reaction_type: ReactionType,
        target_fid: u64,
        target_hash: &str,
    ) -> Result<bool> {
        self.record(HubEndpoint::ReactionById)?;
        Ok(self.data.reactions.contains(&(
            fid,
            reaction_type,
            target_fid,
            target_hash.to_string(),
        )))
    }

    async fn verified_address(&self, fid: u64) -> Result<Option<String>> {
        self.record(HubEndpoint::VerificationsByFid)?;
        Ok(self.data.verified_addresses.get(&fid).cloned())
    }

    async fn custody_address(&self, fid: u64) -> Result<Option<String>> {
        self.record(HubEndpoint::OnChainIdRegistryEventByFid)?;
        Ok(self.data.custody_addresses.get(&fid).cloned())
    }

    async fn user_data(&self, fid: u64) -> Result<UserData> {
        self.record(HubEndpoint::UserDataByFid)?;
        Ok(self.data.user_data.get(&fid).cloned().unwrap_or_default())
    }
}
