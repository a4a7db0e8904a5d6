//! Hub context lookups for a decoded frame action.
//!
//! All lookups run concurrently on the current task and are joined fail-fast:
//! the first failing lookup aborts the rest and fails the whole enrichment.
//! There is no partial context.

use hub::{HubFetcher, LinkType, ReactionType};
use tracing::debug;

use crate::errors::Result;
use crate::types::{CastId, HubContext, ParsedActionData};

/// Query the hub for signature validity and requester facts.
///
/// `message_bytes` are the raw signed bytes the action was decoded from.
pub async fn fetch_hub_context(
    hub: &dyn HubFetcher,
    message_bytes: &[u8],
    data: &ParsedActionData,
) -> Result<HubContext> {
    let requester = data.requester_fid;
    let cast = data.cast_id.as_ref();
    let caster = cast.map(|c| c.fid);

    let (
        is_valid,
        requester_follows_caster,
        caster_follows_requester,
        liked_cast,
        recasted_cast,
        address,
        requester_user_data,
    ) = tokio::try_join!(
        hub.validate_message(message_bytes),
        follows(hub, Some(requester), caster),
        follows(hub, caster, Some(requester)),
        reacted(hub, requester, ReactionType::Like, cast),
        reacted(hub, requester, ReactionType::Recast, cast),
        requester_address(hub, requester),
        hub.user_data(requester),
    )?;

    debug!(
        requester_fid = requester,
        is_valid,
        has_address = address.is_some(),
        "Fetched hub context"
    );

    Ok(HubContext {
        is_valid,
        requester_follows_caster,
        caster_follows_requester,
        liked_cast,
        recasted_cast,
        requester_verified_addresses: address.into_iter().collect(),
        requester_user_data,
    })
}

/// A user always follows themselves. Without both ends there is no link to check.
async fn follows(
    hub: &dyn HubFetcher,
    fid: Option<u64>,
    target_fid: Option<u64>,
) -> hub::Result<bool> {
    match (fid, target_fid) {
        (Some(fid), Some(target_fid)) if fid == target_fid => Ok(true),
        (Some(fid), Some(target_fid)) => hub.link_exists(fid, target_fid, LinkType::Follow).await,
        _ => Ok(false),
    }
}

async fn reacted(
    hub: &dyn HubFetcher,
    fid: u64,
    reaction_type: ReactionType,
    cast: Option<&CastId>,
) -> hub::Result<bool> {
    match cast {
        Some(cast) => {
            hub.reaction_exists(fid, reaction_type, cast.fid, &cast.hash)
                .await
        }
        None => Ok(false),
    }
}

/// Verified address first, custody address otherwise.
async fn requester_address(hub: &dyn HubFetcher, fid: u64) -> hub::Result<Option<String>> {
    match hub.verified_address(fid).await? {
        Some(address) => Ok(Some(address)),
        None => hub.custody_address(fid).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FrameMessageError;
    use hub::{HubEndpoint, HubError, MockHubClient, MockHubData, UserData};

    fn parsed(requester_fid: u64, cast_id: Option<CastId>) -> ParsedActionData {
        ParsedActionData {
            button_index: 1,
            input_text: None,
            requester_fid,
            cast_id,
            url: None,
            state: None,
            transaction_id: None,
            address: None,
            timestamp: 0,
            network: "FARCASTER_NETWORK_MAINNET".to_string(),
        }
    }

    fn cast(fid: u64) -> CastId {
        CastId {
            fid,
            hash: "0xabcd".to_string(),
        }
    }

    #[tokio::test]
    async fn test_context_reflects_hub_state() {
        let profile = UserData {
            display_name: Some("Dan".to_string()),
            ..Default::default()
        };
        let hub = MockHubClient::with_data(
            MockHubData::default()
                .with_valid(true)
                .with_follow(2, 3)
                .with_reaction(2, ReactionType::Recast, 3, "0xabcd")
                .with_verified_address(2, "0x1234")
                .with_user_data(2, profile.clone()),
        );

        let context = fetch_hub_context(&hub, &[1, 2, 3], &parsed(2, Some(cast(3))))
            .await
            .unwrap();

        assert!(context.is_valid);
        assert!(context.requester_follows_caster);
        assert!(!context.caster_follows_requester);
        assert!(!context.liked_cast);
        assert!(context.recasted_cast);
        assert_eq!(context.requester_verified_addresses, vec!["0x1234"]);
        assert_eq!(context.requester_user_data, profile);
        assert_eq!(hub.call_count(HubEndpoint::OnChainIdRegistryEventByFid), 0);
    }

    #[tokio::test]
    async fn test_self_relation_follows_without_link_lookup() {
        let hub = MockHubClient::with_data(MockHubData::default().with_valid(true));

        let context = fetch_hub_context(&hub, &[], &parsed(5, Some(cast(5))))
            .await
            .unwrap();

        assert!(context.requester_follows_caster);
        assert!(context.caster_follows_requester);
        assert_eq!(hub.call_count(HubEndpoint::LinkById), 0);
        assert_eq!(hub.call_count(HubEndpoint::ReactionById), 2);
    }

    #[tokio::test]
    async fn test_no_cast_skips_relationship_lookups() {
        let hub = MockHubClient::with_data(MockHubData::default().with_valid(true));

        let context = fetch_hub_context(&hub, &[], &parsed(5, None)).await.unwrap();

        assert!(!context.requester_follows_caster);
        assert!(!context.caster_follows_requester);
        assert!(!context.liked_cast);
        assert!(!context.recasted_cast);
        assert_eq!(hub.call_count(HubEndpoint::LinkById), 0);
        assert_eq!(hub.call_count(HubEndpoint::ReactionById), 0);
        assert_eq!(hub.call_count(HubEndpoint::ValidateMessage), 1);
    }

    #[tokio::test]
    async fn test_missing_address_is_empty_list() {
        let hub = MockHubClient::new();

        let context = fetch_hub_context(&hub, &[], &parsed(5, None)).await.unwrap();

        assert!(context.requester_verified_addresses.is_empty());
        assert_eq!(hub.call_count(HubEndpoint::OnChainIdRegistryEventByFid), 1);
    }

    #[tokio::test]
    async fn test_custody_address_fallback() {
        let hub = MockHubClient::with_data(MockHubData::default().with_custody_address(5, "0xc0de"));

        let context = fetch_hub_context(&hub, &[], &parsed(5, None)).await.unwrap();

        assert_eq!(context.requester_verified_addresses, vec!["0xc0de"]);
    }

    #[tokio::test]
    async fn test_invalid_signature_is_returned_not_raised() {
        let hub = MockHubClient::with_data(MockHubData::default().with_valid(false));

        let context = fetch_hub_context(&hub, &[], &parsed(5, None)).await.unwrap();

        assert!(!context.is_valid);
    }

    #[tokio::test]
    async fn test_any_failing_lookup_fails_enrichment() {
        for endpoint in [
            HubEndpoint::ValidateMessage,
            HubEndpoint::LinkById,
            HubEndpoint::ReactionById,
            HubEndpoint::VerificationsByFid,
            HubEndpoint::OnChainIdRegistryEventByFid,
            HubEndpoint::UserDataByFid,
        ] {
            // No verified address, so the custody lookup runs too
            let hub = MockHubClient::with_data(
                MockHubData::default()
                    .with_valid(true)
                    .with_failing(endpoint),
            );

            let result = fetch_hub_context(&hub, &[], &parsed(2, Some(cast(3)))).await;

            assert!(
                matches!(
                    result,
                    Err(FrameMessageError::Hub(HubError::NetworkError(_)))
                ),
                "expected failure for {}",
                endpoint
            );
        }
    }
}
