// JSON bodies returned by the hub HTTP API. Only the fields we read are modeled.
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct ValidateMessageResponse {
    pub valid: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerificationsResponse {
    #[serde(default)]
    pub messages: Vec<VerificationMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerificationMessage {
    pub data: VerificationData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerificationData {
    #[serde(alias = "verificationAddEthAddressBody")]
    pub verification_add_address_body: Option<VerificationBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerificationBody {
    pub address: String,
    #[serde(default)]
    pub protocol: Option<String>,
}

impl VerificationBody {
    /// Entries without a protocol predate Solana verifications and are Ethereum.
    pub fn is_ethereum(&self) -> bool {
        matches!(self.protocol.as_deref(), None | Some("PROTOCOL_ETHEREUM"))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IdRegistryEventResponse {
    pub id_register_event_body: Option<IdRegisterEventBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IdRegisterEventBody {
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDataResponse {
    #[serde(default)]
    pub messages: Vec<UserDataMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDataMessage {
    pub data: UserDataData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserDataData {
    pub user_data_body: Option<UserDataBody>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDataBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}
