//! Webhook payload shapes consumed from the Messenger platform.
//!
//! Every field the platform may omit is optional, and unknown variants of wire
//! enums fall back to catch-all strings, so a payload from a newer platform
//! version still deserializes. At most one of the per-event sub-payloads is
//! present on any [`MessagingEvent`].

// self
use crate::_prelude::*;

/// Top-level webhook envelope identifying the event source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
	/// Event source; only `"page"` envelopes are accepted by the flattener.
	pub object: String,
	/// Entry forest; the platform occasionally nests entry arrays, so each node
	/// is either a single entry or another list.
	pub entry: Option<Vec<EntryNode>>,
}
impl WebhookPayload {
	/// Parses a raw JSON payload, reporting the failing path on malformed input.
	pub fn parse(raw: &str) -> Result<Self> {
		let mut deserializer = serde_json::Deserializer::from_str(raw);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::ResponseParse { source, status: None })
	}
}

/// One node of the entry forest: a webhook entry or a nested list of nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryNode {
	/// Nested entry list.
	List(Vec<EntryNode>),
	/// A single webhook entry.
	Entry(Box<WebhookEntry>),
}

/// A single webhook entry scoped to one page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookEntry {
	/// Page identifier the events belong to.
	pub id: Option<String>,
	/// Entry timestamp in epoch milliseconds.
	pub time: Option<i64>,
	/// Individual messaging event records.
	#[serde(default)]
	pub messaging: Vec<MessagingEvent>,
	/// Standby-channel mirror of events this app does not control; delivered
	/// alongside `messaging` when the app is a secondary receiver.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub standby: Vec<StandbyEvent>,
}

/// Conversation participant reference.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
	/// Page-scoped participant identifier.
	pub id: Option<String>,
}

/// Encompassing record containing all event variations; only one of the
/// optional sub-payloads is present per record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagingEvent {
	/// Sending participant.
	pub sender: Option<Participant>,
	/// Receiving participant.
	pub recipient: Option<Participant>,
	/// Event timestamp in epoch milliseconds.
	pub timestamp: Option<i64>,
	/// Text or attachment message.
	pub message: Option<MessageEvent>,
	/// Postback button press.
	pub postback: Option<Postback>,
	/// Referral outside a postback.
	pub referral: Option<Referral>,
	/// Read receipt.
	pub read: Option<ReadReceipt>,
	/// Delivery receipt.
	pub delivery: Option<DeliveryReceipt>,
	/// Messaging opt-in.
	pub optin: Option<Optin>,
	/// Account linking status change.
	pub account_linking: Option<AccountLinking>,
	/// Checkout update during a payment flow.
	pub checkout_update: Option<CheckoutUpdate>,
	/// Completed payment.
	pub payment: Option<Payment>,
	/// Pre-checkout confirmation.
	pub payment_pre_checkout: Option<PreCheckout>,
	/// Instant game session result.
	pub game_play: Option<GamePlay>,
	/// Policy enforcement notice; hyphenated on the wire.
	#[serde(rename = "policy-enforcement")]
	pub policy_enforcement: Option<PolicyEnforcement>,
	/// Handover protocol: thread control passed to another app.
	pub pass_thread_control: Option<Handover>,
	/// Handover protocol: thread control taken back.
	pub take_thread_control: Option<Handover>,
}

/// Incoming message content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
	/// Message identifier.
	pub mid: Option<String>,
	/// Set when the message is an echo of one the page sent.
	pub is_echo: Option<bool>,
	/// Application that produced an echoed message.
	pub app_id: Option<i64>,
	/// Custom metadata attached by the sending application.
	pub metadata: Option<String>,
	/// Legacy sequence number.
	pub seq: Option<String>,
	/// Message text.
	pub text: Option<String>,
	/// Multimedia, location, or fallback attachments.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub attachments: Vec<Attachment>,
	/// Quick-reply selection.
	pub quick_reply: Option<QuickReply>,
}

/// Quick-reply selection payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickReply {
	/// Developer-defined payload of the selected reply.
	pub payload: Option<String>,
}

/// Message attachment of any supported kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
	/// Attachment kind.
	#[serde(rename = "type")]
	pub kind: AttachmentType,
	/// Multimedia or location payload; `null` for fallback attachments.
	pub payload: Option<AttachmentPayload>,
	/// Fallback attachments carry the URL at the top level.
	pub url: Option<String>,
	/// Fallback attachment title.
	pub title: Option<String>,
}

/// Attachment kinds emitted by the platform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
	/// Image attachment.
	Image,
	/// Video attachment.
	Video,
	/// Audio attachment.
	Audio,
	/// File attachment.
	File,
	/// Shared location.
	Location,
	/// Unrenderable shared content.
	Fallback,
	/// Structured template.
	Template,
	/// Any kind introduced after this crate was published.
	#[serde(untagged)]
	Other(String),
}

/// Payload carried by multimedia and location attachments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttachmentPayload {
	/// Multimedia payload referencing hosted content.
	Media {
		/// Hosted content URL.
		url: String,
	},
	/// Shared-location payload; the platform flattens the coordinate keys.
	Location {
		/// Latitude.
		#[serde(rename = "coordinates.lat")]
		lat: String,
		/// Longitude.
		#[serde(rename = "coordinates.long")]
		long: String,
	},
}

/// Postback button press.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Postback {
	/// Button title shown to the user.
	pub title: Option<String>,
	/// Developer-defined button payload.
	pub payload: Option<String>,
	/// Referral attached when the postback came from an entry point.
	pub referral: Option<Referral>,
}

/// Referral describing how a conversation was entered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Referral {
	/// Developer-defined ref parameter.
	#[serde(rename = "ref")]
	pub ref_param: Option<String>,
	/// Entry point source, e.g. `SHORTLINK` or `ADS`.
	pub source: Option<String>,
	/// Referral type.
	#[serde(rename = "type")]
	pub kind: Option<String>,
	/// Advertisement identifier for ad-sourced referrals.
	pub ad_id: Option<String>,
	/// Referring URI for plugin-sourced referrals.
	pub referer_uri: Option<String>,
}

/// Read receipt watermark.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadReceipt {
	/// All messages before this timestamp were read.
	pub watermark: Option<i64>,
	/// Legacy sequence number.
	pub seq: Option<i64>,
}

/// Delivery receipt watermark.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
	/// Message identifiers that were delivered.
	#[serde(default)]
	pub mids: Vec<String>,
	/// All messages before this timestamp were delivered.
	pub watermark: Option<i64>,
	/// Legacy sequence number.
	pub seq: Option<i64>,
}

/// Messaging opt-in via the send-to-messenger plugin.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Optin {
	/// Developer-defined ref parameter.
	#[serde(rename = "ref")]
	pub ref_param: Option<String>,
	/// Checkbox-plugin user reference.
	pub user_ref: Option<String>,
}

/// Account linking status change.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountLinking {
	/// `linked` or `unlinked`.
	pub status: Option<String>,
	/// Authorization code passed back on successful linking.
	pub authorization_code: Option<String>,
}

/// Checkout update during a payment flow.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutUpdate {
	/// Developer-defined payload from the original buy button.
	pub payload: Option<String>,
	/// Shipping address selected by the user.
	pub shipping_address: Option<ShippingAddress>,
}

/// Shipping address attached to payment events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
	/// Recipient name.
	pub name: Option<String>,
	/// Address record identifier.
	pub id: Option<String>,
	/// Street address, line one.
	pub street_1: Option<String>,
	/// Street address, line two.
	pub street_2: Option<String>,
	/// City.
	pub city: Option<String>,
	/// State or region.
	pub state: Option<String>,
	/// Country code.
	pub country: Option<String>,
	/// Postal code.
	pub postal_code: Option<String>,
}

/// Monetary amount.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentAmount {
	/// ISO currency code.
	pub currency: Option<String>,
	/// Decimal amount as a string.
	pub amount: Option<String>,
}

/// User information requested at checkout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestedUserInfo {
	/// Selected shipping address.
	pub shipping_address: Option<ShippingAddress>,
	/// Contact name.
	pub contact_name: Option<String>,
	/// Contact email.
	pub contact_email: Option<String>,
	/// Contact phone number.
	pub contact_phone: Option<String>,
}

/// Tokenized payment credential.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentCredential {
	/// Payment provider type.
	pub provider_type: Option<String>,
	/// Provider charge identifier.
	pub charge_id: Option<String>,
	/// Platform payment identifier.
	pub fb_payment_id: Option<String>,
	/// Tokenized card number, when tokenized payments are enabled.
	pub tokenized_card: Option<String>,
	/// Tokenized card verification value.
	pub tokenized_cvv: Option<String>,
	/// Token expiry month.
	pub token_expiry_month: Option<String>,
	/// Token expiry year.
	pub token_expiry_year: Option<String>,
}

/// Completed payment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
	/// User information collected at checkout.
	pub requested_user_info: Option<RequestedUserInfo>,
	/// Credential used to settle the payment.
	pub payment_credential: Option<PaymentCredential>,
	/// Amount charged.
	pub amount: Option<PaymentAmount>,
	/// Shipping option chosen by the user.
	pub shipping_option_id: Option<String>,
}

/// Pre-checkout confirmation fired before a payment settles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreCheckout {
	/// Developer-defined payload from the original buy button.
	pub payload: Option<String>,
	/// Amount about to be charged.
	pub amount: Option<PaymentAmount>,
	/// User information collected at checkout.
	pub requested_user_info: Option<RequestedUserInfo>,
}

/// Instant game session result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GamePlay {
	/// Game identifier.
	pub game_id: Option<String>,
	/// Game-scoped player identifier.
	pub player_id: Option<String>,
	/// Play context kind, e.g. `SOLO` or `THREAD`.
	pub context_type: Option<String>,
	/// Context identifier for threaded plays.
	pub context_id: Option<String>,
	/// Best score achieved in the session.
	pub score: Option<i64>,
	/// Developer-defined payload.
	pub payload: Option<String>,
}

/// Policy enforcement notice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyEnforcement {
	/// Action taken, e.g. `warning` or `block`.
	pub action: Option<String>,
	/// Human-readable reason for the action.
	pub reason: Option<String>,
}

/// Handover protocol event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Handover {
	/// Application receiving thread control.
	pub new_owner_app_id: Option<String>,
	/// Metadata passed between the applications.
	pub metadata: Option<String>,
}

/// Standby-channel mirror of an event owned by another application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StandbyEvent {
	/// Sending participant.
	pub sender: Option<Participant>,
	/// Receiving participant.
	pub recipient: Option<Participant>,
	/// Mirrored message.
	pub message: Option<MessageEvent>,
	/// Mirrored postback.
	pub postback: Option<Postback>,
	/// Mirrored read receipt.
	pub read: Option<ReadReceipt>,
	/// Mirrored delivery receipt.
	pub delivery: Option<DeliveryReceipt>,
}
