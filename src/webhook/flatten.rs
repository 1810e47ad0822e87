//! Recursive flattener producing the ordered list of messaging events.

// self
use crate::{
	_prelude::*,
	webhook::event::{EntryNode, MessagingEvent, WebhookPayload},
};

/// Flattens a `page` envelope into its individual messaging event records,
/// preserving wire order and recursing into nested entry lists.
///
/// Raises [`Error::InvalidWebhookEvent`] when the payload is not a `page`
/// envelope or carries no `entry` field at all.
pub fn flatten(payload: WebhookPayload) -> Result<Vec<MessagingEvent>> {
	if payload.object != "page" {
		return Err(Error::InvalidWebhookEvent);
	}

	let entry = payload.entry.ok_or(Error::InvalidWebhookEvent)?;
	let mut events = Vec::new();

	for node in entry {
		walk(node, &mut events);
	}

	Ok(events)
}

/// Parses raw JSON and flattens it in one step.
pub fn flatten_raw(raw: &str) -> Result<Vec<MessagingEvent>> {
	flatten(WebhookPayload::parse(raw)?)
}

fn walk(node: EntryNode, out: &mut Vec<MessagingEvent>) {
	match node {
		EntryNode::List(nodes) =>
			for node in nodes {
				walk(node, out);
			},
		EntryNode::Entry(entry) => out.extend(entry.messaging),
	}
}
