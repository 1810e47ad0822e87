//! Credential state owned by each token handler.
//!
//! A credential cycles EMPTY → VALID → EXPIRED → VALID for the process
//! lifetime. Only the EMPTY and EXPIRED states trigger a network fetch from the
//! lazy path; VALID short-circuits. There is no terminal state and no failed
//! state; an unsuccessful fetch leaves the slot exactly as it was.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Injectable time source so expiry checks are testable without sleeping.
#[derive(Clone, Debug)]
pub enum Clock {
	/// Wall clock (`OffsetDateTime::now_utc`).
	System,
	/// Manually advanced clock shared across clones.
	Manual(Arc<Mutex<OffsetDateTime>>),
}
impl Clock {
	/// Returns the wall clock.
	pub fn system() -> Self {
		Self::System
	}

	/// Returns a manual clock starting at the provided instant.
	pub fn manual(start: OffsetDateTime) -> Self {
		Self::Manual(Arc::new(Mutex::new(start)))
	}

	/// Reads the current instant.
	pub fn now(&self) -> OffsetDateTime {
		match self {
			Self::System => OffsetDateTime::now_utc(),
			Self::Manual(instant) => *instant.lock(),
		}
	}

	/// Advances a manual clock; no-op for the system clock.
	pub fn advance(&self, delta: Duration) {
		if let Self::Manual(instant) = self {
			*instant.lock() += delta;
		}
	}
}

/// Bearer value plus optional expiry, replaced in full on every successful fetch.
#[derive(Clone, Debug)]
pub struct Credential {
	value: TokenSecret,
	expires_at: Option<OffsetDateTime>,
}
impl Credential {
	/// Creates a credential; `None` expiry means the credential never expires.
	pub fn new(value: TokenSecret, expires_at: Option<OffsetDateTime>) -> Self {
		Self { value, expires_at }
	}

	/// Returns the bearer value.
	pub fn value(&self) -> &TokenSecret {
		&self.value
	}

	/// Returns the expiry instant, if any.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.expires_at
	}

	/// A credential with no expiry is always valid; otherwise it is valid iff
	/// `now` is strictly before the expiry instant.
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		match self.expires_at {
			None => true,
			Some(expires_at) => now < expires_at,
		}
	}
}

/// Mutex-guarded credential slot; one per handler, never shared across handlers.
///
/// The lock is held only to read or replace the contents, never across a
/// network call, so two callers racing past an expired credential both fetch and the
/// later response silently wins.
#[derive(Debug)]
pub struct CredentialSlot {
	clock: Clock,
	held: Mutex<Option<Credential>>,
}
impl CredentialSlot {
	/// Creates an empty slot bound to the provided clock.
	pub fn new(clock: Clock) -> Self {
		Self { clock, held: Mutex::new(None) }
	}

	/// Returns the clock driving this slot's expiry checks.
	pub fn clock(&self) -> &Clock {
		&self.clock
	}

	/// Replaces the held credential in full.
	pub fn replace(&self, credential: Credential) {
		*self.held.lock() = Some(credential);
	}

	/// Returns `true` when a credential is held and valid at the clock's now.
	pub fn is_fresh(&self) -> bool {
		self.held.lock().as_ref().is_some_and(|credential| credential.is_valid_at(self.clock.now()))
	}

	/// Returns the held bearer value regardless of validity.
	pub fn bearer(&self) -> Option<String> {
		self.held.lock().as_ref().map(|credential| credential.value().expose().to_owned())
	}

	/// Returns a copy of the held credential.
	pub fn snapshot(&self) -> Option<Credential> {
		self.held.lock().clone()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn credential_without_expiry_never_expires() {
		let credential = Credential::new(TokenSecret::new("page-token"), None);

		assert!(credential.is_valid_at(macros::datetime!(2099-01-01 00:00 UTC)));
	}

	#[test]
	fn expiry_comparison_is_strict() {
		let expires = macros::datetime!(2025-06-01 12:00 UTC);
		let credential = Credential::new(TokenSecret::new("app-token"), Some(expires));

		assert!(credential.is_valid_at(expires - Duration::seconds(1)));
		assert!(!credential.is_valid_at(expires));
		assert!(!credential.is_valid_at(expires + Duration::seconds(1)));
	}

	#[test]
	fn empty_slot_is_never_fresh() {
		let slot = CredentialSlot::new(Clock::system());

		assert!(!slot.is_fresh());
		assert_eq!(slot.bearer(), None);
	}

	#[test]
	fn manual_clock_drives_slot_freshness() {
		let start = macros::datetime!(2025-01-01 00:00 UTC);
		let clock = Clock::manual(start);
		let slot = CredentialSlot::new(clock.clone());

		slot.replace(Credential::new(
			TokenSecret::new("SU1"),
			Some(start + Duration::seconds(3_600)),
		));

		assert!(slot.is_fresh());

		clock.advance(Duration::seconds(3_601));

		assert!(!slot.is_fresh());
		assert_eq!(slot.bearer().as_deref(), Some("SU1"), "Stale bearers stay readable.");
	}

	#[test]
	fn replace_swaps_the_whole_credential() {
		let slot = CredentialSlot::new(Clock::system());

		slot.replace(Credential::new(TokenSecret::new("first"), None));
		slot.replace(Credential::new(TokenSecret::new("second"), None));

		assert_eq!(slot.bearer().as_deref(), Some("second"));
	}
}
