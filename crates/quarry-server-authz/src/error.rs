// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the access boundary.
//!
//! [`AccessError`] is where the core's outcomes become boundary responses:
//! unreachable resources are `NotFound` (identity hidden), reachable but
//! disallowed actions are `Forbidden` with the structured deny reason, and
//! the core's integrity/configuration faults are kept apart from
//! user-correctable validation so operators can alert on them.

use quarry_authz_core::{AuthzError, DenyReason, ResourceKind, ValidationError};
use thiserror::Error;
use uuid::Uuid;

/// Failure loading a snapshot from the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("snapshot provider error: {0}")]
pub struct ProviderError(pub String);

impl ProviderError {
	/// Creates a provider error with the given message.
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

/// Errors surfaced by the access boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
	/// The resource does not exist, or is unreachable for the actor, which
	/// must look identical from the outside.
	#[error("{kind} {id} not found")]
	NotFound { kind: ResourceKind, id: Uuid },

	/// The resource is reachable but the action is disallowed.
	#[error("forbidden: {reason}")]
	Forbidden { reason: DenyReason },

	/// A membership invariant was violated. User-correctable.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// Broken containment chain. Operator-alertable.
	#[error("data integrity fault: {0}")]
	Integrity(AuthzError),

	/// Hole in the policy table. Programming error.
	#[error("policy configuration fault: {0}")]
	Policy(AuthzError),

	/// The backing store failed to load a snapshot.
	#[error(transparent)]
	Provider(#[from] ProviderError),
}

impl AccessError {
	/// The HTTP-ish status class a transport layer should map this to.
	pub fn status_hint(&self) -> u16 {
		match self {
			AccessError::NotFound { .. } => 404,
			AccessError::Forbidden { .. } => 403,
			AccessError::Validation(_) => 422,
			AccessError::Integrity(_) | AccessError::Policy(_) | AccessError::Provider(_) => 500,
		}
	}
}

impl From<AuthzError> for AccessError {
	fn from(err: AuthzError) -> Self {
		match err {
			AuthzError::Validation(v) => AccessError::Validation(v),
			AuthzError::DanglingReference { .. } => AccessError::Integrity(err),
			AuthzError::PolicyNotRegistered { .. } => AccessError::Policy(err),
		}
	}
}
