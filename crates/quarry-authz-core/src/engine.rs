// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Policy evaluation engine.
//!
//! [`authorize`] is the single entry point for per-action decisions. It
//! combines the resource resolver, the effective-role derivation and the
//! static policy table:
//!
//! 1. Resolve the resource to its owning project (propagates dangling
//!    references).
//! 2. Derive the actor's effective role on that project.
//! 3. Look up the (kind, action) policy entry (propagates unregistered
//!    pairs).
//! 4. Apply the author override when the entry carries one: authorship alone
//!    is not enough, the author must also hold at least member rank.
//! 5. Otherwise allow iff the effective role ranks at or above the entry's
//!    minimum.
//!
//! All decisions are pure functions over an immutable snapshot; reads flow
//! through the same function as writes even though reads are normally gated
//! earlier by the visibility filter.

use crate::error::AuthzError;
use crate::policy;
use crate::resolver::{self, Resource};
use crate::role::effective_role;
use crate::snapshot::{ActorAttrs, ContainmentGraph};
use crate::types::{Action, EffectiveRole};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
	Allow,
	Deny { reason: DenyReason },
}

impl Decision {
	/// Returns true if the action was allowed.
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allow)
	}
}

/// Why an evaluation denied. Serializable so denials can be audit-logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenyReason {
	/// The actor's effective role ranks below the table minimum.
	InsufficientRole {
		have: EffectiveRole,
		need: EffectiveRole,
	},
}

impl std::fmt::Display for DenyReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DenyReason::InsufficientRole { have, need } => {
				write!(f, "insufficient role: have {have}, need {need}")
			}
		}
	}
}

/// Evaluates whether an actor may perform an action on a resource.
///
/// Pure and side-effect-free per call; the caller supplies the snapshot.
/// Returns `Err` only for integrity and configuration faults; a plain "no"
/// is a [`Decision::Deny`] with its reason.
#[instrument(
	level = "debug",
	skip(graph, actor, resource),
	fields(
		actor = %actor.user_id,
		action = ?action,
		kind = ?resource.kind(),
	)
)]
pub fn authorize<G: ContainmentGraph + ?Sized>(
	graph: &G,
	actor: &ActorAttrs,
	action: Action,
	resource: Resource<'_>,
) -> Result<Decision, AuthzError> {
	let project = resolver::owner_project(graph, resource)?;
	let role = effective_role(project, actor);
	let entry = policy::lookup(resource.kind(), action)?;

	// Author carve-out: authorship plus member rank beats the table floor.
	if entry.author_override
		&& resource.override_author() == Some(actor.user_id)
		&& role >= EffectiveRole::Member
	{
		return Ok(Decision::Allow);
	}

	if role >= entry.min_role {
		return Ok(Decision::Allow);
	}

	let decision = Decision::Deny {
		reason: DenyReason::InsufficientRole {
			have: role,
			need: entry.min_role,
		},
	};
	tracing::debug!(have = %role, need = %entry.min_role, "denied");
	Ok(decision)
}
