// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the authorization core.
//!
//! The core distinguishes faults the caller can correct
//! ([`ValidationError`]) from faults an operator must look at:
//! a broken containment chain ([`AuthzError::DanglingReference`]) or a
//! policy table hole ([`AuthzError::PolicyNotRegistered`]). The latter two
//! are never silently defaulted: a missing table entry denies by erroring,
//! not by allowing.
//!
//! `NotFound` and `Forbidden` are boundary outcomes, not core faults; they
//! live in the service layer's error type.

use crate::types::{Action, ProjectId, ResourceKind, UserId};
use thiserror::Error;
use uuid::Uuid;

/// Faults surfaced by the decision core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
	/// The containment chain is broken: a resource references a row that no
	/// longer exists. Data-integrity fault, surfaced not swallowed.
	#[error("{kind} {id} references missing {missing} {missing_id}")]
	DanglingReference {
		kind: ResourceKind,
		id: Uuid,
		missing: ResourceKind,
		missing_id: Uuid,
	},

	/// No policy table entry for this (resource kind, action) pair. A
	/// programming error: fail loudly, never default-allow.
	#[error("no policy registered for {kind}/{action}")]
	PolicyNotRegistered { kind: ResourceKind, action: Action },

	/// A membership invariant was violated.
	#[error(transparent)]
	Validation(#[from] ValidationError),
}

/// Membership invariant violations. User-correctable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// At most one membership row per (project, user).
	#[error("user {user_id} is already a member of project {project_id}")]
	DuplicateMembership {
		project_id: ProjectId,
		user_id: UserId,
	},

	/// The owner is implicit and must never have a membership row.
	#[error("user {user_id} owns project {project_id} and cannot be added as a member")]
	OwnerCannotBeMember {
		project_id: ProjectId,
		user_id: UserId,
	},

	/// Remove/change-role on a membership row that does not exist.
	#[error("user {user_id} has no membership in project {project_id}")]
	NoSuchMembership {
		project_id: ProjectId,
		user_id: UserId,
	},

	/// Assignees must be the owner or a member at assignment time.
	#[error("assignee {user_id} is not a member of project {project_id}")]
	AssigneeNotMember {
		project_id: ProjectId,
		user_id: UserId,
	},
}
