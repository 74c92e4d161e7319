// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Membership rows and the invariants the store must enforce on write.
//!
//! [`MembershipSet`] is an owned map of membership rows that enforces the two
//! write invariants atomically with the mutation itself: at most one row per
//! (project, user), and the owner is never a row. It backs the in-memory
//! provider and doubles as the reference semantics any real store must
//! reproduce inside its own transactions.
//!
//! [`validate_assignee`] is the assignment-time check that an issue assignee
//! is the owner or a member. It is re-checked on every assignment change and
//! never enforced retroactively: demoting a member does not clear the issues
//! already assigned to them.

use crate::error::ValidationError;
use crate::snapshot::{ActorAttrs, MembershipRow, ProjectSnapshot};
use crate::types::{ProjectId, ProjectRole, UserId};
use chrono::Utc;
use std::collections::HashMap;

/// Owned membership rows keyed by (project, user), invariant-enforcing.
#[derive(Debug, Clone, Default)]
pub struct MembershipSet {
	rows: HashMap<(ProjectId, UserId), MembershipRow>,
}

impl MembershipSet {
	/// Creates an empty membership set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuilds a set from rows already validated by a store.
	///
	/// No invariant checks: the rows are trusted. Later rows win on a
	/// duplicate (project, user) key.
	pub fn from_rows(rows: impl IntoIterator<Item = MembershipRow>) -> Self {
		let mut set = Self::new();
		for row in rows {
			set.rows.insert((row.project_id, row.user_id), row);
		}
		set
	}

	/// Adds a membership row.
	///
	/// Fails with [`ValidationError::OwnerCannotBeMember`] when the user owns
	/// the project and [`ValidationError::DuplicateMembership`] when a row
	/// already exists.
	pub fn add(
		&mut self,
		project: &ProjectSnapshot,
		user_id: UserId,
		role: ProjectRole,
	) -> Result<(), ValidationError> {
		if user_id == project.owner {
			return Err(ValidationError::OwnerCannotBeMember {
				project_id: project.id,
				user_id,
			});
		}
		if self.rows.contains_key(&(project.id, user_id)) {
			return Err(ValidationError::DuplicateMembership {
				project_id: project.id,
				user_id,
			});
		}

		self.rows.insert(
			(project.id, user_id),
			MembershipRow {
				project_id: project.id,
				user_id,
				role,
				joined_at: Utc::now(),
			},
		);
		Ok(())
	}

	/// Removes a membership row, failing when none exists.
	pub fn remove(&mut self, project_id: ProjectId, user_id: UserId) -> Result<(), ValidationError> {
		self
			.rows
			.remove(&(project_id, user_id))
			.map(|_| ())
			.ok_or(ValidationError::NoSuchMembership {
				project_id,
				user_id,
			})
	}

	/// Changes the role on an existing membership row.
	pub fn change_role(
		&mut self,
		project_id: ProjectId,
		user_id: UserId,
		new_role: ProjectRole,
	) -> Result<(), ValidationError> {
		match self.rows.get_mut(&(project_id, user_id)) {
			Some(row) => {
				row.role = new_role;
				Ok(())
			}
			None => Err(ValidationError::NoSuchMembership {
				project_id,
				user_id,
			}),
		}
	}

	/// Returns the row for a (project, user) pair, if any.
	pub fn get(&self, project_id: ProjectId, user_id: UserId) -> Option<&MembershipRow> {
		self.rows.get(&(project_id, user_id))
	}

	/// Returns true if the user has a row in the project.
	pub fn contains(&self, project_id: ProjectId, user_id: UserId) -> bool {
		self.rows.contains_key(&(project_id, user_id))
	}

	/// All rows for a project.
	pub fn rows_for_project(&self, project_id: ProjectId) -> Vec<&MembershipRow> {
		self
			.rows
			.values()
			.filter(|row| row.project_id == project_id)
			.collect()
	}

	/// All rows for a user.
	pub fn rows_for_user(&self, user_id: UserId) -> Vec<&MembershipRow> {
		self
			.rows
			.values()
			.filter(|row| row.user_id == user_id)
			.collect()
	}

	/// Builds the pre-loaded actor attributes for a user.
	pub fn attrs_for(&self, user_id: UserId) -> ActorAttrs {
		let mut attrs = ActorAttrs::new(user_id);
		for row in self.rows_for_user(user_id) {
			attrs = attrs.with_membership(row.project_id, row.role);
		}
		attrs
	}

	/// Number of rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Returns true if no rows exist.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

/// Checks that an assignee is the project owner or a member.
///
/// Called on every assignment change; fails with
/// [`ValidationError::AssigneeNotMember`] otherwise.
pub fn validate_assignee(
	project: &ProjectSnapshot,
	memberships: &MembershipSet,
	assignee: UserId,
) -> Result<(), ValidationError> {
	if assignee == project.owner || memberships.contains(project.id, assignee) {
		return Ok(());
	}
	Err(ValidationError::AssigneeNotMember {
		project_id: project.id,
		user_id: assignee,
	})
}
