// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Immutable snapshots of store rows as seen by the decision core.
//!
//! The engine never performs I/O: the caller loads whatever rows an
//! evaluation needs and hands them over as these snapshot types. Membership
//! facts for the requesting user are pre-loaded into [`ActorAttrs`], mirroring
//! how resource facts are pre-loaded into the snapshot structs.
//!
//! [`ContainmentGraph`] is the seam between the core and whoever owns the
//! rows: the resolver only ever needs the two lookups it declares.
//! [`SnapshotSet`] is a plain owned implementation used in tests and by the
//! in-memory provider.

use crate::types::{
	CommentId, IssueId, IssuePriority, IssueStatus, ProjectId, ProjectRole, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Snapshot of a project row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
	pub id: ProjectId,
	/// The single, immutable owner. Never also a membership row.
	pub owner: UserId,
	pub created_at: DateTime<Utc>,
}

impl ProjectSnapshot {
	/// Creates a project snapshot owned by the given user.
	pub fn new(id: ProjectId, owner: UserId) -> Self {
		Self {
			id,
			owner,
			created_at: Utc::now(),
		}
	}
}

/// Snapshot of a membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRow {
	pub project_id: ProjectId,
	pub user_id: UserId,
	pub role: ProjectRole,
	pub joined_at: DateTime<Utc>,
}

/// Snapshot of an issue row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSnapshot {
	pub id: IssueId,
	pub project_id: ProjectId,
	pub reporter: UserId,
	pub assignee: Option<UserId>,
	pub status: IssueStatus,
	pub priority: IssuePriority,
	pub created_at: DateTime<Utc>,
}

impl IssueSnapshot {
	/// Creates an open, unassigned issue snapshot with default priority.
	pub fn new(id: IssueId, project_id: ProjectId, reporter: UserId) -> Self {
		Self {
			id,
			project_id,
			reporter,
			assignee: None,
			status: IssueStatus::default(),
			priority: IssuePriority::default(),
			created_at: Utc::now(),
		}
	}

	/// Builder: set the assignee.
	pub fn with_assignee(mut self, assignee: UserId) -> Self {
		self.assignee = Some(assignee);
		self
	}

	/// Builder: set the status.
	pub fn with_status(mut self, status: IssueStatus) -> Self {
		self.status = status;
		self
	}

	/// Builder: set the priority.
	pub fn with_priority(mut self, priority: IssuePriority) -> Self {
		self.priority = priority;
		self
	}
}

/// Snapshot of a comment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSnapshot {
	pub id: CommentId,
	pub issue_id: IssueId,
	pub author: UserId,
	pub created_at: DateTime<Utc>,
}

impl CommentSnapshot {
	/// Creates a comment snapshot.
	pub fn new(id: CommentId, issue_id: IssueId, author: UserId) -> Self {
		Self {
			id,
			issue_id,
			author,
			created_at: Utc::now(),
		}
	}
}

/// A single membership fact attached to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipAttr {
	pub project_id: ProjectId,
	pub role: ProjectRole,
}

/// Attributes describing the actor requesting access.
///
/// All membership facts are computed before evaluation; policy functions are
/// pure and never go back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorAttrs {
	pub user_id: UserId,
	pub memberships: Vec<MembershipAttr>,
}

impl ActorAttrs {
	/// Creates an actor with no memberships.
	pub fn new(user_id: UserId) -> Self {
		Self {
			user_id,
			memberships: Vec::new(),
		}
	}

	/// Builder: add a membership fact.
	pub fn with_membership(mut self, project_id: ProjectId, role: ProjectRole) -> Self {
		self.memberships.push(MembershipAttr { project_id, role });
		self
	}

	/// Returns the stored role for the given project, if any.
	pub fn role_in(&self, project_id: ProjectId) -> Option<ProjectRole> {
		self
			.memberships
			.iter()
			.find(|m| m.project_id == project_id)
			.map(|m| m.role)
	}

	/// Returns true if the actor has a membership row for the given project.
	pub fn is_member_of(&self, project_id: ProjectId) -> bool {
		self.role_in(project_id).is_some()
	}
}

/// The two lookups the resource resolver needs to walk the containment chain
/// Comment → Issue → Project.
pub trait ContainmentGraph {
	/// Look up a project snapshot by id.
	fn project(&self, id: ProjectId) -> Option<&ProjectSnapshot>;

	/// Look up an issue snapshot by id.
	fn issue(&self, id: IssueId) -> Option<&IssueSnapshot>;
}

/// Owned collection of snapshots implementing [`ContainmentGraph`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotSet {
	projects: HashMap<ProjectId, ProjectSnapshot>,
	issues: HashMap<IssueId, IssueSnapshot>,
	comments: HashMap<CommentId, CommentSnapshot>,
}

impl SnapshotSet {
	/// Creates an empty snapshot set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a project snapshot, replacing any existing one with the same id.
	pub fn insert_project(&mut self, project: ProjectSnapshot) {
		self.projects.insert(project.id, project);
	}

	/// Inserts an issue snapshot, replacing any existing one with the same id.
	pub fn insert_issue(&mut self, issue: IssueSnapshot) {
		self.issues.insert(issue.id, issue);
	}

	/// Inserts a comment snapshot, replacing any existing one with the same id.
	pub fn insert_comment(&mut self, comment: CommentSnapshot) {
		self.comments.insert(comment.id, comment);
	}

	/// Removes a project snapshot.
	pub fn remove_project(&mut self, id: ProjectId) -> Option<ProjectSnapshot> {
		self.projects.remove(&id)
	}

	/// Removes an issue snapshot.
	pub fn remove_issue(&mut self, id: IssueId) -> Option<IssueSnapshot> {
		self.issues.remove(&id)
	}

	/// Removes a comment snapshot.
	pub fn remove_comment(&mut self, id: CommentId) -> Option<CommentSnapshot> {
		self.comments.remove(&id)
	}

	/// Look up a comment snapshot by id.
	pub fn comment(&self, id: CommentId) -> Option<&CommentSnapshot> {
		self.comments.get(&id)
	}

	/// Iterate over all project snapshots.
	pub fn projects(&self) -> impl Iterator<Item = &ProjectSnapshot> {
		self.projects.values()
	}

	/// Iterate over all issue snapshots.
	pub fn issues(&self) -> impl Iterator<Item = &IssueSnapshot> {
		self.issues.values()
	}

	/// Iterate over all comment snapshots.
	pub fn comments(&self) -> impl Iterator<Item = &CommentSnapshot> {
		self.comments.values()
	}
}

impl ContainmentGraph for SnapshotSet {
	fn project(&self, id: ProjectId) -> Option<&ProjectSnapshot> {
		self.projects.get(&id)
	}

	fn issue(&self, id: IssueId) -> Option<&IssueSnapshot> {
		self.issues.get(&id)
	}
}
