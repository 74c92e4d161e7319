// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Store traits the access boundary consumes.
//!
//! [`SnapshotProvider`] loads the immutable snapshots a single evaluation
//! needs; retrieval may be concurrent and async, the evaluation itself never
//! is. [`MembershipStore`] is the mutation side: implementations must enforce
//! the membership invariants atomically with the write (unique
//! (project, user), owner never a row), in the same transaction that checks
//! uniqueness. Any cache of effective roles an implementation keeps must be
//! invalidated synchronously on every membership write for the affected
//! (project, user) pair, or stale allows will leak through.

use crate::error::{AccessError, ProviderError};
use async_trait::async_trait;
use quarry_authz_core::{
	ActorAttrs, CommentId, CommentSnapshot, IssueId, IssueSnapshot, MembershipRow, ProjectId,
	ProjectRole, ProjectSnapshot, UserId,
};

/// Read-side loads of immutable snapshots.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
	/// Load a project snapshot by id.
	async fn project(&self, id: ProjectId) -> Result<Option<ProjectSnapshot>, ProviderError>;

	/// Load an issue snapshot by id.
	async fn issue(&self, id: IssueId) -> Result<Option<IssueSnapshot>, ProviderError>;

	/// Load a comment snapshot by id.
	async fn comment(&self, id: CommentId) -> Result<Option<CommentSnapshot>, ProviderError>;

	/// Load the actor's membership facts, pre-assembled for evaluation.
	async fn actor_attrs(&self, user_id: UserId) -> Result<ActorAttrs, ProviderError>;

	/// Load all membership rows for a project.
	async fn project_memberships(
		&self,
		project_id: ProjectId,
	) -> Result<Vec<MembershipRow>, ProviderError>;

	/// Load all project snapshots (the unfiltered listing universe).
	async fn projects(&self) -> Result<Vec<ProjectSnapshot>, ProviderError>;

	/// Load all issues in a project.
	async fn project_issues(
		&self,
		project_id: ProjectId,
	) -> Result<Vec<IssueSnapshot>, ProviderError>;

	/// Load all comments on an issue.
	async fn issue_comments(&self, issue_id: IssueId)
		-> Result<Vec<CommentSnapshot>, ProviderError>;
}

/// Write-side membership and assignment mutations.
///
/// Authorization happens before these are called; implementations only
/// enforce data invariants and surface them as [`AccessError::Validation`].
#[async_trait]
pub trait MembershipStore: Send + Sync {
	/// Add a membership row.
	async fn add_member(
		&self,
		project_id: ProjectId,
		user_id: UserId,
		role: ProjectRole,
	) -> Result<(), AccessError>;

	/// Remove a membership row.
	async fn remove_member(&self, project_id: ProjectId, user_id: UserId)
		-> Result<(), AccessError>;

	/// Change the role on an existing membership row.
	async fn change_role(
		&self,
		project_id: ProjectId,
		user_id: UserId,
		new_role: ProjectRole,
	) -> Result<(), AccessError>;

	/// Set or clear an issue's assignee.
	async fn set_assignee(
		&self,
		issue_id: IssueId,
		assignee: Option<UserId>,
	) -> Result<(), AccessError>;
}
