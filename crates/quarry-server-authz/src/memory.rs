// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory store implementing both store traits.
//!
//! Backs the service-layer tests and any embedding that does not bring its
//! own persistence. A single `RwLock` over the whole state stands in for the
//! transactional discipline a real store provides: invariant checks and the
//! write they guard happen under one write lock.

use crate::error::{AccessError, ProviderError};
use crate::provider::{MembershipStore, SnapshotProvider};
use async_trait::async_trait;
use quarry_authz_core::{
	ActorAttrs, CommentId, CommentSnapshot, IssueId, IssueSnapshot, MembershipRow, MembershipSet,
	ProjectId, ProjectRole, ProjectSnapshot, ResourceKind, SnapshotSet, UserId,
};
use quarry_authz_core::ContainmentGraph;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
	snapshots: SnapshotSet,
	memberships: MembershipSet,
}

/// In-memory snapshot and membership store.
#[derive(Debug, Default)]
pub struct MemoryStore {
	inner: RwLock<Inner>,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds a project snapshot.
	pub async fn insert_project(&self, project: ProjectSnapshot) {
		self.inner.write().await.snapshots.insert_project(project);
	}

	/// Seeds an issue snapshot.
	pub async fn insert_issue(&self, issue: IssueSnapshot) {
		self.inner.write().await.snapshots.insert_issue(issue);
	}

	/// Seeds a comment snapshot.
	pub async fn insert_comment(&self, comment: CommentSnapshot) {
		self.inner.write().await.snapshots.insert_comment(comment);
	}

	/// Deletes a project snapshot, leaving its issues behind.
	///
	/// Exists to simulate integrity faults in tests; a real store would
	/// cascade the delete.
	pub async fn remove_project(&self, id: ProjectId) {
		self.inner.write().await.snapshots.remove_project(id);
	}
}

#[async_trait]
impl SnapshotProvider for MemoryStore {
	async fn project(&self, id: ProjectId) -> Result<Option<ProjectSnapshot>, ProviderError> {
		Ok(self.inner.read().await.snapshots.project(id).cloned())
	}

	async fn issue(&self, id: IssueId) -> Result<Option<IssueSnapshot>, ProviderError> {
		Ok(self.inner.read().await.snapshots.issue(id).cloned())
	}

	async fn comment(&self, id: CommentId) -> Result<Option<CommentSnapshot>, ProviderError> {
		Ok(self.inner.read().await.snapshots.comment(id).cloned())
	}

	async fn actor_attrs(&self, user_id: UserId) -> Result<ActorAttrs, ProviderError> {
		Ok(self.inner.read().await.memberships.attrs_for(user_id))
	}

	async fn project_memberships(
		&self,
		project_id: ProjectId,
	) -> Result<Vec<MembershipRow>, ProviderError> {
		Ok(
			self
				.inner
				.read()
				.await
				.memberships
				.rows_for_project(project_id)
				.into_iter()
				.cloned()
				.collect(),
		)
	}

	async fn projects(&self) -> Result<Vec<ProjectSnapshot>, ProviderError> {
		Ok(self.inner.read().await.snapshots.projects().cloned().collect())
	}

	async fn project_issues(
		&self,
		project_id: ProjectId,
	) -> Result<Vec<IssueSnapshot>, ProviderError> {
		Ok(
			self
				.inner
				.read()
				.await
				.snapshots
				.issues()
				.filter(|issue| issue.project_id == project_id)
				.cloned()
				.collect(),
		)
	}

	async fn issue_comments(
		&self,
		issue_id: IssueId,
	) -> Result<Vec<CommentSnapshot>, ProviderError> {
		Ok(
			self
				.inner
				.read()
				.await
				.snapshots
				.comments()
				.filter(|comment| comment.issue_id == issue_id)
				.cloned()
				.collect(),
		)
	}
}

#[async_trait]
impl MembershipStore for MemoryStore {
	async fn add_member(
		&self,
		project_id: ProjectId,
		user_id: UserId,
		role: ProjectRole,
	) -> Result<(), AccessError> {
		let mut inner = self.inner.write().await;
		let project = inner
			.snapshots
			.project(project_id)
			.cloned()
			.ok_or(AccessError::NotFound {
				kind: ResourceKind::Project,
				id: project_id.into_inner(),
			})?;
		inner.memberships.add(&project, user_id, role)?;
		Ok(())
	}

	async fn remove_member(
		&self,
		project_id: ProjectId,
		user_id: UserId,
	) -> Result<(), AccessError> {
		let mut inner = self.inner.write().await;
		inner.memberships.remove(project_id, user_id)?;
		Ok(())
	}

	async fn change_role(
		&self,
		project_id: ProjectId,
		user_id: UserId,
		new_role: ProjectRole,
	) -> Result<(), AccessError> {
		let mut inner = self.inner.write().await;
		inner.memberships.change_role(project_id, user_id, new_role)?;
		Ok(())
	}

	async fn set_assignee(
		&self,
		issue_id: IssueId,
		assignee: Option<UserId>,
	) -> Result<(), AccessError> {
		let mut inner = self.inner.write().await;
		let mut issue = inner
			.snapshots
			.issue(issue_id)
			.cloned()
			.ok_or(AccessError::NotFound {
				kind: ResourceKind::Issue,
				id: issue_id.into_inner(),
			})?;
		issue.assignee = assignee;
		inner.snapshots.insert_issue(issue);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn seeded_rows_are_loadable() {
		let store = MemoryStore::new();
		let project = ProjectSnapshot::new(ProjectId::generate(), UserId::generate());
		store.insert_project(project.clone()).await;

		assert_eq!(store.project(project.id).await.unwrap(), Some(project));
		assert_eq!(store.projects().await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn add_member_enforces_invariants_under_one_lock() {
		let store = MemoryStore::new();
		let owner = UserId::generate();
		let project = ProjectSnapshot::new(ProjectId::generate(), owner);
		store.insert_project(project.clone()).await;

		let err = store
			.add_member(project.id, owner, ProjectRole::Member)
			.await
			.unwrap_err();
		assert!(matches!(err, AccessError::Validation(_)));

		let user = UserId::generate();
		store
			.add_member(project.id, user, ProjectRole::Member)
			.await
			.unwrap();
		let err = store
			.add_member(project.id, user, ProjectRole::Admin)
			.await
			.unwrap_err();
		assert!(matches!(err, AccessError::Validation(_)));
	}

	#[tokio::test]
	async fn membership_writes_are_visible_on_next_read() {
		let store = MemoryStore::new();
		let project = ProjectSnapshot::new(ProjectId::generate(), UserId::generate());
		let user = UserId::generate();
		store.insert_project(project.clone()).await;

		store
			.add_member(project.id, user, ProjectRole::Viewer)
			.await
			.unwrap();
		let attrs = store.actor_attrs(user).await.unwrap();
		assert_eq!(attrs.role_in(project.id), Some(ProjectRole::Viewer));

		store
			.change_role(project.id, user, ProjectRole::Admin)
			.await
			.unwrap();
		let attrs = store.actor_attrs(user).await.unwrap();
		assert_eq!(attrs.role_in(project.id), Some(ProjectRole::Admin));

		store.remove_member(project.id, user).await.unwrap();
		let attrs = store.actor_attrs(user).await.unwrap();
		assert_eq!(attrs.role_in(project.id), None);
	}

	#[tokio::test]
	async fn set_assignee_updates_the_issue_row() {
		let store = MemoryStore::new();
		let project = ProjectSnapshot::new(ProjectId::generate(), UserId::generate());
		let issue = IssueSnapshot::new(IssueId::generate(), project.id, UserId::generate());
		let assignee = UserId::generate();
		store.insert_project(project).await;
		store.insert_issue(issue.clone()).await;

		store.set_assignee(issue.id, Some(assignee)).await.unwrap();
		let loaded = store.issue(issue.id).await.unwrap().unwrap();
		assert_eq!(loaded.assignee, Some(assignee));

		store.set_assignee(issue.id, None).await.unwrap();
		let loaded = store.issue(issue.id).await.unwrap().unwrap();
		assert_eq!(loaded.assignee, None);
	}
}
