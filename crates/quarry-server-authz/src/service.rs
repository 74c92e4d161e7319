// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The access boundary: visibility gating, then per-action authorization.
//!
//! [`AccessService`] wires the pure decision core to a snapshot store and
//! resolves the propagation rules the callers rely on:
//!
//! - Direct fetch of an unreachable resource yields
//!   [`AccessError::NotFound`], indistinguishable from a genuinely absent
//!   row. Listings are filtered, never erroring, so a non-member sees an
//!   empty list rather than a refusal.
//! - Once a resource is reachable, action checks go through
//!   [`quarry_authz_core::authorize`] and denials surface as
//!   [`AccessError::Forbidden`] with the structured reason.
//! - Membership mutations require the `ManageMembers` check to pass first;
//!   the store then enforces the row invariants.

use crate::error::AccessError;
use crate::provider::{MembershipStore, SnapshotProvider};
use quarry_authz_core::{
	authorize, reachable, validate_assignee, Action, ActorAttrs, CommentId, CommentSnapshot,
	Decision, IssueId, IssueSnapshot, MembershipSet, ProjectId, ProjectRole, ProjectSnapshot,
	Resource, ResourceKind, SnapshotSet, UserId,
};
use tracing::instrument;

/// The access boundary over a snapshot store.
pub struct AccessService<P> {
	provider: P,
}

impl<P> AccessService<P> {
	/// Creates a service over the given store.
	pub fn new(provider: P) -> Self {
		Self { provider }
	}

	/// The underlying store.
	pub fn provider(&self) -> &P {
		&self.provider
	}
}

impl<P: SnapshotProvider> AccessService<P> {
	/// Fetches a project by id for an actor.
	///
	/// Unreachable and absent are the same `NotFound` from the outside.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, project = %id))]
	pub async fn fetch_project(
		&self,
		actor: UserId,
		id: ProjectId,
	) -> Result<ProjectSnapshot, AccessError> {
		let attrs = self.provider.actor_attrs(actor).await?;
		self.reachable_project(&attrs, id).await
	}

	/// Fetches an issue by id for an actor.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, issue = %id))]
	pub async fn fetch_issue(&self, actor: UserId, id: IssueId) -> Result<IssueSnapshot, AccessError> {
		let attrs = self.provider.actor_attrs(actor).await?;
		let (issue, _) = self.reachable_issue(&attrs, id).await?;
		Ok(issue)
	}

	/// Fetches a comment by id for an actor.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, comment = %id))]
	pub async fn fetch_comment(
		&self,
		actor: UserId,
		id: CommentId,
	) -> Result<CommentSnapshot, AccessError> {
		let attrs = self.provider.actor_attrs(actor).await?;
		let (comment, _, _) = self.reachable_comment(&attrs, id).await?;
		Ok(comment)
	}

	/// Lists the projects reachable by the actor. Never errors on emptiness.
	#[instrument(level = "debug", skip(self), fields(actor = %actor))]
	pub async fn list_projects(&self, actor: UserId) -> Result<Vec<ProjectSnapshot>, AccessError> {
		let attrs = self.provider.actor_attrs(actor).await?;
		let projects = self.provider.projects().await?;
		Ok(
			projects
				.into_iter()
				.filter(|project| reachable(project, &attrs))
				.collect(),
		)
	}

	/// Lists the issues of a reachable project.
	///
	/// The project itself is a direct fetch: unreachable means `NotFound`.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, project = %project_id))]
	pub async fn list_issues(
		&self,
		actor: UserId,
		project_id: ProjectId,
	) -> Result<Vec<IssueSnapshot>, AccessError> {
		self.fetch_project(actor, project_id).await?;
		Ok(self.provider.project_issues(project_id).await?)
	}

	/// Lists the comments of a reachable issue.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, issue = %issue_id))]
	pub async fn list_comments(
		&self,
		actor: UserId,
		issue_id: IssueId,
	) -> Result<Vec<CommentSnapshot>, AccessError> {
		self.fetch_issue(actor, issue_id).await?;
		Ok(self.provider.issue_comments(issue_id).await?)
	}

	/// Checks an action on a project: `NotFound` if unreachable, then the
	/// policy engine.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, action = ?action, project = %id))]
	pub async fn authorize_project(
		&self,
		actor: UserId,
		action: Action,
		id: ProjectId,
	) -> Result<(), AccessError> {
		let attrs = self.provider.actor_attrs(actor).await?;
		let project = self.reachable_project(&attrs, id).await?;

		// A project resolves to itself, so the graph can stay empty.
		let set = SnapshotSet::new();
		decide(authorize(&set, &attrs, action, Resource::Project(&project))?)
	}

	/// Checks an action on an issue.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, action = ?action, issue = %id))]
	pub async fn authorize_issue(
		&self,
		actor: UserId,
		action: Action,
		id: IssueId,
	) -> Result<(), AccessError> {
		let attrs = self.provider.actor_attrs(actor).await?;
		let (issue, project) = self.reachable_issue(&attrs, id).await?;

		let mut set = SnapshotSet::new();
		set.insert_project(project);
		decide(authorize(&set, &attrs, action, Resource::Issue(&issue))?)
	}

	/// Checks an action on a comment.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, action = ?action, comment = %id))]
	pub async fn authorize_comment(
		&self,
		actor: UserId,
		action: Action,
		id: CommentId,
	) -> Result<(), AccessError> {
		let attrs = self.provider.actor_attrs(actor).await?;
		let (comment, issue, project) = self.reachable_comment(&attrs, id).await?;

		let mut set = SnapshotSet::new();
		set.insert_project(project);
		set.insert_issue(issue);
		decide(authorize(&set, &attrs, action, Resource::Comment(&comment))?)
	}

	/// Loads a project and applies the visibility gate.
	async fn reachable_project(
		&self,
		attrs: &ActorAttrs,
		id: ProjectId,
	) -> Result<ProjectSnapshot, AccessError> {
		let project = self
			.provider
			.project(id)
			.await?
			.ok_or(AccessError::NotFound {
				kind: ResourceKind::Project,
				id: id.into_inner(),
			})?;
		if !reachable(&project, attrs) {
			return Err(AccessError::NotFound {
				kind: ResourceKind::Project,
				id: id.into_inner(),
			});
		}
		Ok(project)
	}

	/// Loads an issue and its project, applying the visibility gate.
	///
	/// A missing project under an existing issue is an integrity fault, not
	/// a `NotFound`.
	async fn reachable_issue(
		&self,
		attrs: &ActorAttrs,
		id: IssueId,
	) -> Result<(IssueSnapshot, ProjectSnapshot), AccessError> {
		let issue = self.provider.issue(id).await?.ok_or(AccessError::NotFound {
			kind: ResourceKind::Issue,
			id: id.into_inner(),
		})?;
		let project = self
			.provider
			.project(issue.project_id)
			.await?
			.ok_or_else(|| dangling(ResourceKind::Issue, issue.id.into_inner(), issue.project_id))?;
		if !reachable(&project, attrs) {
			return Err(AccessError::NotFound {
				kind: ResourceKind::Issue,
				id: id.into_inner(),
			});
		}
		Ok((issue, project))
	}

	/// Loads a comment with its issue and project, applying the gate.
	async fn reachable_comment(
		&self,
		attrs: &ActorAttrs,
		id: CommentId,
	) -> Result<(CommentSnapshot, IssueSnapshot, ProjectSnapshot), AccessError> {
		let comment = self
			.provider
			.comment(id)
			.await?
			.ok_or(AccessError::NotFound {
				kind: ResourceKind::Comment,
				id: id.into_inner(),
			})?;
		let issue = self
			.provider
			.issue(comment.issue_id)
			.await?
			.ok_or_else(|| {
				dangling_issue(ResourceKind::Comment, comment.id.into_inner(), comment.issue_id)
			})?;
		let project = self
			.provider
			.project(issue.project_id)
			.await?
			.ok_or_else(|| dangling(ResourceKind::Issue, issue.id.into_inner(), issue.project_id))?;
		if !reachable(&project, attrs) {
			return Err(AccessError::NotFound {
				kind: ResourceKind::Comment,
				id: id.into_inner(),
			});
		}
		Ok((comment, issue, project))
	}
}

impl<P: SnapshotProvider + MembershipStore> AccessService<P> {
	/// Adds a member to a project. Owner-only.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, project = %project_id, user = %user_id))]
	pub async fn add_member(
		&self,
		actor: UserId,
		project_id: ProjectId,
		user_id: UserId,
		role: ProjectRole,
	) -> Result<(), AccessError> {
		self
			.authorize_project(actor, Action::ManageMembers, project_id)
			.await?;
		self.provider.add_member(project_id, user_id, role).await
	}

	/// Removes a member from a project. Owner-only.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, project = %project_id, user = %user_id))]
	pub async fn remove_member(
		&self,
		actor: UserId,
		project_id: ProjectId,
		user_id: UserId,
	) -> Result<(), AccessError> {
		self
			.authorize_project(actor, Action::ManageMembers, project_id)
			.await?;
		self.provider.remove_member(project_id, user_id).await
	}

	/// Changes a member's role. Owner-only.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, project = %project_id, user = %user_id))]
	pub async fn change_role(
		&self,
		actor: UserId,
		project_id: ProjectId,
		user_id: UserId,
		new_role: ProjectRole,
	) -> Result<(), AccessError> {
		self
			.authorize_project(actor, Action::ManageMembers, project_id)
			.await?;
		self
			.provider
			.change_role(project_id, user_id, new_role)
			.await
	}

	/// Assigns or unassigns an issue. Admin-or-owner, and the assignee must
	/// be a member of the project at assignment time.
	#[instrument(level = "debug", skip(self), fields(actor = %actor, issue = %issue_id))]
	pub async fn assign_issue(
		&self,
		actor: UserId,
		issue_id: IssueId,
		assignee: Option<UserId>,
	) -> Result<(), AccessError> {
		self.authorize_issue(actor, Action::Assign, issue_id).await?;

		if let Some(assignee) = assignee {
			let attrs = self.provider.actor_attrs(actor).await?;
			let (_, project) = self.reachable_issue(&attrs, issue_id).await?;
			let rows = self.provider.project_memberships(project.id).await?;
			let members = MembershipSet::from_rows(rows);
			validate_assignee(&project, &members, assignee)
				.map_err(AccessError::Validation)?;
		}

		self.provider.set_assignee(issue_id, assignee).await
	}
}

fn decide(decision: Decision) -> Result<(), AccessError> {
	match decision {
		Decision::Allow => Ok(()),
		Decision::Deny { reason } => Err(AccessError::Forbidden { reason }),
	}
}

fn dangling(kind: ResourceKind, id: uuid::Uuid, missing_id: ProjectId) -> AccessError {
	AccessError::Integrity(quarry_authz_core::AuthzError::DanglingReference {
		kind,
		id,
		missing: ResourceKind::Project,
		missing_id: missing_id.into_inner(),
	})
}

fn dangling_issue(kind: ResourceKind, id: uuid::Uuid, missing_id: IssueId) -> AccessError {
	AccessError::Integrity(quarry_authz_core::AuthzError::DanglingReference {
		kind,
		id,
		missing: ResourceKind::Issue,
		missing_id: missing_id.into_inner(),
	})
}
