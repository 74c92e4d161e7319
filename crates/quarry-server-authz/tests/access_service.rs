// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end tests of the access boundary over the in-memory store.

use quarry_authz_core::{
	Action, CommentId, CommentSnapshot, EffectiveRole, IssueId, IssueSnapshot, ProjectId,
	ProjectRole, ProjectSnapshot, ValidationError,
};
use quarry_server_authz::{AccessError, AccessService, MemoryStore};
use quarry_authz_core::{DenyReason, UserId};

struct World {
	service: AccessService<MemoryStore>,
	alice: UserId, // owner
	bob: UserId,   // member
	project_id: ProjectId,
	issue_id: IssueId,
	comment_id: CommentId,
}

/// Project owned by Alice with Bob as a member; one issue reported by Bob
/// with one comment authored by Bob.
async fn world() -> World {
	let alice = UserId::generate();
	let bob = UserId::generate();
	let project = ProjectSnapshot::new(ProjectId::generate(), alice);
	let issue = IssueSnapshot::new(IssueId::generate(), project.id, bob);
	let comment = CommentSnapshot::new(CommentId::generate(), issue.id, bob);

	let store = MemoryStore::new();
	store.insert_project(project.clone()).await;
	store.insert_issue(issue.clone()).await;
	store.insert_comment(comment.clone()).await;

	let service = AccessService::new(store);
	service
		.add_member(alice, project.id, bob, ProjectRole::Member)
		.await
		.unwrap();

	World {
		service,
		alice,
		bob,
		project_id: project.id,
		issue_id: issue.id,
		comment_id: comment.id,
	}
}

mod triage {
	use super::*;

	#[tokio::test]
	async fn member_cannot_change_status_owner_can() {
		let w = world().await;

		let err = w
			.service
			.authorize_issue(w.bob, Action::UpdateStatus, w.issue_id)
			.await
			.unwrap_err();
		assert_eq!(
			err,
			AccessError::Forbidden {
				reason: DenyReason::InsufficientRole {
					have: EffectiveRole::Member,
					need: EffectiveRole::Admin,
				},
			}
		);
		assert_eq!(err.status_hint(), 403);

		w.service
			.authorize_issue(w.alice, Action::UpdateStatus, w.issue_id)
			.await
			.unwrap();
	}

	#[tokio::test]
	async fn member_may_edit_issue_content() {
		let w = world().await;
		w.service
			.authorize_issue(w.bob, Action::Update, w.issue_id)
			.await
			.unwrap();
	}

	#[tokio::test]
	async fn promoted_admin_may_triage() {
		let w = world().await;
		w.service
			.change_role(w.alice, w.project_id, w.bob, ProjectRole::Admin)
			.await
			.unwrap();
		w.service
			.authorize_issue(w.bob, Action::UpdateStatus, w.issue_id)
			.await
			.unwrap();
	}
}

mod existence_hiding {
	use super::*;

	#[tokio::test]
	async fn outsider_gets_not_found_not_forbidden() {
		let w = world().await;
		let carol = UserId::generate();

		let err = w.service.fetch_project(carol, w.project_id).await.unwrap_err();
		assert!(matches!(err, AccessError::NotFound { .. }));
		assert_eq!(err.status_hint(), 404);

		let err = w.service.fetch_issue(carol, w.issue_id).await.unwrap_err();
		assert!(matches!(err, AccessError::NotFound { .. }));

		let err = w.service.fetch_comment(carol, w.comment_id).await.unwrap_err();
		assert!(matches!(err, AccessError::NotFound { .. }));
	}

	#[tokio::test]
	async fn outsider_sees_empty_listing_not_an_error() {
		let w = world().await;
		let carol = UserId::generate();

		let projects = w.service.list_projects(carol).await.unwrap();
		assert!(projects.is_empty());
	}

	#[tokio::test]
	async fn member_and_owner_see_the_project() {
		let w = world().await;

		for actor in [w.alice, w.bob] {
			let projects = w.service.list_projects(actor).await.unwrap();
			assert_eq!(projects.len(), 1);
			w.service.fetch_project(actor, w.project_id).await.unwrap();
		}
	}

	#[tokio::test]
	async fn reachable_viewer_sees_but_cannot_write() {
		let w = world().await;
		let viewer = UserId::generate();
		w.service
			.add_member(w.alice, w.project_id, viewer, ProjectRole::Viewer)
			.await
			.unwrap();

		w.service.fetch_project(viewer, w.project_id).await.unwrap();
		let issues = w.service.list_issues(viewer, w.project_id).await.unwrap();
		assert_eq!(issues.len(), 1);

		let err = w
			.service
			.authorize_issue(viewer, Action::Update, w.issue_id)
			.await
			.unwrap_err();
		assert!(matches!(err, AccessError::Forbidden { .. }));
	}
}

mod author_override {
	use super::*;

	#[tokio::test]
	async fn member_author_may_edit_own_comment() {
		let w = world().await;
		w.service
			.authorize_comment(w.bob, Action::Update, w.comment_id)
			.await
			.unwrap();
		w.service
			.authorize_comment(w.bob, Action::Delete, w.comment_id)
			.await
			.unwrap();
	}

	#[tokio::test]
	async fn demoted_viewer_author_is_denied() {
		// Dana authored as a member, then was demoted to viewer.
		let w = world().await;
		w.service
			.change_role(w.alice, w.project_id, w.bob, ProjectRole::Viewer)
			.await
			.unwrap();

		let err = w
			.service
			.authorize_comment(w.bob, Action::Update, w.comment_id)
			.await
			.unwrap_err();
		assert_eq!(
			err,
			AccessError::Forbidden {
				reason: DenyReason::InsufficientRole {
					have: EffectiveRole::Viewer,
					need: EffectiveRole::Member,
				},
			}
		);
	}
}

mod membership {
	use super::*;

	#[tokio::test]
	async fn owner_cannot_be_added_as_member() {
		let w = world().await;
		let err = w
			.service
			.add_member(w.alice, w.project_id, w.alice, ProjectRole::Admin)
			.await
			.unwrap_err();
		assert_eq!(
			err,
			AccessError::Validation(ValidationError::OwnerCannotBeMember {
				project_id: w.project_id,
				user_id: w.alice,
			})
		);
		assert_eq!(err.status_hint(), 422);
	}

	#[tokio::test]
	async fn duplicate_membership_is_rejected() {
		let w = world().await;
		let err = w
			.service
			.add_member(w.alice, w.project_id, w.bob, ProjectRole::Viewer)
			.await
			.unwrap_err();
		assert_eq!(
			err,
			AccessError::Validation(ValidationError::DuplicateMembership {
				project_id: w.project_id,
				user_id: w.bob,
			})
		);
	}

	#[tokio::test]
	async fn non_owner_cannot_manage_members() {
		let w = world().await;
		let dave = UserId::generate();

		// Bob is a member, not the owner.
		let err = w
			.service
			.add_member(w.bob, w.project_id, dave, ProjectRole::Member)
			.await
			.unwrap_err();
		assert!(matches!(err, AccessError::Forbidden { .. }));

		// Outsiders do not even learn the project exists.
		let err = w
			.service
			.add_member(dave, w.project_id, dave, ProjectRole::Member)
			.await
			.unwrap_err();
		assert!(matches!(err, AccessError::NotFound { .. }));
	}

	#[tokio::test]
	async fn removed_member_loses_reachability() {
		let w = world().await;
		w.service
			.remove_member(w.alice, w.project_id, w.bob)
			.await
			.unwrap();

		let err = w.service.fetch_project(w.bob, w.project_id).await.unwrap_err();
		assert!(matches!(err, AccessError::NotFound { .. }));
	}

	#[tokio::test]
	async fn remove_unknown_member_is_a_validation_error() {
		let w = world().await;
		let stranger = UserId::generate();
		let err = w
			.service
			.remove_member(w.alice, w.project_id, stranger)
			.await
			.unwrap_err();
		assert!(matches!(
			err,
			AccessError::Validation(ValidationError::NoSuchMembership { .. })
		));
	}
}

mod assignment {
	use super::*;

	#[tokio::test]
	async fn owner_assigns_to_member() {
		let w = world().await;
		w.service
			.assign_issue(w.alice, w.issue_id, Some(w.bob))
			.await
			.unwrap();

		let issue = w.service.fetch_issue(w.alice, w.issue_id).await.unwrap();
		assert_eq!(issue.assignee, Some(w.bob));
	}

	#[tokio::test]
	async fn assignee_must_be_a_member() {
		let w = world().await;
		let outsider = UserId::generate();
		let err = w
			.service
			.assign_issue(w.alice, w.issue_id, Some(outsider))
			.await
			.unwrap_err();
		assert_eq!(
			err,
			AccessError::Validation(ValidationError::AssigneeNotMember {
				project_id: w.project_id,
				user_id: outsider,
			})
		);
	}

	#[tokio::test]
	async fn member_cannot_assign() {
		let w = world().await;
		let err = w
			.service
			.assign_issue(w.bob, w.issue_id, Some(w.bob))
			.await
			.unwrap_err();
		assert!(matches!(err, AccessError::Forbidden { .. }));
	}

	#[tokio::test]
	async fn unassign_clears_the_field() {
		let w = world().await;
		w.service
			.assign_issue(w.alice, w.issue_id, Some(w.bob))
			.await
			.unwrap();
		w.service.assign_issue(w.alice, w.issue_id, None).await.unwrap();

		let issue = w.service.fetch_issue(w.alice, w.issue_id).await.unwrap();
		assert_eq!(issue.assignee, None);
	}

	#[tokio::test]
	async fn demotion_does_not_clear_existing_assignment() {
		// The membership check runs at assignment time, never retroactively.
		let w = world().await;
		w.service
			.assign_issue(w.alice, w.issue_id, Some(w.bob))
			.await
			.unwrap();
		w.service
			.remove_member(w.alice, w.project_id, w.bob)
			.await
			.unwrap();

		let issue = w.service.fetch_issue(w.alice, w.issue_id).await.unwrap();
		assert_eq!(issue.assignee, Some(w.bob));
	}
}

mod integrity {
	use super::*;

	#[tokio::test]
	async fn orphaned_issue_surfaces_as_integrity_fault() {
		let w = world().await;
		w.service.provider().remove_project(w.project_id).await;

		let err = w.service.fetch_issue(w.alice, w.issue_id).await.unwrap_err();
		assert!(matches!(err, AccessError::Integrity(_)));
		assert_eq!(err.status_hint(), 500);
	}
}
