// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource resolution along the containment chain.
//!
//! Every issue and comment belongs to exactly one project via the fixed chain
//! Comment → Issue → Project. [`owner_project`] walks that chain; a broken
//! link is a data-integrity fault surfaced as
//! [`AuthzError::DanglingReference`], never silently defaulted.

use crate::error::AuthzError;
use crate::snapshot::{CommentSnapshot, ContainmentGraph, IssueSnapshot, ProjectSnapshot};
use crate::types::ResourceKind;
use uuid::Uuid;

/// A reference to any addressable resource.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
	Project(&'a ProjectSnapshot),
	Issue(&'a IssueSnapshot),
	Comment(&'a CommentSnapshot),
}

impl<'a> Resource<'a> {
	/// The kind of this resource.
	pub fn kind(&self) -> ResourceKind {
		match self {
			Resource::Project(_) => ResourceKind::Project,
			Resource::Issue(_) => ResourceKind::Issue,
			Resource::Comment(_) => ResourceKind::Comment,
		}
	}

	/// The raw id of this resource.
	pub fn id(&self) -> Uuid {
		match self {
			Resource::Project(p) => p.id.into_inner(),
			Resource::Issue(i) => i.id.into_inner(),
			Resource::Comment(c) => c.id.into_inner(),
		}
	}

	/// The author field eligible for ownership override, if this resource
	/// kind has one. Only comments carry an author carve-out.
	pub fn override_author(&self) -> Option<crate::types::UserId> {
		match self {
			Resource::Comment(c) => Some(c.author),
			Resource::Project(_) | Resource::Issue(_) => None,
		}
	}
}

/// Resolves a resource to its owning project.
///
/// For a comment this walks via its issue; for an issue it resolves directly;
/// a project is its own owner. Fails with [`AuthzError::DanglingReference`]
/// when the chain is broken.
pub fn owner_project<'a, G: ContainmentGraph + ?Sized>(
	graph: &'a G,
	resource: Resource<'a>,
) -> Result<&'a ProjectSnapshot, AuthzError> {
	match resource {
		Resource::Project(project) => Ok(project),
		Resource::Issue(issue) => project_of_issue(graph, issue),
		Resource::Comment(comment) => {
			let issue =
				graph
					.issue(comment.issue_id)
					.ok_or_else(|| AuthzError::DanglingReference {
						kind: ResourceKind::Comment,
						id: comment.id.into_inner(),
						missing: ResourceKind::Issue,
						missing_id: comment.issue_id.into_inner(),
					})?;
			project_of_issue(graph, issue)
		}
	}
}

fn project_of_issue<'a, G: ContainmentGraph + ?Sized>(
	graph: &'a G,
	issue: &IssueSnapshot,
) -> Result<&'a ProjectSnapshot, AuthzError> {
	graph
		.project(issue.project_id)
		.ok_or_else(|| AuthzError::DanglingReference {
			kind: ResourceKind::Issue,
			id: issue.id.into_inner(),
			missing: ResourceKind::Project,
			missing_id: issue.project_id.into_inner(),
		})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::snapshot::SnapshotSet;
	use crate::types::{CommentId, IssueId, ProjectId, UserId};

	fn seeded_chain() -> (SnapshotSet, ProjectSnapshot, IssueSnapshot, CommentSnapshot) {
		let project = ProjectSnapshot::new(ProjectId::generate(), UserId::generate());
		let issue = IssueSnapshot::new(IssueId::generate(), project.id, UserId::generate());
		let comment = CommentSnapshot::new(CommentId::generate(), issue.id, UserId::generate());

		let mut set = SnapshotSet::new();
		set.insert_project(project.clone());
		set.insert_issue(issue.clone());
		set.insert_comment(comment.clone());
		(set, project, issue, comment)
	}

	#[test]
	fn project_resolves_to_itself() {
		let (set, project, _, _) = seeded_chain();
		let resolved = owner_project(&set, Resource::Project(&project)).unwrap();
		assert_eq!(resolved.id, project.id);
	}

	#[test]
	fn issue_resolves_to_its_project() {
		let (set, project, issue, _) = seeded_chain();
		let resolved = owner_project(&set, Resource::Issue(&issue)).unwrap();
		assert_eq!(resolved.id, project.id);
	}

	#[test]
	fn comment_resolves_via_its_issue() {
		let (set, project, _, comment) = seeded_chain();
		let resolved = owner_project(&set, Resource::Comment(&comment)).unwrap();
		assert_eq!(resolved.id, project.id);
	}

	#[test]
	fn issue_with_deleted_project_is_a_dangling_reference() {
		let (mut set, project, issue, _) = seeded_chain();
		set.remove_project(project.id);

		let err = owner_project(&set, Resource::Issue(&issue)).unwrap_err();
		assert_eq!(
			err,
			AuthzError::DanglingReference {
				kind: ResourceKind::Issue,
				id: issue.id.into_inner(),
				missing: ResourceKind::Project,
				missing_id: project.id.into_inner(),
			}
		);
	}

	#[test]
	fn comment_with_deleted_issue_is_a_dangling_reference() {
		let (mut set, _, issue, comment) = seeded_chain();
		set.remove_issue(issue.id);

		let err = owner_project(&set, Resource::Comment(&comment)).unwrap_err();
		assert_eq!(
			err,
			AuthzError::DanglingReference {
				kind: ResourceKind::Comment,
				id: comment.id.into_inner(),
				missing: ResourceKind::Issue,
				missing_id: issue.id.into_inner(),
			}
		);
	}

	#[test]
	fn only_comments_carry_an_override_author() {
		let (_, project, issue, comment) = seeded_chain();
		assert_eq!(Resource::Project(&project).override_author(), None);
		assert_eq!(Resource::Issue(&issue).override_author(), None);
		assert_eq!(
			Resource::Comment(&comment).override_author(),
			Some(comment.author)
		);
	}
}
