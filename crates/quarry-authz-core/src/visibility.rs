// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Visibility filtering: which resources exist from an actor's point of view.
//!
//! Visibility is a coarser predicate than per-action authorization and is
//! evaluated first: a project is reachable iff the actor owns it or holds a
//! membership row, and an issue or comment is reachable iff its owning
//! project is. Resources outside the reachable set are not disclosed at all:
//! the boundary turns them into "not found", never "forbidden", so an
//! unauthorized caller cannot probe for existence.
//!
//! Once a resource is confirmed reachable, the [`engine`](crate::engine)
//! decides per-action permission and may legitimately say "forbidden". The
//! two outcomes stay distinct.

use crate::error::AuthzError;
use crate::resolver::{self, Resource};
use crate::role::effective_role;
use crate::snapshot::{ActorAttrs, CommentSnapshot, ContainmentGraph, IssueSnapshot, ProjectSnapshot};
use crate::types::EffectiveRole;

/// Returns true if the project is disclosed to the actor at all.
///
/// Equivalent to `effective_role(project, actor) != EffectiveRole::None`.
pub fn reachable(project: &ProjectSnapshot, actor: &ActorAttrs) -> bool {
	effective_role(project, actor) != EffectiveRole::None
}

/// The predicate used to restrict any project listing to reachable projects.
pub fn project_predicate<'a>(actor: &'a ActorAttrs) -> impl Fn(&ProjectSnapshot) -> bool + 'a {
	move |project| reachable(project, actor)
}

/// Lifted form: an issue is reachable iff its owning project is.
///
/// Resolution can hit a broken containment chain, which propagates as
/// [`AuthzError::DanglingReference`].
pub fn issue_reachable<G: ContainmentGraph + ?Sized>(
	graph: &G,
	issue: &IssueSnapshot,
	actor: &ActorAttrs,
) -> Result<bool, AuthzError> {
	let project = resolver::owner_project(graph, Resource::Issue(issue))?;
	Ok(reachable(project, actor))
}

/// Lifted form: a comment is reachable iff its owning project is.
pub fn comment_reachable<G: ContainmentGraph + ?Sized>(
	graph: &G,
	comment: &CommentSnapshot,
	actor: &ActorAttrs,
) -> Result<bool, AuthzError> {
	let project = resolver::owner_project(graph, Resource::Comment(comment))?;
	Ok(reachable(project, actor))
}
