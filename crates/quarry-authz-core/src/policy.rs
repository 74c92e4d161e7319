// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The static policy table.
//!
//! One reviewable table maps every (resource kind, action) pair to its
//! minimum required role and whether the resource's author may act below
//! that floor. The engine consults nothing else, so every rule is visible
//! in one place instead of scattered across per-endpoint checks.
//!
//! Read rows use [`EffectiveRole::Viewer`]: the viewer role is read-only by
//! construction, and no entry grants a viewer any write. Status changes,
//! assignment and issue deletion affect triage workflow and are restricted
//! to admins and the owner; everyday content edits and comments are open to
//! any member, with an author carve-out on comments so members retain
//! control of their own words.

use crate::error::AuthzError;
use crate::types::{Action, EffectiveRole, ResourceKind};

/// A single row of the policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyEntry {
	pub kind: ResourceKind,
	pub action: Action,
	/// Minimum effective role required to perform the action.
	pub min_role: EffectiveRole,
	/// Whether the resource's author may act regardless of rank, as long as
	/// they hold at least [`EffectiveRole::Member`].
	pub author_override: bool,
}

const fn entry(
	kind: ResourceKind,
	action: Action,
	min_role: EffectiveRole,
	author_override: bool,
) -> PolicyEntry {
	PolicyEntry {
		kind,
		action,
		min_role,
		author_override,
	}
}

/// Every registered (resource kind, action) pair.
pub const POLICY_TABLE: &[PolicyEntry] = &[
	// Project
	entry(
		ResourceKind::Project,
		Action::Read,
		EffectiveRole::Viewer,
		false,
	),
	entry(
		ResourceKind::Project,
		Action::Update,
		EffectiveRole::Owner,
		false,
	),
	entry(
		ResourceKind::Project,
		Action::ManageMembers,
		EffectiveRole::Owner,
		false,
	),
	// Issue
	entry(
		ResourceKind::Issue,
		Action::Read,
		EffectiveRole::Viewer,
		false,
	),
	entry(
		ResourceKind::Issue,
		Action::Create,
		EffectiveRole::Member,
		false,
	),
	entry(
		ResourceKind::Issue,
		Action::Update,
		EffectiveRole::Member,
		false,
	),
	entry(
		ResourceKind::Issue,
		Action::UpdateStatus,
		EffectiveRole::Admin,
		false,
	),
	entry(
		ResourceKind::Issue,
		Action::Assign,
		EffectiveRole::Admin,
		false,
	),
	entry(
		ResourceKind::Issue,
		Action::Delete,
		EffectiveRole::Admin,
		false,
	),
	// Comment
	entry(
		ResourceKind::Comment,
		Action::Read,
		EffectiveRole::Viewer,
		false,
	),
	entry(
		ResourceKind::Comment,
		Action::Create,
		EffectiveRole::Member,
		false,
	),
	entry(
		ResourceKind::Comment,
		Action::Update,
		EffectiveRole::Member,
		true,
	),
	entry(
		ResourceKind::Comment,
		Action::Delete,
		EffectiveRole::Member,
		true,
	),
];

/// Looks up the policy entry for a (resource kind, action) pair.
///
/// An unregistered pair is a programming error surfaced as
/// [`AuthzError::PolicyNotRegistered`], never default-allow.
pub fn lookup(kind: ResourceKind, action: Action) -> Result<&'static PolicyEntry, AuthzError> {
	POLICY_TABLE
		.iter()
		.find(|e| e.kind == kind && e.action == action)
		.ok_or(AuthzError::PolicyNotRegistered { kind, action })
}
