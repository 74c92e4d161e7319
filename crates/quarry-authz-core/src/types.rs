// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for authorization decisions.
//!
//! This module defines the foundational types used throughout the authz core:
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for different entity types
//!   ([`UserId`], [`ProjectId`], [`IssueId`], [`CommentId`]) preventing accidental mixing
//! - **Role enums**: The stored membership roles ([`ProjectRole`]) and the total
//!   effective-role lattice ([`EffectiveRole`]) used for rank comparisons
//! - **Resource/action enums**: What is being accessed ([`ResourceKind`]) and the
//!   operation attempted ([`Action`])
//! - **Issue workflow enums**: [`IssueStatus`] and [`IssuePriority`] carried by
//!   issue snapshots
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(ProjectId, "Unique identifier for a project.");
define_id_type!(IssueId, "Unique identifier for an issue.");
define_id_type!(CommentId, "Unique identifier for a comment.");

// =============================================================================
// Project Roles
// =============================================================================

/// Roles a stored membership row may carry.
///
/// Project ownership is deliberately not representable here: the owner is an
/// implicit fact on the project itself, never a membership row. Use
/// [`EffectiveRole`] when comparing ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
	/// Read-only access to the project and its contents.
	Viewer,
	/// Standard access: create issues and comments, edit issue content.
	Member,
	/// Triage access: change status, assign, delete issues.
	Admin,
}

impl ProjectRole {
	/// Returns all available project roles.
	pub fn all() -> &'static [ProjectRole] {
		&[ProjectRole::Viewer, ProjectRole::Member, ProjectRole::Admin]
	}
}

impl fmt::Display for ProjectRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProjectRole::Viewer => write!(f, "viewer"),
			ProjectRole::Member => write!(f, "member"),
			ProjectRole::Admin => write!(f, "admin"),
		}
	}
}

// =============================================================================
// Effective Roles
// =============================================================================

/// The total role lattice an actor can hold on a project.
///
/// Variants are declared in ascending order of privilege so the derived
/// [`Ord`] is the rank order: `None < Viewer < Member < Admin < Owner`.
/// [`EffectiveRole::None`] means the actor cannot reach the project at all.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveRole {
	/// Not the owner and no membership row: the project is unreachable.
	None,
	/// Read-only reachability.
	Viewer,
	/// Standard member access.
	Member,
	/// Triage and deletion access.
	Admin,
	/// The implicit super-role held by the project owner.
	Owner,
}

impl EffectiveRole {
	/// Returns all effective roles in ascending rank order.
	pub fn all() -> &'static [EffectiveRole] {
		&[
			EffectiveRole::None,
			EffectiveRole::Viewer,
			EffectiveRole::Member,
			EffectiveRole::Admin,
			EffectiveRole::Owner,
		]
	}

	/// Numeric rank used for "at least" comparisons.
	pub fn rank(self) -> u8 {
		self as u8
	}

	/// Returns true if this role has at least the permissions of the given role.
	pub fn at_least(self, other: EffectiveRole) -> bool {
		self >= other
	}
}

impl From<ProjectRole> for EffectiveRole {
	fn from(role: ProjectRole) -> Self {
		match role {
			ProjectRole::Viewer => EffectiveRole::Viewer,
			ProjectRole::Member => EffectiveRole::Member,
			ProjectRole::Admin => EffectiveRole::Admin,
		}
	}
}

impl fmt::Display for EffectiveRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			EffectiveRole::None => write!(f, "none"),
			EffectiveRole::Viewer => write!(f, "viewer"),
			EffectiveRole::Member => write!(f, "member"),
			EffectiveRole::Admin => write!(f, "admin"),
			EffectiveRole::Owner => write!(f, "owner"),
		}
	}
}

// =============================================================================
// Resources and Actions
// =============================================================================

/// Kinds of resources protected by the policy engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
	Project,
	Issue,
	Comment,
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ResourceKind::Project => write!(f, "project"),
			ResourceKind::Issue => write!(f, "issue"),
			ResourceKind::Comment => write!(f, "comment"),
		}
	}
}

/// Actions that can be performed on resources.
///
/// Write sub-kinds are distinct because they carry different role floors:
/// editing issue content is open to members while status changes and
/// assignment are admin operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	Read,
	Create,
	Update,
	UpdateStatus,
	Assign,
	Delete,
	ManageMembers,
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Action::Read => write!(f, "read"),
			Action::Create => write!(f, "create"),
			Action::Update => write!(f, "update"),
			Action::UpdateStatus => write!(f, "update_status"),
			Action::Assign => write!(f, "assign"),
			Action::Delete => write!(f, "delete"),
			Action::ManageMembers => write!(f, "manage_members"),
		}
	}
}

// =============================================================================
// Issue Workflow
// =============================================================================

/// Issue workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
	#[default]
	Open,
	InProgress,
	Closed,
}

impl fmt::Display for IssueStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			IssueStatus::Open => write!(f, "open"),
			IssueStatus::InProgress => write!(f, "in_progress"),
			IssueStatus::Closed => write!(f, "closed"),
		}
	}
}

/// Issue triage priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
	Low,
	#[default]
	Medium,
	High,
	Critical,
}

impl fmt::Display for IssuePriority {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			IssuePriority::Low => write!(f, "low"),
			IssuePriority::Medium => write!(f, "medium"),
			IssuePriority::High => write!(f, "high"),
			IssuePriority::Critical => write!(f, "critical"),
		}
	}
}
