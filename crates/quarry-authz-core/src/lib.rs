// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization decision core for Quarry.
//!
//! Quarry organizes work as a hierarchy of projects, issues and comments.
//! This crate decides, for an immutable snapshot supplied by the caller,
//! whether an actor may perform an action on a resource, and which resources
//! are disclosed to the actor at all. It performs no I/O and holds no state:
//! every evaluation is a pure function over pre-loaded facts, so evaluations
//! can run fully in parallel.
//!
//! # The two-tier model
//!
//! Visibility and authorization are distinct questions with distinct
//! answers:
//!
//! 1. [`visibility`] decides whether a resource exists from the actor's
//!    point of view (owner or membership row on the owning project). An
//!    unreachable resource is "not found", never "forbidden", so existence is
//!    not leaked.
//! 2. [`engine::authorize`] decides whether a specific action on an
//!    already-visible resource is permitted, from the static
//!    [`policy::POLICY_TABLE`] and the actor's [`EffectiveRole`].
//!
//! # Example
//!
//! ```
//! use quarry_authz_core::{
//!     authorize, effective_role, reachable, Action, ActorAttrs, EffectiveRole,
//!     IssueId, IssueSnapshot, ProjectId, ProjectRole, ProjectSnapshot,
//!     Resource, SnapshotSet, UserId,
//! };
//!
//! let owner = UserId::generate();
//! let project = ProjectSnapshot::new(ProjectId::generate(), owner);
//! let issue = IssueSnapshot::new(IssueId::generate(), project.id, owner);
//!
//! let mut set = SnapshotSet::new();
//! set.insert_project(project.clone());
//! set.insert_issue(issue.clone());
//!
//! // A member can edit issue content but not change its status.
//! let bob = ActorAttrs::new(UserId::generate())
//!     .with_membership(project.id, ProjectRole::Member);
//! assert_eq!(effective_role(&project, &bob), EffectiveRole::Member);
//! assert!(reachable(&project, &bob));
//!
//! let edit = authorize(&set, &bob, Action::Update, Resource::Issue(&issue)).unwrap();
//! assert!(edit.is_allowed());
//! let triage = authorize(&set, &bob, Action::UpdateStatus, Resource::Issue(&issue)).unwrap();
//! assert!(!triage.is_allowed());
//! ```

pub mod engine;
pub mod error;
pub mod membership;
pub mod policy;
pub mod resolver;
pub mod role;
pub mod snapshot;
pub mod types;
pub mod visibility;

pub use engine::{authorize, Decision, DenyReason};
pub use error::{AuthzError, ValidationError};
pub use membership::{validate_assignee, MembershipSet};
pub use policy::{lookup, PolicyEntry, POLICY_TABLE};
pub use resolver::{owner_project, Resource};
pub use role::effective_role;
pub use snapshot::{
	ActorAttrs, CommentSnapshot, ContainmentGraph, IssueSnapshot, MembershipAttr, MembershipRow,
	ProjectSnapshot, SnapshotSet,
};
pub use types::{
	Action, CommentId, EffectiveRole, IssueId, IssuePriority, IssueStatus, ProjectId, ProjectRole,
	ResourceKind, UserId,
};
pub use visibility::{comment_reachable, issue_reachable, project_predicate, reachable};
