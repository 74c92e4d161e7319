// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Effective role derivation.
//!
//! [`effective_role`] is the single total function every code path uses to
//! answer "what role does this actor hold on this project". Ownership is an
//! implicit super-role derived from the project snapshot, never enumerated as
//! a membership row, so nothing else in the codebase reads membership rows to
//! answer a role question.

use crate::snapshot::{ActorAttrs, ProjectSnapshot};
use crate::types::EffectiveRole;

/// Derives the actor's effective role on a project.
///
/// Total and pure: `Owner` if the actor owns the project, otherwise the
/// actor's stored membership role embedded into the lattice, otherwise
/// [`EffectiveRole::None`]. Absence of membership is a valid input, not an
/// error.
pub fn effective_role(project: &ProjectSnapshot, actor: &ActorAttrs) -> EffectiveRole {
	if actor.user_id == project.owner {
		return EffectiveRole::Owner;
	}

	match actor.role_in(project.id) {
		Some(role) => role.into(),
		None => EffectiveRole::None,
	}
}
