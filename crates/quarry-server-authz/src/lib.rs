// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server-side access boundary for Quarry.
//!
//! This crate sits between a snapshot store and the pure decision core in
//! `quarry-authz-core`. It loads whatever rows an evaluation needs, applies
//! the visibility gate first (unreachable resources are `NotFound`; their
//! existence is never disclosed), then asks the policy engine about the
//! specific action (`Forbidden` carries the structured deny reason). It also
//! hosts the membership mutation hooks, gated on the owner-only
//! `ManageMembers` action and validated against the store invariants.
//!
//! Bring your own store by implementing [`SnapshotProvider`] (reads) and
//! [`MembershipStore`] (writes), or use the bundled [`MemoryStore`].

pub mod error;
pub mod memory;
pub mod provider;
pub mod service;

pub use error::{AccessError, ProviderError};
pub use memory::MemoryStore;
pub use provider::{MembershipStore, SnapshotProvider};
pub use service::AccessService;
