// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Keeping the store in step with the backend.
//!
//! Two components share one [`SharedStore`](crate::state::SharedStore), one
//! [`StateVersionRegistry`](crate::state::StateVersionRegistry) and one
//! [`Session`]:
//!
//! - [`SyncReconciler`] pulls room snapshots, on demand or from a background
//!   poll loop started with [`SyncReconciler::spawn`];
//! - [`RemoteMutationClient`] pushes optimistic device changes.
//!
//! Both report through the [`EventBus`].
//!
//! # Per-device state machine
//!
//! ```text
//! Synced(s) --change--> PendingLocal(s') --snapshot >= s'--> Synced(s')
//!                            |
//!                            +--send failed--> rollback --> Synced(s)
//! ```

#[cfg(test)]
mod fake;
mod mutation;
mod poll;
mod reconciler;

pub use mutation::RemoteMutationClient;
pub use poll::{PollConfig, PollHandle};
pub use reconciler::SyncReconciler;

use crate::auth::Session;
use crate::event::{EventBus, SyncEvent};

/// Clears the session after the backend rejected it.
///
/// `SessionExpired` is published once, by whoever clears the token first.
pub(crate) fn expire_session(session: &Session, events: &EventBus, error: &crate::Error) {
    if session.clear() {
        tracing::warn!(error = %error, "Backend rejected the session");
        events.publish(SyncEvent::SessionExpired);
    } else {
        tracing::debug!(error = %error, "Authentication failure without a stored token");
    }
}
