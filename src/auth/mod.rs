// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session credentials.
//!
//! The [`Session`] holds the bearer token obtained at login for as long as
//! the process runs. Persisting the token across restarts is left to the
//! embedding application: read it back and pass it to
//! [`Session::with_token`].

mod session;

pub use session::{AuthToken, Session};
