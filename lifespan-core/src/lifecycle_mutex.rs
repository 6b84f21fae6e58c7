// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The mutex every shared piece of lifecycle state is kept behind.
//!
//! `parking_lot` locks never poison, so lock sites don't carry a `Result`.

pub use parking_lot::{Mutex, MutexGuard};
