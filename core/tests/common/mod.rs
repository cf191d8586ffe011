// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.

mod fixtures;
mod recorder;
mod temp_dir;

#[allow(unused_imports)]
pub use fixtures::{fixed_now, test_config, test_event_draft};
#[allow(unused_imports)]
pub use recorder::Recorder;
pub use temp_dir::TempState;
