// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use tempfile::TempDir;

/// A temporary state directory, removed on drop.
#[derive(Debug)]
pub struct TempState {
    _dir: TempDir,
    /// State directory for the database file.
    pub state_dir: PathBuf,
}

impl TempState {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state_dir = dir.path().join("state");
        Self {
            _dir: dir,
            state_dir,
        }
    }
}
