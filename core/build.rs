// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

fn main() {
    // rebuild when a migration is added or edited, the SQL is embedded by `sqlx::migrate!`
    println!("cargo:rerun-if-changed=src/localdb/migrations");
}
