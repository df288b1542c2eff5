/*
 * Copyright 2024 Fluence Labs Limited
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use tempfile::TempDir;

/// Creates a directory laid out like `/dev/cpu`: one `<cpu>/msr` file per
/// logical core, each filled with `register_space` zero bytes.
pub fn create(cores_count: u32, register_space: usize) -> TempDir {
    let dir = tempfile::tempdir().expect("creating a temporary directory");

    for core_id in 0..cores_count {
        let core_dir = dir.path().join(core_id.to_string());
        std::fs::create_dir(&core_dir).expect("creating a core directory");
        std::fs::write(core_dir.join("msr"), vec![0u8; register_space])
            .expect("creating an msr file");
    }

    dir
}
