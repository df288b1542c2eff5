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

use std::path::PathBuf;

use rst_shared::Toggle;

use crate::control_file::DISABLED_VALUE;
use crate::ControlFile;
use crate::ControlFileError;

/// Kernel switch of address space layout randomization.
pub const ASLR_CONTROL_FILE: &str = "/proc/sys/kernel/randomize_va_space";

/// Full randomization, it's what the kernel boots with.
const FULL_RANDOMIZATION: &str = "2";
/// Conservative randomization, reported as enabled but never written.
const CONSERVATIVE_RANDOMIZATION: &str = "1";

/// Address space layout randomization. The kernel always has it, so it's
/// always reported available.
#[derive(Clone, Debug)]
pub struct Aslr {
    control_file: ControlFile,
}

impl Aslr {
    pub fn new() -> Self {
        Self::with_path(ASLR_CONTROL_FILE)
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            control_file: ControlFile::new(path),
        }
    }

    pub fn control_file(&self) -> &ControlFile {
        &self.control_file
    }
}

impl Default for Aslr {
    fn default() -> Self {
        Self::new()
    }
}

impl Toggle for Aslr {
    type Error = ControlFileError;

    fn enable(&self) -> Result<(), Self::Error> {
        self.control_file.write_value(FULL_RANDOMIZATION)
    }

    fn disable(&self) -> Result<(), Self::Error> {
        self.control_file.write_value(DISABLED_VALUE)
    }

    fn enabled(&self) -> Result<bool, Self::Error> {
        self.control_file
            .read_state(&[CONSERVATIVE_RANDOMIZATION, FULL_RANDOMIZATION])
    }
}

#[cfg(test)]
mod tests {
    use rst_test_utils::control_file;
    use test_log::test;

    use super::*;

    #[test]
    fn enable_writes_full_randomization() {
        let (_dir, path) = control_file::create("randomize_va_space", "0\n");
        let aslr = Aslr::with_path(&path);

        aslr.enable().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "2");
        assert!(aslr.enabled().unwrap());
    }

    #[test]
    fn disable_writes_zero() {
        let (_dir, path) = control_file::create("randomize_va_space", "2\n");
        let aslr = Aslr::with_path(&path);

        aslr.disable().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
        assert!(aslr.disabled().unwrap());
    }

    #[test]
    fn conservative_randomization_is_enabled() {
        let (_dir, path) = control_file::create("randomize_va_space", "1\n");

        assert!(Aslr::with_path(&path).enabled().unwrap());
    }

    #[test]
    fn unknown_value_is_malformed() {
        let (_dir, path) = control_file::create("randomize_va_space", "3\n");

        assert!(matches!(
            Aslr::with_path(&path).enabled(),
            Err(ControlFileError::Malformed { .. })
        ));
    }

    #[test]
    fn always_available() {
        let (_dir, path) = control_file::missing("randomize_va_space");

        assert!(Aslr::with_path(&path).available());
    }

    #[test]
    fn enable_fails_on_missing_control_file() {
        let (_dir, path) = control_file::missing("randomize_va_space");
        let aslr = Aslr::with_path(&path);

        let error = aslr.enable().unwrap_err();

        assert!(matches!(error, ControlFileError::Write { .. }), "{error:?}");
        assert!(error.is_resource_unavailable());
        assert!(!path.exists());
    }
}
