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

/// cpufreq switch of processor frequency boosting.
pub const BOOSTING_CONTROL_FILE: &str = "/sys/devices/system/cpu/cpufreq/boost";

const ENABLED_VALUE: &str = "1";

/// Processor boosting, available only when the cpufreq driver exposes the switch.
#[derive(Clone, Debug)]
pub struct Boosting {
    control_file: ControlFile,
}

impl Boosting {
    pub fn new() -> Self {
        Self::with_path(BOOSTING_CONTROL_FILE)
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

impl Default for Boosting {
    fn default() -> Self {
        Self::new()
    }
}

impl Toggle for Boosting {
    type Error = ControlFileError;

    fn enable(&self) -> Result<(), Self::Error> {
        self.control_file.write_value(ENABLED_VALUE)
    }

    fn disable(&self) -> Result<(), Self::Error> {
        self.control_file.write_value(DISABLED_VALUE)
    }

    fn enabled(&self) -> Result<bool, Self::Error> {
        self.control_file.read_state(&[ENABLED_VALUE])
    }

    fn available(&self) -> bool {
        self.control_file.exists()
    }
}
