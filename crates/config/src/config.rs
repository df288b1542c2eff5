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

use crate::defaults::default_aslr_control_file;
use crate::defaults::default_boosting_control_file;
use crate::defaults::default_log_level;
use crate::defaults::default_msr_dir;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RSTConfig {
    pub profile: Profile,
    pub logs: Logs,
    pub platform: Platform,
}

/// What to do with each feature, in the order they are applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Profile {
    pub c6: ToggleAction,
    pub psic_workaround: ToggleAction,
    pub boosting: ToggleAction,
    pub aslr: ToggleAction,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ToggleAction {
    Enable,
    Disable,
    /// Leave the feature as it is.
    #[default]
    Keep,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Logs {
    pub log_level: tracing_subscriber::filter::LevelFilter,
}

/// Where the kernel exposes the controlled features.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Platform {
    pub msr_dir: PathBuf,
    pub boosting_control_file: PathBuf,
    pub aslr_control_file: PathBuf,
}

impl ToggleAction {
    /// "enable" and "disable" in any case, everything else keeps the feature.
    pub fn from_str_lossy(value: &str) -> Self {
        if value.eq_ignore_ascii_case("enable") {
            Self::Enable
        } else if value.eq_ignore_ascii_case("disable") {
            Self::Disable
        } else {
            Self::Keep
        }
    }

    /// Resolves a pair of command line flags, disable takes precedence.
    pub fn from_flags(enable: bool, disable: bool) -> Self {
        match (enable, disable) {
            (_, true) => Self::Disable,
            (true, false) => Self::Enable,
            (false, false) => Self::Keep,
        }
    }
}

impl Default for Logs {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_tracing_filter(),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self {
            msr_dir: default_msr_dir(),
            boosting_control_file: default_boosting_control_file(),
            aslr_control_file: default_aslr_control_file(),
        }
    }
}
