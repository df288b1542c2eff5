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

use std::path::Path;
use std::path::PathBuf;

use eyre::eyre;
use serde::Deserialize;
use serde::Serialize;

use super::defaults::default_aslr_control_file;
use super::defaults::default_boosting_control_file;
use super::defaults::default_log_level;
use super::defaults::default_msr_dir;
use crate::*;

/// Profile as it's written: feature actions are free-form strings at the top level.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UnresolvedRSTConfig {
    pub c6: Option<String>,
    pub psicworkaround: Option<String>,
    pub boosting: Option<String>,
    pub aslr: Option<String>,
    #[serde(default)]
    pub logs: UnresolvedLogs,
    #[serde(default)]
    pub platform: UnresolvedPlatform,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UnresolvedLogs {
    #[serde(default = "default_log_level", alias = "log_level")]
    pub log_level: LogLevel,
}

impl Default for UnresolvedLogs {
    fn default() -> Self {
        UnresolvedLogs {
            log_level: default_log_level(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UnresolvedPlatform {
    #[serde(default = "default_msr_dir", alias = "msr_dir")]
    pub msr_dir: PathBuf,

    #[serde(default = "default_boosting_control_file", alias = "boosting_control_file")]
    pub boosting_control_file: PathBuf,

    #[serde(default = "default_aslr_control_file", alias = "aslr_control_file")]
    pub aslr_control_file: PathBuf,
}

impl Default for UnresolvedPlatform {
    fn default() -> Self {
        Self {
            msr_dir: default_msr_dir(),
            boosting_control_file: default_boosting_control_file(),
            aslr_control_file: default_aslr_control_file(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl UnresolvedRSTConfig {
    pub fn resolve(self, config_path: impl AsRef<Path>) -> eyre::Result<RSTConfig> {
        let config_dir = config_path.as_ref().parent().ok_or_else(|| {
            eyre!(
                "config resolver was provided with invalid config path: {}",
                config_path.as_ref().display()
            )
        })?;

        let profile = Profile {
            c6: resolve_action(self.c6),
            psic_workaround: resolve_action(self.psicworkaround),
            boosting: resolve_action(self.boosting),
            aslr: resolve_action(self.aslr),
        };

        let config = RSTConfig {
            profile,
            logs: self.logs.resolve(),
            platform: self.platform.resolve(config_dir),
        };
        Ok(config)
    }
}

fn resolve_action(value: Option<String>) -> ToggleAction {
    value
        .as_deref()
        .map(ToggleAction::from_str_lossy)
        .unwrap_or_default()
}

impl LogLevel {
    pub fn to_tracing_filter(&self) -> tracing_subscriber::filter::LevelFilter {
        use tracing_subscriber::filter::LevelFilter;

        match self {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl UnresolvedLogs {
    pub fn resolve(self) -> Logs {
        Logs {
            log_level: self.log_level.to_tracing_filter(),
        }
    }
}

impl UnresolvedPlatform {
    /// Relative paths are taken relative to the config directory.
    pub fn resolve(self, config_dir: &Path) -> Platform {
        Platform {
            msr_dir: config_dir.join(self.msr_dir),
            boosting_control_file: config_dir.join(self.boosting_control_file),
            aslr_control_file: config_dir.join(self.aslr_control_file),
        }
    }
}
