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

use config::Config;
use config::Environment;
use config::File;
use config::FileFormat;
use config::Map;
use eyre::Context;

use crate::unresolved_config::UnresolvedRSTConfig;
use crate::RSTConfig;

pub fn load_config(path: &str) -> eyre::Result<RSTConfig> {
    load_config_with_env(path, None)
}

/// Sections are separated by a double underscore in variable names,
/// e.g. \`RST_PLATFORM__MSR_DIR\` sets \`[platform] msr-dir\`.
/// \`env\` replaces the process environment when given.
pub(crate) fn load_config_with_env(
    path: &str,
    env: Option<Map<String, String>>,
) -> eyre::Result<RSTConfig> {
    let config_source = File::with_name(path)
        .required(true)
        .format(FileFormat::Toml);
    let environment_source = Environment::with_prefix("RST")
        .prefix_separator("_")
        .separator("__")
        .source(env);
    let config = Config::builder()
        .add_source(environment_source)
        .add_source(config_source)
        .build()
        .with_context(|| format!("Failed to load config from {path}"))?;

    let config: UnresolvedRSTConfig = config
        .try_deserialize()
        .with_context(|| format!("Failed to parse config at {path}"))?;
    config.resolve(path)
}
