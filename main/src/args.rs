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

use clap::Parser;

use rst_config::Profile;
use rst_config::ToggleAction;

/// Toggles C6 C-state, processor boosting and ASLR on AMD Zen processors.
/// When both flags of a pair are given, the disabling one wins.
#[derive(Parser, Debug)]
#[command(version, about)]
pub(crate) struct Args {
    /// Profile to apply, the toggle flags are ignored when it's given
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<String>,

    /// Enable C6 C-state
    #[arg(long)]
    enable_c6: bool,

    /// Disable C6 C-state
    #[arg(long)]
    disable_c6: bool,

    /// Enable Power Supply Idle Control workaround
    #[arg(long)]
    enable_psicworkaround: bool,

    /// Disable Power Supply Idle Control workaround
    #[arg(long)]
    disable_psicworkaround: bool,

    /// Enable processor boosting
    #[arg(long)]
    enable_boosting: bool,

    /// Disable processor boosting
    #[arg(long)]
    disable_boosting: bool,

    /// Enable address space layout randomization (ASLR)
    #[arg(long)]
    enable_aslr: bool,

    /// Disable address space layout randomization (ASLR)
    #[arg(long)]
    disable_aslr: bool,
}

impl Args {
    pub(crate) fn profile(&self) -> Profile {
        Profile {
            c6: ToggleAction::from_flags(self.enable_c6, self.disable_c6),
            psic_workaround: ToggleAction::from_flags(
                self.enable_psicworkaround,
                self.disable_psicworkaround,
            ),
            boosting: ToggleAction::from_flags(self.enable_boosting, self.disable_boosting),
            aslr: ToggleAction::from_flags(self.enable_aslr, self.disable_aslr),
        }
    }
}
