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

/// A binary machine feature that could be switched on and off and queried.
///
/// The state is never cached, every query reflects the state of
/// the hardware or the kernel at the moment of the call.
pub trait Toggle {
    type Error: std::error::Error + Send + Sync + 'static;

    fn enable(&self) -> Result<(), Self::Error>;

    fn disable(&self) -> Result<(), Self::Error>;

    fn enabled(&self) -> Result<bool, Self::Error>;

    fn disabled(&self) -> Result<bool, Self::Error> {
        self.enabled().map(|enabled| !enabled)
    }

    /// Returns false if the feature can't be controlled on this machine,
    /// that is a legitimate state rather than an error.
    fn available(&self) -> bool {
        true
    }
}
