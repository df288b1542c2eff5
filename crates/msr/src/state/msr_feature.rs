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

/// Position of a register in the MSR space, used as a file offset
/// of the per-CPU register device.
pub type MSROffset = i64;

/// A group of bits inside an MSR that switches one CPU feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MSRFeature {
    name: &'static str,
    offset: MSROffset,
    mask: u64,
}

impl MSRFeature {
    pub const fn new(name: &'static str, offset: MSROffset, mask: u64) -> Self {
        Self { name, offset, mask }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn offset(&self) -> MSROffset {
        self.offset
    }

    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// The whole register value to be written: the mask to enable the
    /// feature, its complement to disable it.
    ///
    /// It's a direct write, the bits outside of the mask are overwritten
    /// either way, and the disabling value sets all of them.
    pub fn value_for(&self, enable: bool) -> u64 {
        if enable {
            self.mask
        } else {
            !self.mask
        }
    }

    /// The feature is considered enabled only if all its bits are set.
    pub fn is_set_in(&self, register_value: u64) -> bool {
        register_value & self.mask == self.mask
    }
}
