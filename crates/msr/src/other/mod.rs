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

//! This module is the implementation for the platforms without MSR devices,
//! every access fails and the device is reported as unavailable.

use std::path::PathBuf;

use rst_shared::types::CPUIdType;
use rst_shared::types::LogicalCoreId;

use crate::cpu_signature::CpuSignature;
use crate::cpu_signature::CpuVendor;
use crate::MSRAccess;
use crate::MSRError;
use crate::MSROffset;
use crate::MSRResult;

pub const DEFAULT_MSR_DIR: &str = "/dev/cpu";

#[derive(Clone, Debug, Default)]
pub struct MSRDevice {}

impl MSRDevice {
    pub fn new() -> Self {
        Self {}
    }

    pub fn with_dir(_msr_dir: impl Into<PathBuf>) -> Self {
        Self {}
    }
}

impl MSRAccess for MSRDevice {
    fn read_msr(&self, _offset: MSROffset, _core_id: LogicalCoreId) -> MSRResult<u64> {
        Err(MSRError::Unsupported)
    }

    fn write_msr(&self, _offset: MSROffset, _value: u64, _core_id: LogicalCoreId) -> MSRResult<()> {
        Err(MSRError::Unsupported)
    }

    fn is_available(&self) -> bool {
        false
    }
}

pub fn logical_cores_count() -> MSRResult<CPUIdType> {
    Err(MSRError::Unsupported)
}

pub(crate) fn detect_cpu_signature() -> CpuSignature {
    CpuSignature::new(CpuVendor::Unknown, None)
}
