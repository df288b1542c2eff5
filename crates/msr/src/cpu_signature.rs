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

use once_cell::sync::Lazy;

/// CPUID family of AMD Zen processors, 17h.
pub const AMD_ZEN_FAMILY: u8 = 0x17;

/// Signature of the CPU this process runs on, it's detected only once.
pub static CPU_SIGNATURE: Lazy<CpuSignature> = Lazy::new(crate::msr_impl::detect_cpu_signature);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CpuVendor {
    Amd,
    Intel,
    Unknown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CpuSignature {
    vendor: CpuVendor,
    family_id: Option<u8>,
}

impl CpuSignature {
    pub fn new(vendor: CpuVendor, family_id: Option<u8>) -> Self {
        Self { vendor, family_id }
    }

    pub fn vendor(&self) -> CpuVendor {
        self.vendor
    }

    pub fn family_id(&self) -> Option<u8> {
        self.family_id
    }

    /// Only Zen CPUs have the C6 registers this crate writes to.
    pub fn is_amd_zen(&self) -> bool {
        self.vendor == CpuVendor::Amd && self.family_id == Some(AMD_ZEN_FAMILY)
    }
}
