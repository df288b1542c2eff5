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

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![deny(
    dead_code,
    nonstandard_style,
    unused_imports,
    unused_mut,
    unused_variables,
    unused_unsafe,
    unreachable_patterns
)]

/// This crate controls the C6 C-state of AMD Zen CPUs via MSR registers
/// manipulation, which is possible with Linux on x86_64 only.
/// For everything else the register device is reported as unavailable.

#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
#[path = "linux_x86_64/mod.rs"]
mod msr_impl;
#[cfg(not(all(target_arch = "x86_64", target_os = "linux")))]
#[path = "other/mod.rs"]
mod msr_impl;

mod c6;
mod cpu_signature;
mod errors;
pub mod state;

use rst_shared::types::LogicalCoreId;

pub use c6::C6Controller;
pub use c6::PackageC6;
pub use cpu_signature::CpuSignature;
pub use cpu_signature::CpuVendor;
pub use cpu_signature::AMD_ZEN_FAMILY;
pub use cpu_signature::CPU_SIGNATURE;
pub use errors::MSRError;
pub use msr_impl::logical_cores_count;
pub use msr_impl::MSRDevice;
pub use msr_impl::DEFAULT_MSR_DIR;
pub use state::MSROffset;

pub type MSRResult<T> = Result<T, MSRError>;

/// Raw access to the MSR space of a particular logical core.
///
/// Both operations touch the live hardware immediately, there is no
/// buffering and no dry-run mode.
pub trait MSRAccess {
    /// Reads the 8-byte little-endian value of the register at `offset`.
    fn read_msr(&self, offset: MSROffset, core_id: LogicalCoreId) -> MSRResult<u64>;

    /// Writes `value` as 8 little-endian bytes to the register at `offset`.
    fn write_msr(&self, offset: MSROffset, value: u64, core_id: LogicalCoreId) -> MSRResult<()>;

    /// Whether the register device of the first logical core is present.
    /// Doesn't guarantee that any particular access succeeds.
    fn is_available(&self) -> bool;
}

impl<A: MSRAccess + ?Sized> MSRAccess for &A {
    fn read_msr(&self, offset: MSROffset, core_id: LogicalCoreId) -> MSRResult<u64> {
        (**self).read_msr(offset, core_id)
    }

    fn write_msr(&self, offset: MSROffset, value: u64, core_id: LogicalCoreId) -> MSRResult<()> {
        (**self).write_msr(offset, value, core_id)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
