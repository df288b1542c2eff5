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

use raw_cpuid::CpuId;
use raw_cpuid::CpuIdReaderNative;

use crate::cpu_signature::CpuSignature;
use crate::cpu_signature::CpuVendor;

pub(crate) fn detect_cpu_signature() -> CpuSignature {
    let cpuid = CpuId::new();
    let vendor = detect_vendor(&cpuid);
    let family_id = cpuid
        .get_feature_info()
        .map(|feature_info| feature_info.family_id());

    let signature = CpuSignature::new(vendor, family_id);
    tracing::debug!("Detected CPU signature {signature:?}");

    signature
}

fn detect_vendor(cpuid: &CpuId<CpuIdReaderNative>) -> CpuVendor {
    match cpuid.get_vendor_info() {
        Some(vendor_info) if vendor_info.as_str() == "AuthenticAMD" => CpuVendor::Amd,
        Some(vendor_info) if vendor_info.as_str() == "GenuineIntel" => CpuVendor::Intel,
        _ => CpuVendor::Unknown,
    }
}
