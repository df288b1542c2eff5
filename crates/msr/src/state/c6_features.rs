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

use super::MSRFeature;

/// Package C6, bit 32 of MSR C001_0292.
/// Keeping it off also works around the Power Supply Idle Control issue.
pub const C6_PACKAGE: MSRFeature = MSRFeature::new("package C6", 0xC0010292, 1 << 32);

/// Core C6, MSR C001_0296 (C-state config) holds one enable bit
/// per C-state action field.
pub const C6_CORE: MSRFeature = MSRFeature::new(
    "core C6",
    0xC0010296,
    (1 << 22) | (1 << 14) | (1 << 6),
);

/// Order matters: features are applied one after another, each of them
/// across all logical cores.
pub const C6_FEATURES: [MSRFeature; 2] = [C6_PACKAGE, C6_CORE];
