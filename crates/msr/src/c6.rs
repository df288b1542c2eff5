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

mod package;

use rst_shared::types::CPUIdType;
use rst_shared::types::LogicalCoreId;
use rst_shared::Toggle;

use crate::state::MSRFeature;
use crate::state::C6_FEATURES;
use crate::state::C6_PACKAGE;
use crate::MSRAccess;
use crate::MSRError;
use crate::MSRResult;

pub use package::PackageC6;

/// Applies C6 features to every logical core and reports their aggregate state.
///
/// Logical cores are always visited in ascending order. Writes are not
/// transactional: an operation failed at some core leaves all lower cores
/// switched and all upper ones untouched.
#[derive(Clone, Debug)]
pub struct C6Controller<A> {
    msr: A,
    cores_count: CPUIdType,
}

impl<A: MSRAccess> C6Controller<A> {
    pub fn new(msr: A, cores_count: CPUIdType) -> Self {
        Self { msr, cores_count }
    }

    pub fn cores_count(&self) -> CPUIdType {
        self.cores_count
    }

    pub fn available(&self) -> bool {
        self.msr.is_available()
    }

    /// Writes the feature value to its register on every logical core,
    /// stops at the first failed write.
    pub fn set_feature(&self, feature: &MSRFeature, enable: bool) -> MSRResult<()> {
        let value = feature.value_for(enable);
        tracing::debug!(
            "Set {} (MSR {:#X}) to {:#X} on {} logical CPUs",
            feature.name(),
            feature.offset(),
            value,
            self.cores_count
        );

        for core_id in LogicalCoreId::all(self.cores_count) {
            self.msr
                .write_msr(feature.offset(), value, core_id)
                .map_err(|error| {
                    tracing::warn!(
                        "Setting {} stopped at logical CPU {core_id}, lower CPUs are already set: {error}",
                        feature.name()
                    );
                    error
                })?;
        }

        Ok(())
    }

    /// Applies features in the given order, each of them across all logical
    /// cores before the next one; stops at the first failed feature.
    pub fn set_features(&self, features: &[MSRFeature], enable: bool) -> MSRResult<()> {
        for feature in features {
            self.set_feature(feature, enable)?;
        }

        Ok(())
    }

    /// Switches both package and core C6.
    pub fn set_combined(&self, enable: bool) -> MSRResult<()> {
        self.set_features(&C6_FEATURES, enable)
    }

    /// Switches package C6 only.
    pub fn set_package_only(&self, enable: bool) -> MSRResult<()> {
        self.set_feature(&C6_PACKAGE, enable)
    }

    /// True as soon as any logical core has all bits of the feature set.
    pub fn is_feature_enabled(&self, feature: &MSRFeature) -> MSRResult<bool> {
        for core_id in LogicalCoreId::all(self.cores_count) {
            let value = self.msr.read_msr(feature.offset(), core_id)?;
            if feature.is_set_in(value) {
                tracing::debug!("{} is enabled at logical CPU {core_id}", feature.name());
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// True as soon as any logical core has any of the features set.
    /// All features are checked for a core before moving to the next core.
    pub fn is_any_enabled(&self, features: &[MSRFeature]) -> MSRResult<bool> {
        for core_id in LogicalCoreId::all(self.cores_count) {
            for feature in features {
                let value = self.msr.read_msr(feature.offset(), core_id)?;
                if feature.is_set_in(value) {
                    tracing::debug!("{} is enabled at logical CPU {core_id}", feature.name());
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }

    pub fn is_combined_enabled(&self) -> MSRResult<bool> {
        self.is_any_enabled(&C6_FEATURES)
    }

    /// A toggle view of package C6 alone.
    pub fn package(&self) -> PackageC6<'_, A> {
        PackageC6::new(self)
    }
}

impl<A: MSRAccess> Toggle for C6Controller<A> {
    type Error = MSRError;

    fn enable(&self) -> Result<(), Self::Error> {
        self.set_combined(true)
    }

    fn disable(&self) -> Result<(), Self::Error> {
        self.set_combined(false)
    }

    fn enabled(&self) -> Result<bool, Self::Error> {
        self.is_combined_enabled()
    }

    fn available(&self) -> bool {
        C6Controller::available(self)
    }
}
