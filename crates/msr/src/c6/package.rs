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

use rst_shared::Toggle;

use super::C6Controller;
use crate::state::C6_PACKAGE;
use crate::MSRAccess;
use crate::MSRError;

/// Package C6 of a [`C6Controller`], it reports the literal hardware state.
#[derive(Debug)]
pub struct PackageC6<'controller, A> {
    controller: &'controller C6Controller<A>,
}

impl<'controller, A: MSRAccess> PackageC6<'controller, A> {
    pub(super) fn new(controller: &'controller C6Controller<A>) -> Self {
        Self { controller }
    }
}

impl<A: MSRAccess> Toggle for PackageC6<'_, A> {
    type Error = MSRError;

    fn enable(&self) -> Result<(), Self::Error> {
        self.controller.set_package_only(true)
    }

    fn disable(&self) -> Result<(), Self::Error> {
        self.controller.set_package_only(false)
    }

    fn enabled(&self) -> Result<bool, Self::Error> {
        self.controller.is_feature_enabled(&C6_PACKAGE)
    }

    fn available(&self) -> bool {
        self.controller.available()
    }
}
