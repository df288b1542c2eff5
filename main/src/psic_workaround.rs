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

/// Power Supply Idle Control workaround, which is nothing but package C6
/// switched the other way around.
#[derive(Debug)]
pub(crate) struct PsicWorkaround<T> {
    package_c6: T,
}

impl<T: Toggle> PsicWorkaround<T> {
    pub(crate) fn new(package_c6: T) -> Self {
        Self { package_c6 }
    }
}

impl<T: Toggle> Toggle for PsicWorkaround<T> {
    type Error = T::Error;

    fn enable(&self) -> Result<(), Self::Error> {
        self.package_c6.disable()
    }

    fn disable(&self) -> Result<(), Self::Error> {
        self.package_c6.enable()
    }

    fn enabled(&self) -> Result<bool, Self::Error> {
        self.package_c6.disabled()
    }

    fn available(&self) -> bool {
        self.package_c6.available()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use rst_shared::Toggle;

    use super::PsicWorkaround;

    #[derive(Default)]
    struct FakePackageC6 {
        enabled: Cell<bool>,
        absent: bool,
    }

    impl Toggle for FakePackageC6 {
        type Error = std::io::Error;

        fn enable(&self) -> Result<(), Self::Error> {
            self.enabled.set(true);
            Ok(())
        }

        fn disable(&self) -> Result<(), Self::Error> {
            self.enabled.set(false);
            Ok(())
        }

        fn enabled(&self) -> Result<bool, Self::Error> {
            Ok(self.enabled.get())
        }

        fn available(&self) -> bool {
            !self.absent
        }
    }

    #[test]
    fn enabling_workaround_disables_package_c6() {
        let workaround = PsicWorkaround::new(FakePackageC6 {
            enabled: Cell::new(true),
            absent: false,
        });

        workaround.enable().unwrap();

        assert!(!workaround.package_c6.enabled.get());
        assert!(workaround.enabled().unwrap());
    }

    #[test]
    fn disabling_workaround_enables_package_c6() {
        let workaround = PsicWorkaround::new(FakePackageC6::default());

        workaround.disable().unwrap();

        assert!(workaround.package_c6.enabled.get());
        assert!(workaround.disabled().unwrap());
    }

    #[test]
    fn availability_follows_package_c6() {
        let workaround = PsicWorkaround::new(FakePackageC6 {
            enabled: Cell::new(false),
            absent: true,
        });

        assert!(!workaround.available());
    }
}
