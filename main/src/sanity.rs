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

use nix::unistd::Uid;

use rst_msr::CpuSignature;
use rst_msr::CpuVendor;
use rst_msr::AMD_ZEN_FAMILY;

/// Checks that this process runs as root on Linux with an AMD Zen CPU.
pub(crate) fn check(os: &str, signature: &CpuSignature, euid: Uid) -> eyre::Result<()> {
    if os != "linux" {
        eyre::bail!("this program can only run under Linux");
    }

    if signature.vendor() != CpuVendor::Amd {
        eyre::bail!("this is not an AMD processor");
    }

    match signature.family_id() {
        Some(AMD_ZEN_FAMILY) => {}
        Some(family_id) => eyre::bail!(
            "wrong family of AMD processors; expected {AMD_ZEN_FAMILY} ({AMD_ZEN_FAMILY:X}h), got {family_id}"
        ),
        None => eyre::bail!("family of the AMD processor can't be detected"),
    }

    if !euid.is_root() {
        eyre::bail!("you need to be root to use this program");
    }

    tracing::debug!("sanity check passed for {signature:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use nix::unistd::Uid;

    use rst_msr::CpuSignature;
    use rst_msr::CpuVendor;

    use super::check;

    fn zen() -> CpuSignature {
        CpuSignature::new(CpuVendor::Amd, Some(0x17))
    }

    #[test]
    fn root_on_zen_linux_passes() {
        assert!(check("linux", &zen(), Uid::from_raw(0)).is_ok());
    }

    #[test]
    fn other_os_fails() {
        let error = check("macos", &zen(), Uid::from_raw(0)).unwrap_err();

        assert!(error.to_string().contains("Linux"), "{error}");
    }

    #[test]
    fn intel_fails() {
        let intel = CpuSignature::new(CpuVendor::Intel, Some(0x17));

        assert!(check("linux", &intel, Uid::from_raw(0)).is_err());
    }

    #[test]
    fn wrong_family_is_reported() {
        let zen3 = CpuSignature::new(CpuVendor::Amd, Some(0x19));

        let error = check("linux", &zen3, Uid::from_raw(0)).unwrap_err();

        assert_eq!(
            error.to_string(),
            "wrong family of AMD processors; expected 23 (17h), got 25"
        );
    }

    #[test]
    fn regular_user_fails() {
        let error = check("linux", &zen(), Uid::from_raw(1000)).unwrap_err();

        assert!(error.to_string().contains("root"), "{error}");
    }
}
