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

use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use rst_shared::types::LogicalCoreId;

use crate::MSRAccess;
use crate::MSRError;
use crate::MSROffset;
use crate::MSRResult;

/// Directory the `msr` kernel module exposes per-CPU register devices in.
pub const DEFAULT_MSR_DIR: &str = "/dev/cpu";

const MSR_FILE_NAME: &str = "msr";
const MSR_VALUE_SIZE: usize = std::mem::size_of::<u64>();

enum MSRFileOpMode {
    MSRRead,
    MSRWrite,
}

/// Accesses MSRs through `<msr_dir>/<cpu>/msr` files.
#[derive(Clone, Debug)]
pub struct MSRDevice {
    msr_dir: PathBuf,
}

impl MSRDevice {
    pub fn new() -> Self {
        Self::with_dir(DEFAULT_MSR_DIR)
    }

    pub fn with_dir(msr_dir: impl Into<PathBuf>) -> Self {
        Self {
            msr_dir: msr_dir.into(),
        }
    }

    pub fn msr_path(&self, core_id: LogicalCoreId) -> PathBuf {
        self.msr_dir.join(core_id.to_string()).join(MSR_FILE_NAME)
    }
}

impl Default for MSRDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MSRAccess for MSRDevice {
    fn read_msr(&self, offset: MSROffset, core_id: LogicalCoreId) -> MSRResult<u64> {
        use nix::sys::uio::pread;

        let path = self.msr_path(core_id);
        let file = open_msr(&path, MSRFileOpMode::MSRRead)
            .map_err(|error| MSRError::open_for_read(path, core_id, error))?;

        let mut value = [0u8; MSR_VALUE_SIZE];
        let bytes_read = pread(&file, &mut value, offset)
            .map_err(|errno| MSRError::read_w_no_err(offset, core_id, errno))?;
        if bytes_read != MSR_VALUE_SIZE {
            return Err(MSRError::short_read(offset, core_id, bytes_read));
        }
        let result = u64::from_le_bytes(value);

        tracing::debug!("Read MSR {offset:#X} value {result:#X} at logical CPU {core_id}");

        Ok(result)
    }

    fn write_msr(&self, offset: MSROffset, value: u64, core_id: LogicalCoreId) -> MSRResult<()> {
        use nix::sys::uio::pwrite;

        let path = self.msr_path(core_id);
        let file = open_msr(&path, MSRFileOpMode::MSRWrite)
            .map_err(|error| MSRError::open_for_write(path, core_id, error))?;

        let value_as_bytes = value.to_le_bytes();
        let bytes_written = pwrite(&file, &value_as_bytes, offset)
            .map_err(|errno| MSRError::write_w_no_err(value, offset, core_id, errno))?;
        if bytes_written != MSR_VALUE_SIZE {
            return Err(MSRError::short_write(value, offset, core_id, bytes_written));
        }

        tracing::debug!("Write MSR {offset:#X} value {value:#X} at logical CPU {core_id}");

        Ok(())
    }

    fn is_available(&self) -> bool {
        self.msr_path(LogicalCoreId::new(0)).exists()
    }
}

fn open_msr(path: &Path, mode: MSRFileOpMode) -> io::Result<File> {
    use std::fs::OpenOptions;

    match mode {
        MSRFileOpMode::MSRRead => OpenOptions::new().read(true).open(path),
        MSRFileOpMode::MSRWrite => OpenOptions::new().write(true).open(path),
    }
}

#[cfg(test)]
mod tests {
    use std::os::unix::fs::PermissionsExt;

    use rst_shared::types::LogicalCoreId;
    use rst_test_utils::msr_tree;
    use test_log::test;

    use super::MSRDevice;
    use crate::MSRAccess;
    use crate::MSRError;

    #[test]
    fn written_value_is_little_endian() {
        let tree = msr_tree::create(2, 64);
        let device = MSRDevice::with_dir(tree.path());
        let core_id = LogicalCoreId::new(1);

        device
            .write_msr(8, 0x0102_0304_0506_0708, core_id)
            .unwrap();

        let content = std::fs::read(device.msr_path(core_id)).unwrap();
        assert_eq!(
            &content[8..16],
            &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(device.read_msr(8, core_id).unwrap(), 0x0102_0304_0506_0708);

        // other cores are left untouched
        let other = std::fs::read(device.msr_path(LogicalCoreId::new(0))).unwrap();
        assert!(other.iter().all(|byte| *byte == 0));
    }

    #[test]
    fn read_fails_on_short_register() {
        let tree = msr_tree::create(1, 12);
        let device = MSRDevice::with_dir(tree.path());

        let result = device.read_msr(8, LogicalCoreId::new(0));

        assert!(
            matches!(
                result,
                Err(MSRError::ShortRead {
                    offset: 8,
                    bytes_read: 4,
                    ..
                })
            ),
            "{result:?}"
        );
    }

    #[test]
    fn missing_core_is_unavailable_resource() {
        let tree = msr_tree::create(1, 64);
        let device = MSRDevice::with_dir(tree.path());
        let core_id = LogicalCoreId::new(3);

        let read_error = device.read_msr(0, core_id).unwrap_err();
        let write_error = device.write_msr(0, 1, core_id).unwrap_err();

        assert!(matches!(read_error, MSRError::OpenForRead { .. }));
        assert!(matches!(write_error, MSRError::OpenForWrite { .. }));
        assert!(read_error.is_resource_unavailable());
        assert!(write_error.is_resource_unavailable());
        assert_eq!(read_error.core_id(), Some(core_id));
    }

    #[test]
    fn availability_is_existence_of_first_core() {
        let tree = msr_tree::create(2, 64);
        let empty_dir = tempfile::tempdir().unwrap();

        assert!(MSRDevice::with_dir(tree.path()).is_available());
        assert!(!MSRDevice::with_dir(empty_dir.path()).is_available());
    }

    #[test]
    fn availability_ignores_permissions() {
        let tree = msr_tree::create(1, 64);
        let device = MSRDevice::with_dir(tree.path());
        let path = device.msr_path(LogicalCoreId::new(0));
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        assert!(device.is_available());
    }

    #[test]
    fn path_follows_kernel_layout() {
        let device = MSRDevice::new();

        assert_eq!(
            device.msr_path(LogicalCoreId::new(5)),
            std::path::PathBuf::from("/dev/cpu/5/msr")
        );
    }
}
