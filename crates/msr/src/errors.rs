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

use std::path::PathBuf;

use nix::errno::Errno;
use thiserror::Error as ThisError;

use rst_shared::types::LogicalCoreId;

use crate::MSROffset;

#[derive(ThisError, Debug)]
pub enum MSRError {
    #[error("opening MSR file {path:?} of logical CPU {core_id} for read there is an error: {io_error}")]
    OpenForRead {
        path: PathBuf,
        core_id: LogicalCoreId,
        io_error: std::io::Error,
    },

    #[error("opening MSR file {path:?} of logical CPU {core_id} for write there is an error: {io_error}")]
    OpenForWrite {
        path: PathBuf,
        core_id: LogicalCoreId,
        io_error: std::io::Error,
    },

    #[error("reading from register {offset:#X} of logical CPU {core_id} there is an error: {errno}")]
    ReadWNoErr {
        offset: MSROffset,
        core_id: LogicalCoreId,
        errno: Errno,
    },

    #[error(
        "writing value {value:#X} to register {offset:#X} of logical CPU {core_id} there is an error: {errno}"
    )]
    WriteWNoErr {
        value: u64,
        offset: MSROffset,
        core_id: LogicalCoreId,
        errno: Errno,
    },

    #[error("reading from register {offset:#X} of logical CPU {core_id} returned {bytes_read} bytes instead of 8")]
    ShortRead {
        offset: MSROffset,
        core_id: LogicalCoreId,
        bytes_read: usize,
    },

    #[error("writing value {value:#X} to register {offset:#X} of logical CPU {core_id} stored {bytes_written} bytes instead of 8")]
    ShortWrite {
        value: u64,
        offset: MSROffset,
        core_id: LogicalCoreId,
        bytes_written: usize,
    },

    #[error("querying the number of online logical CPUs there is an error: {errno}")]
    CoresCount { errno: Errno },

    #[error("the number of online logical CPUs is unknown")]
    CoresCountUnknown,

    #[error("MSR access is supported only by Linux on x86_64")]
    Unsupported,
}

impl MSRError {
    pub fn open_for_read(path: PathBuf, core_id: LogicalCoreId, io_error: std::io::Error) -> Self {
        Self::OpenForRead {
            path,
            core_id,
            io_error,
        }
    }

    pub fn open_for_write(path: PathBuf, core_id: LogicalCoreId, io_error: std::io::Error) -> Self {
        Self::OpenForWrite {
            path,
            core_id,
            io_error,
        }
    }

    pub fn read_w_no_err(offset: MSROffset, core_id: LogicalCoreId, errno: Errno) -> Self {
        Self::ReadWNoErr {
            offset,
            core_id,
            errno,
        }
    }

    pub fn write_w_no_err(
        value: u64,
        offset: MSROffset,
        core_id: LogicalCoreId,
        errno: Errno,
    ) -> Self {
        Self::WriteWNoErr {
            value,
            offset,
            core_id,
            errno,
        }
    }

    pub fn short_read(offset: MSROffset, core_id: LogicalCoreId, bytes_read: usize) -> Self {
        Self::ShortRead {
            offset,
            core_id,
            bytes_read,
        }
    }

    pub fn short_write(
        value: u64,
        offset: MSROffset,
        core_id: LogicalCoreId,
        bytes_written: usize,
    ) -> Self {
        Self::ShortWrite {
            value,
            offset,
            core_id,
            bytes_written,
        }
    }

    /// True if the register device couldn't be reached at all, typically
    /// because of missing privileges or the unloaded `msr` kernel module.
    pub fn is_resource_unavailable(&self) -> bool {
        matches!(
            self,
            Self::OpenForRead { .. } | Self::OpenForWrite { .. } | Self::Unsupported
        )
    }

    /// The logical core the failed access was addressed to, if any.
    pub fn core_id(&self) -> Option<LogicalCoreId> {
        match self {
            Self::OpenForRead { core_id, .. }
            | Self::OpenForWrite { core_id, .. }
            | Self::ReadWNoErr { core_id, .. }
            | Self::WriteWNoErr { core_id, .. }
            | Self::ShortRead { core_id, .. }
            | Self::ShortWrite { core_id, .. } => Some(*core_id),
            Self::CoresCount { .. } | Self::CoresCountUnknown | Self::Unsupported => None,
        }
    }
}
