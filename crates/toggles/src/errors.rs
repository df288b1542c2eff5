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

use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum ControlFileError {
    #[error("reading control file {path:?} there is an error: {io_error}")]
    Read {
        path: PathBuf,
        io_error: std::io::Error,
    },

    #[error("writing {value:?} into control file {path:?} there is an error: {io_error}")]
    Write {
        path: PathBuf,
        value: &'static str,
        io_error: std::io::Error,
    },

    #[error("control file {path:?} contains unexpected value {content:?}")]
    Malformed { path: PathBuf, content: String },
}

impl ControlFileError {
    pub(crate) fn read(path: PathBuf, io_error: std::io::Error) -> Self {
        Self::Read { path, io_error }
    }

    pub(crate) fn write(path: PathBuf, value: &'static str, io_error: std::io::Error) -> Self {
        Self::Write {
            path,
            value,
            io_error,
        }
    }

    pub(crate) fn malformed(path: PathBuf, content: impl Into<String>) -> Self {
        Self::Malformed {
            path,
            content: content.into(),
        }
    }

    /// True if the control file couldn't be reached at all, e.g. it's missing
    /// or the process lacks privileges.
    pub fn is_resource_unavailable(&self) -> bool {
        match self {
            Self::Read { io_error, .. } | Self::Write { io_error, .. } => matches!(
                io_error.kind(),
                ErrorKind::NotFound | ErrorKind::PermissionDenied
            ),
            Self::Malformed { .. } => false,
        }
    }
}
