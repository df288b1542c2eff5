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

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::ControlFileError;
use crate::ControlFileResult;

/// Value the kernel reports for a switched off feature.
pub(crate) const DISABLED_VALUE: &str = "0";

/// A single-value kernel control file like the ones under `/sys` or `/proc/sys`.
#[derive(Clone, Debug)]
pub struct ControlFile {
    path: PathBuf,
}

impl ControlFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Returns the file content with the trailing line feed stripped.
    pub fn read_value(&self) -> ControlFileResult<String> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|error| ControlFileError::read(self.path.clone(), error))?;
        let value = content.trim_end_matches('\n').to_string();

        log::debug!("Read {value:?} from {:?}", self.path);

        Ok(value)
    }

    /// Overwrites the file content, the file is never created.
    pub fn write_value(&self, value: &'static str) -> ControlFileResult<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|error| ControlFileError::write(self.path.clone(), value, error))?;
        file.write_all(value.as_bytes())
            .map_err(|error| ControlFileError::write(self.path.clone(), value, error))?;

        log::debug!("Wrote {value:?} into {:?}", self.path);

        Ok(())
    }

    /// Interprets the content as a feature state: "0" is disabled,
    /// `enabled_values` are enabled, anything else is malformed.
    pub(crate) fn read_state(&self, enabled_values: &[&str]) -> ControlFileResult<bool> {
        let value = self.read_value()?;
        if value == DISABLED_VALUE {
            return Ok(false);
        }
        if enabled_values.contains(&value.as_str()) {
            return Ok(true);
        }

        log::warn!("Unexpected value {value:?} in {:?}", self.path);
        Err(ControlFileError::malformed(self.path.clone(), value))
    }
}

#[cfg(test)]
mod tests {
    use rst_test_utils::control_file;
    use test_log::test;

    use super::ControlFile;
    use crate::ControlFileError;

    #[test]
    fn read_strips_single_line_feed() {
        let (_dir, path) = control_file::create("boost", "1\n");
        let file = ControlFile::new(&path);

        assert_eq!(file.read_value().unwrap(), "1");
    }

    #[test]
    fn read_takes_value_without_line_feed() {
        let (_dir, path) = control_file::create("boost", "0");
        let file = ControlFile::new(&path);

        assert_eq!(file.read_value().unwrap(), "0");
    }

    #[test]
    fn write_doesnt_create_missing_file() {
        let (_dir, path) = control_file::missing("boost");
        let file = ControlFile::new(&path);

        let error = file.write_value("1").unwrap_err();

        assert!(matches!(error, ControlFileError::Write { .. }), "{error:?}");
        assert!(error.is_resource_unavailable());
        assert!(!path.exists());
    }

    #[test]
    fn write_replaces_content() {
        let (_dir, path) = control_file::create("boost", "1\n");
        let file = ControlFile::new(&path);

        file.write_value("0").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0");
    }

    #[test]
    fn state_is_decoded() {
        let (_dir, path) = control_file::create("knob", "0\n");
        let file = ControlFile::new(&path);
        assert!(!file.read_state(&["1", "2"]).unwrap());

        file.write_value("2").unwrap();
        assert!(file.read_state(&["1", "2"]).unwrap());

        file.write_value("7").unwrap();
        let error = file.read_state(&["1", "2"]).unwrap_err();
        assert!(
            matches!(&error, ControlFileError::Malformed { content, .. } if content == "7"),
            "{error:?}"
        );
        assert!(!error.is_resource_unavailable());
    }

    #[test]
    fn missing_file_is_unavailable_resource() {
        let (_dir, path) = control_file::missing("boost");
        let file = ControlFile::new(&path);

        assert!(!file.exists());
        let error = file.read_value().unwrap_err();
        assert!(matches!(error, ControlFileError::Read { .. }));
        assert!(error.is_resource_unavailable());
    }
}
