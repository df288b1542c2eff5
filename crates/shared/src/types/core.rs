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

use newtype_derive::newtype_fmt;

pub type CPUIdType = u32;

/// An opaque type that represents a CPU logical core, i.e. one OS-visible
/// hardware thread with its own `/dev/cpu/<id>` entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct LogicalCoreId(CPUIdType);

newtype_derive::NewtypeFrom! { () pub struct LogicalCoreId(CPUIdType); }
newtype_derive::NewtypeDisplay! { () pub struct LogicalCoreId(CPUIdType); }

impl LogicalCoreId {
    pub const fn new(core_id: CPUIdType) -> Self {
        Self(core_id)
    }

    /// Iterates over all logical cores of a machine with `count` of them,
    /// in ascending order.
    pub fn all(count: CPUIdType) -> impl Iterator<Item = LogicalCoreId> {
        (0..count).map(LogicalCoreId)
    }
}

impl From<LogicalCoreId> for usize {
    fn from(value: LogicalCoreId) -> usize {
        value.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::LogicalCoreId;

    #[test]
    fn all_is_ascending() {
        let cores = LogicalCoreId::all(4).collect::<Vec<_>>();
        let expected = vec![0.into(), 1.into(), 2.into(), 3.into()];

        assert_eq!(cores, expected);
    }

    #[test]
    fn all_is_empty_for_zero() {
        assert_eq!(LogicalCoreId::all(0).count(), 0);
    }

    #[test]
    fn display_is_plain_index() {
        assert_eq!(LogicalCoreId::new(7).to_string(), "7");
    }
}
