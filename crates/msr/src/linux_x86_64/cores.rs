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

use rst_shared::types::CPUIdType;

use crate::MSRError;
use crate::MSRResult;

/// Returns the number of logical cores currently online.
pub fn logical_cores_count() -> MSRResult<CPUIdType> {
    use nix::unistd::sysconf;
    use nix::unistd::SysconfVar;

    match sysconf(SysconfVar::_NPROCESSORS_ONLN) {
        Ok(Some(count)) if count > 0 => {
            let count = CPUIdType::try_from(count).map_err(|_| MSRError::CoresCountUnknown)?;
            tracing::debug!("Found {count} online logical CPUs");
            Ok(count)
        }
        Ok(_) => Err(MSRError::CoresCountUnknown),
        Err(errno) => Err(MSRError::CoresCount { errno }),
    }
}

#[cfg(test)]
mod tests {
    use super::logical_cores_count;

    #[test]
    fn at_least_one_core_is_online() {
        assert!(logical_cores_count().unwrap() >= 1);
    }
}
