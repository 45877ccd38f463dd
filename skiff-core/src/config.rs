// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

/// Engine settings, fixed at construction of a [`crate::skiff::Skiff`]
/// instance and shared by every session it runs.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Reject reserved-namespace types with no serialization support
    /// instead of falling through to the structural default.
    pub strict_types: bool,
    /// The surrounding graph engine tracks shared references. Serializers
    /// derive their `needs_ref` flag from this.
    pub track_refs: bool,
    /// Boxed scalar values are exempt from reference tracking even when
    /// `track_refs` is on.
    pub ignore_basic_refs: bool,
    /// Maximum value nesting accepted while decoding. Payloads nested
    /// deeper are rejected as invalid data; without the bound a hostile
    /// payload could recurse the decoder off the stack.
    pub max_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strict_types: true,
            track_refs: false,
            ignore_basic_refs: true,
            max_depth: 64,
        }
    }
}
