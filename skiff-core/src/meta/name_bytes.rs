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

//! Immutable byte-sequence map key for fully qualified type names.
//!
//! Name lookups happen once per type-identity field on the name path, so the
//! key precomputes its hash and compares by length first, then eight bytes at
//! a time. The hash doubles as the wire checksum field of a name record and
//! must therefore be deterministic across processes.

use std::fmt;
use std::hash::{Hash, Hasher};

/// 31-based polynomial over the UTF-8 bytes, wrapping in u32.
pub fn compute_name_hash(bytes: &[u8]) -> u32 {
    let mut h: u32 = 0;
    for &b in bytes {
        h = h.wrapping_mul(31).wrapping_add(b as u32);
    }
    h
}

/// UTF-8 type name plus its precomputed hash.
#[derive(Clone)]
pub struct NameBytes {
    bytes: Box<[u8]>,
    hash: u32,
}

impl NameBytes {
    pub fn from_name(name: &str) -> NameBytes {
        let bytes: Box<[u8]> = name.as_bytes().into();
        let hash = compute_name_hash(&bytes);
        NameBytes { bytes, hash }
    }

    /// Builds a key from wire data. The transmitted hash is trusted as the
    /// map hash; equality still compares the bytes.
    pub fn from_wire(bytes: Vec<u8>, hash: u32) -> NameBytes {
        NameBytes {
            bytes: bytes.into_boxed_slice(),
            hash,
        }
    }

    pub fn hash_code(&self) -> u32 {
        self.hash
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn display_name(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl PartialEq for NameBytes {
    fn eq(&self, other: &Self) -> bool {
        if self.hash != other.hash || self.bytes.len() != other.bytes.len() {
            return false;
        }
        let mut a = self.bytes.chunks_exact(8);
        let mut b = other.bytes.chunks_exact(8);
        for (ca, cb) in (&mut a).zip(&mut b) {
            let wa = u64::from_ne_bytes(ca.try_into().unwrap());
            let wb = u64::from_ne_bytes(cb.try_into().unwrap());
            if wa != wb {
                return false;
            }
        }
        a.remainder() == b.remainder()
    }
}

impl Eq for NameBytes {}

impl Hash for NameBytes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
    }
}

impl fmt::Debug for NameBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameBytes({:?}, {:#010x})", self.display_name(), self.hash)
    }
}
