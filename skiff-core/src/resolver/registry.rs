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

//! The static type/id registry.
//!
//! Bindings made here are permanent for the process: both peers must
//! perform the same registrations in the same order before exchanging
//! payloads, otherwise decode fails with a desync error. A failed
//! registration leaves the registry exactly as it was.

use std::collections::HashMap;

use crate::error::Error;
use crate::types::RuntimeType;

#[derive(Default)]
pub struct TypeRegistry {
    ids: HashMap<RuntimeType, u16>,
    // Indexed by id; grown geometrically on demand.
    types: Vec<Option<RuntimeType>>,
}

impl TypeRegistry {
    pub fn new() -> TypeRegistry {
        TypeRegistry::default()
    }

    /// Binds the type to the lowest id not currently in use and returns it.
    pub fn register(&mut self, ty: RuntimeType) -> Result<u16, Error> {
        if let Some(&id) = self.ids.get(&ty) {
            return Err(Error::duplicate_registration(format!(
                "type already registered under id {id}"
            )));
        }
        let free = (0..=u16::MAX as usize)
            .find(|&id| self.types.get(id).map_or(true, Option::is_none));
        let id = match free {
            Some(id) => id as u16,
            None => {
                return Err(Error::duplicate_registration(
                    "all 65536 static type ids are in use",
                ))
            }
        };
        self.bind(ty, id);
        Ok(id)
    }

    /// Binds the type to a caller-chosen id. Rebinding the same pair is a
    /// no-op; any conflicting binding on either side is rejected.
    pub fn register_with_id(&mut self, ty: RuntimeType, id: u16) -> Result<(), Error> {
        if let Some(&bound) = self.ids.get(&ty) {
            if bound == id {
                return Ok(());
            }
            return Err(Error::duplicate_registration(format!(
                "type already registered under id {bound}, refusing id {id}"
            )));
        }
        if let Some(Some(_)) = self.types.get(id as usize) {
            return Err(Error::duplicate_registration(format!(
                "id {id} is already bound to another type"
            )));
        }
        self.bind(ty, id);
        Ok(())
    }

    /// Unchecked insertion for the startup built-in set, whose ids are
    /// fixed by declaration order and cannot conflict.
    pub(crate) fn bind(&mut self, ty: RuntimeType, id: u16) {
        let slot = id as usize;
        if slot >= self.types.len() {
            self.types.resize((slot + 1) * 2, None);
        }
        self.types[slot] = Some(ty);
        self.ids.insert(ty, id);
    }

    pub fn id_of(&self, ty: RuntimeType) -> Option<u16> {
        self.ids.get(&ty).copied()
    }

    pub fn type_of(&self, id: u16) -> Option<RuntimeType> {
        self.types.get(id as usize).copied().flatten()
    }

    pub fn contains(&self, ty: RuntimeType) -> bool {
        self.ids.contains_key(&ty)
    }

    /// All bindings, ordered by id.
    pub fn bindings(&self) -> Vec<(u16, RuntimeType)> {
        let mut out: Vec<(u16, RuntimeType)> = self
            .ids
            .iter()
            .map(|(&ty, &id)| (id, ty))
            .collect();
        out.sort_unstable_by_key(|&(id, _)| id);
        out
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
