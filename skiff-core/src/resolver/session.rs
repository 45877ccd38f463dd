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

//! Per-message dynamic id negotiation.
//!
//! Unregistered type names are sent in full once per message and referenced
//! by a small dynamic id afterwards. Writer and reader each keep their own
//! table; ids are assignment-ordered, so the tables agree as long as both
//! sides process the same bytes. The tables must be reset between messages.

use std::collections::HashMap;

use crate::error::Error;
use crate::meta::NameBytes;
use crate::types::RuntimeType;

#[derive(Default)]
pub struct WriteSession {
    table: HashMap<NameBytes, u16>,
    cursor: u16,
}

impl WriteSession {
    pub fn new() -> WriteSession {
        WriteSession::default()
    }

    pub fn lookup(&self, name: &NameBytes) -> Option<u16> {
        self.table.get(name).copied()
    }

    /// Assigns the next dynamic id to a name first seen in this message.
    pub fn assign(&mut self, name: NameBytes) -> Result<u16, Error> {
        if self.table.len() > u16::MAX as usize {
            return Err(Error::invalid_data(
                "dynamic type id space exhausted within a single message",
            ));
        }
        let id = self.cursor;
        self.table.insert(name, id);
        self.cursor = self.cursor.wrapping_add(1);
        Ok(id)
    }

    pub fn reset(&mut self) {
        if !self.table.is_empty() || self.cursor != 0 {
            self.table.clear();
            self.cursor = 0;
        }
    }
}

#[derive(Default)]
pub struct ReadSession {
    // Index doubles as the dynamic id.
    table: Vec<NameBytes>,
    current_read_type: Option<RuntimeType>,
}

impl ReadSession {
    pub fn new() -> ReadSession {
        ReadSession::default()
    }

    pub fn lookup(&self, id: u16) -> Option<&NameBytes> {
        self.table.get(id as usize)
    }

    /// Appends a name received in full; its index is the id the writer
    /// assigned, because both sides number names in encounter order.
    pub fn append(&mut self, name: NameBytes) -> Result<u16, Error> {
        if self.table.len() > u16::MAX as usize {
            return Err(Error::invalid_data(
                "dynamic type id space exhausted within a single message",
            ));
        }
        let id = self.table.len() as u16;
        self.table.push(name);
        Ok(id)
    }

    pub fn current_read_type(&self) -> Option<RuntimeType> {
        self.current_read_type
    }

    pub fn set_current_read_type(&mut self, ty: RuntimeType) {
        self.current_read_type = Some(ty);
    }

    pub fn reset(&mut self) {
        if !self.table.is_empty() || self.current_read_type.is_some() {
            self.table.clear();
            self.current_read_type = None;
        }
    }
}
