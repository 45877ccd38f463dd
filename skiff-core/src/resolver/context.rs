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

//! Encode and decode state threaded through every serializer call.
//!
//! The type tag wire format is two levels deep. The outer byte says how the
//! type is identified: `Id` is followed by a big-endian u16 static id from
//! the shared registry, `Name` by a name record. The name record repeats the
//! scheme within the message: `Name` carries hash, length and the raw name
//! bytes and implicitly assigns the next dynamic id, `Id` carries the u16
//! dynamic id of a name already announced in this message.

use crate::bail;
use crate::buffer::{Reader, Writer};
use crate::config::Config;
use crate::error::Error;
use crate::meta::NameBytes;
use crate::resolver::catalog::WireIdentity;
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::LegacyCodec;
use crate::types::{RuntimeType, WireTag};

pub struct WriteContext<'a> {
    pub writer: &'a mut Writer,
    pub types: &'a mut TypeResolver,
    pub session: &'a mut crate::resolver::session::WriteSession,
    pub config: &'a Config,
    pub legacy: Option<&'a dyn LegacyCodec>,
}

impl WriteContext<'_> {
    /// Emits the type tag for `ty`, negotiating a dynamic id when the type
    /// has no static one.
    pub fn write_type_id(&mut self, ty: RuntimeType) -> Result<(), Error> {
        // Boxed numbers skip the catalog entirely.
        if let Some(id) = self.types.fast_id(ty) {
            self.writer.write_u8(WireTag::Id.into());
            self.writer.write_u16(id);
            return Ok(());
        }
        match self.types.wire_identity(ty) {
            WireIdentity::Static(id) => {
                self.writer.write_u8(WireTag::Id.into());
                self.writer.write_u16(id);
                Ok(())
            }
            WireIdentity::Named(name) => {
                self.writer.write_u8(WireTag::Name.into());
                self.write_type_name(&name)
            }
        }
    }

    fn write_type_name(&mut self, name: &NameBytes) -> Result<(), Error> {
        if let Some(dynamic_id) = self.session.lookup(name) {
            self.writer.write_u8(WireTag::Id.into());
            self.writer.write_u16(dynamic_id);
            return Ok(());
        }
        self.session.assign(name.clone())?;
        self.writer.write_u8(WireTag::Name.into());
        self.writer.write_u32(name.hash_code());
        self.writer.write_u16(name.len() as u16);
        self.writer.write_bytes(name.as_bytes());
        Ok(())
    }
}

pub struct ReadContext<'a, 'b> {
    pub reader: &'a mut Reader<'b>,
    pub types: &'a mut TypeResolver,
    pub session: &'a mut crate::resolver::session::ReadSession,
    pub config: &'a Config,
    pub legacy: Option<&'a dyn LegacyCodec>,
    pub(crate) depth: u32,
}

impl ReadContext<'_, '_> {
    /// Enters one level of value nesting; decoding recurses through
    /// untrusted bytes, so the depth is bounded by the configuration.
    pub(crate) fn inc_depth(&mut self) -> Result<(), Error> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            bail!(Error::invalid_data(format!(
                "value nesting exceeds the configured maximum depth of {}",
                self.config.max_depth
            )));
        }
        Ok(())
    }

    pub(crate) fn dec_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Reads a type tag and resolves it to a local handle. A static or
    /// dynamic id with no local binding means the peers disagree about
    /// prior negotiation; an unknown name means the type does not exist
    /// in this process.
    pub fn read_type_id(&mut self) -> Result<RuntimeType, Error> {
        let ty = match self.read_tag()? {
            WireTag::Id => {
                let id = self.reader.read_u16()?;
                match self.types.type_of(id) {
                    Some(ty) => ty,
                    None => bail!(Error::desync_corruption(format!(
                        "static type id {id} is not registered on this side"
                    ))),
                }
            }
            WireTag::Name => {
                let name = self.read_type_name()?;
                match self.types.resolve_name(&name) {
                    Some(ty) => ty,
                    None => bail!(Error::unresolvable_type(format!(
                        "no type named {} exists in this process",
                        name.display_name()
                    ))),
                }
            }
        };
        self.session.set_current_read_type(ty);
        Ok(ty)
    }

    fn read_type_name(&mut self) -> Result<NameBytes, Error> {
        match self.read_tag()? {
            WireTag::Id => {
                let id = self.reader.read_u16()?;
                match self.session.lookup(id) {
                    Some(name) => Ok(name.clone()),
                    None => bail!(Error::desync_corruption(format!(
                        "dynamic type id {id} was never announced in this message"
                    ))),
                }
            }
            WireTag::Name => {
                let hash = self.reader.read_u32()?;
                let len = self.reader.read_u16()? as usize;
                let bytes = self.reader.read_bytes(len)?.to_vec();
                let name = NameBytes::from_wire(bytes, hash);
                self.session.append(name.clone())?;
                Ok(name)
            }
        }
    }

    fn read_tag(&mut self) -> Result<WireTag, Error> {
        let raw = self.reader.read_u8()?;
        WireTag::try_from(raw)
            .map_err(|_| Error::invalid_data(format!("invalid wire tag byte {raw:#04x}")))
    }
}
