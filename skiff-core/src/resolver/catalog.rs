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

//! Per-type serialization records and codec selection.
//!
//! A [`ClassInfo`] is created lazily the first time a type hits the wire
//! path and caches everything encode/decode needs: the encoded name, the
//! static id if any, and the chosen serializer. Selection runs once per
//! type; an explicit registration simply pre-seeds the cache.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::meta::NameBytes;
use crate::resolver::registry::TypeRegistry;
use crate::resolver::universe::TypeUniverse;
use crate::serializer::{Codec, CodecFactory, Serializer};
use crate::types::{RuntimeType, TypeDescriptor, TypeKind, CLOSURE_STUB_ID, PROXY_STUB_ID};

/// Namespaces that may not be serialized structurally under strict typing
/// unless the descriptor is explicitly marked serializable.
const RESERVED_NAMESPACES: [&str; 3] = ["std::", "core::", "alloc::"];

pub struct ClassInfo {
    name_bytes: NameBytes,
    static_id: Option<u16>,
    serializer: Option<Arc<Serializer>>,
}

impl ClassInfo {
    fn new(descriptor: &TypeDescriptor, registry: &TypeRegistry, ty: RuntimeType) -> ClassInfo {
        // Dynamically generated types never expose their name or id on the
        // wire; they travel under the fixed stub ids.
        let static_id = if descriptor.is_closure_like() {
            Some(CLOSURE_STUB_ID)
        } else if descriptor.is_proxy() {
            Some(PROXY_STUB_ID)
        } else {
            registry.id_of(ty)
        };
        ClassInfo {
            name_bytes: NameBytes::from_name(descriptor.name()),
            static_id,
            serializer: None,
        }
    }

    pub fn static_id(&self) -> Option<u16> {
        self.static_id
    }

    pub fn name_bytes(&self) -> &NameBytes {
        &self.name_bytes
    }
}

/// How a type identifies itself on the wire.
pub(crate) enum WireIdentity {
    Static(u16),
    Named(NameBytes),
}

#[derive(Default)]
pub struct SerializerCatalog {
    // Indexed by runtime type handle.
    infos: Vec<Option<ClassInfo>>,
    factory: Option<Arc<dyn CodecFactory>>,
}

impl SerializerCatalog {
    pub fn new() -> SerializerCatalog {
        SerializerCatalog::default()
    }

    pub(crate) fn set_factory(&mut self, factory: Arc<dyn CodecFactory>) {
        self.factory = Some(factory);
    }

    fn ensure_info(
        &mut self,
        ty: RuntimeType,
        universe: &TypeUniverse,
        registry: &TypeRegistry,
    ) {
        let slot = ty.index();
        if slot >= self.infos.len() {
            self.infos.resize_with(slot + 1, || None);
        }
        if self.infos[slot].is_none() {
            let info = ClassInfo::new(universe.descriptor(ty), registry, ty);
            self.infos[slot] = Some(info);
        }
    }

    pub(crate) fn info(&self, ty: RuntimeType) -> Option<&ClassInfo> {
        self.infos.get(ty.index()).and_then(Option::as_ref)
    }

    /// Records a freshly assigned static id on an already-cached record.
    pub(crate) fn bind_static_id(&mut self, ty: RuntimeType, id: u16) {
        if let Some(Some(info)) = self.infos.get_mut(ty.index()) {
            info.static_id = Some(id);
        }
    }

    pub(crate) fn wire_identity(
        &mut self,
        ty: RuntimeType,
        universe: &TypeUniverse,
        registry: &TypeRegistry,
    ) -> WireIdentity {
        self.ensure_info(ty, universe, registry);
        match self.infos.get(ty.index()).and_then(Option::as_ref) {
            Some(info) => match info.static_id {
                Some(id) => WireIdentity::Static(id),
                None => WireIdentity::Named(info.name_bytes.clone()),
            },
            // ensure_info just filled the slot; keep a sound fallback anyway.
            None => WireIdentity::Named(NameBytes::from_name(universe.descriptor(ty).name())),
        }
    }

    /// The serializer for a type, selecting one on first use.
    pub(crate) fn get_serializer(
        &mut self,
        ty: RuntimeType,
        universe: &TypeUniverse,
        registry: &TypeRegistry,
        config: &Config,
    ) -> Result<Arc<Serializer>, Error> {
        if let Some(Some(info)) = self.infos.get(ty.index()) {
            if let Some(serializer) = &info.serializer {
                return Ok(serializer.clone());
            }
        }
        self.ensure_info(ty, universe, registry);
        let descriptor = universe.descriptor(ty);
        let codec = match self.factory.as_ref().and_then(|f| f.create(descriptor)) {
            Some(codec) => codec,
            None => select_codec(descriptor, config)?,
        };
        let serializer = Arc::new(Serializer::new(codec, needs_ref(descriptor, config)));
        if let Some(Some(info)) = self.infos.get_mut(ty.index()) {
            info.serializer = Some(serializer.clone());
        }
        Ok(serializer)
    }

    /// Binds a serializer chosen by the caller, replacing any cached one.
    pub(crate) fn register_serializer(
        &mut self,
        ty: RuntimeType,
        codec: Codec,
        universe: &TypeUniverse,
        registry: &TypeRegistry,
        config: &Config,
    ) {
        self.ensure_info(ty, universe, registry);
        let serializer = Arc::new(Serializer::new(codec, needs_ref(universe.descriptor(ty), config)));
        if let Some(Some(info)) = self.infos.get_mut(ty.index()) {
            info.serializer = Some(serializer);
        }
    }
}

fn needs_ref(descriptor: &TypeDescriptor, config: &Config) -> bool {
    config.track_refs && !(descriptor.kind().is_scalar() && config.ignore_basic_refs)
}

/// Picks a codec for a type with no explicit or factory-provided binding.
/// The branches run in a fixed order so precedence is stable.
fn select_codec(descriptor: &TypeDescriptor, config: &Config) -> Result<Codec, Error> {
    let kind = descriptor.kind();
    if descriptor.is_enum_like() {
        return Ok(Codec::Enumeration);
    }
    if let TypeKind::PrimArray(prim) = kind {
        return Ok(Codec::PrimArray(prim));
    }
    if kind == TypeKind::ObjectArray {
        return Ok(Codec::ObjectArray);
    }
    if descriptor.is_closure_like() {
        return Ok(Codec::Closure);
    }
    if descriptor.is_proxy() {
        return Ok(Codec::Proxy);
    }
    let traits = descriptor.traits();
    if traits.serializable && descriptor.external().is_none() && traits.has_legacy_hooks() {
        log::warn!(
            "{} uses legacy stream serialization, which is slow and brittle across versions; \
             declare fields for structural encoding or attach an external codec",
            descriptor.name()
        );
        return Ok(Codec::Legacy);
    }
    if let Some(external) = descriptor.external() {
        return Ok(Codec::External(external.clone()));
    }
    if kind == TypeKind::ByteBuffer {
        return Ok(Codec::ByteBuffer);
    }
    if let Some(codec) = dedicated_codec(kind) {
        return Ok(codec);
    }
    if config.strict_types && !traits.serializable && in_reserved_namespace(descriptor.name()) {
        return Err(Error::unsupported_type(format!(
            "{} lives in a reserved namespace and is not marked serializable; \
             register a codec for it or disable strict typing",
            descriptor.name()
        )));
    }
    Ok(Codec::Struct)
}

fn in_reserved_namespace(name: &str) -> bool {
    RESERVED_NAMESPACES.iter().any(|ns| name.starts_with(ns))
}

/// The codec permanently tied to a kind, for kinds that have one. Struct
/// and enum kinds go through the remaining selection branches instead.
fn dedicated_codec(kind: TypeKind) -> Option<Codec> {
    let codec = match kind {
        TypeKind::Bool => Codec::Bool,
        TypeKind::I8 => Codec::I8,
        TypeKind::I16 => Codec::I16,
        TypeKind::I32 => Codec::I32,
        TypeKind::I64 => Codec::I64,
        TypeKind::F32 => Codec::F32,
        TypeKind::F64 => Codec::F64,
        TypeKind::Char => Codec::Char,
        TypeKind::Str => Codec::Str,
        TypeKind::PrimArray(prim) => Codec::PrimArray(prim),
        TypeKind::ObjectArray => Codec::ObjectArray,
        TypeKind::List => Codec::List,
        TypeKind::Map => Codec::Map,
        TypeKind::AtomicBool => Codec::AtomicBool,
        TypeKind::AtomicI32 => Codec::AtomicI32,
        TypeKind::AtomicI64 => Codec::AtomicI64,
        TypeKind::AtomicRef => Codec::AtomicRef,
        TypeKind::ByteBuffer => Codec::ByteBuffer,
        TypeKind::Timestamp => Codec::Timestamp,
        TypeKind::TypeRef => Codec::TypeRef,
        TypeKind::Capture => Codec::Capture,
        TypeKind::Closure => Codec::Closure,
        TypeKind::Proxy => Codec::Proxy,
        TypeKind::Enum | TypeKind::Struct => return None,
    };
    Some(codec)
}
