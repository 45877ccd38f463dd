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

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::meta::NameBytes;
use crate::resolver::catalog::{ClassInfo, SerializerCatalog, WireIdentity};
use crate::resolver::registry::TypeRegistry;
use crate::resolver::universe::{builtin_descriptors, TypeUniverse};
use crate::serializer::{Codec, CodecFactory, Serializer};
use crate::types::{
    RuntimeType, TypeDescriptor, TypeKind, F64_TYPE_ID, I32_TYPE_ID, I64_TYPE_ID,
};
use crate::value::Value;

/// The process-wide view of types: the interning universe, the static id
/// registry and the serializer catalog, with the built-in set installed
/// under its fixed ids at construction.
pub struct TypeResolver {
    universe: TypeUniverse,
    registry: TypeRegistry,
    catalog: SerializerCatalog,
    // Handles of i64, i32 and f64 in tag order; compared before any lookup.
    fast: [RuntimeType; 3],
}

impl Default for TypeResolver {
    fn default() -> Self {
        TypeResolver::new()
    }
}

impl TypeResolver {
    pub fn new() -> TypeResolver {
        let mut universe = TypeUniverse::new();
        let mut registry = TypeRegistry::new();
        let mut handles = Vec::new();
        for descriptor in builtin_descriptors() {
            let ty = universe.intern_builtin(descriptor);
            registry.bind(ty, handles.len() as u16);
            handles.push(ty);
        }
        let fast = [
            handles[I64_TYPE_ID as usize],
            handles[I32_TYPE_ID as usize],
            handles[F64_TYPE_ID as usize],
        ];
        TypeResolver {
            universe,
            registry,
            catalog: SerializerCatalog::new(),
            fast,
        }
    }

    pub fn intern(&mut self, descriptor: TypeDescriptor) -> Result<RuntimeType, Error> {
        self.universe.intern(descriptor)
    }

    pub fn descriptor(&self, ty: RuntimeType) -> &TypeDescriptor {
        self.universe.descriptor(ty)
    }

    pub fn builtin(&self, kind: TypeKind) -> Option<RuntimeType> {
        self.universe.builtin(kind)
    }

    pub fn type_of_value(&self, value: &Value) -> Option<RuntimeType> {
        self.universe.type_of_value(value)
    }

    pub fn resolve_name(&self, name: &NameBytes) -> Option<RuntimeType> {
        self.universe.resolve_name(name)
    }

    /// Binds the type to the lowest unused static id.
    pub fn register(&mut self, ty: RuntimeType) -> Result<u16, Error> {
        let id = self.registry.register(ty)?;
        self.propagate_static_id(ty, id);
        Ok(id)
    }

    /// Binds the type to a caller-chosen static id.
    pub fn register_with_id(&mut self, ty: RuntimeType, id: u16) -> Result<(), Error> {
        self.registry.register_with_id(ty, id)?;
        self.propagate_static_id(ty, id);
        Ok(())
    }

    fn propagate_static_id(&mut self, ty: RuntimeType, id: u16) {
        let descriptor = self.universe.descriptor(ty);
        // Stub-encoded types never carry their registry id on the wire.
        if !descriptor.is_closure_like() && !descriptor.is_proxy() {
            self.catalog.bind_static_id(ty, id);
        }
    }

    pub fn id_of(&self, ty: RuntimeType) -> Option<u16> {
        self.registry.id_of(ty)
    }

    pub fn type_of(&self, id: u16) -> Option<RuntimeType> {
        self.registry.type_of(id)
    }

    /// All static bindings ordered by id, built-ins included.
    pub fn registered_types(&self) -> Vec<(u16, RuntimeType)> {
        self.registry.bindings()
    }

    pub fn get_serializer(
        &mut self,
        ty: RuntimeType,
        config: &Config,
    ) -> Result<Arc<Serializer>, Error> {
        self.catalog
            .get_serializer(ty, &self.universe, &self.registry, config)
    }

    pub fn register_serializer(&mut self, ty: RuntimeType, codec: Codec, config: &Config) {
        self.catalog
            .register_serializer(ty, codec, &self.universe, &self.registry, config);
    }

    pub fn set_codec_factory(&mut self, factory: Arc<dyn CodecFactory>) {
        self.catalog.set_factory(factory);
    }

    pub fn class_info(&self, ty: RuntimeType) -> Option<&ClassInfo> {
        self.catalog.info(ty)
    }

    pub(crate) fn fast_id(&self, ty: RuntimeType) -> Option<u16> {
        if ty == self.fast[0] {
            Some(I64_TYPE_ID)
        } else if ty == self.fast[1] {
            Some(I32_TYPE_ID)
        } else if ty == self.fast[2] {
            Some(F64_TYPE_ID)
        } else {
            None
        }
    }

    pub(crate) fn wire_identity(&mut self, ty: RuntimeType) -> WireIdentity {
        self.catalog.wire_identity(ty, &self.universe, &self.registry)
    }
}
