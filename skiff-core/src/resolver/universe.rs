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

//! Interning table for runtime types.
//!
//! Every distinct fully-qualified name gets exactly one [`RuntimeType`]
//! handle for the process lifetime; handles index the descriptor table
//! directly. The name map doubles as the decode-side resolver for names
//! arriving off the wire.

use std::collections::HashMap;

use crate::error::Error;
use crate::meta::NameBytes;
use crate::types::{Prim, RuntimeType, TypeDescriptor, TypeKind};
use crate::value::Value;

pub struct TypeUniverse {
    descriptors: Vec<TypeDescriptor>,
    by_name: HashMap<NameBytes, RuntimeType>,
    builtins: HashMap<TypeKind, RuntimeType>,
}

impl TypeUniverse {
    pub(crate) fn new() -> TypeUniverse {
        TypeUniverse {
            descriptors: Vec::new(),
            by_name: HashMap::new(),
            builtins: HashMap::new(),
        }
    }

    /// Issues a handle for the descriptor, or returns the existing handle if
    /// the name was interned before. First definition wins.
    pub fn intern(&mut self, descriptor: TypeDescriptor) -> Result<RuntimeType, Error> {
        let name = NameBytes::from_name(descriptor.name());
        if name.len() > u16::MAX as usize {
            return Err(Error::invalid_data(format!(
                "type name of {} bytes does not fit the wire format",
                name.len()
            )));
        }
        if let Some(&existing) = self.by_name.get(&name) {
            return Ok(existing);
        }
        Ok(self.insert(name, descriptor))
    }

    /// Startup path for the fixed built-in set; names are static and unique.
    pub(crate) fn intern_builtin(&mut self, descriptor: TypeDescriptor) -> RuntimeType {
        let name = NameBytes::from_name(descriptor.name());
        let kind = descriptor.kind();
        let ty = self.insert(name, descriptor);
        self.builtins.insert(kind, ty);
        ty
    }

    fn insert(&mut self, name: NameBytes, descriptor: TypeDescriptor) -> RuntimeType {
        let ty = RuntimeType(self.descriptors.len() as u32);
        self.descriptors.push(descriptor);
        self.by_name.insert(name, ty);
        ty
    }

    pub fn descriptor(&self, ty: RuntimeType) -> &TypeDescriptor {
        &self.descriptors[ty.index()]
    }

    /// The handle of the built-in type for a fixed kind; `None` for kinds
    /// that only exist through user descriptors, such as structs and enums.
    pub fn builtin(&self, kind: TypeKind) -> Option<RuntimeType> {
        self.builtins.get(&kind).copied()
    }

    /// Name resolution for the decode path; `None` means the name does not
    /// exist in this process.
    pub fn resolve_name(&self, name: &NameBytes) -> Option<RuntimeType> {
        self.by_name.get(name).copied()
    }

    /// The type a value instantiates; `None` only for null values, which
    /// carry no type identity.
    pub fn type_of_value(&self, value: &Value) -> Option<RuntimeType> {
        match value {
            Value::Enum { ty, .. } => Some(*ty),
            Value::Struct { ty, .. } => Some(*ty),
            other => other.static_kind().and_then(|kind| self.builtin(kind)),
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Built-in descriptors in registration order: the three fast boxed-number
/// types first, the two stubs right after, then the remaining fixed set.
pub(crate) fn builtin_descriptors() -> Vec<TypeDescriptor> {
    let prim_arrays = [
        ("bool[]", Prim::Bool),
        ("i8[]", Prim::I8),
        ("i16[]", Prim::I16),
        ("i32[]", Prim::I32),
        ("i64[]", Prim::I64),
        ("f32[]", Prim::F32),
        ("f64[]", Prim::F64),
        ("char[]", Prim::Char),
    ];

    let mut out = vec![
        TypeDescriptor::new("i64", TypeKind::I64).serializable(),
        TypeDescriptor::new("i32", TypeKind::I32).serializable(),
        TypeDescriptor::new("f64", TypeKind::F64).serializable(),
        TypeDescriptor::closure("closure"),
        TypeDescriptor::proxy("proxy"),
        TypeDescriptor::new("bool", TypeKind::Bool).serializable(),
        TypeDescriptor::new("i8", TypeKind::I8).serializable(),
        TypeDescriptor::new("i16", TypeKind::I16).serializable(),
        TypeDescriptor::new("char", TypeKind::Char).serializable(),
        TypeDescriptor::new("f32", TypeKind::F32).serializable(),
        TypeDescriptor::new("string", TypeKind::Str).serializable(),
    ];
    for (name, prim) in prim_arrays {
        out.push(TypeDescriptor::new(name, TypeKind::PrimArray(prim)).serializable());
    }
    out.extend([
        TypeDescriptor::new("object[]", TypeKind::ObjectArray).serializable(),
        TypeDescriptor::new("list", TypeKind::List).serializable(),
        TypeDescriptor::new("map", TypeKind::Map).serializable(),
        TypeDescriptor::new("atomic.bool", TypeKind::AtomicBool).serializable(),
        TypeDescriptor::new("atomic.i32", TypeKind::AtomicI32).serializable(),
        TypeDescriptor::new("atomic.i64", TypeKind::AtomicI64).serializable(),
        TypeDescriptor::new("atomic.ref", TypeKind::AtomicRef).serializable(),
        TypeDescriptor::new("bytes", TypeKind::ByteBuffer).serializable(),
        TypeDescriptor::new("timestamp", TypeKind::Timestamp).serializable(),
        TypeDescriptor::new("type", TypeKind::TypeRef).serializable(),
        TypeDescriptor::new("closure.capture", TypeKind::Capture).serializable(),
    ]);
    out
}
