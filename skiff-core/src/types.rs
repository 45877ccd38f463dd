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

//! Type handles, type descriptors and wire-level enums.

use std::fmt;
use std::sync::Arc;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::serializer::ExternalCodec;

/// The three hottest boxed-number types keep hard-coded ids and bypass all
/// catalog lookups on the write path.
pub const I64_TYPE_ID: u16 = 0;
pub const I32_TYPE_ID: u16 = 1;
pub const F64_TYPE_ID: u16 = 2;
/// Stub id standing in for any closure type, whose generated name is not
/// stable across process runs.
pub const CLOSURE_STUB_ID: u16 = 3;
/// Stub id standing in for any dynamically generated proxy type.
pub const PROXY_STUB_ID: u16 = 4;

/// Every standalone payload starts with this magic number.
pub const MAGIC_NUMBER: u16 = 0x534b;
/// Envelope flag bit recording the writer's reference-tracking setting.
pub const TRACK_REFS_FLAG: u8 = 0b1;

/// Wire tag introducing a type-identity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum WireTag {
    /// A name record follows.
    Name = 0,
    /// A u16 id follows.
    Id = 1,
}

/// Per-value flag written by the graph driver ahead of the type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(i8)]
pub enum RefFlag {
    Null = -3,
    /// A reference to a value written earlier. Produced only by graph
    /// engines with shared-reference tracking; rejected here.
    Ref = -2,
    NotNullValue = -1,
    /// First occurrence of a tracked referencable value.
    RefValue = 0,
}

/// Primitive element categories for dedicated array serializers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prim {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
}

/// The shape of a runtime type, as the task runtime presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    Str,
    PrimArray(Prim),
    ObjectArray,
    List,
    Map,
    AtomicBool,
    AtomicI32,
    AtomicI64,
    AtomicRef,
    ByteBuffer,
    Timestamp,
    TypeRef,
    Capture,
    Enum,
    Struct,
    Closure,
    Proxy,
}

impl TypeKind {
    /// Boxed scalar categories exempt from reference tracking when the
    /// engine ignores basic types.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            TypeKind::Bool
                | TypeKind::I8
                | TypeKind::I16
                | TypeKind::I32
                | TypeKind::I64
                | TypeKind::F32
                | TypeKind::F64
                | TypeKind::Char
        )
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeKind::PrimArray(_) | TypeKind::ObjectArray)
    }

    /// Types whose identity is generated per process and cannot cross the
    /// wire by name or static id.
    pub fn is_unstable_dynamic(&self) -> bool {
        matches!(self, TypeKind::Closure | TypeKind::Proxy)
    }
}

/// Marker-interface flags carried by a descriptor, mirroring what the host
/// object model declares for the type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeTraits {
    /// The type opted into serialization at all.
    pub serializable: bool,
    /// Declares replacement/restore hooks run around (de)serialization.
    pub replace_hooks: bool,
    /// Declares custom read/write hook methods for its own stream format.
    pub stream_hooks: bool,
}

impl TypeTraits {
    pub fn has_legacy_hooks(&self) -> bool {
        self.replace_hooks || self.stream_hooks
    }
}

/// Opaque, process-stable handle for a runtime type.
///
/// Handles are issued once per distinct fully-qualified name by the type
/// universe; interning the same name twice yields the same handle, which is
/// what makes handles usable as identity map keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuntimeType(pub(crate) u32);

impl RuntimeType {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Everything the codec needs to know about one runtime type.
///
/// Descriptors are the task runtime's stand-in for reflective type metadata:
/// the shape of the type, its marker traits, and (for structs and enums) the
/// orderly list of fields or variants both peers agree on.
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    traits: TypeTraits,
    fields: Vec<String>,
    variants: Vec<String>,
    refines: Option<RuntimeType>,
    external: Option<Arc<dyn ExternalCodec>>,
}

impl TypeDescriptor {
    pub fn new<S: Into<String>>(name: S, kind: TypeKind) -> Self {
        TypeDescriptor {
            name: name.into(),
            kind,
            traits: TypeTraits::default(),
            fields: Vec::new(),
            variants: Vec::new(),
            refines: None,
            external: None,
        }
    }

    /// A plain structural type with named fields in wire order.
    pub fn structure<S: Into<String>>(name: S, fields: &[&str]) -> Self {
        let mut d = TypeDescriptor::new(name, TypeKind::Struct);
        d.fields = fields.iter().map(|f| f.to_string()).collect();
        d.traits.serializable = true;
        d
    }

    /// An enumeration with its variant names in ordinal order.
    pub fn enumeration<S: Into<String>>(name: S, variants: &[&str]) -> Self {
        let mut d = TypeDescriptor::new(name, TypeKind::Enum);
        d.variants = variants.iter().map(|v| v.to_string()).collect();
        d.traits.serializable = true;
        d
    }

    /// A generated subtype refining one variant of `parent`; selected and
    /// encoded as an enumeration of the parent.
    pub fn variant_of<S: Into<String>>(name: S, parent: RuntimeType) -> Self {
        let mut d = TypeDescriptor::new(name, TypeKind::Enum);
        d.refines = Some(parent);
        d.traits.serializable = true;
        d
    }

    pub fn closure<S: Into<String>>(name: S) -> Self {
        let mut d = TypeDescriptor::new(name, TypeKind::Closure);
        d.traits.serializable = true;
        d
    }

    pub fn proxy<S: Into<String>>(name: S) -> Self {
        let mut d = TypeDescriptor::new(name, TypeKind::Proxy);
        d.traits.serializable = true;
        d
    }

    pub fn serializable(mut self) -> Self {
        self.traits.serializable = true;
        self
    }

    pub fn with_replace_hooks(mut self) -> Self {
        self.traits.replace_hooks = true;
        self
    }

    pub fn with_stream_hooks(mut self) -> Self {
        self.traits.stream_hooks = true;
        self
    }

    /// Attaches the self-describing externalizable contract.
    pub fn externalizable(mut self, codec: Arc<dyn ExternalCodec>) -> Self {
        self.external = Some(codec);
        self.traits.serializable = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn traits(&self) -> TypeTraits {
        self.traits
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn refines(&self) -> Option<RuntimeType> {
        self.refines
    }

    pub fn external(&self) -> Option<&Arc<dyn ExternalCodec>> {
        self.external.as_ref()
    }

    pub fn is_enum_like(&self) -> bool {
        self.kind == TypeKind::Enum || self.refines.is_some()
    }

    /// Closure types either say so or carry the compiler's synthesized
    /// `{{closure}}` marker in their generated name.
    pub fn is_closure_like(&self) -> bool {
        self.kind == TypeKind::Closure || self.name.contains("{{closure}}")
    }

    pub fn is_proxy(&self) -> bool {
        self.kind == TypeKind::Proxy
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("traits", &self.traits)
            .finish()
    }
}
