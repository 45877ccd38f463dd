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

//! Value codecs and the encode/decode drivers.
//!
//! A [`Serializer`] is an immutable per-type record pairing a [`Codec`] with
//! the precomputed reference-tracking decision. Codecs are stateless; all
//! mutable state lives in the contexts, so a serializer can be shared
//! freely once created.

use std::fmt;
use std::sync::Arc;

use crate::buffer::{Reader, Writer};
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::types::{Prim, RefFlag, RuntimeType, TypeDescriptor};
use crate::value::Value;

pub mod array;
pub mod atomic;
pub mod byte_buffer;
pub mod closure;
pub mod collection;
pub mod datetime;
pub mod enum_;
pub mod external;
pub mod legacy;
pub mod primitive;
pub mod proxy;
pub mod string;
pub mod struct_;
pub mod type_ref;

/// A codec supplied by the application for one concrete type, invoked with
/// full context so it can nest other values and type tags.
pub trait CustomCodec: Send + Sync {
    fn encode(&self, value: &Value, context: &mut WriteContext) -> Result<(), Error>;
    fn decode(&self, ty: RuntimeType, context: &mut ReadContext) -> Result<Value, Error>;
}

/// A hook consulted before the built-in selection branches; returning `None`
/// falls through to them.
pub trait CodecFactory: Send + Sync {
    fn create(&self, descriptor: &TypeDescriptor) -> Option<Codec>;
}

/// An interop codec attached to a single descriptor. It works on raw
/// buffers and cannot nest other values.
pub trait ExternalCodec: Send + Sync {
    fn encode(&self, value: &Value, writer: &mut Writer) -> Result<(), Error>;
    fn decode(&self, ty: RuntimeType, reader: &mut Reader) -> Result<Value, Error>;
}

/// The process-level fallback for types that only support opaque
/// stream serialization.
pub trait LegacyCodec: Send + Sync {
    fn encode(&self, value: &Value) -> anyhow::Result<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> anyhow::Result<Value>;
}

#[derive(Clone)]
pub enum Codec {
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
    Enumeration,
    Struct,
    Closure,
    Proxy,
    Legacy,
    External(Arc<dyn ExternalCodec>),
    Custom(Arc<dyn CustomCodec>),
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Codec::Bool => "Bool",
            Codec::I8 => "I8",
            Codec::I16 => "I16",
            Codec::I32 => "I32",
            Codec::I64 => "I64",
            Codec::F32 => "F32",
            Codec::F64 => "F64",
            Codec::Char => "Char",
            Codec::Str => "Str",
            Codec::PrimArray(prim) => return write!(f, "PrimArray({prim:?})"),
            Codec::ObjectArray => "ObjectArray",
            Codec::List => "List",
            Codec::Map => "Map",
            Codec::AtomicBool => "AtomicBool",
            Codec::AtomicI32 => "AtomicI32",
            Codec::AtomicI64 => "AtomicI64",
            Codec::AtomicRef => "AtomicRef",
            Codec::ByteBuffer => "ByteBuffer",
            Codec::Timestamp => "Timestamp",
            Codec::TypeRef => "TypeRef",
            Codec::Capture => "Capture",
            Codec::Enumeration => "Enumeration",
            Codec::Struct => "Struct",
            Codec::Closure => "Closure",
            Codec::Proxy => "Proxy",
            Codec::Legacy => "Legacy",
            Codec::External(_) => "External",
            Codec::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}

/// Per-type serialization record; immutable once constructed.
#[derive(Debug)]
pub struct Serializer {
    codec: Codec,
    needs_ref: bool,
}

impl Serializer {
    pub(crate) fn new(codec: Codec, needs_ref: bool) -> Serializer {
        Serializer { codec, needs_ref }
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// Whether values of this type would participate in reference tracking
    /// under the configuration the serializer was created with.
    pub fn needs_ref(&self) -> bool {
        self.needs_ref
    }

    pub fn encode(&self, value: &Value, context: &mut WriteContext) -> Result<(), Error> {
        match &self.codec {
            Codec::Bool => primitive::write_bool(value, context),
            Codec::I8 => primitive::write_i8(value, context),
            Codec::I16 => primitive::write_i16(value, context),
            Codec::I32 => primitive::write_i32(value, context),
            Codec::I64 => primitive::write_i64(value, context),
            Codec::F32 => primitive::write_f32(value, context),
            Codec::F64 => primitive::write_f64(value, context),
            Codec::Char => primitive::write_char(value, context),
            Codec::Str => string::write(value, context),
            Codec::PrimArray(prim) => array::write_prim(*prim, value, context),
            Codec::ObjectArray => array::write_object(value, context),
            Codec::List => collection::write_list(value, context),
            Codec::Map => collection::write_map(value, context),
            Codec::AtomicBool => atomic::write_bool(value, context),
            Codec::AtomicI32 => atomic::write_i32(value, context),
            Codec::AtomicI64 => atomic::write_i64(value, context),
            Codec::AtomicRef => atomic::write_ref(value, context),
            Codec::ByteBuffer => byte_buffer::write(value, context),
            Codec::Timestamp => datetime::write(value, context),
            Codec::TypeRef => type_ref::write(value, context),
            Codec::Capture => closure::write_capture(value, context),
            Codec::Enumeration => enum_::write(value, context),
            Codec::Struct => struct_::write(value, context),
            Codec::Closure => closure::write(value, context),
            Codec::Proxy => proxy::write(value, context),
            Codec::Legacy => legacy::write(value, context),
            Codec::External(codec) => external::write(codec.as_ref(), value, context),
            Codec::Custom(codec) => codec.encode(value, context),
        }
    }

    pub fn decode(&self, ty: RuntimeType, context: &mut ReadContext) -> Result<Value, Error> {
        match &self.codec {
            Codec::Bool => primitive::read_bool(context),
            Codec::I8 => primitive::read_i8(context),
            Codec::I16 => primitive::read_i16(context),
            Codec::I32 => primitive::read_i32(context),
            Codec::I64 => primitive::read_i64(context),
            Codec::F32 => primitive::read_f32(context),
            Codec::F64 => primitive::read_f64(context),
            Codec::Char => primitive::read_char(context),
            Codec::Str => string::read(context),
            Codec::PrimArray(prim) => array::read_prim(*prim, context),
            Codec::ObjectArray => array::read_object(context),
            Codec::List => collection::read_list(context),
            Codec::Map => collection::read_map(context),
            Codec::AtomicBool => atomic::read_bool(context),
            Codec::AtomicI32 => atomic::read_i32(context),
            Codec::AtomicI64 => atomic::read_i64(context),
            Codec::AtomicRef => atomic::read_ref(context),
            Codec::ByteBuffer => byte_buffer::read(context),
            Codec::Timestamp => datetime::read(context),
            Codec::TypeRef => type_ref::read(context),
            Codec::Capture => closure::read_capture(context),
            Codec::Enumeration => enum_::read(ty, context),
            Codec::Struct => struct_::read(ty, context),
            Codec::Closure => closure::read(context),
            Codec::Proxy => proxy::read(context),
            Codec::Legacy => legacy::read(context),
            Codec::External(codec) => external::read(codec.as_ref(), ty, context),
            Codec::Custom(codec) => codec.decode(ty, context),
        }
    }
}

/// Writes one value: a ref flag, then for non-null values the type tag and
/// the codec payload.
pub fn write_value(context: &mut WriteContext, value: &Value) -> Result<(), Error> {
    if value.is_null() {
        context.writer.write_i8(RefFlag::Null.into());
        return Ok(());
    }
    let ty = match context.types.type_of_value(value) {
        Some(ty) => ty,
        None => {
            return Err(Error::unsupported_type(
                "value carries no type identity and cannot be encoded",
            ))
        }
    };
    let serializer = context.types.get_serializer(ty, context.config)?;
    context.writer.write_i8(RefFlag::NotNullValue.into());
    context.write_type_id(ty)?;
    serializer.encode(value, context)
}

/// Reads one value written by [`write_value`].
pub fn read_value(context: &mut ReadContext) -> Result<Value, Error> {
    let raw = context.reader.read_i8()?;
    let flag = RefFlag::try_from(raw)
        .map_err(|_| Error::invalid_data(format!("invalid ref flag byte {raw}")))?;
    match flag {
        RefFlag::Null => Ok(Value::Null),
        RefFlag::NotNullValue => {
            let ty = context.read_type_id()?;
            let serializer = context.types.get_serializer(ty, context.config)?;
            context.inc_depth()?;
            let value = serializer.decode(ty, context)?;
            context.dec_depth();
            Ok(value)
        }
        RefFlag::Ref | RefFlag::RefValue => Err(Error::invalid_data(
            "shared-reference flags require a reference-tracking graph codec",
        )),
    }
}

pub(crate) fn value_mismatch(expected: &str) -> Error {
    Error::invalid_data(format!("value does not match the {expected} codec"))
}
