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

//! The dynamic value union exchanged between workers.
//!
//! Task arguments and results travel as [`Value`] trees. Scalar and
//! container variants map to fixed built-in types; `Enum` and `Struct` carry
//! the handle of the application type they instantiate. Closures and proxies
//! carry only their stable surrogate data, never their generated type.

use chrono::NaiveDateTime;

use crate::types::{Prim, RuntimeType, TypeKind};

/// Stable surrogate for a serializable closure: the fully qualified path of
/// the target function plus the captured environment, in capture order.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureRecord {
    pub target: String,
    pub captured: Vec<Value>,
}

impl CaptureRecord {
    pub fn new<S: Into<String>>(target: S, captured: Vec<Value>) -> Self {
        CaptureRecord {
            target: target.into(),
            captured,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    Str(String),
    BoolArray(Vec<bool>),
    I8Array(Vec<i8>),
    I16Array(Vec<i16>),
    I32Array(Vec<i32>),
    I64Array(Vec<i64>),
    F32Array(Vec<f32>),
    F64Array(Vec<f64>),
    CharArray(Vec<char>),
    /// Array with non-primitive, possibly mixed element types.
    ObjectArray(Vec<Value>),
    List(Vec<Value>),
    /// Insertion-ordered key/value pairs; ordering is preserved across the
    /// wire so both peers replay entries identically.
    Map(Vec<(Value, Value)>),
    AtomicBool(bool),
    AtomicI32(i32),
    AtomicI64(i64),
    AtomicRef(Box<Value>),
    Bytes(Vec<u8>),
    Timestamp(NaiveDateTime),
    /// A type handle as a first-class value.
    Type(RuntimeType),
    /// A closure capture record travelling as an ordinary value.
    Capture(CaptureRecord),
    Enum {
        ty: RuntimeType,
        ordinal: u32,
    },
    Struct {
        ty: RuntimeType,
        fields: Vec<Value>,
    },
    Closure(CaptureRecord),
    Proxy {
        handler: Box<Value>,
        contracts: Vec<RuntimeType>,
    },
}

impl Value {
    /// The fixed built-in kind of this value, or `None` when the type handle
    /// is carried by the value itself (`Enum`, `Struct`) or the value is
    /// null.
    pub fn static_kind(&self) -> Option<TypeKind> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(TypeKind::Bool),
            Value::I8(_) => Some(TypeKind::I8),
            Value::I16(_) => Some(TypeKind::I16),
            Value::I32(_) => Some(TypeKind::I32),
            Value::I64(_) => Some(TypeKind::I64),
            Value::F32(_) => Some(TypeKind::F32),
            Value::F64(_) => Some(TypeKind::F64),
            Value::Char(_) => Some(TypeKind::Char),
            Value::Str(_) => Some(TypeKind::Str),
            Value::BoolArray(_) => Some(TypeKind::PrimArray(Prim::Bool)),
            Value::I8Array(_) => Some(TypeKind::PrimArray(Prim::I8)),
            Value::I16Array(_) => Some(TypeKind::PrimArray(Prim::I16)),
            Value::I32Array(_) => Some(TypeKind::PrimArray(Prim::I32)),
            Value::I64Array(_) => Some(TypeKind::PrimArray(Prim::I64)),
            Value::F32Array(_) => Some(TypeKind::PrimArray(Prim::F32)),
            Value::F64Array(_) => Some(TypeKind::PrimArray(Prim::F64)),
            Value::CharArray(_) => Some(TypeKind::PrimArray(Prim::Char)),
            Value::ObjectArray(_) => Some(TypeKind::ObjectArray),
            Value::List(_) => Some(TypeKind::List),
            Value::Map(_) => Some(TypeKind::Map),
            Value::AtomicBool(_) => Some(TypeKind::AtomicBool),
            Value::AtomicI32(_) => Some(TypeKind::AtomicI32),
            Value::AtomicI64(_) => Some(TypeKind::AtomicI64),
            Value::AtomicRef(_) => Some(TypeKind::AtomicRef),
            Value::Bytes(_) => Some(TypeKind::ByteBuffer),
            Value::Timestamp(_) => Some(TypeKind::Timestamp),
            Value::Type(_) => Some(TypeKind::TypeRef),
            Value::Capture(_) => Some(TypeKind::Capture),
            Value::Enum { .. } => None,
            Value::Struct { .. } => None,
            Value::Closure(_) => Some(TypeKind::Closure),
            Value::Proxy { .. } => Some(TypeKind::Proxy),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
