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

//! Arrays of primitive elements are flat: a count followed by the scalar
//! encodings. Object arrays nest full values so elements keep their own
//! type tags and may be null.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::{read_value, value_mismatch, write_value};
use crate::types::Prim;
use crate::value::Value;

pub fn write_prim(prim: Prim, value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    let writer = &mut *context.writer;
    match (prim, value) {
        (Prim::Bool, Value::BoolArray(items)) => {
            writer.write_varuint32(items.len() as u32);
            for v in items {
                writer.write_u8(*v as u8);
            }
        }
        (Prim::I8, Value::I8Array(items)) => {
            writer.write_varuint32(items.len() as u32);
            for v in items {
                writer.write_i8(*v);
            }
        }
        (Prim::I16, Value::I16Array(items)) => {
            writer.write_varuint32(items.len() as u32);
            for v in items {
                writer.write_i16(*v);
            }
        }
        (Prim::I32, Value::I32Array(items)) => {
            writer.write_varuint32(items.len() as u32);
            for v in items {
                writer.write_i32(*v);
            }
        }
        (Prim::I64, Value::I64Array(items)) => {
            writer.write_varuint32(items.len() as u32);
            for v in items {
                writer.write_i64(*v);
            }
        }
        (Prim::F32, Value::F32Array(items)) => {
            writer.write_varuint32(items.len() as u32);
            for v in items {
                writer.write_f32(*v);
            }
        }
        (Prim::F64, Value::F64Array(items)) => {
            writer.write_varuint32(items.len() as u32);
            for v in items {
                writer.write_f64(*v);
            }
        }
        (Prim::Char, Value::CharArray(items)) => {
            writer.write_varuint32(items.len() as u32);
            for v in items {
                writer.write_u32(*v as u32);
            }
        }
        _ => return Err(value_mismatch("primitive array")),
    }
    Ok(())
}

pub fn read_prim(prim: Prim, context: &mut ReadContext) -> Result<Value, Error> {
    let len = context.reader.read_varuint32()? as usize;
    // Preallocation is capped by what the buffer could possibly hold.
    let cap = len.min(context.reader.remaining());
    let value = match prim {
        Prim::Bool => {
            let mut items = Vec::with_capacity(cap);
            for _ in 0..len {
                items.push(context.reader.read_u8()? != 0);
            }
            Value::BoolArray(items)
        }
        Prim::I8 => {
            let mut items = Vec::with_capacity(cap);
            for _ in 0..len {
                items.push(context.reader.read_i8()?);
            }
            Value::I8Array(items)
        }
        Prim::I16 => {
            let mut items = Vec::with_capacity(cap);
            for _ in 0..len {
                items.push(context.reader.read_i16()?);
            }
            Value::I16Array(items)
        }
        Prim::I32 => {
            let mut items = Vec::with_capacity(cap);
            for _ in 0..len {
                items.push(context.reader.read_i32()?);
            }
            Value::I32Array(items)
        }
        Prim::I64 => {
            let mut items = Vec::with_capacity(cap);
            for _ in 0..len {
                items.push(context.reader.read_i64()?);
            }
            Value::I64Array(items)
        }
        Prim::F32 => {
            let mut items = Vec::with_capacity(cap);
            for _ in 0..len {
                items.push(context.reader.read_f32()?);
            }
            Value::F32Array(items)
        }
        Prim::F64 => {
            let mut items = Vec::with_capacity(cap);
            for _ in 0..len {
                items.push(context.reader.read_f64()?);
            }
            Value::F64Array(items)
        }
        Prim::Char => {
            let mut items = Vec::with_capacity(cap);
            for _ in 0..len {
                let raw = context.reader.read_u32()?;
                items.push(crate::serializer::primitive::decode_char(raw)?);
            }
            Value::CharArray(items)
        }
    };
    Ok(value)
}

pub fn write_object(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::ObjectArray(items) => {
            context.writer.write_varuint32(items.len() as u32);
            for item in items {
                write_value(context, item)?;
            }
            Ok(())
        }
        _ => Err(value_mismatch("object array")),
    }
}

pub fn read_object(context: &mut ReadContext) -> Result<Value, Error> {
    let len = context.reader.read_varuint32()? as usize;
    let mut items = Vec::with_capacity(len.min(context.reader.remaining()));
    for _ in 0..len {
        items.push(read_value(context)?);
    }
    Ok(Value::ObjectArray(items))
}
