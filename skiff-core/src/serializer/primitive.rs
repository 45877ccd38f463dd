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

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::value_mismatch;
use crate::value::Value;

macro_rules! scalar_codec {
    ($write_fn:ident, $read_fn:ident, $variant:ident, $write:ident, $read:ident, $label:literal) => {
        #[inline(always)]
        pub fn $write_fn(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
            match value {
                Value::$variant(v) => {
                    context.writer.$write(*v);
                    Ok(())
                }
                _ => Err(value_mismatch($label)),
            }
        }

        #[inline(always)]
        pub fn $read_fn(context: &mut ReadContext) -> Result<Value, Error> {
            Ok(Value::$variant(context.reader.$read()?))
        }
    };
}

scalar_codec!(write_i8, read_i8, I8, write_i8, read_i8, "i8");
scalar_codec!(write_i16, read_i16, I16, write_i16, read_i16, "i16");
scalar_codec!(write_i32, read_i32, I32, write_i32, read_i32, "i32");
scalar_codec!(write_i64, read_i64, I64, write_i64, read_i64, "i64");
scalar_codec!(write_f32, read_f32, F32, write_f32, read_f32, "f32");
scalar_codec!(write_f64, read_f64, F64, write_f64, read_f64, "f64");

pub fn write_bool(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Bool(v) => {
            context.writer.write_u8(*v as u8);
            Ok(())
        }
        _ => Err(value_mismatch("bool")),
    }
}

pub fn read_bool(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::Bool(context.reader.read_u8()? != 0))
}

pub fn write_char(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Char(v) => {
            context.writer.write_u32(*v as u32);
            Ok(())
        }
        _ => Err(value_mismatch("char")),
    }
}

pub fn read_char(context: &mut ReadContext) -> Result<Value, Error> {
    let raw = context.reader.read_u32()?;
    Ok(Value::Char(decode_char(raw)?))
}

pub(crate) fn decode_char(raw: u32) -> Result<char, Error> {
    match char::from_u32(raw) {
        Some(c) => Ok(c),
        None => Err(Error::invalid_data(format!(
            "{raw:#010x} is not a valid char scalar"
        ))),
    }
}
