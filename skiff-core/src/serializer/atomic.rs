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

//! Atomic wrappers serialize as a snapshot of their current contents;
//! the atomicity itself is a process-local property and does not travel.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::{read_value, value_mismatch, write_value};
use crate::value::Value;

pub fn write_bool(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::AtomicBool(v) => {
            context.writer.write_u8(*v as u8);
            Ok(())
        }
        _ => Err(value_mismatch("atomic bool")),
    }
}

pub fn read_bool(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::AtomicBool(context.reader.read_u8()? != 0))
}

pub fn write_i32(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::AtomicI32(v) => {
            context.writer.write_i32(*v);
            Ok(())
        }
        _ => Err(value_mismatch("atomic i32")),
    }
}

pub fn read_i32(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::AtomicI32(context.reader.read_i32()?))
}

pub fn write_i64(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::AtomicI64(v) => {
            context.writer.write_i64(*v);
            Ok(())
        }
        _ => Err(value_mismatch("atomic i64")),
    }
}

pub fn read_i64(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::AtomicI64(context.reader.read_i64()?))
}

pub fn write_ref(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::AtomicRef(inner) => write_value(context, inner),
        _ => Err(value_mismatch("atomic reference")),
    }
}

pub fn read_ref(context: &mut ReadContext) -> Result<Value, Error> {
    Ok(Value::AtomicRef(Box::new(read_value(context)?)))
}
