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

//! Lists and maps nest full values, so heterogeneous elements and nulls
//! come for free. Map entries keep their insertion order on the wire.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::{read_value, value_mismatch, write_value};
use crate::value::Value;

pub fn write_list(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::List(items) => {
            context.writer.write_varuint32(items.len() as u32);
            for item in items {
                write_value(context, item)?;
            }
            Ok(())
        }
        _ => Err(value_mismatch("list")),
    }
}

pub fn read_list(context: &mut ReadContext) -> Result<Value, Error> {
    let len = context.reader.read_varuint32()? as usize;
    let mut items = Vec::with_capacity(len.min(context.reader.remaining()));
    for _ in 0..len {
        items.push(read_value(context)?);
    }
    Ok(Value::List(items))
}

pub fn write_map(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Map(entries) => {
            context.writer.write_varuint32(entries.len() as u32);
            for (key, val) in entries {
                write_value(context, key)?;
                write_value(context, val)?;
            }
            Ok(())
        }
        _ => Err(value_mismatch("map")),
    }
}

pub fn read_map(context: &mut ReadContext) -> Result<Value, Error> {
    let len = context.reader.read_varuint32()? as usize;
    let mut entries = Vec::with_capacity(len.min(context.reader.remaining()));
    for _ in 0..len {
        let key = read_value(context)?;
        let val = read_value(context)?;
        entries.push((key, val));
    }
    Ok(Value::Map(entries))
}
