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

//! Closures cannot serialize their compiled form, so they travel as a
//! capture record: the invocation target plus the captured environment.
//! The generated type name stays on the writer side; the wire only ever
//! sees the closure stub id and the surrogate record.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::{read_value, value_mismatch, write_value};
use crate::value::{CaptureRecord, Value};

pub fn write_capture(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Capture(record) => {
            context.writer.write_varuint32(record.target.len() as u32);
            context.writer.write_bytes(record.target.as_bytes());
            context.writer.write_varuint32(record.captured.len() as u32);
            for item in &record.captured {
                write_value(context, item)?;
            }
            Ok(())
        }
        _ => Err(value_mismatch("capture record")),
    }
}

pub fn read_capture(context: &mut ReadContext) -> Result<Value, Error> {
    let len = context.reader.read_varuint32()? as usize;
    let target = context.reader.read_utf8(len)?;
    let count = context.reader.read_varuint32()? as usize;
    let mut captured = Vec::with_capacity(count.min(context.reader.remaining()));
    for _ in 0..count {
        captured.push(read_value(context)?);
    }
    Ok(Value::Capture(CaptureRecord { target, captured }))
}

pub fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Closure(record) => write_value(context, &Value::Capture(record.clone())),
        _ => Err(value_mismatch("closure")),
    }
}

pub fn read(context: &mut ReadContext) -> Result<Value, Error> {
    match read_value(context)? {
        Value::Capture(record) => Ok(Value::Closure(record)),
        _ => Err(Error::invalid_data(
            "closure payload must be a capture record",
        )),
    }
}
