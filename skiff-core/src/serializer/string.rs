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

pub fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Str(s) => {
            context.writer.write_varuint32(s.len() as u32);
            context.writer.write_bytes(s.as_bytes());
            Ok(())
        }
        _ => Err(value_mismatch("string")),
    }
}

pub fn read(context: &mut ReadContext) -> Result<Value, Error> {
    let len = context.reader.read_varuint32()? as usize;
    Ok(Value::Str(context.reader.read_utf8(len)?))
}
