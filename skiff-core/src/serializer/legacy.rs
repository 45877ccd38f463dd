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

//! Opaque fallback for types with self-managed stream serialization. The
//! bytes come from the process-level [`LegacyCodec`](crate::serializer::LegacyCodec)
//! hook and are framed with a length so the payload stays skippable.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::value::Value;

pub fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    let codec = match context.legacy {
        Some(codec) => codec,
        None => {
            return Err(Error::unsupported_type(
                "type selected legacy serialization but no legacy codec is installed",
            ))
        }
    };
    let bytes = codec.encode(value).map_err(Error::legacy)?;
    context.writer.write_varuint32(bytes.len() as u32);
    context.writer.write_bytes(&bytes);
    Ok(())
}

pub fn read(context: &mut ReadContext) -> Result<Value, Error> {
    let codec = match context.legacy {
        Some(codec) => codec,
        None => {
            return Err(Error::unsupported_type(
                "payload requires a legacy codec but none is installed",
            ))
        }
    };
    let len = context.reader.read_varuint32()? as usize;
    let bytes = context.reader.read_bytes(len)?;
    codec.decode(bytes).map_err(Error::legacy)
}
