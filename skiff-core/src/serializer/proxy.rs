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

//! Proxies travel as their invocation handler plus the contracts they
//! implement, encoded as nested type tags. The receiving side can stand
//! the proxy back up from those two pieces.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::{read_value, value_mismatch, write_value};
use crate::value::Value;

pub fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Proxy { handler, contracts } => {
            write_value(context, handler)?;
            context.writer.write_varuint32(contracts.len() as u32);
            for contract in contracts {
                context.write_type_id(*contract)?;
            }
            Ok(())
        }
        _ => Err(value_mismatch("proxy")),
    }
}

pub fn read(context: &mut ReadContext) -> Result<Value, Error> {
    let handler = Box::new(read_value(context)?);
    let count = context.reader.read_varuint32()? as usize;
    let mut contracts = Vec::with_capacity(count.min(context.reader.remaining()));
    for _ in 0..count {
        contracts.push(context.read_type_id()?);
    }
    Ok(Value::Proxy { handler, contracts })
}
