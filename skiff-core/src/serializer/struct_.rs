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

//! Structural encoding: field values in descriptor order, no names and no
//! count on the wire. Both sides must agree on the descriptor, which the
//! type tag in front of the payload guarantees.

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::{read_value, value_mismatch, write_value};
use crate::types::RuntimeType;
use crate::value::Value;

pub fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Struct { ty, fields } => {
            let declared = context.types.descriptor(*ty).fields().len();
            if fields.len() != declared {
                return Err(Error::invalid_data(format!(
                    "{} declares {declared} fields but the value holds {}",
                    context.types.descriptor(*ty).name(),
                    fields.len()
                )));
            }
            for field in fields {
                write_value(context, field)?;
            }
            Ok(())
        }
        _ => Err(value_mismatch("struct")),
    }
}

pub fn read(ty: RuntimeType, context: &mut ReadContext) -> Result<Value, Error> {
    let declared = context.types.descriptor(ty).fields().len();
    let mut fields = Vec::with_capacity(declared);
    for _ in 0..declared {
        fields.push(read_value(context)?);
    }
    Ok(Value::Struct { ty, fields })
}
