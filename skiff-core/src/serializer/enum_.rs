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
use crate::types::RuntimeType;
use crate::value::Value;

pub fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Enum { ordinal, .. } => {
            context.writer.write_varuint32(*ordinal);
            Ok(())
        }
        _ => Err(value_mismatch("enum")),
    }
}

/// Variant types share the ordinal space of the enum they refine, so
/// validation runs against the refined descriptor when one is set. A
/// descriptor that declares no variant names opts out of validation.
pub fn read(ty: RuntimeType, context: &mut ReadContext) -> Result<Value, Error> {
    let ordinal = context.reader.read_varuint32()?;
    let descriptor = context.types.descriptor(ty);
    let variants = match descriptor.refines() {
        Some(parent) => context.types.descriptor(parent).variants(),
        None => descriptor.variants(),
    };
    if !variants.is_empty() && ordinal as usize >= variants.len() {
        return Err(Error::invalid_data(format!(
            "ordinal {ordinal} is out of range for {} with {} variants",
            descriptor.name(),
            variants.len()
        )));
    }
    Ok(Value::Enum { ty, ordinal })
}
