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

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::serializer::value_mismatch;
use crate::value::Value;

// Timestamps travel as microseconds since the Unix epoch.
pub fn write(value: &Value, context: &mut WriteContext) -> Result<(), Error> {
    match value {
        Value::Timestamp(ts) => {
            let dt = ts.and_utc();
            let micros = dt.timestamp() * 1_000_000 + dt.timestamp_subsec_micros() as i64;
            context.writer.write_i64(micros);
            Ok(())
        }
        _ => Err(value_mismatch("timestamp")),
    }
}

pub fn read(context: &mut ReadContext) -> Result<Value, Error> {
    let micros = context.reader.read_i64()?;
    #[allow(deprecated)]
    let epoch = NaiveDateTime::from_timestamp(0, 0);
    match epoch.checked_add_signed(TimeDelta::microseconds(micros)) {
        Some(ts) => Ok(Value::Timestamp(ts)),
        None => Err(Error::invalid_data(format!(
            "timestamp of {micros} microseconds is out of range"
        ))),
    }
}
