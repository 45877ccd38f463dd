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

use chrono::NaiveDate;
use skiff::{Error, Reader, Skiff, TypeDescriptor, TypeKind, Value};

fn roundtrip(skiff: &mut Skiff, value: Value) {
    let bytes = skiff.serialize(&value).unwrap();
    let decoded = skiff.deserialize(&bytes).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn test_scalar_roundtrip() {
    let mut skiff = Skiff::default();
    let values = vec![
        Value::Null,
        Value::Bool(true),
        Value::Bool(false),
        Value::I8(-8),
        Value::I16(-16),
        Value::I32(i32::MIN),
        Value::I64(i64::MAX),
        Value::F32(3.5),
        Value::F64(-0.125),
        Value::Char('ß'),
        Value::Char('\u{10348}'),
        Value::Str(String::new()),
        Value::Str("hello, runtime".to_string()),
    ];
    for value in values {
        roundtrip(&mut skiff, value);
    }
}

#[test]
fn test_envelope_bytes_pinned() {
    let mut skiff = Skiff::default();
    let bytes = skiff.serialize(&Value::I64(7)).unwrap();
    assert_eq!(
        bytes,
        vec![0x53, 0x4b, 0x00, 0xff, 0x01, 0x00, 0x00, 0, 0, 0, 0, 0, 0, 0, 7]
    );

    let null_bytes = skiff.serialize(&Value::Null).unwrap();
    assert_eq!(null_bytes, vec![0x53, 0x4b, 0x00, 0xfd]);

    let mut tracking = Skiff::default().track_refs(true);
    let bytes = tracking.serialize(&Value::I64(7)).unwrap();
    assert_eq!(bytes[2], 0x01);
}

#[test]
fn test_prim_array_roundtrip() {
    let mut skiff = Skiff::default();
    let values = vec![
        Value::BoolArray(vec![true, false, true]),
        Value::I8Array(vec![]),
        Value::I8Array(vec![-1, 0, 1]),
        Value::I16Array(vec![i16::MIN, i16::MAX]),
        Value::I32Array(vec![7; 100]),
        Value::I64Array(vec![i64::MIN, -1, i64::MAX]),
        Value::F32Array(vec![0.5, -0.5]),
        Value::F64Array(vec![f64::MIN_POSITIVE, 1e300]),
        Value::CharArray(vec!['a', 'é', '\u{10348}']),
    ];
    for value in values {
        roundtrip(&mut skiff, value);
    }
}

#[test]
fn test_object_array_roundtrip() {
    let mut skiff = Skiff::default();
    roundtrip(
        &mut skiff,
        Value::ObjectArray(vec![
            Value::I64(1),
            Value::Null,
            Value::Str("mixed".to_string()),
            Value::F64(2.5),
            Value::ObjectArray(vec![Value::Bool(false)]),
        ]),
    );
}

#[test]
fn test_list_and_map_roundtrip() {
    let mut skiff = Skiff::default();
    roundtrip(
        &mut skiff,
        Value::List(vec![
            Value::List(vec![Value::I32(1), Value::I32(2)]),
            Value::List(vec![]),
            Value::Null,
        ]),
    );

    // Entry order is part of the map's identity.
    roundtrip(
        &mut skiff,
        Value::Map(vec![
            (Value::Str("b".to_string()), Value::I64(2)),
            (Value::Str("a".to_string()), Value::I64(1)),
            (Value::Null, Value::List(vec![Value::Bool(true)])),
        ]),
    );
}

#[test]
fn test_atomic_roundtrip() {
    let mut skiff = Skiff::default();
    let values = vec![
        Value::AtomicBool(true),
        Value::AtomicI32(-42),
        Value::AtomicI64(1 << 40),
        Value::AtomicRef(Box::new(Value::Str("boxed".to_string()))),
        Value::AtomicRef(Box::new(Value::Null)),
    ];
    for value in values {
        roundtrip(&mut skiff, value);
    }
}

#[test]
fn test_bytes_roundtrip() {
    let mut skiff = Skiff::default();
    roundtrip(&mut skiff, Value::Bytes(vec![]));
    roundtrip(&mut skiff, Value::Bytes((0..=255).collect()));
}

#[test]
fn test_timestamp_roundtrip() {
    let mut skiff = Skiff::default();
    let instant = NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_micro_opt(10, 30, 0, 123_456)
        .unwrap();
    roundtrip(&mut skiff, Value::Timestamp(instant));

    let before_epoch = NaiveDate::from_ymd_opt(1961, 4, 12)
        .unwrap()
        .and_hms_micro_opt(6, 7, 0, 1)
        .unwrap();
    roundtrip(&mut skiff, Value::Timestamp(before_epoch));
}

#[test]
fn test_timestamp_out_of_range_rejected() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    let instant = NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let bytes = skiff.serialize(&Value::Timestamp(instant)).unwrap();

    // The trailing eight bytes are the microsecond count.
    for micros in [i64::MAX, i64::MIN] {
        let mut corrupt = bytes.clone();
        let tail = corrupt.len() - 8;
        corrupt[tail..].copy_from_slice(&micros.to_be_bytes());
        let err = skiff.deserialize(&corrupt).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("timestamp"));
    }
}

#[test]
fn test_type_ref_roundtrip() {
    let mut skiff = Skiff::default();
    let registered = skiff
        .define(TypeDescriptor::structure("rt.Registered", &[]))
        .unwrap();
    skiff.register(registered).unwrap();
    roundtrip(&mut skiff, Value::Type(registered));

    // Unregistered types travel by name.
    let named = skiff
        .define(TypeDescriptor::structure("rt.NamedOnly", &[]))
        .unwrap();
    roundtrip(&mut skiff, Value::Type(named));
    roundtrip(
        &mut skiff,
        Value::List(vec![Value::Type(named), Value::Type(named)]),
    );
}

#[test]
fn test_enum_roundtrip() {
    let mut skiff = Skiff::default();
    let state = skiff
        .define(TypeDescriptor::enumeration(
            "task.State",
            &["PENDING", "RUNNING", "DONE"],
        ))
        .unwrap();
    for ordinal in 0..3 {
        roundtrip(&mut skiff, Value::Enum { ty: state, ordinal });
    }
}

#[test]
fn test_enum_ordinal_out_of_range() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    let state = skiff
        .define(TypeDescriptor::enumeration("task.Narrow", &["ONLY"]))
        .unwrap();
    // The writer does not validate ordinals, the reader does.
    let bytes = skiff
        .serialize(&Value::Enum {
            ty: state,
            ordinal: 9,
        })
        .unwrap();
    let err = skiff.deserialize(&bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));

    // A variant-less enum opts out of ordinal validation.
    let open = skiff
        .define(TypeDescriptor::enumeration("task.Open", &[]))
        .unwrap();
    roundtrip(&mut skiff, Value::Enum { ty: open, ordinal: 9 });
}

#[test]
fn test_struct_roundtrip() {
    let mut skiff = Skiff::default();
    let address = skiff
        .define(TypeDescriptor::structure("crew.Address", &["city", "zip"]))
        .unwrap();
    let person = skiff
        .define(TypeDescriptor::structure(
            "crew.Person",
            &["name", "age", "address"],
        ))
        .unwrap();
    skiff.register(person).unwrap();

    let value = Value::Struct {
        ty: person,
        fields: vec![
            Value::Str("Ada".to_string()),
            Value::I32(36),
            Value::Struct {
                ty: address,
                fields: vec![Value::Str("London".to_string()), Value::Str("N1".to_string())],
            },
        ],
    };
    roundtrip(&mut skiff, value);
}

#[test]
fn test_struct_field_count_mismatch() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    let pair = skiff
        .define(TypeDescriptor::structure("crew.Pair", &["a", "b"]))
        .unwrap();
    let err = skiff
        .serialize(&Value::Struct {
            ty: pair,
            fields: vec![Value::I32(1)],
        })
        .unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn test_unregistered_struct_repeats_in_one_message() {
    let mut sender = Skiff::default();
    let mut receiver = Skiff::default();
    let out_ty = sender
        .define(TypeDescriptor::structure("fleet.Node", &["id"]))
        .unwrap();
    let node = receiver
        .define(TypeDescriptor::structure("fleet.Node", &["id"]))
        .unwrap();

    let make = |ty, id| Value::Struct {
        ty,
        fields: vec![Value::I64(id)],
    };
    let value = Value::List(vec![
        make(out_ty, 1),
        make(out_ty, 2),
        make(out_ty, 3),
    ]);
    let bytes = sender.serialize(&value).unwrap();

    let expected = Value::List(vec![make(node, 1), make(node, 2), make(node, 3)]);
    assert_eq!(receiver.deserialize(&bytes).unwrap(), expected);
}

#[test]
fn test_serialize_twice_yields_identical_bytes() {
    let mut skiff = Skiff::default();
    let ty = skiff
        .define(TypeDescriptor::structure("twice.T", &["v"]))
        .unwrap();
    let value = Value::List(vec![
        Value::Struct {
            ty,
            fields: vec![Value::I32(1)],
        },
        Value::Struct {
            ty,
            fields: vec![Value::I32(2)],
        },
    ]);
    let first = skiff.serialize(&value).unwrap();
    // The dynamic id session resets between payloads.
    let second = skiff.serialize(&value).unwrap();
    assert_eq!(first, second);
    assert_eq!(skiff.deserialize(&first).unwrap(), value);
    assert_eq!(skiff.deserialize(&second).unwrap(), value);
}

#[test]
fn test_envelope_errors() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();

    // Wrong magic number.
    let err = skiff.deserialize(&[0x00, 0x01, 0x02]).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));

    // Truncated payload.
    let bytes = skiff.serialize(&Value::I64(7)).unwrap();
    let err = skiff.deserialize(&bytes[..bytes.len() - 1]).unwrap_err();
    assert!(matches!(err, Error::BufferOutOfBound(..)));

    // Trailing garbage after the root value.
    let mut padded = bytes.clone();
    padded.push(0x00);
    let err = skiff.deserialize(&padded).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));

    // Reference flags are reserved.
    let err = skiff.deserialize(&[0x53, 0x4b, 0x00, 0x00]).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn test_track_refs_flag_mismatch() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut tracking = Skiff::default().track_refs(true);
    let bytes = tracking.serialize(&Value::I64(7)).unwrap();

    let mut plain = Skiff::default();
    let err = plain.deserialize(&bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
    // The same engine accepts its own payload.
    assert_eq!(tracking.deserialize(&bytes).unwrap(), Value::I64(7));
}

#[test]
fn test_cross_engine_unregistered_static_id() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut sender = Skiff::default();
    let ty = sender
        .define(TypeDescriptor::structure("solo.T", &["v"]))
        .unwrap();
    sender.register(ty).unwrap();
    let bytes = sender
        .serialize(&Value::Struct {
            ty,
            fields: vec![Value::I32(5)],
        })
        .unwrap();

    let mut receiver = Skiff::default();
    receiver
        .define(TypeDescriptor::structure("solo.T", &["v"]))
        .unwrap();
    // The receiver knows the name but never registered the id.
    let err = receiver.deserialize(&bytes).unwrap_err();
    assert!(matches!(err, Error::DesyncCorruption(_)));
}

#[test]
fn test_invalid_char_scalar_rejected() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    // A lone UTF-16 surrogate is not a char.
    let bytes = [
        0x53, 0x4b, 0x00, 0xff, 0x01, 0x00, 0x08, 0x00, 0x00, 0xd8, 0x00,
    ];
    let err = skiff.deserialize(&bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn test_deeply_nested_payload_rejected() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    // Each block opens another single-element list (static id 20).
    let mut bytes = vec![0x53, 0x4b, 0x00];
    for _ in 0..100_000 {
        bytes.extend_from_slice(&[0xff, 0x01, 0x00, 0x14, 0x01]);
    }
    bytes.push(0xfd);
    let err = skiff.deserialize(&bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
    assert!(err.to_string().contains("nesting"));
}

#[test]
fn test_nesting_limit_is_configurable() {
    // Exactly at the limit.
    let mut skiff = Skiff::default().max_depth(2);
    roundtrip(&mut skiff, Value::List(vec![Value::I64(1)]));

    // Well under the default limit.
    let mut nested = Value::I64(0);
    for _ in 0..32 {
        nested = Value::List(vec![nested]);
    }
    roundtrip(&mut Skiff::default(), nested);

    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let deep = Value::List(vec![Value::List(vec![Value::I64(1)])]);
    let bytes = skiff.serialize(&deep).unwrap();
    let err = skiff.deserialize(&bytes).unwrap_err();
    assert!(matches!(err, Error::InvalidData(_)));
}

#[test]
fn test_sessions_reset_after_payload_operations() {
    let mut skiff = Skiff::default();
    let ty = skiff
        .define(TypeDescriptor::structure("reset.T", &[]))
        .unwrap();
    let bytes = skiff
        .serialize(&Value::Struct { ty, fields: vec![] })
        .unwrap();
    skiff.deserialize(&bytes).unwrap();
    // Payload operations clean up after themselves.
    assert_eq!(skiff.current_read_type(), None);

    let mut reader = Reader::new(&bytes[4..]);
    let read = skiff.read_type_id(&mut reader).unwrap();
    assert_eq!(read, ty);
    assert_eq!(skiff.current_read_type(), Some(ty));
    assert_eq!(skiff.descriptor(read).kind(), TypeKind::Struct);
}
