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

use skiff::{Error, Prim, Skiff, TypeDescriptor, TypeKind};

#[test]
fn test_builtin_ids_pinned() {
    let skiff = Skiff::default();
    let pinned = [
        (TypeKind::I64, 0u16),
        (TypeKind::I32, 1),
        (TypeKind::F64, 2),
        (TypeKind::Closure, 3),
        (TypeKind::Proxy, 4),
        (TypeKind::Bool, 5),
        (TypeKind::I8, 6),
        (TypeKind::I16, 7),
        (TypeKind::Char, 8),
        (TypeKind::F32, 9),
        (TypeKind::Str, 10),
        (TypeKind::PrimArray(Prim::Bool), 11),
        (TypeKind::PrimArray(Prim::I8), 12),
        (TypeKind::PrimArray(Prim::I16), 13),
        (TypeKind::PrimArray(Prim::I32), 14),
        (TypeKind::PrimArray(Prim::I64), 15),
        (TypeKind::PrimArray(Prim::F32), 16),
        (TypeKind::PrimArray(Prim::F64), 17),
        (TypeKind::PrimArray(Prim::Char), 18),
        (TypeKind::ObjectArray, 19),
        (TypeKind::List, 20),
        (TypeKind::Map, 21),
        (TypeKind::AtomicBool, 22),
        (TypeKind::AtomicI32, 23),
        (TypeKind::AtomicI64, 24),
        (TypeKind::AtomicRef, 25),
        (TypeKind::ByteBuffer, 26),
        (TypeKind::Timestamp, 27),
        (TypeKind::TypeRef, 28),
        (TypeKind::Capture, 29),
    ];
    for &(kind, id) in &pinned {
        let ty = skiff.builtin(kind).unwrap();
        assert_eq!(skiff.id_of(ty), Some(id), "kind {kind:?}");
        assert_eq!(skiff.type_of(id), Some(ty), "id {id}");
    }
    assert_eq!(skiff.registered_types().len(), pinned.len());
    // Enum and struct shapes only exist as user definitions.
    assert!(skiff.builtin(TypeKind::Enum).is_none());
    assert!(skiff.builtin(TypeKind::Struct).is_none());
}

#[test]
fn test_auto_ids_start_after_builtins() {
    let mut skiff = Skiff::default();
    let a = skiff
        .define(TypeDescriptor::structure("app.A", &["x"]))
        .unwrap();
    let b = skiff
        .define(TypeDescriptor::structure("app.B", &["y"]))
        .unwrap();
    assert_eq!(skiff.register(a).unwrap(), 30);
    assert_eq!(skiff.register(b).unwrap(), 31);
    assert_eq!(skiff.type_of(30), Some(a));
    assert_eq!(skiff.id_of(b), Some(31));
}

#[test]
fn test_auto_id_fills_gaps() {
    let mut skiff = Skiff::default();
    let a = skiff
        .define(TypeDescriptor::structure("gap.A", &[]))
        .unwrap();
    let b = skiff
        .define(TypeDescriptor::structure("gap.B", &[]))
        .unwrap();
    let c = skiff
        .define(TypeDescriptor::structure("gap.C", &[]))
        .unwrap();
    skiff.register_with_id(a, 31).unwrap();
    // The scan picks the lowest unused id, below an explicit binding.
    assert_eq!(skiff.register(b).unwrap(), 30);
    assert_eq!(skiff.register(c).unwrap(), 32);
}

#[test]
fn test_duplicate_register_rejected() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    let ty = skiff
        .define(TypeDescriptor::structure("dup.T", &[]))
        .unwrap();
    skiff.register(ty).unwrap();
    let err = skiff.register(ty).unwrap_err();
    assert!(matches!(err, Error::DuplicateRegistration(_)));

    // Builtins are already bound at startup.
    let builtin = skiff.builtin(TypeKind::I64).unwrap();
    assert!(skiff.register(builtin).is_err());
}

#[test]
fn test_register_with_id_idempotent() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    let a = skiff
        .define(TypeDescriptor::structure("idem.A", &[]))
        .unwrap();
    let b = skiff
        .define(TypeDescriptor::structure("idem.B", &[]))
        .unwrap();
    skiff.register_with_id(a, 100).unwrap();
    // Same pair again is a no-op.
    skiff.register_with_id(a, 100).unwrap();
    // Same type under another id is a conflict.
    let err = skiff.register_with_id(a, 101).unwrap_err();
    assert!(matches!(err, Error::DuplicateRegistration(_)));
    // Same id for another type is a conflict.
    let err = skiff.register_with_id(b, 100).unwrap_err();
    assert!(matches!(err, Error::DuplicateRegistration(_)));
}

#[test]
fn test_failed_registration_leaves_state_unchanged() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    let a = skiff
        .define(TypeDescriptor::structure("state.A", &[]))
        .unwrap();
    let b = skiff
        .define(TypeDescriptor::structure("state.B", &[]))
        .unwrap();
    skiff.register_with_id(a, 40).unwrap();
    let before = skiff.registered_types();

    assert!(skiff.register_with_id(b, 40).is_err());
    assert!(skiff.register_with_id(a, 41).is_err());
    assert!(skiff.register(a).is_err());

    assert_eq!(skiff.registered_types(), before);
    assert_eq!(skiff.id_of(a), Some(40));
    assert_eq!(skiff.id_of(b), None);
    assert_eq!(skiff.type_of(41), None);
    // The failed calls did not consume the next free id.
    assert_eq!(skiff.register(b).unwrap(), 30);
}

#[test]
fn test_define_same_name_returns_same_handle() {
    let mut skiff = Skiff::default();
    let first = skiff
        .define(TypeDescriptor::structure("same.Name", &["a", "b"]))
        .unwrap();
    let second = skiff
        .define(TypeDescriptor::structure("same.Name", &["a", "b"]))
        .unwrap();
    assert_eq!(first, second);
    // The first definition owns the handle, later ones are lookups.
    let again = skiff
        .define(TypeDescriptor::enumeration("same.Name", &["X"]))
        .unwrap();
    assert_eq!(again, first);
    assert_eq!(skiff.descriptor(first).kind(), TypeKind::Struct);
    assert_eq!(skiff.descriptor(first).fields(), ["a", "b"]);
}

#[test]
fn test_registered_types_sorted_by_id() {
    let mut skiff = Skiff::default();
    let a = skiff
        .define(TypeDescriptor::structure("ord.A", &[]))
        .unwrap();
    let b = skiff
        .define(TypeDescriptor::structure("ord.B", &[]))
        .unwrap();
    let c = skiff
        .define(TypeDescriptor::structure("ord.C", &[]))
        .unwrap();
    skiff.register_with_id(a, 60).unwrap();
    skiff.register_with_id(b, 40).unwrap();
    skiff.register_with_id(c, 50).unwrap();

    let bindings = skiff.registered_types();
    let tail: Vec<(u16, _)> = bindings[bindings.len() - 3..].to_vec();
    assert_eq!(tail, vec![(40, b), (50, c), (60, a)]);
    let ids: Vec<u16> = bindings.iter().map(|&(id, _)| id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn test_unknown_lookups() {
    let mut skiff = Skiff::default();
    assert_eq!(skiff.type_of(9_999), None);
    let ty = skiff
        .define(TypeDescriptor::structure("plain.T", &[]))
        .unwrap();
    assert_eq!(skiff.id_of(ty), None);
}

#[test]
fn test_id_space_exhaustion() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    for id in 30..=u16::MAX {
        let ty = skiff
            .define(TypeDescriptor::structure(format!("bulk.T{id}"), &[]))
            .unwrap();
        skiff.register_with_id(ty, id).unwrap();
    }
    let ty = skiff
        .define(TypeDescriptor::structure("bulk.Overflow", &[]))
        .unwrap();
    let err = skiff.register(ty).unwrap_err();
    let err_msg = format!("{:?}", err);
    assert!(err_msg.contains("65536"), "{err_msg}");
}
