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

use std::sync::Arc;

use skiff::{
    Codec, CodecFactory, Error, ExternalCodec, Prim, Reader, Skiff, TypeDescriptor, TypeKind,
    Value, Writer,
};

struct NullExternal;

impl ExternalCodec for NullExternal {
    fn encode(&self, _value: &Value, _writer: &mut Writer) -> Result<(), Error> {
        Ok(())
    }

    fn decode(&self, _ty: skiff::RuntimeType, _reader: &mut Reader) -> Result<Value, Error> {
        Ok(Value::Null)
    }
}

#[test]
fn test_struct_is_the_default() {
    let mut skiff = Skiff::default();
    let ty = skiff
        .define(TypeDescriptor::structure("sel.Plain", &["a"]))
        .unwrap();
    let serializer = skiff.get_serializer(ty).unwrap();
    assert!(matches!(serializer.codec(), Codec::Struct));

    // Unmarked types outside reserved namespaces still encode structurally.
    let bare = skiff
        .define(TypeDescriptor::new("sel.Bare", TypeKind::Struct))
        .unwrap();
    let serializer = skiff.get_serializer(bare).unwrap();
    assert!(matches!(serializer.codec(), Codec::Struct));
}

#[test]
fn test_enum_like_selection() {
    let mut skiff = Skiff::default();
    let color = skiff
        .define(TypeDescriptor::enumeration("sel.Color", &["RED", "GREEN"]))
        .unwrap();
    let serializer = skiff.get_serializer(color).unwrap();
    assert!(matches!(serializer.codec(), Codec::Enumeration));

    // A refinement of an enum is enum-like regardless of its own kind.
    let variant = skiff
        .define(TypeDescriptor::variant_of("sel.Color$1", color))
        .unwrap();
    let serializer = skiff.get_serializer(variant).unwrap();
    assert!(matches!(serializer.codec(), Codec::Enumeration));
}

#[test]
fn test_array_selection() {
    let mut skiff = Skiff::default();
    let ints = skiff
        .define(TypeDescriptor::new(
            "sel.IntArray",
            TypeKind::PrimArray(Prim::I32),
        ))
        .unwrap();
    let serializer = skiff.get_serializer(ints).unwrap();
    assert!(matches!(serializer.codec(), Codec::PrimArray(Prim::I32)));

    let objects = skiff.builtin(TypeKind::ObjectArray).unwrap();
    let serializer = skiff.get_serializer(objects).unwrap();
    assert!(matches!(serializer.codec(), Codec::ObjectArray));
}

#[test]
fn test_closure_and_proxy_selection() {
    let mut skiff = Skiff::default();
    let closure = skiff
        .define(TypeDescriptor::closure("app.Job$$Lambda$17"))
        .unwrap();
    let serializer = skiff.get_serializer(closure).unwrap();
    assert!(matches!(serializer.codec(), Codec::Closure));

    // The name marker alone makes a type closure-like.
    let marked = skiff
        .define(TypeDescriptor::structure("app.run::{{closure}}", &[]))
        .unwrap();
    let serializer = skiff.get_serializer(marked).unwrap();
    assert!(matches!(serializer.codec(), Codec::Closure));

    let proxy = skiff.define(TypeDescriptor::proxy("app.ActorProxy")).unwrap();
    let serializer = skiff.get_serializer(proxy).unwrap();
    assert!(matches!(serializer.codec(), Codec::Proxy));
}

#[test]
fn test_legacy_hooks_selection() {
    let mut skiff = Skiff::default();
    let stream = skiff
        .define(
            TypeDescriptor::structure("sel.StreamHooked", &["f"])
                .serializable()
                .with_stream_hooks(),
        )
        .unwrap();
    let serializer = skiff.get_serializer(stream).unwrap();
    assert!(matches!(serializer.codec(), Codec::Legacy));

    let replace = skiff
        .define(
            TypeDescriptor::structure("sel.ReplaceHooked", &["f"])
                .serializable()
                .with_replace_hooks(),
        )
        .unwrap();
    let serializer = skiff.get_serializer(replace).unwrap();
    assert!(matches!(serializer.codec(), Codec::Legacy));

    // Hooks without the serializable marker do not trigger the fallback.
    let unmarked = skiff
        .define(TypeDescriptor::structure("sel.HookedUnmarked", &["f"]).with_stream_hooks())
        .unwrap();
    let serializer = skiff.get_serializer(unmarked).unwrap();
    assert!(matches!(serializer.codec(), Codec::Struct));
}

#[test]
fn test_external_selection() {
    let mut skiff = Skiff::default();
    let plain = skiff
        .define(
            TypeDescriptor::structure("sel.External", &[]).externalizable(Arc::new(NullExternal)),
        )
        .unwrap();
    let serializer = skiff.get_serializer(plain).unwrap();
    assert!(matches!(serializer.codec(), Codec::External(_)));

    // An external codec takes precedence over legacy hooks.
    let hooked = skiff
        .define(
            TypeDescriptor::structure("sel.ExternalHooked", &[])
                .serializable()
                .with_stream_hooks()
                .externalizable(Arc::new(NullExternal)),
        )
        .unwrap();
    let serializer = skiff.get_serializer(hooked).unwrap();
    assert!(matches!(serializer.codec(), Codec::External(_)));
}

#[test]
fn test_byte_buffer_selection() {
    let mut skiff = Skiff::default();
    let builtin = skiff.builtin(TypeKind::ByteBuffer).unwrap();
    let serializer = skiff.get_serializer(builtin).unwrap();
    assert!(matches!(serializer.codec(), Codec::ByteBuffer));

    let custom = skiff
        .define(TypeDescriptor::new("sel.Blob", TypeKind::ByteBuffer))
        .unwrap();
    let serializer = skiff.get_serializer(custom).unwrap();
    assert!(matches!(serializer.codec(), Codec::ByteBuffer));
}

#[test]
fn test_builtin_kind_selection() {
    let mut skiff = Skiff::default();
    let cases = [
        (TypeKind::Bool, Codec::Bool),
        (TypeKind::I8, Codec::I8),
        (TypeKind::Char, Codec::Char),
        (TypeKind::Str, Codec::Str),
        (TypeKind::List, Codec::List),
        (TypeKind::Map, Codec::Map),
        (TypeKind::AtomicBool, Codec::AtomicBool),
        (TypeKind::AtomicI32, Codec::AtomicI32),
        (TypeKind::AtomicI64, Codec::AtomicI64),
        (TypeKind::AtomicRef, Codec::AtomicRef),
        (TypeKind::Timestamp, Codec::Timestamp),
        (TypeKind::TypeRef, Codec::TypeRef),
        (TypeKind::Capture, Codec::Capture),
    ];
    for (kind, expected) in cases {
        let ty = skiff.builtin(kind).unwrap();
        let serializer = skiff.get_serializer(ty).unwrap();
        assert_eq!(
            std::mem::discriminant(serializer.codec()),
            std::mem::discriminant(&expected),
            "kind {kind:?}"
        );
    }
}

#[test]
fn test_strict_mode_rejects_reserved_namespaces() {
    if skiff_core::error::should_panic_on_error() {
        return;
    }
    let mut skiff = Skiff::default();
    for name in ["std::vec::Vec", "core::cell::RefCell", "alloc::rc::Rc"] {
        let ty = skiff
            .define(TypeDescriptor::structure(name, &[]))
            .unwrap();
        let err = skiff.get_serializer(ty).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)), "{name}");
    }

    // The serializable marker lifts the rejection.
    let marked = skiff
        .define(TypeDescriptor::structure("std::ops::Range", &["start", "end"]).serializable())
        .unwrap();
    let serializer = skiff.get_serializer(marked).unwrap();
    assert!(matches!(serializer.codec(), Codec::Struct));

    // So does disabling strict typing.
    let mut lax = Skiff::default().strict_types(false);
    let ty = lax
        .define(TypeDescriptor::structure("std::vec::Vec", &[]))
        .unwrap();
    let serializer = lax.get_serializer(ty).unwrap();
    assert!(matches!(serializer.codec(), Codec::Struct));
}

#[test]
fn test_explicit_override_wins() {
    let mut skiff = Skiff::default();
    let ty = skiff
        .define(TypeDescriptor::structure("sel.Overridden", &[]))
        .unwrap();
    skiff.register_serializer(ty, Codec::ByteBuffer);
    let serializer = skiff.get_serializer(ty).unwrap();
    assert!(matches!(serializer.codec(), Codec::ByteBuffer));

    // Re-registering replaces the previous override.
    skiff.register_serializer(ty, Codec::Str);
    let serializer = skiff.get_serializer(ty).unwrap();
    assert!(matches!(serializer.codec(), Codec::Str));
}

struct BlobFactory;

impl CodecFactory for BlobFactory {
    fn create(&self, descriptor: &TypeDescriptor) -> Option<Codec> {
        if descriptor.name().starts_with("blob.") {
            Some(Codec::ByteBuffer)
        } else {
            None
        }
    }
}

#[test]
fn test_codec_factory_hook() {
    let mut skiff = Skiff::default().codec_factory(BlobFactory);
    let blob = skiff
        .define(TypeDescriptor::structure("blob.Payload", &[]))
        .unwrap();
    let serializer = skiff.get_serializer(blob).unwrap();
    assert!(matches!(serializer.codec(), Codec::ByteBuffer));

    // None from the factory falls through to the built-in selection.
    let plain = skiff
        .define(TypeDescriptor::structure("sel.Unclaimed", &["x"]))
        .unwrap();
    let serializer = skiff.get_serializer(plain).unwrap();
    assert!(matches!(serializer.codec(), Codec::Struct));

    // An explicit registration beats the factory.
    let claimed = skiff
        .define(TypeDescriptor::structure("blob.Claimed", &[]))
        .unwrap();
    skiff.register_serializer(claimed, Codec::Str);
    let serializer = skiff.get_serializer(claimed).unwrap();
    assert!(matches!(serializer.codec(), Codec::Str));
}

#[test]
fn test_needs_ref_matrix() {
    // Tracking disabled: nothing tracks.
    let mut skiff = Skiff::default();
    let ty = skiff
        .define(TypeDescriptor::structure("refs.Off", &[]))
        .unwrap();
    assert!(!skiff.get_serializer(ty).unwrap().needs_ref());
    let i64_ty = skiff.builtin(TypeKind::I64).unwrap();
    assert!(!skiff.get_serializer(i64_ty).unwrap().needs_ref());

    // Tracking enabled: scalars stay exempt by default.
    let mut skiff = Skiff::default().track_refs(true);
    let ty = skiff
        .define(TypeDescriptor::structure("refs.On", &[]))
        .unwrap();
    assert!(skiff.get_serializer(ty).unwrap().needs_ref());
    let i64_ty = skiff.builtin(TypeKind::I64).unwrap();
    assert!(!skiff.get_serializer(i64_ty).unwrap().needs_ref());
    let str_ty = skiff.builtin(TypeKind::Str).unwrap();
    assert!(skiff.get_serializer(str_ty).unwrap().needs_ref());

    // Tracking enabled for scalars too.
    let mut skiff = Skiff::default().track_refs(true).ignore_basic_refs(false);
    let i64_ty = skiff.builtin(TypeKind::I64).unwrap();
    assert!(skiff.get_serializer(i64_ty).unwrap().needs_ref());
}

#[test]
fn test_serializers_are_cached() {
    let mut skiff = Skiff::default();
    let ty = skiff
        .define(TypeDescriptor::structure("sel.Cached", &[]))
        .unwrap();
    let first = skiff.get_serializer(ty).unwrap();
    let second = skiff.get_serializer(ty).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}
