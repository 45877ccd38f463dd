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

//! # Skiff
//!
//! Skiff is the object serialization runtime for task processes that need
//! to exchange dynamically typed values. It resolves type identity across
//! process boundaries with compact ids and picks a codec per type from a
//! fixed decision order, so both sides agree on every byte without sharing
//! code.
//!
//! ## Key Features
//!
//! - **Compact type tags**: registered types cost three bytes on the wire
//! - **Name negotiation**: unregistered types send their name once per
//!   message and a two-byte id afterwards
//! - **Closure and proxy stubs**: dynamically generated types travel under
//!   fixed stub ids with a portable surrogate payload
//! - **Pluggable codecs**: per-type overrides, a selection factory hook,
//!   external interop codecs and a legacy stream fallback
//!
//! ## Type Identity
//!
//! A type crosses the wire in one of three ways:
//!
//! - **Static id**: both peers register the type, in the same order, and
//!   it travels as a u16
//! - **Dynamic id**: the first use in a message sends the full name, later
//!   uses a per-message u16
//! - **Stub id**: closures and proxies always travel under fixed ids, with
//!   their invocation surrogate as payload
//!
//! ## Object Serialization
//!
//! Define descriptors for the application types, register the hot ones,
//! and serialize values built from the [`Value`] union:
//!
//! ```rust
//! use skiff::{Error, Skiff, TypeDescriptor, Value};
//!
//! # fn main() -> Result<(), Error> {
//! let mut skiff = Skiff::default();
//! let addr = skiff.define(TypeDescriptor::structure(
//!     "demo.Address",
//!     &["street", "city"],
//! ))?;
//! let person = skiff.define(TypeDescriptor::structure(
//!     "demo.Person",
//!     &["name", "age", "address"],
//! ))?;
//! skiff.register(addr)?;
//! skiff.register(person)?;
//!
//! let value = Value::Struct {
//!     ty: person,
//!     fields: vec![
//!         Value::Str("John Doe".to_string()),
//!         Value::I32(30),
//!         Value::Struct {
//!             ty: addr,
//!             fields: vec![
//!                 Value::Str("123 Main St".to_string()),
//!                 Value::Str("New York".to_string()),
//!             ],
//!         },
//!     ],
//! };
//!
//! let bytes = skiff.serialize(&value)?;
//! assert_eq!(skiff.deserialize(&bytes)?, value);
//! # Ok(())
//! # }
//! ```
//!
//! Types nobody registered still round-trip; they negotiate a dynamic id
//! per message instead of using a static one:
//!
//! ```rust
//! use skiff::{Error, Skiff, TypeDescriptor, Value};
//!
//! # fn main() -> Result<(), Error> {
//! let mut skiff = Skiff::default();
//! let event = skiff.define(TypeDescriptor::structure("demo.Event", &["seq"]))?;
//!
//! let value = Value::List(vec![
//!     Value::Struct { ty: event, fields: vec![Value::I64(1)] },
//!     Value::Struct { ty: event, fields: vec![Value::I64(2)] },
//! ]);
//! // The name "demo.Event" is sent once; the second element reuses a
//! // two-byte dynamic id.
//! let bytes = skiff.serialize(&value)?;
//! assert_eq!(skiff.deserialize(&bytes)?, value);
//! # Ok(())
//! # }
//! ```
//!
//! ## Closures and Proxies
//!
//! A closure value carries its invocation target and captured environment.
//! The compiler-generated type name never reaches the wire:
//!
//! ```rust
//! use skiff::{CaptureRecord, Error, Skiff, Value};
//!
//! # fn main() -> Result<(), Error> {
//! let mut skiff = Skiff::default();
//! let closure = Value::Closure(CaptureRecord::new(
//!     "pipeline::scale",
//!     vec![Value::F64(2.5)],
//! ));
//! let bytes = skiff.serialize(&closure)?;
//! assert_eq!(skiff.deserialize(&bytes)?, closure);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Error`]. Decode errors distinguish
//! a peer whose registrations diverged from ours
//! ([`Error::DesyncCorruption`]) from a type that simply does not exist
//! here ([`Error::UnresolvableType`]):
//!
//! ```rust
//! use skiff::{Error, Skiff, Value};
//!
//! fn parse(bytes: &[u8]) -> Result<Value, Error> {
//!     let mut skiff = Skiff::default();
//!     skiff.deserialize(bytes)
//! }
//!
//! assert!(parse(&[0x00, 0x01, 0x02]).is_err());
//! ```
//!
//! ## Getting Started
//!
//! Add skiff to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! skiff = "0.1"
//! ```
//!
//! Registration order is part of the protocol: peers that register
//! different types, or the same types in a different order, fail decode
//! with a desync error instead of producing wrong values.

pub use skiff_core::{
    buffer::Reader,
    buffer::Writer,
    config::Config,
    error::Error,
    resolver::ReadContext,
    resolver::WriteContext,
    serializer::read_value,
    serializer::write_value,
    serializer::Codec,
    serializer::CodecFactory,
    serializer::CustomCodec,
    serializer::ExternalCodec,
    serializer::LegacyCodec,
    serializer::Serializer,
    skiff::Skiff,
    types::Prim,
    types::RuntimeType,
    types::TypeDescriptor,
    types::TypeKind,
    types::TypeTraits,
    types::CLOSURE_STUB_ID,
    types::F64_TYPE_ID,
    types::I32_TYPE_ID,
    types::I64_TYPE_ID,
    types::MAGIC_NUMBER,
    types::PROXY_STUB_ID,
    value::CaptureRecord,
    value::Value,
};
