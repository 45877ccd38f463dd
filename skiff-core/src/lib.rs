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

//! # Skiff Core
//!
//! This is the core implementation of the skiff object serialization
//! runtime used between task processes. It resolves type identity across
//! process boundaries and drives per-type codecs over a binary buffer.
//!
//! ## Architecture
//!
//! The core library is organized into several key modules:
//!
//! - **`skiff`**: Main entry point owning registries, sessions and config
//! - **`buffer`**: Binary buffer management with Reader/Writer
//! - **`resolver`**: Type interning, static ids, dynamic id sessions and
//!   the serializer catalog
//! - **`serializer`**: Codec selection targets and the value-graph drivers
//! - **`meta`**: Encoded type names and their hashing
//! - **`types`**: Type handles, descriptors and wire-level constants
//! - **`value`**: The dynamic value union payloads are built from
//! - **`error`**: Error handling and result types
//!
//! ## Key Concepts
//!
//! ### Type identity
//!
//! A type crosses the wire in one of three ways:
//!
//! - **Static id**: a u16 agreed on by both peers through registration
//! - **Dynamic id**: negotiated per message the first time a name is sent
//! - **Stub id**: a fixed id standing in for closure and proxy types whose
//!   generated names are meaningless to the peer
//!
//! ### Sessions
//!
//! Dynamic ids live in per-message sessions. `serialize` and `deserialize`
//! reset them automatically; callers driving type tags directly reset them
//! between messages.
//!
//! ### Codec selection
//!
//! Every type gets its serializer from a fixed decision order: explicit
//! registration, the factory hook, then shape-based branches. The result
//! is cached for the process lifetime.
//!
//! ## Usage
//!
//! This crate is typically used through the higher-level `skiff` crate.
//! The core types work standalone as well:
//!
//! ```rust
//! use skiff_core::skiff::Skiff;
//! use skiff_core::types::TypeDescriptor;
//! use skiff_core::value::Value;
//!
//! let mut skiff = Skiff::default();
//! let task = skiff
//!     .define(TypeDescriptor::structure("sched.Task", &["name", "retries"]))
//!     .unwrap();
//! skiff.register(task).unwrap();
//!
//! let value = Value::Struct {
//!     ty: task,
//!     fields: vec![Value::Str("ingest".to_string()), Value::I32(3)],
//! };
//! let bytes = skiff.serialize(&value).unwrap();
//! assert_eq!(skiff.deserialize(&bytes).unwrap(), value);
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod meta;
pub mod resolver;
pub mod serializer;
pub mod skiff;
pub mod types;
pub mod value;
