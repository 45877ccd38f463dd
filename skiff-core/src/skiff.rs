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

use crate::buffer::{Reader, Writer};
use crate::config::Config;
use crate::ensure;
use crate::error::Error;
use crate::resolver::context::{ReadContext, WriteContext};
use crate::resolver::session::{ReadSession, WriteSession};
use crate::resolver::type_resolver::TypeResolver;
use crate::serializer::{self, Codec, CodecFactory, LegacyCodec, Serializer};
use crate::types::{RuntimeType, TypeDescriptor, TypeKind, MAGIC_NUMBER, TRACK_REFS_FLAG};
use crate::value::Value;

/// The main serialization instance for one process.
///
/// `Skiff` owns the type universe, the static id registry, the serializer
/// catalog and the per-message dynamic id sessions. Registrations are
/// permanent; sessions reset between messages.
///
/// Exchanging payloads requires both peers to perform the same static
/// registrations in the same order and to run with the same configuration.
/// Configure an instance before first use: serializers capture the settings
/// they were created under.
///
/// All operations take `&mut self`; wrap the instance in a lock to share it
/// across threads.
///
/// # Examples
///
/// ```rust
/// use skiff_core::skiff::Skiff;
/// use skiff_core::types::TypeDescriptor;
/// use skiff_core::value::Value;
///
/// let mut skiff = Skiff::default();
/// let point = skiff
///     .define(TypeDescriptor::structure("demo.Point", &["x", "y"]))
///     .unwrap();
/// skiff.register(point).unwrap();
///
/// let value = Value::Struct {
///     ty: point,
///     fields: vec![Value::I32(3), Value::I32(4)],
/// };
/// let bytes = skiff.serialize(&value).unwrap();
/// assert_eq!(skiff.deserialize(&bytes).unwrap(), value);
/// ```
pub struct Skiff {
    config: Config,
    types: TypeResolver,
    write_session: WriteSession,
    read_session: ReadSession,
    legacy: Option<Arc<dyn LegacyCodec>>,
}

impl Default for Skiff {
    fn default() -> Self {
        Skiff {
            config: Config::default(),
            types: TypeResolver::new(),
            write_session: WriteSession::new(),
            read_session: ReadSession::new(),
            legacy: None,
        }
    }
}

impl Skiff {
    /// Rejects unmarked standard-library types instead of encoding them
    /// structurally. Enabled by default.
    pub fn strict_types(mut self, strict: bool) -> Self {
        self.config.strict_types = strict;
        self
    }

    /// Records the reference-tracking intent in payload envelopes and in
    /// serializer metadata. Both peers must use the same setting.
    pub fn track_refs(mut self, track: bool) -> Self {
        self.config.track_refs = track;
        self
    }

    /// Exempts plain scalar types from reference tracking. Enabled by
    /// default; only meaningful together with `track_refs`.
    pub fn ignore_basic_refs(mut self, ignore: bool) -> Self {
        self.config.ignore_basic_refs = ignore;
        self
    }

    /// Caps value nesting on decode. Payloads deeper than this are
    /// rejected as invalid data. Defaults to 64 levels.
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Installs the process-level fallback for types that only support
    /// opaque stream serialization.
    pub fn legacy_codec<C: LegacyCodec + 'static>(mut self, codec: C) -> Self {
        self.legacy = Some(Arc::new(codec));
        self
    }

    /// Installs a hook consulted before the built-in codec selection.
    pub fn codec_factory<F: CodecFactory + 'static>(mut self, factory: F) -> Self {
        self.types.set_codec_factory(Arc::new(factory));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get_type_resolver(&self) -> &TypeResolver {
        &self.types
    }

    /// Makes a type known to this process and returns its handle. Interning
    /// the same name twice returns the original handle.
    pub fn define(&mut self, descriptor: TypeDescriptor) -> Result<RuntimeType, Error> {
        self.types.intern(descriptor)
    }

    pub fn descriptor(&self, ty: RuntimeType) -> &TypeDescriptor {
        self.types.descriptor(ty)
    }

    /// The handle of the built-in type for a kind, if the kind has one.
    pub fn builtin(&self, kind: TypeKind) -> Option<RuntimeType> {
        self.types.builtin(kind)
    }

    /// Registers the type under the lowest unused static id and returns it.
    /// Ids stick for the process lifetime.
    pub fn register(&mut self, ty: RuntimeType) -> Result<u16, Error> {
        self.types.register(ty)
    }

    /// Registers the type under a caller-chosen static id.
    pub fn register_with_id(&mut self, ty: RuntimeType, id: u16) -> Result<(), Error> {
        self.types.register_with_id(ty, id)
    }

    pub fn id_of(&self, ty: RuntimeType) -> Option<u16> {
        self.types.id_of(ty)
    }

    pub fn type_of(&self, id: u16) -> Option<RuntimeType> {
        self.types.type_of(id)
    }

    /// All static bindings ordered by id, built-ins included.
    pub fn registered_types(&self) -> Vec<(u16, RuntimeType)> {
        self.types.registered_types()
    }

    /// Binds a serializer chosen by the caller, replacing whatever the
    /// selection logic would pick or already picked.
    pub fn register_serializer(&mut self, ty: RuntimeType, codec: Codec) {
        self.types.register_serializer(ty, codec, &self.config);
    }

    /// The serializer for a type, running codec selection on first use.
    pub fn get_serializer(&mut self, ty: RuntimeType) -> Result<Arc<Serializer>, Error> {
        self.types.get_serializer(ty, &self.config)
    }

    /// Emits a type tag into `writer`. Tags written this way share one
    /// dynamic id session until [`reset_write`](Skiff::reset_write).
    pub fn write_type_id(&mut self, writer: &mut Writer, ty: RuntimeType) -> Result<(), Error> {
        let mut context = WriteContext {
            writer,
            types: &mut self.types,
            session: &mut self.write_session,
            config: &self.config,
            legacy: self.legacy.as_deref(),
        };
        context.write_type_id(ty)
    }

    /// Reads one type tag from `reader` and resolves it to a local handle.
    pub fn read_type_id(&mut self, reader: &mut Reader) -> Result<RuntimeType, Error> {
        let mut context = ReadContext {
            reader,
            types: &mut self.types,
            session: &mut self.read_session,
            config: &self.config,
            legacy: self.legacy.as_deref(),
            depth: 0,
        };
        context.read_type_id()
    }

    /// The type resolved by the most recent tag read, for callers that
    /// inspect a stream without decoding payloads.
    pub fn current_read_type(&self) -> Option<RuntimeType> {
        self.read_session.current_read_type()
    }

    /// Clears both dynamic id sessions. Call between messages when driving
    /// [`write_type_id`](Skiff::write_type_id) and
    /// [`read_type_id`](Skiff::read_type_id) directly;
    /// [`serialize`](Skiff::serialize) and [`deserialize`](Skiff::deserialize)
    /// reset their session themselves.
    pub fn reset(&mut self) {
        self.reset_write();
        self.reset_read();
    }

    pub fn reset_write(&mut self) {
        self.write_session.reset();
    }

    pub fn reset_read(&mut self) {
        self.read_session.reset();
    }

    /// Encodes one value as a standalone payload with the envelope in front.
    pub fn serialize(&mut self, value: &Value) -> Result<Vec<u8>, Error> {
        let mut writer = Writer::default();
        writer.write_u16(MAGIC_NUMBER);
        let mut bitmap = 0u8;
        if self.config.track_refs {
            bitmap |= TRACK_REFS_FLAG;
        }
        writer.write_u8(bitmap);
        let result = {
            let mut context = WriteContext {
                writer: &mut writer,
                types: &mut self.types,
                session: &mut self.write_session,
                config: &self.config,
                legacy: self.legacy.as_deref(),
            };
            serializer::write_value(&mut context, value)
        };
        self.write_session.reset();
        result.map(|_| writer.dump())
    }

    /// Decodes one payload produced by [`serialize`](Skiff::serialize).
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<Value, Error> {
        let mut reader = Reader::new(bytes);
        let result = self.read_envelope(&mut reader);
        self.read_session.reset();
        result
    }

    fn read_envelope(&mut self, reader: &mut Reader) -> Result<Value, Error> {
        let magic = reader.read_u16()?;
        ensure!(
            magic == MAGIC_NUMBER,
            Error::invalid_data(format!(
                "payload must start with magic number {MAGIC_NUMBER:#06x}, found {magic:#06x}; \
                 the data is corrupt or not a serialized payload"
            ))
        );
        let bitmap = reader.read_u8()?;
        let peer_tracks = bitmap & TRACK_REFS_FLAG != 0;
        ensure!(
            peer_tracks == self.config.track_refs,
            Error::invalid_data(
                "the writer's reference-tracking setting differs from this reader's"
            )
        );
        let value = {
            let mut context = ReadContext {
                reader,
                types: &mut self.types,
                session: &mut self.read_session,
                config: &self.config,
                legacy: self.legacy.as_deref(),
                depth: 0,
            };
            serializer::read_value(&mut context)?
        };
        ensure!(
            reader.remaining() == 0,
            Error::invalid_data(format!(
                "{} trailing bytes after the root value",
                reader.remaining()
            ))
        );
        Ok(value)
    }
}
