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

//! Error types for encoding, decoding and type registration.
//!
//! Error constructors sit on the failure edge of every buffer read and
//! registry lookup. Keep the `#[cold]` / `#[track_caller]` attributes on the
//! constructor functions: they keep the error paths out of the hot
//! instruction stream while still reporting the caller's location.

use std::borrow::Cow;

use thiserror::Error;

/// Compile-time flag: set `SKIFF_PANIC_ON_ERROR=1` when building to panic at
/// the exact point an error is constructed, with a full backtrace.
pub const PANIC_ON_ERROR: bool = option_env!("SKIFF_PANIC_ON_ERROR").is_some();

/// Check if `SKIFF_PANIC_ON_ERROR` was set at compile time. Tests that
/// expect errors return early when this is on.
#[inline(always)]
pub const fn should_panic_on_error() -> bool {
    PANIC_ON_ERROR
}

/// Error type for all skiff encode, decode and registration operations.
///
/// Construct variants through the static constructor functions
/// ([`Error::duplicate_registration`], [`Error::desync_corruption`], ...)
/// rather than directly; the constructors accept anything convertible into
/// `Cow<'static, str>` and honor `SKIFF_PANIC_ON_ERROR`.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A type/id binding conflicts with an existing registration.
    ///
    /// Registration state is left untouched by the failed call.
    #[error("duplicate registration: {0}")]
    DuplicateRegistration(Cow<'static, str>),

    /// A decoded type name has no type in the current process.
    #[error("unresolvable type: {0}")]
    UnresolvableType(Cow<'static, str>),

    /// The type cannot be serialized at all (strict-mode rejection, or a
    /// fallback path whose host hook is not installed).
    #[error("unsupported type: {0}")]
    UnsupportedType(Cow<'static, str>),

    /// A wire id has no entry in the space it was read against. The stream
    /// is corrupt from this point on; retrying would re-read the same bytes.
    #[error("desynchronized stream: {0}")]
    DesyncCorruption(Cow<'static, str>),

    /// Buffer boundary violation during a read.
    #[error("buffer out of bound: {0} + {1} > {2}")]
    BufferOutOfBound(usize, usize, usize),

    /// Malformed payload bytes: bad magic, bad flag, bad ordinal, invalid
    /// UTF-8, oversize name and the like.
    #[error("invalid data: {0}")]
    InvalidData(Cow<'static, str>),

    /// The host's legacy object serialization hook failed.
    #[error("legacy codec: {0}")]
    Legacy(#[source] anyhow::Error),
}

impl Error {
    /// Creates a new [`Error::DuplicateRegistration`].
    ///
    /// # Example
    /// ```
    /// use skiff_core::error::Error;
    ///
    /// let err = Error::duplicate_registration("id 50 already bound");
    /// ```
    #[cold]
    #[track_caller]
    pub fn duplicate_registration<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DuplicateRegistration(s.into());
        if PANIC_ON_ERROR {
            panic!("SKIFF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnresolvableType`].
    #[cold]
    #[track_caller]
    pub fn unresolvable_type<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnresolvableType(s.into());
        if PANIC_ON_ERROR {
            panic!("SKIFF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::UnsupportedType`].
    #[cold]
    #[track_caller]
    pub fn unsupported_type<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::UnsupportedType(s.into());
        if PANIC_ON_ERROR {
            panic!("SKIFF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::DesyncCorruption`].
    ///
    /// # Example
    /// ```
    /// use skiff_core::error::Error;
    ///
    /// let err = Error::desync_corruption(format!("unknown dynamic id {}", 7));
    /// ```
    #[cold]
    #[track_caller]
    pub fn desync_corruption<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::DesyncCorruption(s.into());
        if PANIC_ON_ERROR {
            panic!("SKIFF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::BufferOutOfBound`] with the given bounds.
    #[cold]
    #[track_caller]
    pub fn buffer_out_of_bound(offset: usize, length: usize, capacity: usize) -> Self {
        let err = Error::BufferOutOfBound(offset, length, capacity);
        if PANIC_ON_ERROR {
            panic!("SKIFF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Creates a new [`Error::InvalidData`].
    ///
    /// # Example
    /// ```
    /// use skiff_core::error::Error;
    ///
    /// let err = Error::invalid_data(format!("bad ordinal {}", 9));
    /// ```
    #[cold]
    #[track_caller]
    pub fn invalid_data<S: Into<Cow<'static, str>>>(s: S) -> Self {
        let err = Error::InvalidData(s.into());
        if PANIC_ON_ERROR {
            panic!("SKIFF_PANIC_ON_ERROR: {}", err);
        }
        err
    }

    /// Wraps a host legacy-serialization failure.
    #[cold]
    #[track_caller]
    pub fn legacy(source: anyhow::Error) -> Self {
        let err = Error::Legacy(source);
        if PANIC_ON_ERROR {
            panic!("SKIFF_PANIC_ON_ERROR: {}", err);
        }
        err
    }
}

/// Returns early with the given error unless the condition holds.
///
/// # Examples
/// ```
/// use skiff_core::ensure;
/// use skiff_core::error::Error;
///
/// fn check(id: u16) -> Result<(), Error> {
///     ensure!(id >= 5, Error::duplicate_registration("reserved id"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Returns early with the given error.
///
/// # Examples
/// ```
/// use skiff_core::bail;
/// use skiff_core::error::Error;
///
/// fn fail_fast() -> Result<(), Error> {
///     bail!(Error::invalid_data("truncated payload"));
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($err)
    };
}
