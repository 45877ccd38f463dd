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

//! Growable write buffer and position-tracked read cursor.
//!
//! All multi-byte integers are big-endian on the wire. Reads are bounds
//! checked and fail with [`Error::BufferOutOfBound`] instead of panicking,
//! since the bytes come from another process.

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::error::Error;

#[derive(Default)]
pub struct Writer {
    bf: Vec<u8>,
    reserved: usize,
}

impl Writer {
    /// Keeps capacity, resets length to 0.
    pub fn reset(&mut self) {
        self.bf.clear();
    }

    pub fn dump(&self) -> Vec<u8> {
        self.bf.clone()
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.reserved += additional;
        if self.bf.capacity() < self.reserved {
            self.bf.reserve(self.reserved);
        }
    }

    pub fn write_bytes(&mut self, v: &[u8]) {
        self.bf.extend_from_slice(v);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bf.write_u8(value).unwrap();
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bf.write_i8(value).unwrap();
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bf.write_u16::<BigEndian>(value).unwrap();
    }

    pub fn write_i16(&mut self, value: i16) {
        self.bf.write_i16::<BigEndian>(value).unwrap();
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bf.write_u32::<BigEndian>(value).unwrap();
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bf.write_i32::<BigEndian>(value).unwrap();
    }

    pub fn write_u64(&mut self, value: u64) {
        self.bf.write_u64::<BigEndian>(value).unwrap();
    }

    pub fn write_i64(&mut self, value: i64) {
        self.bf.write_i64::<BigEndian>(value).unwrap();
    }

    pub fn write_f32(&mut self, value: f32) {
        self.bf.write_f32::<BigEndian>(value).unwrap();
    }

    pub fn write_f64(&mut self, value: f64) {
        self.bf.write_f64::<BigEndian>(value).unwrap();
    }

    /// Unsigned LEB128, at most 5 bytes for a u32.
    pub fn write_varuint32(&mut self, value: u32) {
        let mut v = value;
        while v >= 0x80 {
            self.bf.push((v as u8 & 0x7F) | 0x80);
            v >>= 7;
        }
        self.bf.push(v as u8);
    }
}

pub struct Reader<'a> {
    bf: &'a [u8],
    cursor: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bf: &'a [u8]) -> Reader<'a> {
        Reader { bf, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.bf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bf.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.bf.len() - self.cursor
    }

    fn check(&self, additional: usize) -> Result<(), Error> {
        if self.cursor + additional > self.bf.len() {
            return Err(Error::buffer_out_of_bound(
                self.cursor,
                additional,
                self.bf.len(),
            ));
        }
        Ok(())
    }

    pub fn skip(&mut self, len: usize) -> Result<(), Error> {
        self.check(len)?;
        self.cursor += len;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.check(1)?;
        let result = self.bf[self.cursor];
        self.cursor += 1;
        Ok(result)
    }

    pub fn read_i8(&mut self) -> Result<i8, Error> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, Error> {
        self.check(2)?;
        let result = BigEndian::read_u16(&self.bf[self.cursor..]);
        self.cursor += 2;
        Ok(result)
    }

    pub fn read_i16(&mut self) -> Result<i16, Error> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32, Error> {
        self.check(4)?;
        let result = BigEndian::read_u32(&self.bf[self.cursor..]);
        self.cursor += 4;
        Ok(result)
    }

    pub fn read_i32(&mut self) -> Result<i32, Error> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_u64(&mut self) -> Result<u64, Error> {
        self.check(8)?;
        let result = BigEndian::read_u64(&self.bf[self.cursor..]);
        self.cursor += 8;
        Ok(result)
    }

    pub fn read_i64(&mut self) -> Result<i64, Error> {
        Ok(self.read_u64()? as i64)
    }

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], Error> {
        self.check(len)?;
        let result = &self.bf[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(result)
    }

    pub fn read_varuint32(&mut self) -> Result<u32, Error> {
        let mut result: u32 = 0;
        let mut shift = 0;
        loop {
            let b = self.read_u8()?;
            result |= ((b & 0x7F) as u32) << shift;
            if b < 0x80 {
                return Ok(result);
            }
            shift += 7;
            if shift >= 35 {
                return Err(Error::invalid_data("varuint32 exceeds five bytes"));
            }
        }
    }

    pub fn read_utf8(&mut self, len: usize) -> Result<String, Error> {
        let bytes = self.read_bytes(len)?;
        match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(Error::invalid_data("malformed utf-8 payload")),
        }
    }
}
