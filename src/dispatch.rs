/*
 * Copyright (c) 2024 K--Aethiax
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * Alternatively, the contents of this file may be used under the terms of
 * the MIT license as described below.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use super::*;
use core::fmt;

/// Which 128-bit MurmurHash3 variant to run.
///
/// **[`Variant::Default`] is not portable.** It picks the variant that is fastest on the
/// host, so the same seed and input give different digests on 32-bit and 64-bit targets.
/// Pass [`Variant::Width32`] or [`Variant::Width64`] whenever a digest is stored, sent
/// over the wire or compared across machines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    /// [`Variant::Width64`] on 64-bit targets, [`Variant::Width32`] otherwise.
    ///
    /// Do not use this if repeatability is needed across platforms.
    #[default]
    Default,
    /// MurmurHash3_x86_128, built on 32-bit words.
    Width32,
    /// MurmurHash3_x64_128, built on 64-bit words.
    Width64,
}
impl Variant {
    /// Replaces [`Variant::Default`] with the concrete variant for this target.
    pub const fn resolve(self) -> Self {
        match self {
            Self::Default if cfg!(target_pointer_width = "64") => Self::Width64,
            Self::Default => Self::Width32,
            explicit => explicit,
        }
    }
    /// Digest length in bytes, the same for every variant.
    pub const fn hash_size(self) -> usize {
        16
    }
}

/// Streamed 128-bit MurmurHash3 hasher with the variant chosen at runtime.
#[derive(Clone)]
pub enum Murmur128 {
    /// MurmurHash3_x86_128.
    Width32(Murmur128x86),
    /// MurmurHash3_x64_128.
    Width64(Murmur128x64),
}

macro_rules! each {
    ($self:expr, $hasher:ident => $body:expr) => {
        match $self {
            Murmur128::Width32($hasher) => $body,
            Murmur128::Width64($hasher) => $body,
        }
    };
}

impl Murmur128 {
    /// Digest length in bytes.
    pub const HASH_SIZE: usize = 16;

    /// Creates a hasher for `variant`.
    ///
    /// With [`Variant::Default`] the digest depends on the host word width, see [`Variant`].
    pub fn new(seed: u32, variant: Variant) -> Self {
        match variant.resolve() {
            Variant::Width64 => Self::Width64(Murmur128x64::with_seed(seed)),
            _ => Self::Width32(Murmur128x86::with_seed(seed)),
        }
    }
    /// Creates a hasher for [`Variant::Default`]. Not portable across word widths.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(seed, Variant::Default)
    }

    /// The concrete variant in use, never [`Variant::Default`].
    pub fn variant(&self) -> Variant {
        match self {
            Self::Width32(_) => Variant::Width32,
            Self::Width64(_) => Variant::Width64,
        }
    }
    /// The seed this hasher was created with.
    pub fn seed(&self) -> u32 {
        each!(self, h => h.seed())
    }
    /// Digest length in bytes.
    pub const fn hash_size(&self) -> usize {
        Self::HASH_SIZE
    }

    /// Feeds more data into the hash.
    pub fn append(&mut self, bytes: &[u8]) {
        each!(self, h => h.append(bytes))
    }
    /// Digest of everything appended so far, without resetting.
    pub fn digest(&self) -> [u8; 16] {
        each!(self, h => h.digest())
    }
    /// Writes the digest into `dest` and resets the hasher.
    ///
    /// # Panics
    ///
    /// If `dest.len()` is not 16.
    pub fn finalize(&mut self, dest: &mut [u8]) {
        each!(self, h => h.finalize(dest))
    }
    /// Returns the digest and resets the hasher.
    pub fn finalize_to_new(&mut self) -> [u8; 16] {
        each!(self, h => h.finalize_to_new())
    }
    /// Returns the digest as an integer (`h1` in the low bits) and resets the hasher.
    pub fn finalize_u128(&mut self) -> u128 {
        u128::from_le_bytes(self.finalize_to_new())
    }
    /// Drops all appended data. Seed and variant are kept.
    pub fn reset(&mut self) {
        each!(self, h => h.reset())
    }
}
impl Default for Murmur128 {
    fn default() -> Self {
        Self::with_seed(0)
    }
}
impl fmt::Debug for Murmur128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        each!(self, h => fmt::Debug::fmt(h, f))
    }
}
impl core::hash::Hasher for Murmur128 {
    fn finish(&self) -> u64 {
        each!(self, h => core::hash::Hasher::finish(h))
    }
    fn write(&mut self, bytes: &[u8]) {
        self.append(bytes)
    }
}

/// One-shot 128-bit MurmurHash3 of the given variant.
///
/// With [`Variant::Default`] the result depends on the host word width, see [`Variant`].
#[inline]
pub fn hash128(bytes: &[u8], seed: u32, variant: Variant) -> u128 {
    match variant.resolve() {
        Variant::Width64 => hash128_x64(bytes, seed),
        _ => hash128_x86(bytes, seed),
    }
}

#[cfg(test)]
mod test_vectors {
    use super::*;

    #[test]
    fn default_follows_pointer_width() {
        let expected = if cfg!(target_pointer_width = "64") { Variant::Width64 } else { Variant::Width32 };
        assert_eq!(Variant::Default.resolve(), expected);
        assert_eq!(Murmur128::with_seed(0).variant(), expected);
        assert_eq!(Murmur128::default().variant(), expected);
        assert_eq!(hash128(b"tes", 0, Variant::Default), hash128(b"tes", 0, expected));
    }

    #[test]
    fn explicit_variants_are_kept() {
        assert_eq!(Variant::Width32.resolve(), Variant::Width32);
        assert_eq!(Variant::Width64.resolve(), Variant::Width64);
        assert_eq!(Murmur128::new(7, Variant::Width32).variant(), Variant::Width32);
        assert_eq!(Murmur128::new(7, Variant::Width64).variant(), Variant::Width64);
        assert_eq!(Murmur128::new(7, Variant::Width64).seed(), 7);
    }

    #[test]
    fn dispatch_matches_concrete_hashers() {
        for (variant, expected) in [
            (Variant::Width32, 0x16281b5522c18c1322c18c1322c18c13u128),
            (Variant::Width64, 0xe64c0a6370bc7d684cd8d67043ac6518u128),
        ] {
            let mut hasher = Murmur128::new(0, variant);
            hasher.append(b"t");
            assert_eq!(hasher.digest(), expected.to_be_bytes());
            let mut dest = [0; 16];
            hasher.finalize(&mut dest);
            assert_eq!(dest, expected.to_be_bytes());
            assert_eq!(hasher.finalize_u128(), 0);
            assert_eq!(hash128(b"t", 0, variant), u128::from_le_bytes(expected.to_be_bytes()));
        }
    }

    #[test]
    fn hash_size_is_16() {
        assert_eq!(Variant::Default.hash_size(), 16);
        assert_eq!(Murmur128::new(0, Variant::Width32).hash_size(), 16);
        assert_eq!(Murmur128::new(0, Variant::Width64).hash_size(), 16);
    }

    #[test]
    #[should_panic]
    fn finalize_rejects_wrong_destination() {
        Murmur128::new(0, Variant::Width32).finalize(&mut [0; 4]);
    }
}
