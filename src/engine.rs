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
use core::{fmt, marker::PhantomData};

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Block codec, mixer and finalizer of one MurmurHash3 variant.
///
/// Implemented only by [`X86_32`](crate::X86_32), [`X86_128`](crate::X86_128) and
/// [`X64_128`](crate::X64_128).
pub trait Kernel: sealed::Sealed {
    /// Hash state word tuple. A block read through [`Kernel::read_block`] has the same shape.
    type State: Copy;
    /// Carry buffer, exactly one block long.
    type Block: Copy + Default + AsRef<[u8]> + AsMut<[u8]>;
    /// Digest bytes.
    type Digest: Copy + Default + Eq + fmt::Debug + AsRef<[u8]> + AsMut<[u8]>;

    /// Bytes consumed by one [`Kernel::mix`] call.
    const BLOCK_SIZE: usize;
    /// Bytes produced by finalization.
    ///
    /// Equal to [`Kernel::BLOCK_SIZE`] for every MurmurHash3 variant, which is a property
    /// of the algorithm and not something the engine relies on.
    const HASH_SIZE: usize;
    /// Short name used by `Debug`.
    const NAME: &'static str;

    /// State right after construction or reset.
    fn seed_state(seed: u32) -> Self::State;
    /// Reads exactly one block, little-endian.
    fn read_block(bytes: &[u8]) -> Self::State;
    /// Writes the word tuple little-endian, in order `h1, h2, ...`.
    fn write_block(h: Self::State, out: &mut [u8]);
    /// Folds one full block into the state.
    fn mix(h: &mut Self::State, k: Self::State);
    /// Folds the partial tail, injects the total length and avalanches.
    fn finish(h: Self::State, tail: &[u8], tot_len: u64) -> Self::State;
}

/// Incremental MurmurHash3 engine, generic over the variant.
///
/// You should always like to use the [`Murmur32`](crate::Murmur32),
/// [`Murmur128x86`](crate::Murmur128x86) and [`Murmur128x64`](crate::Murmur128x64)
/// type aliases, or [`Murmur128`](crate::Murmur128) to pick a 128-bit variant at runtime.
///
/// Any sequence of [`append`](Self::append) calls whose concatenation is the same yields
/// the same digest. [`finalize`](Self::finalize) resets the engine to its freshly
/// constructed state, so an instance can be reused indefinitely.
pub struct BaseHasher<K: Kernel> {
    seed: u32,
    state: K::State,
    tot_len: u64,

    carry: K::Block,
    carry_len: usize,

    _kernel: PhantomData<K>,
}
impl<K: Kernel> BaseHasher<K> {
    /// Hasher with seed `0`.
    pub fn new() -> Self {
        Self::with_seed(0)
    }
    /// Hasher with the given seed. The seed is kept and re-applied on every reset.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            state: K::seed_state(seed),
            tot_len: 0,
            carry: K::Block::default(),
            carry_len: 0,
            _kernel: PhantomData,
        }
    }

    /// The seed this hasher was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
    /// Digest length in bytes: 4 for the 32-bit variant, 16 for both 128-bit variants.
    pub const fn hash_size(&self) -> usize {
        K::HASH_SIZE
    }
    /// Bytes appended since construction or the last reset.
    pub fn total_len(&self) -> u64 {
        self.tot_len
    }
    /// Bytes held back waiting for a full block. Always less than the block size.
    pub fn buffered_len(&self) -> usize {
        self.carry_len
    }

    /// Feeds more data into the hash.
    ///
    /// Full blocks are mixed straight out of `bytes`; only a partial block at either
    /// end is copied into the carry buffer.
    pub fn append(&mut self, mut bytes: &[u8]) {
        self.tot_len = self.tot_len.wrapping_add(bytes.len() as u64);

        let mut state = self.state;
        if self.carry_len > 0 {
            let off = self.carry_len;
            let take = bytes.len().min(K::BLOCK_SIZE - off);
            let (head, rest) = bytes.split_at(take);
            self.carry.as_mut()[off..off + take].copy_from_slice(head);
            self.carry_len += take;
            if unlikely(self.carry_len < K::BLOCK_SIZE) {
                return;
            }

            K::mix(&mut state, K::read_block(self.carry.as_ref()));
            self.carry_len = 0;
            bytes = rest;
        }

        let blocks = bytes.chunks_exact(K::BLOCK_SIZE);
        let remainder = blocks.remainder();
        for block in blocks {
            K::mix(&mut state, K::read_block(block));
        }

        debug_assert!(remainder.len() < K::BLOCK_SIZE);
        self.carry.as_mut()[..remainder.len()].copy_from_slice(remainder);
        self.carry_len = remainder.len();

        self.state = state;
    }

    /// Digest of everything appended so far, without resetting.
    pub fn digest(&self) -> K::Digest {
        let h = K::finish(self.state, &self.carry.as_ref()[..self.carry_len], self.tot_len);
        let mut out = K::Digest::default();
        K::write_block(h, out.as_mut());
        out
    }

    /// Writes the digest into `dest` and resets the hasher.
    ///
    /// # Panics
    ///
    /// If `dest.len()` is not [`hash_size`](Self::hash_size).
    pub fn finalize(&mut self, dest: &mut [u8]) {
        assert_eq!(dest.len(), K::HASH_SIZE, "destination must be exactly hash_size bytes");
        dest.copy_from_slice(self.digest().as_ref());
        self.reset();
    }

    /// Returns the digest and resets the hasher.
    pub fn finalize_to_new(&mut self) -> K::Digest {
        let out = self.digest();
        self.reset();
        out
    }

    /// Drops all appended data. The seed is kept.
    pub fn reset(&mut self) {
        self.state = K::seed_state(self.seed);
        self.tot_len = 0;
        self.carry = K::Block::default();
        self.carry_len = 0;
    }
}
impl<K: Kernel> Clone for BaseHasher<K> {
    fn clone(&self) -> Self {
        Self {
            seed: self.seed,
            state: self.state,
            tot_len: self.tot_len,
            carry: self.carry,
            carry_len: self.carry_len,
            _kernel: PhantomData,
        }
    }
}
impl<K: Kernel> Default for BaseHasher<K> {
    fn default() -> Self {
        Self::new()
    }
}
impl<K: Kernel> fmt::Debug for BaseHasher<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("murmur3::Hasher<")?;
        f.write_str(K::NAME)?;
        f.write_str("> { ... }")
    }
}
/// `finish` is the low 64 bits of [`BaseHasher::digest`], little-endian.
impl<K: Kernel> core::hash::Hasher for BaseHasher<K> {
    fn finish(&self) -> u64 {
        let digest = self.digest();
        let bytes = digest.as_ref();
        let mut low = [0; 8];
        let n = bytes.len().min(8);
        low[..n].copy_from_slice(&bytes[..n]);
        u64::from_le_bytes(low)
    }
    fn write(&mut self, bytes: &[u8]) {
        self.append(bytes)
    }
}
