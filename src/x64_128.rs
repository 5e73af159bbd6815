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
use crate::engine::sealed;

/// Streamed MurmurHash3_x64_128 hasher.
pub type Murmur128x64 = BaseHasher<X64_128>;

const C1: u64 = 0x87c37b91114253d5;
const C2: u64 = 0x4cf5ad432745937f;

type State = [u64; 2];

/// MurmurHash3_x64_128: 16-byte blocks, two 64-bit state words, 128-bit digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct X64_128;

#[inline(always)]
const fn scramble_k1(k1: u64) -> u64 {
    k1.wrapping_mul(C1).rotate_left(31).wrapping_mul(C2)
}
#[inline(always)]
const fn scramble_k2(k2: u64) -> u64 {
    k2.wrapping_mul(C2).rotate_left(33).wrapping_mul(C1)
}

impl sealed::Sealed for X64_128 {}
impl Kernel for X64_128 {
    type State = State;
    type Block = [u8; 16];
    type Digest = [u8; 16];

    const BLOCK_SIZE: usize = 16;
    const HASH_SIZE: usize = 16;
    const NAME: &'static str = "x64_128";

    fn seed_state(seed: u32) -> State {
        [seed as u64; 2]
    }

    #[inline(always)]
    fn read_block(bytes: &[u8]) -> State {
        [read_u64(&bytes[0..]), read_u64(&bytes[8..])]
    }

    #[inline(always)]
    fn write_block([h1, h2]: State, out: &mut [u8]) {
        out[0..8].copy_from_slice(&h1.to_le_bytes());
        out[8..16].copy_from_slice(&h2.to_le_bytes());
    }

    #[inline(always)]
    fn mix(h: &mut State, [k1, k2]: State) {
        let [mut h1, mut h2] = *h;

        h1 ^= scramble_k1(k1);
        h1 = h1.rotate_left(27).wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x52dce729);

        h2 ^= scramble_k2(k2);
        h2 = h2.rotate_left(31).wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(0x38495ab5);

        *h = [h1, h2];
    }

    fn finish([mut h1, mut h2]: State, tail: &[u8], tot_len: u64) -> State {
        let len = tail.len();
        debug_assert!(len < 16);

        let mut padded = [0; 16];
        padded[..len].copy_from_slice(tail);
        let [k1, k2] = Self::read_block(&padded);
        if len > 8 {
            h2 ^= scramble_k2(k2);
        }
        if len > 0 {
            h1 ^= scramble_k1(k1);
        }

        h1 ^= tot_len;
        h2 ^= tot_len;

        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);

        h1 = fmix64(h1);
        h2 = fmix64(h2);

        h1 = h1.wrapping_add(h2);
        h2 = h2.wrapping_add(h1);

        [h1, h2]
    }
}

impl BaseHasher<X64_128> {
    /// Current digest as an integer (`h1` in the low 64 bits), without resetting.
    pub fn finish_u128(&self) -> u128 {
        u128::from_le_bytes(self.digest())
    }
    /// Returns the digest as an integer (`h1` in the low 64 bits) and resets the hasher.
    pub fn finalize_u128(&mut self) -> u128 {
        u128::from_le_bytes(self.finalize_to_new())
    }
}

/// One-shot MurmurHash3_x64_128.
#[inline]
pub fn hash128_x64(bytes: &[u8], seed: u32) -> u128 {
    let mut hasher = Murmur128x64::with_seed(seed);
    hasher.append(bytes);
    hasher.finalize_u128()
}
