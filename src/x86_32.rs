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

/// Streamed MurmurHash3_x86_32 hasher.
pub type Murmur32 = BaseHasher<X86_32>;

const C1: u32 = 0xcc9e2d51;
const C2: u32 = 0x1b873593;

/// MurmurHash3_x86_32: 4-byte blocks, 32-bit state, 32-bit digest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct X86_32;

#[inline(always)]
const fn scramble(mut k1: u32) -> u32 {
    k1 = k1.wrapping_mul(C1);
    k1 = k1.rotate_left(15);
    k1.wrapping_mul(C2)
}

impl sealed::Sealed for X86_32 {}
impl Kernel for X86_32 {
    type State = u32;
    type Block = [u8; 4];
    type Digest = [u8; 4];

    const BLOCK_SIZE: usize = 4;
    const HASH_SIZE: usize = 4;
    const NAME: &'static str = "x86_32";

    fn seed_state(seed: u32) -> u32 {
        seed
    }

    #[inline(always)]
    fn read_block(bytes: &[u8]) -> u32 {
        read_u32(bytes)
    }

    #[inline(always)]
    fn write_block(h: u32, out: &mut [u8]) {
        out[0..4].copy_from_slice(&h.to_le_bytes());
    }

    #[inline(always)]
    fn mix(h1: &mut u32, k1: u32) {
        *h1 ^= scramble(k1);
        *h1 = h1.rotate_left(13);
        *h1 = h1.wrapping_mul(5).wrapping_add(0xe6546b64);
    }

    fn finish(mut h1: u32, tail: &[u8], tot_len: u64) -> u32 {
        debug_assert!(tail.len() < 4);

        if !tail.is_empty() {
            let k1 = tail.iter().rev().fold(0u32, |k1, &b| (k1 << 8) | b as u32);
            h1 ^= scramble(k1);
        }

        h1 ^= tot_len as u32;
        fmix32(h1)
    }
}

impl BaseHasher<X86_32> {
    /// Current digest as an integer, without resetting.
    pub fn finish_u32(&self) -> u32 {
        u32::from_le_bytes(self.digest())
    }
    /// Returns the digest as an integer and resets the hasher.
    pub fn finalize_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.finalize_to_new())
    }
}

/// One-shot MurmurHash3_x86_32.
#[inline]
pub fn hash32(bytes: &[u8], seed: u32) -> u32 {
    let mut hasher = Murmur32::with_seed(seed);
    hasher.append(bytes);
    hasher.finalize_u32()
}

#[cfg(test)]
mod test_vectors {
    use super::*;

    #[test]
    fn seeded_vectors() {
        #[rustfmt::skip] const CASES: &[(&[u8], u32, u32)] = &[
            (&[1, 2, 3], 293, 1971362553),
            (&[1, 2, 3, 4], 293, 2911303516),
            (&[1, 2, 3, 4, 5], 293, 3144920404),
            (&[1, 2, 3, 4, 5, 6], 293, 3796703664),
            (&[1, 2, 3, 4, 5, 6, 7], 293, 3433363787),
            (&[1, 2, 3, 4, 5, 6, 7, 8], 293, 2343089733),
            (&[], 0, 0),
            (&[], 1, 0x514E28B7),
            (&[], 0xffffffff, 0x81F16F39),
            (&[0xFF, 0xFF, 0xFF, 0xFF], 0, 0x76293B50),
            (&[0x21, 0x43, 0x65, 0x87], 0, 0xF55B516B),
            (&[0x21, 0x43, 0x65, 0x87], 0x5082EDEE, 0x2362F9DE),
            (&[0x21, 0x43, 0x65], 0, 0x7E4A8634),
            (&[0x21, 0x43], 0, 0xA0F7B07A),
            (&[0x21], 0, 0x72661CF4),
            (&[0, 0, 0, 0], 0, 0x2362F9DE),
            (&[0, 0, 0], 0, 0x85F0B427),
            (&[0, 0], 0, 0x30F4C306),
            (&[0], 0, 0x514E28B7),
        ];
        for &(bytes, seed, expected) in CASES {
            assert_eq!((bytes, seed, expected), (bytes, seed, hash32(bytes, seed)));
        }
    }

    #[test]
    fn ascii_vectors() {
        const CASES: &[(&str, u32)] = &[
            ("t", 3397902157),
            ("te", 3988319771),
            ("tes", 196677210),
            ("test", 3127628307),
            ("testt", 980066067),
            ("testte", 1691472556),
            ("testtes", 1062529260),
            ("testtest", 723759603),
        ];
        for &(input, expected) in CASES {
            assert_eq!((input, expected), (input, hash32(input.as_bytes(), 0)));
        }
    }

    #[test]
    fn two_appends() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        let mut hasher = Murmur32::with_seed(293);
        for split in 0..=bytes.len() {
            hasher.append(&bytes[..split]);
            hasher.append(&bytes[split..]);
            assert_eq!((split, 2343089733), (split, hasher.finalize_u32()));
        }
    }

    #[test]
    fn digest_is_little_endian() {
        let mut hasher = Murmur32::with_seed(1);
        assert_eq!(hasher.finish_u32(), 0x514E28B7);
        assert_eq!(hasher.finalize_to_new(), [0xB7, 0x28, 0x4E, 0x51]);
        assert_eq!(hasher.hash_size(), 4);
    }
}
