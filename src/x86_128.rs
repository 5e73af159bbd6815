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

/// Streamed MurmurHash3_x86_128 hasher.
pub type Murmur128x86 = BaseHasher<X86_128>;

const C1: u32 = 0x239b961b;
const C2: u32 = 0xab0e9789;
const C3: u32 = 0x38b34ae5;
const C4: u32 = 0xa1e38b93;

type State = [u32; 4];

/// MurmurHash3_x86_128: 16-byte blocks, four 32-bit state words, 128-bit digest.
///
/// Produces different digests than [`X64_128`](crate::X64_128) for the same input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct X86_128;

#[inline(always)]
const fn scramble(k: u32, c: u32, r: u32, c_next: u32) -> u32 {
    k.wrapping_mul(c).rotate_left(r).wrapping_mul(c_next)
}

#[inline(always)]
const fn scramble_k1(k1: u32) -> u32 {
    scramble(k1, C1, 15, C2)
}
#[inline(always)]
const fn scramble_k2(k2: u32) -> u32 {
    scramble(k2, C2, 16, C3)
}
#[inline(always)]
const fn scramble_k3(k3: u32) -> u32 {
    scramble(k3, C3, 17, C4)
}
#[inline(always)]
const fn scramble_k4(k4: u32) -> u32 {
    scramble(k4, C4, 18, C1)
}

#[inline(always)]
fn propagate([mut h1, mut h2, mut h3, mut h4]: State) -> State {
    h1 = h1.wrapping_add(h2).wrapping_add(h3).wrapping_add(h4);
    h2 = h2.wrapping_add(h1);
    h3 = h3.wrapping_add(h1);
    h4 = h4.wrapping_add(h1);
    [h1, h2, h3, h4]
}

impl sealed::Sealed for X86_128 {}
impl Kernel for X86_128 {
    type State = State;
    type Block = [u8; 16];
    type Digest = [u8; 16];

    const BLOCK_SIZE: usize = 16;
    const HASH_SIZE: usize = 16;
    const NAME: &'static str = "x86_128";

    fn seed_state(seed: u32) -> State {
        [seed; 4]
    }

    #[inline(always)]
    fn read_block(bytes: &[u8]) -> State {
        [
            read_u32(&bytes[0..]),
            read_u32(&bytes[4..]),
            read_u32(&bytes[8..]),
            read_u32(&bytes[12..]),
        ]
    }

    #[inline(always)]
    fn write_block(h: State, out: &mut [u8]) {
        for (word, dst) in h.iter().zip(out.chunks_exact_mut(4)) {
            dst.copy_from_slice(&word.to_le_bytes());
        }
    }

    #[inline(always)]
    fn mix(h: &mut State, [k1, k2, k3, k4]: State) {
        let [mut h1, mut h2, mut h3, mut h4] = *h;

        h1 ^= scramble_k1(k1);
        h1 = h1.rotate_left(19).wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x561ccd1b);

        h2 ^= scramble_k2(k2);
        h2 = h2.rotate_left(17).wrapping_add(h3);
        h2 = h2.wrapping_mul(5).wrapping_add(0x0bcaa747);

        h3 ^= scramble_k3(k3);
        h3 = h3.rotate_left(15).wrapping_add(h4);
        h3 = h3.wrapping_mul(5).wrapping_add(0x96cd1c35);

        h4 ^= scramble_k4(k4);
        h4 = h4.rotate_left(13).wrapping_add(h1);
        h4 = h4.wrapping_mul(5).wrapping_add(0x32ac3b17);

        *h = [h1, h2, h3, h4];
    }

    fn finish([mut h1, mut h2, mut h3, mut h4]: State, tail: &[u8], tot_len: u64) -> State {
        let len = tail.len();
        debug_assert!(len < 16);

        // Zero-padded tail words; word i only lands in h when the tail reaches into it.
        let mut padded = [0; 16];
        padded[..len].copy_from_slice(tail);
        let [k1, k2, k3, k4] = Self::read_block(&padded);
        if len > 12 {
            h4 ^= scramble_k4(k4);
        }
        if len > 8 {
            h3 ^= scramble_k3(k3);
        }
        if len > 4 {
            h2 ^= scramble_k2(k2);
        }
        if len > 0 {
            h1 ^= scramble_k1(k1);
        }

        let len = tot_len as u32;
        let [h1, h2, h3, h4] = propagate([h1 ^ len, h2 ^ len, h3 ^ len, h4 ^ len]);
        propagate([fmix32(h1), fmix32(h2), fmix32(h3), fmix32(h4)])
    }
}

impl BaseHasher<X86_128> {
    /// Current digest as an integer (`h1` in the low bits), without resetting.
    pub fn finish_u128(&self) -> u128 {
        u128::from_le_bytes(self.digest())
    }
    /// Returns the digest as an integer (`h1` in the low bits) and resets the hasher.
    pub fn finalize_u128(&mut self) -> u128 {
        u128::from_le_bytes(self.finalize_to_new())
    }
}

/// One-shot MurmurHash3_x86_128.
#[inline]
pub fn hash128_x86(bytes: &[u8], seed: u32) -> u128 {
    let mut hasher = Murmur128x86::with_seed(seed);
    hasher.append(bytes);
    hasher.finalize_u128()
}

#[cfg(test)]
mod test_vectors {
    use super::*;

    fn hex(digest: [u8; 16]) -> u128 {
        u128::from_be_bytes(digest)
    }

    #[test]
    fn ascii_vectors() {
        const CASES: &[(&str, u128)] = &[
            ("", 0x00000000000000000000000000000000),
            ("t", 0x16281b5522c18c1322c18c1322c18c13),
            ("te", 0x0f623fd440dd081940dd081940dd0819),
            ("tes", 0xc701bcd2562e9fd5562e9fd5562e9fd5),
            ("test1test2test3test4test5test6test7test8", 0x0671d271b0586fd5a3703943516972fd),
        ];
        let mut hasher = Murmur128x86::new();
        for &(input, expected) in CASES {
            hasher.append(input.as_bytes());
            assert_eq!((input, expected), (input, hex(hasher.finalize_to_new())));
        }
    }

    #[test]
    fn every_tail_length() {
        // Exercises each partial-word cascade entry point against a split feed.
        let bytes: [u8; 31] = core::array::from_fn(|i| (i as u8).wrapping_mul(37));
        for len in 0..=bytes.len() {
            let mut whole = Murmur128x86::with_seed(9);
            whole.append(&bytes[..len]);
            let mut split = Murmur128x86::with_seed(9);
            let (x, y) = bytes[..len].split_at(len / 3);
            split.append(x);
            split.append(y);
            assert_eq!((len, whole.finish_u128()), (len, split.finish_u128()));
        }
    }

    #[test]
    fn one_shot_is_le_digest() {
        assert_eq!(hash128_x86(b"t", 0).to_le_bytes(), 0x16281b5522c18c1322c18c1322c18c13u128.to_be_bytes());
    }
}
