use murmur3_incremental::{BaseHasher, Kernel, Murmur128, Variant, X64_128, X86_128, X86_32};

/// SMHasher's verification code: hash the prefixes `key[..i]` of `0, 1, ..., 255` with seeds `256 - i`,
/// hash the concatenated digests with seed 0 and read the first four bytes.
fn verification<K: Kernel, F: Fn(&mut BaseHasher<K>, &[u8])>(feed: F) -> u32 {
    let key: Vec<u8> = (0..=255).collect();
    let mut digests = Vec::with_capacity(256 * K::HASH_SIZE);
    for i in 0..256 {
        let mut hasher = BaseHasher::<K>::with_seed(256 - i as u32);
        feed(&mut hasher, &key[..i]);
        digests.extend_from_slice(hasher.finalize_to_new().as_ref());
    }

    let mut hasher = BaseHasher::<K>::with_seed(0);
    feed(&mut hasher, &digests);
    let digest = hasher.finalize_to_new();
    u32::from_le_bytes(digest.as_ref()[0..4].try_into().unwrap())
}

fn whole<K: Kernel>(hasher: &mut BaseHasher<K>, bytes: &[u8]) {
    hasher.append(bytes);
}

fn ragged<K: Kernel>(hasher: &mut BaseHasher<K>, bytes: &[u8]) {
    let mut rng = bytes.len() as u64;
    let mut rest = bytes;
    while !rest.is_empty() {
        let step = (wyhash::wyrng(&mut rng) % 23) as usize;
        let (x, y) = rest.split_at(step.min(rest.len()));
        hasher.append(x);
        rest = y;
    }
}

#[test]
fn smhasher_x86_32() {
    assert_eq!(verification::<X86_32, _>(whole::<X86_32>), 0xB0F57EE3);
    assert_eq!(verification::<X86_32, _>(ragged::<X86_32>), 0xB0F57EE3);
}

#[test]
fn smhasher_x86_128() {
    assert_eq!(verification::<X86_128, _>(whole::<X86_128>), 0xB3ECE62A);
    assert_eq!(verification::<X86_128, _>(ragged::<X86_128>), 0xB3ECE62A);
}

#[test]
fn smhasher_x64_128() {
    assert_eq!(verification::<X64_128, _>(whole::<X64_128>), 0x6384BA69);
    assert_eq!(verification::<X64_128, _>(ragged::<X64_128>), 0x6384BA69);
}

#[test]
fn runtime_dispatch_is_reusable() {
    for variant in [Variant::Default, Variant::Width32, Variant::Width64] {
        let mut hasher = Murmur128::new(42, variant);
        hasher.append(b"test1test2test3test4");
        let first = hasher.finalize_to_new();

        hasher.append(b"test1test2");
        hasher.append(b"test3test4");
        assert_eq!(first, hasher.finalize_to_new());

        let mut fresh = Murmur128::new(42, variant);
        fresh.append(b"test1test2test3test4");
        assert_eq!(first, fresh.finalize_to_new());
    }
}

#[test]
fn std_hasher_integration() {
    use std::hash::{Hash, Hasher};

    let mut a = murmur3_incremental::Murmur128x64::with_seed(1);
    let mut b = murmur3_incremental::Murmur128x64::with_seed(1);
    ("key", 7u32).hash(&mut a);
    ("key", 7u32).hash(&mut b);
    assert_eq!(a.finish(), b.finish());

    ("other", 7u32).hash(&mut b);
    assert_ne!(a.finish(), b.finish());
}
