//! Property tests for content digests.

use std::io::{self, Read};

use proptest::prelude::*;

use stylesmith::ContentHash;

/// Reader that hands out at most `chunk` bytes per call
struct Trickle<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: streaming a file yields the same digest as hashing it whole.
    #[test]
    fn property_reader_digest_matches_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..20_000),
        chunk in 1usize..4096,
    ) {
        let whole = ContentHash::from_bytes(&data);
        let streamed = ContentHash::from_reader(Trickle { data: &data, chunk }).unwrap();
        prop_assert_eq!(whole, streamed);
    }

    /// PROPERTY: digests are deterministic and carry the algorithm prefix.
    #[test]
    fn property_digest_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let a = ContentHash::from_bytes(&data);
        let b = ContentHash::from_bytes(&data);
        prop_assert!(a.matches(&b));
        prop_assert!(a.as_str().starts_with("sha256:"));
        prop_assert_eq!(a.hex().len(), 64);
    }

    /// PROPERTY: a one-byte change always changes the digest.
    #[test]
    fn property_single_byte_change_changes_digest(
        data in proptest::collection::vec(any::<u8>(), 1..512),
        idx in any::<prop::sample::Index>(),
    ) {
        let mut changed = data.clone();
        let i = idx.index(changed.len());
        changed[i] = changed[i].wrapping_add(1);
        prop_assert!(!ContentHash::from_bytes(&data).matches(&ContentHash::from_bytes(&changed)));
    }
}
