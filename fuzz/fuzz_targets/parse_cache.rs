// SPDX-License-Identifier: Apache-2.0

#![no_main]

use libfuzzer_sys::fuzz_target;
use teamboard_core::CacheEntry;

fuzz_target!(|data: &[u8]| {
    if let Ok(entry) = CacheEntry::decode(data) {
        let encoded = entry.encode().expect("decoded entry re-encodes");
        let again = CacheEntry::decode(&encoded).expect("encoded entry decodes");
        assert_eq!(again.issues, entry.issues);
    }
});
