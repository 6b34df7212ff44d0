#![no_main]

use libfuzzer_sys::fuzz_target;
use identrs::{IdentifyConfig, filetype};

fuzz_target!(|data: Vec<u8>| {
    let config = IdentifyConfig::default()
        .with_blake3(true)
        .with_cache_size(256)
        .with_gzip_cache_size(64);

    // Whole input in one write
    let mut whole = config.identifier();
    whole.write(&data).unwrap();
    whole.close().unwrap();
    let whole = whole.identification().unwrap();

    // Same input split at a data-derived stride
    let stride = data.first().map_or(1, |&b| usize::from(b).max(1));
    let mut split = config.identifier();
    for chunk in data.chunks(stride) {
        split.write(chunk).unwrap();
    }
    split.close().unwrap();
    let split = split.identification().unwrap();

    // Verify: size accounting
    assert_eq!(whole.size, data.len() as u64);
    assert_eq!(split.size, data.len() as u64);

    // Verify: digests, entropy and file type do not depend on write boundaries
    assert_eq!(whole.md5, split.md5);
    assert_eq!(whole.sha256, split.sha256);
    assert_eq!(whole.blake3, split.blake3);
    assert_eq!(whole.entropy, split.entropy);
    assert_eq!(whole.filetype, split.filetype);

    // Verify: entropy stays within [0, 8]
    assert!((0.0..=8.0).contains(&whole.entropy));

    // Verify: the classifier never panics on arbitrary prefixes
    let _ = filetype::detect(&data, data.len());
});
