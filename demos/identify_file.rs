//! Identify a file and print the result as JSON.
//!
//! Reads the file once through a caching reader, so a second pass (here, a
//! BLAKE3 digest of the same content) comes from memory when the file is
//! small enough.
//!
//! Run with:
//!     RUST_LOG=identrs=debug cargo run --example identify_file -- <path>

use std::env;
use std::io;

use identrs::{CachedFile, DigestHasher, IdentifyConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = env::args().nth(1).ok_or("usage: identify_file <path>")?;

    let config = IdentifyConfig::default().with_gzip_cache_size(16 * 1024 * 1024);
    let mut source = CachedFile::open(&path, 1024 * 1024)?;
    let mut identifier = config.identifier();

    io::copy(&mut source, &mut identifier)?;
    identifier.close()?;

    let identification = identifier.identification()?;
    println!("{}", serde_json::to_string_pretty(&identification)?);

    if let Some(gzip_size) = identification.gzip_size {
        let ratio = gzip_size as f64 / identification.size.max(1) as f64;
        println!("gzip ratio: {ratio:.3}");
    }

    // Second pass over the same bytes
    let mut reader = source.new_reader()?;
    println!(
        "second pass from {}",
        if reader.is_cached() { "memory" } else { "disk" }
    );

    #[cfg(feature = "hash-blake3")]
    {
        let mut hasher = DigestHasher::new(identrs::DigestAlgorithm::Blake3);
        io::copy(&mut reader, &mut hasher)?;
        println!("blake3: {}", hasher.finalize());
    }
    #[cfg(not(feature = "hash-blake3"))]
    {
        let mut hasher = DigestHasher::new(identrs::DigestAlgorithm::Sha256);
        io::copy(&mut reader, &mut hasher)?;
        println!("sha256: {}", hasher.finalize());
    }

    Ok(())
}
