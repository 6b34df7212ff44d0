//! Identify files from async code.
//!
//! Uses the `futures-io` `AsyncWrite` impl through `tokio-util`'s compat
//! layer, so `tokio::io::copy` can stream a file straight into an
//! `Identifier`. Several files are identified concurrently.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io -- <path>...

use identrs::{Identification, IdentifyConfig};
use tokio::io::AsyncWriteExt;
use tokio_util::compat::FuturesAsyncWriteCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        return Err("usage: async_tokio <path>...".into());
    }

    let config = IdentifyConfig::default();

    let handles: Vec<_> = paths
        .into_iter()
        .map(|path| tokio::spawn(async move { identify(path, config).await }))
        .collect();

    for handle in handles {
        let (path, id) = handle.await??;
        println!("{path}: {} bytes, sha256 {:?}", id.size, id.sha256);
    }
    Ok(())
}

async fn identify(
    path: String,
    config: IdentifyConfig,
) -> Result<(String, Identification), std::io::Error> {
    let mut file = tokio::fs::File::open(&path).await?;
    let mut sink = config.identifier().compat_write();

    tokio::io::copy(&mut file, &mut sink).await?;
    sink.shutdown().await?;

    let id = sink.into_inner().identification()?;
    Ok((path, id))
}
