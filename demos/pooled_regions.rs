//! Identify several regions of one file concurrently.
//!
//! Splits a file into fixed-size regions, hands each one to a worker through
//! a shared `BoundedFilePool`, and reuses one `Identifier` per worker.
//!
//! Run with:
//!     cargo run --example pooled_regions -- <path> [region_size]

use std::env;
use std::io;
use std::sync::Arc;
use std::thread;

use identrs::{BoundedFilePool, IdentifyConfig, IdentifyError};

const WORKERS: u64 = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let path = args.next().ok_or("usage: pooled_regions <path> [region_size]")?;
    let region_size: u64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 1024 * 1024,
    };
    let file_size = std::fs::metadata(&path)?.len();
    let regions = file_size.div_ceil(region_size.max(1));

    println!("{path}: {file_size} bytes, {regions} regions\n");

    let pool = Arc::new(BoundedFilePool::new(&path, WORKERS as usize)?);
    let config = IdentifyConfig::default();

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || -> Result<Vec<(u64, String)>, IdentifyError> {
                let mut identifier = config.identifier();
                let mut results = Vec::new();

                for region in (worker..regions).step_by(WORKERS as usize) {
                    let mut window = pool.acquire(region * region_size, region_size)?;
                    identifier.reset();
                    io::copy(&mut window, &mut identifier)?;
                    identifier.close()?;
                    pool.release(window)?;

                    let id = identifier.identification()?;
                    let mimetype = id.filetype.map(|f| f.mimetype).unwrap_or_default();
                    results.push((region, format!("{:?} {:.3} {mimetype}", id.sha256, id.entropy)));
                }
                Ok(results)
            })
        })
        .collect();

    let mut all = Vec::new();
    for handle in handles {
        let results = handle.join().map_err(|_| "worker panicked")??;
        all.extend(results);
    }
    all.sort_by_key(|(region, _)| *region);

    for (region, line) in all {
        println!("region {region:>5}: {line}");
    }
    Ok(())
}
