//! Async write support for [`Identifier`].
//!
//! Implements `futures_io::AsyncWrite`, which is runtime-agnostic: tokio
//! users adapt it with `tokio_util::compat`, async-std and smol use it
//! directly.
//!
//! Hashing is CPU-bound and never blocks on I/O, so every poll completes
//! immediately. Attached sinks are still driven synchronously.
//!
//! This module requires the `async-io` feature to be enabled.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_io::AsyncWrite;

use crate::identifier::Identifier;

impl AsyncWrite for Identifier<'_> {
    fn poll_write(self: Pin<&mut Self>, _cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        Poll::Ready(self.get_mut().write(buf).map_err(io::Error::from))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(io::Write::flush(self.get_mut()))
    }

    /// Closes the identifier. Closing an already closed identifier is
    /// treated as done, since `AsyncWrite::poll_close` may be called more
    /// than once by adapters.
    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.is_closed() {
            return Poll::Ready(Ok(()));
        }
        Poll::Ready(this.close().map_err(io::Error::from))
    }
}
