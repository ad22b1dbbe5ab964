//! Stream Traits for Sample Sources
//!
//! Sources of raw readings follow a pull-based model using the `nb` crate:
//! the consumer asks for the next item and the source either has one, has
//! none yet, or has failed.
//!
//! ## Common Patterns
//!
//! ```rust
//! use imucal_core::traits::Stream;
//!
//! fn drain<S: Stream>(stream: &mut S, out: &mut Vec<S::Item>) -> Result<(), S::Error> {
//!     loop {
//!         match stream.poll_next() {
//!             Ok(item) => out.push(item),
//!             // Nothing available right now, come back later
//!             Err(nb::Error::WouldBlock) => return Ok(()),
//!             Err(nb::Error::Other(e)) => return Err(e),
//!         }
//!     }
//! }
//! ```

/// Pull-based source of items
///
/// ## Error Handling
///
/// Two levels, as with every `nb` API:
/// - `nb::Error::WouldBlock` - temporarily nothing to return
/// - `nb::Error::Other(E)` - the source failed or is exhausted
///
/// Exhaustion goes through the error channel (see
/// `stream::StreamError::EndOfStream`) and is sticky: once reported, every
/// later poll reports it again.
pub trait Stream {
    /// Type of items produced by the stream
    type Item;

    /// Type of errors that can occur
    type Error;

    /// Attempt to pull the next item from the stream
    fn poll_next(&mut self) -> nb::Result<Self::Item, Self::Error>;

    /// Returns bounds on remaining items
    ///
    /// Similar to `Iterator::size_hint()`. Default is `(0, None)`.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}
