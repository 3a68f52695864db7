//! I/O utilities for metadata extraction
//!
//! This module provides the byte order strategies, the random-access
//! reader abstraction used by the IFD resolver and the forward-only
//! peeking reader used by the marker scanner.

pub mod seekable;
pub mod byte_order;
pub mod peek_reader;
#[cfg(test)]
mod tests;
