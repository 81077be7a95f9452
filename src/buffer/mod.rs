//! Byte buffers backing the receive and transmit paths.
//!
//! - [`ring`] - Fixed-capacity circular byte queue
//! - [`storage`] - Const-generic static storage for a channel's two buffers
//!
//! Buffers may live in internal RAM ([`ChannelBuffers`]) or in an externally
//! mapped memory range ([`RingBuffer::from_raw_parts`]).

pub mod ring;
pub mod storage;

pub use ring::RingBuffer;
pub use storage::{ChannelBuffers, DefaultBuffers, LargeBuffers, SmallBuffers};
