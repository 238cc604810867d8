pub mod config;
pub mod error;
pub mod ring_buffer;
pub mod session;

pub use error::RingError;
pub use ring_buffer::RingBuffer;
