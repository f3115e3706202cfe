pub mod encoder;
pub mod error;
pub mod picture;
pub mod pred;

mod bitpacker;
mod bytesink;
mod constants;
mod histogram;
mod huffman;
mod plane;
mod tables;

pub use encoder::{Encoder, EncoderConfig};
pub use error::{Error, Result};
pub use picture::{PixelFormat, Picture};
pub use pred::PredictionMethod;
