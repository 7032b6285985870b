pub mod bits;
pub mod code_table;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod pipeline;
pub mod queue;
pub mod tree;

/// Number of distinct byte values, and so the most leaves a tree can have.
pub const SYMBOL_COUNT: usize = 256;

/// Character key given to internal nodes when ordering the queue.
pub const INTERNAL_SENTINEL: u8 = 0;

pub use bits::Strictness;
pub use code_table::{Code, CodeTable, SingleSymbolCode};
pub use codec::{Codec, CodecOptions};
pub use decoder::{DecodeError, Decoder};
pub use encoder::{EncodeError, Encoder};
pub use frequency::FrequencyTable;
pub use queue::{Priority, PriorityQueue, QueueError};
pub use tree::{BuildError, HuffmanTree, Node};

/// Any error raised by this crate's coding stages
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
