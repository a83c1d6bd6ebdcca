//! Binary match index: serializer (build side) and loader (runtime side).
//!
//! The serialized payload is the only artifact that crosses the
//! build/runtime boundary. It is an application-defined byte sequence — an
//! exact byte-for-byte container with no text semantics — chunked into
//! fixed-size opaque blocks so it can be embedded in generated source as
//! string constants (the code generator base64-encodes each block for that
//! purpose).

mod load;
mod serialize;
mod varint;

pub use load::load;
pub use serialize::{serialize, serialize_bytes, MAX_BLOCK_LEN};
