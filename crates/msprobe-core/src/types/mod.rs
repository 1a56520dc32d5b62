//! # Types
//!
//! Plain data shared by the access layer, the decoders and the output side:
//! chip addresses, memory windows, procedure-call registers and the decoded
//! status itself.

pub mod address;
pub mod region;
pub mod registers;
pub mod status;

// Re-export all public types
pub use address::Address;
pub use region::{MemorySpace, Region};
pub use registers::RegisterSnapshot;
pub use status::{Colorspace, InputFormat, Signal, StatusSnapshot, VideoStatus};
