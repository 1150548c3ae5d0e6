pub mod bitstream;
pub mod ec;
pub mod error;
pub mod iter;
pub mod mask;
pub mod metadata;

pub use bitstream::*;
pub use error::*;
pub use mask::MaskPattern;
pub use metadata::*;
