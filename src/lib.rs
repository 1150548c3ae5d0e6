//! # qrforge
//!
//! Construction of QR Code symbols from an already segmented bit stream. The crate covers
//! the low level half of a QR encoder: Reed-Solomon error correction over GF(256), block
//! splitting and interleaving, function patterns, zigzag data placement, mask selection
//! and format/version information. Turning text into mode segments and rasterizing the
//! final matrix are left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use qrforge::{BitStream, ECLevel, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Byte mode segment for "Hi": mode, 8-bit count, payload, terminator
//! let data: BitStream = "0100 00000010 01001000 01101001 0000".parse()?;
//!
//! let qr = QRBuilder::new(&data, Version::new(1)?)
//!     .ec_level(ECLevel::Q)   // Error correction level - defaults to ECLevel::M
//!     .build()?;              // Mask is chosen by penalty score unless set with .mask()
//!
//! let matrix = qr.to_matrix(1);  // 1 module quiet zone on every side
//! assert_eq!(matrix.len(), 23);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! 1. The bit stream is padded to the data capacity of the version and error correction
//!    level. Data that doesn't fit is rejected with [`QRError::DataTooLong`].
//! 2. Data codewords are split into blocks, each block gets its error correction codewords
//!    and the blocks are interleaved ([`add_ecc_and_interleave`]).
//! 3. Finder, separator, timing and alignment patterns are stamped and the format and
//!    version areas are reserved.
//! 4. Codeword bits fill the remaining modules in zigzag order.
//! 5. All 8 masks are scored in parallel and the one with the lowest penalty is applied
//!    together with its format information.
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module, clippy::suspicious_arithmetic_impl)]

pub mod builder;
pub(crate) mod common;

pub use builder::{add_ecc_and_interleave, pad_to_capacity, Module, Region, QRBuilder, QR};
pub use common::ec::{compute_divisor, compute_remainder, multiply, G};
pub use common::error::{QRError, QRResult};
pub use common::mask::{apply_best_mask, best_mask, compute_total_penalty, MaskPattern};
pub use common::metadata::{format_info, parse_format_info, Color, ECLevel, Version};
pub use common::BitStream;
