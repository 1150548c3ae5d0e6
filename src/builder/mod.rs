mod ec;
mod qr;

pub use ec::{add_ecc_and_interleave, pad_to_capacity};
pub use qr::{Module, Region, QR};

use log::{debug, info};

use crate::common::{
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
    BitStream,
};

/// Assembles a symbol from an already segmented bit stream.
pub struct QRBuilder<'a> {
    data: &'a BitStream,
    version: Version,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a BitStream, version: Version) -> Self {
        Self { data, version, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a BitStream) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = version;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    /// Skips the penalty search and uses the given mask.
    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        match self.mask {
            Some(m) => format!(
                "{{ Version: {}, Ec level: {:?}, Mask: {} }}",
                *self.version, self.ec_level, *m
            ),
            None => format!(
                "{{ Version: {}, Ec level: {:?}, Mask: Auto }}",
                *self.version, self.ec_level
            ),
        }
    }
}


impl QRBuilder<'_> {
    /// Runs the pipeline up to data placement: padding, error correction and
    /// interleaving, function patterns and the zigzag fill. Nothing is masked yet and the
    /// information areas are still reserved.
    pub fn build_unmasked(&self) -> QRResult<QR> {
        let (version, ec_level) = (self.version, self.ec_level);
        debug!("Generating QR {}...", self.metadata());

        let data = pad_to_capacity(self.data, version, ec_level)?;

        debug!("Constructing payload with ecc & interleaving...");
        let codewords = add_ecc_and_interleave(version, ec_level, &data);
        let payload = BitStream::from_bytes(&codewords);

        let mut qr = QR::new(version, ec_level);

        debug!("Drawing functional patterns...");
        qr.draw_all_function_patterns();

        debug!("Drawing encoding region...");
        let placed = qr.draw_encoding_region(&payload);
        assert_eq!(placed, version.raw_data_modules(), "Encoding region not filled exactly");

        Ok(qr)
    }

    pub fn build(&self) -> QRResult<QR> {
        let mut qr = self.build_unmasked()?;

        qr.draw_version_info();

        let mask = match self.mask {
            Some(m) => {
                debug!("Applying mask {}...", *m);
                qr.apply_mask(m)?;
                m
            }
            None => {
                debug!("Finding & applying best mask...");
                apply_best_mask(&mut qr)?
            }
        };

        assert!(qr.is_complete(), "Symbol has unfilled modules after masking");

        let version = self.version;
        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        info!(
            "Generated QR {{ Version: {}, Ec level: {:?}, Mask: {} }}: Data bits {}/{}, \
             Error capacity {}, Dark modules {}%",
            *version,
            self.ec_level,
            *mask,
            self.data.len(),
            version.data_bit_capacity(self.ec_level),
            version.ec_capacity(self.ec_level),
            dark_modules * 100 / total_modules
        );

        Ok(qr)
    }
}
