use serde::{Deserialize, Serialize};

/// Raw color-id values at or above this are stored with three planes.
pub const COLOR_PLANES_THRESHOLD: i32 = 100;

/// Sensor/color layout recorded in the `color_id` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorId {
    Mono,
    BayerRggb,
    BayerGrbg,
    BayerGbrg,
    BayerBggr,
    BayerCyym,
    BayerYcmy,
    BayerYmcy,
    BayerMyyc,
    Rgb,
    Bgr,
    Other(i32),
}

impl ColorId {
    pub fn raw(self) -> i32 {
        match self {
            ColorId::Mono => 0,
            ColorId::BayerRggb => 8,
            ColorId::BayerGrbg => 9,
            ColorId::BayerGbrg => 10,
            ColorId::BayerBggr => 11,
            ColorId::BayerCyym => 16,
            ColorId::BayerYcmy => 17,
            ColorId::BayerYmcy => 18,
            ColorId::BayerMyyc => 19,
            ColorId::Rgb => 100,
            ColorId::Bgr => 101,
            ColorId::Other(raw) => raw,
        }
    }

    /// Planes per pixel for a raw color id: mono and Bayer layouts
    /// store one, RGB/BGR store three.
    pub fn plane_count_for(raw: i32) -> u32 {
        if raw < COLOR_PLANES_THRESHOLD { 1 } else { 3 }
    }

    pub fn plane_count(self) -> u32 {
        Self::plane_count_for(self.raw())
    }

    /// True only for the named Bayer mosaics; unlisted ids between them
    /// (12..=15) are not Bayer.
    pub fn is_bayer(self) -> bool {
        matches!(
            self,
            ColorId::BayerRggb
                | ColorId::BayerGrbg
                | ColorId::BayerGbrg
                | ColorId::BayerBggr
                | ColorId::BayerCyym
                | ColorId::BayerYcmy
                | ColorId::BayerYmcy
                | ColorId::BayerMyyc
        )
    }
}

impl From<i32> for ColorId {
    fn from(raw: i32) -> Self {
        match raw {
            0 => ColorId::Mono,
            8 => ColorId::BayerRggb,
            9 => ColorId::BayerGrbg,
            10 => ColorId::BayerGbrg,
            11 => ColorId::BayerBggr,
            16 => ColorId::BayerCyym,
            17 => ColorId::BayerYcmy,
            18 => ColorId::BayerYmcy,
            19 => ColorId::BayerMyyc,
            100 => ColorId::Rgb,
            101 => ColorId::Bgr,
            other => ColorId::Other(other),
        }
    }
}
