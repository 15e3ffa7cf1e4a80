/// Per-pixel colour adjustment applied to an image once, when it is decoded.
///
/// Stages run in order: contrast around mid-grey, saturation around the pixel's
/// channel mean, brightness multiply, then a flat darkening by `blackness`.
/// Alpha is left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorGrade {
    pub contrast: f32,
    pub saturation: f32,
    pub brightness: f32,
    /// Fraction of full intensity subtracted from every channel, 0..=1.
    pub blackness: f32,
}

impl ColorGrade {
    pub const IDENTITY: Self = Self {
        contrast: 1.0,
        saturation: 1.0,
        brightness: 1.0,
        blackness: 0.0,
    };

    /// Bit pattern used to key caches of graded images.
    pub fn cache_tag(&self) -> [u32; 4] {
        [
            self.contrast.to_bits(),
            self.saturation.to_bits(),
            self.brightness.to_bits(),
            self.blackness.to_bits(),
        ]
    }

    pub fn apply(&self, rgba: &mut [u8]) {
        let darken = self.blackness.clamp(0.0, 1.0) * 255.0;
        for pixel in rgba.chunks_exact_mut(4) {
            let mut channels = [pixel[0] as f32, pixel[1] as f32, pixel[2] as f32];
            for channel in &mut channels {
                *channel = clamp_channel((*channel - 128.0) * self.contrast + 128.0);
            }
            let mean = (channels[0] + channels[1] + channels[2]) / 3.0;
            for channel in &mut channels {
                *channel = clamp_channel(mean + (*channel - mean) * self.saturation);
                *channel = clamp_channel(*channel * self.brightness);
                *channel = clamp_channel(*channel - darken);
            }
            pixel[0] = channels[0].round() as u8;
            pixel[1] = channels[1].round() as u8;
            pixel[2] = channels[2].round() as u8;
        }
    }
}

impl Default for ColorGrade {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn clamp_channel(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 255.0)
}
