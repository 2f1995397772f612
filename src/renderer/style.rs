use std::sync::LazyLock;

/// One stop of the vertical fade mask (offset and alpha both in `[0, 1]`)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskStop {
    pub offset: f32,
    pub alpha: f32,
}

/// Look shared by every digit slot
#[derive(Clone, Debug, PartialEq)]
pub struct DigitStyle {
    /// Fade applied top to bottom over the slot so glyphs scroll in and out softly
    pub mask: Vec<MaskStop>,
    /// Clip the glyph strip to the slot
    pub clip: bool,
    /// Use fixed-width figures so slots don't jitter
    pub tabular_numbers: bool,
    /// Glyphs are centred horizontally and vertically in their cell
    pub center_glyphs: bool,
}

static DIGIT_STYLE: LazyLock<DigitStyle> = LazyLock::new(|| {
    log::debug!("Initializing shared digit style");
    DigitStyle {
        mask: vec![
            MaskStop {
                offset: 0.0,
                alpha: 0.0,
            },
            MaskStop {
                offset: 0.2,
                alpha: 1.0,
            },
            MaskStop {
                offset: 0.8,
                alpha: 1.0,
            },
            MaskStop {
                offset: 1.0,
                alpha: 0.0,
            },
        ],
        clip: true,
        tabular_numbers: true,
        center_glyphs: true,
    }
});

/// The slot style, built once per process on first use
pub fn digit_style() -> &'static DigitStyle {
    &DIGIT_STYLE
}

impl DigitStyle {
    /// Mask alpha at vertical position `t` (0 = top, 1 = bottom)
    pub fn mask_alpha(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let Some(first) = self.mask.first() else {
            return 1.0;
        };
        if t <= first.offset {
            return first.alpha;
        }
        for pair in self.mask.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f32::EPSILON {
                    return b.alpha;
                }
                return a.alpha + (b.alpha - a.alpha) * (t - a.offset) / span;
            }
        }
        self.mask.last().map_or(1.0, |stop| stop.alpha)
    }
}
