use std::fmt;

/// How much one lighten or darken step moves the CIE L* lightness.
const LIGHTNESS_STEP: f32 = 5.0;

/// 24-bit sRGB color.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::hex(0x000000);
    pub const WHITE: Rgb = Rgb::hex(0xffffff);
    pub const GRAY: Rgb = Rgb::hex(0x808080);
    pub const DARK_GRAY: Rgb = Rgb::hex(0x404040);
    pub const RED: Rgb = Rgb::hex(0xff3030);
    pub const YELLOW: Rgb = Rgb::hex(0xffff00);
    pub const ORANGE: Rgb = Rgb::hex(0xffa040);
    pub const CYAN: Rgb = Rgb::hex(0x40e0e0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Rgb {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    /// Brighten perceptually by `k` steps.
    pub fn lighten(self, k: f32) -> Self {
        self.shift_lightness(LIGHTNESS_STEP * k)
    }

    /// Darken perceptually by `k` steps.
    pub fn darken(self, k: f32) -> Self {
        self.shift_lightness(-LIGHTNESS_STEP * k)
    }

    /// Linear interpolation in sRGB space, `t` in [0, 1].
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| {
            (a as f32 + (b as f32 - a as f32) * t).round() as u8
        };
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Perceptual lightness in [0, 100].
    pub fn lightness(self) -> f32 {
        self.to_lab()[0]
    }

    fn shift_lightness(self, delta: f32) -> Self {
        let [l, a, b] = self.to_lab();
        Rgb::from_lab([(l + delta).clamp(0.0, 100.0), a, b])
    }

    fn to_lab(self) -> [f32; 3] {
        let [r, g, b] =
            [self.r, self.g, self.b].map(|c| to_linear(c as f32 / 255.0));

        let x = (0.4124564 * r + 0.3575761 * g + 0.1804375 * b) / WHITE_X;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = (0.0193339 * r + 0.1191920 * g + 0.9503041 * b) / WHITE_Z;

        let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));
        [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
    }

    fn from_lab([l, a, b]: [f32; 3]) -> Self {
        let fy = (l + 16.0) / 116.0;
        let fx = fy + a / 500.0;
        let fz = fy - b / 200.0;

        let x = lab_f_inv(fx) * WHITE_X;
        let y = lab_f_inv(fy);
        let z = lab_f_inv(fz) * WHITE_Z;

        let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
        let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
        let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;

        let [r, g, b] = [r, g, b]
            .map(|c| (from_linear(c).clamp(0.0, 1.0) * 255.0).round() as u8);
        Rgb::new(r, g, b)
    }
}

// D65 white point.
const WHITE_X: f32 = 0.95047;
const WHITE_Z: f32 = 1.08883;

const DELTA: f32 = 6.0 / 29.0;

fn lab_f(t: f32) -> f32 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f32) -> f32 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

fn to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn from_linear(c: f32) -> f32 {
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.max(0.0).powf(1.0 / 2.4) - 0.055
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lab_round_trip() {
        for c in [
            Rgb::hex(0x84ad5f),
            Rgb::hex(0x2f5d50),
            Rgb::hex(0x08306b),
            Rgb::WHITE,
            Rgb::BLACK,
        ] {
            let d = c.lighten(0.0);
            assert!((c.r as i32 - d.r as i32).abs() <= 1, "{c} -> {d}");
            assert!((c.g as i32 - d.g as i32).abs() <= 1, "{c} -> {d}");
            assert!((c.b as i32 - d.b as i32).abs() <= 1, "{c} -> {d}");
        }
    }

    #[test]
    fn lighten_and_darken() {
        let c = Rgb::hex(0x65b172);
        assert!(c.lighten(1.0).lightness() > c.lightness());
        assert!(c.darken(1.0).lightness() < c.lightness());
        assert_eq!(Rgb::BLACK.darken(3.0), Rgb::BLACK);
        assert_eq!(Rgb::WHITE.lighten(3.0), Rgb::WHITE);
    }

    #[test]
    fn lerp_endpoints() {
        let (a, b) = (Rgb::hex(0x6baed6), Rgb::hex(0x08306b));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
