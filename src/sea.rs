//! Decorative sea scene: background fish plus one dolphin per unit of the last result.
//!
//! Scene generation is pure over a caller-supplied RNG so it can be tested with a
//! seeded generator; drawing the scene with cairo lives in the UI module.

use rand::seq::SliceRandom;
use rand::Rng;

pub const FISH_PALETTE: [Rgb; 6] = [
    Rgb::from_hex(0xffb347),
    Rgb::from_hex(0xff6961),
    Rgb::from_hex(0xfdfd96),
    Rgb::from_hex(0x77dd77),
    Rgb::from_hex(0x84b6f4),
    Rgb::from_hex(0xfdcae1),
];

pub const DOLPHIN_PALETTE: [Rgb; 17] = [
    Rgb::from_hex(0x0074d9),
    Rgb::from_hex(0x39cccc),
    Rgb::from_hex(0x3d85c6),
    Rgb::from_hex(0x1e90ff),
    Rgb::from_hex(0x00bfff),
    Rgb::from_hex(0x4682b4),
    Rgb::from_hex(0x5dade2),
    Rgb::from_hex(0x2980b9),
    Rgb::from_hex(0x76d7ea),
    Rgb::from_hex(0x40e0d0),
    Rgb::from_hex(0x6495ed),
    Rgb::from_hex(0x00ced1),
    Rgb::from_hex(0xffb347),
    Rgb::from_hex(0xff6961),
    Rgb::from_hex(0xfdfd96),
    Rgb::from_hex(0x77dd77),
    Rgb::from_hex(0xfdcae1),
];

pub const DOLPHIN_GLYPH: &str = "🐬";
pub const DOLPHIN_FONT_SIZE: f64 = 28.0;

pub const FISH_LENGTH: i32 = 30;
pub const FISH_HEIGHT: i32 = 15;
pub const FISH_TAIL: i32 = 10;
const FISH_MARGIN: i32 = 10;
/// Gap kept between a fish anchor and the far edge, on both axes.
const FISH_FAR_MARGIN: i32 = 30;
const DOLPHIN_MARGIN: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Channels scaled to `0.0..=1.0` for cairo.
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

/// A fish anchored at the top-left of its body; the tail extends `FISH_TAIL` to the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fish {
    pub x: i32,
    pub y: i32,
    pub color: Rgb,
}

impl Fish {
    /// Body ellipse bounding box as `(x0, y0, x1, y1)`.
    pub fn body(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.x + FISH_LENGTH, self.y + FISH_HEIGHT)
    }

    pub fn tail(&self) -> [(i32, i32); 3] {
        [
            (self.x - FISH_TAIL, self.y + 7),
            (self.x, self.y),
            (self.x, self.y + FISH_HEIGHT),
        ]
    }

    pub fn eye(&self) -> (i32, i32, i32, i32) {
        (self.x + 22, self.y + 5, self.x + 26, self.y + 9)
    }
}

/// A dolphin glyph centered on `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dolphin {
    pub x: i32,
    pub y: i32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeaScene {
    pub width: i32,
    pub height: i32,
    pub fish: Vec<Fish>,
    pub dolphins: Vec<Dolphin>,
}

impl SeaScene {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        width: i32,
        height: i32,
        fish_count: usize,
        dolphin_count: u32,
    ) -> Self {
        let fish = (0..fish_count)
            .map(|_| Fish {
                x: random_coord(rng, FISH_MARGIN, width - FISH_FAR_MARGIN),
                y: random_coord(rng, FISH_MARGIN, height - FISH_FAR_MARGIN),
                color: pick(rng, &FISH_PALETTE),
            })
            .collect();

        let dolphins = (0..dolphin_count)
            .map(|_| Dolphin {
                x: random_coord(rng, 0, width - DOLPHIN_MARGIN),
                y: random_coord(rng, 0, height - DOLPHIN_MARGIN),
                color: pick(rng, &DOLPHIN_PALETTE),
            })
            .collect();

        Self {
            width,
            height,
            fish,
            dolphins,
        }
    }
}

/// Number of dolphins to show for a result: truncated toward zero, clamped to `0..=max`.
pub fn dolphin_count(value: f64, max: u32) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let truncated = value.trunc();
    if truncated >= f64::from(max) {
        max
    } else {
        truncated as u32
    }
}

// A sea smaller than the margins collapses the range onto its lower bound.
fn random_coord<R: Rng + ?Sized>(rng: &mut R, low: i32, high: i32) -> i32 {
    if high <= low {
        return low;
    }
    rng.gen_range(low..=high)
}

fn pick<R: Rng + ?Sized>(rng: &mut R, palette: &[Rgb]) -> Rgb {
    palette.choose(rng).copied().unwrap_or(Rgb::from_hex(0x000000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dolphin_count_clamps() {
        assert_eq!(dolphin_count(2.9, 100), 2);
        assert_eq!(dolphin_count(3.0, 100), 3);
        assert_eq!(dolphin_count(-4.0, 100), 0);
        assert_eq!(dolphin_count(0.5, 100), 0);
        assert_eq!(dolphin_count(250.0, 100), 100);
        assert_eq!(dolphin_count(100.0, 100), 100);
        assert_eq!(dolphin_count(f64::NAN, 100), 0);
        assert_eq!(dolphin_count(f64::INFINITY, 100), 0);
        assert_eq!(dolphin_count(7.0, 5), 5);
    }

    #[test]
    fn test_scene_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let scene = SeaScene::generate(&mut rng, 300, 400, 10, 100);
        assert_eq!(scene.fish.len(), 10);
        assert_eq!(scene.dolphins.len(), 100);
        assert_eq!((scene.width, scene.height), (300, 400));

        for fish in &scene.fish {
            assert!((10..=270).contains(&fish.x), "fish x {}", fish.x);
            assert!((10..=370).contains(&fish.y), "fish y {}", fish.y);
            assert!(FISH_PALETTE.contains(&fish.color));
        }
        for dolphin in &scene.dolphins {
            assert!((0..=250).contains(&dolphin.x), "dolphin x {}", dolphin.x);
            assert!((0..=350).contains(&dolphin.y), "dolphin y {}", dolphin.y);
            assert!(DOLPHIN_PALETTE.contains(&dolphin.color));
        }
    }

    #[test]
    fn test_narrow_sea_bounds_each_axis_separately() {
        let mut rng = StdRng::seed_from_u64(3);
        let scene = SeaScene::generate(&mut rng, 100, 400, 50, 50);
        assert!(scene.fish.iter().all(|f| (10..=70).contains(&f.x)));
        assert!(scene.fish.iter().all(|f| (10..=370).contains(&f.y)));
        assert!(scene.fish.iter().any(|f| f.y > 70));
        assert!(scene.dolphins.iter().all(|d| (0..=50).contains(&d.x)));
        assert!(scene.dolphins.iter().all(|d| (0..=350).contains(&d.y)));
    }

    #[test]
    fn test_scene_is_reproducible_with_seed() {
        let a = SeaScene::generate(&mut StdRng::seed_from_u64(42), 300, 400, 10, 12);
        let b = SeaScene::generate(&mut StdRng::seed_from_u64(42), 300, 400, 10, 12);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tiny_sea_does_not_panic() {
        let mut rng = StdRng::seed_from_u64(1);
        let scene = SeaScene::generate(&mut rng, 20, 20, 3, 3);
        assert!(scene.fish.iter().all(|f| f.x == 10 && f.y == 10));
        assert!(scene.dolphins.iter().all(|d| d.x == 0 && d.y == 0));
    }

    #[test]
    fn test_fish_geometry() {
        let fish = Fish { x: 100, y: 50, color: FISH_PALETTE[0] };
        assert_eq!(fish.body(), (100, 50, 130, 65));
        assert_eq!(fish.tail(), [(90, 57), (100, 50), (100, 65)]);
        assert_eq!(fish.eye(), (122, 55, 126, 59));
    }

    #[test]
    fn test_rgb() {
        let c = Rgb::from_hex(0xff6961);
        assert_eq!(c, Rgb { r: 0xff, g: 0x69, b: 0x61 });
        let (r, _, _) = c.to_unit();
        assert!((r - 1.0).abs() < f64::EPSILON);
    }
}
