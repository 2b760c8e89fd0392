use gfx::Rgb;
use rand::Rng;
use strum::{Display, EnumIter};

#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum BiomeKind {
    Ocean,
    Mountains,
    Plains,
    #[strum(serialize = "light forest")]
    LightForest,
    #[strum(serialize = "dark forest")]
    DarkForest,
    Grassland,
    Scrubland,
    Steppe,
    Taiga,
}

use BiomeKind::*;

/// Weighted pool for cells that don't touch the sea, repeats are weight.
const INTERIOR: [BiomeKind; 8] = [
    Grassland,
    Grassland,
    Scrubland,
    Steppe,
    Steppe,
    Plains,
    Taiga,
    LightForest,
];

impl BiomeKind {
    pub fn is_ocean(self) -> bool {
        self == Ocean
    }

    pub fn is_mountains(self) -> bool {
        self == Mountains
    }

    /// Static terrain rule, actors can walk anywhere except water and
    /// mountains.
    pub fn is_passable(self) -> bool {
        !(self.is_ocean() || self.is_mountains())
    }

    pub fn sample_interior<R: Rng + ?Sized>(rng: &mut R) -> BiomeKind {
        INTERIOR[rng.gen_range(0..INTERIOR.len())]
    }

    pub fn description(self) -> &'static str {
        match self {
            Ocean => "Cold grey water stretches to the horizon.",
            Mountains => "Sheer rock walls rise above the treeline.",
            Plains => "Open plains, the wind flattening the grass.",
            LightForest => "Birch and aspen, the ground dappled with light.",
            DarkForest => "Old spruce. Little light reaches the ground here.",
            Grassland => "Tall grass sways over gently rolling hills.",
            Scrubland => "Thorny scrub and low bushes on dry ground.",
            Steppe => "A dry, windswept steppe under an enormous sky.",
            Taiga => "Larch and pine over mossy hummocks.",
        }
    }

    /// Character used for the terrain in the zoomed view.
    pub fn icon(self) -> char {
        match self {
            Ocean => '~',
            Mountains => '^',
            Plains | Steppe => '.',
            Grassland => '"',
            Scrubland => ',',
            LightForest => '♣',
            DarkForest => '♠',
            Taiga => '↑',
        }
    }

    fn palette(self) -> &'static [Rgb] {
        const MINTY: &[Rgb] =
            &[Rgb::hex(0x84ad5f), Rgb::hex(0x65b172), Rgb::hex(0x4fa67a)];
        const DARK_MINTY: &[Rgb] =
            &[Rgb::hex(0x32926f), Rgb::hex(0x2a7a5e), Rgb::hex(0x236b57)];
        const CHOCOLATE: &[Rgb] =
            &[Rgb::hex(0x7b5b3a), Rgb::hex(0x6b4e31), Rgb::hex(0x5e4430)];

        match self {
            Ocean => const { &[Rgb::hex(0x2171b5)] },
            Mountains => CHOCOLATE,
            Plains => const { &[Rgb::hex(0x9fa752), Rgb::hex(0x8fae5a)] },
            LightForest => MINTY,
            DarkForest => DARK_MINTY,
            Grassland => const { &[Rgb::hex(0x84ad5f), Rgb::hex(0x9fa752)] },
            Scrubland => const { &[Rgb::hex(0xa89f5b), Rgb::hex(0xb0a25e)] },
            Steppe => const { &[Rgb::hex(0xc2b280), Rgb::hex(0xb5a66e)] },
            Taiga => const { &[Rgb::hex(0x2f5d50), Rgb::hex(0x3c6e5e)] },
        }
    }

    /// Roll a base color for a new cell of this kind.
    pub fn sample_color<R: Rng + ?Sized>(self, rng: &mut R) -> Rgb {
        if self == Ocean {
            // Sea shades run from mid to deep blue.
            const SHALLOW: Rgb = Rgb::hex(0x6baed6);
            const DEEP: Rgb = Rgb::hex(0x08306b);
            return SHALLOW.lerp(DEEP, rng.gen_range(0.5..1.0));
        }
        let palette = self.palette();
        palette[rng.gen_range(0..palette.len())]
    }
}

/// Canonical biome of a single Voronoi cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Biome {
    pub kind: BiomeKind,
    pub base_color: Rgb,
    pub cell: usize,
    pub neighbors: Vec<usize>,
}

impl Biome {
    pub fn is_ocean(&self) -> bool {
        self.kind.is_ocean()
    }

    pub fn is_mountains(&self) -> bool {
        self.kind.is_mountains()
    }

    pub fn is_passable(&self) -> bool {
        self.kind.is_passable()
    }
}

/// Value copy of a cell's biome for one map tile, with the tile's own color
/// variation applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TileBiome {
    pub kind: BiomeKind,
    pub cell: usize,
    pub bg: Rgb,
    pub fg: Rgb,
}

impl TileBiome {
    pub fn is_ocean(&self) -> bool {
        self.kind.is_ocean()
    }

    pub fn is_mountains(&self) -> bool {
        self.kind.is_mountains()
    }

    pub fn is_passable(&self) -> bool {
        self.kind.is_passable()
    }
}
