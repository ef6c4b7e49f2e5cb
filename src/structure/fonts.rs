//! Font size statistics and band clustering for heading levels.

use std::collections::BTreeMap;

use crate::model::HeadingLevel;

/// Maximum number of heading bands (Title, H1, H2, H3).
pub const MAX_BANDS: usize = 4;

/// Sizes within this distance of the previous size share a band.
const BAND_TOLERANCE: f32 = 1.0;

/// Minimum distance above the body size for a heading band.
const HEADING_MARGIN: f32 = 0.5;

/// A cluster of similar font sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct FontBand {
    /// Largest size in the band
    pub max: f32,
    /// Smallest size in the band
    pub min: f32,
    /// Number of elements in the band
    pub count: usize,
}

impl FontBand {
    fn contains(&self, size: f32) -> bool {
        size >= self.min - 0.05 && size <= self.max + 0.05
    }
}

/// Font size statistics of one document.
#[derive(Debug, Clone, Default)]
pub struct FontBands {
    /// Body text font size (most common)
    pub body_size: f32,
    /// Median of all sizes
    pub median: f32,
    /// Standard deviation of all sizes
    pub std_dev: f32,
    /// Heading bands, largest first
    pub bands: Vec<FontBand>,
    /// All observed font sizes with frequency (0.1pt keys)
    pub size_histogram: BTreeMap<i32, usize>,
}

impl FontBands {
    /// Build statistics from the font sizes of a document.
    pub fn from_sizes(sizes: &[f32]) -> Self {
        let mut stats = Self::default();
        if sizes.is_empty() {
            stats.body_size = 12.0;
            stats.median = 12.0;
            return stats;
        }

        for &size in sizes {
            *stats.size_histogram.entry(size_key(size)).or_insert(0) += 1;
        }

        // Most frequent size; ties resolve to the smaller size
        let mut body_key = 0;
        let mut body_count = 0;
        for (&key, &count) in &stats.size_histogram {
            if count > body_count {
                body_key = key;
                body_count = count;
            }
        }
        stats.body_size = key_size(body_key);

        let mut sorted = sizes.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        stats.median = median_of_sorted(&sorted);

        let mean = sorted.iter().sum::<f32>() / sorted.len() as f32;
        let variance = if sorted.len() > 1 {
            sorted.iter().map(|s| (s - mean).powi(2)).sum::<f32>() / (sorted.len() - 1) as f32
        } else {
            0.0
        };
        stats.std_dev = variance.sqrt();

        stats.bands = cluster_bands(&stats.size_histogram, stats.body_size);
        stats
    }

    /// Index of the band a size falls into, or `None` for body-sized text.
    pub fn band_of(&self, size: f32) -> Option<usize> {
        if size <= self.body_size + HEADING_MARGIN {
            return None;
        }
        if let Some(idx) = self.bands.iter().position(|b| b.contains(size)) {
            return Some(idx);
        }
        // Size not seen during analysis: closest band from above
        self.bands
            .iter()
            .position(|b| size >= b.min)
            .or_else(|| self.bands.len().checked_sub(1))
    }

    /// Relative size of a font versus the body median, clamped to 0..=3.
    pub fn z_score(&self, size: f32) -> f32 {
        let spread = self.std_dev.max(1.0);
        ((size - self.median) / spread).clamp(0.0, 3.0)
    }
}

/// Mapping from font bands to heading levels.
#[derive(Debug, Clone)]
pub struct LevelTable {
    bands: FontBands,
    levels: Vec<HeadingLevel>,
}

impl LevelTable {
    /// Build a level table. With `title_band`, the largest band is the title.
    pub fn new(bands: FontBands, title_band: bool) -> Self {
        let ladder: &[HeadingLevel] = if title_band {
            &[
                HeadingLevel::Title,
                HeadingLevel::H1,
                HeadingLevel::H2,
                HeadingLevel::H3,
            ]
        } else {
            &[HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3]
        };
        let levels = (0..bands.bands.len())
            .map(|i| ladder[i.min(ladder.len() - 1)])
            .collect();
        Self { bands, levels }
    }

    /// Heading level for a font size (`Body` for body-sized text).
    pub fn level_for(&self, size: f32) -> HeadingLevel {
        self.bands
            .band_of(size)
            .and_then(|idx| self.levels.get(idx).copied())
            .unwrap_or(HeadingLevel::Body)
    }

    /// The underlying font statistics.
    pub fn bands(&self) -> &FontBands {
        &self.bands
    }
}

/// Compute a level table from a font-size multiset.
pub fn level_table(sizes: &[f32], title_band: bool) -> LevelTable {
    LevelTable::new(FontBands::from_sizes(sizes), title_band)
}

fn size_key(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

fn key_size(key: i32) -> f32 {
    key as f32 / 10.0
}

fn median_of_sorted(sorted: &[f32]) -> f32 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn cluster_bands(histogram: &BTreeMap<i32, usize>, body_size: f32) -> Vec<FontBand> {
    let mut bands: Vec<FontBand> = Vec::new();
    let mut previous: Option<f32> = None;

    for (&key, &count) in histogram.iter().rev() {
        let size = key_size(key);
        if size <= body_size + HEADING_MARGIN {
            break;
        }
        match (previous, bands.last_mut()) {
            (Some(prev), Some(band)) if prev - size <= BAND_TOLERANCE => {
                band.min = size;
                band.count += count;
            }
            _ => bands.push(FontBand {
                max: size,
                min: size,
                count,
            }),
        }
        previous = Some(size);
    }

    // Fold anything past the last band into it
    if bands.len() > MAX_BANDS {
        let extra = bands.split_off(MAX_BANDS);
        if let Some(last) = bands.last_mut() {
            for band in extra {
                last.min = band.min;
                last.count += band.count;
            }
        }
    }

    bands
}
