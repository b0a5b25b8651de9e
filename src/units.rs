/*
Unit policies and pace constants.

The app runs three unrelated unit systems on purpose:
  - reading pace works in page-equivalents (audio minutes / 1.5)
  - listening pace works in raw minutes, never converted
  - achievement day totals use a per-format table (ebooks track percent,
    one book counted as 300 pages)
They match different product surfaces and must not be unified; changing
one table must never move numbers in another pipeline.
*/

use crate::models::Format;

pub const ONE_DAY_MS: f64 = 86_400_000.0;

// Minutes of audio that count as one page-equivalent in the reading pipeline.
pub const AUDIO_MINUTES_PER_PAGE: f64 = 1.5;

// Ebook progress is recorded in percent; a book is treated as 300 pages.
pub const EBOOK_PAGES_PER_PERCENT: f64 = 3.0;

// Fallback reading pace when there is not enough recent data.
pub const DEFAULT_READING_PACE: f64 = 25.0;

// Lookback window for pace math, measured from the newest snapshot on
// record rather than from the wall clock.
pub const PACE_LOOKBACK_DAYS: i64 = 21;

// Distinct activity days needed before the reading average is trusted.
pub const MIN_RELIABLE_READING_DAYS: usize = 3;

// Single-day listening deltas above this are imported backlog, not a real
// sitting. They are dropped from pace math only; cumulative totals keep them.
pub const LISTENING_SEED_MINUTES: f64 = 300.0;

// Reading-pipeline conversion: audio minutes become page-equivalents,
// everything else is already pages.
pub fn reading_page_equivalent(format: Format, delta: f64) -> f64 {
    match format {
        Format::Audio => delta / AUDIO_MINUTES_PER_PAGE,
        Format::Physical | Format::Ebook => delta,
    }
}

// Achievement conversion table. Differs from the reading pipeline on
// ebooks, which track percent instead of pages.
pub fn achievement_page_equivalent(format: Format, delta: f64) -> f64 {
    match format {
        Format::Physical => delta,
        Format::Ebook => delta * EBOOK_PAGES_PER_PERCENT,
        Format::Audio => delta / AUDIO_MINUTES_PER_PAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_conversion_only_touches_audio() {
        assert_eq!(reading_page_equivalent(Format::Physical, 30.0), 30.0);
        assert_eq!(reading_page_equivalent(Format::Ebook, 30.0), 30.0);
        assert_eq!(reading_page_equivalent(Format::Audio, 30.0), 20.0);
    }

    #[test]
    fn achievement_table_scales_each_format_independently() {
        assert_eq!(achievement_page_equivalent(Format::Physical, 10.0), 10.0);
        assert_eq!(achievement_page_equivalent(Format::Ebook, 10.0), 30.0);
        assert_eq!(achievement_page_equivalent(Format::Audio, 45.0), 30.0);
    }
}
