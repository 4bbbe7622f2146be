//! Band tables: the piecewise-linear percentile-to-score mappings.
//!
//! Every scoring dimension shares the same shape - a percentile in [0, 1]
//! falls into one band of a fixed table and is linearly interpolated between
//! that band's score bounds. The tables differ per dimension in band count,
//! boundaries, point cap, and the neutral default used when the underlying
//! data is missing.

/// One piecewise-linear segment: percentiles in `[lo_pct, hi_pct]` map to
/// scores in `[lo_score, hi_score]`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Band {
    pub lo_pct: f64,
    pub hi_pct: f64,
    pub lo_score: f64,
    pub hi_score: f64,
}

/// A scoring dimension: its band table, point cap, and neutral default.
///
/// The neutral default is a fixed mid-range constant - never zero - so a
/// fund missing the underlying data is not penalized for non-disclosure.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Dimension {
    pub cap: f64,
    pub neutral: f64,
    pub bands: &'static [Band],
}

/// Ideal fund scale in hundred-million currency units, the midpoint of the
/// 2-50 sweet spot. Scale fitness scores distance from this point.
pub(crate) const IDEAL_SCALE: f64 = 26.0;

/// Fee reasonableness: lower total annual fee is better.
pub(crate) const FEE: Dimension = Dimension {
    cap: 15.0,
    neutral: 8.0,
    bands: &[
        Band { lo_pct: 0.9, hi_pct: 1.0, lo_score: 13.0, hi_score: 15.0 },
        Band { lo_pct: 0.7, hi_pct: 0.9, lo_score: 11.0, hi_score: 12.0 },
        Band { lo_pct: 0.3, hi_pct: 0.7, lo_score: 9.0, hi_score: 10.0 },
        Band { lo_pct: 0.1, hi_pct: 0.3, lo_score: 6.0, hi_score: 8.0 },
        Band { lo_pct: 0.0, hi_pct: 0.1, lo_score: 0.0, hi_score: 5.0 },
    ],
};

/// Scale fitness: smaller deviation from [`IDEAL_SCALE`] is better.
/// This dimension genuinely has three bands, not five.
pub(crate) const SCALE: Dimension = Dimension {
    cap: 15.0,
    neutral: 8.0,
    bands: &[
        Band { lo_pct: 0.7, hi_pct: 1.0, lo_score: 12.0, hi_score: 15.0 },
        Band { lo_pct: 0.3, hi_pct: 0.7, lo_score: 9.0, hi_score: 11.0 },
        Band { lo_pct: 0.0, hi_pct: 0.3, lo_score: 0.0, hi_score: 8.0 },
    ],
};

/// Short-term performance: higher year-to-date return is better.
pub(crate) const SHORT_TERM: Dimension = Dimension {
    cap: 20.0,
    neutral: 10.0,
    bands: &[
        Band { lo_pct: 0.9, hi_pct: 1.0, lo_score: 18.0, hi_score: 20.0 },
        Band { lo_pct: 0.7, hi_pct: 0.9, lo_score: 15.0, hi_score: 17.0 },
        Band { lo_pct: 0.3, hi_pct: 0.7, lo_score: 12.0, hi_score: 14.0 },
        Band { lo_pct: 0.1, hi_pct: 0.3, lo_score: 8.0, hi_score: 11.0 },
        Band { lo_pct: 0.0, hi_pct: 0.1, lo_score: 0.0, hi_score: 7.0 },
    ],
};

/// Long-term performance: higher annualized five-year return is better.
pub(crate) const LONG_TERM: Dimension = Dimension {
    cap: 25.0,
    neutral: 12.0,
    bands: &[
        Band { lo_pct: 0.9, hi_pct: 1.0, lo_score: 22.0, hi_score: 25.0 },
        Band { lo_pct: 0.7, hi_pct: 0.9, lo_score: 18.0, hi_score: 21.0 },
        Band { lo_pct: 0.3, hi_pct: 0.7, lo_score: 14.0, hi_score: 17.0 },
        Band { lo_pct: 0.1, hi_pct: 0.3, lo_score: 10.0, hi_score: 13.0 },
        Band { lo_pct: 0.0, hi_pct: 0.1, lo_score: 0.0, hi_score: 9.0 },
    ],
};

/// Excess-return quality: higher excess over the benchmark is better.
pub(crate) const EXCESS: Dimension = Dimension {
    cap: 10.0,
    neutral: 5.0,
    bands: &[
        Band { lo_pct: 0.9, hi_pct: 1.0, lo_score: 9.0, hi_score: 10.0 },
        Band { lo_pct: 0.7, hi_pct: 0.9, lo_score: 7.0, hi_score: 8.0 },
        Band { lo_pct: 0.3, hi_pct: 0.7, lo_score: 5.0, hi_score: 6.0 },
        Band { lo_pct: 0.1, hi_pct: 0.3, lo_score: 2.0, hi_score: 4.0 },
        Band { lo_pct: 0.0, hi_pct: 0.1, lo_score: 0.0, hi_score: 1.0 },
    ],
};

/// Stability: older funds are better.
pub(crate) const STABILITY: Dimension = Dimension {
    cap: 15.0,
    neutral: 8.0,
    bands: &[
        Band { lo_pct: 0.9, hi_pct: 1.0, lo_score: 12.0, hi_score: 15.0 },
        Band { lo_pct: 0.7, hi_pct: 0.9, lo_score: 10.0, hi_score: 11.0 },
        Band { lo_pct: 0.3, hi_pct: 0.7, lo_score: 8.0, hi_score: 9.0 },
        Band { lo_pct: 0.1, hi_pct: 0.3, lo_score: 5.0, hi_score: 7.0 },
        Band { lo_pct: 0.0, hi_pct: 0.1, lo_score: 0.0, hi_score: 4.0 },
    ],
};

/// Map a percentile into its band and interpolate, clamped to `[0, cap]`.
///
/// Bands are ordered highest-percentile first and the bottom band starts at
/// 0.0, so every percentile in [0, 1] matches exactly one band.
pub(crate) fn score_percentile(dimension: &Dimension, percentile: f64) -> f64 {
    for band in dimension.bands {
        if percentile >= band.lo_pct {
            let span = band.hi_pct - band.lo_pct;
            let t = if span > 0.0 {
                (percentile - band.lo_pct) / span
            } else {
                0.0
            };
            let score = band.lo_score + t * (band.hi_score - band.lo_score);
            return score.clamp(0.0, dimension.cap);
        }
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_of_top_band_hits_cap() {
        assert_eq!(score_percentile(&FEE, 1.0), 15.0);
        assert_eq!(score_percentile(&SCALE, 1.0), 15.0);
        assert_eq!(score_percentile(&SHORT_TERM, 1.0), 20.0);
        assert_eq!(score_percentile(&LONG_TERM, 1.0), 25.0);
        assert_eq!(score_percentile(&EXCESS, 1.0), 10.0);
        assert_eq!(score_percentile(&STABILITY, 1.0), 15.0);
    }

    #[test]
    fn test_bottom_percentile_scores_zero() {
        assert_eq!(score_percentile(&FEE, 0.0), 0.0);
        assert_eq!(score_percentile(&SHORT_TERM, 0.0), 0.0);
        assert_eq!(score_percentile(&STABILITY, 0.0), 0.0);
    }

    #[test]
    fn test_interpolation_within_band() {
        // Fee mid band: percentile 0.5 sits at (0.5-0.3)/0.4 of [9, 10].
        assert!((score_percentile(&FEE, 0.5) - 9.5).abs() < 1e-12);
        // Fee top band edge.
        assert_eq!(score_percentile(&FEE, 0.9), 13.0);
        // Fee bottom band midpoint: (0.05/0.1) of [0, 5].
        assert!((score_percentile(&FEE, 0.05) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_scale_table_has_three_bands() {
        assert_eq!(SCALE.bands.len(), 3);
        assert!((score_percentile(&SCALE, 0.85) - 13.5).abs() < 1e-12);
        assert!((score_percentile(&SCALE, 0.15) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_scores_monotonic_in_percentile() {
        for dimension in [&FEE, &SCALE, &SHORT_TERM, &LONG_TERM, &EXCESS, &STABILITY] {
            let mut last = -1.0;
            for step in 0..=100 {
                let score = score_percentile(dimension, step as f64 / 100.0);
                assert!(score >= last, "score regressed at percentile {}", step);
                assert!(score >= 0.0 && score <= dimension.cap);
                last = score;
            }
        }
    }

    #[test]
    fn test_neutral_defaults_are_mid_range() {
        for dimension in [&FEE, &SCALE, &SHORT_TERM, &LONG_TERM, &EXCESS, &STABILITY] {
            assert!(dimension.neutral > 0.0);
            assert!(dimension.neutral < dimension.cap);
        }
    }
}
