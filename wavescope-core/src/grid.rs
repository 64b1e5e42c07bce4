// ── Time grid ─────────────────────────────────────────────────────────────

/// Ruler spacing in samples, coarsest first. Indexed by grid level.
pub const GRID_SIZES: [u32; 7] = [10000, 2048, 512, 256, 128, 64, 32];

/// Grid level for a pixel density: `round(20 · log10(pps + 1))`, clamped to
/// the last entry of [`GRID_SIZES`].
pub fn grid_level(pixel_per_sample: f64) -> usize {
    if pixel_per_sample.is_nan() || pixel_per_sample <= 0.0 {
        return 0;
    }
    let level = (20.0 * (pixel_per_sample + 1.0).log10()).round();
    level.clamp(0.0, (GRID_SIZES.len() - 1) as f64) as usize
}

/// Ruler spacing in samples for a pixel density.
pub fn grid_size(pixel_per_sample: f64) -> u32 {
    GRID_SIZES[grid_level(pixel_per_sample)]
}

/// First grid multiple strictly after `start`.
pub fn first_grid_after(start: usize, grid: u32) -> usize {
    let grid = grid.max(1) as usize;
    start + grid - start % grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_from_known_densities() {
        // 800 px over 10000 samples
        assert_eq!(grid_level(0.08), 1);
        assert_eq!(grid_size(0.08), 2048);
        // 900 px over 44100 samples
        assert_eq!(grid_level(900.0 / 44100.0), 0);
        assert_eq!(grid_size(900.0 / 44100.0), 10000);
    }

    #[test]
    fn test_grid_is_monotonic() {
        let densities = [0.01, 0.5, 2.0, 50.0];
        let sizes: Vec<u32> = densities.iter().map(|&p| grid_size(p)).collect();
        assert!(
            sizes.windows(2).all(|w| w[0] >= w[1]),
            "grid sizes not non-increasing: {sizes:?}"
        );

        let mut prev = u32::MAX;
        let mut pps = 0.0001;
        while pps < 1000.0 {
            let size = grid_size(pps);
            assert!(size <= prev, "grid grew at pps={pps}");
            prev = size;
            pps *= 1.1;
        }
    }

    #[test]
    fn test_edges_clamp_to_table() {
        assert_eq!(grid_size(0.0), 10000);
        assert_eq!(grid_size(-3.0), 10000);
        assert_eq!(grid_size(f64::NAN), 10000);
        assert_eq!(grid_size(1.0e9), 32);
        assert_eq!(grid_size(f64::INFINITY), 32);
    }

    #[test]
    fn test_first_grid_after() {
        assert_eq!(first_grid_after(0, 10000), 10000);
        assert_eq!(first_grid_after(100, 2048), 2048);
        assert_eq!(first_grid_after(2048, 2048), 4096);
        assert_eq!(first_grid_after(2049, 2048), 4096);
    }
}
