use std::ops::Range;

use crate::viewport::Viewport;

/// At or below this density several samples share a pixel column and the
/// trace is a min/max envelope.
pub const ENVELOPE_MAX_PIXEL_PER_SAMPLE: f64 = 1.0;

/// Above this density each representative sample gets a marker.
pub const MARKER_MIN_PIXEL_PER_SAMPLE: f64 = 1.25;

/// One envelope bar: the peaks of `samples`, drawn at `x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub x: f64,
    /// Highest sample in the span, never below 0.
    pub positive: f32,
    /// Lowest sample in the span, never above 0.
    pub negative: f32,
    pub samples: Range<usize>,
}

/// Representative sample of a span when zoomed in.
#[derive(Clone, Debug, PartialEq)]
pub struct TracePoint {
    pub x: f64,
    pub amplitude: f32,
    pub index: usize,
}

/// Surface-independent drawing plan for one channel.
#[derive(Clone, Debug, PartialEq)]
pub enum Trace {
    Envelope(Vec<Column>),
    Line { points: Vec<TracePoint>, markers: bool },
}

/// Reduce the visible part of one channel to at most about one primitive per
/// pixel column. Work is linear in the number of visible samples.
pub fn reduce_channel(data: &[f32], viewport: Viewport, pixel_per_sample: f64) -> Trace {
    let end = viewport.end.min(data.len());
    let start = viewport.start.min(end);
    let visible = &data[start..end];

    if pixel_per_sample <= ENVELOPE_MAX_PIXEL_PER_SAMPLE {
        Trace::Envelope(envelope(visible, start, pixel_per_sample))
    } else {
        Trace::Line {
            points: representatives(visible, start, pixel_per_sample),
            markers: pixel_per_sample > MARKER_MIN_PIXEL_PER_SAMPLE,
        }
    }
}

/// Sub-sampling: running peak and trough since the last emitted column.
fn envelope(visible: &[f32], offset: usize, pps: f64) -> Vec<Column> {
    let mut columns = Vec::with_capacity((visible.len() as f64 * pps) as usize + 2);
    let mut positive = 0.0f32;
    let mut negative = 0.0f32;
    let mut last_x = -1.0;
    let mut span_start = 0;

    for (i, &sample) in visible.iter().enumerate() {
        positive = positive.max(sample);
        negative = negative.min(sample);

        // Absolute position, not an accumulated one, so long windows don't drift.
        let x = i as f64 * pps;
        if x - last_x >= 1.0 {
            columns.push(Column {
                x,
                positive,
                negative,
                samples: offset + span_start..offset + i + 1,
            });
            positive = 0.0;
            negative = 0.0;
            last_x = x;
            span_start = i + 1;
        }
    }

    // Trailing samples that never reached the next pixel boundary.
    if span_start < visible.len() {
        columns.push(Column {
            x: (visible.len() - 1) as f64 * pps,
            positive,
            negative,
            samples: offset + span_start..offset + visible.len(),
        });
    }

    columns
}

/// Super-sampling: the largest-magnitude sample of each span, to be joined
/// by straight segments.
fn representatives(visible: &[f32], offset: usize, pps: f64) -> Vec<TracePoint> {
    let mut points = Vec::with_capacity(visible.len());
    let mut peak: Option<(f32, usize)> = None;
    let mut last_x = -1.0;

    for (i, &sample) in visible.iter().enumerate() {
        let magnitude = sample.abs();
        if peak.map_or(true, |(best, _)| magnitude > best) {
            peak = Some((magnitude, i));
        }

        let x = i as f64 * pps;
        if x - last_x >= 1.0 {
            if let Some((_, index)) = peak.take() {
                points.push(TracePoint {
                    x,
                    amplitude: visible[index],
                    index: offset + index,
                });
            }
            last_x = x;
        }
    }

    if let Some((_, index)) = peak {
        points.push(TracePoint {
            x: (visible.len() - 1) as f64 * pps,
            amplitude: visible[index],
            index: offset + index,
        });
    }

    points
}

/// Vertical pixel offset of an amplitude inside a channel band: 1.0 is the
/// top edge, 0.0 the centre line and -1.0 the bottom edge.
pub fn amplitude_to_y(amplitude: f32, channel_height: f64) -> f64 {
    (1.0 - amplitude as f64) * (channel_height / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn noise(len: usize, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(-1.0f32..1.0)).collect()
    }

    #[test]
    fn test_envelope_covers_every_sample_once() {
        let data = noise(100_000, 7);
        let vp = Viewport { start: 1234, end: 98_765 };
        let pps = 800.0 / vp.len() as f64;

        let Trace::Envelope(columns) = reduce_channel(&data, vp, pps) else {
            panic!("expected envelope at pps={pps}");
        };

        assert!(columns.len() <= 800 + 2, "{} columns", columns.len());
        assert_eq!(columns.first().unwrap().samples.start, vp.start);
        assert_eq!(columns.last().unwrap().samples.end, vp.end);
        for pair in columns.windows(2) {
            assert_eq!(pair[0].samples.end, pair[1].samples.start);
            assert!(pair[0].x < pair[1].x);
        }

        for col in &columns {
            let span = &data[col.samples.clone()];
            let max = span.iter().copied().fold(0.0f32, f32::max);
            let min = span.iter().copied().fold(0.0f32, f32::min);
            assert_eq!(col.positive, max);
            assert_eq!(col.negative, min);
        }
    }

    #[test]
    fn test_envelope_flushes_tail() {
        // 10 samples over 2.5 px: the last samples never cross a boundary.
        let data = vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.9, -0.9];
        let vp = Viewport { start: 0, end: 10 };
        let Trace::Envelope(columns) = reduce_channel(&data, vp, 0.25) else {
            panic!("expected envelope");
        };
        let covered: usize = columns.iter().map(|c| c.samples.len()).sum();
        assert_eq!(covered, 10);
        let tail = columns.last().unwrap();
        assert_eq!(tail.samples, 9..10);
        assert_eq!(tail.positive, 0.0);
        assert_eq!(tail.negative, -0.9);
    }

    #[test]
    fn test_unit_density_is_envelope() {
        let data = noise(1000, 1);
        let vp = Viewport { start: 0, end: 1000 };
        assert!(matches!(reduce_channel(&data, vp, 1.0), Trace::Envelope(_)));
    }

    #[test]
    fn test_zoomed_in_connects_samples() {
        let data: Vec<f32> = (0..512).map(|i| (i as f32 * 0.1).sin()).collect();
        let vp = Viewport { start: 100, end: 300 };
        let Trace::Line { points, markers } = reduce_channel(&data, vp, 4.0) else {
            panic!("expected line");
        };
        assert!(markers);
        assert_eq!(points.len(), 200);
        for (n, p) in points.iter().enumerate() {
            assert_eq!(p.index, 100 + n);
            assert_eq!(p.amplitude, data[p.index]);
            assert!((p.x - n as f64 * 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_markers_only_past_threshold() {
        let data = noise(1000, 3);
        let vp = Viewport { start: 0, end: 500 };
        let Trace::Line { markers, .. } = reduce_channel(&data, vp, 1.1) else {
            panic!("expected line");
        };
        assert!(!markers);

        let Trace::Line { markers, .. } = reduce_channel(&data, vp, MARKER_MIN_PIXEL_PER_SAMPLE)
        else {
            panic!("expected line");
        };
        assert!(!markers);

        let Trace::Line { markers, .. } = reduce_channel(&data, vp, 1.3) else {
            panic!("expected line");
        };
        assert!(markers);
    }

    #[test]
    fn test_silent_span_reports_own_sample() {
        let mut data = vec![0.0f32; 300];
        data[10] = 0.8;
        let vp = Viewport { start: 0, end: 300 };
        let Trace::Line { points, .. } = reduce_channel(&data, vp, 2.0) else {
            panic!("expected line");
        };
        assert_eq!(points[11].index, 11);
        assert_eq!(points[11].amplitude, 0.0);
    }

    #[test]
    fn test_viewport_past_data_is_clamped() {
        let data = noise(100, 5);
        let vp = Viewport { start: 50, end: 400 };
        let Trace::Envelope(columns) = reduce_channel(&data, vp, 0.5) else {
            panic!("expected envelope");
        };
        assert_eq!(columns.last().unwrap().samples.end, 100);
    }

    #[test]
    fn test_amplitude_mapping() {
        assert_eq!(amplitude_to_y(1.0, 192.0), 0.0);
        assert_eq!(amplitude_to_y(0.0, 192.0), 96.0);
        assert_eq!(amplitude_to_y(-1.0, 192.0), 192.0);
    }
}
