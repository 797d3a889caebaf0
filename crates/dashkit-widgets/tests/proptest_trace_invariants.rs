//! Property-based invariant tests for the line chart mouse trace.
//!
//! 1. Index mapping is monotonic: a pixel further right never maps to a
//!    smaller index.
//! 2. Index mapping clamps: a raw index below zero always becomes 0.
//! 3. Moving the pointer right over a drawn chart never lowers the traced
//!    index.
//! 4. Leaving and re-entering the graph leaves no stale state: the trace
//!    equals that of a chart that only saw the final position.
//! 5. Drawing into a canvas below the minimum size reports a resize and
//!    draws nothing.

use dashkit_core::event::{MouseButton, MouseEvent, MouseEventKind};
use dashkit_render::canvas::Canvas;
use dashkit_widgets::linechart::axes::XScale;
use dashkit_widgets::linechart::trace::value_to_index;
use dashkit_widgets::{DrawStatus, LineChart, LineChartOptions, SeriesOptions};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn series_values() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1000.0f64..1000.0, 1..120)
}

fn chart_with(series: &[Vec<f64>]) -> LineChart {
    let chart = LineChart::new(LineChartOptions::default());
    for (i, values) in series.iter().enumerate() {
        chart
            .series(format!("s{i}"), values.clone(), SeriesOptions::default())
            .unwrap();
    }
    chart
}

fn drawn(chart: &LineChart, w: u16, h: u16) -> bool {
    let mut canvas = Canvas::new(w, h).unwrap();
    chart.draw(&mut canvas).unwrap() == DrawStatus::Drawn
}

fn press(x: u16, y: u16) -> MouseEvent {
    MouseEvent::new(MouseEventKind::Down(MouseButton::Left), x, y)
}

fn moved(x: u16, y: u16) -> MouseEvent {
    MouseEvent::new(MouseEventKind::Moved, x, y)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Pure index mapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn index_is_monotonic_in_pixel(
        min in 0u32..1000,
        span in 0u32..1000,
        cells in 1u16..200,
        a in any::<u32>(),
        b in any::<u32>(),
    ) {
        let scale = XScale::new(f64::from(min), f64::from(min + span), cells).unwrap();
        let (p1, p2) = {
            let (a, b) = (a % scale.pixels(), b % scale.pixels());
            (a.min(b) as i32, a.max(b) as i32)
        };
        let i1 = value_to_index(scale.pixel_to_value(p1).unwrap(), scale.min());
        let i2 = value_to_index(scale.pixel_to_value(p2).unwrap(), scale.min());
        prop_assert!(i1 <= i2, "pixel {p1} -> {i1}, pixel {p2} -> {i2}");
    }

    #[test]
    fn negative_raw_index_clamps_to_zero(
        value in -1.0e6f64..1.0e6,
        min in -1.0e6f64..1.0e6,
    ) {
        let raw = (value * 2.0).round() as i64 - min.round() as i64;
        let idx = value_to_index(value, min);
        if raw < 0 {
            prop_assert_eq!(idx, 0);
        } else {
            prop_assert_eq!(idx as i64, raw);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Trace over a drawn chart
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn moving_right_never_lowers_index(
        series in proptest::collection::vec(series_values(), 1..4),
        w in 12u16..80,
        h in 5u16..30,
        x1 in 0u16..80,
        x2 in 0u16..80,
        y in 0u16..30,
    ) {
        let chart = chart_with(&series);
        prop_assert!(drawn(&chart, w, h));
        let (lo, hi) = (x1.min(x2) % w, x1.max(x2) % w);
        let (lo, hi) = (lo.min(hi), lo.max(hi));
        let y = y % (h - 2);

        chart.mouse(&press(lo, y)).unwrap();
        if chart.trace().is_empty() {
            return Ok(());
        }
        let left = chart.mouse_index();
        chart.mouse(&press(hi, y)).unwrap();
        if chart.trace().is_empty() {
            return Ok(());
        }
        let right = chart.mouse_index();

        prop_assert!(left.is_some() && right.is_some());
        prop_assert!(left <= right, "{left:?} then {right:?}");
    }

    #[test]
    fn leave_and_reenter_has_no_stale_state(
        series in proptest::collection::vec(series_values(), 1..4),
        w in 12u16..80,
        h in 5u16..30,
        first in (0u16..80, 0u16..30),
        last in (0u16..80, 0u16..30),
    ) {
        let seen = chart_with(&series);
        let fresh = chart_with(&series);
        prop_assert!(drawn(&seen, w, h) && drawn(&fresh, w, h));

        seen.mouse(&moved(first.0, first.1)).unwrap();
        // Below the X axis is always outside the graph.
        seen.mouse(&moved(0, h - 1)).unwrap();
        prop_assert!(seen.trace().is_empty());

        seen.mouse(&moved(last.0, last.1)).unwrap();
        fresh.mouse(&moved(last.0, last.1)).unwrap();
        prop_assert_eq!(seen.trace(), fresh.trace());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Resize signal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn small_canvas_reports_resize_and_stays_blank(
        series in proptest::collection::vec(series_values(), 0..4),
        w in 1u16..12,
        h in 1u16..6,
    ) {
        let chart = chart_with(&series);
        let (min_w, min_h) = chart.min_size();
        let mut canvas = Canvas::new(w, h).unwrap();
        let status = chart.draw(&mut canvas).unwrap();
        if w < min_w || h < min_h {
            prop_assert_eq!(
                status,
                DrawStatus::ResizeNeeded { width: min_w, height: min_h }
            );
            prop_assert!(canvas.is_blank());
        } else {
            prop_assert_eq!(status, DrawStatus::Drawn);
        }
    }
}
