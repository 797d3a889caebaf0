#![forbid(unsafe_code)]

//! Mouse trace: the guide line and value readout under the pointer.

/// What the chart shows for the pointer position.
///
/// Written only by mouse handling; drawing reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MouseTrace {
    guide_x: Option<u16>,
    value: String,
}

impl MouseTrace {
    /// Column of the vertical guide line.
    #[inline]
    #[must_use]
    pub fn guide_x(&self) -> Option<u16> {
        self.guide_x
    }

    /// Formatted values at the pointer; empty when nothing is traced.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guide_x.is_none() && self.value.is_empty()
    }

    pub(crate) fn set(&mut self, guide_x: u16, value: String) {
        self.guide_x = Some(guide_x);
        self.value = value;
    }

    pub(crate) fn clear(&mut self) {
        self.guide_x = None;
        self.value.clear();
    }
}

/// Series index under a scale value.
///
/// Samples sit two scale ticks apart, so the value is doubled before
/// rounding and then offset by the window's minimum. This is an
/// approximation: it need not invert the pixel scale at boundary pixels.
/// Results left of the first index clamp to 0.
#[must_use]
pub fn value_to_index(value: f64, min: f64) -> usize {
    let idx = (value * 2.0).round() as i64 - min.round() as i64;
    idx.max(0) as usize
}

/// Render `"<label>:"` followed by `" <name>: <value>"` per series, sorted
/// by name, with two decimals.
#[must_use]
pub fn format_values(label: &str, mut values: Vec<(&str, f64)>) -> String {
    values.sort_by(|a, b| a.0.cmp(b.0));
    let mut out = format!("{label}:");
    for (name, value) in values {
        out.push_str(&format!(" {name}: {value:.2}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_sorted_by_name() {
        let s = format_values("", vec![("b", 4.0), ("a", 2.0)]);
        assert_eq!(s, ": a: 2.00 b: 4.00");
    }

    #[test]
    fn label_prefixes_values() {
        assert_eq!(format_values("mon", vec![("cpu", 0.456)]), "mon: cpu: 0.46");
    }

    #[test]
    fn index_doubles_then_offsets() {
        assert_eq!(value_to_index(0.0, 0.0), 0);
        assert_eq!(value_to_index(0.5, 0.0), 1);
        assert_eq!(value_to_index(0.74, 0.0), 1);
        assert_eq!(value_to_index(0.76, 0.0), 2);
        assert_eq!(value_to_index(12.0, 10.0), 14);
    }

    #[test]
    fn negative_index_clamps_to_zero() {
        assert_eq!(value_to_index(1.0, 5.0), 0);
        assert_eq!(value_to_index(-3.0, 0.0), 0);
    }

    #[test]
    fn set_and_clear() {
        let mut t = MouseTrace::default();
        assert!(t.is_empty());
        t.set(7, "x: a: 1.00".to_owned());
        assert_eq!(t.guide_x(), Some(7));
        assert_eq!(t.value(), "x: a: 1.00");
        t.clear();
        assert!(t.is_empty());
    }
}
