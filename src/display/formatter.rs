use crate::kstat::{KstatSample, MetricValue};

/// Integer with thousands separators (e.g. "8,772,612")
pub fn format_count(value: MetricValue) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Width of the identifier column for a set of samples
pub fn identifier_width(samples: &[KstatSample]) -> usize {
    samples
        .iter()
        .map(|sample| sample.identifier.as_str().len())
        .max()
        .unwrap_or(0)
}

/// One output line: identifier padded to `width`, then the raw value
pub fn format_sample(sample: &KstatSample, width: usize) -> String {
    format!("{:<width$}  {}", sample.identifier, sample.value, width = width)
}
