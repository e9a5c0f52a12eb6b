/// Step multipliers tried for each power of ten, smallest first.
const NICE_STEPS: &[f64] = &[1.0, 2.0, 2.5, 5.0, 10.0];

/// Pick a "nice" tick step so that `[lo, hi]` holds at most `max_ticks`
/// intervals.
pub fn nice_step(lo: f64, hi: f64, max_ticks: usize) -> f64 {
    // Halved so that ranges wider than f64::MAX stay finite.
    let half_span = hi / 2.0 - lo / 2.0;
    if half_span <= 0.0 || !half_span.is_finite() {
        return 1.0;
    }
    let raw = half_span / max_ticks.max(1) as f64 * 2.0;
    if !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10.0_f64.powf(raw.log10().floor());
    for &mult in NICE_STEPS {
        let step = mult * magnitude;
        if step >= raw {
            return step;
        }
    }
    10.0 * magnitude
}

/// Tick positions inside `[lo, hi]`, aligned to multiples of the nice step.
///
/// Empty when the bounds are not finite or no sensible step fits.
pub fn nice_ticks(lo: f64, hi: f64, max_ticks: usize) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() || hi < lo {
        return Vec::new();
    }
    let step = nice_step(lo, hi, max_ticks);
    let first = (lo / step).ceil();
    let last = (hi / step).floor();
    let limit = (max_ticks.max(1) * 2) as f64;
    if !first.is_finite() || !last.is_finite() || last - first > limit {
        return Vec::new();
    }
    let count = (last - first).max(-1.0) + 1.0;
    (0..count as usize)
        .map(|k| (first + k as f64) * step)
        .filter(|t| t.is_finite())
        // -0.0 prints as "-0"
        .map(|t| if t == 0.0 { 0.0 } else { t })
        .collect()
}

/// Format a tick value with just enough decimals for the step.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step <= 0.0 || !step.is_finite() {
        0
    } else {
        let mut d = (-step.log10().floor()).max(0.0) as usize;
        // 2.5, 0.25 ... need one more digit than their magnitude suggests
        let scaled = step * 10f64.powi(d as i32);
        if (scaled - scaled.round()).abs() > 1e-9 {
            d += 1;
        }
        d
    };
    format!("{value:.decimals$}")
}
