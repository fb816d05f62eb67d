//! Correlation between ward-level protest intensity and socioeconomic
//! metrics.
//!
//! Samples wards with boundary geometry in provider order, measures protest
//! intensity at each ward centroid, and computes a Pearson coefficient with
//! a two-tailed p-value from the t-distribution. Degenerate samples (fewer
//! than two pairs, zero variance) report r = 0, p = 1 rather than failing.

use protest_map_analytics_models::{CorrelationPoint, CorrelationSummary};
use protest_map_geography_models::{SocioeconomicMetric, Ward};
use protest_map_protest_models::ProtestEvent;
use protest_map_spatial::protest_intensity;

/// Sampling knobs for the correlation analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationOptions {
    /// Maximum number of wards sampled, in provider order.
    pub ward_sample_cap: usize,
    /// Intensity radius around each ward centroid, kilometers.
    pub radius_km: f64,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            ward_sample_cap: 30,
            radius_km: 5.0,
        }
    }
}

/// Correlates per-ward protest intensity with the requested metric.
///
/// Wards without boundary geometry, or without a value for the metric, are
/// skipped; they never abort the analysis.
#[must_use]
pub fn correlate(
    wards: &[Ward],
    protests: &[ProtestEvent],
    metric: SocioeconomicMetric,
    options: &CorrelationOptions,
) -> CorrelationSummary {
    let mut data = Vec::new();

    for ward in wards
        .iter()
        .filter(|w| w.boundary.is_some())
        .take(options.ward_sample_cap)
    {
        let Some(centroid) = ward.centroid() else {
            continue;
        };
        let intensity = protest_intensity(centroid, protests, options.radius_km);

        let Some(value) = ward.metric_value(metric) else {
            continue;
        };

        data.push(CorrelationPoint {
            protest_intensity: intensity,
            socioeconomic_value: value,
            ward: ward.full_location(),
            ward_id: ward.id,
            risk_assessment: ward.risk_assessment().to_string(),
        });
    }

    #[allow(clippy::cast_precision_loss)]
    let pairs: Vec<(f64, f64)> = data
        .iter()
        .map(|point| (point.protest_intensity as f64, point.socioeconomic_value))
        .collect();
    let (correlation, p_value) = pearson_with_significance(&pairs);

    CorrelationSummary {
        correlation,
        p_value,
        sample_size: data.len(),
        data,
    }
}

/// Pearson correlation coefficient and two-tailed p-value over paired
/// samples.
///
/// Fewer than two pairs or zero variance in either variable yields
/// `(0.0, 1.0)`. Non-finite intermediate results are coerced the same way.
#[must_use]
pub fn pearson_with_significance(pairs: &[(f64, f64)]) -> (f64, f64) {
    let n = pairs.len();
    if n < 2 {
        return (0.0, 1.0);
    }

    #[allow(clippy::cast_precision_loss)]
    let count = n as f64;
    let mean_x: f64 = pairs.iter().map(|(x, _)| x).sum::<f64>() / count;
    let mean_y: f64 = pairs.iter().map(|(_, y)| y).sum::<f64>() / count;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x < 1e-10 || variance_y < 1e-10 {
        return (0.0, 1.0);
    }

    let r = covariance / (variance_x.sqrt() * variance_y.sqrt());
    if !r.is_finite() {
        return (0.0, 1.0);
    }
    let r = r.clamp(-1.0, 1.0);

    let p = two_tailed_p_value(r, n);
    if p.is_finite() {
        (r, p.clamp(0.0, 1.0))
    } else {
        (r, 1.0)
    }
}

/// Two-tailed p-value for a Pearson coefficient under the null hypothesis
/// of no correlation, from the t-distribution with `n - 2` degrees of
/// freedom.
fn two_tailed_p_value(r: f64, n: usize) -> f64 {
    if n < 3 {
        // One degree of freedom short of a t statistic.
        return 1.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let df = (n - 2) as f64;

    let denominator = 1.0 - r * r;
    if denominator <= f64::EPSILON {
        // Perfectly linear sample.
        return 0.0;
    }

    let t = r * (df / denominator).sqrt();
    // P(|T| >= |t|) = I_x(df/2, 1/2) with x = df / (df + t^2).
    incomplete_beta(df / 2.0, 0.5, df / (df + t * t))
}

/// Regularized incomplete beta function `I_x(a, b)`.
fn incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let bt = (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b)
        + a * x.ln()
        + b * (1.0 - x).ln())
    .exp();

    // Continued fraction converges fastest below the distribution mean;
    // use the symmetry relation on the other side.
    if x < (a + 1.0) / (a + b + 2.0) {
        bt * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - bt * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Continued fraction expansion for the incomplete beta function.
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITERATIONS: usize = 200;
    const EPSILON: f64 = 1e-12;
    const TINY: f64 = 1e-30;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < TINY {
        d = TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITERATIONS {
        #[allow(clippy::cast_precision_loss)]
        let m = m as f64;
        let m2 = 2.0 * m;

        // Even step.
        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        h *= d * c;

        // Odd step.
        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < TINY {
            d = TINY;
        }
        c = 1.0 + aa / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }

    h
}

/// Natural log of the gamma function, Lanczos approximation.
fn ln_gamma(x: f64) -> f64 {
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_59,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_571_6e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula.
        let pi = std::f64::consts::PI;
        return pi.ln() - (pi * x).sin().abs().ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let t = x + 7.5;
    let mut sum = COEFFICIENTS[0];
    for (i, coefficient) in COEFFICIENTS.iter().enumerate().skip(1) {
        #[allow(clippy::cast_precision_loss)]
        let denominator = x + i as f64;
        sum += coefficient / denominator;
    }

    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}
