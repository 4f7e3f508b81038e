//! Derived efficiency metrics
//!
//! Every function is total: zero denominators yield 0.0 (or `None` for
//! `delta`), never NaN or infinity.

/// 0.0 unless the value is finite; a quotient of extreme magnitudes can
/// overflow even past the zero-denominator guard
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Cost per lead.
///
/// # Examples
/// ```
/// use creatrack::services::metrics::cpl;
///
/// assert_eq!(cpl(150.0, 4.0), 37.5);
/// assert_eq!(cpl(150.0, 0.0), 0.0);
/// ```
pub fn cpl(spend: f64, leads: f64) -> f64 {
    if leads > 0.0 {
        finite_or_zero(spend / leads)
    } else {
        0.0
    }
}

/// Cost per click
pub fn cpc(spend: f64, clicks: f64) -> f64 {
    if clicks > 0.0 {
        finite_or_zero(spend / clicks)
    } else {
        0.0
    }
}

/// Click-through rate, in percent
pub fn ctr(clicks: f64, impressions: f64) -> f64 {
    if impressions > 0.0 {
        finite_or_zero(clicks / impressions * 100.0)
    } else {
        0.0
    }
}

/// Conversion rate (leads per click), in percent
pub fn cvr(leads: f64, clicks: f64) -> f64 {
    if clicks > 0.0 {
        finite_or_zero(leads / clicks * 100.0)
    } else {
        0.0
    }
}

/// Period-over-period change in percent.
///
/// `None` when `previous` is not strictly positive, or when the change
/// overflows; callers suppress the delta display in either case.
pub fn delta(current: f64, previous: f64) -> Option<f64> {
    if previous > 0.0 {
        Some((current - previous) / previous * 100.0).filter(|v| v.is_finite())
    } else {
        None
    }
}

/// Reconstruct a lead count from cost and a published per-lead cost.
///
/// The export carries no raw counts; dividing cost by an independently
/// rounded ratio compounds rounding error, so treat the result as an
/// approximation, not ground truth.
pub fn derived_leads(cost: f64, cost_per_lead: f64) -> f64 {
    if cost_per_lead > 0.0 {
        finite_or_zero(cost / cost_per_lead)
    } else {
        0.0
    }
}

/// Reconstruct a click count from cost and a published per-click cost
pub fn derived_clicks(cost: f64, cost_per_click: f64) -> f64 {
    if cost_per_click > 0.0 {
        finite_or_zero(cost / cost_per_click)
    } else {
        0.0
    }
}
