//! Present-value helpers for the DCF pipeline
//!
//! Annual compounding only; `years` is the integer exponent.

/// Discount factor `1 / (1 + rate)^years`
pub fn discount_factor(annual_rate: f64, years: u32) -> f64 {
    1.0 / (1.0 + annual_rate).powi(years as i32)
}

/// Present value of `amount` received `years` from now
pub fn present_value(amount: f64, annual_rate: f64, years: u32) -> f64 {
    amount / (1.0 + annual_rate).powi(years as i32)
}

/// Gordon-growth perpetuity value of the cash flow one year past `final_cf`
///
/// `(final_cf * (1 + g)) / (r - g)`. No guard: equal rates give a
/// non-finite result, callers decide whether to allow that.
pub fn gordon_growth_value(final_cf: f64, growth_rate: f64, discount_rate: f64) -> f64 {
    (final_cf * (1.0 + growth_rate)) / (discount_rate - growth_rate)
}
