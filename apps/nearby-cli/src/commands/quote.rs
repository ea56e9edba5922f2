//! # Quote Command
//!
//! Shows the normal and VIP price for a base price, the way a booking
//! screen would.

use std::io::Write;

use nearby_core::pricing::quote_with;
use nearby_core::{try_quote, PricingQuote, PricingTier};

use crate::config::AppConfig;
use crate::error::CliResult;

/// Arguments for one quote, after CLI parsing.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub base_price: f64,
    /// Falls back to `pricing.default_vip_discount`.
    pub discount: Option<f64>,
    pub tier: PricingTier,
    /// Reject out-of-range input instead of clamping it.
    pub strict: bool,
    pub json: bool,
}

/// Computes the quote for `req` under `config`.
pub fn compute(req: &QuoteRequest, config: &AppConfig) -> CliResult<PricingQuote> {
    let discount = req.discount.unwrap_or(config.pricing.default_vip_discount);

    if req.strict {
        try_quote(req.base_price, discount)?;
    }

    Ok(quote_with(req.base_price, discount, config.pricing.rounding))
}

pub fn run(req: &QuoteRequest, config: &AppConfig, out: &mut dyn Write) -> CliResult<()> {
    let quote = compute(req, config)?;

    if req.json {
        writeln!(out, "{}", serde_json::to_string(&quote)?)?;
        return Ok(());
    }

    let symbol = config.display.currency_symbol.as_str();
    writeln!(out, "Normal:  {}", quote.normal.format_with_symbol(symbol))?;
    writeln!(out, "VIP:     {}", quote.vip.format_with_symbol(symbol))?;
    if quote.has_savings() {
        writeln!(
            out,
            "Savings: {} ({}%)",
            quote.savings.format_with_symbol(symbol),
            quote.savings_percent()
        )?;
    }
    writeln!(
        out,
        "You pay ({}): {}",
        req.tier,
        quote.price_for(req.tier).format_with_symbol(symbol)
    )?;
    Ok(())
}
