//! Prose summaries of inventory health from an external text generator.
//!
//! The store never depends on this module; generators only ever see a cloned
//! snapshot of the records.

use std::future::Future;

use thiserror::Error;

use crate::item::InventoryRecord;

/// HTTP generator backed by the Gemini `generateContent` endpoint.
pub mod gemini;

/// Insight generation failure. Never affects store state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsightError {
    /// Missing or unusable credential/settings; raised before any request.
    #[error("insight generator is not configured: {0}")]
    Configuration(String),
    /// Transport, upstream or response-shape failure.
    #[error("failed to generate insights: {0}")]
    Generation(String),
}

/// Something that can turn a record snapshot into prose.
pub trait InsightGenerator: Send + Sync + 'static {
    /// Summarizes `records`, which are in canonical store order.
    fn summarize(
        &self,
        records: Vec<InventoryRecord>,
    ) -> impl Future<Output = Result<String, InsightError>> + Send;
}

/// One `category; name; price; quantity; totalValue` line per record.
pub fn summary_lines(records: &[InventoryRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "{}; {}; {}; {}; {}",
                r.category(),
                r.name(),
                r.price().normalize(),
                r.quantity(),
                r.total_value().normalize()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full analyst prompt for `business` over `records`.
pub fn build_prompt(business: &str, records: &[InventoryRecord]) -> String {
    format!(
        "You are an expert inventory analyst for {business}, a fashion boutique.
Analyze the following inventory data and provide actionable business insights.

The data is in a simplified format: \"Category; Name; Price; Quantity; Total Value\".

Here is the data:
{data}

Based on this data, please provide:
1.  **Top 3 Highest Value Categories:** Which categories contribute most to the total inventory value?
2.  **Urgent Re-stock List:** Identify the top 5-7 items with \"Low Stock\" status, especially those with higher prices, that should be re-ordered immediately.
3.  **Potential Overstock Items:** Are there any items with very high quantity that might be considered overstocked?
4.  **Sales & Promotion Suggestions:** Based on the stock levels, suggest 1-2 items or categories that would be good candidates for a sales promotion to clear stock.
5.  **Overall Summary:** A brief, 2-3 sentence summary of the inventory's current health.

Present your response in clean, easy-to-read markdown format. Use headings, bullet points, and bold text to highlight key information.
",
        data = summary_lines(records)
    )
}
