//! Display-ready view of a [`DescriptiveRecord`].
//!
//! Missing values render as [`MetricValue::Unavailable`], never as zero.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::identifier::AccountIdentifier;
use crate::models::{DescriptiveRecord, HolderShare};

/// Text shown for a metric no provider supplied.
pub const UNAVAILABLE: &str = "Unavailable";

/// Characters kept on each side of a shortened address.
const SHORT_ADDRESS_SIDE: usize = 6;
/// Characters kept on each side of a holder label.
const HOLDER_LABEL_SIDE: usize = 4;
/// Fraction digits kept when grouping amounts.
const AMOUNT_FRACTION_DIGITS: u32 = 3;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "text")]
pub enum MetricValue {
    Available(String),
    Unavailable,
}

impl MetricValue {
    fn from_option<T>(value: Option<T>, format: impl FnOnce(T) -> String) -> Self {
        value.map_or(Self::Unavailable, |v| Self::Available(format(v)))
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(text) => f.write_str(text),
            Self::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: MetricValue,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderRow {
    /// Shortened label, e.g. `DezX...B263: 12.34%`
    pub label: String,
    /// Full address with share, for tooltips
    pub detail: String,
    pub share_percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub heading: &'static str,
    pub title: String,
    /// Token ticker; accounts have none
    pub symbol: Option<String>,
    pub short_address: String,
    /// Token metric cards; empty for accounts
    pub cards: Vec<MetricCard>,
    pub holders: Vec<HolderRow>,
    /// Holders are placeholders, not chain data
    pub synthetic: bool,
}

impl RecordView {
    pub fn new(record: &DescriptiveRecord) -> Self {
        let holders = record
            .top_holders
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|holder| HolderRow {
                label: holder_label(holder),
                detail: format!("{}: {:.2}%", holder.holder_address, holder.share_percentage),
                share_percentage: holder.share_percentage,
            })
            .collect();

        if !record.is_token() {
            return Self {
                heading: "Wallet Overview",
                title: "Wallet Address".to_string(),
                symbol: None,
                short_address: short_address(&record.address),
                cards: Vec::new(),
                holders,
                synthetic: record.synthetic,
            };
        }

        let metrics = &record.metrics;
        let cards = vec![
            MetricCard {
                title: "Total Supply",
                value: MetricValue::from_option(metrics.total_supply, format_amount),
            },
            MetricCard {
                title: "Decimals",
                value: MetricValue::from_option(metrics.decimal_places, |d| d.to_string()),
            },
            MetricCard {
                title: "Holders",
                value: MetricValue::from_option(metrics.holder_count, |n| {
                    group_thousands(&n.to_string())
                }),
            },
            MetricCard {
                title: "Price",
                value: MetricValue::from_option(metrics.unit_price, format_price),
            },
            MetricCard {
                title: "Market Cap",
                value: MetricValue::from_option(metrics.market_capitalization, |v| {
                    format!("${}", format_amount(v))
                }),
            },
            MetricCard {
                title: "24h Volume",
                value: MetricValue::from_option(metrics.rolling_volume, |v| {
                    format!("${}", format_amount(v))
                }),
            },
        ];

        Self {
            heading: "Token Information",
            title: metrics
                .display_name
                .clone()
                .unwrap_or_else(|| "Unknown Token".to_string()),
            symbol: metrics.symbol.clone(),
            short_address: short_address(&record.address),
            cards,
            holders,
            synthetic: record.synthetic,
        }
    }

    pub fn card(&self, title: &str) -> Option<&MetricValue> {
        self.cards.iter().find(|c| c.title == title).map(|c| &c.value)
    }
}

impl From<&DescriptiveRecord> for RecordView {
    fn from(record: &DescriptiveRecord) -> Self {
        Self::new(record)
    }
}

/// USD price: 8 decimals below one cent, 4 otherwise.
pub fn format_price(price: Decimal) -> String {
    if price < Decimal::new(1, 2) {
        format!("${:.8}", price)
    } else {
        format!("${:.4}", price)
    }
}

/// Amount with thousands separators and at most three fraction digits.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp(AMOUNT_FRACTION_DIGITS).normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = rounded.abs().to_string();

    match text.split_once('.') {
        Some((whole, fraction)) => format!("{}{}.{}", sign, group_thousands(whole), fraction),
        None => format!("{}{}", sign, group_thousands(&text)),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `first6...last6` form of an address.
pub fn short_address(address: &AccountIdentifier) -> String {
    format!(
        "{}...{}",
        address.prefix(SHORT_ADDRESS_SIDE),
        address.suffix(SHORT_ADDRESS_SIDE)
    )
}

/// `first4...last4: 12.34%` label of a holder.
pub fn holder_label(holder: &HolderShare) -> String {
    format!(
        "{}: {:.2}%",
        elide(&holder.holder_address, HOLDER_LABEL_SIDE),
        holder.share_percentage
    )
}

fn elide(text: &str, side: usize) -> String {
    let count = text.chars().count();
    if count <= side * 2 {
        return text.to_string();
    }
    let head: String = text.chars().take(side).collect();
    let tail: String = text.chars().skip(count - side).collect();
    format!("{}...{}", head, tail)
}
