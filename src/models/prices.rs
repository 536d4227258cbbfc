use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

use crate::config::Config;

/// Calendar date shown on the chart axis and in the records table.
pub const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Row sent to the store when a price is recorded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewPrice {
    pub product_id: i64,
    pub supplier_id: i64,
    pub price: f64,
}

/// A stored price observation. `id` and `recorded_at` are assigned by the store.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PriceObservation {
    pub id: i64,
    pub product_id: i64,
    pub supplier_id: i64,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub recorded_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NameRef {
    pub name: String,
}

/// Observation joined with the names of its product and supplier.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PriceRecord {
    #[serde(flatten)]
    pub observation: PriceObservation,
    #[serde(default)]
    pub products: Option<NameRef>,
    #[serde(default)]
    pub suppliers: Option<NameRef>,
}

impl PriceRecord {
    pub fn product_name(&self) -> Option<&str> {
        self.products.as_ref().map(|p| p.name.as_str())
    }

    pub fn supplier_name(&self) -> Option<&str> {
        self.suppliers.as_ref().map(|s| s.name.as_str())
    }
}

/// One chart point.
#[derive(Clone, Debug, PartialEq)]
pub struct TrendPoint {
    pub display_date: String,
    pub price: f64,
    pub product: String,
    pub supplier: String,
}

/// One row of the recent-records table.
#[derive(Clone, Debug, PartialEq)]
pub struct RecentRecord {
    pub id: i64,
    pub date: String,
    pub product: String,
    pub supplier: String,
    pub price: String,
}

/// Every recorded observation, oldest first, as returned by the store.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PriceHistory {
    records: Vec<PriceRecord>,
}

impl PriceHistory {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Chart points in fetch order, dates rendered in the browser's timezone.
    pub fn time_series(&self) -> Vec<TrendPoint> {
        self.time_series_in(&Local)
    }

    pub fn time_series_in<Tz>(&self, tz: &Tz) -> Vec<TrendPoint>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.records
            .iter()
            .map(|r| TrendPoint {
                display_date: display_date(&r.observation.recorded_at, tz),
                price: r.observation.price,
                product: r.product_name().unwrap_or("Unknown Product").to_string(),
                supplier: r.supplier_name().unwrap_or("Unknown Supplier").to_string(),
            })
            .collect()
    }

    /// Axis labels and values for the line chart.
    pub fn series_data(&self) -> (Vec<String>, Vec<f64>) {
        self.time_series()
            .into_iter()
            .map(|p| (p.display_date, p.price))
            .unzip()
    }

    /// The last `RECENT_RECORDS_LIMIT` observations, newest first.
    pub fn recent_records(&self) -> Vec<RecentRecord> {
        self.recent_records_in(&Local)
    }

    pub fn recent_records_in<Tz>(&self, tz: &Tz) -> Vec<RecentRecord>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let skip = self.records.len().saturating_sub(Config::RECENT_RECORDS_LIMIT);
        self.records[skip..]
            .iter()
            .rev()
            .map(|r| RecentRecord {
                id: r.observation.id,
                date: display_date(&r.observation.recorded_at, tz),
                product: r.product_name().unwrap_or("N/A").to_string(),
                supplier: r.supplier_name().unwrap_or("N/A").to_string(),
                price: format!("{:.2}", r.observation.price),
            })
            .collect()
    }
}

fn display_date<Tz>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format(DATE_FORMAT).to_string()
}

/// Accepts RFC 3339 timestamps and offset-less ones, which are taken as UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
}

/// Numeric columns may arrive as JSON numbers or strings.
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
    }

    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid price {s:?}: {e}"))),
    }
}
