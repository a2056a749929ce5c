//! Canonical record types handed to downstream dashboard collaborators.
//!
//! Records are immutable once built and serialize to camelCase JSON. The
//! consumers treat the arrays as read-only; nothing here is persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::{CostItem, Metric};

/// A measured value with its control-limit pair.
///
/// Limits are always populated: explicit limit columns win, otherwise the
/// metric's default rule applies. A value outside its limits is still valid
/// data; out-of-control points are what the dashboard exists to show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    pub lcl: f64,
    pub ucl: f64,
}

/// One shift's quality measurements, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRecord {
    pub date: NaiveDate,
    pub time: String,
    pub shift: String,
    pub grade: String,
    pub gsm_grade: String,
    pub lab_technician: String,
    pub machine_operator: String,
    pub remarks: String,
    /// Every metric is present once defaults are applied.
    pub readings: BTreeMap<Metric, Reading>,
}

impl QualityRecord {
    pub fn reading(&self, metric: Metric) -> Option<&Reading> {
        self.readings.get(&metric)
    }

    /// Measured value for `metric`, zero when absent.
    pub fn value(&self, metric: Metric) -> f64 {
        self.readings
            .get(&metric)
            .map(|reading| reading.value)
            .unwrap_or_default()
    }
}

/// One raw-material consumption line item for a production day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialLine {
    pub material: String,
    pub quantity: f64,
    pub rate: f64,
    pub cost: f64,
}

/// One production-loss incident for a production day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLossLine {
    pub category: String,
    pub duration_hours: f64,
    pub tonnes_lost: f64,
    pub remarks: String,
}

/// One production day's cost and production figures, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostingRecord {
    pub date: NaiveDate,
    pub grade: String,
    pub gsm_grade: String,
    pub total_production: f64,
    pub total_cost: f64,
    pub cost_per_kg: f64,
    pub cost_per_ton: f64,
    pub cost_per_saleable_ton: f64,
    pub items: BTreeMap<CostItem, f64>,
    pub raw_materials: Vec<RawMaterialLine>,
    pub losses: Vec<ProductionLossLine>,
}

impl CostingRecord {
    pub fn item(&self, item: CostItem) -> f64 {
        self.items.get(&item).copied().unwrap_or_default()
    }
}
