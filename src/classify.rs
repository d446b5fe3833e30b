use crate::models::StationeryItem;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
    /// Sentinel for a missing item. Display-only; never produced for a real
    /// record and never used in filtering decisions.
    Unknown,
}

impl StockStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
            Self::Unknown => "Unknown",
        }
    }

    /// Higher rank means more urgent.
    pub fn severity_rank(self) -> u8 {
        match self {
            Self::OutOfStock => 3,
            Self::LowStock => 2,
            Self::InStock => 1,
            Self::Unknown => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    pub fn tier(self) -> u8 {
        match self {
            Self::APlus => 5,
            Self::A => 4,
            Self::B => 3,
            Self::C => 2,
            Self::D => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

// Classifiers are display logic and must never block rendering: non-finite
// input coerces to 0 and falls into the most conservative band.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Precedence is fixed: depleted first, then the reorder band. An item whose
/// reorder level is zero or negative is never LowStock; it is OutOfStock at
/// zero and InStock with any positive stock.
pub fn stock_status(current_stock: f64, reorder_level: f64) -> StockStatus {
    let current = sanitize(current_stock);
    let reorder = sanitize(reorder_level);
    if current <= 0.0 {
        StockStatus::OutOfStock
    } else if current <= reorder {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

pub fn stock_status_of(item: Option<&StationeryItem>) -> StockStatus {
    match item {
        Some(item) => stock_status(item.current_stock, item.reorder_level),
        None => StockStatus::Unknown,
    }
}

/// Grade cutoffs are inclusive on the lower bound of each tier. The scored
/// domain is 0..=50 (ten criteria, 1-5 each); anything above grades as A+.
pub fn appraisal_grade(total_points: u32) -> Grade {
    match total_points {
        points if points >= 47 => Grade::APlus,
        points if points >= 42 => Grade::A,
        points if points >= 37 => Grade::B,
        points if points >= 32 => Grade::C,
        _ => Grade::D,
    }
}

/// Replenishment urgency for the stock report. Every OutOfStock or LowStock
/// item lands at High, keeping the ordering consistent with `stock_status`.
pub fn priority_level(current_stock: f64, reorder_level: f64) -> Priority {
    let current = sanitize(current_stock);
    let reorder = sanitize(reorder_level);
    if current <= reorder {
        Priority::High
    } else if current <= reorder * 2.0 {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Stock expressed as a percentage of the reorder level, for level bars.
/// `None` when the reorder level cannot be divided by.
pub fn percent_of_reorder(current_stock: f64, reorder_level: f64) -> Option<f64> {
    let current = sanitize(current_stock);
    let reorder = sanitize(reorder_level);
    if reorder <= 0.0 {
        return None;
    }
    Some((current.max(0.0) / reorder) * 100.0)
}

impl StationeryItem {
    pub fn stock_status(&self) -> StockStatus {
        stock_status(self.current_stock, self.reorder_level)
    }

    pub fn priority(&self) -> Priority {
        priority_level(self.current_stock, self.reorder_level)
    }
}
