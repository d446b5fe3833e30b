use crate::classify::{Grade, Priority, StockStatus};
use crate::models::UsageStatus;

/// Presentation metadata for a classifier output. Kept apart from the
/// classification rules so themes can swap without touching them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub color: &'static str,
}

pub fn stock_badge(status: StockStatus) -> Badge {
    match status {
        StockStatus::OutOfStock => Badge { label: "Out of Stock", color: "red" },
        StockStatus::LowStock => Badge { label: "Low Stock", color: "amber" },
        StockStatus::InStock => Badge { label: "In Stock", color: "green" },
        StockStatus::Unknown => Badge { label: "Unknown", color: "gray" },
    }
}

pub fn grade_badge(grade: Grade) -> Badge {
    match grade {
        Grade::APlus => Badge { label: "A+", color: "green" },
        Grade::A => Badge { label: "A", color: "green" },
        Grade::B => Badge { label: "B", color: "blue" },
        Grade::C => Badge { label: "C", color: "amber" },
        Grade::D => Badge { label: "D", color: "red" },
    }
}

pub fn priority_badge(priority: Priority) -> Badge {
    match priority {
        Priority::High => Badge { label: "High", color: "red" },
        Priority::Medium => Badge { label: "Medium", color: "amber" },
        Priority::Low => Badge { label: "Low", color: "green" },
    }
}

pub fn usage_badge(status: UsageStatus) -> Badge {
    match status {
        UsageStatus::Pending => Badge { label: "Pending", color: "amber" },
        UsageStatus::Approved => Badge { label: "Approved", color: "blue" },
        UsageStatus::Rejected => Badge { label: "Rejected", color: "red" },
        UsageStatus::Issued => Badge { label: "Issued", color: "green" },
    }
}
