use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Wire format matches the backend's snake_case JSON, so field names map 1:1.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub date_joined: Option<NaiveDate>,
    #[serde(default)]
    pub is_active: bool,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: i64,
    pub employee: i64,
    #[serde(default)]
    pub employee_name: String,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    pub status: LeaveStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLeaveRequest {
    pub employee: i64,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

/// Ten review criteria, each scored 1-5 by the reviewer. An absent score means
/// "not scored" and contributes 0 to the total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppraisalCriteria {
    pub technical_skill: Option<u8>,
    pub communication: Option<u8>,
    pub teamwork: Option<u8>,
    pub punctuality: Option<u8>,
    pub problem_solving: Option<u8>,
    pub leadership: Option<u8>,
    pub initiative: Option<u8>,
    pub reliability: Option<u8>,
    pub quality_of_work: Option<u8>,
    pub adaptability: Option<u8>,
}

impl AppraisalCriteria {
    pub fn scores(&self) -> [Option<u8>; 10] {
        [
            self.technical_skill,
            self.communication,
            self.teamwork,
            self.punctuality,
            self.problem_solving,
            self.leadership,
            self.initiative,
            self.reliability,
            self.quality_of_work,
            self.adaptability,
        ]
    }

    pub fn total_points(&self) -> u32 {
        self.scores()
            .into_iter()
            .map(|score| u32::from(score.unwrap_or(0)))
            .sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appraisal {
    pub id: i64,
    pub employee: i64,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub review_period: String,
    #[serde(flatten)]
    pub criteria: AppraisalCriteria,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveAppraisalPayload {
    pub employee: i64,
    pub review_period: String,
    #[serde(flatten)]
    pub criteria: AppraisalCriteria,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateLetter {
    pub id: i64,
    pub candidate_name: String,
    pub email: String,
    pub letter_type: String,
    #[serde(default)]
    pub position: String,
    pub issued_on: Option<NaiveDate>,
    pub file: Option<String>,
}

/// Opaque upload forwarded to the backend as-is. The data URL carries the
/// base64 payload; `validate::check_attachment` enforces size and type before
/// submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAttachment {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub data_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLetterPayload {
    pub candidate_name: String,
    pub email: String,
    pub letter_type: String,
    pub position: Option<String>,
    pub attachment: Option<FileAttachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHoliday {
    pub name: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Termination {
    pub id: i64,
    pub employee: i64,
    #[serde(default)]
    pub employee_name: String,
    pub reason: String,
    pub notice_date: Option<NaiveDate>,
    pub termination_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionAdminPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationeryItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub unit: String,
    pub current_stock: f64,
    pub reorder_level: f64,
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveStationeryItemPayload {
    pub name: String,
    pub description: Option<String>,
    pub unit: String,
    pub current_stock: f64,
    pub reorder_level: f64,
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageStatus {
    Pending,
    Approved,
    Rejected,
    Issued,
}

impl UsageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Issued => "issued",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRequest {
    pub id: i64,
    pub employee: i64,
    #[serde(default)]
    pub employee_name: String,
    pub stationery_item: i64,
    #[serde(default)]
    pub item_name: String,
    pub quantity: f64,
    #[serde(default)]
    pub purpose: String,
    pub status: UsageStatus,
    pub requested_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUsageRequest {
    pub employee: i64,
    pub stationery_item: i64,
    pub quantity: f64,
    pub purpose: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    StockIn,
    StockOut,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StockIn => "stock_in",
            Self::StockOut => "stock_out",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTransaction {
    pub id: i64,
    pub stationery_item: i64,
    #[serde(default)]
    pub item_name: String,
    pub transaction_type: TransactionType,
    pub quantity: f64,
    #[serde(default)]
    pub reference: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStockTransaction {
    pub stationery_item: i64,
    pub transaction_type: TransactionType,
    pub quantity: f64,
    pub reference: Option<String>,
}

/// List bodies arrive either as a bare array or as the backend's paginated
/// envelope with a `next` URL to follow.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(ListEnvelope<T>),
    Plain(Vec<T>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    pub count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
