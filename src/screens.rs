use crate::classify::{appraisal_grade, percent_of_reorder, Grade, Priority, StockStatus};
use crate::models::{Appraisal, StationeryItem, UsageRequest};
use crate::query::{apply, FieldValue, ListPage, ListQuery, ListSpec, Queryable, SortOrder};

pub const APPRAISAL_LIST: ListSpec = ListSpec {
    searchable: &["employee_name", "department", "designation", "review_period"],
    filterable: &["department", "grade"],
    sortable: &["employee_name", "department", "total_points", "grade"],
};

pub const STATIONERY_ITEMS: ListSpec = ListSpec {
    searchable: &["name", "description", "unit"],
    filterable: &["stock_status"],
    sortable: &["name", "current_stock", "reorder_level", "unit_price"],
};

pub const STATIONERY_USAGE: ListSpec = ListSpec {
    searchable: &["employee_name", "item_name", "purpose"],
    filterable: &["status"],
    sortable: &["employee_name", "item_name", "quantity", "requested_at"],
};

pub const STOCK_REPORT: ListSpec = ListSpec {
    searchable: &["name", "description"],
    filterable: &["stock_status", "priority"],
    sortable: &["name", "current_stock", "priority"],
};

impl Queryable for Appraisal {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "employee_name" => FieldValue::text(self.employee_name.clone()),
            "department" => FieldValue::text(self.department.clone()),
            "designation" => FieldValue::text(self.designation.clone()),
            "review_period" => FieldValue::text(self.review_period.clone()),
            "total_points" => FieldValue::Number(f64::from(self.criteria.total_points())),
            "grade" => FieldValue::text(appraisal_grade(self.criteria.total_points()).as_str()),
            _ => FieldValue::Missing,
        }
    }
}

impl Queryable for StationeryItem {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "name" => FieldValue::text(self.name.clone()),
            "description" => FieldValue::text(self.description.clone()),
            "unit" => FieldValue::text(self.unit.clone()),
            "current_stock" => FieldValue::Number(self.current_stock),
            "reorder_level" => FieldValue::Number(self.reorder_level),
            "unit_price" => match self.unit_price {
                Some(price) => FieldValue::Number(price),
                None => FieldValue::Missing,
            },
            // Recomputed on every read so a stock edit reclassifies immediately.
            "stock_status" => FieldValue::text(self.stock_status().as_str()),
            "priority" => FieldValue::text(self.priority().as_str()),
            _ => FieldValue::Missing,
        }
    }
}

impl Queryable for UsageRequest {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "employee_name" => FieldValue::text(self.employee_name.clone()),
            "item_name" => FieldValue::text(self.item_name.clone()),
            "purpose" => FieldValue::text(self.purpose.clone()),
            "quantity" => FieldValue::Number(self.quantity),
            "status" => FieldValue::text(self.status.as_str()),
            "requested_at" => match self.requested_at {
                Some(at) => FieldValue::Timestamp(at),
                None => FieldValue::Missing,
            },
            _ => FieldValue::Missing,
        }
    }
}

/// Per-screen list state: the fetched records plus the current query. Every
/// mutation recomputes the visible page and writes the engine's clamped page
/// back into the query, so a filter that shrinks the result set can never
/// leave the controls pointing at a page that no longer exists.
#[derive(Debug, Clone)]
pub struct ScreenState<T: Queryable + Clone> {
    records: Vec<T>,
    query: ListQuery,
    spec: &'static ListSpec,
}

impl<T: Queryable + Clone> ScreenState<T> {
    pub fn new(spec: &'static ListSpec) -> Self {
        Self {
            records: Vec::new(),
            query: ListQuery::default(),
            spec,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Replace the collection after a fetch. The backend is authoritative;
    /// callers re-fetch after every mutation instead of patching locally.
    pub fn set_records(&mut self, records: Vec<T>) -> ListPage<T> {
        self.records = records;
        self.recompute()
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> ListPage<T> {
        self.query.search_term = term.into();
        self.query.page = 1;
        self.recompute()
    }

    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) -> ListPage<T> {
        self.query.filters.insert(field.into(), value.into());
        self.query.page = 1;
        self.recompute()
    }

    /// Sorting by the current key flips the direction; a new key sorts
    /// ascending.
    pub fn set_sort(&mut self, field: impl Into<String>) -> ListPage<T> {
        let field = field.into();
        if self.query.sort_by.as_deref() == Some(field.as_str()) {
            self.query.sort_order = self.query.sort_order.toggled();
        } else {
            self.query.sort_by = Some(field);
            self.query.sort_order = SortOrder::Asc;
        }
        self.recompute()
    }

    pub fn set_page(&mut self, page: u32) -> ListPage<T> {
        self.query.page = page;
        self.recompute()
    }

    pub fn visible(&self) -> ListPage<T> {
        apply(&self.records, &self.query, self.spec)
    }

    fn recompute(&mut self) -> ListPage<T> {
        let page = self.visible();
        self.query.page = page.current_page;
        page
    }
}

#[derive(Debug, Clone)]
pub struct StockReportRow {
    pub item: StationeryItem,
    pub status: StockStatus,
    pub priority: Priority,
    pub percent_of_reorder: Option<f64>,
    pub line_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockReportSummary {
    pub total_items: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub in_stock: usize,
    pub total_value: f64,
}

/// Rows ordered most-urgent first, ties broken by name so the report is
/// deterministic. Line values are computed only where a unit price exists.
pub fn build_stock_report(items: &[StationeryItem]) -> (Vec<StockReportRow>, StockReportSummary) {
    let mut rows: Vec<StockReportRow> = items
        .iter()
        .map(|item| StockReportRow {
            status: item.stock_status(),
            priority: item.priority(),
            percent_of_reorder: percent_of_reorder(item.current_stock, item.reorder_level),
            line_value: item
                .unit_price
                .map(|price| price * item.current_stock.max(0.0)),
            item: item.clone(),
        })
        .collect();

    rows.sort_by(|left, right| {
        right
            .priority
            .rank()
            .cmp(&left.priority.rank())
            .then_with(|| left.item.name.to_lowercase().cmp(&right.item.name.to_lowercase()))
    });

    let mut summary = StockReportSummary {
        total_items: rows.len(),
        ..StockReportSummary::default()
    };
    for row in &rows {
        match row.status {
            StockStatus::OutOfStock => summary.out_of_stock += 1,
            StockStatus::LowStock => summary.low_stock += 1,
            StockStatus::InStock => summary.in_stock += 1,
            StockStatus::Unknown => {}
        }
        summary.total_value += row.line_value.unwrap_or(0.0);
    }

    (rows, summary)
}

/// Grade attached to an appraisal row for display.
pub fn appraisal_row_grade(appraisal: &Appraisal) -> Grade {
    appraisal_grade(appraisal.criteria.total_points())
}

#[cfg(test)]
mod tests {
    use super::{build_stock_report, ScreenState, STATIONERY_ITEMS};
    use crate::classify::{Priority, StockStatus};
    use crate::models::StationeryItem;

    fn item(id: i64, name: &str, stock: f64, reorder: f64, price: Option<f64>) -> StationeryItem {
        StationeryItem {
            id,
            name: name.to_string(),
            description: String::new(),
            unit: "piece".to_string(),
            current_stock: stock,
            reorder_level: reorder,
            unit_price: price,
        }
    }

    fn inventory() -> Vec<StationeryItem> {
        vec![
            item(1, "Stapler", 20.0, 5.0, Some(3.0)),
            item(2, "Pen", 0.0, 10.0, Some(0.5)),
            item(3, "Notebook", 4.0, 5.0, Some(2.0)),
            item(4, "Envelope", 8.0, 5.0, None),
        ]
    }

    #[test]
    fn filter_by_derived_status_label() {
        let mut screen = ScreenState::new(&STATIONERY_ITEMS);
        screen.set_records(inventory());
        let page = screen.set_filter("stock_status", "Low Stock");
        assert_eq!(page.total_count, 1);
        assert_eq!(page.rows[0].name, "Notebook");
    }

    #[test]
    fn shrinking_filter_clamps_the_stored_page() {
        let mut screen = ScreenState::new(&STATIONERY_ITEMS);
        screen.set_records(inventory());
        screen.set_page(2);
        // page_size defaults to 10, so page 2 is already out of range and the
        // state must have snapped back.
        assert_eq!(screen.query().page, 1);

        let page = screen.set_filter("stock_status", "In Stock");
        assert_eq!(page.current_page, 1);
        assert_eq!(screen.query().page, 1);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn search_resets_to_first_page() {
        let mut screen = ScreenState::new(&STATIONERY_ITEMS);
        screen.set_records(inventory());
        screen.set_search("pen");
        assert_eq!(screen.query().page, 1);
        assert_eq!(screen.visible().total_count, 1);
    }

    #[test]
    fn sort_toggles_direction_on_repeat() {
        let mut screen = ScreenState::new(&STATIONERY_ITEMS);
        screen.set_records(inventory());
        let ascending = screen.set_sort("name");
        assert_eq!(ascending.rows.first().map(|row| row.name.clone()), Some("Envelope".to_string()));
        let descending = screen.set_sort("name");
        assert_eq!(descending.rows.first().map(|row| row.name.clone()), Some("Stapler".to_string()));
    }

    #[test]
    fn report_orders_by_urgency_then_name() {
        let (rows, summary) = build_stock_report(&inventory());
        let names: Vec<_> = rows.iter().map(|row| row.item.name.as_str()).collect();
        // Pen and Notebook are High (depleted / at reorder), Envelope is
        // Medium (8 <= 10), Stapler is Low.
        assert_eq!(names, vec!["Notebook", "Pen", "Envelope", "Stapler"]);
        assert_eq!(rows[1].status, StockStatus::OutOfStock);
        assert_eq!(rows[2].priority, Priority::Medium);

        assert_eq!(summary.total_items, 4);
        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.in_stock, 2);
        // 20*3 + 0*0.5 + 4*2, Envelope has no price.
        assert!((summary.total_value - 68.0).abs() < f64::EPSILON);
    }
}
