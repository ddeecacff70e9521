use chrono::{Datelike, Local, Months};
use serde_json::json;
use shared_types::ReportPeriod;
use studio_app::admin::{DashboardView, ReportsView};

use crate::common::MockBackend;

#[tokio::test]
async fn test_monthly_report_excludes_previous_month() {
    let backend = MockBackend::start().await;
    let today = Local::now().date_naive();
    let this_month = today.with_day(1).unwrap();
    let last_month = this_month.checked_sub_months(Months::new(1)).unwrap();
    backend.seed_booking(json!({"status": "Completed", "date": this_month.to_string()}));
    backend.seed_booking(json!({"status": "Completed", "date": last_month.to_string()}));
    backend.seed_booking(json!({"status": "Confirmed", "date": this_month.to_string()}));
    backend.seed_student(json!({"status": "Approved", "submitted_at": format!("{}T09:00:00", this_month)}));

    let mut view = ReportsView::new(5000);
    view.refresh(&backend.client()).await.unwrap();
    view.set_period(ReportPeriod::Monthly);
    let monthly = view.summary_on(today);

    assert_eq!(monthly.completed_count, 1);
    assert_eq!(monthly.revenue, 5000);
    assert_eq!(monthly.approved_count, 1);

    view.set_period(ReportPeriod::All);
    let all = view.summary_on(today);
    assert_eq!(all.completed_count, 2);
    assert_eq!(all.revenue, 10000);
}

#[tokio::test]
async fn test_dashboard_reads_both_collections() {
    let backend = MockBackend::start().await;
    backend.seed_booking(json!({"status": "Pending"}));
    backend.seed_booking(json!({"status": "Completed"}));
    backend.seed_student(json!({}));

    let mut view = DashboardView::new(2500);
    let stats = view.refresh(&backend.client()).await.unwrap().clone();

    assert_eq!(stats.total_bookings, 2);
    assert_eq!(stats.pending_bookings, 1);
    assert_eq!(stats.completed_bookings, 1);
    assert_eq!(stats.total_students, 1);
    assert_eq!(stats.revenue, 2500);
    assert_eq!(backend.hits("GET /bookings"), 1);
    assert_eq!(backend.hits("GET /student-id"), 1);
}
