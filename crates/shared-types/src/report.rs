use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::booking::{BookingRecord, BookingStatus};
use crate::student::{StudentRecord, StudentStatus};

/// Time window a report is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportPeriod {
    #[default]
    All,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl ReportPeriod {
    pub const ALL_PERIODS: [ReportPeriod; 5] = [
        ReportPeriod::All,
        ReportPeriod::Daily,
        ReportPeriod::Weekly,
        ReportPeriod::Monthly,
        ReportPeriod::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        Self::ALL_PERIODS
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Whether `date` falls in this period relative to `today`.
    ///
    /// Weekly is the Sunday..=Saturday week containing `today`. An unknown
    /// date only belongs to `All`.
    pub fn contains(&self, date: Option<NaiveDate>, today: NaiveDate) -> bool {
        let date = match (self, date) {
            (Self::All, _) => return true,
            (_, None) => return false,
            (_, Some(d)) => d,
        };
        match self {
            Self::All => true,
            Self::Daily => date == today,
            Self::Weekly => {
                let start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
                let end = start + Duration::days(6);
                date >= start && date <= end
            }
            Self::Monthly => date.year() == today.year() && date.month() == today.month(),
            Self::Yearly => date.year() == today.year(),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completed-work and approved-ID figures for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub period: ReportPeriod,
    pub completed_bookings: Vec<BookingRecord>,
    pub completed_count: usize,
    pub revenue: u64,
    pub approved_students: Vec<StudentRecord>,
    pub approved_count: usize,
}

/// Aggregate completed bookings and approved applications for `period`.
///
/// Revenue is a flat `completed_count * unit_price`.
pub fn build_report(
    bookings: &[BookingRecord],
    students: &[StudentRecord],
    period: ReportPeriod,
    today: NaiveDate,
    unit_price: u64,
) -> ReportSummary {
    let completed_bookings: Vec<BookingRecord> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Completed && period.contains(b.booked_on(), today))
        .cloned()
        .collect();
    let approved_students: Vec<StudentRecord> = students
        .iter()
        .filter(|s| s.status == StudentStatus::Approved && period.contains(s.submitted().map(|dt| dt.date()), today))
        .cloned()
        .collect();
    let completed_count = completed_bookings.len();
    ReportSummary {
        period,
        revenue: completed_count as u64 * unit_price,
        completed_count,
        approved_count: approved_students.len(),
        completed_bookings,
        approved_students,
    }
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub completed_bookings: usize,
    pub total_students: usize,
    pub revenue: u64,
    /// Days of `today`'s month, after today, holding a Confirmed booking.
    pub occupied_days: Vec<u32>,
}

pub fn build_dashboard(
    bookings: &[BookingRecord],
    students: &[StudentRecord],
    today: NaiveDate,
    unit_price: u64,
) -> DashboardStats {
    let completed = bookings.iter().filter(|b| b.status == BookingStatus::Completed).count();
    DashboardStats {
        total_bookings: bookings.len(),
        pending_bookings: bookings.iter().filter(|b| b.status == BookingStatus::Pending).count(),
        completed_bookings: completed,
        total_students: students.len(),
        revenue: completed as u64 * unit_price,
        occupied_days: occupied_days(bookings, today),
    }
}

/// Future days of the current month that already hold a Confirmed booking.
pub fn occupied_days(bookings: &[BookingRecord], today: NaiveDate) -> Vec<u32> {
    let mut days: Vec<u32> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .filter_map(BookingRecord::booked_on)
        .filter(|d| d.year() == today.year() && d.month() == today.month() && *d > today)
        .map(|d| d.day())
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}
