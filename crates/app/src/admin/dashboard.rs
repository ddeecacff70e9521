use chrono::{Local, NaiveDate};
use shared_types::{
    build_dashboard, build_report, AppError, BookingRecord, DashboardStats, ReportPeriod, ReportSummary, StudentRecord,
};
use studio_client::StudioClient;

async fn fetch_all(client: &StudioClient) -> Result<(Vec<BookingRecord>, Vec<StudentRecord>), AppError> {
    tokio::try_join!(client.list_bookings(), client.list_students())
}

/// Headline figures shown on the admin landing page.
#[derive(Debug, Clone)]
pub struct DashboardView {
    unit_price: u64,
    stats: Option<DashboardStats>,
}

impl DashboardView {
    pub fn new(unit_price: u64) -> Self {
        Self { unit_price, stats: None }
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn compute(&mut self, bookings: &[BookingRecord], students: &[StudentRecord], today: NaiveDate) -> &DashboardStats {
        self.stats.insert(build_dashboard(bookings, students, today, self.unit_price))
    }

    #[tracing::instrument(skip_all)]
    pub async fn refresh(&mut self, client: &StudioClient) -> Result<&DashboardStats, AppError> {
        let (bookings, students) = fetch_all(client).await?;
        Ok(self.compute(&bookings, &students, Local::now().date_naive()))
    }
}

/// Period report over completed bookings and approved applications.
#[derive(Debug, Clone)]
pub struct ReportsView {
    unit_price: u64,
    period: ReportPeriod,
    bookings: Vec<BookingRecord>,
    students: Vec<StudentRecord>,
}

impl ReportsView {
    pub fn new(unit_price: u64) -> Self {
        Self {
            unit_price,
            period: ReportPeriod::default(),
            bookings: Vec::new(),
            students: Vec::new(),
        }
    }

    pub fn period(&self) -> ReportPeriod {
        self.period
    }

    pub fn set_period(&mut self, period: ReportPeriod) {
        self.period = period;
    }

    pub fn replace(&mut self, bookings: Vec<BookingRecord>, students: Vec<StudentRecord>) {
        self.bookings = bookings;
        self.students = students;
    }

    #[tracing::instrument(skip_all)]
    pub async fn refresh(&mut self, client: &StudioClient) -> Result<(), AppError> {
        let (bookings, students) = fetch_all(client).await?;
        self.replace(bookings, students);
        Ok(())
    }

    /// Summary for the selected period relative to `today`.
    pub fn summary_on(&self, today: NaiveDate) -> ReportSummary {
        build_report(&self.bookings, &self.students, self.period, today, self.unit_price)
    }

    pub fn summary(&self) -> ReportSummary {
        self.summary_on(Local::now().date_naive())
    }
}
