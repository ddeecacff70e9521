//! `studio-admin` command handling.
//!
//! Every mutating command stages the same confirmation the back-office views
//! show. Without `--yes` the prompt is printed and nothing is sent.

use std::fmt::Write as _;
use std::sync::Arc;

use shared_types::{AppConfig, AppError, BookingAction, LoginRequest, ReportPeriod, SessionRecord};
use studio_client::{NotificationPoller, SessionContext, StudioClient};

use crate::admin::{BookingCommand, BookingListView, BookingTab, DashboardView, ReportsView, StudentListView};
use crate::format_helpers::{format_date_human, format_peso};
use crate::notifications::NotificationCenter;
use crate::review::ConfirmationRequest;

pub const USAGE: &str = "\
usage: studio-admin <command> [args] [--yes]

commands:
  bookings [status]          list bookings (All, Pending, Confirmed, Rejected, Completed)
  students [grade]           list student-ID applications (All, 7, 8, 9, 10)
  approve-booking <id>       Pending -> Confirmed
  reject-booking <id>        Pending/Confirmed -> rejected
  complete-booking <id>      Confirmed -> Completed
  delete-booking <id>        remove a finished booking
  approve-student <id>       approve an application
  delete-student <id>        remove an application
  report [period]            All, Daily, Weekly, Monthly, Yearly
  dashboard                  headline figures
  notifications              status notices for the signed-in user
  login <user> <pass>        sign in and store the session
  logout                     forget the stored session";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Bookings(BookingTab),
    Students(String),
    BookingAction(String, BookingAction),
    DeleteBooking(String),
    ApproveStudent(String),
    DeleteStudent(String),
    Report(ReportPeriod),
    Dashboard,
    Notifications,
    Login { username: String, password: String },
    Logout,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub confirmed: bool,
}

fn required(args: &[&str], index: usize, what: &str) -> Result<String, AppError> {
    args.get(index)
        .map(|s| s.to_string())
        .ok_or_else(|| AppError::bad_request(format!("missing {}\n\n{}", what, USAGE)))
}

/// Parse arguments (without the program name).
pub fn parse_args(raw: &[String]) -> Result<Invocation, AppError> {
    let confirmed = raw.iter().any(|a| a == "--yes" || a == "-y");
    let args: Vec<&str> = raw
        .iter()
        .map(String::as_str)
        .filter(|a| *a != "--yes" && *a != "-y")
        .collect();
    let Some((&name, rest)) = args.split_first() else {
        return Err(AppError::bad_request(USAGE));
    };
    let command = match name {
        "bookings" => {
            let tab = rest.first().copied().unwrap_or("All");
            Command::Bookings(
                BookingTab::from_str_opt(tab)
                    .ok_or_else(|| AppError::bad_request(format!("unknown status: {}", tab)))?,
            )
        }
        "students" => Command::Students(rest.first().copied().unwrap_or("All").to_string()),
        "approve-booking" => Command::BookingAction(required(rest, 0, "booking id")?, BookingAction::Approve),
        "reject-booking" => Command::BookingAction(required(rest, 0, "booking id")?, BookingAction::Reject),
        "complete-booking" => Command::BookingAction(required(rest, 0, "booking id")?, BookingAction::MarkDone),
        "delete-booking" => Command::DeleteBooking(required(rest, 0, "booking id")?),
        "approve-student" => Command::ApproveStudent(required(rest, 0, "application id")?),
        "delete-student" => Command::DeleteStudent(required(rest, 0, "application id")?),
        "report" => {
            let period = rest.first().copied().unwrap_or("All");
            Command::Report(
                ReportPeriod::from_str_opt(period)
                    .ok_or_else(|| AppError::bad_request(format!("unknown period: {}", period)))?,
            )
        }
        "dashboard" => Command::Dashboard,
        "notifications" => Command::Notifications,
        "login" => Command::Login {
            username: required(rest, 0, "username")?,
            password: required(rest, 1, "password")?,
        },
        "logout" => Command::Logout,
        other => return Err(AppError::bad_request(format!("unknown command: {}\n\n{}", other, USAGE))),
    };
    Ok(Invocation { command, confirmed })
}

fn prompt<A>(request: &ConfirmationRequest<A>) -> String {
    format!(
        "{}\n{}\nRe-run with --yes to {}.",
        request.title,
        request.message,
        request.confirm_label.to_lowercase()
    )
}

/// Execute one invocation and return the text to print.
pub async fn run(
    invocation: Invocation,
    config: &AppConfig,
    client: &StudioClient,
    session: Arc<SessionContext>,
) -> Result<String, AppError> {
    let client = session.authorized(client);
    let confirmed = invocation.confirmed;
    match invocation.command {
        Command::Bookings(tab) => {
            let mut view = BookingListView::from_config(config);
            view.refresh(&client).await?;
            view.set_tab(tab);
            let mut out = String::new();
            for b in view.visible() {
                let _ = writeln!(
                    out,
                    "{:>5}  {:<10} {:<12} {:<24} {} {}",
                    b.id,
                    b.status.as_str(),
                    b.service_category,
                    b.full_name,
                    format_date_human(&b.date),
                    b.time
                );
            }
            let counts: Vec<String> = view
                .tab_counts()
                .iter()
                .map(|(t, n)| format!("{} {}", t.label(), n))
                .collect();
            let _ = write!(out, "{}", counts.join(" | "));
            Ok(out)
        }
        Command::Students(grade) => {
            let mut view = StudentListView::from_config(config);
            view.set_grade_tab(&grade)?;
            view.refresh(&client).await?;
            let mut out = String::new();
            for s in view.visible() {
                let _ = writeln!(
                    out,
                    "{:>5}  {:<9} {:<14} {:<28} {} - {}",
                    s.id,
                    s.status.as_str(),
                    s.lrn,
                    s.full_name(),
                    s.grade,
                    s.section
                );
            }
            Ok(out.trim_end().to_string())
        }
        Command::BookingAction(id, action) => {
            let mut view = BookingListView::from_config(config);
            view.refresh(&client).await?;
            let request = view.request_transition(&id, action)?;
            let text = prompt(request);
            let BookingCommand::Transition { to, .. } = request.action else {
                return Err(AppError::internal("Unexpected booking command"));
            };
            if !confirmed {
                return Ok(text);
            }
            view.confirm(&client).await?;
            Ok(format!("Booking {} is now {}.", id, to))
        }
        Command::DeleteBooking(id) => {
            let mut view = BookingListView::from_config(config);
            view.refresh(&client).await?;
            let text = prompt(view.request_delete(&id)?);
            if !confirmed {
                return Ok(text);
            }
            view.confirm(&client).await?;
            Ok(format!("Booking {} deleted.", id))
        }
        Command::ApproveStudent(id) => {
            let mut view = StudentListView::from_config(config);
            view.refresh(&client).await?;
            let text = prompt(view.request_approve(&id)?);
            if !confirmed {
                return Ok(text);
            }
            view.confirm(&client).await?;
            Ok(format!("Application {} approved.", id))
        }
        Command::DeleteStudent(id) => {
            let mut view = StudentListView::from_config(config);
            view.refresh(&client).await?;
            let text = prompt(view.request_delete(&id)?);
            if !confirmed {
                return Ok(text);
            }
            view.confirm(&client).await?;
            Ok(format!("Application {} deleted.", id))
        }
        Command::Report(period) => {
            let mut view = ReportsView::new(config.reports.unit_price);
            view.refresh(&client).await?;
            view.set_period(period);
            let summary = view.summary();
            Ok(format!(
                "Report: {}\nCompleted bookings: {}\nRevenue: {}\nApproved IDs: {}",
                summary.period.as_str(),
                summary.completed_count,
                format_peso(summary.revenue),
                summary.approved_count
            ))
        }
        Command::Dashboard => {
            let mut view = DashboardView::new(config.reports.unit_price);
            let stats = view.refresh(&client).await?;
            let days: Vec<String> = stats.occupied_days.iter().map(u32::to_string).collect();
            Ok(format!(
                "Bookings: {} (pending {}, completed {})\nStudent IDs: {}\nRevenue: {}\nBooked days this month: {}",
                stats.total_bookings,
                stats.pending_bookings,
                stats.completed_bookings,
                stats.total_students,
                format_peso(stats.revenue),
                if days.is_empty() { "none".to_string() } else { days.join(", ") }
            ))
        }
        Command::Notifications => {
            let poller = NotificationPoller::new(
                client.clone(),
                session.clone(),
                std::time::Duration::from_secs(config.notifications.poll_interval_secs),
            );
            let Some(latest) = poller.fetch_once().await? else {
                return Err(AppError::unauthorized("Sign in to see notifications"));
            };
            let mut center = NotificationCenter::new();
            center.apply(latest);
            let mut out = format!("{} unread\n", center.unread_count());
            for n in center.items() {
                let _ = writeln!(out, "[{}] {} ({})", n.status, n.message, n.detail);
            }
            Ok(out.trim_end().to_string())
        }
        Command::Login { username, password } => {
            let auth = client.login(&LoginRequest { username, password }).await?;
            let name = auth.user.username.clone();
            session.set(SessionRecord::from(auth))?;
            Ok(format!("Welcome back, {}!", name))
        }
        Command::Logout => {
            session.clear()?;
            Ok("Signed out.".to_string())
        }
    }
}
