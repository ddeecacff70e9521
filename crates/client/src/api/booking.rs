use serde_json::Value;
use shared_types::{
    normalize_collection, AppError, BookingRecord, BookingRequest, BookingStatus,
    UpdateBookingStatusRequest,
};

use super::{segment, StudioClient};
use crate::error_convert::ValidateRequest;
use crate::submission::{SubmissionResult, BOOKING_FAILURE};

impl StudioClient {
    /// `POST /bookings`. Validates the draft first; an invalid draft never
    /// reaches the network.
    #[tracing::instrument(skip(self, request), fields(category = %request.service_category))]
    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Value, AppError> {
        request.validate_request()?;
        let body = self.send(self.http.post(self.url("bookings")).json(request)).await?;
        tracing::info!(package = %request.package_type, date = %request.date, "Booking submitted");
        Ok(body)
    }

    /// [`create_booking`](Self::create_booking) folded into a [`SubmissionResult`].
    pub async fn submit_booking(&self, request: &BookingRequest) -> SubmissionResult<Value> {
        SubmissionResult::from_result(self.create_booking(request).await, BOOKING_FAILURE)
    }

    /// `GET /bookings`, normalized.
    #[tracing::instrument(skip(self))]
    pub async fn list_bookings(&self) -> Result<Vec<BookingRecord>, AppError> {
        let body = self.send(self.http.get(self.url("bookings"))).await?;
        let bookings: Vec<BookingRecord> = normalize_collection(body);
        tracing::debug!(count = bookings.len(), "Fetched bookings");
        Ok(bookings)
    }

    /// `GET /bookings/user/{username}`, normalized.
    #[tracing::instrument(skip(self))]
    pub async fn list_user_bookings(&self, username: &str) -> Result<Vec<BookingRecord>, AppError> {
        let path = format!("bookings/user/{}", segment(username));
        let body = self.send(self.http.get(self.url(&path))).await?;
        Ok(normalize_collection(body))
    }

    /// `PUT /bookings/{id}` with `{status}`.
    #[tracing::instrument(skip(self))]
    pub async fn update_booking_status(&self, id: &str, status: BookingStatus) -> Result<(), AppError> {
        let path = format!("bookings/{}", segment(id));
        self.send(
            self.http
                .put(self.url(&path))
                .json(&UpdateBookingStatusRequest { status }),
        )
        .await?;
        tracing::info!(booking_id = id, status = %status, "Booking status updated");
        Ok(())
    }

    /// `DELETE /bookings/{id}`.
    #[tracing::instrument(skip(self))]
    pub async fn delete_booking(&self, id: &str) -> Result<(), AppError> {
        let path = format!("bookings/{}", segment(id));
        self.send(self.http.delete(self.url(&path))).await?;
        tracing::info!(booking_id = id, "Booking deleted");
        Ok(())
    }
}
