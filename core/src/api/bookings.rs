use serde_json::Value;

use super::TravelApi;
use crate::encode::{self, Attachment};
use crate::entities::{Booking, BookingInput, BookingStatusInput, Normalize};
use crate::error::ApiResult;
use crate::http::HttpMethod;
use crate::transport::HttpExecutor;

impl<E: HttpExecutor> TravelApi<E> {
    /// Every booking (admin).
    pub async fn fetch_bookings(&self) -> Vec<Booking> {
        self.read_list(&self.routes.bookings(), "bookings").await
    }

    /// Bookings of the signed-in customer.
    pub async fn fetch_my_bookings(&self) -> Vec<Booking> {
        self.read_list(&self.routes.my_bookings(), "bookings").await
    }

    pub async fn fetch_booking(&self, id: &str) -> Option<Booking> {
        self.read_one(&self.routes.booking(id), "booking").await
    }

    pub async fn create_booking(&self, input: &BookingInput) -> ApiResult<Booking> {
        self.write_record(HttpMethod::Post, &self.routes.bookings(), &encode::BOOKING, input, None, "booking")
            .await
    }

    pub async fn update_booking_status(&self, id: &str, input: &BookingStatusInput) -> ApiResult<Booking> {
        self.write_record(
            HttpMethod::Patch,
            &self.routes.booking_status(id),
            &encode::BOOKING_STATUS,
            input,
            None,
            "booking",
        )
        .await
    }

    pub async fn cancel_booking(&self, id: &str) -> ApiResult<Booking> {
        let response = self
            .write(HttpMethod::Post, &self.routes.booking_cancel(id), None, "booking")
            .await?;
        Ok(Booking::from_value(&response))
    }

    /// Uploads the transfer receipt for a booking. Always multipart.
    pub async fn upload_payment_proof(&self, id: &str, proof: Attachment) -> ApiResult<Booking> {
        self.write_record(
            HttpMethod::Post,
            &self.routes.booking_payment_proof(id),
            &encode::PAYMENT_PROOF,
            &Value::Null,
            Some(proof),
            "payment proof",
        )
        .await
    }

    pub async fn delete_booking(&self, id: &str) -> ApiResult<()> {
        self.write_empty(HttpMethod::Delete, &self.routes.booking(id), "booking").await
    }
}
