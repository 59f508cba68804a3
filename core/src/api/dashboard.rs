use serde_json::Value;
use tracing::warn;

use super::TravelApi;
use crate::entities::{normalize_list, BookingStatusBreakdown, DashboardStats, Normalize};
use crate::envelope;
use crate::error::ApiResult;
use crate::transport::HttpExecutor;

impl<E: HttpExecutor> TravelApi<E> {
    pub async fn fetch_dashboard(&self) -> DashboardStats {
        self.refresh_dashboard(DashboardStats::default()).await
    }

    /// Refetches every widget concurrently. A widget whose fetch fails keeps
    /// its value from `prior`; the others are replaced.
    pub async fn refresh_dashboard(&self, prior: DashboardStats) -> DashboardStats {
        let (stats_path, popular_path, buyers_path, status_path, trips_path) = (
            self.routes.dashboard_stats(),
            self.routes.dashboard_popular_packages(),
            self.routes.dashboard_recent_buyers(),
            self.routes.dashboard_booking_status(),
            self.routes.dashboard_upcoming_trips(),
        );
        let (stats, popular, buyers, status, trips) = tokio::join!(
            self.transport.get(&stats_path),
            self.transport.get(&popular_path),
            self.transport.get(&buyers_path),
            self.transport.get(&status_path),
            self.transport.get(&trips_path),
        );

        let mut next = prior;
        if let Some(payload) = settle("stats", stats) {
            next = next.with_totals_from(&DashboardStats::from_value(&payload));
        }
        if let Some(payload) = settle("popular packages", popular) {
            next.popular_packages = normalize_list(envelope::records(&payload));
        }
        if let Some(payload) = settle("recent buyers", buyers) {
            next.recent_buyers = normalize_list(envelope::records(&payload));
        }
        if let Some(payload) = settle("booking status", status) {
            next.status_breakdown = BookingStatusBreakdown::from_value(&payload);
        }
        if let Some(payload) = settle("upcoming trips", trips) {
            next.upcoming_trips = normalize_list(envelope::records(&payload));
        }
        next
    }
}

fn settle(widget: &'static str, result: ApiResult<Value>) -> Option<Value> {
    result
        .inspect_err(|err| warn!(widget, error = %err, "dashboard widget not refreshed; keeping previous value"))
        .ok()
}
