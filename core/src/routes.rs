//! Path templates for every backend resource.
//!
//! Routes are pure strings relative to the base URL. The configured prefix
//! is prepended here so the transport only ever joins `base_url + path`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    prefix: String,
}

impl Routes {
    /// `prefix` is expected in the form produced by
    /// [`ClientConfig`](crate::ClientConfig): empty or `/segment`.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn path(&self, tail: &str) -> String {
        format!("{}{tail}", self.prefix)
    }

    // articles

    pub fn articles(&self) -> String {
        self.path("/articles/")
    }

    pub fn article(&self, id: &str) -> String {
        self.path(&format!("/articles/{id}/"))
    }

    // packages

    pub fn packages(&self) -> String {
        self.path("/packages/")
    }

    pub fn package(&self, id: &str) -> String {
        self.path(&format!("/packages/{id}/"))
    }

    pub fn package_toggle_status(&self, id: &str) -> String {
        self.path(&format!("/packages/{id}/toggle-status/"))
    }

    pub fn package_reviews(&self, id: &str) -> String {
        self.path(&format!("/packages/{id}/reviews/"))
    }

    // bookings

    pub fn bookings(&self) -> String {
        self.path("/bookings/")
    }

    pub fn my_bookings(&self) -> String {
        self.path("/bookings/my/")
    }

    pub fn booking(&self, id: &str) -> String {
        self.path(&format!("/bookings/{id}/"))
    }

    pub fn booking_status(&self, id: &str) -> String {
        self.path(&format!("/bookings/{id}/status/"))
    }

    pub fn booking_cancel(&self, id: &str) -> String {
        self.path(&format!("/bookings/{id}/cancel/"))
    }

    pub fn booking_payment_proof(&self, id: &str) -> String {
        self.path(&format!("/bookings/{id}/payment-proof/"))
    }

    // dashboard

    pub fn dashboard_stats(&self) -> String {
        self.path("/dashboard/stats/")
    }

    pub fn dashboard_popular_packages(&self) -> String {
        self.path("/dashboard/popular-packages/")
    }

    pub fn dashboard_recent_buyers(&self) -> String {
        self.path("/dashboard/recent-buyers/")
    }

    pub fn dashboard_booking_status(&self) -> String {
        self.path("/dashboard/booking-status/")
    }

    pub fn dashboard_upcoming_trips(&self) -> String {
        self.path("/dashboard/upcoming-trips/")
    }

    // reviews

    pub fn reviews(&self) -> String {
        self.path("/reviews/")
    }

    pub fn my_reviews(&self) -> String {
        self.path("/reviews/my/")
    }

    pub fn review(&self, id: &str) -> String {
        self.path(&format!("/reviews/{id}/"))
    }

    pub fn review_toggle_visibility(&self, id: &str) -> String {
        self.path(&format!("/reviews/{id}/toggle-visibility/"))
    }

    // wishlist

    pub fn wishlist(&self) -> String {
        self.path("/wishlist/")
    }

    pub fn wishlist_item(&self, id: &str) -> String {
        self.path(&format!("/wishlist/{id}/"))
    }

    // users

    pub fn users(&self) -> String {
        self.path("/users/")
    }

    pub fn user(&self, id: &str) -> String {
        self.path(&format!("/users/{id}/"))
    }

    pub fn user_toggle_status(&self, id: &str) -> String {
        self.path(&format!("/users/{id}/toggle-status/"))
    }

    // auth

    pub fn login(&self) -> String {
        self.path("/auth/login/")
    }

    pub fn register(&self) -> String {
        self.path("/auth/register/")
    }

    pub fn logout(&self) -> String {
        self.path("/auth/logout/")
    }

    pub fn profile(&self) -> String {
        self.path("/auth/profile/")
    }
}
