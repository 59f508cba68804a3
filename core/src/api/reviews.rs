use super::TravelApi;
use crate::encode::{self, Attachment};
use crate::entities::{Normalize, ReviewInput, UserReview};
use crate::error::ApiResult;
use crate::http::HttpMethod;
use crate::transport::HttpExecutor;

impl<E: HttpExecutor> TravelApi<E> {
    /// All reviews, including hidden ones (admin moderation list).
    pub async fn fetch_reviews(&self) -> Vec<UserReview> {
        self.read_list(&self.routes.reviews(), "reviews").await
    }

    pub async fn fetch_package_reviews(&self, package_id: &str) -> Vec<UserReview> {
        self.read_list(&self.routes.package_reviews(package_id), "reviews").await
    }

    pub async fn fetch_my_reviews(&self) -> Vec<UserReview> {
        self.read_list(&self.routes.my_reviews(), "reviews").await
    }

    pub async fn create_review(&self, input: &ReviewInput, photo: Option<Attachment>) -> ApiResult<UserReview> {
        self.write_record(HttpMethod::Post, &self.routes.reviews(), &encode::REVIEW, input, photo, "review")
            .await
    }

    pub async fn update_review(
        &self,
        id: &str,
        input: &ReviewInput,
        photo: Option<Attachment>,
    ) -> ApiResult<UserReview> {
        self.write_record(HttpMethod::Put, &self.routes.review(id), &encode::REVIEW, input, photo, "review")
            .await
    }

    pub async fn delete_review(&self, id: &str) -> ApiResult<()> {
        self.write_empty(HttpMethod::Delete, &self.routes.review(id), "review").await
    }

    pub async fn toggle_review_visibility(&self, id: &str) -> ApiResult<UserReview> {
        let response = self
            .write(HttpMethod::Patch, &self.routes.review_toggle_visibility(id), None, "review")
            .await?;
        Ok(UserReview::from_value(&response))
    }
}
