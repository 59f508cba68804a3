use super::TravelApi;
use crate::encode::{self, Attachment};
use crate::entities::{AdminUser, Normalize, UserInput};
use crate::error::ApiResult;
use crate::http::HttpMethod;
use crate::transport::HttpExecutor;

impl<E: HttpExecutor> TravelApi<E> {
    pub async fn fetch_users(&self) -> Vec<AdminUser> {
        self.read_list(&self.routes.users(), "users").await
    }

    pub async fn fetch_user(&self, id: &str) -> Option<AdminUser> {
        self.read_one(&self.routes.user(id), "user").await
    }

    pub async fn create_user(&self, input: &UserInput, avatar: Option<Attachment>) -> ApiResult<AdminUser> {
        self.write_record(HttpMethod::Post, &self.routes.users(), &encode::USER, input, avatar, "user")
            .await
    }

    pub async fn update_user(&self, id: &str, input: &UserInput, avatar: Option<Attachment>) -> ApiResult<AdminUser> {
        self.write_record(HttpMethod::Patch, &self.routes.user(id), &encode::USER, input, avatar, "user")
            .await
    }

    pub async fn delete_user(&self, id: &str) -> ApiResult<()> {
        self.write_empty(HttpMethod::Delete, &self.routes.user(id), "user").await
    }

    pub async fn toggle_user_status(&self, id: &str) -> ApiResult<AdminUser> {
        let response = self
            .write(HttpMethod::Patch, &self.routes.user_toggle_status(id), None, "user")
            .await?;
        Ok(AdminUser::from_value(&response))
    }
}
