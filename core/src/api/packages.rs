use super::TravelApi;
use crate::encode::{self, Attachment};
use crate::entities::{Normalize, PackageDetail, PackageInput};
use crate::error::ApiResult;
use crate::http::HttpMethod;
use crate::transport::HttpExecutor;

impl<E: HttpExecutor> TravelApi<E> {
    pub async fn fetch_packages(&self) -> Vec<PackageDetail> {
        self.read_list(&self.routes.packages(), "packages").await
    }

    pub async fn fetch_package(&self, id: &str) -> Option<PackageDetail> {
        self.read_one(&self.routes.package(id), "package").await
    }

    pub async fn create_package(&self, input: &PackageInput, image: Option<Attachment>) -> ApiResult<PackageDetail> {
        self.write_record(HttpMethod::Post, &self.routes.packages(), &encode::PACKAGE, input, image, "package")
            .await
    }

    pub async fn update_package(
        &self,
        id: &str,
        input: &PackageInput,
        image: Option<Attachment>,
    ) -> ApiResult<PackageDetail> {
        self.write_record(HttpMethod::Put, &self.routes.package(id), &encode::PACKAGE, input, image, "package")
            .await
    }

    pub async fn delete_package(&self, id: &str) -> ApiResult<()> {
        self.write_empty(HttpMethod::Delete, &self.routes.package(id), "package").await
    }

    /// Flips the package between active and inactive and returns the new
    /// state as reported by the backend.
    pub async fn toggle_package_status(&self, id: &str) -> ApiResult<PackageDetail> {
        let response = self
            .write(HttpMethod::Patch, &self.routes.package_toggle_status(id), None, "package")
            .await?;
        Ok(PackageDetail::from_value(&response))
    }
}

#[cfg(test)]
mod tests {
    use crate::encode::Attachment;
    use crate::entities::PackageInput;
    use crate::http::HttpMethod;
    use crate::testing::StubExecutor;
    use crate::{ClientConfig, Session, TravelApi};

    fn api(stub: StubExecutor) -> TravelApi<StubExecutor> {
        TravelApi::new(&ClientConfig::new("http://api.test", "/api"), Session::new(), stub)
    }

    #[tokio::test]
    async fn bare_array_list() {
        let api = api(StubExecutor::new().respond(200, r#"[{"id":1,"nama":"A","harga":"100"},{"id":2,"name":"B"}]"#));
        let packages = api.fetch_packages().await;
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "A");
        assert_eq!(packages[0].price, 100.0);
    }

    #[tokio::test]
    async fn save_with_image_sends_multipart_fields() {
        let api = api(StubExecutor::new().respond(201, r#"{"id":"p1","name":"Bromo","harga":1500000}"#));
        let input = PackageInput {
            name: Some("Bromo".into()),
            price: Some(1_500_000.0),
            ..Default::default()
        };
        let image = Attachment::new("bromo.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF]);
        let package = api.create_package(&input, Some(image)).await.unwrap();
        assert_eq!(package.price, 1_500_000.0);

        let request = api.transport().executor().last_request();
        let body = request.body.as_ref().unwrap();
        assert!(body.is_multipart());
        let form = body.as_multipart().unwrap();
        assert!(form.text_value("name").is_some());
        assert!(form.text_value("harga").is_some());
        assert_eq!(form.attachment("image").map(|f| f.file_name.as_str()), Some("bromo.jpg"));
    }

    #[tokio::test]
    async fn toggle_status_patches() {
        let api = api(StubExecutor::new().respond(200, r#"{"data":{"id":"p1","is_active":false}}"#));
        let package = api.toggle_package_status("p1").await.unwrap();
        assert!(!package.is_active);
        let request = api.transport().executor().last_request();
        assert_eq!(request.method, HttpMethod::Patch);
        assert_eq!(request.url, "http://api.test/api/packages/p1/toggle-status/");
        assert!(request.body.is_none());
    }
}
