use super::TravelApi;
use crate::encode;
use crate::entities::{WishlistInput, WishlistItem};
use crate::error::ApiResult;
use crate::http::HttpMethod;
use crate::transport::HttpExecutor;

impl<E: HttpExecutor> TravelApi<E> {
    pub async fn fetch_wishlist(&self) -> Vec<WishlistItem> {
        self.read_list(&self.routes.wishlist(), "wishlist").await
    }

    pub async fn add_to_wishlist(&self, package_id: &str) -> ApiResult<WishlistItem> {
        let input = WishlistInput {
            package_id: package_id.to_string(),
        };
        self.write_record(HttpMethod::Post, &self.routes.wishlist(), &encode::WISHLIST, &input, None, "wishlist")
            .await
    }

    /// `id` is the wishlist entry id, not the package id.
    pub async fn remove_from_wishlist(&self, id: &str) -> ApiResult<()> {
        self.write_empty(HttpMethod::Delete, &self.routes.wishlist_item(id), "wishlist").await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use crate::http::HttpMethod;
    use crate::testing::StubExecutor;
    use crate::{ClientConfig, Session, TravelApi};

    fn api(stub: StubExecutor) -> TravelApi<StubExecutor> {
        TravelApi::new(&ClientConfig::new("http://api.test", "/api"), Session::new(), stub)
    }

    #[tokio::test]
    async fn flat_and_nested_rows() {
        let stub = StubExecutor::new().respond(
            200,
            r#"[
                {"id":1,"package_id":5,"package_name":"Raja Ampat","price":7000000},
                {"id":2,"paket":{"id":6,"nama":"Toba","harga":"1200000"}}
            ]"#,
        );
        let items = api(stub).fetch_wishlist().await;
        assert_eq!(items[0].package_name, "Raja Ampat");
        assert_eq!(items[1].package_id, "6");
        assert_eq!(items[1].price, 1_200_000.0);
    }

    #[tokio::test]
    async fn add_sends_package_id() {
        let api = api(StubExecutor::new().respond(201, r#"{"data":{"id":3,"package_id":"p9"}}"#));
        let item = api.add_to_wishlist("p9").await.unwrap();
        assert_eq!(item.id, "3");

        let request = api.transport().executor().last_request();
        let body: Value = serde_json::from_str(request.body.as_ref().and_then(|b| b.as_json()).unwrap()).unwrap();
        assert_eq!(body, json!({"package_id": "p9"}));
    }

    #[tokio::test]
    async fn remove_deletes_entry() {
        let api = api(StubExecutor::new().respond(204, ""));
        api.remove_from_wishlist("3").await.unwrap();
        let request = api.transport().executor().last_request();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "http://api.test/api/wishlist/3/");
    }
}
