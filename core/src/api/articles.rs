use super::TravelApi;
use crate::encode::{self, Attachment};
use crate::entities::{Article, ArticleInput};
use crate::error::ApiResult;
use crate::http::HttpMethod;
use crate::transport::HttpExecutor;

impl<E: HttpExecutor> TravelApi<E> {
    pub async fn fetch_articles(&self) -> Vec<Article> {
        self.read_list(&self.routes.articles(), "articles").await
    }

    /// Only the articles readers should see.
    pub async fn fetch_published_articles(&self) -> Vec<Article> {
        let mut articles = self.fetch_articles().await;
        articles.retain(|article| article.is_published);
        articles
    }

    pub async fn fetch_article(&self, id: &str) -> Option<Article> {
        self.read_one(&self.routes.article(id), "article").await
    }

    /// Creates an article; with a cover image the request goes out as
    /// multipart.
    pub async fn create_article(&self, input: &ArticleInput, cover: Option<Attachment>) -> ApiResult<Article> {
        self.write_record(HttpMethod::Post, &self.routes.articles(), &encode::ARTICLE, input, cover, "article")
            .await
    }

    pub async fn update_article(
        &self,
        id: &str,
        input: &ArticleInput,
        cover: Option<Attachment>,
    ) -> ApiResult<Article> {
        self.write_record(HttpMethod::Put, &self.routes.article(id), &encode::ARTICLE, input, cover, "article")
            .await
    }

    pub async fn delete_article(&self, id: &str) -> ApiResult<()> {
        self.write_empty(HttpMethod::Delete, &self.routes.article(id), "article").await
    }
}
