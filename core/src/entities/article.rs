//! Travel articles.

use serde::Serialize;
use serde_json::Value;

use super::{normalize_indexed, Normalize};
use crate::date;
use crate::raw::{identifier, Field, Raw};

const ID: Field<String> = Field::new(&["id", "_id", "article_id"]);
const TITLE: Field<String> = Field::new(&["judul", "title", "name"]);
const SLUG: Field<String> = Field::new(&["slug"]);
const EXCERPT: Field<String> = Field::new(&["excerpt", "ringkasan", "summary"]);
const CONTENT: Field<String> = Field::new(&["content", "konten", "isi", "body"]);
const SECTIONS: &[&str] = &["sections", "content_blocks", "blocks", "content", "konten"];
const COVER_IMAGE: Field<String> = Field::new(&["coverImage", "cover_image", "thumbnail", "image", "gambar"]);
const AUTHOR: Field<String> = Field::new(&["author", "penulis", "author_name"]);
const AUTHOR_NAME: Field<String> = Field::new(&["name", "full_name", "nama"]);
const CATEGORY: Field<String> = Field::new(&["category", "kategori"]);
const TAGS: Field<Vec<String>> = Field::new(&["tags", "tag"]);
const STATUS: Field<String> = Field::new(&["status"]);
const PUBLISHED: Field<bool> = Field::new(&["isPublished", "is_published", "published"]);
const DATE: Field<String> = Field::new(&["publishedAt", "published_at", "tanggal", "date", "createdAt", "created_at"]);
const VIEWS: Field<i64> = Field::new(&["views", "view_count", "dilihat"]);

const BLOCK_HEADING: Field<String> = Field::new(&["heading", "judul", "title"]);
const BLOCK_BODY: Field<String> = Field::new(&["body", "content", "konten", "isi"]);
const BLOCK_IMAGE: Field<String> = Field::new(&["image", "gambar", "image_url"]);

/// Status words that mean the article is live.
const PUBLISHED_STATUSES: [&str; 4] = ["selesai", "published", "terbit", "publish"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub sections: Vec<ContentBlock>,
    pub cover_image: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: String,
    pub is_published: bool,
    /// Backend date string, untouched.
    pub date: String,
    pub display_date: String,
    pub views: i64,
}

/// One section of an article body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    pub heading: String,
    pub body: String,
    pub image: String,
}

impl Normalize for Article {
    fn normalize(raw: Raw<'_>) -> Self {
        let status = STATUS.text_or(raw, "Draft");
        let is_published = PUBLISHED
            .get(raw)
            .unwrap_or_else(|| PUBLISHED_STATUSES.contains(&status.trim().to_lowercase().as_str()));
        let author = AUTHOR
            .get(raw)
            .or_else(|| AUTHOR_NAME.get(raw.nested("author")))
            .unwrap_or_else(|| "Admin".to_string());
        let date = DATE.or_default(raw);

        Self {
            id: identifier(raw, &ID, "article"),
            title: TITLE.text_or(raw, "Artikel Tanpa Judul"),
            slug: SLUG.or_default(raw),
            excerpt: EXCERPT.or_default(raw),
            content: CONTENT.or_default(raw),
            sections: normalize_indexed(raw, SECTIONS, content_block),
            cover_image: COVER_IMAGE.or_default(raw),
            author,
            category: CATEGORY.text_or(raw, "Umum"),
            tags: TAGS.or_default(raw),
            status,
            is_published,
            display_date: date::display(&date),
            date,
            views: VIEWS.or_default(raw),
        }
    }
}

fn content_block(item: &Value, index: usize) -> ContentBlock {
    if let Value::String(text) = item {
        return ContentBlock {
            heading: format!("Bagian {}", index + 1),
            body: text.clone(),
            image: String::new(),
        };
    }
    let raw = Raw::new(item);
    ContentBlock {
        heading: BLOCK_HEADING.get(raw).unwrap_or_else(|| format!("Bagian {}", index + 1)),
        body: BLOCK_BODY.or_default(raw),
        image: BLOCK_IMAGE.or_default(raw),
    }
}

/// Canonical payload for creating or updating an article. Absent fields are
/// left out of the request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::raw::is_synthesized;

    #[test]
    fn backend_article_normalizes() {
        let article = Article::from_value(&json!({
            "judul": "Test",
            "tanggal": "2025-12-20",
            "status": "Selesai"
        }));
        assert_eq!(article.title, "Test");
        assert!(article.is_published);
        assert_eq!(article.status, "Selesai");
        assert_eq!(article.display_date, "20 Desember 2025");
        assert_eq!(article.date, "2025-12-20");
    }

    #[test]
    fn judul_beats_title() {
        let article = Article::from_value(&json!({"id": 1, "judul": "A", "title": "B"}));
        assert_eq!(article.title, "A");
        assert_eq!(article.id, "1");
    }

    #[test]
    fn empty_record_gets_defaults() {
        let article = Article::from_value(&json!({}));
        assert!(is_synthesized(&article.id));
        assert_eq!(article.title, "Artikel Tanpa Judul");
        assert_eq!(article.author, "Admin");
        assert_eq!(article.category, "Umum");
        assert_eq!(article.status, "Draft");
        assert!(!article.is_published);
        assert_eq!(article.date, "");
        assert_eq!(article.display_date, "");
        assert!(article.tags.is_empty());
        assert!(article.sections.is_empty());
        assert_eq!(article.views, 0);
    }

    #[test]
    fn explicit_flag_overrides_status() {
        let article = Article::from_value(&json!({"status": "Selesai", "is_published": false}));
        assert!(!article.is_published);
        let article = Article::from_value(&json!({"status": "draft", "published": "true"}));
        assert!(article.is_published);
    }

    #[test]
    fn nested_author_and_single_tag() {
        let article = Article::from_value(&json!({
            "author": {"id": 3, "full_name": "Sari"},
            "tags": "bali",
            "view_count": "120"
        }));
        assert_eq!(article.author, "Sari");
        assert_eq!(article.tags, vec!["bali"]);
        assert_eq!(article.views, 120);
    }

    #[test]
    fn sections_get_positional_headings() {
        let article = Article::from_value(&json!({
            "content_blocks": [
                {"judul": "Pembuka", "isi": "Halo"},
                {"konten": "Tanpa judul", "gambar": "x.jpg"},
                "Paragraf lepas"
            ]
        }));
        assert_eq!(
            article.sections,
            vec![
                ContentBlock {
                    heading: "Pembuka".into(),
                    body: "Halo".into(),
                    image: String::new()
                },
                ContentBlock {
                    heading: "Bagian 2".into(),
                    body: "Tanpa judul".into(),
                    image: "x.jpg".into()
                },
                ContentBlock {
                    heading: "Bagian 3".into(),
                    body: "Paragraf lepas".into(),
                    image: String::new()
                },
            ]
        );
    }

    #[test]
    fn block_array_under_content_leaves_text_empty() {
        let article = Article::from_value(&json!({"content": [{"body": "a"}]}));
        assert_eq!(article.content, "");
        assert_eq!(article.sections.len(), 1);
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(Article::from_value(&json!({"id": "a1", "cover_image": "c.jpg"}))).unwrap();
        assert_eq!(value["coverImage"], "c.jpg");
        assert_eq!(value["isPublished"], false);
        assert_eq!(value["displayDate"], "");
    }
}
