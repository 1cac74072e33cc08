//! # Item Endpoints
//!
//! Listing queries, item details, categories and the multipart item submission.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use shared::{
    CategoriesPayload, Category, CreatedItem, CreatedItemPayload, Item, ItemId, ItemPayload,
    ItemQuery, ItemsPayload, ListingType, Reply,
};

use super::client::ApiClient;
use crate::core::error::ApiError;
use crate::core::service::ApiResult;

/// Approved items matching `query`.
#[tracing::instrument(skip(client), fields(query = %query.to_query_string()))]
pub async fn get_items(client: &ApiClient, query: &ItemQuery) -> ApiResult<ItemsPayload> {
    let query_string = query.to_query_string();
    let url = if query_string.is_empty() {
        client.url("/items")
    } else {
        format!("{}?{}", client.url("/items"), query_string)
    };

    let payload = client
        .send::<ItemsPayload>(client.client.get(&url), "get_items")
        .await?
        .data;

    tracing::debug!(count = payload.items.len(), "Items fetched");
    Ok(payload)
}

/// One item. The backend counts this as a view.
pub async fn get_item(client: &ApiClient, id: ItemId) -> ApiResult<Item> {
    client
        .send::<ItemPayload>(client.client.get(client.url(&format!("/items/{id}"))), "get_item")
        .await
        .map(|reply| reply.data.item)
}

pub async fn get_categories(client: &ApiClient) -> ApiResult<Vec<Category>> {
    client
        .send::<CategoriesPayload>(client.client.get(client.url("/categories")), "get_categories")
        .await
        .map(|reply| reply.data.categories)
}

/// Submit a new item for moderation.
#[tracing::instrument(
    skip(client, submission),
    fields(
        title = %submission.title,
        images = submission.images.len(),
        has_bill = submission.bill.is_some()
    )
)]
pub async fn create_item(
    client: &ApiClient,
    submission: ItemSubmission,
) -> ApiResult<Reply<CreatedItem>> {
    let form = submission.into_form()?;

    let request = client.client.post(client.url("/items")).multipart(form);
    let reply = client
        .send::<CreatedItemPayload>(request, "create_item")
        .await?;

    tracing::info!(
        item_id = reply.data.item.id,
        points = reply.data.item.points,
        "Item submitted"
    );
    Ok(reply.map(|payload| payload.item))
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a file from disk, naming the upload after the file.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn into_part(self) -> Result<Part, ApiError> {
        let name = self.file_name.clone();
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| ApiError::InvalidRequest {
                message: format!("Invalid upload {name}: {e}"),
            })
    }
}

/// Content type from the file extension; the backend accepts png, jpg, gif, webp and pdf.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Everything `POST /items` needs: text fields plus raw image and bill payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSubmission {
    pub title: String,
    pub description: String,
    pub category: String,
    pub item_type: String,
    pub size: String,
    pub condition: String,
    pub listing_type: ListingType,
    pub tags: Vec<String>,
    pub images: Vec<UploadFile>,
    pub bill: Option<UploadFile>,
}

impl ItemSubmission {
    /// Text parts in send order; each tag is its own `tags[]` part.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("category", self.category.clone()),
            ("type", self.item_type.clone()),
            ("size", self.size.clone()),
            ("condition", self.condition.clone()),
            ("listing_type", self.listing_type.as_str().to_string()),
        ];
        fields.extend(self.tags.iter().map(|tag| ("tags[]", tag.clone())));
        fields
    }

    fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        for image in self.images {
            form = form.part("images", image.into_part()?);
        }
        if let Some(bill) = self.bill {
            form = form.part("bill", bill.into_part()?);
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ItemSubmission {
        ItemSubmission {
            title: "Denim jacket".to_string(),
            description: "Barely worn".to_string(),
            category: "Outerwear".to_string(),
            item_type: "Casual".to_string(),
            size: "M".to_string(),
            condition: "Excellent".to_string(),
            listing_type: ListingType::Donation,
            tags: vec!["denim".to_string(), "blue".to_string()],
            images: vec![UploadFile::new("front.JPG", vec![1, 2, 3])],
            bill: None,
        }
    }

    #[test]
    fn test_text_fields_repeat_tags_and_send_type_key() {
        let fields = submission().text_fields();
        assert!(fields.contains(&("type", "Casual".to_string())));
        assert!(fields.contains(&("listing_type", "donation".to_string())));
        let tags: Vec<_> = fields
            .iter()
            .filter(|(name, _)| *name == "tags[]")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(tags, vec!["denim", "blue"]);
    }

    #[test]
    fn test_form_builds_with_images_and_bill() {
        let mut submission = submission();
        submission.bill = Some(UploadFile::new("receipt.pdf", vec![9]));
        assert!(submission.into_form().is_ok());
    }

    #[test]
    fn test_bad_content_type_is_reported_as_invalid_request() {
        let mut submission = submission();
        submission.images[0].content_type = "not a mime type".to_string();

        let err = submission.into_form().unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest { .. }));
        assert!(!err.is_network());
        assert!(err.user_message("ignored").starts_with("Invalid upload front.JPG"));
    }

    #[test]
    fn test_content_type_guess() {
        assert_eq!(guess_content_type("front.JPG"), "image/jpeg");
        assert_eq!(guess_content_type("bill.pdf"), "application/pdf");
        assert_eq!(guess_content_type("noext"), "application/octet-stream");
        assert_eq!(UploadFile::new("a.webp", vec![]).content_type, "image/webp");
    }
}
