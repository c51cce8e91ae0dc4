use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use tracing::debug;

use crate::config::FormsConfig;
use crate::models::image::ImageFile;
use crate::models::product::{Category, ProductDraft, ProductRecord};

const CATEGORY_PATH: &str = "api/category";
const PRODUCTS_PATH: &str = "api/products";
const IMAGES_PATH: &str = "images/";

/// HTTP client for the product backend: category list, product records,
/// and multipart create/update.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ProductStoreClient {
    http: Client,
    base_url: Url,
}

/// Multipart body for create and update requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPayload {
    pub name: String,
    pub price: String,
    pub quantity: String,
    pub category_id: String,
    pub description: String,
    pub seller_id: String,
    /// New image to upload. `None` on update keeps the stored image.
    pub image: Option<ImageFile>,
}

impl ProductPayload {
    pub fn from_draft(draft: &ProductDraft) -> Self {
        Self {
            name: draft.name.clone(),
            price: draft.price.trim().to_string(),
            quantity: draft.quantity.trim().to_string(),
            category_id: draft.category_id.clone(),
            description: draft.description.clone(),
            seller_id: draft.seller_id.clone(),
            image: draft.image.clone(),
        }
    }

    /// Build the multipart form. Keys match what the backend reads.
    pub fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new();

        if let Some(image) = self.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)?;
            form = form.part("pic", part);
        }

        Ok(form
            .text("pname", self.name)
            .text("price", self.price)
            .text("qty", self.quantity)
            .text("pcat", self.category_id)
            .text("descr", self.description)
            .text("sellerId", self.seller_id))
    }
}

impl ProductStoreClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        // A base without a trailing slash would lose its last segment on join.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::Config(format!("{}: {}", base_url, e)))?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("product-forms/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &FormsConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Config(format!("{}: {}", path, e)))
    }

    fn product_url(&self, product_id: &str) -> Result<Url, ApiError> {
        self.endpoint(&format!("{}/{}", PRODUCTS_PATH, product_id))
    }

    /// Public URL of a stored product image.
    pub fn image_url(&self, photo: &str) -> Result<Url, ApiError> {
        self.endpoint(&format!("{}{}", IMAGES_PATH, photo))
    }

    /// GET api/category — ordered list of selectable categories.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint(CATEGORY_PATH)?;
        debug!(%url, "Fetching categories");

        let response = self.http.get(url).send().await?;
        let categories = check_status(response).await?.json().await?;
        Ok(categories)
    }

    /// GET api/products/{id} — an existing product record.
    pub async fn fetch_product(&self, product_id: &str) -> Result<ProductRecord, ApiError> {
        let url = self.product_url(product_id)?;
        debug!(%url, "Fetching product record");

        let response = self.http.get(url).send().await?;
        let record = check_status(response).await?.json().await?;
        Ok(record)
    }

    /// POST api/products — create a product from a multipart body.
    pub async fn create_product(&self, payload: ProductPayload) -> Result<(), ApiError> {
        let url = self.endpoint(PRODUCTS_PATH)?;
        let form = payload.into_form()?;

        let response = self.http.post(url).multipart(form).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// PUT api/products/{id} — update an existing product.
    pub async fn update_product(
        &self,
        product_id: &str,
        payload: ProductPayload,
    ) -> Result<(), ApiError> {
        let url = self.product_url(product_id)?;
        let form = payload.into_form()?;

        let response = self.http.put(url).multipart(form).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn non-2xx responses into [`ApiError::Status`], keeping the body for logs.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid backend URL: {0}")]
    Config(String),
}
