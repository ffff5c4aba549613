use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};

use lexstore_core::{
    backend::{
        AttributeInfo, BackendBuilder, CollectionInfo, DocumentBackend, NumericAttribute,
        StringAttribute,
    },
    config::BackendConfig,
    document::{DocumentId, RawDocument},
    error::{DocumentStoreError, DocumentStoreResult},
};

use crate::error::{self, Target};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

/// Items requested per page when listing.
const PAGE_SIZE: usize = 100;

/// One page of a list response.
trait ListPage: DeserializeOwned {
    type Item;

    fn total(&self) -> usize;

    fn into_items(self) -> Vec<Self::Item>;
}

#[derive(Deserialize)]
struct CollectionList {
    total: usize,
    collections: Vec<CollectionInfo>,
}

impl ListPage for CollectionList {
    type Item = CollectionInfo;

    fn total(&self) -> usize {
        self.total
    }

    fn into_items(self) -> Vec<CollectionInfo> {
        self.collections
    }
}

#[derive(Deserialize)]
struct AttributeList {
    total: usize,
    attributes: Vec<AttributeInfo>,
}

impl ListPage for AttributeList {
    type Item = AttributeInfo;

    fn total(&self) -> usize {
        self.total
    }

    fn into_items(self) -> Vec<AttributeInfo> {
        self.attributes
    }
}

#[derive(Clone)]
pub struct AppwriteBackend {
    client: Client,
    endpoint: Url,
    project_id: String,
    api_key: String,
    database_id: String,
}

impl std::fmt::Debug for AppwriteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppwriteBackend")
            .field("endpoint", &self.endpoint.as_str())
            .field("project_id", &self.project_id)
            .field("api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .finish()
    }
}

impl AppwriteBackend {
    pub fn builder(
        endpoint: &str,
        project_id: &str,
        api_key: &str,
        database_id: &str,
    ) -> AppwriteBackendBuilder {
        AppwriteBackendBuilder::new(endpoint, project_id, api_key, database_id)
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Builds `{endpoint}/databases/{database}/{segments...}`, escaping every segment.
    fn url(&self, segments: &[&str]) -> DocumentStoreResult<Url> {
        let mut url = self.endpoint.clone();

        url.path_segments_mut()
            .map_err(|_| {
                DocumentStoreError::Configuration(format!("endpoint {} cannot be a base URL", self.endpoint))
            })?
            .pop_if_empty()
            .extend(["databases", self.database_id.as_str()])
            .extend(segments);

        Ok(url)
    }

    /// Sends one request and returns the response if it succeeded.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        target: Target<'_>,
    ) -> DocumentStoreResult<Response> {
        tracing::debug!(method = %method, url = %url, "sending appwrite request");

        let mut request = self
            .client
            .request(method, url)
            .header(PROJECT_HEADER, &self.project_id)
            .header(KEY_HEADER, &self.api_key);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(error::transport)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.map_err(error::transport)?;

        Err(error::from_response(status.as_u16(), &text, target))
    }

    async fn send_json<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        target: Target<'_>,
    ) -> DocumentStoreResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(method, url, body, target)
            .await?
            .json::<T>()
            .await
            .map_err(error::transport)
    }

    async fn document(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        target: Target<'_>,
    ) -> DocumentStoreResult<RawDocument> {
        RawDocument::from_wire(self.send_json::<Map<String, Value>, Value>(method, url, body, target).await?)
    }

    /// Fetches every page of a list endpoint using limit and offset queries.
    async fn list_all<P: ListPage>(&self, segments: &[&str], target: Target<'_>) -> DocumentStoreResult<Vec<P::Item>> {
        let mut items = Vec::new();

        loop {
            let mut url = self.url(segments)?;
            url.query_pairs_mut()
                .append_pair("queries[]", &json!({ "method": "limit", "values": [PAGE_SIZE] }).to_string())
                .append_pair("queries[]", &json!({ "method": "offset", "values": [items.len()] }).to_string());

            let page = self.send_json::<P, Value>(Method::GET, url, None, target).await?;
            let total = page.total();
            let batch = page.into_items();

            if batch.is_empty() {
                break;
            }

            items.extend(batch);

            if items.len() >= total {
                break;
            }
        }

        Ok(items)
    }

    async fn create_attribute<A: Serialize>(
        &self,
        collection: &str,
        kind: &str,
        attribute: &A,
    ) -> DocumentStoreResult<()> {
        let url = self.url(&["collections", collection, "attributes", kind])?;
        self.send(Method::POST, url, Some(attribute), Target::collection(collection))
            .await?;

        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for AppwriteBackend {
    async fn create_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        let url = self.url(&["collections", collection, "documents"])?;
        let body = json!({ "documentId": id, "data": fields });

        self.document(Method::POST, url, Some(&body), Target::collection(collection))
            .await
    }

    async fn get_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<RawDocument> {
        let url = self.url(&["collections", collection, "documents", id.as_str()])?;

        self.document(Method::GET, url, None, Target::document(collection, id))
            .await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> DocumentStoreResult<RawDocument> {
        let url = self.url(&["collections", collection, "documents", id.as_str()])?;
        let body = json!({ "data": fields });

        self.document(Method::PATCH, url, Some(&body), Target::document(collection, id))
            .await
    }

    async fn delete_document(&self, collection: &str, id: &DocumentId) -> DocumentStoreResult<()> {
        let url = self.url(&["collections", collection, "documents", id.as_str()])?;

        self.send::<Value>(Method::DELETE, url, None, Target::document(collection, id))
            .await?;

        Ok(())
    }

    async fn list_collections(&self) -> DocumentStoreResult<Vec<CollectionInfo>> {
        self.list_all::<CollectionList>(&["collections"], Target::database())
            .await
    }

    async fn create_collection(&self, id: &str, name: &str) -> DocumentStoreResult<CollectionInfo> {
        let url = self.url(&["collections"])?;
        let body = json!({ "collectionId": id, "name": name });

        self.send_json(Method::POST, url, Some(&body), Target::database())
            .await
    }

    async fn list_attributes(&self, collection: &str) -> DocumentStoreResult<Vec<AttributeInfo>> {
        self.list_all::<AttributeList>(&["collections", collection, "attributes"], Target::collection(collection))
            .await
    }

    async fn create_string_attribute(
        &self,
        collection: &str,
        attribute: StringAttribute,
    ) -> DocumentStoreResult<()> {
        self.create_attribute(collection, "string", &attribute).await
    }

    async fn create_integer_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        self.create_attribute(collection, "integer", &attribute).await
    }

    async fn create_float_attribute(
        &self,
        collection: &str,
        attribute: NumericAttribute,
    ) -> DocumentStoreResult<()> {
        self.create_attribute(collection, "float", &attribute).await
    }
}

pub struct AppwriteBackendBuilder {
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    client: Option<Client>,
}

impl AppwriteBackendBuilder {
    pub fn new(endpoint: &str, project_id: &str, api_key: &str, database_id: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            project_id: project_id.to_string(),
            api_key: api_key.to_string(),
            database_id: database_id.to_string(),
            client: None,
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.endpoint, &config.project_id, &config.api_key, &config.database_id)
    }

    /// Uses a preconfigured HTTP client instead of a default one.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }
}

#[async_trait]
impl BackendBuilder for AppwriteBackendBuilder {
    type Backend = AppwriteBackend;

    async fn build(self) -> DocumentStoreResult<Self::Backend> {
        let endpoint = Url::parse(&self.endpoint).map_err(|e| {
            DocumentStoreError::Configuration(format!("invalid endpoint {}: {e}", self.endpoint))
        })?;

        if !matches!(endpoint.scheme(), "http" | "https") || endpoint.cannot_be_a_base() {
            return Err(DocumentStoreError::Configuration(format!(
                "endpoint {} must be an http(s) URL",
                self.endpoint
            )));
        }

        for (name, value) in [
            ("project id", &self.project_id),
            ("api key", &self.api_key),
            ("database id", &self.database_id),
        ] {
            if value.trim().is_empty() {
                return Err(DocumentStoreError::Configuration(format!("{name} must not be empty")));
            }
        }

        Ok(AppwriteBackend {
            client: self.client.unwrap_or_default(),
            endpoint,
            project_id: self.project_id,
            api_key: self.api_key,
            database_id: self.database_id,
        })
    }
}
