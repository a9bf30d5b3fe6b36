use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use clap::Args;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::time::Duration;

use super::{Document, DocumentStore, FieldValue, Fields, validate_document_id};

pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const LIST_PAGE_SIZE: u32 = 300;

/// Connection settings for the hosted Firestore project
#[derive(Args, Debug, Clone)]
pub struct FirestoreConfig {
    #[clap(long, env)]
    pub firestore_project_id: Option<String>,
    /// Web API key, sent as the `key` query parameter
    #[clap(long, env, hide_env_values = true)]
    pub firestore_api_key: Option<String>,
    #[clap(long, env, default_value = "(default)")]
    pub firestore_database_id: String,
    #[clap(long, env, default_value = DEFAULT_BASE_URL)]
    pub firestore_base_url: String,
    /// host:port of a local emulator, overrides the base url
    #[clap(long, env)]
    pub firestore_emulator_host: Option<String>,
    #[clap(long, env, hide_env_values = true)]
    pub firestore_bearer_token: Option<String>,
    #[clap(long, env, default_value_t = 10)]
    pub store_timeout_secs: u64,
}

impl FirestoreConfig {
    fn effective_base_url(&self) -> String {
        match &self.firestore_emulator_host {
            Some(host) => format!("http://{}/v1", host),
            None => self.firestore_base_url.clone(),
        }
    }
}

#[derive(Deserialize)]
struct WireDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<WireDocument>,
    next_page_token: Option<String>,
}

#[derive(Serialize)]
struct WriteBody {
    fields: Map<String, Value>,
}

/// Firestore REST v1 client
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: Client,
    documents_url: Url,
    api_key: Option<String>,
    bearer_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig) -> Result<Self> {
        let project_id = config
            .firestore_project_id
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| anyhow!("FIRESTORE_PROJECT_ID must be set to use the firestore store"))?;

        let mut documents_url = Url::parse(&config.effective_base_url())?;
        documents_url
            .path_segments_mut()
            .map_err(|_| anyhow!("firestore base url cannot hold a path"))?
            .pop_if_empty()
            .extend([
                "projects",
                project_id,
                "databases",
                config.firestore_database_id.as_str(),
                "documents",
            ]);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.store_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            documents_url,
            api_key: config.firestore_api_key.clone(),
            bearer_token: config.firestore_bearer_token.clone(),
        })
    }

    fn url_for(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.documents_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("firestore base url cannot hold a path"))?
            .extend(segments);
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn check_status(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    bail!("firestore {} failed with {}: {}", action, status, body)
}

fn encode_double(v: f64) -> Value {
    if v.is_nan() {
        Value::from("NaN")
    } else if v == f64::INFINITY {
        Value::from("Infinity")
    } else if v == f64::NEG_INFINITY {
        Value::from("-Infinity")
    } else {
        json!(v)
    }
}

fn decode_double(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            other => other.parse().ok(),
        },
        _ => None,
    }
}

/// Encode a field into the Firestore typed-value JSON form
pub fn encode_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::String(s) => json!({ "stringValue": s }),
        FieldValue::Double(v) => json!({ "doubleValue": encode_double(*v) }),
        FieldValue::Integer(v) => json!({ "integerValue": v.to_string() }),
        FieldValue::Boolean(b) => json!({ "booleanValue": b }),
        FieldValue::Timestamp(t) => json!({ "timestampValue": t }),
        FieldValue::Null => json!({ "nullValue": null }),
        FieldValue::Other(v) => v.clone(),
    }
}

pub fn decode_value(value: &Value) -> FieldValue {
    let Some(obj) = value.as_object() else {
        return FieldValue::Other(value.clone());
    };

    if let Some(s) = obj.get("stringValue").and_then(Value::as_str) {
        return FieldValue::String(s.to_string());
    }
    if let Some(v) = obj.get("doubleValue").and_then(decode_double) {
        return FieldValue::Double(v);
    }
    if let Some(raw) = obj.get("integerValue") {
        let parsed = match raw {
            Value::String(s) => s.parse::<i64>().ok(),
            other => other.as_i64(),
        };
        if let Some(v) = parsed {
            return FieldValue::Integer(v);
        }
    }
    if let Some(b) = obj.get("booleanValue").and_then(Value::as_bool) {
        return FieldValue::Boolean(b);
    }
    if let Some(t) = obj.get("timestampValue").and_then(Value::as_str) {
        return FieldValue::Timestamp(t.to_string());
    }
    if obj.contains_key("nullValue") {
        return FieldValue::Null;
    }
    FieldValue::Other(value.clone())
}

fn encode_fields(fields: &Fields) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect()
}

fn into_document(wire: WireDocument) -> Document {
    let id = wire
        .name
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let fields = wire
        .fields
        .iter()
        .map(|(k, v)| (k.clone(), decode_value(v)))
        .collect();
    Document::new(id, fields)
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn add_document(&self, collection: &str, fields: Fields) -> Result<String> {
        let url = self.url_for(&[collection])?;
        let response = self
            .request(Method::POST, url)
            .json(&WriteBody {
                fields: encode_fields(&fields),
            })
            .send()
            .await?;

        let created = check_status(response, "create")
            .await?
            .json::<WireDocument>()
            .await?;
        Ok(into_document(created).id)
    }

    async fn set_document(&self, collection: &str, id: &str, fields: Fields) -> Result<()> {
        validate_document_id(id)?;
        // PATCH without an update mask replaces the whole document
        let url = self.url_for(&[collection, id])?;
        let response = self
            .request(Method::PATCH, url)
            .json(&WriteBody {
                fields: encode_fields(&fields),
            })
            .send()
            .await?;

        check_status(response, "set").await?;
        Ok(())
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        validate_document_id(id)?;
        let url = self.url_for(&[collection, id])?;
        let response = self.request(Method::GET, url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let doc = check_status(response, "get")
            .await?
            .json::<WireDocument>()
            .await?;
        Ok(Some(into_document(doc)))
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.url_for(&[collection])?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", &LIST_PAGE_SIZE.to_string());
                if let Some(token) = &page_token {
                    query.append_pair("pageToken", token);
                }
            }

            let response = self.request(Method::GET, url).send().await?;
            let page = check_status(response, "list")
                .await?
                .json::<ListDocumentsResponse>()
                .await?;

            documents.extend(page.documents.into_iter().map(into_document));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(documents)
    }

    fn backend_name(&self) -> &'static str {
        "firestore"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Query, State},
        http::{HeaderMap, Uri},
        response::{IntoResponse, Response as AxumResponse},
        routing::any,
    };
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn config() -> FirestoreConfig {
        FirestoreConfig {
            firestore_project_id: Some("ledger-demo".to_string()),
            firestore_api_key: Some("k3y".to_string()),
            firestore_database_id: "(default)".to_string(),
            firestore_base_url: DEFAULT_BASE_URL.to_string(),
            firestore_emulator_host: None,
            firestore_bearer_token: None,
            store_timeout_secs: 5,
        }
    }

    #[test]
    fn test_document_urls() -> Result<()> {
        let store = FirestoreStore::new(&config())?;
        let url = store.url_for(&["budgets", "Eating out"])?;
        assert_eq!(
            url.as_str(),
            "https://firestore.googleapis.com/v1/projects/ledger-demo/databases/(default)/documents/budgets/Eating%20out?key=k3y"
        );
        Ok(())
    }

    #[test]
    fn test_emulator_host_overrides_base_url() -> Result<()> {
        let mut cfg = config();
        cfg.firestore_emulator_host = Some("localhost:8081".to_string());
        cfg.firestore_api_key = None;
        let store = FirestoreStore::new(&cfg)?;
        let url = store.url_for(&["expenses"])?;
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/v1/projects/ledger-demo/databases/(default)/documents/expenses"
        );
        Ok(())
    }

    #[test]
    fn test_missing_project_is_rejected() {
        let mut cfg = config();
        cfg.firestore_project_id = None;
        assert!(FirestoreStore::new(&cfg).is_err());
    }

    #[test]
    fn test_non_finite_doubles_use_string_form() {
        assert_eq!(
            encode_value(&FieldValue::Double(f64::NAN)),
            json!({ "doubleValue": "NaN" })
        );
        assert_eq!(
            encode_value(&FieldValue::Double(12.5)),
            json!({ "doubleValue": 12.5 })
        );

        match decode_value(&json!({ "doubleValue": "NaN" })) {
            FieldValue::Double(v) => assert!(v.is_nan()),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            decode_value(&json!({ "doubleValue": "-Infinity" })),
            FieldValue::Double(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_decode_value_kinds() {
        assert_eq!(
            decode_value(&json!({ "stringValue": "Food" })),
            FieldValue::String("Food".to_string())
        );
        assert_eq!(
            decode_value(&json!({ "integerValue": "200" })),
            FieldValue::Integer(200)
        );
        assert_eq!(
            decode_value(&json!({ "booleanValue": true })),
            FieldValue::Boolean(true)
        );
        assert_eq!(decode_value(&json!({ "nullValue": null })), FieldValue::Null);
        let map = json!({ "mapValue": { "fields": {} } });
        assert_eq!(decode_value(&map), FieldValue::Other(map.clone()));
    }

    #[test]
    fn test_wire_document_id_from_name() -> Result<()> {
        let wire: WireDocument = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/expenses/a1B2c3",
            "fields": {
                "category": { "stringValue": "Food" },
                "amount": { "doubleValue": 12.5 }
            },
            "createTime": "2026-10-16T10:00:00Z"
        }))?;
        let doc = into_document(wire);
        assert_eq!(doc.id, "a1B2c3");
        assert_eq!(doc.field("amount"), Some(&FieldValue::Double(12.5)));
        Ok(())
    }

    #[test]
    fn test_empty_list_response() -> Result<()> {
        let page: ListDocumentsResponse = serde_json::from_value(json!({}))?;
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
        Ok(())
    }

    const DOCS_PREFIX: &str = "projects/ledger-demo/databases/(default)/documents";

    #[derive(Debug, Clone)]
    struct SeenRequest {
        method: Method,
        path: String,
        query: HashMap<String, String>,
        authorization: Option<String>,
        body: Value,
    }

    /// Local stand-in for the Firestore REST endpoint
    #[derive(Clone, Default)]
    struct FakeFirestore {
        seen: Arc<Mutex<Vec<SeenRequest>>>,
    }

    fn wire_doc(relative: &str, fields: Value) -> Value {
        json!({ "name": format!("{}/{}", DOCS_PREFIX, relative), "fields": fields })
    }

    async fn fake_firestore(
        State(fake): State<FakeFirestore>,
        method: Method,
        uri: Uri,
        Query(query): Query<HashMap<String, String>>,
        headers: HeaderMap,
        body: String,
    ) -> AxumResponse {
        let path = uri.path().to_string();
        let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        fake.seen.lock().await.push(SeenRequest {
            method: method.clone(),
            path: path.clone(),
            query: query.clone(),
            authorization,
            body: body.clone(),
        });

        let relative = path
            .split_once("/documents/")
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_default();

        if relative == "broken" {
            return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
        }
        if method == Method::POST && relative == "expenses" {
            return Json(wire_doc("expenses/newId123", body["fields"].clone())).into_response();
        }
        if method == Method::PATCH && relative.starts_with("budgets/") {
            return Json(wire_doc(&relative, body["fields"].clone())).into_response();
        }
        if method == Method::GET && relative == "budgets/Food" {
            return Json(wire_doc(
                "budgets/Food",
                json!({ "amount": { "integerValue": "200" } }),
            ))
            .into_response();
        }
        if method == Method::GET && relative == "expenses" {
            let page = match query.get("pageToken").map(String::as_str) {
                None => json!({
                    "documents": [wire_doc("expenses/a1", json!({
                        "category": { "stringValue": "Food" },
                        "amount": { "doubleValue": 12.5 },
                        "date": { "stringValue": "10/16/2026" }
                    }))],
                    "nextPageToken": "page-2"
                }),
                Some("page-2") => json!({
                    "documents": [wire_doc("expenses/b2", json!({
                        "category": { "stringValue": "Rent" },
                        "amount": { "doubleValue": "NaN" },
                        "date": { "stringValue": "10/16/2026" }
                    }))]
                }),
                Some(_) => return StatusCode::BAD_REQUEST.into_response(),
            };
            return Json(page).into_response();
        }

        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "code": 404, "status": "NOT_FOUND" } })),
        )
            .into_response()
    }

    async fn spawn_fake() -> (FakeFirestore, FirestoreStore) {
        let fake = FakeFirestore::default();
        let app = Router::new()
            .route("/v1/*rest", any(fake_firestore))
            .with_state(fake.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut cfg = config();
        cfg.firestore_base_url = format!("http://{}/v1", addr);
        cfg.firestore_bearer_token = Some("t0ken".to_string());
        let store = FirestoreStore::new(&cfg).unwrap();
        (fake, store)
    }

    fn expense_fields() -> Fields {
        let mut fields = Fields::new();
        fields.insert("category".to_string(), FieldValue::String("Food".to_string()));
        fields.insert("amount".to_string(), FieldValue::Double(f64::NAN));
        fields
    }

    #[tokio::test]
    async fn test_add_document_posts_fields_and_returns_new_id() -> Result<()> {
        let (fake, store) = spawn_fake().await;

        let id = store.add_document("expenses", expense_fields()).await?;
        assert_eq!(id, "newId123");

        let seen = fake.seen.lock().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].path, format!("/v1/{}/expenses", DOCS_PREFIX));
        assert_eq!(seen[0].query.get("key").map(String::as_str), Some("k3y"));
        assert_eq!(seen[0].authorization.as_deref(), Some("Bearer t0ken"));
        assert_eq!(
            seen[0].body,
            json!({ "fields": {
                "amount": { "doubleValue": "NaN" },
                "category": { "stringValue": "Food" }
            } })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_set_document_patches_whole_document() -> Result<()> {
        let (fake, store) = spawn_fake().await;

        let mut fields = Fields::new();
        fields.insert("amount".to_string(), FieldValue::Double(150.0));
        store.set_document("budgets", "Eating out", fields).await?;

        let seen = fake.seen.lock().await;
        assert_eq!(seen[0].method, Method::PATCH);
        assert_eq!(seen[0].path, format!("/v1/{}/budgets/Eating%20out", DOCS_PREFIX));
        let mut query_keys: Vec<&String> = seen[0].query.keys().collect();
        query_keys.sort();
        assert_eq!(query_keys, vec!["key"]);
        assert_eq!(
            seen[0].body,
            json!({ "fields": { "amount": { "doubleValue": 150.0 } } })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_get_document_decodes_or_reports_missing() -> Result<()> {
        let (_fake, store) = spawn_fake().await;

        let doc = store.get_document("budgets", "Food").await?;
        let doc = doc.ok_or_else(|| anyhow!("expected budgets/Food"))?;
        assert_eq!(doc.id, "Food");
        assert_eq!(doc.field("amount"), Some(&FieldValue::Integer(200)));

        assert!(store.get_document("budgets", "Travel").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_documents_follows_page_tokens() -> Result<()> {
        let (fake, store) = spawn_fake().await;

        let docs = store.list_documents("expenses").await?;
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "b2"]);
        match docs[1].field("amount") {
            Some(FieldValue::Double(v)) => assert!(v.is_nan()),
            other => panic!("unexpected {:?}", other),
        }

        let seen = fake.seen.lock().await;
        assert_eq!(seen.len(), 2);
        for request in seen.iter() {
            assert_eq!(request.method, Method::GET);
            assert_eq!(request.query.get("pageSize").map(String::as_str), Some("300"));
            assert_eq!(request.query.get("key").map(String::as_str), Some("k3y"));
        }
        assert!(seen[0].query.get("pageToken").is_none());
        assert_eq!(seen[1].query.get("pageToken").map(String::as_str), Some("page-2"));
        Ok(())
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (_fake, store) = spawn_fake().await;

        let err = store.list_documents("broken").await.unwrap_err().to_string();
        assert!(err.contains("500"), "{}", err);
        assert!(err.contains("boom"), "{}", err);

        assert!(store.add_document("broken", expense_fields()).await.is_err());
        assert!(store.list_documents("missing").await.is_err());
    }
}
