//! # Airtable Record Store
//!
//! Implements `RecordStore` over the Airtable REST API. Records carry two fields,
//! `provider` and `details`, and are addressed by (base id, table name) with a bearer API key.
//!
//! Credentials are checked per call. Without them, listing returns nothing and
//! writes fail with a configuration error so the caller can degrade.
//!
//! `upsert` is a lookup followed by a PATCH or a POST. Nothing makes the pair atomic:
//! two admins setting the same provider at the same moment can both miss the lookup
//! and create two records. Duplicates are left for an operator to clean up.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};

use crate::domain::config::StoreConfig;
use crate::domain::error::{Error, Result};
use crate::domain::traits::RecordStore;
use crate::domain::types::{PaymentRecord, Provider};
use crate::strings::logs;

#[derive(Debug, Serialize, Deserialize, Default)]
struct RecordFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AirtableRecord {
    id: String,
    #[serde(default)]
    fields: RecordFields,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    records: Vec<AirtableRecord>,
}

#[derive(Debug, Serialize)]
struct WriteRequest {
    fields: RecordFields,
}

struct Credentials<'a> {
    api_key: &'a str,
    base_id: &'a str,
    table_name: &'a str,
}

pub struct AirtableStore {
    http: Client,
    api_base: String,
    api_key: Option<String>,
    base_id: Option<String>,
    table_name: Option<String>,
    view: String,
    page_size: u32,
}

impl AirtableStore {
    pub fn new(config: &StoreConfig) -> Self {
        let present = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());
        Self {
            http: Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: present(&config.api_key),
            base_id: present(&config.base_id),
            table_name: present(&config.table_name),
            view: config.view.clone(),
            page_size: config.page_size,
        }
    }

    fn credentials(&self) -> Result<Credentials<'_>> {
        let missing: Vec<&str> = [
            ("api key", self.api_key.is_none()),
            ("base id", self.base_id.is_none()),
            ("table name", self.table_name.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (&self.api_key, &self.base_id, &self.table_name) {
            (Some(api_key), Some(base_id), Some(table_name)) => Ok(Credentials {
                api_key,
                base_id,
                table_name,
            }),
            _ => Err(Error::configuration(format!(
                "airtable {}",
                missing.join(", ")
            ))),
        }
    }

    /// `{api_base}/{base_id}/{table}`, with the table name percent-encoded.
    fn table_url(&self, creds: &Credentials<'_>, record_id: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| Error::configuration(format!("airtable api base: {}", e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::configuration("airtable api base cannot be a base URL"))?;
            segments.pop_if_empty().push(creds.base_id).push(creds.table_name);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn find_record_id(&self, creds: &Credentials<'_>, provider: Provider) -> Result<Option<String>> {
        let formula = format!("{{provider}} = '{}'", provider.as_str());
        let response = self
            .http
            .get(self.table_url(creds, None)?)
            .bearer_auth(creds.api_key)
            .query(&[("filterByFormula", formula.as_str()), ("maxRecords", "1")])
            .send()
            .await
            .map_err(|e| Error::transport("airtable find", e))?;

        let list: ListResponse = check(response, "airtable find")
            .await?
            .json()
            .await
            .map_err(|e| Error::transport("airtable find", e))?;

        Ok(list.records.into_iter().next().map(|r| r.id))
    }

    fn write_body(provider: Provider, details: &str) -> WriteRequest {
        WriteRequest {
            fields: RecordFields {
                provider: Some(provider.as_str().to_string()),
                details: Some(details.to_string()),
            },
        }
    }
}

/// Turns a non-success response into a transport error carrying status and body.
async fn check(response: Response, context: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::transport(context, format!("HTTP {}: {}", status, body)))
}

#[async_trait]
impl RecordStore for AirtableStore {
    async fn list_all(&self) -> Result<Vec<PaymentRecord>> {
        let creds = match self.credentials() {
            Ok(creds) => creds,
            Err(e) => {
                tracing::debug!("Listing payments from unconfigured store: {}", e);
                return Ok(Vec::new());
            }
        };

        let page_size = self.page_size.to_string();
        let response = self
            .http
            .get(self.table_url(&creds, None)?)
            .bearer_auth(creds.api_key)
            .query(&[("maxRecords", page_size.as_str()), ("view", self.view.as_str())])
            .send()
            .await
            .map_err(|e| Error::transport("airtable list", e))?;

        let list: ListResponse = check(response, "airtable list")
            .await?
            .json()
            .await
            .map_err(|e| Error::transport("airtable list", e))?;

        let records = list
            .records
            .into_iter()
            .filter_map(|r| {
                let provider = r.fields.provider.as_deref().and_then(Provider::from_str);
                match provider {
                    Some(provider) => Some(PaymentRecord::new(
                        provider,
                        r.fields.details.unwrap_or_default(),
                    )),
                    None => {
                        tracing::warn!("{}", logs::skipped_record(&r.id));
                        None
                    }
                }
            })
            .collect();
        Ok(records)
    }

    async fn upsert(&self, provider: Provider, details: &str) -> Result<()> {
        let creds = self.credentials()?;
        let body = Self::write_body(provider, details);

        let response = match self.find_record_id(&creds, provider).await? {
            Some(id) => {
                tracing::debug!("Updating airtable record {} for {}", id, provider);
                self.http
                    .patch(self.table_url(&creds, Some(&id))?)
                    .bearer_auth(creds.api_key)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| Error::transport("airtable update", e))?
            }
            None => {
                tracing::debug!("Creating airtable record for {}", provider);
                self.http
                    .post(self.table_url(&creds, None)?)
                    .bearer_auth(creds.api_key)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|e| Error::transport("airtable create", e))?
            }
        };

        check(response, "airtable write").await?;
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}
