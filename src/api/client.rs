//! HTTP client for the remote ticketing API
//!
//! Every request carries the bearer token of the active session, every
//! response is unwrapped from its optional `data` envelope, and every
//! failure is mapped into a domain error. A 401 invalidates the session
//! wherever it happens.

use std::time::{Duration, Instant};
use reqwest::{Client, Method, RequestBuilder};
use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;
use crate::config::ApiConfig;
use crate::models::{list_from_api, unwrap_envelope, FileUpload, FromApi};
use crate::state::SessionContext;
use crate::utils::errors::{ApiError, Result, TicketdeskError};
use crate::utils::helpers::generate_uuid;
use crate::utils::logging::{log_api_error, log_api_request, log_api_response};

/// Request payload
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Json(Value),
    /// `multipart/form-data` text fields plus an optional named file part
    Multipart {
        fields: Vec<(String, String)>,
        file: Option<(String, FileUpload)>,
    },
}

/// One concrete request. Kept as plain data so fallback chains can
/// rebuild and resend it.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Body,
    /// Sent without the bearer token; a 401 is an ordinary rejection
    pub anonymous: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
            anonymous: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn multipart(mut self, fields: Vec<(String, String)>, file: Option<(String, FileUpload)>) -> Self {
        self.body = Body::Multipart { fields, file };
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionContext) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(TicketdeskError::Http)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Absolute URL for a resource path such as `ScheduleEvent/4`
    pub fn url(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path.trim_start_matches('/')))?)
    }

    /// Send one request and return its unwrapped JSON body
    /// (`Value::Null` for empty bodies)
    pub async fn send(&self, request: &ApiRequest) -> Result<Value> {
        let request_id = generate_uuid();
        let url = self.url(&request.path)?;
        log_api_request(&request_id, request.method.as_str(), url.as_str());

        let builder = self.build(request, url)?;
        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            let error = map_transport_error(e);
            log_api_error(&request.path, &error.to_string(), Some(&request_id));
            error
        })?;

        let status = response.status().as_u16();
        log_api_response(&request_id, status, started.elapsed().as_millis() as u64);

        let text = response.text().await.map_err(map_transport_error)?;

        if status == 401 && !request.anonymous {
            self.session.invalidate();
            return Err(TicketdeskError::SessionExpired);
        }

        if !(200..300).contains(&status) {
            return Err(ApiError::from_response(status, &text).into());
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(unwrap_envelope(value)),
            Err(_) => Ok(Value::String(text)),
        }
    }

    /// Try each variant in order. The next variant is attempted only when
    /// the previous one was rejected with 404 or 405; when all of them are,
    /// the last rejection is returned.
    pub async fn send_first(&self, variants: &[ApiRequest]) -> Result<Value> {
        let mut last = None;

        for (attempt, request) in variants.iter().enumerate() {
            match self.send(request).await {
                Err(TicketdeskError::Api(e)) if e.is_variant_rejection() => {
                    debug!(
                        attempt = attempt + 1,
                        method = %request.method,
                        path = %request.path,
                        status = ?e.status(),
                        "Request variant rejected, trying next"
                    );
                    last = Some(e);
                }
                outcome => return outcome,
            }
        }

        Err(match last {
            Some(e) => e.into(),
            None => ApiError::InvalidResponse("no request variants to send".to_string()).into(),
        })
    }

    pub async fn fetch<T: FromApi>(&self, request: &ApiRequest) -> Result<T> {
        let value = self.send(request).await?;
        T::from_api(&value)
    }

    pub async fn fetch_list<T: FromApi>(&self, request: &ApiRequest) -> Result<Vec<T>> {
        let value = self.send(request).await?;
        list_from_api(&value)
    }

    fn build(&self, request: &ApiRequest, url: Url) -> Result<RequestBuilder> {
        let mut builder = self.http.request(request.method.clone(), url);

        if !request.anonymous {
            if let Some(token) = self.session.token() {
                builder = builder.bearer_auth(token);
            }
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart { fields, file } => {
                let mut form = Form::new();
                for (name, value) in fields {
                    form = form.text(name.clone(), value.clone());
                }
                if let Some((name, upload)) = file {
                    form = form.part(name.clone(), upload.clone().into_part()?);
                }
                builder.multipart(form)
            }
        };

        Ok(builder)
    }
}

fn map_transport_error(e: reqwest::Error) -> TicketdeskError {
    if e.is_timeout() {
        ApiError::Timeout.into()
    } else if e.is_connect() {
        ApiError::Unavailable.into()
    } else {
        TicketdeskError::Http(e)
    }
}
