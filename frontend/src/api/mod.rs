//! Authenticated client for the expenses REST API.
//!
//! [`ApiClient`] owns request construction and response normalization. The
//! actual I/O goes through a [`Transport`]: `gloo-net` in the browser, a
//! recording fake in tests. Calls are never retried; each failure is returned
//! once to the caller.

mod envelope;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use envelope::{DataBody, LoginEnvelope, ResultBody};

use crate::config::Config;
use crate::error::RequestError;
use crate::model::{Category, ExpenseRecord, Goal, GoalPatch, NewExpense, NewGoal, SummaryEntry};
use crate::session::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully built request, ready for a transport to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What a transport hands back: status, declared content type and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.to_ascii_lowercase().contains("json"))
            .unwrap_or(false)
    }
}

/// Successful response body: parsed JSON when the server declared it,
/// otherwise the raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    fn decode<T: DeserializeOwned>(self, status: u16) -> Result<T, RequestError> {
        let decoded = match self {
            Self::Json(value) => serde_json::from_value(value),
            Self::Text(text) => serde_json::from_str(&text),
        };
        decoded.map_err(|e| RequestError::Malformed {
            status,
            reason: e.to_string(),
        })
    }
}

/// Sends one request. Failing to get any response at all is the only error a
/// transport reports; status handling belongs to [`ApiClient`].
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
    token: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(config: &Config, transport: T) -> Self {
        Self {
            transport,
            base_url: config.api_base_url.clone(),
            token: None,
        }
    }

    /// Returns a client that sends `Authorization: Bearer <token>`. A `None`
    /// or empty token sends no Authorization header at all.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn build(&self, method: Method, path_and_query: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path_and_query),
            headers,
            body,
        }
    }

    /// Sends a request and normalizes the outcome.
    pub async fn call(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<String>,
    ) -> Result<(u16, ResponseBody), RequestError> {
        let request = self.build(method, path_and_query, body);
        log::debug!("{} {}", method.as_str(), path_and_query);

        let response = self.transport.send(request).await.map_err(|reason| {
            log::warn!("{} {} failed: {reason}", method.as_str(), path_and_query);
            RequestError::Network { reason }
        })?;

        if !response.ok() {
            log::warn!(
                "{} {} returned {}",
                method.as_str(),
                path_and_query,
                response.status
            );
            return Err(RequestError::from_status(response.status, &response.body));
        }

        let status = response.status;
        if response.is_json() {
            let value = if response.body.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&response.body).map_err(|e| RequestError::Malformed {
                    status,
                    reason: e.to_string(),
                })?
            };
            Ok((status, ResponseBody::Json(value)))
        } else {
            Ok((status, ResponseBody::Text(response.body)))
        }
    }

    async fn call_json<B, R>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R, RequestError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = body.map(encode).transpose()?;
        let (status, body) = self.call(method, path, body).await?;
        body.decode(status)
    }

    // ============= Authentication =============

    pub async fn register(&self, email: &str, password: &str) -> Result<(), RequestError> {
        let body = encode(&AuthBody { email, passwd: password })?;
        self.call(Method::Post, "/authentication/register", Some(body)).await?;
        Ok(())
    }

    /// Returns the account's credentials. Persisting them is left to
    /// [`SessionController::login`](crate::session::SessionController::login).
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, RequestError> {
        let body = AuthBody { email, passwd: password };
        let (status, body) = self
            .call(Method::Post, "/authentication/login", Some(encode(&body)?))
            .await?;
        let envelope: LoginEnvelope = body.decode(status)?;
        envelope.into_credentials().ok_or(RequestError::Malformed {
            status,
            reason: "login response has an empty token or account".into(),
        })
    }

    // ============= Expenses =============

    /// Raw, period-tagged entries. Aggregation happens on the client.
    pub async fn fetch_summary(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<SummaryEntry>, RequestError> {
        let mut params = Vec::new();
        if let Some(y) = year {
            params.push(format!("year={y}"));
        }
        if let Some(m) = month {
            params.push(format!("month={m}"));
        }
        let path = if params.is_empty() {
            "/expenses_summary".to_string()
        } else {
            format!("/expenses_summary?{}", params.join("&"))
        };

        let (status, body) = self.call(Method::Get, &path, None).await?;
        let entries: Vec<Value> = body.decode(status)?;
        entries
            .iter()
            .map(SummaryEntry::from_json)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|reason| RequestError::Malformed { status, reason })
    }

    pub async fn fetch_details(
        &self,
        year: i32,
        month: u32,
        category_id: i64,
    ) -> Result<Vec<ExpenseRecord>, RequestError> {
        let path = format!("/expenses/detail?year={year}&month={month}&categoryId={category_id}");
        self.call_json::<(), _>(Method::Get, &path, None).await
    }

    pub async fn create_expense(&self, expense: &NewExpense) -> Result<ExpenseRecord, RequestError> {
        self.call_json(Method::Post, "/expenses", Some(expense)).await
    }

    pub async fn delete_expense(&self, id: i64) -> Result<(), RequestError> {
        self.call(Method::Delete, &format!("/expenses/{id}"), None).await?;
        Ok(())
    }

    // ============= Categories =============

    pub async fn list_categories(&self) -> Result<Vec<Category>, RequestError> {
        self.call_json::<(), _>(Method::Get, "/expenses_category", None).await
    }

    // ============= Goals =============

    pub async fn list_goals(&self) -> Result<Vec<Goal>, RequestError> {
        self.call_json::<(), _>(Method::Get, "/goals", None).await
    }

    pub async fn create_goal(&self, goal: &NewGoal) -> Result<Goal, RequestError> {
        self.call_json(Method::Post, "/goals", Some(goal)).await
    }

    pub async fn update_goal(&self, id: i64, patch: &GoalPatch) -> Result<Goal, RequestError> {
        self.call_json(Method::Patch, &format!("/goals/{id}"), Some(patch)).await
    }
}

#[derive(Serialize)]
struct AuthBody<'a> {
    email: &'a str,
    passwd: &'a str,
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<String, RequestError> {
    serde_json::to_string(body).map_err(|e| RequestError::Malformed {
        status: 0,
        reason: format!("could not encode request body: {e}"),
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport that records requests and replays canned responses.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    #[derive(Default)]
    pub struct FakeTransport {
        pub sent: RefCell<Vec<HttpRequest>>,
        responses: RefCell<VecDeque<Result<HttpResponse, String>>>,
    }

    impl FakeTransport {
        pub fn push_json(&self, status: u16, body: Value) -> &Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                content_type: Some("application/json".into()),
                body: body.to_string(),
            }));
            self
        }

        pub fn push_text(&self, status: u16, body: &str) -> &Self {
            self.responses.borrow_mut().push_back(Ok(HttpResponse {
                status,
                content_type: Some("text/plain".into()),
                body: body.to_string(),
            }));
            self
        }

        pub fn push_network_error(&self, reason: &str) -> &Self {
            self.responses.borrow_mut().push_back(Err(reason.to_string()));
            self
        }

        pub fn sent_count(&self) -> usize {
            self.sent.borrow().len()
        }

        pub fn last(&self) -> HttpRequest {
            self.sent.borrow().last().cloned().expect("no request sent")
        }
    }

    impl Transport for FakeTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
            self.sent.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err("no canned response".into()))
        }
    }

    impl<T: Transport> Transport for &T {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
            (**self).send(request).await
        }
    }

    pub fn client(transport: &FakeTransport) -> ApiClient<&FakeTransport> {
        ApiClient::new(&Config::new("http://api.test"), transport)
    }
}
