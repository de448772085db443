use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::{ChargeApi, ClientError};
use crate::{
    auth::TOKEN_HEADER,
    models::Message,
    responses::{ChargeResponse, UserResponse},
};

/// Typed access to the board's HTTP surface. The token obtained from
/// [`ApiClient::authorize`] is sent on every later request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.header(TOKEN_HEADER, token),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        Ok(Self::send(builder).await?.json().await?)
    }

    pub async fn authorize(&mut self, name: &str) -> Result<UserResponse, ClientError> {
        let user: UserResponse =
            Self::send_json(self.request(Method::POST, "/authorize").json(&json!({ "name": name })))
                .await?;
        self.token = Some(user.token.clone());
        Ok(user)
    }

    pub async fn me(&self) -> Result<UserResponse, ClientError> {
        Self::send_json(self.request(Method::GET, "/me")).await
    }

    /// Newest first; the server does not order its answer.
    pub async fn list_messages(&self) -> Result<Vec<Message>, ClientError> {
        let mut messages: Vec<Message> =
            Self::send_json(self.request(Method::GET, "/messages")).await?;
        messages.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(messages)
    }

    pub async fn get_message(&self, id: u64) -> Result<Message, ClientError> {
        Self::send_json(self.request(Method::GET, &format!("/messages/{id}"))).await
    }

    pub async fn create_message(
        &self,
        subject: Option<&str>,
        text: &str,
    ) -> Result<Message, ClientError> {
        let body = json!({ "subject": subject, "text": text });
        Self::send_json(self.request(Method::POST, "/messages").json(&body)).await
    }

    pub async fn update_message(
        &self,
        id: u64,
        subject: Option<&str>,
        text: &str,
    ) -> Result<Message, ClientError> {
        let body = json!({ "subject": subject, "text": text });
        Self::send_json(
            self.request(Method::PUT, &format!("/messages/{id}"))
                .json(&body),
        )
        .await
    }

    /// Single delete request. Use [`super::ChargeWorkflow::delete`] to
    /// discharge the message first.
    pub async fn delete_message(&self, id: u64) -> Result<(), ClientError> {
        Self::send(self.request(Method::POST, "/message/delete").json(&json!({ "id": id })))
            .await?;
        Ok(())
    }

    pub async fn increase_charge(&self, id: u64) -> Result<u8, ClientError> {
        let body = json!({ "id": id });
        let response: ChargeResponse = Self::send_json(
            self.request(Method::POST, "/message/charge_increase")
                .json(&body),
        )
        .await?;
        Ok(response.charge)
    }

    pub async fn decrease_charge(&self, id: u64) -> Result<u8, ClientError> {
        let body = json!({ "id": id });
        let response: ChargeResponse = Self::send_json(
            self.request(Method::POST, "/message/charge_decrease")
                .json(&body),
        )
        .await?;
        Ok(response.charge)
    }
}

impl ChargeApi for ApiClient {
    async fn increase(&self, id: u64) -> Result<u8, ClientError> {
        self.increase_charge(id).await
    }

    async fn decrease(&self, id: u64) -> Result<u8, ClientError> {
        self.decrease_charge(id).await
    }

    async fn delete(&self, id: u64) -> Result<(), ClientError> {
        self.delete_message(id).await
    }
}
