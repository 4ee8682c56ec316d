//! `reqwest` transport for the remote testimonial service.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use feed::api::testimonials_url;
use feed::{ApiConfig, ApiError, NewTestimonial, Testimonial, TestimonialApi};
use serde::de::DeserializeOwned;

pub struct ReqwestTestimonialApi {
    client: reqwest::Client,
    url: String,
}

impl ReqwestTestimonialApi {
    /// Build a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(config: &ApiConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: testimonials_url(config) })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TestimonialApi for ReqwestTestimonialApi {
    async fn list(&self) -> Result<Vec<Testimonial>, ApiError> {
        let response = self.client.get(&self.url).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn create(&self, body: &NewTestimonial) -> Result<Testimonial, ApiError> {
        let response = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await.map_err(transport)?;
    ApiError::decode_body(status.as_u16(), status.is_success(), &text)
}
