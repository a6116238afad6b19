//! Subscription client for the browser (uses gloo-net).

use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;

use crate::error::SubscribeError;
use crate::ui::{SubmitDone, SubscribeRequest, SubscriptionClient, interpret_response};

#[derive(Debug, Default)]
pub struct FetchSubscriptionClient;

async fn post(endpoint: String, request: SubscribeRequest) -> Result<(), SubscribeError> {
    let response = Request::post(&endpoint)
        .json(&request)
        .map_err(|e| SubscribeError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| SubscribeError::Network(e.to_string()))?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    interpret_response(status, &body)
}

impl SubscriptionClient for FetchSubscriptionClient {
    fn submit(&mut self, endpoint: &str, request: SubscribeRequest, done: SubmitDone) {
        let endpoint = endpoint.to_string();
        spawn_local(async move {
            done(post(endpoint, request).await);
        });
    }
}
