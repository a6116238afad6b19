//! Blocking subscription client for native builds (uses ureq).

use std::time::Duration;

use crate::error::SubscribeError;
use crate::ui::{SubmitDone, SubscribeRequest, SubscriptionClient, interpret_response};

pub struct UreqSubscriptionClient {
    agent: ureq::Agent,
}

impl UreqSubscriptionClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    fn post(&self, endpoint: &str, request: &SubscribeRequest) -> Result<(), SubscribeError> {
        match self
            .agent
            .post(endpoint)
            .set("Content-Type", "application/json")
            .send_json(request)
        {
            Ok(response) => {
                let status = response.status();
                let body = response.into_string().unwrap_or_default();
                interpret_response(status, &body)
            }
            Err(e) => Err(Self::convert_error(e)),
        }
    }

    /// Convert ureq error to SubscribeError
    fn convert_error(e: ureq::Error) -> SubscribeError {
        match e {
            ureq::Error::Status(code, response) => {
                let body = response.into_string().unwrap_or_default();
                match interpret_response(code, &body) {
                    Err(err) => err,
                    Ok(()) => SubscribeError::Server {
                        status: code,
                        message: None,
                    },
                }
            }
            ureq::Error::Transport(transport) => SubscribeError::Network(transport.to_string()),
        }
    }
}

impl SubscriptionClient for UreqSubscriptionClient {
    fn submit(&mut self, endpoint: &str, request: SubscribeRequest, done: SubmitDone) {
        done(self.post(endpoint, &request));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_unreachable_endpoint_is_network_error() {
        let mut client = UreqSubscriptionClient::new(Duration::from_secs(2));
        let outcome = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&outcome);
        client.submit(
            // Port 9 on localhost: nothing listens there
            "http://127.0.0.1:9/subscribe",
            SubscribeRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            Box::new(move |result| *slot.borrow_mut() = Some(result)),
        );
        assert!(matches!(
            outcome.borrow_mut().take(),
            Some(Err(SubscribeError::Network(_)))
        ));
    }
}
