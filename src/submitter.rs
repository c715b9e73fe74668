use std::{fmt, sync::Arc};

use chrono::Utc;
use reqwest::{
    blocking::{Client, Response},
    header::CONTENT_TYPE,
    StatusCode, Url,
};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::{
    signature::{sign, SIGNATURE_HEADER},
    Error, Payload, Result, SubmitterConfig,
};

const USER_AGENT: &str = concat!("b12-apply/", env!("CARGO_PKG_VERSION"));

/// Opaque identifier returned by the endpoint for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Receipt(String);

impl Receipt {
    /// Receipt as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the underlying string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
struct SubmissionResponse {
    success: bool,
    #[serde(default)]
    receipt: Option<Receipt>,
}

/// Builds, signs and sends a submission.
///
/// Use [`SubmitterConfig::to_submitter`] to get an instance of it.
pub struct Submitter {
    // Client holds a connection pool internally, but we only ever send one request.
    client: Client,
    endpoint: Url,
    config: SubmitterConfig,
}

impl Submitter {
    pub(crate) fn new(config: SubmitterConfig) -> Result<Submitter> {
        let endpoint = Url::parse(&config.endpoint).map_err(Error::InvalidEndpoint)?;
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Submitter {
            client,
            endpoint,
            config,
        })
    }

    /// Build a payload stamped with the current time.
    pub fn build_payload(&self) -> Payload {
        Payload::new(&self.config, Utc::now())
    }

    /// Build, sign and send a payload stamped with the current time.
    pub fn submit(&self) -> Result<Receipt> {
        self.submit_payload(&self.build_payload())
    }

    /// Sign and send `payload`, returning the receipt if the endpoint accepted it.
    pub fn submit_payload(&self, payload: &Payload) -> Result<Receipt> {
        let body = payload.canonical_json()?;
        log::debug!(target: "b12", "canonical payload: {body}");

        let secret = self.config.signing_secret.expose_secret();
        let signature = sign(secret.as_bytes(), body.as_bytes())?;
        log::debug!(target: "b12", "payload signature: {signature}");

        let response = self.send(body, &signature)?;
        Self::verify(response)
    }

    /// POST `body` to the endpoint with `signature` in the signature header.
    pub fn send(&self, body: String, signature: &str) -> Result<Response> {
        let endpoint = self.endpoint.as_str();
        log::info!(target: "b12", endpoint; "sending submission");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(SIGNATURE_HEADER, signature)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        Ok(response)
    }

    /// Check that `response` is a 200 carrying `success: true` and return its receipt.
    ///
    /// The body of a non-200 response is kept for diagnostics but never parsed.
    pub fn verify(response: Response) -> Result<Receipt> {
        let status = response.status();
        if status != StatusCode::OK {
            let status_code = status.as_u16();
            log::warn!(target: "b12", status_code; "unexpected response status");
            let body = response.text().unwrap_or_default();
            return Err(Error::UnexpectedStatus { status, body });
        }

        parse_response(response.text()?)
    }
}

pub(crate) fn parse_response(body: String) -> Result<Receipt> {
    let response: SubmissionResponse = match serde_json::from_str(&body) {
        Ok(response) => response,
        Err(err) => {
            return Err(Error::InvalidResponse {
                source: Arc::new(err),
                body,
            })
        }
    };

    if !response.success {
        log::warn!(target: "b12", "submission was not accepted");
        return Err(Error::Rejected { body });
    }

    let receipt = response.receipt.ok_or(Error::MissingReceipt)?;
    log::info!(target: "b12", "submission accepted");
    Ok(receipt)
}
