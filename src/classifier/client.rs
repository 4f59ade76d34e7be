use super::types::Prediction;
use crate::{Error, Result, config::ClassifierConfig, line::ImageContent};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn predict(&self, image: ImageContent) -> Result<Prediction>;
}

pub struct HttpClassifier {
    client: reqwest::Client,
    predict_url: String,
    timeout: Duration,
}

impl HttpClassifier {
    pub fn new(client: reqwest::Client, config: &ClassifierConfig) -> Self {
        Self {
            client,
            predict_url: format!("{}/predict", config.base_url.trim_end_matches('/')),
            timeout: config.timeout(),
        }
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn predict(&self, image: ImageContent) -> Result<Prediction> {
        debug!(
            "Submitting {} byte image to {}",
            image.bytes.len(),
            self.predict_url
        );

        let part = Part::bytes(image.bytes)
            .file_name("image.jpg")
            .mime_str("image/jpeg")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.predict_url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::from_request("classifier", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::from_request("classifier", e))?;

        if !status.is_success() {
            return Err(Error::Upstream {
                service: "classifier",
                status: status.as_u16(),
                body,
            });
        }

        let prediction: Prediction = serde_json::from_str(&body)?;
        debug!(
            "Classifier answered ok={} class={:?} bmi={:?} confidence={:?}",
            prediction.ok,
            prediction.class_label(),
            prediction.bmi,
            prediction.confidence
        );

        Ok(prediction)
    }
}
