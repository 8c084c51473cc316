//! Measurement calls.
//!
//! See: <https://atlas.ripe.net/docs/apis/rest-api-reference/#measurements>

use serde_json::Value;

use crate::client::{Client, ClientError};
use crate::model::{Measurement, SslCertResult};
use crate::query::Params;

impl Client {
    /// List measurements matching `params`, across all pages.
    ///
    /// Typical filters are `country_code`, `asn`, `type`, `status` and
    /// `is_anchor`.
    pub async fn measurements(&self, params: &Params) -> Result<Vec<Measurement>, ClientError> {
        self.fetch_all("/measurements/", params).await
    }

    /// Fetch one measurement.
    pub async fn measurement(&self, id: u64) -> Result<Measurement, ClientError> {
        self.get_json(&format!("/measurements/{}/", id), &Params::new())
            .await
    }

    /// Raw results of a measurement, one JSON object per probe result.
    pub async fn measurement_results(&self, id: u64) -> Result<Vec<Value>, ClientError> {
        self.get_json(&format!("/measurements/{}/results/", id), &Params::new())
            .await
    }

    /// TLS certificates collected by an `sslcert` measurement.
    pub async fn tls_certificates(&self, id: u64) -> Result<Vec<SslCertResult>, ClientError> {
        self.get_json(&format!("/measurements/{}/results/", id), &Params::new())
            .await
    }
}
