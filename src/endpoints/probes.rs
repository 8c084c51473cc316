//! Probe calls.

use crate::client::{Client, ClientError};
use crate::model::Probe;
use crate::query::Params;

impl Client {
    /// List probes matching `params`, across all pages.
    pub async fn probes(&self, params: &Params) -> Result<Vec<Probe>, ClientError> {
        self.fetch_all("/probes/", params).await
    }

    /// Fetch one probe.
    pub async fn probe(&self, id: u64) -> Result<Probe, ClientError> {
        self.get_json(&format!("/probes/{}/", id), &Params::new()).await
    }
}
