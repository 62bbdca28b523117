// Settings document endpoints.

use crate::error::Error;
use crate::model::Parameters;
use crate::session::PhoneSession;

impl PhoneSession {
    /// Download the full settings document.
    pub async fn download_parameters(&self) -> Result<Parameters, Error> {
        let resp = self.get_authed("Parameters").await?;
        let body = resp.text().await.map_err(Error::Transport)?;
        self.decode_json(&body)
    }

    /// Upload a (possibly partial) settings document.
    ///
    /// The body is a single JSON object sent with
    /// `Content-Type: application/json`; the device merges non-blank
    /// fields into its stored settings per key index.
    pub async fn upload_parameters(&self, parameters: &Parameters) -> Result<(), Error> {
        self.post_authed_json("Parameters", parameters).await?;
        Ok(())
    }
}
