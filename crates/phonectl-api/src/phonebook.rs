// Phone book transfer endpoints.

use crate::error::Error;
use crate::multipart::{FilePart, encode_file_part};
use crate::session::PhoneSession;

impl PhoneSession {
    /// Upload a phone book to the device.
    ///
    /// POSTs `/LocalPhonebook` as a multipart form with a single part named
    /// `file`, filename `LocalPhonebook.xml`, content type `text/xml`.
    pub async fn upload_phonebook(&self, xml: &str) -> Result<(), Error> {
        let form = encode_file_part(&FilePart {
            filename: "LocalPhonebook.xml",
            content_type: "text/xml",
            data: xml.as_bytes(),
        });
        self.post_authed_form("LocalPhonebook", form).await?;
        Ok(())
    }

    /// Download the device's phone book as raw XML text.
    pub async fn download_phonebook(&self) -> Result<String, Error> {
        let resp = self.get_authed("SaveLocalPhonebook").await?;
        resp.text().await.map_err(Error::Transport)
    }
}
