// Settings backup/restore and factory reset.

use crate::error::Error;
use crate::multipart::{FilePart, encode_file_part};
use crate::session::PhoneSession;

impl PhoneSession {
    /// Download the device's opaque binary settings backup.
    pub async fn backup_settings(&self) -> Result<Vec<u8>, Error> {
        let resp = self.get_authed("SaveAllSettings").await?;
        let bytes = resp.bytes().await.map_err(Error::Transport)?;
        Ok(bytes.to_vec())
    }

    /// Restore a settings backup previously taken with
    /// [`backup_settings`](Self::backup_settings).
    ///
    /// POSTs `/RestoreSettings` as a multipart form with a single part
    /// named `file`, filename `AllSettings.cfg`, content type
    /// `application/octet-stream`.
    pub async fn restore_settings(&self, blob: &[u8]) -> Result<(), Error> {
        let form = encode_file_part(&FilePart {
            filename: "AllSettings.cfg",
            content_type: "application/octet-stream",
            data: blob,
        });
        self.post_authed_form("RestoreSettings", form).await?;
        Ok(())
    }

    /// Reset the device to factory defaults.
    ///
    /// The device reboots and drops the session as a side effect, so the
    /// usual logout that follows is expected to fail; the fleet layer
    /// suppresses that report for reset-class operations.
    pub async fn factory_reset(&self) -> Result<(), Error> {
        self.post_authed_empty("FactoryReset").await?;
        Ok(())
    }
}
