use strum::Display;

/// The operation kinds a fleet run can perform against each device.
///
/// Purely descriptive: the label feeds the comment on each reported
/// result and never affects control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Action {
    #[strum(serialize = "Login")]
    Login,
    #[strum(serialize = "Logout")]
    Logout,
    #[strum(serialize = "Phone book upload")]
    UploadPhoneBook,
    #[strum(serialize = "Phone book download")]
    DownloadPhoneBook,
    #[strum(serialize = "Function key replacement")]
    ReplaceFunctionKeys,
    #[strum(serialize = "Parameter download")]
    DownloadParameters,
    #[strum(serialize = "Parameter upload")]
    UploadParameters,
    #[strum(serialize = "Settings backup")]
    Backup,
    #[strum(serialize = "Settings restore")]
    Restore,
    #[strum(serialize = "Factory reset")]
    Reset,
}
