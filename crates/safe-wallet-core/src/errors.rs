use std::fmt;

/// Categorised failure codes attached to every logged operation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    SocialLogin,
    PasswordRecovery,
    DeviceShareRecovery,
    EnableMfa,
    SafeInfoFetch,
    AddressBookWrite,
    SignTransaction,
    BuildTransaction,
}

impl ErrorCode {
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::EnableMfa => 304,
            ErrorCode::SocialLogin => 305,
            ErrorCode::PasswordRecovery => 306,
            ErrorCode::DeviceShareRecovery => 307,
            ErrorCode::SafeInfoFetch => 605,
            ErrorCode::AddressBookWrite => 701,
            ErrorCode::SignTransaction => 804,
            ErrorCode::BuildTransaction => 816,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::EnableMfa => "Error enabling MFA",
            ErrorCode::SocialLogin => "Error logging in with social login",
            ErrorCode::PasswordRecovery => "Error recovering account with password",
            ErrorCode::DeviceShareRecovery => "Error recovering account with device share",
            ErrorCode::SafeInfoFetch => "Error fetching Safe info",
            ErrorCode::AddressBookWrite => "Error writing address book entry",
            ErrorCode::SignTransaction => "Error signing a transaction",
            ErrorCode::BuildTransaction => "Error creating a transaction",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.code(), self.description())
    }
}

pub fn log_error(code: ErrorCode, err: &dyn fmt::Display) {
    tracing::error!(code = code.code(), "{code}: {err}");
}
