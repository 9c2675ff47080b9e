/// Transactional emails the store sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Email {
    /// Welcome message after registration
    Signup {
        first_name: String,
        last_name: String,
    },
    /// Link carrying a password reset token
    ResetRequest { reset_url: String },
    /// Notice that the account password changed
    PasswordChanged,
}

impl Email {
    pub fn subject(&self) -> &'static str {
        match self {
            Email::Signup { .. } => "Account Registration",
            Email::ResetRequest { .. } => "Reset Password",
            Email::PasswordChanged => "Password Changed",
        }
    }

    pub fn text(&self) -> String {
        match self {
            Email::Signup {
                first_name,
                last_name,
            } => format!(
                "Hi {} {}! Thank you for creating an account with us!",
                first_name, last_name
            ),
            Email::ResetRequest { reset_url } => format!(
                "You are receiving this because you (or someone else) asked to reset the password for your account.\n\n\
                 Open the following link, or paste it into your browser, to choose a new password:\n\n\
                 {}\n\n\
                 The link expires in one hour. If you did not ask for this, ignore this email and your password stays unchanged.\n",
                reset_url
            ),
            Email::PasswordChanged => "You are receiving this email because the password for your account was changed.\n\n\
                 If you did not make this change, please contact us immediately."
                .to_string(),
        }
    }
}

/// Link the shopper follows to choose a new password.
pub fn reset_password_url(client_url: &str, token: &str) -> String {
    format!("{}/reset-password/{}", client_url.trim_end_matches('/'), token)
}
