//! # Accounts
//!
//! Sign-up and passwordless login.
//!
//! ## Flows
//! ```text
//! sign_up(email)                         login(email)
//!     │                                      │
//!     ├─ invalid email ──► false             ├─ codes.generate_code()
//!     │   (no calls)                         │
//!     ▼                                      ▼
//! mailer.send_email(email, welcome)      mailer.send_email(email, code)
//!     │                                      │
//!     ▼                                      ▼
//!   true                                   code
//! ```

use tracing::{debug, info};

use crate::collaborators::LoginCode;
use crate::error::ServiceResult;
use crate::storefront::Storefront;

/// Returns true for a plausible email address.
///
/// Requires a single `@`, a non-empty local part, no whitespace, and a
/// domain of at least two dot-separated labels, none of them empty.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let mut labels = domain.split('.');
    let all_labels_filled = labels.clone().all(|label| !label.is_empty());
    all_labels_filled && labels.nth(1).is_some()
}

impl Storefront {
    /// Registers `email` and sends the welcome mail.
    ///
    /// Returns `Ok(false)` without contacting anything when the address is
    /// malformed.
    pub async fn sign_up(&self, email: &str) -> ServiceResult<bool> {
        if !is_valid_email(email) {
            debug!(email, "Rejected sign-up with invalid email");
            return Ok(false);
        }

        self.mailer
            .send_email(email, &self.config.accounts.welcome_message)
            .await?;

        info!(email, "User signed up");
        Ok(true)
    }

    /// Mails a fresh one-time code to `email` and returns it.
    pub async fn login(&self, email: &str) -> ServiceResult<LoginCode> {
        let code = self.codes.generate_code();
        self.mailer.send_email(email, &code.to_string()).await?;

        info!(email, "Login code sent");
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{CodeGenerator, MockCodeGenerator, MockEmailSender};
    use crate::config::StorefrontConfig;
    use rstest::rstest;
    use std::sync::{Arc, Mutex};

    fn storefront_with_mailer(mailer: MockEmailSender) -> Storefront {
        Storefront::builder(StorefrontConfig::default())
            .with_mailer(Arc::new(mailer))
            .build()
            .unwrap()
    }

    /// Wraps the real generator and remembers what it handed out.
    #[derive(Default)]
    struct RecordingCodeGenerator {
        issued: Mutex<Vec<LoginCode>>,
    }

    impl CodeGenerator for RecordingCodeGenerator {
        fn generate_code(&self) -> LoginCode {
            let code = crate::providers::RandomCodeGenerator.generate_code();
            self.issued.lock().unwrap().push(code);
            code
        }
    }

    #[rstest]
    #[case("a@a.com", true)]
    #[case("first.last@shop.example.org", true)]
    #[case("a", false)]
    #[case("", false)]
    #[case("@a.com", false)]
    #[case("a@com", false)]
    #[case("a@.com", false)]
    #[case("a@a.", false)]
    #[case("a@@a.com", false)]
    #[case("a b@a.com", false)]
    #[case("a@b..com", false)]
    #[case("a@b.c..d", false)]
    #[case("a@b.c.d", true)]
    fn test_is_valid_email(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[tokio::test]
    async fn test_sign_up_sends_welcome_email() {
        let mut mailer = MockEmailSender::new();
        mailer
            .expect_send_email()
            .withf(|to, body| to == "a@a.com" && body == "Welcome aboard!")
            .times(1)
            .returning(|_, _| Ok(()));
        let storefront = storefront_with_mailer(mailer);

        assert!(storefront.sign_up("a@a.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_sign_up_with_invalid_email_sends_nothing() {
        let mut mailer = MockEmailSender::new();
        mailer.expect_send_email().never();
        let storefront = storefront_with_mailer(mailer);

        assert!(!storefront.sign_up("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_login_mails_generated_code() {
        let mut codes = MockCodeGenerator::new();
        codes
            .expect_generate_code()
            .times(1)
            .return_const(LoginCode::new(42));

        let mut mailer = MockEmailSender::new();
        mailer
            .expect_send_email()
            .withf(|to, body| to == "a@a.com" && body == "000042")
            .times(1)
            .returning(|_, _| Ok(()));

        let storefront = Storefront::builder(StorefrontConfig::default())
            .with_mailer(Arc::new(mailer))
            .with_codes(Arc::new(codes))
            .build()
            .unwrap();

        let code = storefront.login("a@a.com").await.unwrap();

        assert_eq!(code, LoginCode::new(42));
    }

    #[tokio::test]
    async fn test_login_mails_the_code_it_returns() {
        let recorder = Arc::new(RecordingCodeGenerator::default());
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let mut mailer = MockEmailSender::new();
        let sink = bodies.clone();
        mailer
            .expect_send_email()
            .times(1)
            .returning(move |_, body| {
                sink.lock().unwrap().push(body.to_string());
                Ok(())
            });

        let storefront = Storefront::builder(StorefrontConfig::default())
            .with_mailer(Arc::new(mailer))
            .with_codes(recorder.clone())
            .build()
            .unwrap();

        let code = storefront.login("a@a.com").await.unwrap();

        assert_eq!(*recorder.issued.lock().unwrap(), vec![code]);
        assert_eq!(*bodies.lock().unwrap(), vec![code.to_string()]);
    }
}
