use log::warn;
use vulkan_core::validation::LoginForm;

use super::{Next, write_field_errors};
use crate::Result;
use crate::context::AppContext;
use crate::prompt::Prompter;
use crate::router::DOMAINS_PATH;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";

#[derive(Debug, Default)]
pub struct LoginView;

impl LoginView {
    pub fn render(&self) -> String {
        "\
== Vulkan Admin ==
Sign in to manage your domains and accounts.
Type `login` to sign in.
"
        .to_string()
    }

    /// Collect credentials, validate them and ask the backend for a token.
    pub async fn login(&self, ctx: &mut AppContext, prompter: &mut dyn Prompter) -> Result<Next> {
        let Some(email) = prompter.prompt("Email", None)? else {
            return Ok(Next::Stay);
        };
        let Some(password) = prompter.prompt("Password", None)? else {
            return Ok(Next::Stay);
        };
        let form = LoginForm { email, password };

        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => {
                write_field_errors(prompter, &errors)?;
                return Ok(Next::Stay);
            }
        };

        prompter.write("Signing in...\n")?;
        match ctx.client.authenticate(&credentials).await {
            Ok(token) => {
                ctx.session().login(&token)?;
                Ok(Next::Navigate(DOMAINS_PATH.to_string()))
            }
            Err(e) => {
                warn!("login failed: {e}");
                prompter.alert(INVALID_CREDENTIALS)?;
                Ok(Next::Stay)
            }
        }
    }
}
