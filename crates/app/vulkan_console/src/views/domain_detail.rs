//! Accounts of one domain, with the create, delete, block, storage and
//! password actions.

use log::warn;
use vulkan_client::{QueryData, QueryKey, QueryState};
use vulkan_core::models::EmailAccount;
use vulkan_core::validation::{ChangePasswordForm, CreateAccountForm, parse_storage};

use super::domains::cached_domain_name;
use super::{Next, write_field_errors};
use crate::Result;
use crate::context::AppContext;
use crate::prompt::Prompter;

pub const CREATED: &str = "Account created successfully!";
pub const CREATE_FAILED: &str = "Failed to create account.";
pub const DELETED: &str = "Account removed successfully!";
pub const DELETE_FAILED: &str = "Failed to delete account.";
pub const STATUS_UPDATED: &str = "Status updated!";
pub const STATUS_FAILED: &str = "Failed to update status.";
pub const STORAGE_UPDATED: &str = "Storage updated!";
pub const STORAGE_FAILED: &str = "Failed to update storage.";
pub const STORAGE_INPUT_INVALID: &str = "Enter a valid value greater than zero.";
pub const PASSWORD_CHANGED: &str = "Password changed successfully!";
pub const PASSWORD_FAILED: &str = "Failed to change password.";

const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this account?";

#[derive(Debug)]
pub struct DomainDetailView {
    domain_id: String,
    /// Create form kept after a failed submission.
    create_draft: Option<CreateAccountForm>,
}

impl DomainDetailView {
    pub fn new(domain_id: String) -> Self {
        Self {
            domain_id,
            create_draft: None,
        }
    }

    fn key(&self) -> QueryKey {
        QueryKey::Accounts(self.domain_id.clone())
    }

    pub fn loading_message(&self, ctx: &AppContext) -> Option<&'static str> {
        match ctx.client.queries.peek(&self.key()) {
            QueryState::Success(_) => None,
            _ => Some("Loading accounts..."),
        }
    }

    pub async fn render(&self, ctx: &AppContext) -> String {
        let state = ctx
            .client
            .queries
            .accounts(&ctx.client.gateway, Some(self.domain_id.as_str()))
            .await;
        let title = match cached_domain_name(ctx, &self.domain_id) {
            Some(name) => format!("== {name} (domain {}) ==", self.domain_id),
            None => format!("== Domain {} ==", self.domain_id),
        };
        format!("{title}\n{}", render_accounts(&state))
    }

    pub fn refresh(&self, ctx: &AppContext) {
        ctx.client.queries.invalidate(&self.key());
    }

    /// Create-account modal. The form starts from the last failed attempt, if
    /// any, and is reset after a successful create.
    pub async fn create_account(
        &mut self,
        ctx: &mut AppContext,
        prompter: &mut dyn Prompter,
    ) -> Result<Next> {
        let draft = self.create_draft.take().unwrap_or_default();
        let Some(form) = fill_create_form(prompter, &draft)? else {
            self.create_draft = Some(draft);
            return Ok(Next::Stay);
        };

        let account = match form.validate() {
            Ok(account) => account,
            Err(errors) => {
                write_field_errors(prompter, &errors)?;
                self.create_draft = Some(form);
                return Ok(Next::Stay);
            }
        };

        prompter.write("Creating...\n")?;
        match ctx
            .client
            .mutations
            .create_account(&self.domain_id, &account)
            .await
        {
            Ok(_) => ctx.toasts.success(CREATED),
            Err(e) => {
                warn!("create account failed: {e}");
                ctx.toasts.error(CREATE_FAILED);
                self.create_draft = Some(form);
            }
        }
        Ok(Next::Stay)
    }

    pub async fn delete_account(
        &self,
        ctx: &mut AppContext,
        prompter: &mut dyn Prompter,
        account_id: &str,
    ) -> Result<Next> {
        if !prompter.confirm(DELETE_CONFIRMATION)? {
            return Ok(Next::Stay);
        }
        match ctx
            .client
            .mutations
            .delete_account(&self.domain_id, account_id)
            .await
        {
            Ok(_) => ctx.toasts.success(DELETED),
            Err(e) => {
                warn!("delete account {account_id} failed: {e}");
                ctx.toasts.error(DELETE_FAILED);
            }
        }
        Ok(Next::Stay)
    }

    pub async fn toggle_block(&self, ctx: &mut AppContext, account_id: &str) -> Next {
        match ctx
            .client
            .mutations
            .toggle_block(&self.domain_id, account_id)
            .await
        {
            Ok(_) => ctx.toasts.success(STATUS_UPDATED),
            Err(e) => {
                warn!("toggle block {account_id} failed: {e}");
                ctx.toasts.error(STATUS_FAILED);
            }
        }
        Next::Stay
    }

    /// Storage prompt, prefilled with the current quota. Invalid input is
    /// rejected here and never reaches the backend.
    pub async fn update_storage(
        &self,
        ctx: &mut AppContext,
        prompter: &mut dyn Prompter,
        account_id: &str,
    ) -> Result<Next> {
        let current = self
            .cached_account(ctx, account_id)
            .map(|a| a.storage.to_string());
        let Some(input) = prompter.prompt("New storage (MB)", current.as_deref())? else {
            return Ok(Next::Stay);
        };
        let Ok(storage) = parse_storage(&input) else {
            ctx.toasts.error(STORAGE_INPUT_INVALID);
            return Ok(Next::Stay);
        };

        match ctx
            .client
            .mutations
            .update_storage(&self.domain_id, account_id, storage)
            .await
        {
            Ok(_) => ctx.toasts.success(STORAGE_UPDATED),
            Err(e) => {
                warn!("update storage {account_id} failed: {e}");
                ctx.toasts.error(STORAGE_FAILED);
            }
        }
        Ok(Next::Stay)
    }

    /// Change-password modal.
    pub async fn update_password(
        &self,
        ctx: &mut AppContext,
        prompter: &mut dyn Prompter,
        account_id: &str,
    ) -> Result<Next> {
        if let Some(account) = self.cached_account(ctx, account_id) {
            prompter.write(&format!("Change password for {}\n", account.email))?;
        }
        let Some(password) = prompter.prompt("New password", None)? else {
            return Ok(Next::Stay);
        };
        let form = ChangePasswordForm { password };
        let change = match form.validate() {
            Ok(change) => change,
            Err(errors) => {
                write_field_errors(prompter, &errors)?;
                return Ok(Next::Stay);
            }
        };

        match ctx
            .client
            .mutations
            .update_password(&self.domain_id, account_id, &change)
            .await
        {
            Ok(_) => ctx.toasts.success(PASSWORD_CHANGED),
            Err(e) => {
                warn!("change password {account_id} failed: {e}");
                ctx.toasts.error(PASSWORD_FAILED);
            }
        }
        Ok(Next::Stay)
    }

    fn cached_account(&self, ctx: &AppContext, account_id: &str) -> Option<EmailAccount> {
        match ctx.client.queries.peek(&self.key()) {
            QueryState::Success(QueryData::Accounts(accounts)) => {
                accounts.into_iter().find(|a| a.id == account_id)
            }
            _ => None,
        }
    }
}

/// Prompt for every create field, offering `draft` values as defaults.
/// `None` when input ends.
fn fill_create_form(
    prompter: &mut dyn Prompter,
    draft: &CreateAccountForm,
) -> std::io::Result<Option<CreateAccountForm>> {
    prompter.write("-- New account --\n")?;
    let default_email = (!draft.email.is_empty()).then_some(draft.email.as_str());
    let Some(email) = prompter.prompt("Email", default_email)? else {
        return Ok(None);
    };
    let Some(password) = prompter.prompt("Password", None)? else {
        return Ok(None);
    };
    let Some(storage) = prompter.prompt("Storage (MB)", Some(draft.storage.as_str()))? else {
        return Ok(None);
    };
    Ok(Some(CreateAccountForm {
        email,
        password,
        storage,
    }))
}

fn render_accounts(state: &QueryState<Vec<EmailAccount>>) -> String {
    let mut out = String::new();
    match state {
        QueryState::Idle | QueryState::Pending => out.push_str("Loading accounts...\n"),
        QueryState::Error(e) => {
            out.push_str(&format!("Error loading accounts: {}\n", e.message()));
        }
        QueryState::Success(accounts) if accounts.is_empty() => {
            out.push_str("No accounts found for this domain. Type `new` to create one.\n");
        }
        QueryState::Success(accounts) => {
            out.push_str(&format!(
                "  {:<10} {:<32} {:>10}  {}\n",
                "ID", "EMAIL", "STORAGE", "STATUS"
            ));
            for account in accounts {
                let status = if account.is_blocked { "BLOCKED" } else { "ACTIVE" };
                out.push_str(&format!(
                    "  {:<10} {:<32} {:>7} MB  {}\n",
                    account.id, account.email, account.storage, status
                ));
            }
            out.push_str(
                "Actions: new, delete <id>, block <id>, storage <id>, password <id>, back\n",
            );
        }
    }
    out
}
