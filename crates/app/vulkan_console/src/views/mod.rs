//! Pages of the console. Each view renders plain text from the query cache
//! and handles the commands that belong to its page.

pub mod domain_detail;
pub mod domains;
pub mod login;

use vulkan_core::validation::ValidationErrors;

use crate::Result;
use crate::command::Command;
use crate::context::AppContext;
use crate::prompt::Prompter;
use crate::router::Route;

pub use self::domain_detail::DomainDetailView;
pub use self::domains::DomainsView;
pub use self::login::LoginView;

/// What the console does after a view handled a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Next {
    Stay,
    Navigate(String),
}

/// The view of the current route.
#[derive(Debug)]
pub enum ActiveView {
    Login(LoginView),
    Domains(DomainsView),
    DomainDetail(DomainDetailView),
}

impl ActiveView {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Login => ActiveView::Login(LoginView),
            Route::Domains => ActiveView::Domains(DomainsView),
            Route::DomainDetail { domain_id } => {
                ActiveView::DomainDetail(DomainDetailView::new(domain_id.clone()))
            }
        }
    }

    /// Message to show while the view's data is being fetched.
    pub fn loading_message(&self, ctx: &AppContext) -> Option<&'static str> {
        match self {
            ActiveView::Login(_) => None,
            ActiveView::Domains(view) => view.loading_message(ctx),
            ActiveView::DomainDetail(view) => view.loading_message(ctx),
        }
    }

    pub async fn render(&self, ctx: &AppContext) -> String {
        match self {
            ActiveView::Login(view) => view.render(),
            ActiveView::Domains(view) => view.render(ctx).await,
            ActiveView::DomainDetail(view) => view.render(ctx).await,
        }
    }

    /// Drop the cached data of this view.
    pub fn refresh(&self, ctx: &AppContext) {
        match self {
            ActiveView::Login(_) => {}
            ActiveView::Domains(view) => view.refresh(ctx),
            ActiveView::DomainDetail(view) => view.refresh(ctx),
        }
    }

    /// Handle a page command. `None` when the command does not belong to
    /// this page.
    pub async fn handle(
        &mut self,
        command: &Command,
        ctx: &mut AppContext,
        prompter: &mut dyn Prompter,
    ) -> Result<Option<Next>> {
        let next = match (self, command) {
            (ActiveView::Login(view), Command::Login) => view.login(ctx, prompter).await?,
            (ActiveView::Domains(view), Command::Open(target)) => {
                view.open(ctx, prompter, target).await?
            }
            (ActiveView::DomainDetail(view), Command::New) => {
                view.create_account(ctx, prompter).await?
            }
            (ActiveView::DomainDetail(view), Command::Delete(id)) => {
                view.delete_account(ctx, prompter, id).await?
            }
            (ActiveView::DomainDetail(view), Command::Block(id)) => {
                view.toggle_block(ctx, id).await
            }
            (ActiveView::DomainDetail(view), Command::Storage(id)) => {
                view.update_storage(ctx, prompter, id).await?
            }
            (ActiveView::DomainDetail(view), Command::Password(id)) => {
                view.update_password(ctx, prompter, id).await?
            }
            _ => return Ok(None),
        };
        Ok(Some(next))
    }
}

/// Show each failing field under its form.
pub(crate) fn write_field_errors(
    prompter: &mut dyn Prompter,
    errors: &ValidationErrors,
) -> std::io::Result<()> {
    for error in errors.iter() {
        prompter.write(&format!("  {}: {}\n", error.field, error.message))?;
    }
    Ok(())
}
