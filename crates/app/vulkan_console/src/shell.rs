//! The interactive console loop: read a command, route it, render the page.

use crate::Result;
use crate::command::{Command, HELP};
use crate::context::AppContext;
use crate::prompt::Prompter;
use crate::router::{LOGIN_PATH, Navigator, Resolution};
use crate::views::{ActiveView, Next};

pub struct Shell<P> {
    ctx: AppContext,
    prompter: P,
    navigator: Navigator,
    view: ActiveView,
}

impl<P: Prompter> Shell<P> {
    pub fn new(ctx: AppContext, prompter: P) -> Self {
        let navigator = Navigator::default();
        let view = ActiveView::for_route(navigator.current());
        Self {
            ctx,
            prompter,
            navigator,
            view,
        }
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Run until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        self.prompter.write(&format!(
            "Vulkan console ({})\nType `help` for commands.\n",
            self.ctx.client.gateway.describe()
        ))?;
        self.navigate("/").await?;

        loop {
            let prompt = format!("{}> ", self.navigator.current());
            let Some(line) = self.prompter.read_line(&prompt)? else {
                self.prompter.write("\n")?;
                break;
            };
            if !self.execute(Command::parse(&line)).await? {
                break;
            }
        }
        log::debug!("console closed");
        Ok(())
    }

    /// Execute one command. `false` means quit.
    pub async fn execute(&mut self, command: Command) -> Result<bool> {
        log::debug!("command {command:?} on {}", self.navigator.current());
        match command {
            Command::Quit => return Ok(false),
            Command::Empty => {}
            Command::Help => self.prompter.write(HELP)?,
            Command::Invalid(message) => self.prompter.write(&format!("{message}\n"))?,
            Command::Go(path) => self.navigate(&path).await?,
            Command::Back => {
                let resolution = self.navigator.back(self.ctx.session().is_authenticated());
                self.enter(resolution).await?;
            }
            Command::Refresh => {
                self.view.refresh(&self.ctx);
                self.show().await?;
            }
            Command::Logout => {
                if self.ctx.session().is_authenticated() {
                    self.ctx.client.logout()?;
                    self.navigator.reset();
                    self.navigate(LOGIN_PATH).await?;
                } else {
                    self.prompter.write("You are not signed in.\n")?;
                }
            }
            other => {
                match self
                    .view
                    .handle(&other, &mut self.ctx, &mut self.prompter)
                    .await?
                {
                    None => self
                        .prompter
                        .write("That command is not available on this page. Type `help`.\n")?,
                    Some(Next::Navigate(path)) => self.navigate(&path).await?,
                    Some(Next::Stay) => {
                        self.flush_toasts()?;
                        self.show().await?;
                    }
                }
            }
        }
        self.flush_toasts()?;
        Ok(true)
    }

    async fn navigate(&mut self, path: &str) -> Result<()> {
        let resolution = self
            .navigator
            .go(path, self.ctx.session().is_authenticated());
        self.enter(resolution).await
    }

    async fn enter(&mut self, resolution: Resolution) -> Result<()> {
        if let Some(last) = resolution.redirects.last() {
            self.prompter.write(&format!("(redirected to {last})\n"))?;
        }
        self.view = ActiveView::for_route(&resolution.route);
        self.show().await
    }

    async fn show(&mut self) -> Result<()> {
        if let Some(message) = self.view.loading_message(&self.ctx) {
            self.prompter.write(&format!("{message}\n"))?;
        }
        let page = self.view.render(&self.ctx).await;
        self.prompter.write(&page)?;
        Ok(())
    }

    fn flush_toasts(&mut self) -> Result<()> {
        for toast in self.ctx.toasts.drain() {
            self.prompter.write(&format!("{toast}\n"))?;
        }
        Ok(())
    }
}
