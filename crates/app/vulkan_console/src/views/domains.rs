use vulkan_client::{QueryData, QueryKey, QueryState};
use vulkan_core::models::Domain;

use super::Next;
use crate::Result;
use crate::context::AppContext;
use crate::prompt::Prompter;
use crate::router::DOMAINS_PATH;

#[derive(Debug, Default)]
pub struct DomainsView;

impl DomainsView {
    pub fn loading_message(&self, ctx: &AppContext) -> Option<&'static str> {
        match ctx.client.queries.peek(&QueryKey::Domains) {
            QueryState::Success(_) => None,
            _ => Some("Loading domains..."),
        }
    }

    pub async fn render(&self, ctx: &AppContext) -> String {
        let state = ctx.client.queries.domains(&ctx.client.gateway).await;
        render_domains(&state)
    }

    pub fn refresh(&self, ctx: &AppContext) {
        ctx.client.queries.invalidate(&QueryKey::Domains);
    }

    /// Navigate to the domain whose id or name is `target`.
    pub async fn open(
        &self,
        ctx: &mut AppContext,
        prompter: &mut dyn Prompter,
        target: &str,
    ) -> Result<Next> {
        let QueryState::Success(domains) = ctx.client.queries.domains(&ctx.client.gateway).await
        else {
            prompter.write("Domains are not available right now.\n")?;
            return Ok(Next::Stay);
        };
        match find_domain(&domains, target) {
            Some(domain) => Ok(Next::Navigate(format!("{DOMAINS_PATH}/{}", domain.id))),
            None => {
                prompter.write(&format!("No domain matches `{target}`.\n"))?;
                Ok(Next::Stay)
            }
        }
    }
}

/// Name of `domain_id` if the domain list is cached.
pub fn cached_domain_name(ctx: &AppContext, domain_id: &str) -> Option<String> {
    match ctx.client.queries.peek(&QueryKey::Domains) {
        QueryState::Success(QueryData::Domains(domains)) => domains
            .into_iter()
            .find(|d| d.id == domain_id)
            .map(|d| d.name),
        _ => None,
    }
}

fn find_domain<'a>(domains: &'a [Domain], target: &str) -> Option<&'a Domain> {
    domains
        .iter()
        .find(|d| d.id == target)
        .or_else(|| domains.iter().find(|d| d.name.eq_ignore_ascii_case(target)))
}

fn render_domains(state: &QueryState<Vec<Domain>>) -> String {
    let mut out = String::from("== Domains ==\n");
    match state {
        QueryState::Idle | QueryState::Pending => out.push_str("Loading domains...\n"),
        QueryState::Error(e) => out.push_str(&format!("Error loading domains: {}\n", e.message())),
        QueryState::Success(domains) if domains.is_empty() => out.push_str("No domains found.\n"),
        QueryState::Success(domains) => {
            for domain in domains {
                out.push_str(&format!("  [{}] ({}) {}\n", domain.id, domain.initial(), domain.name));
            }
            out.push_str("Type `open <id>` to manage a domain's accounts, `logout` to sign out.\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use vulkan_client::ApiError;

    use super::*;

    fn fixture() -> Vec<Domain> {
        vec![Domain::new("1", "empresa.com"), Domain::new("2", "startup.io")]
    }

    #[test]
    fn renders_list_with_initials() {
        let text = render_domains(&QueryState::Success(fixture()));
        assert!(text.contains("[1] (E) empresa.com"));
        assert!(text.contains("[2] (S) startup.io"));
    }

    #[test]
    fn renders_empty_and_error_states() {
        assert!(render_domains(&QueryState::Success(Vec::new())).contains("No domains found."));
        let text = render_domains(&QueryState::Error(ApiError::Transport("refused".into())));
        assert!(text.contains("Error loading domains: refused"));
        assert!(render_domains(&QueryState::Pending).contains("Loading domains..."));
    }

    #[test]
    fn finds_domain_by_id_or_name() {
        let domains = fixture();
        assert_eq!(find_domain(&domains, "2").map(|d| d.name.as_str()), Some("startup.io"));
        assert_eq!(find_domain(&domains, "EMPRESA.COM").map(|d| d.id.as_str()), Some("1"));
        assert!(find_domain(&domains, "other.org").is_none());
    }
}
