//! Console command parsing.

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Login,
    Open(String),
    New,
    Delete(String),
    Block(String),
    Storage(String),
    Password(String),
    Refresh,
    Back,
    Logout,
    Help,
    Quit,
    Empty,
    /// Unknown command or missing argument, with the message to show.
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Command::Empty;
        };
        let arg = words.next().map(str::to_string);
        let with_arg = |build: fn(String) -> Command, usage: &str| match arg.clone() {
            Some(arg) => build(arg),
            None => Command::Invalid(format!("Usage: {usage}")),
        };
        match name.to_ascii_lowercase().as_str() {
            "go" => with_arg(Command::Go, "go <path>"),
            "login" => Command::Login,
            "open" => with_arg(Command::Open, "open <domain id|name>"),
            "new" => Command::New,
            "delete" => with_arg(Command::Delete, "delete <account id>"),
            "block" => with_arg(Command::Block, "block <account id>"),
            "storage" => with_arg(Command::Storage, "storage <account id>"),
            "password" => with_arg(Command::Password, "password <account id>"),
            "refresh" => Command::Refresh,
            "back" => Command::Back,
            "logout" => Command::Logout,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Invalid(format!("Unknown command `{other}`. Type `help`.")),
        }
    }
}

pub const HELP: &str = "\
Commands:
  go <path>          navigate to a path (/login, /domains, /domains/<id>)
  login              sign in (login page)
  open <id|name>     open a domain (domain list)
  new                create an account (domain page)
  delete <id>        delete an account (domain page)
  block <id>         block or unblock an account (domain page)
  storage <id>       change an account's storage quota (domain page)
  password <id>      change an account's password (domain page)
  refresh            reload the current page
  back               return to the previous page
  logout             sign out
  help               show this help
  quit               leave the console
";
