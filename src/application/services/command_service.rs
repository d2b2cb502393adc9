use crate::application::content;
use crate::application::errors::CommandError;
use crate::application::messaging::CommandDispatcher;
use crate::domain::entities::{
    AttachmentSource, AuthorizationList, Command, CommandRegistry, OutboundMessage,
};

/// Service for registering commands and handing them to the dispatcher
pub struct CommandService {
    registry: CommandRegistry,
    prefix: String,
}

impl CommandService {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            prefix: prefix.into(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.registry.register(command);
    }

    /// Role-gated announcement commands
    pub fn register_club_commands(&mut self, admin_roles: &AuthorizationList, logo: &AttachmentSource) {
        self.register(
            Command::new("signup")
                .with_description("Post the membership signup message")
                .with_usage(format!("{}signup [channel]", self.prefix))
                .with_target_channel()
                .with_required_roles(admin_roles.clone())
                .with_handler(|_| Ok(content::signup_messages())),
        );

        let logo = logo.clone();
        self.register(
            Command::new("introduction")
                .with_description("Post the club introduction")
                .with_usage(format!("{}introduction [channel]", self.prefix))
                .with_target_channel()
                .with_required_roles(admin_roles.clone())
                .with_handler(move |_| {
                    // Read on every run, before anything is posted
                    let attachment = logo.load().map_err(|source| CommandError::Asset {
                        path: logo.path.display().to_string(),
                        source,
                    })?;
                    Ok(content::introduction_messages(attachment))
                }),
        );
    }

    /// Registers `help`, covering whatever is registered at the time of the call.
    /// Without arguments it lists the commands the invoker may run; `help <command>`
    /// shows one command's usage.
    pub fn register_help(&mut self) {
        let mut entries: Vec<HelpEntry> = self
            .registry
            .all()
            .map(|cmd| HelpEntry {
                name: cmd.name.clone(),
                usage: cmd
                    .usage
                    .clone()
                    .unwrap_or_else(|| format!("{}{}", self.prefix, cmd.name)),
                description: cmd.description.clone().unwrap_or_default(),
                required_roles: cmd.required_roles.clone(),
            })
            .collect();
        entries.push(HelpEntry {
            name: "help".to_string(),
            usage: format!("{}help [command]", self.prefix),
            description: "Shows this message".to_string(),
            required_roles: None,
        });
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let prefix = self.prefix.clone();
        self.register(
            Command::new("help")
                .with_description("Shows this message")
                .with_usage(format!("{}help [command]", self.prefix))
                .with_handler(move |invocation| {
                    let text = match invocation.args.first() {
                        None => render_listing(&prefix, &entries, &invocation.roles),
                        Some(name) => match entries.iter().find(|entry| entry.name == *name) {
                            Some(entry) => render_command(entry),
                            None => format!("No command called \"{}\" found.", name),
                        },
                    };
                    Ok(vec![OutboundMessage::text(text)])
                }),
        );
    }

    pub fn into_dispatcher(self) -> CommandDispatcher {
        CommandDispatcher::new(self.prefix, self.registry)
    }
}

struct HelpEntry {
    name: String,
    usage: String,
    description: String,
    required_roles: Option<AuthorizationList>,
}

/// Code-block listing of the commands the invoker may run, in name order
fn render_listing(prefix: &str, entries: &[HelpEntry], roles: &[String]) -> String {
    let visible: Vec<&HelpEntry> = entries
        .iter()
        .filter(|entry| {
            entry
                .required_roles
                .as_ref()
                .map_or(true, |required| required.permits(roles))
        })
        .collect();
    let width = visible.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);

    let mut help = String::from("```\nNo Category:\n");
    for entry in visible {
        help.push_str(&format!(
            "  {:<width$} {}\n",
            entry.name,
            entry.description,
            width = width
        ));
    }
    help.push_str(&format!(
        "\nType {}help command for more info on a command.\n```",
        prefix
    ));
    help
}

fn render_command(entry: &HelpEntry) -> String {
    let mut help = format!("```\n{}\n", entry.usage);
    if !entry.description.is_empty() {
        help.push_str(&format!("\n{}\n", entry.description));
    }
    help.push_str("```");
    help
}
