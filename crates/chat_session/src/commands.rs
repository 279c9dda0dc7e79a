use assistant_provider::ProbeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Clear,
    Dismiss,
    Quit,
    Probe(ProbeKind),
    Unknown(String),
}

pub fn parse_slash_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let command = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_string();

    let parsed = match command.as_str() {
        "/help" => SlashCommand::Help,
        "/clear" => SlashCommand::Clear,
        "/dismiss" => SlashCommand::Dismiss,
        "/quit" => SlashCommand::Quit,
        "/health" => SlashCommand::Probe(ProbeKind::Health),
        "/stats" => SlashCommand::Probe(ProbeKind::Stats),
        "/commands" => SlashCommand::Probe(ProbeKind::Commands),
        _ => SlashCommand::Unknown(command),
    };

    Some(parsed)
}
