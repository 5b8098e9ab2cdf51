// Chat command value object

const COMMAND_PREFIXES: [&str; 2] = ["untappd", "/untappd"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    RecentActivity,
    RecentBadges,
    UserSummary { username: String },
    Help,
    Unknown(String),
}

impl ChatCommand {
    /// Parses chat text such as `@bot untappd user alice` or the text of a
    /// `/untappd` slash command, where the prefix is already stripped.
    pub fn parse(text: &str) -> Self {
        let words = text
            .split_whitespace()
            .skip_while(|word| is_mention(word))
            .collect::<Vec<_>>();
        let args = match words.split_first() {
            Some((first, rest))
                if COMMAND_PREFIXES
                    .iter()
                    .any(|prefix| first.eq_ignore_ascii_case(prefix)) =>
            {
                rest
            }
            _ => words.as_slice(),
        };

        match args {
            [] => ChatCommand::RecentActivity,
            [word] if word.eq_ignore_ascii_case("badges") => ChatCommand::RecentBadges,
            [word] if word.eq_ignore_ascii_case("help") => ChatCommand::Help,
            [word, username] if word.eq_ignore_ascii_case("user") => {
                let username = username.trim_start_matches('@');
                if username.is_empty() {
                    ChatCommand::Unknown(text.trim().to_string())
                } else {
                    ChatCommand::UserSummary {
                        username: username.to_string(),
                    }
                }
            }
            _ => ChatCommand::Unknown(text.trim().to_string()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChatCommand::RecentActivity => "recent_activity",
            ChatCommand::RecentBadges => "recent_badges",
            ChatCommand::UserSummary { .. } => "user_summary",
            ChatCommand::Help => "help",
            ChatCommand::Unknown(_) => "unknown",
        }
    }
}

fn is_mention(word: &str) -> bool {
    word.starts_with('@') || (word.starts_with("<@") && word.ends_with('>'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_prefix_means_recent_activity() {
        assert_eq!(ChatCommand::parse("untappd"), ChatCommand::RecentActivity);
        assert_eq!(ChatCommand::parse("@hubot untappd"), ChatCommand::RecentActivity);
        assert_eq!(ChatCommand::parse("   "), ChatCommand::RecentActivity);
    }

    #[test]
    fn parses_badges_and_help_case_insensitively() {
        assert_eq!(ChatCommand::parse("Untappd BADGES"), ChatCommand::RecentBadges);
        assert_eq!(ChatCommand::parse("<@U024BE7LH> untappd help"), ChatCommand::Help);
        assert_eq!(ChatCommand::parse("badges"), ChatCommand::RecentBadges);
    }

    #[test]
    fn parses_user_summary_with_optional_at_sign() {
        assert_eq!(
            ChatCommand::parse("untappd user stephenyeargin"),
            ChatCommand::UserSummary {
                username: "stephenyeargin".to_string()
            }
        );
        assert_eq!(
            ChatCommand::parse("user @heathseals"),
            ChatCommand::UserSummary {
                username: "heathseals".to_string()
            }
        );
    }

    #[test]
    fn anything_else_is_unknown() {
        assert_eq!(
            ChatCommand::parse("untappd user"),
            ChatCommand::Unknown("untappd user".to_string())
        );
        assert_eq!(
            ChatCommand::parse("untappd beer search ipa"),
            ChatCommand::Unknown("untappd beer search ipa".to_string())
        );
        assert_eq!(ChatCommand::parse("untappd user @").kind(), "unknown");
    }
}
