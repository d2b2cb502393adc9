use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::fmt;

/// `<#123>` mention markup or a bare snowflake id
static CHANNEL_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:<#(\d{1,20})>|(\d{15,20}))$").expect("valid channel pattern"));

/// A text channel, addressed by its platform id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelRef {
    pub id: u64,
}

impl ChannelRef {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// Parse a channel argument as typed in chat
    pub fn parse(input: &str) -> Option<Self> {
        let caps = CHANNEL_REFERENCE.captures(input.trim())?;
        let digits = caps.get(1).or_else(|| caps.get(2))?;
        let id: u64 = digits.as_str().parse().ok()?;
        (id != 0).then_some(Self { id })
    }

    /// Resolve a channel argument against the guild's text channels. An id or
    /// mention must name one of them; anything else is matched by exact name.
    pub fn resolve<'a, I>(argument: &str, channels: I) -> Option<Self>
    where
        I: IntoIterator<Item = (ChannelRef, &'a str)>,
    {
        let argument = argument.trim();
        let mut channels = channels.into_iter();
        let found = match Self::parse(argument) {
            Some(wanted) => channels.find(|(channel, _)| *channel == wanted),
            None => channels.find(|(_, name)| *name == argument),
        };
        found.map(|(channel, _)| channel)
    }

    /// Mention markup, rendered by the client as `#channel-name`
    pub fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mention())
    }
}
