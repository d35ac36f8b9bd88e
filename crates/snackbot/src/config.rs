//! Bot configuration, fixed at startup.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// How a CTCP VERSION query is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionReply {
    /// Send `<nick> <version>` as a bare line, with no PRIVMSG framing.
    ///
    /// Most servers reject this as an unknown command. It is the default
    /// because existing deployments expect exactly that line.
    #[default]
    Raw,
    /// Send `NOTICE <sender> :\x01VERSION <nick> <version>\x01`.
    CtcpNotice,
}

/// Which part of a `PING :<token>` line is echoed in the PONG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PongToken {
    /// Drop the final byte of the token: `PING :abc` → `PONG :ab`.
    #[default]
    TrimLast,
    /// Echo the token unchanged: `PING :abc` → `PONG :abc`.
    Echo,
}

impl PongToken {
    /// Applies the policy to a token taken from a PING line.
    pub fn apply(self, token: &[u8]) -> &[u8] {
        match self {
            Self::TrimLast => token.split_last().map_or(token, |(_, rest)| rest),
            Self::Echo => token,
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors raised while building a [`BotConfig`] or a [`ServerAddr`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("server address is empty")]
    MissingServer,

    #[error("invalid port in {0:?}")]
    InvalidPort(String),

    #[error("nick is empty")]
    MissingNick,

    #[error("invalid nick {0:?}")]
    InvalidNick(String),

    #[error("at least one channel is required")]
    NoChannels,

    #[error("invalid channel {0:?}")]
    InvalidChannel(String),

    #[error("queue capacity must be at least 1")]
    InvalidQueueCapacity,
}

// ---------------------------------------------------------------------------
// ServerAddr
// ---------------------------------------------------------------------------

/// Port used when the address does not name one.
pub const DEFAULT_PORT: u16 = 6667;

/// A `host[:port]` pair as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    pub host: String,
    pub port: u16,
}

impl FromStr for ServerAddr {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::MissingServer);
        }

        let parse_port =
            |port: &str| port.parse::<u16>().map_err(|_| ConfigError::InvalidPort(s.to_string()));

        // [v6]:port
        if let Some(rest) = s.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| ConfigError::InvalidPort(s.to_string()))?;
            let port = match tail.strip_prefix(':') {
                Some(port) => parse_port(port)?,
                None if tail.is_empty() => DEFAULT_PORT,
                None => return Err(ConfigError::InvalidPort(s.to_string())),
            };
            return Ok(Self {
                host: host.to_string(),
                port,
            });
        }

        match s.split_once(':') {
            // A bare v6 literal has more than one colon and no port.
            Some((_, tail)) if tail.contains(':') => Ok(Self {
                host: s.to_string(),
                port: DEFAULT_PORT,
            }),
            Some((host, port)) if !host.is_empty() => Ok(Self {
                host: host.to_string(),
                port: parse_port(port)?,
            }),
            Some(_) => Err(ConfigError::MissingServer),
            None => Ok(Self {
                host: s.to_string(),
                port: DEFAULT_PORT,
            }),
        }
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

// ---------------------------------------------------------------------------
// BotConfig
// ---------------------------------------------------------------------------

/// Identity and behaviour of the bot, read-only once built.
///
/// The channel list always ends up containing the nick itself, so private
/// messages (whose target is the nick) are treated like any other channel.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub(crate) nick: String,
    pub(crate) channels: Vec<String>,
    pub(crate) realname: String,
    pub(crate) respond_to_commands: bool,
    pub(crate) version: String,
    pub(crate) mode_grant: String,
    pub(crate) version_reply: VersionReply,
    pub(crate) pong_token: PongToken,
    pub(crate) quit_reason: String,
    pub(crate) queue_capacity: usize,
    pub(crate) shutdown_timeout: Duration,
}

impl BotConfig {
    /// Starts a builder for a bot called `nick`.
    pub fn builder(nick: &str) -> BotConfigBuilder {
        BotConfigBuilder::new(nick)
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Channels joined at connect time, in order, without duplicates.
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn respond_to_commands(&self) -> bool {
        self.respond_to_commands
    }
}

/// Builder for [`BotConfig`].
///
/// ```rust
/// use snackbot::BotConfig;
///
/// let config = BotConfig::builder("snack")
///     .channel("#rust")
///     .channel("#rust")
///     .build()
///     .unwrap();
/// assert_eq!(config.channels(), ["#rust", "snack"]);
/// ```
#[derive(Debug, Clone)]
pub struct BotConfigBuilder {
    nick: String,
    channels: Vec<String>,
    realname: String,
    respond_to_commands: bool,
    version: String,
    mode_grant: String,
    version_reply: VersionReply,
    pong_token: PongToken,
    quit_reason: String,
    queue_capacity: usize,
    shutdown_timeout: Duration,
}

impl BotConfigBuilder {
    /// Creates a builder with default settings.
    pub fn new(nick: &str) -> Self {
        Self {
            nick: nick.to_string(),
            channels: Vec::new(),
            realname: "snackbot".to_string(),
            respond_to_commands: true,
            version: "v1.0".to_string(),
            mode_grant: "+Bix".to_string(),
            version_reply: VersionReply::default(),
            pong_token: PongToken::default(),
            quit_reason: "Bye!".to_string(),
            queue_capacity: 1000,
            shutdown_timeout: Duration::from_secs(2),
        }
    }

    /// Adds a channel to join.
    pub fn channel(mut self, channel: &str) -> Self {
        self.channels.push(channel.to_string());
        self
    }

    /// Adds several channels to join, in order.
    pub fn channels<I>(mut self, channels: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.channels
            .extend(channels.into_iter().map(|c| c.as_ref().to_string()));
        self
    }

    /// Sets the realname sent with USER.
    pub fn realname(mut self, realname: &str) -> Self {
        self.realname = realname.to_string();
        self
    }

    /// Turns the addressed command rules on or off. Off gives the quiet
    /// variant: it displays traffic, answers PING and VERSION, and still
    /// replies to rules that need no addressing, such as `botsnack`.
    pub fn respond_to_commands(mut self, enabled: bool) -> Self {
        self.respond_to_commands = enabled;
        self
    }

    /// Sets the version string announced on VERSION queries.
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Sets the user-mode flags requested right after joining.
    pub fn mode_grant(mut self, flags: &str) -> Self {
        self.mode_grant = flags.to_string();
        self
    }

    pub fn version_reply(mut self, policy: VersionReply) -> Self {
        self.version_reply = policy;
        self
    }

    pub fn pong_token(mut self, policy: PongToken) -> Self {
        self.pong_token = policy;
        self
    }

    pub fn quit_reason(mut self, reason: &str) -> Self {
        self.quit_reason = reason.to_string();
        self
    }

    /// Sets the capacity of the inbound and outbound line queues.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Bounds how long the final QUIT flush may take.
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Validates the settings and produces the config.
    ///
    /// Duplicate channels are dropped, keeping the first occurrence, and
    /// the nick is appended when it is not already listed.
    pub fn build(self) -> Result<BotConfig, ConfigError> {
        validate_nick(&self.nick)?;
        if self.channels.is_empty() {
            return Err(ConfigError::NoChannels);
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::InvalidQueueCapacity);
        }

        let mut seen = HashSet::new();
        let mut channels = Vec::with_capacity(self.channels.len() + 1);
        for channel in self.channels {
            if !is_valid_target(&channel) {
                return Err(ConfigError::InvalidChannel(channel));
            }
            if seen.insert(channel.clone()) {
                channels.push(channel);
            }
        }
        if !seen.contains(&self.nick) {
            channels.push(self.nick.clone());
        }

        Ok(BotConfig {
            nick: self.nick,
            channels,
            realname: self.realname,
            respond_to_commands: self.respond_to_commands,
            version: self.version,
            mode_grant: self.mode_grant,
            version_reply: self.version_reply,
            pong_token: self.pong_token,
            quit_reason: self.quit_reason,
            queue_capacity: self.queue_capacity,
            shutdown_timeout: self.shutdown_timeout,
        })
    }
}

fn validate_nick(nick: &str) -> Result<(), ConfigError> {
    if nick.is_empty() {
        return Err(ConfigError::MissingNick);
    }
    if !is_valid_target(nick) || nick.starts_with(['#', '&', ':']) {
        return Err(ConfigError::InvalidNick(nick.to_string()));
    }
    Ok(())
}

/// A target must be one non-empty word with no control characters.
fn is_valid_target(target: &str) -> bool {
    !target.is_empty()
        && !target
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == ',')
}
