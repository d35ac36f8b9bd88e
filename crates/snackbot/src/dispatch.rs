//! The event dispatcher: the only place that decides what to send.
//!
//! The dispatcher is a plain synchronous state machine. It takes one raw
//! line at a time and returns an [`Outcome`]: the commands to enqueue and
//! the notices to show. It never touches the network, which keeps every
//! rule testable without a socket.
//!
//! For each line, three independent checks run in order:
//!   1. `PING :<token>` → PONG
//!   2. chat grammar → chat handling (below)
//!   3. mode grammar → "mode changed" notice
//!
//! Chat handling:
//!   a. ACTION → shown, no reply
//!   b. exactly `\x01VERSION\x01` → version reply, not shown
//!   c. anything else → shown, then the command rules run
//!
//! With `respond_to_commands` off, rules that need the bot to be addressed
//! are skipped; the others (`botsnack`) still fire.
//!
//! Inbound fields stay as raw bytes all the way into the replies. They are
//! decoded, lossily, only when a [`Notice`] is built.

use snackbot_protocol::{ctcp, parse_mode, parse_ping, parse_privmsg, ChatEvent, Command};

use crate::config::{BotConfig, VersionReply};
use crate::notice::{display_text, Notice};
use crate::rules::{Action, CommandRules};

/// The dispatcher's lifecycle.
///
/// ```text
/// ConnectedIdle ──(!quit)──→ Terminating
/// ```
///
/// There is no way back: once terminating, every further line is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// Waiting for the next line.
    ConnectedIdle,
    /// QUIT has been produced; the session drains it and exits.
    Terminating,
}

/// What handling one line produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Lines to transmit, in order.
    pub outbound: Vec<Command>,
    /// Lines to show locally, in order.
    pub notices: Vec<Notice>,
}

/// Owns the bot's identity and decides responses.
pub struct Dispatcher {
    /// Our current nick. Only this struct reads or writes it.
    nick: String,
    config: BotConfig,
    rules: CommandRules,
    state: DispatchState,
}

impl Dispatcher {
    /// Creates a dispatcher with the stock command rules.
    pub fn new(config: BotConfig) -> Self {
        Self::with_rules(config, CommandRules::builtin())
    }

    /// Creates a dispatcher with a custom rule table.
    pub fn with_rules(config: BotConfig, rules: CommandRules) -> Self {
        Self {
            nick: config.nick.clone(),
            config,
            rules,
            state: DispatchState::ConnectedIdle,
        }
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Registration sequence: NICK, USER, one JOIN per channel, then the
    /// user-mode grant.
    pub fn handshake(&self) -> Vec<Command> {
        let mut out = Vec::with_capacity(self.config.channels.len() + 3);
        out.push(Command::Nick(self.nick.clone().into_bytes()));
        out.push(Command::User {
            user: self.nick.clone().into_bytes(),
            realname: self.config.realname.clone().into_bytes(),
        });
        out.extend(
            self.config
                .channels
                .iter()
                .map(|channel| Command::Join(channel.clone().into_bytes())),
        );
        out.push(Command::Mode {
            flags: self.config.mode_grant.clone().into_bytes(),
            target: self.nick.clone().into_bytes(),
        });
        out
    }

    /// Handles one inbound line.
    pub fn handle_line(&mut self, line: &[u8]) -> Outcome {
        let mut out = Outcome::default();
        if self.state == DispatchState::Terminating {
            return out;
        }

        if let Some(token) = parse_ping(line) {
            tracing::debug!("server ping");
            let token = self.config.pong_token.apply(token);
            out.outbound.push(Command::Pong(token.to_vec()));
        }

        if let Some(event) = parse_privmsg(line) {
            self.handle_chat(event, &mut out);
        }

        if let Some(event) = parse_mode(line) {
            out.notices.push(Notice::ModeChanged {
                channel: display_text(&event.channel),
                nick: display_text(&event.sender.nick),
                modes: display_text(&event.content),
            });
        }

        out
    }

    fn handle_chat(&mut self, event: ChatEvent, out: &mut Outcome) {
        if event.is_action {
            out.notices.push(Notice::Action {
                channel: display_text(&event.channel),
                nick: display_text(&event.sender.nick),
                text: display_text(&event.content),
            });
            return;
        }

        if ctcp::is_version_query(&event.content) {
            tracing::debug!(from = %event.sender, "version query");
            out.outbound.push(self.version_reply(&event));
            return;
        }

        out.notices.push(Notice::Message {
            channel: display_text(&event.channel),
            nick: display_text(&event.sender.nick),
            text: display_text(&event.content),
        });

        let respond = self.config.respond_to_commands;
        let mut replies: Vec<Vec<u8>> = Vec::new();
        let mut quit = false;
        for rule in self.rules.matching(&self.nick, &event.content) {
            if !respond && rule.trigger.requires_address() {
                continue;
            }
            match &rule.action {
                Action::Greet => {
                    let mut text = b"Hello, ".to_vec();
                    text.extend_from_slice(&event.sender.nick);
                    replies.push(text);
                }
                Action::Say(text) => replies.push(text.clone().into_bytes()),
                Action::Quit => {
                    quit = true;
                    break;
                }
            }
        }

        for text in replies {
            self.reply(&event, text, out);
        }

        if quit {
            tracing::info!(by = %event.sender, "quit requested");
            out.outbound
                .push(Command::Quit(self.config.quit_reason.clone().into_bytes()));
            self.state = DispatchState::Terminating;
        }
    }

    /// Replies go back to the channel, or to the sender for a private
    /// message. Only channel replies are echoed locally.
    fn reply(&self, event: &ChatEvent, text: Vec<u8>, out: &mut Outcome) {
        if event.is_private_to(&self.nick) {
            out.outbound.push(Command::privmsg(&event.sender.nick, &text));
            return;
        }

        out.outbound.push(Command::privmsg(&event.channel, &text));
        out.notices.push(Notice::Sent {
            channel: display_text(&event.channel),
            nick: self.nick.clone(),
            text: display_text(&text),
        });
    }

    fn version_reply(&self, event: &ChatEvent) -> Command {
        let text = format!("{} {}", self.nick, self.config.version);
        match self.config.version_reply {
            VersionReply::Raw => Command::Raw(text.into_bytes()),
            VersionReply::CtcpNotice => Command::Notice {
                target: event.sender.nick.clone(),
                text: ctcp::version_reply(&text).into_bytes(),
            },
        }
    }
}
