//! # snackbot
//!
//! A minimal IRC bot. It connects to one server, joins a few channels,
//! shows the traffic it sees, and reacts to a handful of phrases:
//!
//! - `PING :<token>` → `PONG`
//! - `\x01VERSION\x01` → the version line
//! - `<nick>: hello` → `Hello, <sender>`
//! - `<nick>: !quit` → `QUIT :Bye!`, then exit
//! - `botsnack` → `<3`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snackbot::prelude::*;
//!
//! # async fn start() -> Result<(), BotError> {
//! let server: ServerAddr = "irc.example.net:6667".parse()?;
//! let config = BotConfig::builder("snack").channel("#snacks").build()?;
//! let Shutdown::Quit = snackbot::run(&server, config).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod dispatch;
mod error;
mod notice;
mod rules;
mod session;

pub use config::{
    BotConfig, BotConfigBuilder, ConfigError, PongToken, ServerAddr, VersionReply, DEFAULT_PORT,
};
pub use dispatch::{DispatchState, Dispatcher, Outcome};
pub use error::BotError;
pub use notice::Notice;
pub use rules::{addressed_remainder, Action, CommandRules, Rule, Trigger};
pub use session::{run, Session, Shutdown};

pub mod prelude {
    pub use crate::{
        Action, BotConfig, BotError, CommandRules, Dispatcher, Notice, Rule, ServerAddr,
        Session, Shutdown, Trigger,
    };
    pub use snackbot_protocol::{ChatEvent, Command, Identity};
    pub use snackbot_transport::{LineSink, LineSource};
}
