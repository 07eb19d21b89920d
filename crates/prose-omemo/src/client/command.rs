// prose-core-client/prose-omemo
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::client::OmemoClient;
use crate::domain::models::UserId;
use crate::OmemoError;

const COMMAND_PREFIX: &str = "/omemo";

/// The `/omemo` command family.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start(UserId),
    End(UserId),
    Announce,
    Account,
    Device,
    FullJid,
    ShowDevices(UserId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum CommandName {
    Start,
    End,
    Announce,
    Account,
    Device,
    #[strum(serialize = "fulljid")]
    FullJid,
    ShowDevices,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Missing subcommand")]
    MissingSubcommand,
    #[error("Unknown subcommand '{name}'")]
    UnknownSubcommand {
        name: String,
        #[source]
        source: strum::ParseError,
    },
    #[error("'{command}' expects a contact address")]
    MissingArgument { command: String },
    #[error("Unexpected argument '{argument}' for '{command}'")]
    UnexpectedArgument { command: String, argument: String },
    #[error(transparent)]
    InvalidAddress(#[from] jid::Error),
    #[error(transparent)]
    Failed(#[from] OmemoError),
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parses `"/omemo <subcommand> [address]"`. The `/omemo` prefix is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace().peekable();
        if tokens.peek() == Some(&COMMAND_PREFIX) {
            tokens.next();
        }

        let name = tokens.next().ok_or(CommandError::MissingSubcommand)?;
        let command_name =
            CommandName::from_str(name).map_err(|source| CommandError::UnknownSubcommand {
                name: name.to_string(),
                source,
            })?;

        let argument = tokens.next();
        if let Some(extra) = tokens.next() {
            return Err(CommandError::UnexpectedArgument {
                command: command_name.to_string(),
                argument: extra.to_string(),
            });
        }

        let user_id = |argument: Option<&str>| -> Result<UserId, CommandError> {
            let address = argument.ok_or_else(|| CommandError::MissingArgument {
                command: command_name.to_string(),
            })?;
            Ok(UserId::from_address(address)?)
        };

        let command = match command_name {
            CommandName::Start => Command::Start(user_id(argument)?),
            CommandName::End => Command::End(user_id(argument)?),
            CommandName::ShowDevices => Command::ShowDevices(user_id(argument)?),
            CommandName::Announce | CommandName::Account | CommandName::Device
            | CommandName::FullJid => {
                if let Some(argument) = argument {
                    return Err(CommandError::UnexpectedArgument {
                        command: command_name.to_string(),
                        argument: argument.to_string(),
                    });
                }
                match command_name {
                    CommandName::Announce => Command::Announce,
                    CommandName::Account => Command::Account,
                    CommandName::Device => Command::Device,
                    _ => Command::FullJid,
                }
            }
        };

        Ok(command)
    }
}

impl OmemoClient {
    /// Runs `command` and returns the text to show to the user.
    pub async fn execute(&self, command: Command) -> Result<String, CommandError> {
        let output = match command {
            Command::Start(user_id) => {
                let count = self.start_session(&user_id)?;
                format!("Fetching device list of {user_id} and bundles of {count} known device(s).")
            }
            Command::End(user_id) => {
                self.end_session(&user_id);
                format!("Ended OMEMO session with {user_id}.")
            }
            Command::Announce => {
                self.announce().await?;
                format!("Announced device {}.", self.device_id())
            }
            Command::Account => self.account().to_string(),
            Command::Device => self.device_id().to_string(),
            Command::FullJid => self.full_jid().to_string(),
            Command::ShowDevices(user_id) => {
                let devices = self.show_devices(&user_id);
                if devices.is_empty() {
                    format!("No known devices for {user_id}.")
                } else {
                    format!(
                        "Devices of {user_id}: {}",
                        devices
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ")
                    )
                }
            }
        };
        Ok(output)
    }

    /// Parses and runs a command line such as `"/omemo show_devices juliet@capulet.lit"`.
    pub async fn execute_str(&self, line: &str) -> Result<String, CommandError> {
        self.execute(Command::from_str(line)?).await
    }
}
