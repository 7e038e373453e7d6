use std::str::FromStr;

use itertools::Itertools;

use crate::error::{ApiError, ApiResult};
use crate::model::channel::{ChannelKind, Command};

/// One line of operator input.
///
/// ```text
/// <group> <channel> <command>
/// <group> transitiontime <n|none>
/// <group> refresh
/// dump
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ConsoleCommand {
    Channel {
        group: String,
        channel: ChannelKind,
        command: Command,
    },
    TransitionTime {
        group: String,
        transition_time: Option<u16>,
    },
    Refresh {
        group: String,
    },
    Dump,
}

fn invalid(line: &str) -> ApiError {
    ApiError::InvalidInput(line.to_string())
}

impl FromStr for ConsoleCommand {
    type Err = ApiError;

    fn from_str(line: &str) -> ApiResult<Self> {
        let mut words = line.split_whitespace();

        let Some(first) = words.next() else {
            return Err(invalid(line));
        };

        if first == "dump" {
            return Ok(Self::Dump);
        }

        let group = first.to_string();

        match words.next() {
            Some("refresh") => Ok(Self::Refresh { group }),
            Some("transitiontime") => {
                let transition_time = match words.next() {
                    Some("none") => None,
                    Some(value) => Some(value.parse().map_err(|_| invalid(line))?),
                    None => return Err(invalid(line)),
                };
                Ok(Self::TransitionTime {
                    group,
                    transition_time,
                })
            }
            Some(channel) => {
                let channel: ChannelKind = channel.parse()?;
                let text = words.join(" ");
                if text.is_empty() {
                    return Err(invalid(line));
                }
                Ok(Self::Channel {
                    group,
                    channel,
                    command: Command::parse(channel, &text)?,
                })
            }
            None => Err(invalid(line)),
        }
    }
}
