//! The catalog of commands this client sends.
//!
//! cmus understands a large command language (the same one used on its `:` prompt). Only the
//! small, argument-less subset needed for remote control is modelled here. See the [cmus
//! documentation][cmus-remote] for the meaning of the individual commands.
//!
//! [cmus-remote]: https://cmus.github.io/#documentation

use std::fmt;
use std::str::FromStr;

use crate::errors::UnknownCommand;
use crate::raw::RawCommand;

macro_rules! catalog {
    ($($variant:ident => $label:literal, $wire:literal;)*) => {
        /// A command from the fixed catalog.
        ///
        /// Every command has a human-readable label, used for display and lookup, and the exact
        /// wire string sent to cmus.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Command {
            $(
                #[doc = concat!("`", $wire, "`, labelled \"", $label, "\".")]
                $variant,
            )*
        }

        impl Command {
            /// All commands, in catalog order.
            pub const ALL: &'static [Command] = &[$(Command::$variant),*];

            /// The human-readable label.
            pub fn label(self) -> &'static str {
                match self {
                    $(Command::$variant => $label,)*
                }
            }

            /// The exact text sent to cmus, without the line terminator.
            pub fn wire(self) -> &'static str {
                match self {
                    $(Command::$variant => $wire,)*
                }
            }
        }
    };
}

catalog! {
    Repeat => "Repeat", "toggle repeat";
    Shuffle => "Shuffle", "toggle shuffle";
    Stop => "Stop", "player-stop";
    Next => "Next", "player-next";
    Prev => "Previous", "player-prev";
    Play => "Play", "player-play";
    Pause => "Pause", "player-pause";
    VolumeMute => "Mute", "vol -100%";
    VolumeUp => "Volume +", "vol +10%";
    VolumeDown => "Volume -", "vol -10%";
    Status => "Status", "status";
}

impl Command {
    /// Look up a command by its label or its wire string.
    ///
    /// ```
    /// use cmus_remote::commands::Command;
    ///
    /// assert_eq!(Command::lookup("Volume +"), Ok(Command::VolumeUp));
    /// assert_eq!(Command::lookup("player-next"), Ok(Command::Next));
    /// assert!(Command::lookup("Rewind").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if no command in the catalog has the given label or wire string.
    pub fn lookup(name: &str) -> Result<Command, UnknownCommand> {
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.label() == name || c.wire() == name)
            .ok_or_else(|| UnknownCommand(name.to_owned()))
    }

    /// Create the raw protocol representation for transmission.
    pub fn to_raw(self) -> RawCommand {
        RawCommand::new(self.wire())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::lookup(s)
    }
}

/// All commands paired with their labels, in catalog order, e.g. for building a palette of
/// buttons.
pub fn all() -> impl Iterator<Item = (&'static str, Command)> {
    Command::ALL.iter().map(|&c| (c.label(), c))
}
