use crate::core_command::error::CommandError;

/// A parsed command line: one verb plus its raw argument.
///
/// Commands are ephemeral — parsed from a received line, dispatched,
/// discarded.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Command {
    Cd(String),
    Mkdir(String),
    Rm(String),
    Ul(String),
    Dl(String),
    Exit,
}

impl Command {
    /// Parses a command line.
    ///
    /// The verb is everything before the first space and must match one of
    /// the known verbs exactly. A verb appearing as a substring of an
    /// argument (a path containing `rm`, say) never selects a command.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(' ') {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb {
            "cd" => Self::with_arg("cd", arg, Command::Cd),
            "mkdir" => Self::with_arg("mkdir", arg, Command::Mkdir),
            "rm" => Self::with_arg("rm", arg, Command::Rm),
            "ul" => Self::with_arg("ul", arg, Command::Ul),
            "dl" => Self::with_arg("dl", arg, Command::Dl),
            // exit takes no argument; anything trailing is ignored.
            "exit" => Ok(Command::Exit),
            _ => Err(CommandError::UnknownVerb(verb.to_string())),
        }
    }

    /// The verb keyword, for logging.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Cd(_) => "cd",
            Command::Mkdir(_) => "mkdir",
            Command::Rm(_) => "rm",
            Command::Ul(_) => "ul",
            Command::Dl(_) => "dl",
            Command::Exit => "exit",
        }
    }

    fn with_arg(
        verb: &'static str,
        arg: &str,
        build: fn(String) -> Command,
    ) -> Result<Command, CommandError> {
        if arg.is_empty() {
            return Err(CommandError::MissingArgument(verb));
        }
        Ok(build(arg.to_string()))
    }
}
