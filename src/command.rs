use crate::models::{PredefinedTaskId, TaskId};
use chrono::NaiveDate;
use std::str::FromStr;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Complete(TaskId),
    Remove(TaskId),
    Daily(TaskId, bool),
    Pick(Option<PredefinedTaskId>),
    Name(String),
    Description(String),
    Exp(u32),
    Due(NaiveDate),
    Repeat(bool),
    Add,
    Suggest,
    SuggestName(String),
    SuggestExp(u32),
    SendSuggestion,
    Close,
    Backdrop,
    Sync,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  complete <id>            mark a task done
  remove <id>              delete a task (asks first)
  daily <id> on|off        set the daily flag
  pick <id>|none           fill the new-task form from a predefined task
  name <text>              new-task name
  desc <text>              new-task description
  exp <n>                  new-task exp
  due <YYYY-MM-DD>         new-task due date
  repeat on|off            new task is daily
  add                      submit the new-task form
  suggest                  open the suggestion form
  suggest-name <text>      suggested task name
  suggest-exp <n>          suggested exp
  send-suggestion          submit the suggestion
  close | backdrop         close the suggestion form
  sync                     reload from the service
  show                     print the dashboard
  quit";

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "complete" => Self::Complete(number(rest, "task id")?),
            "remove" => Self::Remove(number(rest, "task id")?),
            "daily" => {
                let (id, flag) = rest
                    .split_once(char::is_whitespace)
                    .ok_or("usage: daily <id> on|off")?;
                Self::Daily(number(id, "task id")?, switch(flag.trim())?)
            }
            "pick" if rest == "none" || rest.is_empty() => Self::Pick(None),
            "pick" => Self::Pick(Some(number(rest, "predefined task id")?)),
            "name" => Self::Name(rest.to_string()),
            "desc" => Self::Description(rest.to_string()),
            "exp" => Self::Exp(number(rest, "exp")?),
            "due" => Self::Due(
                rest.parse()
                    .map_err(|_| format!("invalid date '{rest}', expected YYYY-MM-DD"))?,
            ),
            "repeat" => Self::Repeat(switch(rest)?),
            "add" => Self::Add,
            "suggest" => Self::Suggest,
            "suggest-name" => Self::SuggestName(rest.to_string()),
            "suggest-exp" => Self::SuggestExp(number(rest, "exp")?),
            "send-suggestion" => Self::SendSuggestion,
            "close" => Self::Close,
            "backdrop" => Self::Backdrop,
            "sync" => Self::Sync,
            "show" | "" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}', try 'help'")),
        };
        Ok(command)
    }
}

fn number<T: FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid {what} '{raw}'"))
}

fn switch(raw: &str) -> Result<bool, String> {
    match raw {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        other => Err(format!("expected on or off, got '{other}'")),
    }
}
