use crate::codec::parse_int;
use crate::{Action, Macro, MouseButton};
use tracing::debug;

/// Line-based conversation with the user, supplied by the shell
pub trait Prompter {
    /// Show `prompt` and read one line without its terminator.
    /// `None` means the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Show a message line
    fn say(&mut self, message: &str);

    /// Read an integer entry, `None` on end of input or unparsable text
    fn read_int(&mut self, prompt: &str) -> Option<i32> {
        self.read_line(prompt).and_then(|line| parse_int(&line))
    }
}

/// Sub-commands accepted while building a macro
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCommand {
    Move,
    Click,
    Key,
    Delay,
    Done,
    Unknown,
}

impl StepCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "move" => StepCommand::Move,
            "click" => StepCommand::Click,
            "key" => StepCommand::Key,
            "delay" => StepCommand::Delay,
            "done" => StepCommand::Done,
            _ => StepCommand::Unknown,
        }
    }
}

/// Ask for the parameters of one step, reporting invalid entries
fn read_step<P: Prompter + ?Sized>(command: StepCommand, prompter: &mut P) -> Option<Action> {
    match command {
        StepCommand::Move => {
            let dx = prompter.read_int("dx: ");
            let dy = prompter.read_int("dy: ");
            match (dx, dy) {
                (Some(dx), Some(dy)) => Some(Action::Move { dx, dy }),
                _ => {
                    prompter.say("Invalid numbers.");
                    None
                }
            }
        }
        StepCommand::Click => {
            let button = prompter.read_line("left/right: ").unwrap_or_default();
            Some(Action::Click {
                button: MouseButton::from_token(button.trim()),
            })
        }
        StepCommand::Key => match prompter.read_int("Virtual-Key code (e.g. 65 for A): ") {
            Some(vk) => Some(Action::Key { vk }),
            None => {
                prompter.say("Invalid key code.");
                None
            }
        },
        StepCommand::Delay => match prompter.read_int("Delay ms: ") {
            Some(ms) => Some(Action::Delay { ms }),
            None => {
                prompter.say("Invalid delay.");
                None
            }
        },
        StepCommand::Done => None,
        StepCommand::Unknown => {
            prompter.say("Unknown step.");
            None
        }
    }
}

/// Build a macro step by step.
///
/// Returns `None` when the entered name is empty. Otherwise steps are
/// collected until `done` or the end of input, and the macro is returned
/// even if it has no steps.
pub fn author_macro<P: Prompter + ?Sized>(prompter: &mut P) -> Option<Macro> {
    let name = prompter.read_line("Macro name: ").unwrap_or_default();
    if name.is_empty() {
        prompter.say("Name cannot be empty.");
        return None;
    }

    let mut mac = Macro::new(name);
    while let Some(line) = prompter.read_line("Add step (move/click/key/delay/done): ") {
        let command = StepCommand::parse(&line);
        if command == StepCommand::Done {
            break;
        }
        if let Some(action) = read_step(command, prompter) {
            debug!(%action, "Step added");
            mac.push(action);
        }
    }
    Some(mac)
}
