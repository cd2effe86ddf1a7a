use automacro::{codec::parse_int, InputSink, Prompter, Session};
use std::io::{self, BufRead, Write};
use tracing::{error, info};

/// Menu entries, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Quit,
    List,
    Run,
    Create,
    Delete,
    SetDefaultDelay,
    Save,
    Load,
}

impl MenuChoice {
    pub fn from_number(number: i32) -> Option<Self> {
        match number {
            0 => Some(MenuChoice::Quit),
            1 => Some(MenuChoice::List),
            2 => Some(MenuChoice::Run),
            3 => Some(MenuChoice::Create),
            4 => Some(MenuChoice::Delete),
            5 => Some(MenuChoice::SetDefaultDelay),
            6 => Some(MenuChoice::Save),
            7 => Some(MenuChoice::Load),
            _ => None,
        }
    }
}

const MENU: &str = "\n=== Macro Console ===
1) List macros
2) Run macro
3) Create macro
4) Delete macro
5) Set default delay
6) Save
7) Load
0) Quit";

/// Line-based terminal: prompts go out without a newline, answers are read
/// one line at a time.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        let _ = write!(self.output, "{}", prompt);
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Some(line)
            }
            Err(e) => {
                error!("Failed to read input: {}", e);
                None
            }
        }
    }

    fn say(&mut self, message: &str) {
        let _ = writeln!(self.output, "{}", message);
    }
}

/// The interactive menu loop over a [`Session`]
pub struct Shell<R, W, S> {
    console: Console<R, W>,
    session: Session,
    sink: S,
}

impl<R: BufRead, W: Write, S: InputSink> Shell<R, W, S> {
    pub fn new(input: R, output: W, session: Session, sink: S) -> Self {
        Self {
            console: Console::new(input, output),
            session,
            sink,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (W, Session, S) {
        (self.console.into_output(), self.session, self.sink)
    }

    /// Run the menu until the user quits or the input ends, then save
    pub fn run(&mut self) -> io::Result<()> {
        self.console.say("Macro console ready.");
        loop {
            self.console.say(MENU);
            let Some(line) = self.console.read_line("Select option: ") else {
                info!("Input closed, leaving menu");
                break;
            };
            let choice = parse_int(&line).and_then(MenuChoice::from_number);
            match choice {
                Some(MenuChoice::Quit) => break,
                Some(MenuChoice::List) => self.list(),
                Some(MenuChoice::Run) => self.run_macro(),
                Some(MenuChoice::Create) => self.create(),
                Some(MenuChoice::Delete) => self.delete(),
                Some(MenuChoice::SetDefaultDelay) => self.set_default_delay(),
                Some(MenuChoice::Save) => self.save(),
                Some(MenuChoice::Load) => self.load(),
                None => self.console.say("Unknown option."),
            }
        }

        self.flush_session();
        self.console.say("Goodbye!");
        self.console.output.flush()
    }

    fn list(&mut self) {
        let summaries = self.session.store.list();
        if summaries.is_empty() {
            self.console.say("No macros available.");
            return;
        }
        for summary in summaries {
            self.console.say(&format!(
                "{}) {} ({} steps)",
                summary.position, summary.name, summary.step_count
            ));
        }
    }

    /// Ask for a 1-based macro position; `None` when it does not exist
    fn read_position(&mut self, prompt: &str) -> Option<usize> {
        let number = self.console.read_int(prompt)?;
        let position = usize::try_from(number).ok()?;
        self.session.store.get(position).map(|_| position)
    }

    fn run_macro(&mut self) {
        if self.session.store.is_empty() {
            self.console.say("No macros to run.");
            return;
        }
        self.list();
        let Some(position) = self.read_position("Macro number: ") else {
            self.console.say("Invalid macro number.");
            return;
        };
        if self.session.run(position, &mut self.sink).is_some() {
            self.console.say("Done.");
        }
    }

    fn create(&mut self) {
        if self.session.create(&mut self.console) {
            self.console.say("Macro added.");
        }
    }

    fn delete(&mut self) {
        self.list();
        let Some(position) = self.read_position("Macro number to delete: ") else {
            self.console.say("Invalid macro number.");
            return;
        };
        if self.session.delete(position).is_some() {
            self.console.say("Macro removed.");
        }
    }

    fn set_default_delay(&mut self) {
        let accepted = self
            .console
            .read_int("Default delay (ms): ")
            .is_some_and(|ms| self.session.set_default_delay(ms));
        if accepted {
            self.console.say("Default delay set.");
        } else {
            self.console.say("Invalid delay.");
        }
    }

    fn save(&mut self) {
        self.flush_session();
        self.console.say("Saved.");
    }

    /// Write both resources, reporting each failed write
    fn flush_session(&mut self) {
        let report = self.session.save();
        if let Err(e) = &report.config {
            error!("{}", e);
            self.console.say("Failed to write config file.");
        }
        if let Err(e) = &report.macros {
            error!("{}", e);
            self.console.say("Failed to write macros file.");
        }
    }

    fn load(&mut self) {
        self.session.reload();
        self.console.say("Loaded.");
    }
}
