//! Terminal driver for the project board.
//!
//! # Responsibility
//! - Compose the headless board views around the shared project state.
//! - Turn stdin commands into form submissions and drag gestures.

use clap::Parser;
use projectboard_core::{
    attach, core_version, default_log_level, init_logging, project_state, DragError, DragGesture,
    DragPhase, Host, InsertPosition, ListKind, ProjectInput, ProjectItem, ProjectList,
    ProjectState,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

const HELP: &str = "\
commands:
  add <title> | <description> | <people>   submit a new project
  drag <id-prefix> <active|finished>       drag a project onto a list and drop it
  cancel <id-prefix> <active|finished>     drag a project over a list and abandon it
  show                                     print both lists
  help                                     print this help
  quit                                     exit";

#[derive(Debug, Parser)]
#[command(name = "projectboard", version, about = "Project board in the terminal")]
struct Cli {
    /// One of trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "PROJECTBOARD_LOG_LEVEL")]
    log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "PROJECTBOARD_LOG_DIR")]
    log_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Add {
        title: String,
        description: String,
        people: String,
    },
    Drag {
        id_prefix: String,
        target: ListKind,
    },
    Cancel {
        id_prefix: String,
        target: ListKind,
    },
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    match verb {
        "add" => {
            let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
            let [title, description, people] = parts.as_slice() else {
                return Err("usage: add <title> | <description> | <people>".to_string());
            };
            Ok(Command::Add {
                title: title.to_string(),
                description: description.to_string(),
                people: people.to_string(),
            })
        }
        "drag" | "cancel" => {
            let mut args = rest.split_whitespace();
            let (Some(id_prefix), Some(list), None) = (args.next(), args.next(), args.next())
            else {
                return Err(format!("usage: {verb} <id-prefix> <active|finished>"));
            };
            let target = parse_list_kind(list)?;
            let id_prefix = id_prefix.to_string();
            if verb == "drag" {
                Ok(Command::Drag { id_prefix, target })
            } else {
                Ok(Command::Cancel { id_prefix, target })
            }
        }
        "show" => Ok(Command::Show),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

fn parse_list_kind(value: &str) -> Result<ListKind, String> {
    match value.to_ascii_lowercase().as_str() {
        "active" => Ok(ListKind::Active),
        "finished" => Ok(ListKind::Finished),
        other => Err(format!("unknown list `{other}`; expected active|finished")),
    }
}

struct Board {
    app: Host,
    input: ProjectInput,
    active: ProjectList,
    finished: ProjectList,
}

impl Board {
    fn new(state: Arc<ProjectState>) -> Self {
        let input = ProjectInput::new(Arc::clone(&state));
        let active = ProjectList::new(ListKind::Active, Arc::clone(&state));
        let finished = ProjectList::new(ListKind::Finished, state);

        let mut app = Host::new("app");
        attach(&mut app, active.element().clone(), InsertPosition::BeforeEnd);
        attach(&mut app, finished.element().clone(), InsertPosition::BeforeEnd);
        attach(&mut app, input.element().clone(), InsertPosition::AfterBegin);

        Self {
            app,
            input,
            active,
            finished,
        }
    }

    fn list(&self, kind: ListKind) -> &ProjectList {
        match kind {
            ListKind::Active => &self.active,
            ListKind::Finished => &self.finished,
        }
    }

    fn find_item(&self, id_prefix: &str) -> Result<ProjectItem, String> {
        let mut matches: Vec<ProjectItem> = [&self.active, &self.finished]
            .into_iter()
            .flat_map(|list| list.items())
            .filter(|item| item.project().id.as_str().starts_with(id_prefix))
            .collect();
        match matches.len() {
            0 => Err(format!("no project id starts with `{id_prefix}`")),
            1 => Ok(matches.remove(0)),
            n => Err(format!("`{id_prefix}` matches {n} projects; use a longer prefix")),
        }
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::Add {
                title,
                description,
                people,
            } => {
                self.input.set_title(title);
                self.input.set_description(description);
                self.input.set_people(people);
                match self.input.submit() {
                    Ok(id) => writeln!(out, "added {id}")?,
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            Command::Drag { id_prefix, target } => match self.find_item(&id_prefix) {
                Ok(item) => self.drag(&item, target, true, out)?,
                Err(message) => writeln!(out, "{message}")?,
            },
            Command::Cancel { id_prefix, target } => match self.find_item(&id_prefix) {
                Ok(item) => self.drag(&item, target, false, out)?,
                Err(message) => writeln!(out, "{message}")?,
            },
            Command::Show => self.render(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn drag(
        &self,
        item: &ProjectItem,
        kind: ListKind,
        release: bool,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let target = self.list(kind);
        let outcome = run_gesture(item, target, release);
        match outcome {
            Ok(phase) => writeln!(
                out,
                "{} -> {}: {:?}",
                item.project().title,
                kind.as_str(),
                phase
            ),
            Err(err) => writeln!(out, "{err}"),
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        for element in self.app.elements() {
            let list = if element.id == self.active.element().id {
                &self.active
            } else if element.id == self.finished.element().id {
                &self.finished
            } else {
                continue;
            };
            writeln!(out, "{}", list.heading())?;
            let items = list.items();
            if items.is_empty() {
                writeln!(out, "  (empty)")?;
            }
            for item in items {
                let content = item.content();
                let id = item.project().id.as_str();
                writeln!(
                    out,
                    "  [{}] {} - {}",
                    &id[..id.len().min(8)],
                    content.title,
                    content.assigned
                )?;
                writeln!(out, "      {}", content.description)?;
            }
        }
        Ok(())
    }
}

fn run_gesture(
    item: &ProjectItem,
    target: &ProjectList,
    release: bool,
) -> Result<DragPhase, DragError> {
    let mut gesture = DragGesture::new();
    gesture.start(item)?;
    match gesture.over(target)? {
        DragPhase::Over if release => gesture.drop(item, target),
        _ => gesture.cancel(item),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut board = Board::new(project_state());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if writeln!(out, "projectboard {} (type `help`)", core_version()).is_err() {
        return;
    }

    for line in io::stdin().lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let keep_going = match parse_command(&line) {
            Ok(command) => board.execute(command, &mut out),
            Err(message) => writeln!(out, "{message}").map(|()| true),
        };
        match keep_going {
            Ok(true) => {}
            Ok(false) | Err(_) => break,
        }
    }
}
