//! Interactive menu over a [`StudentStore`].
//!
//! The shell reads one line at a time from any `BufRead` and renders to any
//! `Write`. Store failures are printed and the loop carries on; only end of
//! input or the Exit entry stop it.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use owo_colors::OwoColorize;

use crate::storage::StudentStore;
use crate::ui::{self, Theme};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Menu entries, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SaveStudent = 1,
    LoadAll = 2,
    Search = 3,
    Delete = 4,
    Exit = 5,
}

impl MenuChoice {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::SaveStudent),
            2 => Some(Self::LoadAll),
            3 => Some(Self::Search),
            4 => Some(Self::Delete),
            5 => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellOptions {
    /// Clear the terminal before drawing the menu
    pub clear_screen: bool,
    /// Wait for ENTER after each action
    pub pause: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            clear_screen: true,
            pause: true,
        }
    }
}

type Flow = ControlFlow<()>;

pub struct Shell<'s, R, W> {
    store: &'s StudentStore,
    input: R,
    out: W,
    theme: Theme,
    options: ShellOptions,
}

impl<'s, R: BufRead, W: Write> Shell<'s, R, W> {
    pub fn new(store: &'s StudentStore, input: R, out: W) -> Self {
        Self {
            store,
            input,
            out,
            theme: ui::theme().clone(),
            options: ShellOptions::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_options(mut self, options: ShellOptions) -> Self {
        self.options = options;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the user picks Exit or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(code) = self.show_menu()? else {
                break;
            };

            let flow = match MenuChoice::from_code(code) {
                Some(MenuChoice::Exit) => break,
                Some(MenuChoice::SaveStudent) => self.save_student()?,
                Some(MenuChoice::LoadAll) => self.load_all()?,
                Some(MenuChoice::Search) => self.search()?,
                Some(MenuChoice::Delete) => self.delete()?,
                None => {
                    ui::error(&mut self.out, &self.theme, "Invalid choice.")?;
                    Flow::Continue(())
                }
            };

            if flow.is_break() || self.pause()?.is_break() {
                break;
            }
        }

        writeln!(self.out, "Goodbye!")?;
        self.out.flush()
    }

    fn show_menu(&mut self) -> io::Result<Option<i64>> {
        if self.options.clear_screen {
            write!(self.out, "{}", CLEAR_SCREEN)?;
        }

        let border = "+--------------------------------+";
        writeln!(self.out, "{}", border)?;
        writeln!(self.out, "|{}|", format!("{:^32}", "STUDENT PORTAL").style(self.theme.title.clone()))?;
        writeln!(self.out, "{}", border)?;
        for item in [
            "1. Save Student Data",
            "2. Load All Students",
            "3. Search Student",
            "4. Delete Student",
            "5. Exit",
        ] {
            writeln!(self.out, "| {:<31}|", item)?;
        }
        writeln!(self.out, "{}", border)?;

        self.prompt("Enter your choice: ")?;
        self.read_int()
    }

    fn save_student(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt_line("Enter student name: ")? else {
            return Ok(Flow::Break(()));
        };
        self.prompt("Enter student age: ")?;
        let Some(age) = self.read_int()? else {
            return Ok(Flow::Break(()));
        };

        match self.store.add(&name, age) {
            Ok(id) => ui::success(
                &mut self.out,
                &self.theme,
                &format!("Student saved successfully. (ID: {})", id),
            )?,
            Err(e) => ui::error(&mut self.out, &self.theme, &e.to_string())?,
        }
        Ok(Flow::Continue(()))
    }

    fn load_all(&mut self) -> io::Result<Flow> {
        ui::heading(&mut self.out, &self.theme, "All Students")?;

        match self.store.list_all() {
            Ok(students) if students.is_empty() => {
                ui::warn(&mut self.out, &self.theme, "No students found.")?
            }
            Ok(students) => {
                for student in &students {
                    ui::record_line(&mut self.out, &self.theme, student)?;
                }
            }
            Err(e) => ui::error(&mut self.out, &self.theme, &e.to_string())?,
        }
        Ok(Flow::Continue(()))
    }

    fn search(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt_line("Enter name to search: ")? else {
            return Ok(Flow::Break(()));
        };
        ui::heading(&mut self.out, &self.theme, "Search Results")?;

        match self.store.search_by_name(&name) {
            Ok(Some(student)) => {
                ui::success(&mut self.out, &self.theme, "Student found:")?;
                ui::record_line(&mut self.out, &self.theme, &student)?;
            }
            Ok(None) => ui::warn(&mut self.out, &self.theme, "No student found with that name.")?,
            Err(e) => ui::error(&mut self.out, &self.theme, &e.to_string())?,
        }
        Ok(Flow::Continue(()))
    }

    fn delete(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt_line("Enter name to delete: ")? else {
            return Ok(Flow::Break(()));
        };

        match self.store.delete_by_name(&name) {
            Ok(0) => ui::warn(&mut self.out, &self.theme, "No student found with that name.")?,
            Ok(n) => ui::success(
                &mut self.out,
                &self.theme,
                &format!("Deleted {} student(s).", n),
            )?,
            Err(e) => ui::error(&mut self.out, &self.theme, &e.to_string())?,
        }
        Ok(Flow::Continue(()))
    }

    fn pause(&mut self) -> io::Result<Flow> {
        if !self.options.pause {
            return Ok(Flow::Continue(()));
        }

        write!(self.out, "\n{}", "Press ENTER to continue...".style(self.theme.warn.clone()))?;
        self.out.flush()?;
        match self.read_line()? {
            Some(_) => Ok(Flow::Continue(())),
            None => Ok(Flow::Break(())),
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text.style(self.theme.prompt.clone()))?;
        self.out.flush()
    }

    /// Prompt, then read one trimmed line
    fn prompt_line(&mut self, text: &str) -> io::Result<Option<String>> {
        self.prompt(text)?;
        Ok(self.read_line()?.map(|line| line.trim().to_string()))
    }

    /// Next line without its terminator; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Read lines until one parses as an integer
    fn read_int(&mut self) -> io::Result<Option<i64>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => {
                    write!(
                        self.out,
                        "{}",
                        "Invalid input. Enter a valid number: ".style(self.theme.error.clone())
                    )?;
                    self.out.flush()?;
                }
            }
        }
    }
}

/// Run the shell on the process's stdin/stdout
pub fn run_stdio(store: &StudentStore, options: ShellOptions) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(store, stdin.lock(), stdout.lock())
        .with_options(options)
        .run()
}
