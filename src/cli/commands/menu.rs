//! Interactive menu loop
//!
//! Reads choices and field values line by line from `input` and writes prompts
//! and results to `output`. Rejected requests are reported and control returns
//! to the menu; end of input exits the loop.

use gradebook::core::gpa::summarize;
use gradebook::core::{report, CourseUpdate, GradebookError, RecordStore, Storage};
use gradebook::error;
use std::io::{self, BufRead, Write};

const MENU: &str = "===== Gradebook Menu =====
1. Add course
2. Update course
3. Delete course
4. View gradebook
5. GPA summary
0. Exit";

/// Run the menu until the user chooses Exit or input ends
///
/// # Errors
/// Returns an error only if reading input or writing output fails.
pub fn run<S, R, W>(store: &mut RecordStore<S>, input: &mut R, output: &mut W) -> io::Result<()>
where
    S: Storage,
    R: BufRead,
    W: Write,
{
    let mut session = Session {
        store,
        input,
        output,
    };
    session.run()
}

struct Session<'a, S: Storage, R, W> {
    store: &'a mut RecordStore<S>,
    input: &'a mut R,
    output: &'a mut W,
}

impl<S: Storage, R: BufRead, W: Write> Session<'_, S, R, W> {
    fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Choose: ")? else {
                break;
            };

            match choice.trim() {
                "1" => self.add_course()?,
                "2" => self.update_course()?,
                "3" => self.delete_course()?,
                "4" => self.view_courses()?,
                "5" => self.gpa_summary()?,
                "0" => break,
                _ => writeln!(self.output, "Invalid!\n")?,
            }
        }
        Ok(())
    }

    /// Print `text` and read one line without its line ending; `None` at end of input
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Prompt for a number; `Ok(None)` means the answer was rejected or input ended
    fn prompt_number(&mut self, text: &str) -> io::Result<Option<f64>> {
        let Some(answer) = self.prompt(text)? else {
            return Ok(None);
        };
        match answer.trim().parse::<f64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                writeln!(self.output, "Invalid number!\n")?;
                Ok(None)
            }
        }
    }

    /// Prompt for an optional replacement; blank keeps the old value
    fn prompt_keep(&mut self, text: &str) -> io::Result<Option<Option<String>>> {
        Ok(self
            .prompt(text)?
            .map(|answer| (!answer.trim().is_empty()).then_some(answer)))
    }

    /// Prompt for an optional numeric replacement; blank keeps the old value
    fn prompt_keep_number(&mut self, text: &str) -> io::Result<Option<Option<f64>>> {
        let Some(answer) = self.prompt_keep(text)? else {
            return Ok(None);
        };
        match answer {
            None => Ok(Some(None)),
            Some(value) => match value.trim().parse::<f64>() {
                Ok(number) => Ok(Some(Some(number))),
                Err(_) => {
                    writeln!(self.output, "Invalid number!\n")?;
                    Ok(None)
                }
            },
        }
    }

    fn add_course(&mut self) -> io::Result<()> {
        let Some(code) = self.prompt("Course code: ")? else {
            return Ok(());
        };
        if self.store.contains(&code) {
            return writeln!(self.output, "Course already exists!\n");
        }

        let Some(name) = self.prompt("Course name: ")? else {
            return Ok(());
        };
        let Some(credits) = self.prompt_number("Credits: ")? else {
            return Ok(());
        };
        let Some(score) = self.prompt_number("Score (0–10): ")? else {
            return Ok(());
        };
        let Some(semester) = self.prompt("Semester: ")? else {
            return Ok(());
        };

        match self.store.create(&code, &name, credits, score, &semester) {
            Ok(()) => writeln!(self.output, "Added!\n"),
            Err(e) => self.report(&e),
        }
    }

    fn update_course(&mut self) -> io::Result<()> {
        let Some(code) = self.prompt("Course code to update: ")? else {
            return Ok(());
        };
        let Some(old) = self.store.get(&code).cloned() else {
            return writeln!(self.output, "Not found!\n");
        };

        writeln!(self.output, "Press Enter to keep old value.")?;
        let Some(name) = self.prompt_keep(&format!("New name ({}): ", old.name))? else {
            return Ok(());
        };
        let Some(credits) = self.prompt_keep_number(&format!("New credits ({}): ", old.credits))?
        else {
            return Ok(());
        };
        let Some(score) = self.prompt_keep_number(&format!("New score ({}): ", old.score))? else {
            return Ok(());
        };
        let Some(semester) = self.prompt_keep(&format!("New semester ({}): ", old.semester))?
        else {
            return Ok(());
        };

        let update = CourseUpdate {
            name,
            credits,
            score,
            semester,
        };
        match self.store.update(&code, &update) {
            Ok(()) => writeln!(self.output, "Updated!\n"),
            Err(e) => self.report(&e),
        }
    }

    fn delete_course(&mut self) -> io::Result<()> {
        let Some(code) = self.prompt("Course to delete: ")? else {
            return Ok(());
        };
        match self.store.delete(&code) {
            Ok(_) => writeln!(self.output, "Deleted!\n"),
            Err(e) => self.report(&e),
        }
    }

    fn view_courses(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", report::course_table(self.store.list()))
    }

    fn gpa_summary(&mut self) -> io::Result<()> {
        let summary = summarize(self.store.records());
        if !summary.is_empty() {
            writeln!(self.output)?;
        }
        writeln!(self.output, "{}", report::gpa_summary(&summary))
    }

    fn report(&mut self, err: &GradebookError) -> io::Result<()> {
        match err {
            GradebookError::AlreadyExists(_) => writeln!(self.output, "Course already exists!\n"),
            GradebookError::NotFound(_) => writeln!(self.output, "Not found!\n"),
            GradebookError::InvalidScore(_) => writeln!(self.output, "Invalid score!\n"),
            GradebookError::InvalidCredits(_) => writeln!(self.output, "Invalid credits!\n"),
            GradebookError::InvalidCode => writeln!(self.output, "Invalid course code!\n"),
            GradebookError::Io(_) | GradebookError::Parse(_) => {
                error!("Failed to save gradebook: {err}");
                writeln!(self.output, "✗ Failed to save gradebook: {err}\n")
            }
        }
    }
}
