//! Terminal display and UI rendering
//!
//! Features:
//! - Question prompt with numbered answer choices
//! - Score/round progress line with threshold coloring
//! - Color-coded feedback with the worked teaching step
//! - Tutorial and completion screens

use std::io::{stdout, Write};

use crossterm::{
    cursor, execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::question::{Question, QuestionKind};
use crate::session::{CompletionSummary, MistakeSummary, ScoreRules};

/// Terminal display manager
pub struct Display;

impl Display {
    pub fn new() -> std::io::Result<Self> {
        Ok(Display)
    }

    /// Clear screen and home the cursor
    pub fn clear(&self) -> std::io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    /// Waypoint banner
    pub fn show_title(&self, title: &str, kind: QuestionKind) -> std::io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Cyan),
            Print(format!("FracQuest :: {} ", title)),
            ResetColor,
            Print(format!("({})\n", kind)),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Tutorial screen with a worked example for the waypoint's question kind
    pub fn show_tutorial(&self, kind: QuestionKind) -> std::io::Result<()> {
        let lines: &[&str] = match kind {
            QuestionKind::Addition => &[
                "Adding fractions:",
                "  1/4 + 2/4  ->  the bottoms match, add the tops  ->  3/4",
                "  1/3 + 1/6  ->  rewrite over sixths: 2/6 + 1/6 = 3/6 = 1/2",
            ],
            QuestionKind::Subtraction => &[
                "Subtracting fractions:",
                "  3/4 - 1/4  ->  the bottoms match, subtract the tops  ->  2/4 = 1/2",
                "  1/2 - 1/6  ->  rewrite over sixths: 3/6 - 1/6 = 2/6 = 1/3",
            ],
            QuestionKind::Comparison => &[
                "Comparing fractions:",
                "  4/5 ? 3/4  ->  cross-multiply: 4 x 4 = 16 and 3 x 5 = 15",
                "  16 is bigger, so 4/5 > 3/4",
            ],
        };

        let mut stdout = stdout();
        execute!(stdout, cursor::MoveTo(0, 2))?;
        for line in lines {
            execute!(stdout, Print(line), Print("\n"), cursor::MoveToColumn(0))?;
        }
        execute!(
            stdout,
            Print("\n"),
            cursor::MoveToColumn(0),
            SetForegroundColor(Color::DarkGrey),
            Print("Press any key to start  |  Esc to quit\n"),
            ResetColor
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Render the active question with numbered choices
    pub fn show_question(
        &self,
        round: u32,
        total_rounds: u32,
        question: &Question,
    ) -> std::io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::Yellow),
            Print(format!("Question {} of {}\n", round, total_rounds)),
            ResetColor,
            cursor::MoveTo(0, 3),
            Print(format!("   {}\n", question.prompt())),
        )?;

        for (i, choice) in question.choices.iter().enumerate() {
            execute!(
                stdout,
                cursor::MoveTo(0, 5 + i as u16),
                SetForegroundColor(Color::Cyan),
                Print(format!("  [{}] ", i + 1)),
                ResetColor,
                Print(&choice.text),
            )?;
        }
        execute!(stdout, Print("\n"))?;
        stdout.flush()?;
        Ok(())
    }

    /// Score and mistake line, colored by how much score is left
    pub fn show_progress(
        &self,
        score: u32,
        rules: &ScoreRules,
        mistakes: u32,
        attempts: u32,
    ) -> std::io::Result<()> {
        let ratio = score as f32 / rules.score_cap.max(1) as f32;
        let score_color = if ratio > 0.7 {
            Color::Green
        } else if ratio > 0.4 {
            Color::Yellow
        } else {
            Color::Red
        };

        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 10),
            SetForegroundColor(Color::Magenta),
            Print("Score: "),
            SetForegroundColor(score_color),
            Print(format!("{}/{}", score, rules.score_cap)),
            ResetColor,
            Print(format!(
                "  |  Mistakes: {}  |  Attempts: {}\n",
                mistakes, attempts
            )),
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Feedback after a correct answer, with the worked step when there is one
    pub fn show_correct(&self, answer: &str, teaching: Option<&str>) -> std::io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 12),
            SetForegroundColor(Color::Green),
            Print(format!("Correct! The answer is {}.\n", answer)),
            ResetColor,
        )?;
        if let Some(step) = teaching {
            execute!(
                stdout,
                cursor::MoveTo(0, 13),
                SetForegroundColor(Color::DarkGrey),
                Print(format!("  {}\n", step)),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Feedback after a wrong answer. The answer is not revealed; the same
    /// question stays up for another attempt.
    pub fn show_incorrect(&self, coaching: Option<&str>) -> std::io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 12),
            SetForegroundColor(Color::Red),
            Print("Not quite - try again!\n"),
            ResetColor,
        )?;
        if let Some(hint) = coaching {
            execute!(
                stdout,
                cursor::MoveTo(0, 13),
                SetForegroundColor(Color::DarkGrey),
                Print(format!("  Hint: {}\n", hint)),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Completion screen: score tuple, error habits, save status
    pub fn show_summary(
        &self,
        summary: &CompletionSummary,
        mistakes: &MistakeSummary,
        saved: bool,
    ) -> std::io::Result<()> {
        self.clear()?;
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 1),
            SetForegroundColor(Color::Green),
            Print("Waypoint complete!\n"),
            ResetColor,
            cursor::MoveTo(0, 3),
            Print(format!(
                "Score: {}  |  Mistakes: {}  |  Attempts: {}  |  Time: {}s\n",
                summary.score, summary.mistakes, summary.attempts, summary.time_spent_secs
            )),
        )?;

        let mut row = 5;
        if !mistakes.persistent.is_empty() {
            execute!(
                stdout,
                cursor::MoveTo(0, row),
                SetForegroundColor(Color::Yellow),
                Print("Watch out for:\n"),
                ResetColor,
            )?;
            row += 1;
            for slip in &mistakes.persistent {
                execute!(
                    stdout,
                    cursor::MoveTo(0, row),
                    Print(format!("  - {}\n", slip.coaching())),
                )?;
                row += 1;
            }
        } else if mistakes.is_improving {
            execute!(
                stdout,
                cursor::MoveTo(0, row),
                SetForegroundColor(Color::Green),
                Print("Great accuracy - keep it up!\n"),
                ResetColor,
            )?;
            row += 1;
        }

        if !saved {
            execute!(
                stdout,
                cursor::MoveTo(0, row + 1),
                SetForegroundColor(Color::Red),
                Print("(progress could not be saved this time)\n"),
                ResetColor,
            )?;
            row += 1;
        }

        execute!(
            stdout,
            cursor::MoveTo(0, row + 2),
            SetForegroundColor(Color::DarkGrey),
            Print("Press R to retry  |  any other key to leave\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Key help line
    pub fn show_help(&self, choice_count: usize) -> std::io::Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            cursor::MoveTo(0, 15),
            SetForegroundColor(Color::DarkGrey),
            Print(format!(
                "Press 1-{} to answer  |  Esc or Ctrl+C to quit\n",
                choice_count
            )),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore the terminal
    pub fn shutdown(&self) -> std::io::Result<()> {
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // Best effort cleanup
        let _ = self.shutdown();
    }
}
