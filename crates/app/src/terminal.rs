//! Plain-text rendering and the interactive quiz prompt.

use std::io::{BufRead, Write};

use anyhow::Result;
use pathway_core::lesson_text::{LessonLine, Span};
use pathway_core::{NodeState, QuizError, ScoreBand};
use services::{
    PathNodeView, PathSummary, QuizResultView, QuizService, QuizServiceError, QuizSession,
    RenderedLesson, ReportStatus,
};

/// How an interactive quiz ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizExit {
    Finished,
    Quit,
}

fn spans_text(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| {
            if span.bold {
                span.text.to_uppercase()
            } else {
                span.text.clone()
            }
        })
        .collect()
}

pub fn print_lesson(out: &mut impl Write, lesson: &RenderedLesson) -> Result<()> {
    writeln!(out, "{}", lesson.title)?;
    writeln!(out, "{}", "=".repeat(lesson.title.chars().count()))?;
    for line in &lesson.lines {
        match line {
            LessonLine::Heading { level, spans } => {
                let text = spans_text(spans);
                if *level == 1 {
                    writeln!(out, "\n{text}\n{}", "-".repeat(text.chars().count()))?;
                } else {
                    writeln!(out, "\n{text}")?;
                }
            }
            LessonLine::Bullet(spans) => writeln!(out, "  * {}", spans_text(spans))?,
            LessonLine::Paragraph(spans) => writeln!(out, "{}", spans_text(spans))?,
            LessonLine::Blank => writeln!(out)?,
        }
    }
    Ok(())
}

pub fn print_path(out: &mut impl Write, rows: &[PathNodeView], summary: &PathSummary) -> Result<()> {
    writeln!(
        out,
        "Progress: {}/{} ({}%)",
        summary.completed, summary.total, summary.percentage
    )?;
    for row in rows {
        let marker = match row.state {
            NodeState::Completed => "[done]",
            NodeState::Active => "[open]",
            NodeState::Locked => "[lock]",
        };
        let next = if row.is_next { "  <- next" } else { "" };
        writeln!(
            out,
            "{marker} {}. {} ({}){next}",
            row.index + 1,
            row.title,
            row.difficulty
        )?;
        if !row.key_topics.is_empty() {
            writeln!(out, "       {}", row.key_topics.join(", "))?;
        }
    }
    if summary.is_finished {
        writeln!(out, "Path complete.")?;
    }
    Ok(())
}

fn band_message(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Perfect => "Perfect score!",
        ScoreBand::Passed => "Nice work, you passed.",
        ScoreBand::NeedsReview => "Review the lesson and try again.",
    }
}

fn print_question(out: &mut impl Write, session: &QuizSession) -> Result<()> {
    let progress = session.progress();
    let question = session.current_question();
    let selected = session.engine().current_answer();

    writeln!(out, "\nQuestion {}/{}", progress.current + 1, progress.total)?;
    writeln!(out, "{}", question.prompt())?;
    for (n, option) in question.options().iter().enumerate() {
        let mark = if selected == Some(option.as_str()) { "x" } else { " " };
        writeln!(out, "  [{mark}] {}. {option}", n + 1)?;
    }
    let advance = if progress.is_last { "submit" } else { "next" };
    writeln!(out, "(1-{}) select, n {advance}, p back, q quit", question.options().len())?;
    Ok(())
}

fn print_results(out: &mut impl Write, session: &QuizSession) -> Result<()> {
    let Some(view) = QuizResultView::from_session(session) else {
        return Ok(());
    };
    writeln!(
        out,
        "\nScore: {}/{} ({}%)",
        view.correct, view.total, view.percentage
    )?;
    writeln!(out, "{}", band_message(view.band))?;

    if let Some(reviews) = &view.reviews {
        for (n, review) in reviews.iter().enumerate() {
            let verdict = if review.is_correct { "correct" } else { "wrong" };
            writeln!(
                out,
                "  {}. {verdict}: you chose {}, answer {}",
                n + 1,
                review.selected.as_deref().unwrap_or("nothing"),
                review.correct_answer
            )?;
            if !review.explanation.is_empty() {
                writeln!(out, "     {}", review.explanation)?;
            }
        }
    }

    if let ReportStatus::Failed { reason } = session.report_status() {
        writeln!(out, "Result not synced ({reason}); s to resend")?;
    }
    writeln!(out, "r toggle review, t try again, q quit")?;
    Ok(())
}

/// Drive a quiz session from line-based input until it is finished or abandoned.
///
/// # Errors
///
/// Returns I/O failures and service errors other than rejected navigation.
pub async fn run_quiz(
    svc: &QuizService,
    session: &mut QuizSession,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<QuizExit> {
    let mut line = String::new();
    loop {
        if session.is_finished() {
            print_results(out, session)?;
        } else {
            print_question(out, session)?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(exit_for(session));
        }
        let command = line.trim();

        if session.is_finished() {
            match command {
                "r" => {
                    let on = !session.engine().is_reviewing();
                    session.set_review_mode(on)?;
                }
                "t" => svc.retry(session),
                "s" => {
                    if let Err(err) = svc.finalize_report(session).await {
                        writeln!(out, "Still not synced: {err}")?;
                    }
                }
                "q" => return Ok(QuizExit::Finished),
                _ => writeln!(out, "Unknown command: {command}")?,
            }
            continue;
        }

        match command {
            "q" => return Ok(QuizExit::Quit),
            "n" => match svc.advance(session).await {
                Ok(_) => {}
                Err(QuizServiceError::Quiz(QuizError::Unanswered { .. })) => {
                    writeln!(out, "Pick an answer first.")?;
                }
                Err(err) => return Err(err.into()),
            },
            "p" => match session.previous() {
                Ok(_) => {}
                Err(QuizServiceError::Quiz(QuizError::AtFirstQuestion)) => {
                    writeln!(out, "Already at the first question.")?;
                }
                Err(err) => return Err(err.into()),
            },
            other => {
                let option = other
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|n| session.current_question().options().get(n).cloned());
                match option {
                    Some(option) => session.select_answer(&option)?,
                    None => writeln!(out, "Unknown command: {other}")?,
                }
            }
        }
    }
}

fn exit_for(session: &QuizSession) -> QuizExit {
    if session.is_finished() {
        QuizExit::Finished
    } else {
        QuizExit::Quit
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
