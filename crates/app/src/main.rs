//! Pathway CLI: read lessons, take quizzes and walk a curriculum path.

mod terminal;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use content::ContentPack;
use pathway_core::model::{FieldId, LessonId};
use services::{AppServices, Clock, CurriculumLoad, PathSummary, QuizLoad, ReportStatus};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use terminal::{QuizExit, print_lesson, print_path, run_quiz};

#[derive(Parser)]
#[command(name = "pathway")]
#[command(about = "Micro-learning lessons, quizzes and curriculum paths", long_about = None)]
struct Cli {
    /// JSON content pack with lessons and curricula
    #[arg(long, env = "PATHWAY_CONTENT", default_value = "demos/pathway.json")]
    content: PathBuf,
    /// Log filter, e.g. `info` or `services=debug`
    #[arg(long, env = "PATHWAY_LOG", default_value = "warn")]
    log_level: String,
    /// Shuffle question order when a quiz starts
    #[arg(long, env = "PATHWAY_SHUFFLE")]
    shuffle: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a lesson
    Lesson {
        #[arg(long)]
        lesson: u64,
    },
    /// Take a lesson's quiz interactively
    Quiz {
        #[arg(long)]
        lesson: u64,
    },
    /// Show a field's curriculum path
    Path {
        #[arg(long)]
        field: u64,
        /// Node positions (1-based) to complete, in order
        #[arg(long, num_args = 1..)]
        complete: Vec<usize>,
    },
}

fn init_tracing(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("invalid log filter: {filter}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let pack = ContentPack::load(&cli.content)
        .with_context(|| format!("loading content pack {}", cli.content.display()))?;
    let app = AppServices::from_pack(Clock::default(), pack, cli.shuffle)?;
    debug!(content = %cli.content.display(), shuffle = cli.shuffle, "services ready");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Lesson { lesson } => {
            let rendered = app.lessons().load(LessonId::new(lesson)).await?;
            print_lesson(&mut out, &rendered)?;
        }
        Commands::Quiz { lesson } => {
            let quiz = app.quiz();
            let mut session = match quiz.load(LessonId::new(lesson)).await? {
                QuizLoad::Ready(session) => session,
                QuizLoad::Unavailable => {
                    writeln!(out, "This lesson has no quiz yet.")?;
                    return Ok(out.flush()?);
                }
            };
            let stdin = io::stdin();
            let mut input = stdin.lock();
            // The prompt reads from stdin, so write straight through.
            drop(out);
            let mut out = io::stdout();
            let exit = run_quiz(&quiz, &mut session, &mut input, &mut out).await?;
            info!(%lesson, ?exit, "quiz closed");
            if exit == QuizExit::Quit {
                writeln!(out, "Quiz abandoned; nothing was recorded.")?;
            }
            return Ok(());
        }
        Commands::Path { field, complete } => {
            let curriculum = app.curriculum();
            let CurriculumLoad::Ready(mut path) = curriculum.load(FieldId::new(field)).await?
            else {
                writeln!(out, "No curriculum generated for field {field} yet.")?;
                return Ok(out.flush()?);
            };

            for position in complete {
                let Some(index) = position.checked_sub(1) else {
                    bail!("node positions start at 1");
                };
                let done = curriculum.complete_node(&mut path, index).await?;
                match done.report {
                    ReportStatus::Failed { reason } => {
                        writeln!(out, "Node {position} completed locally; sync failed: {reason}")?;
                    }
                    _ if !done.newly_completed => {
                        writeln!(out, "Node {position} was already completed.")?;
                    }
                    _ => writeln!(out, "Node {position} completed.")?,
                }
            }

            print_path(&mut out, &curriculum.path_view(&path), &PathSummary::from_path(&path))?;
        }
    }

    out.flush()?;
    Ok(())
}
