//! Terminal front end for the dashboard controller.

use chrono::Local;
use daily_quest::command::{Command, HELP};
use daily_quest::controller::ClickTarget;
use daily_quest::ui::render_dashboard;
use daily_quest::{
    ClientConfig, CommandError, Confirm, DashboardController, HttpTaskApi, Notifier,
};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("! {message}");
    }
}

struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.lines.next_line().await
    }
}

impl Confirm for Console {
    async fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();
        match self.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim(), "y" | "Y" | "yes"),
            _ => false,
        }
    }
}

enum Event {
    Tick,
    Line(Option<String>),
}

type Controller = DashboardController<HttpTaskApi, StderrNotifier>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let api = HttpTaskApi::new(&config)?;
    let mut controller = DashboardController::new(api, StderrNotifier);
    controller.subscribe(|bar| println!("exp {} ({})", bar.label(), bar.width()));

    if let Err(err) = controller.resync().await {
        warn!("initial sync with {} failed: {err}", config.base_url);
    }
    controller.tick(Local::now().naive_local()).await.ok();
    println!("{}", render_dashboard(&controller.view()));

    let mut console = Console::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        let event = tokio::select! {
            _ = ticker.tick() => Event::Tick,
            line = console.next_line() => Event::Line(line?),
        };

        match event {
            Event::Tick => {
                if let Ok(true) = controller.tick(Local::now().naive_local()).await {
                    println!("{}", render_dashboard(&controller.view()));
                }
            }
            Event::Line(None) => break,
            Event::Line(Some(line)) => match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => run(&mut controller, &mut console, command).await,
                Err(message) => eprintln!("{message}"),
            },
        }
    }

    Ok(())
}

async fn run(controller: &mut Controller, console: &mut Console, command: Command) {
    let outcome = match command {
        Command::Complete(task_id) => controller.complete_task(task_id).await.map(|_| ()),
        Command::Remove(task_id) => controller.remove_task(task_id, console).await,
        Command::Daily(task_id, is_daily) => controller.toggle_daily(task_id, is_daily).await,
        Command::Pick(id) => {
            controller.select_predefined(id);
            Ok(())
        }
        Command::Name(name) => {
            controller.new_task_form_mut().task_name = name;
            Ok(())
        }
        Command::Description(text) => {
            controller.new_task_form_mut().task_description = text;
            Ok(())
        }
        Command::Exp(exp) => {
            controller.new_task_form_mut().exp_value = Some(exp);
            Ok(())
        }
        Command::Due(date) => {
            controller.new_task_form_mut().due_date = Some(date);
            Ok(())
        }
        Command::Repeat(is_daily) => {
            controller.new_task_form_mut().is_daily = is_daily;
            Ok(())
        }
        Command::Add => controller.create_task().await.map(|_| ()),
        Command::Suggest => {
            controller.open_suggestion_modal();
            Ok(())
        }
        Command::SuggestName(name) => {
            controller.suggestion_form_mut().task_name = name;
            Ok(())
        }
        Command::SuggestExp(exp) => {
            controller.suggestion_form_mut().suggested_exp_value = Some(exp);
            Ok(())
        }
        Command::SendSuggestion => {
            controller.submit_suggestion();
            Ok(())
        }
        Command::Close => {
            controller.close_suggestion_modal();
            Ok(())
        }
        Command::Backdrop => {
            controller.click(ClickTarget::ModalBackdrop);
            Ok(())
        }
        Command::Sync => controller.resync().await,
        Command::Show => Ok(()),
        Command::Help => {
            println!("{HELP}");
            return;
        }
        Command::Quit => return,
    };

    match outcome {
        Ok(()) => {}
        // Service failures have already been alerted.
        Err(CommandError::Api(err)) => debug!("command failed: {err}"),
        Err(err) => eprintln!("{err}"),
    }
    println!("{}", render_dashboard(&controller.view()));
}
