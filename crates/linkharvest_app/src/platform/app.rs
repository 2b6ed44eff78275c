use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use harvest_logging::{harvest_debug, harvest_info};
use linkharvest_core::{update, AppState, ExportTarget, Msg, PatternCatalog, SelectMode};

use super::command::{parse_command, Command, HELP};
use super::config::{self, CliArgs, USAGE};
use super::effects::EffectRunner;
use super::{logging, render};

const PASTE_TERMINATOR: &str = ".end";

pub fn run_app() -> anyhow::Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let mut config = config::load(args.config.as_deref())?;
    args.apply(&mut config);
    logging::initialize(config.log_destination, config.level());
    harvest_info!(
        "Starting linkharvest state_dir={:?} export_dir={:?}",
        config.state_dir,
        config.export_dir
    );

    let catalog = PatternCatalog::builtin();
    let runner = EffectRunner::new(&config, Arc::clone(&catalog))?;
    let restored = runner.load_selection();
    let mut console = Console::new(AppState::with_catalog(catalog), runner);

    if let Some(base_url) = &args.base_url {
        console.dispatch(Msg::BaseUrlChanged(base_url.clone()));
    }
    if let Some(path) = &args.html_file {
        let html = fs::read_to_string(path)
            .with_context(|| format!("reading HTML from {}", path.display()))?;
        console.dispatch(Msg::HtmlInputChanged(html));
        console.dispatch(Msg::ParseClicked);
    }
    // After any startup extraction, which would otherwise reset the selection.
    if !restored.is_empty() {
        console.dispatch(Msg::RestoreSelection(restored));
    }

    println!("linkharvest: type `help` for commands");
    console.print_summary();
    let stdin = io::stdin();
    console.repl(&mut stdin.lock())
}

struct Console {
    state: AppState,
    runner: EffectRunner,
}

impl Console {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    /// Feeds `msg` through `update`, running effects until no follow-up
    /// messages remain, then reports the resulting notice once.
    fn dispatch(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            harvest_debug!("dispatch {:?}", std::mem::discriminant(&msg));
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            queue.extend(self.runner.run(effects));
        }

        if let Some(notice) = self.state.notice() {
            println!("{}", render::render_notice(notice));
            let (state, _) = update(std::mem::take(&mut self.state), Msg::NoticeDismissed);
            self.state = state;
        }
    }

    fn repl(&mut self, input: &mut impl BufRead) -> anyhow::Result<()> {
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command, input)?,
                Err(message) => println!("{message}"),
            }
        }
        harvest_info!("Console closed");
        Ok(())
    }

    fn execute(&mut self, command: Command, input: &mut impl BufRead) -> anyhow::Result<()> {
        match command {
            Command::LoadHtml(path) => match fs::read_to_string(&path) {
                Ok(html) => {
                    println!("Loaded {} bytes from {}", html.len(), path.display());
                    self.dispatch(Msg::HtmlInputChanged(html));
                }
                Err(err) => println!("Cannot read {}: {}", path.display(), err),
            },
            Command::Paste => {
                println!("Paste HTML, then a line with `{PASTE_TERMINATOR}`:");
                let html = read_until_terminator(input)?;
                println!("Read {} bytes", html.len());
                self.dispatch(Msg::HtmlInputChanged(html));
            }
            Command::Base(url) => self.dispatch(Msg::BaseUrlChanged(url)),
            Command::Fetch(url) => {
                println!("Fetching {url} ...");
                self.dispatch(Msg::FetchClicked(url));
            }
            Command::Parse => {
                self.dispatch(Msg::ParseClicked);
                self.print_list();
            }
            Command::List => self.print_list(),
            Command::Query(query) => {
                self.dispatch(Msg::QueryChanged(query));
                self.print_list();
            }
            Command::Facet(id) => {
                self.dispatch(Msg::FacetToggled(id));
                self.print_list();
            }
            Command::Facets => {
                let view = self.state.view();
                for line in render::render_facets(self.state.catalog(), &view.active_facets) {
                    println!("{line}");
                }
            }
            Command::ClearFilters => {
                self.dispatch(Msg::FiltersCleared);
                self.print_list();
            }
            Command::Toggle(position) => {
                match self.state.view().visible.get(position - 1) {
                    Some(row) => self.dispatch(Msg::RecordToggled(row.id)),
                    None => println!("No visible link #{position}"),
                }
                self.print_summary();
            }
            Command::SelectAll => {
                self.dispatch(Msg::SelectAllVisible(SelectMode::Add));
                self.print_summary();
            }
            Command::SelectVisible => {
                self.dispatch(Msg::SelectAllVisible(SelectMode::Replace));
                self.print_summary();
            }
            Command::DeselectAll => {
                self.dispatch(Msg::DeselectAllClicked);
                self.print_summary();
            }
            Command::Selected => self.print_selected(),
            Command::Remove(position) => {
                match self.state.view().selected.get(position - 1) {
                    Some(row) => self.dispatch(Msg::RemoveSelected(row.id)),
                    None => println!("No selected link #{position}"),
                }
                self.print_selected();
            }
            Command::ClearSelected => {
                self.dispatch(Msg::ClearSelectedClicked);
                self.print_summary();
            }
            Command::Undo => {
                self.dispatch(Msg::UndoClicked);
                self.print_summary();
            }
            Command::Export => self.dispatch(Msg::ExportClicked(ExportTarget::File)),
            Command::Copy => self.dispatch(Msg::ExportClicked(ExportTarget::Clipboard)),
            Command::ShowSelected => {
                self.dispatch(Msg::ShowSelectedToggled);
                self.print_list();
            }
            Command::Clear => {
                self.dispatch(Msg::ClearDataClicked);
                println!("All data cleared");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
        Ok(())
    }

    fn print_list(&self) {
        for line in render::render(&self.state.view()) {
            println!("{line}");
        }
    }

    fn print_selected(&self) {
        for line in render::render_selected(&self.state.view()) {
            println!("{line}");
        }
    }

    fn print_summary(&self) {
        println!("{}", render::summary(&self.state.view()));
    }
}

fn read_until_terminator(input: &mut impl BufRead) -> io::Result<String> {
    let mut html = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 || line.trim_end() == PASTE_TERMINATOR {
            break;
        }
        html.push_str(&line);
    }
    Ok(html)
}
