pub mod help;
pub mod list;
pub mod select;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::{MarketDataProvider, ModelService};
use crate::services::catalog_service::SelectionControl;
use crate::services::selection_service::{CycleOutcome, SelectionOrchestrator};

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List { filter: String, page: usize },
    Quit,
    /// Anything else is a selection; an empty one is the placeholder
    Select(String),
}

/// Whether the session keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn parse_command(line: &str) -> Command {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.first().map(|c| c.to_lowercase()).as_deref() {
        None => Command::Select(String::new()),
        Some("help") | Some("?") => Command::Help,
        Some("quit") | Some("exit") => Command::Quit,
        Some("list") | Some("ls") => {
            let (filter, page) = list::parse_list_args(&parts[1..]);
            Command::List { filter, page }
        }
        Some(_) => Command::Select(parts[0].to_string()),
    }
}

/// The terminal session: the selection control plus every cycle it started
pub struct Session<M, S> {
    orchestrator: SelectionOrchestrator<M, S>,
    selection: SelectionControl,
    cycles: Vec<JoinHandle<CycleOutcome>>,
}

impl<M, S> Session<M, S>
where
    M: MarketDataProvider + 'static,
    S: ModelService + 'static,
{
    pub fn new(orchestrator: SelectionOrchestrator<M, S>, selection: SelectionControl) -> Self {
        Self {
            orchestrator,
            selection,
            cycles: Vec::new(),
        }
    }

    pub fn handle_line(&mut self, line: &str) -> Flow {
        let command = parse_command(line);
        debug!("Command: {:?}", command);

        match command {
            Command::Help => help::execute(),
            Command::List { filter, page } => list::execute(&self.selection, &filter, page),
            Command::Quit => return Flow::Quit,
            Command::Select(id) => select::execute(self, &id),
        }

        Flow::Continue
    }

    /// Wait for every cycle still in flight
    pub async fn wait_for_cycles(&mut self) {
        for handle in self.cycles.drain(..) {
            if let Err(e) = handle.await {
                tracing::error!("Selection cycle panicked: {}", e);
            }
        }
    }

    pub fn selection(&self) -> &SelectionControl {
        &self.selection
    }

    fn track(&mut self, handle: JoinHandle<CycleOutcome>) {
        self.cycles.retain(|h| !h.is_finished());
        self.cycles.push(handle);
    }
}
