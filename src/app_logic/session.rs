use crate::app_logic::menu::{InvalidMenuInput, MenuChoice, MenuState};
use crate::app_logic::ui_constants;
use crate::core::{
    AppConfig, BackupWriterOperations, FrequencyTable, HistogramStyle, ItemSourceOperations,
    LookupOutcome, QueryEngine, Tokens, load_frequency_table, render_histogram,
};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The user chose Exit.
    Exited,
    /// Console input ended before the user chose Exit.
    InputClosed,
    /// The item file could not be read; the menu was never shown.
    SourceUnavailable,
}

/*
 * Owns the settings and the file collaborators for one run. `run` performs
 * the build phase (read items, write backup) and then hands the finished
 * table to a `MenuSession`. The I/O collaborators are injected as trait
 * objects so tests can supply in-memory sources and failing writers.
 */
pub struct GrocerTracker {
    config: AppConfig,
    item_source: Box<dyn ItemSourceOperations>,
    backup_writer: Box<dyn BackupWriterOperations>,
}

impl GrocerTracker {
    pub fn new(
        config: AppConfig,
        item_source: Box<dyn ItemSourceOperations>,
        backup_writer: Box<dyn BackupWriterOperations>,
    ) -> Self {
        GrocerTracker {
            config,
            item_source,
            backup_writer,
        }
    }

    /*
     * Runs the whole program against the given console. An unreadable item
     * file stops the run before the backup is written or the menu shown. A
     * failed backup write is reported and the run continues with the
     * in-memory table. Only console write failures are returned as errors.
     */
    pub fn run<R: BufRead, W: Write>(
        &self,
        console_in: R,
        console_out: &mut W,
    ) -> io::Result<RunOutcome> {
        let input_path = &self.config.input_file;
        let table = match load_frequency_table(self.item_source.as_ref(), input_path) {
            Ok(table) => table,
            Err(e) => {
                log::error!("GrocerTracker: Build phase failed: {e}");
                writeln!(console_out, "Error: {e}")?;
                return Ok(RunOutcome::SourceUnavailable);
            }
        };
        log::info!(
            "GrocerTracker: Tallied {} items ({} distinct) from {input_path:?}",
            table.total(),
            table.len()
        );

        let backup_path = &self.config.backup_file;
        match self.backup_writer.write_backup(&table, backup_path) {
            Ok(()) => {
                log::info!("GrocerTracker: Backup written to {backup_path:?}");
                writeln!(
                    console_out,
                    "Backup data created in {}",
                    backup_path.display()
                )?;
            }
            Err(e) => {
                log::warn!("GrocerTracker: Backup not written, continuing: {e}");
                writeln!(
                    console_out,
                    "Error: Could not create output file {}",
                    backup_path.display()
                )?;
            }
        }

        let mut session = MenuSession::new(
            &table,
            self.config.histogram_style(),
            console_in,
            console_out,
        );
        session.run()
    }
}

/*
 * The interactive half of a run. Reads whitespace-separated tokens from the
 * console the way stream extraction does: several answers may share a line,
 * and blank lines are skipped without reprinting the prompt.
 */
pub struct MenuSession<'a, R, W> {
    queries: QueryEngine<'a>,
    histogram_style: HistogramStyle,
    input: Tokens<R>,
    output: W,
}

impl<'a, R: BufRead, W: Write> MenuSession<'a, R, W> {
    pub fn new(
        table: &'a FrequencyTable,
        histogram_style: HistogramStyle,
        console_in: R,
        console_out: W,
    ) -> Self {
        MenuSession {
            queries: QueryEngine::new(table),
            histogram_style,
            input: Tokens::new(console_in),
            output: console_out,
        }
    }

    pub fn run(&mut self) -> io::Result<RunOutcome> {
        let mut state = MenuState::AwaitingChoice;
        let mut outcome = RunOutcome::Exited;

        while !state.is_terminal() {
            state = match state {
                MenuState::AwaitingChoice => match self.prompt_for_choice()? {
                    Some(raw) => match state.on_choice_input(&raw) {
                        Ok(next) => next,
                        Err(invalid) => {
                            self.report_invalid_input(&invalid)?;
                            state
                        }
                    },
                    None => {
                        outcome = RunOutcome::InputClosed;
                        state.on_input_closed()
                    }
                },
                MenuState::Dispatching(choice) => {
                    if self.dispatch(choice)? {
                        state.on_dispatched()
                    } else {
                        outcome = RunOutcome::InputClosed;
                        state.on_input_closed()
                    }
                }
                MenuState::Terminated => state,
            };
        }

        if outcome == RunOutcome::InputClosed {
            log::info!("MenuSession: Console input closed; leaving menu.");
        }
        self.output.flush()?;
        Ok(outcome)
    }

    fn display_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", ui_constants::MENU_BANNER_RULE)?;
        writeln!(self.output, "{}", ui_constants::MENU_TITLE)?;
        writeln!(self.output, "{}", ui_constants::MENU_BANNER_RULE)?;
        for option in ui_constants::MENU_OPTIONS {
            writeln!(self.output, "{option}")?;
        }
        writeln!(self.output, "{}", ui_constants::MENU_FOOTER_RULE)?;
        write!(self.output, "{}", ui_constants::CHOICE_PROMPT)?;
        self.output.flush()
    }

    fn prompt_for_choice(&mut self) -> io::Result<Option<String>> {
        self.display_menu()?;
        self.input.next_token()
    }

    fn report_invalid_input(&mut self, invalid: &InvalidMenuInput) -> io::Result<()> {
        log::warn!("MenuSession: Rejected menu input: {invalid}");
        match invalid {
            InvalidMenuInput::NotNumeric(_) => {
                let dropped = self.input.discard_pending();
                if dropped > 0 {
                    log::debug!("MenuSession: Discarded {dropped} trailing tokens.");
                }
                writeln!(self.output, "{}", ui_constants::INVALID_INPUT_MESSAGE)
            }
            InvalidMenuInput::OutOfRange(_) => {
                writeln!(self.output, "{}", ui_constants::INVALID_CHOICE_MESSAGE)
            }
        }
    }

    // Returns false when console input ran out in the middle of the choice.
    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<bool> {
        log::debug!("MenuSession: Dispatching {choice:?}");
        match choice {
            MenuChoice::Search => return self.search_item(),
            MenuChoice::ListFrequencies => self.print_frequencies()?,
            MenuChoice::Histogram => self.print_histogram()?,
            MenuChoice::Exit => writeln!(self.output, "{}", ui_constants::FAREWELL_MESSAGE)?,
        }
        Ok(true)
    }

    fn search_item(&mut self) -> io::Result<bool> {
        write!(self.output, "{}", ui_constants::SEARCH_PROMPT)?;
        self.output.flush()?;
        let Some(name) = self.input.next_token()? else {
            return Ok(false);
        };
        match self.queries.lookup(&name) {
            LookupOutcome::Found(count) => writeln!(self.output, "Frequency of {name}: {count}")?,
            LookupOutcome::NotFound => writeln!(self.output, "Item '{name}' not found.")?,
        }
        Ok(true)
    }

    fn print_frequencies(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", ui_constants::FREQUENCY_LIST_HEADER)?;
        for (name, count) in self.queries.list_all() {
            writeln!(self.output, "{name} {count}")?;
        }
        Ok(())
    }

    fn print_histogram(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", ui_constants::HISTOGRAM_HEADER)?;
        let rendered = render_histogram(self.queries.list_all(), &self.histogram_style);
        self.output.write_all(rendered.as_bytes())
    }
}
