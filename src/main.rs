mod app;
mod calendar;
mod config;
mod editor;
mod help;
mod logging;
mod popup;
mod show;
mod store;
mod theme;
use crate::app::App;
use crate::calendar::MonthView;
use crate::config::Config;
use crate::store::{DayBook, YMD_FMT};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::io::stdout;
use std::path::PathBuf;
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    show: bool,
    data_dir: Option<PathBuf>,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('s') | Arg::Long("show") => opts.show = true,
                Arg::Short('d') | Arg::Long("data-dir") => {
                    opts.data_dir = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    opts.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let config = Config::resolve(opts.data_dir, opts.log_file)?;
                if let Some(path) = &config.log_file {
                    logging::init(path)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut view = MonthView::new(today);
                if let Some(date) = opts.date {
                    view = view.start_date(date);
                }
                let storage = config.storage();
                tracing::info!(data_dir = %storage.dir().display(), "loading day records");
                let book = DayBook::load(storage);
                if opts.show {
                    for line in show::render_month(view.grid().month(), book.days()) {
                        println!("{line}");
                    }
                    return Ok(());
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(view, book).run(&mut terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: goalcal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal month calendar for recording daily progress and notes");
                println!();
                println!("Options:");
                println!("  -d, --data-dir DIR    Store day records in DIR");
                println!("  -l, --log-file FILE   Append diagnostic logs to FILE");
                println!("  -s, --show            Print the month and its records, then exit");
                println!("  -h, --help            Display this help message and exit");
                println!("  -V, --version         Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = execute!(stdout(), EnableMouseCapture)
        .context("failed to enable mouse capture")
        .and_then(|()| func(terminal));
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        tracing::warn!(error = %e, "failed to disable mouse capture");
    }
    ratatui::restore();
    r
}
