use anyhow::{Context as _, Result};
use bridge_cli::analysis::analyze;
use bridge_cli::pacer::Pacer;
use bridge_cli::table::{PracticeTable, SavedDeal};
use bridge_cli::bid_out;
use bridge_core::io::identifier;
use bridge_core::{Auction, Call, Deal, Hand, Position, Suit, Vulnerability};
use bridge_engine::Bidder;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use std::{fs, io};
use tracing_subscriber::EnvFilter;

const TICK: Duration = Duration::from_millis(30);

#[derive(Parser, Debug)]
#[command(author, version, about = "Acol bidding practice")]
struct Cli {
    /// Bidding system YAML to use instead of the built-in Acol card
    #[arg(long, env = "BRIDGE_SYSTEM", global = true)]
    system: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bid at a table against the engine
    Play {
        /// Seats you bid for, comma-separated
        #[arg(long, env = "PRACTICE_SEAT", value_delimiter = ',', default_value = "S")]
        seat: Vec<Position>,

        /// How long the engine thinks before each call
        #[arg(long, env = "PRACTICE_DELAY_MS", default_value_t = 1000)]
        delay_ms: u64,

        #[arg(long, env = "PRACTICE_SEED")]
        seed: Option<u64>,

        /// Write logs to this file; the table owns the terminal
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Deal a board and let the engine bid all four hands
    Deal {
        #[arg(long, env = "PRACTICE_SEED")]
        seed: Option<u64>,

        #[arg(long, default_value_t = 1)]
        board: u32,

        /// Print the saved deal as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report on the auction in a board identifier, bidding it out first if unfinished
    Analyze {
        identifier: String,

        #[arg(long)]
        json: bool,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn load_bidder(system: Option<&PathBuf>) -> Result<Bidder> {
    match system {
        Some(path) => {
            let yaml = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Bidder::from_yaml(&yaml).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(Bidder::default()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            seat,
            delay_ms,
            seed,
            log,
        } => {
            if let Some(path) = log {
                let file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter())
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .init();
            }
            let bidder = load_bidder(cli.system.as_ref())?;
            let table = PracticeTable::new(seed.unwrap_or_else(rand::random), seat);
            let pacer = Pacer::new(Arc::new(bidder), Duration::from_millis(delay_ms));
            play(App::new(table, pacer)).await
        }
        Command::Deal { seed, board, json } => {
            tracing_subscriber::fmt().with_env_filter(env_filter()).init();
            let bidder = load_bidder(cli.system.as_ref())?;
            let mut rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));
            let deal = Deal::random(
                &mut rng,
                Position::dealer_from_board_number(board),
                Vulnerability::from_board_number(board),
            );
            let auction = bid_out(&bidder, &deal, Auction::new(deal.dealer(), deal.vulnerability()));
            let saved = SavedDeal { board, deal, auction };
            if json {
                println!("{}", serde_json::to_string_pretty(&saved)?);
            } else {
                println!("{}", saved.identifier());
                println!("{}", saved.auction);
            }
            Ok(())
        }
        Command::Analyze { identifier, json } => {
            tracing_subscriber::fmt().with_env_filter(env_filter()).init();
            let bidder = load_bidder(cli.system.as_ref())?;
            let (deal, auction) = identifier::import_board(&identifier)
                .with_context(|| format!("invalid identifier {identifier}"))?;
            let auction = auction.unwrap_or_else(|| Auction::new(deal.dealer(), deal.vulnerability()));
            let auction = bid_out(&bidder, &deal, auction);
            let report = analyze(&deal, &auction);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Auction: {auction}");
                println!("Final contract: {}", report.final_contract);
                println!("Calls: {}", report.total_calls);
                for finding in &report.findings {
                    println!("  {finding}");
                }
            }
            Ok(())
        }
    }
}

struct App {
    table: PracticeTable,
    pacer: Pacer,
    input: String,
    message: String,
}

impl App {
    fn new(table: PracticeTable, pacer: Pacer) -> Self {
        Self {
            table,
            pacer,
            input: String::new(),
            message: "Type a call (1H, 2NT, X, P) or: new, rebid, save, quit".to_string(),
        }
    }

    fn after_call(&mut self) {
        if let Some(done) = self.table.completion_message() {
            self.message = format!("Auction complete! {done}");
        }
    }

    /// Handles one line of input. Returns false to quit.
    fn submit_input(&mut self) -> bool {
        let line = std::mem::take(&mut self.input);
        match line.trim().to_ascii_lowercase().as_str() {
            "" => {}
            "quit" | "q" => return false,
            "new" => {
                self.pacer.cancel();
                self.table.new_round();
                self.message = format!("Board {}", self.table.board());
            }
            "rebid" => {
                self.pacer.cancel();
                self.table.rebid();
                self.message = "Same cards, new auction".to_string();
            }
            "save" => self.message = self.save(),
            text => self.submit_call(text),
        }
        true
    }

    fn submit_call(&mut self, text: &str) {
        let call: Call = match text.parse() {
            Ok(call) => call,
            Err(err) => {
                self.message = err.to_string();
                return;
            }
        };
        let Some(seat) = self.table.auction().turn() else {
            self.message = "The auction is over: type new or rebid".to_string();
            return;
        };
        match self.table.submit(seat, call) {
            Ok(()) => {
                self.message.clear();
                self.after_call();
            }
            Err(err) => self.message = err.to_string(),
        }
    }

    fn save(&self) -> String {
        let saved = self.table.saved();
        let path = format!("board-{}.json", saved.board);
        let written = serde_json::to_string_pretty(&saved)
            .map_err(io::Error::from)
            .and_then(|json| fs::write(&path, json));
        match written {
            Ok(()) => format!("Saved {path} ({})", saved.identifier()),
            Err(err) => format!("Could not save {path}: {err}"),
        }
    }
}

async fn play(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    res.map_err(Into::into)
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        while let Some(paced) = app.pacer.try_next() {
            if app.table.apply(paced) {
                app.after_call();
            }
        }
        app.pacer.schedule(&app.table);

        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => return Ok(()),
                        KeyCode::Enter => {
                            if !app.submit_input() {
                                return Ok(());
                            }
                        }
                        KeyCode::Backspace => {
                            app.input.pop();
                        }
                        KeyCode::Char(c) => app.input.push(c),
                        _ => {}
                    }
                }
            }
        }
        // Yield so the pacer's timers can fire.
        tokio::time::sleep(TICK).await;
    }
}

fn hand_line(seat: Position, hand: &Hand) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("{seat}  "),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for suit in Suit::BY_PRIORITY {
        let mut ranks: Vec<_> = hand.cards.iter().filter(|c| c.suit == suit).map(|c| c.rank).collect();
        ranks.sort_by(|a, b| b.cmp(a));
        let cards: String = ranks.into_iter().map(|r| r.to_char()).collect();
        let color = match suit {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::White,
        };
        spans.push(Span::styled(
            format!("{} {:<8}", suit.symbol(), if cards.is_empty() { "-" } else { &cards }),
            Style::default().fg(color),
        ));
    }
    spans.push(Span::raw(format!(" ({} HCP)", hand.hcp())));
    Line::from(spans)
}

fn auction_lines(auction: &Auction) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        Position::ALL.iter().map(|p| format!("{:<6}", p.to_char())).collect::<String>(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let mut cells = vec![String::new(); auction.dealer().idx()];
    cells.extend(auction.calls().map(Call::render));
    if auction.turn().is_some() {
        cells.push("?".to_string());
    }
    for row in cells.chunks(4) {
        lines.push(Line::from(row.iter().map(|c| format!("{c:<6}")).collect::<String>()));
    }
    lines
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(6),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    let table = &app.table;
    let deal = table.deal();
    let finished = table.auction().is_terminated();
    let hands: Vec<Line> = Position::ALL
        .into_iter()
        .filter(|&seat| finished || table.is_human(seat))
        .map(|seat| hand_line(seat, deal.hand(seat)))
        .collect();
    let title = format!(
        "Board {}  Dealer {}  Vul {}",
        table.board(),
        deal.dealer(),
        deal.vulnerability()
    );
    f.render_widget(
        Paragraph::new(hands).block(Block::default().borders(Borders::ALL).title(title)),
        chunks[0],
    );

    f.render_widget(
        Paragraph::new(auction_lines(table.auction()))
            .block(Block::default().borders(Borders::ALL).title("Auction")),
        chunks[1],
    );

    let thinking = match table.automated_turn() {
        Some(seat) if app.pacer.is_pending() => format!("{seat} is thinking..."),
        _ => String::new(),
    };
    let status = if app.message.is_empty() { thinking } else { app.message.clone() };
    f.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::ALL)),
        chunks[2],
    );

    f.render_widget(
        Paragraph::new(format!("> {}", app.input))
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title("Call")),
        chunks[3],
    );
}
