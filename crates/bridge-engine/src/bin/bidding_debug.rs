use anyhow::{bail, Context as _, Result};
use bridge_core::io::identifier;
use bridge_core::{Auction, Deal, Hand, Position, Suit};
use bridge_engine::trace::BidTrace;
use bridge_engine::Bidder;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Bid a board out and show which rule chose each call")]
struct Args {
    /// Board identifier, e.g. 1-decde22e0d283f55b36244ab45
    identifier: String,

    /// Show every rule considered for this call (1-based)
    #[arg(short, long)]
    bid: Option<usize>,

    /// Bidding system YAML to use instead of the built-in Acol card
    #[arg(long)]
    system: Option<std::path::PathBuf>,

    /// Print every trace as JSON instead of the table
    #[arg(long)]
    json: bool,
}

fn suit_lines(hand: &Hand) -> Vec<String> {
    Suit::BY_PRIORITY
        .into_iter()
        .map(|suit| {
            let mut ranks: Vec<_> = hand.cards.iter().filter(|c| c.suit == suit).map(|c| c.rank).collect();
            ranks.sort_by(|a, b| b.cmp(a));
            let cards: String = ranks.into_iter().map(|r| r.to_char()).collect();
            format!("{}: {}", suit.to_char(), if cards.is_empty() { "-" } else { &cards })
        })
        .collect()
}

fn print_hands_table(deal: &Deal) {
    let indent = "        ";
    let north = suit_lines(deal.hand(Position::North));
    let east = suit_lines(deal.hand(Position::East));
    let south = suit_lines(deal.hand(Position::South));
    let west = suit_lines(deal.hand(Position::West));

    println!("{indent}North");
    for line in north {
        println!("{indent}{line}");
    }
    println!();
    println!("{:<20} East", "West");
    for (w, e) in west.iter().zip(&east) {
        println!("{w:<20} {e}");
    }
    println!();
    println!("{indent}South");
    for line in south {
        println!("{indent}{line}");
    }
}

fn print_full_trace(idx: usize, trace: &BidTrace) {
    println!("\nFull trace for call {idx}:");
    println!("=======================");
    println!("Context: {:?}", trace.context);
    println!("Partner has shown: {:?}", trace.profile);
    for step in &trace.rules_considered {
        let status = match (step.proposed, step.legal) {
            (Some(_), true) => "MATCHED",
            (Some(_), false) => "ILLEGAL",
            (None, _) => "-      ",
        };
        let call = step.proposed.map(|c| c.render()).unwrap_or_default();
        println!("[{status}] {:<5} {} ({})", call, step.rule_name, step.description);
    }
    println!("=======================\n");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let bidder = match &args.system {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Bidder::from_yaml(&yaml).with_context(|| format!("loading {}", path.display()))?
        }
        None => Bidder::default(),
    };

    let (deal, history) = identifier::import_board(&args.identifier)
        .with_context(|| format!("invalid identifier {}", args.identifier))?;
    if history.as_ref().is_some_and(Auction::is_terminated) {
        bail!("the auction in {} is already over", args.identifier);
    }
    let mut auction = history.unwrap_or_else(|| Auction::new(deal.dealer(), deal.vulnerability()));

    if args.json {
        let mut traces = Vec::new();
        while let Some(seat) = auction.turn() {
            let trace = bidder.next_call_with_trace(deal.hand(seat), &auction, seat);
            auction = auction.append(trace.selected_call, seat)?;
            traces.push(trace);
        }
        println!("{}", serde_json::to_string_pretty(&traces)?);
        return Ok(());
    }

    println!("Board: {}", args.identifier);
    println!("Dealer: {}", deal.dealer());
    println!("Vulnerability: {}", deal.vulnerability());
    println!("\nHands:");
    print_hands_table(&deal);
    println!();
    println!("{:<3} | {:<3} | {:<5} | {:<28} | Description", "Idx", "Pos", "Call", "Rule");
    println!("{:-<3}-+-{:-<3}-+-{:-<5}-+-{:-<28}-+---------------------------", "", "", "", "");

    for (i, entry) in auction.entries().iter().enumerate() {
        println!("{:<3} | {:<3} | {:<5} | {:<28} |", i + 1, entry.seat.to_char(), entry.call.render(), "(given)");
    }

    while let Some(seat) = auction.turn() {
        let idx = auction.len() + 1;
        let trace = bidder.next_call_with_trace(deal.hand(seat), &auction, seat);
        if args.bid == Some(idx) {
            print_full_trace(idx, &trace);
        }
        let description = trace
            .rules_considered
            .iter()
            .find(|step| step.matched())
            .map(|step| step.description)
            .unwrap_or("");
        println!(
            "{:<3} | {:<3} | {:<5} | {:<28} | {}",
            idx,
            seat.to_char(),
            trace.selected_call.render(),
            trace.selected_rule.unwrap_or("No rule matched"),
            description
        );
        auction = auction.append(trace.selected_call, seat)?;
    }

    match auction.final_contract() {
        Some(contract) => println!("\nContract: {contract}"),
        None => println!("\nPassed out"),
    }
    Ok(())
}
