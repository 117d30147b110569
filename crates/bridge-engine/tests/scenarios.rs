use bridge_core::io::identifier;
use bridge_core::{Auction, Call, Card, Deal, Hand, IllegalCall, Position, Vulnerability};
use bridge_engine::context::Context;
use bridge_engine::{get_next_call, Bidder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fs;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("TEST_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}

/// Puts `hand` in `seat` and deals the rest of the deck round the table.
fn deal_around(hand: &Hand, seat: Position, vulnerability: Vulnerability) -> Deal {
    let rest: Vec<Card> = Card::deck()
        .into_iter()
        .filter(|card| !hand.contains(*card))
        .collect();
    let others: Vec<Position> = Position::ALL.into_iter().filter(|&p| p != seat).collect();
    let mut hands: [Vec<Card>; 4] = Default::default();
    hands[seat.idx()] = hand.cards.clone();
    for (i, card) in rest.into_iter().enumerate() {
        hands[others[i % 3].idx()].push(card);
    }
    Deal::new(Position::North, vulnerability, hands.map(Hand::new)).unwrap()
}

/// The board number dealt by North with the given vulnerability.
fn board_for(vulnerability: Vulnerability) -> u32 {
    match vulnerability {
        Vulnerability::None => 1,
        Vulnerability::NS => 5,
        Vulnerability::EW => 9,
        Vulnerability::Both => 13,
    }
}

fn vulnerability(s: &str) -> Vulnerability {
    match s {
        "Both" => Vulnerability::Both,
        "NS" | "N-S" => Vulnerability::NS,
        "EW" | "E-W" => Vulnerability::EW,
        _ => Vulnerability::None,
    }
}

#[test]
fn run_acol_scenarios() {
    init_tracing();
    let content = fs::read_to_string("tests/scenarios.yaml").expect("Failed to read scenarios");
    let suites: BTreeMap<String, Vec<Vec<String>>> =
        serde_yaml::from_str(&content).expect("Failed to parse scenarios");

    let mut failures = Vec::new();
    for (suite, cases) in &suites {
        for case in cases {
            let (hand_str, expected, history, vul_str) = (&case[0], &case[1], &case[2], &case[3]);
            let vul = vulnerability(vul_str);
            let hand = Hand::parse(hand_str).unwrap();
            let auction = Auction::parse(Position::North, vul, history).unwrap();
            let seat = auction.next_seat();
            let deal = deal_around(&hand, seat, vul);

            let id = identifier::export_board(&deal, board_for(vul), Some(&auction));
            let actual = get_next_call(&id).unwrap();
            let expected: Call = expected.parse().unwrap();
            if actual != expected {
                failures.push(format!(
                    "{suite}: {hand_str} after '{history}' ({vul_str}): expected {expected}, got {actual}"
                ));
            }
        }
    }
    assert!(failures.is_empty(), "scenario failures:\n{}", failures.join("\n"));
}

#[test]
fn test_double_of_own_side_is_rejected() {
    let auction = Auction::parse(Position::North, Vulnerability::None, "1H P").unwrap();
    let err = auction.append(Call::Double, Position::South).unwrap_err();
    assert!(matches!(err, IllegalCall::DoubleOfPartner));
    assert_eq!(auction.len(), 2);
}

#[test]
fn test_responder_with_six_points_never_passes() {
    init_tracing();
    let bidder = Bidder::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut checked = 0;
    for _ in 0..400 {
        let deal = Deal::random(&mut rng, Position::North, Vulnerability::None);
        let mut auction = Auction::new(Position::North, Vulnerability::None);
        for seat in [Position::North, Position::East] {
            let call = bidder.next_call(deal.hand(seat), &auction, seat);
            auction = auction.append(call, seat).unwrap();
        }
        let opened = auction.entries()[0].call.level() == Some(1);
        let responder = deal.hand(Position::South);
        if !opened
            || Context::detect(&auction, Position::South) != Context::Response
            || responder.hcp() < 6
        {
            continue;
        }
        checked += 1;
        assert_ne!(
            bidder.next_call(responder, &auction, Position::South),
            Call::Pass,
            "responder passed {responder} after {:?}",
            auction.calls().map(Call::render).collect::<Vec<_>>()
        );
    }
    assert!(checked > 20, "only {checked} responding hands checked");
}

#[test]
fn test_random_auctions_stay_legal_and_end() {
    init_tracing();
    let bidder = Bidder::default();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let deal = Deal::random_board(&mut rng);
        let mut auction = Auction::new(deal.dealer(), deal.vulnerability());
        let mut steps = 0;
        while let Some(seat) = auction.turn() {
            let call = bidder.next_call(deal.hand(seat), &auction, seat);
            assert!(auction.legal(call, seat), "{call} is not legal for {seat}");
            auction = auction.append(call, seat).unwrap();
            steps += 1;
            assert!(steps <= 319, "auction did not terminate");
        }
        assert!(auction.is_terminated());
    }
}
