use lottery_machine::{
    events::{LotteryNumberDrawn, TicketsClaim},
    instruction_layouts::{
        round_id_ix_data, BuyTicketsArgs, ClaimTicketsArgs, InjectFundsArgs, StartLotteryArgs,
    },
    process_instruction, Amount, InMemoryLedger, LotteryConfig, LotteryError, LotteryEvent,
    LotteryMachine, MockVrfCoordinator, Pubkey, RoundId, RoundStatus, TicketClaim, TokenLedger,
};

const ETHER: Amount = 1_000_000_000_000_000_000;

const OWNER: Pubkey = [0x11; 32];
const OTHER: Pubkey = [0x22; 32];
const INJECTOR: Pubkey = [0x33; 32];
const MACHINE: Pubkey = [0x44; 32];

const PRICE: Amount = 5_000;

type Machine = LotteryMachine<InMemoryLedger, MockVrfCoordinator>;

/// Owner mints 200k tokens, funds the other account with 10k and both
/// approve the machine.
fn fixture() -> Machine {
    let mut ledger = InMemoryLedger::new();
    ledger.mint(&OWNER, 200_000 * ETHER).unwrap();
    lottery_machine::ledger::transfer(&mut ledger, &OWNER, &OTHER, 10_000 * ETHER).unwrap();
    ledger.approve(&OWNER, &MACHINE, 15_000 * ETHER);
    ledger.approve(&OTHER, &MACHINE, 1_000 * ETHER);

    LotteryMachine::new(
        LotteryConfig::new(OWNER, INJECTOR),
        MACHINE,
        ledger,
        MockVrfCoordinator::new(),
    )
    .unwrap()
}

fn close_and_draw(machine: &mut Machine, round_id: RoundId, final_number: u32) {
    machine.close_lottery(&OWNER, round_id).unwrap();
    let request_id = machine.rng().last_request_id().unwrap();
    machine
        .rng_mut()
        .fulfill_random_words_with_value(&request_id, u128::from(final_number))
        .unwrap();
    machine
        .draw_final_number_and_make_lottery_claimable(&OWNER, round_id)
        .unwrap();
}

#[test]
fn jackpot_ticket_takes_half_of_eighteen_decimal_pool() {
    let mut machine = fixture();
    let round_id = machine
        .start_lottery(&OWNER, [500, 500, 500, 500, 3_000, 5_000], PRICE)
        .unwrap();
    machine.inject_funds(&OWNER, round_id, 10_000 * ETHER).unwrap();
    let ticket_id = machine.buy_ticket(&OWNER, round_id, 1_123_456).unwrap();
    close_and_draw(&mut machine, round_id, 1_123_456);

    let round = machine.round(round_id).unwrap();
    assert_eq!(round.final_number, Some(1_123_456));
    assert_eq!(round.winners_per_bracket, [1; 6]);
    assert_eq!(round.reward_per_bracket[5], 5_000 * ETHER + 2_500);
    assert_eq!(
        machine.view_rewards_for_ticket(round_id, ticket_id, 5).unwrap(),
        5_000 * ETHER + 2_500
    );

    let owner_before = machine.ledger().balance_of(&OWNER);
    let paid = machine.claim_ticket(&OWNER, round_id, ticket_id, 5).unwrap();

    assert_eq!(paid, 5_000 * ETHER + 2_500);
    assert_eq!(machine.ledger().balance_of(&MACHINE), 5_000 * ETHER + 2_500);
    assert_eq!(machine.ledger().balance_of(&OWNER), owner_before + paid);
    assert_eq!(machine.view_rewards_for_ticket(round_id, ticket_id, 5).unwrap(), 0);
    assert_eq!(
        machine.claim_ticket(&OWNER, round_id, ticket_id, 5).unwrap_err(),
        LotteryError::AlreadyClaimed.into()
    );
}

#[test]
fn two_five_digit_matches_split_their_bracket() {
    let mut machine = fixture();
    let round_id = machine
        .start_lottery(&OWNER, [500, 500, 500, 500, 2_000, 6_000], PRICE)
        .unwrap();
    machine.inject_funds(&OWNER, round_id, 10_000 * ETHER).unwrap();
    let owner_ticket = machine.buy_ticket(&OWNER, round_id, 1_023_456).unwrap();
    let other_ticket = machine.buy_ticket(&OTHER, round_id, 1_323_456).unwrap();
    assert_eq!(machine.view_user_tickets(round_id, &OWNER).unwrap()[0].best_bracket, None);
    close_and_draw(&mut machine, round_id, 1_123_456);

    let owner_tickets = machine.view_user_tickets(round_id, &OWNER).unwrap();
    assert_eq!(owner_tickets[0].ticket_id, owner_ticket);
    assert_eq!(owner_tickets[0].best_bracket, Some(4));
    // a five-digit match also wins every shorter suffix
    assert_eq!(
        machine.view_rewards_for_ticket(round_id, owner_ticket, 3).unwrap(),
        250 * ETHER + 250
    );
    assert_eq!(machine.view_rewards_for_ticket(round_id, owner_ticket, 5).unwrap(), 0);

    let round = machine.round(round_id).unwrap();
    assert_eq!(round.winners_per_bracket[4], 2);
    assert_eq!(round.winners_per_bracket[5], 0);
    assert_eq!(round.reward_per_bracket[5], 0);
    assert_eq!(
        machine.claim_ticket(&OWNER, round_id, owner_ticket, 5).unwrap_err(),
        LotteryError::BracketNotEligible.into()
    );

    let first = machine.claim_ticket(&OWNER, round_id, owner_ticket, 4).unwrap();
    let second = machine.claim_ticket(&OTHER, round_id, other_ticket, 4).unwrap();

    assert_eq!(first, 1_000 * ETHER + 1_000);
    assert_eq!(second, first);
    assert_eq!(machine.ledger().balance_of(&MACHINE), 8_000 * ETHER + 8_000);
    assert_eq!(
        machine.ledger().balance_of(&OTHER),
        10_000 * ETHER - PRICE + second
    );
}

#[test]
fn round_status_only_moves_forward() {
    let mut machine = fixture();
    let round_id = machine
        .start_lottery(&OWNER, [500, 500, 500, 500, 3_000, 5_000], PRICE)
        .unwrap();
    machine.buy_tickets(&OTHER, round_id, &[1_000_001, 1_000_002]).unwrap();
    machine.close_lottery(&OWNER, round_id).unwrap();

    assert_eq!(
        machine.close_lottery(&OWNER, round_id).unwrap_err(),
        LotteryError::InvalidState.into()
    );
    assert_eq!(
        machine.buy_ticket(&OTHER, round_id, 1_000_003).unwrap_err(),
        LotteryError::InvalidState.into()
    );
    assert_eq!(
        machine
            .draw_final_number_and_make_lottery_claimable(&OWNER, round_id)
            .unwrap_err(),
        LotteryError::RandomnessNotReady.into()
    );

    let request_id = machine.round(round_id).unwrap().pending_request.unwrap();
    machine.rng_mut().fulfill_random_words(&request_id).unwrap();
    let final_number = machine
        .draw_final_number_and_make_lottery_claimable(&OWNER, round_id)
        .unwrap();
    assert!((1_000_000..=1_999_999).contains(&final_number));

    let round = machine.round(round_id).unwrap();
    assert_eq!(round.status, RoundStatus::Claimable);
    assert_eq!(round.status as u8, 3);
    assert_eq!(
        machine.inject_funds(&INJECTOR, round_id, 1).unwrap_err(),
        LotteryError::InvalidState.into()
    );
    assert_eq!(
        machine.close_lottery(&OWNER, round_id).unwrap_err(),
        LotteryError::InvalidState.into()
    );
}

#[test]
fn sequential_rounds_keep_separate_books() {
    let mut machine = fixture();
    let breakdown = [0, 0, 0, 0, 0, 10_000];

    let first = machine.start_lottery(&OWNER, breakdown, PRICE).unwrap();
    machine.buy_ticket(&OTHER, first, 1_654_321).unwrap();
    close_and_draw(&mut machine, first, 1_000_000);

    let second = machine.start_lottery(&OWNER, breakdown, 2 * PRICE).unwrap();
    assert_eq!(second, first + 1);
    assert_eq!(machine.current_round_id(), second);
    machine.buy_ticket(&OTHER, second, 1_654_321).unwrap();
    close_and_draw(&mut machine, second, 1_654_321);

    // nobody hit the first jackpot; its funds stay in the pool
    assert_eq!(machine.round(first).unwrap().reward_per_bracket, [0; 6]);
    assert_eq!(machine.round(first).unwrap().amount_collected, PRICE);
    assert_eq!(
        machine.round(second).unwrap().reward_per_bracket[5],
        2 * PRICE
    );
    assert_eq!(machine.view_user_tickets(second, &OTHER).unwrap().len(), 1);

    let paid = machine.claim_ticket(&OTHER, second, 0, 5).unwrap();
    assert_eq!(paid, 2 * PRICE);
    assert_eq!(machine.ledger().balance_of(&MACHINE), PRICE);
    assert_eq!(
        machine.round(3).unwrap_err(),
        LotteryError::RoundNotFound.into()
    );
}

#[test]
fn claims_never_exceed_collected_amount() {
    let mut machine = fixture();
    let round_id = machine
        .start_lottery(&OWNER, [1_000, 1_000, 1_000, 1_000, 1_000, 5_000], PRICE)
        .unwrap();
    let numbers: Vec<u32> = (0..40).map(|i| 1_000_000 + i * 24_999).collect();
    machine.buy_tickets(&OTHER, round_id, &numbers).unwrap();
    close_and_draw(&mut machine, round_id, numbers[7]);

    let tickets = machine.view_user_tickets(round_id, &OTHER).unwrap();
    let mut claims = Vec::new();
    for ticket in &tickets {
        for bracket in 0..6u8 {
            if machine
                .view_rewards_for_ticket(round_id, ticket.ticket_id, bracket)
                .unwrap()
                > 0
            {
                claims.push(TicketClaim {
                    ticket_id: ticket.ticket_id,
                    bracket,
                });
            }
        }
    }
    let paid = machine.claim_tickets(&OTHER, round_id, &claims).unwrap();

    let round = machine.round(round_id).unwrap();
    assert!(paid <= round.amount_collected);
    assert_eq!(round.amount_claimed, paid);
    assert_eq!(round.unclaimed_amount(), round.amount_collected - paid);
    assert_eq!(machine.ledger().balance_of(&MACHINE), round.unclaimed_amount());
}

#[test]
fn full_round_through_instruction_bytes() {
    let mut machine = fixture();
    let start = StartLotteryArgs {
        reward_breakdown: [500, 500, 500, 500, 3_000, 5_000],
        ticket_price: PRICE,
    };
    process_instruction(&mut machine, &OWNER, &start.to_ix_data()).unwrap();

    let inject = InjectFundsArgs {
        round_id: 1,
        amount: 10_000 * ETHER,
    };
    process_instruction(&mut machine, &OWNER, &inject.to_ix_data()).unwrap();

    let buy = BuyTicketsArgs {
        round_id: 1,
        numbers: vec![1_123_456],
    };
    process_instruction(&mut machine, &OWNER, &buy.to_ix_data()).unwrap();
    process_instruction(&mut machine, &OWNER, &round_id_ix_data("close_lottery", 1)).unwrap();

    let request_id = machine.rng().last_request_id().unwrap();
    machine
        .rng_mut()
        .fulfill_random_words_with_value(&request_id, 1_123_456)
        .unwrap();
    let draw = round_id_ix_data("draw_final_number_and_make_lottery_claimable", 1);
    process_instruction(&mut machine, &OWNER, &draw).unwrap();

    let claim = ClaimTicketsArgs {
        round_id: 1,
        claims: vec![TicketClaim {
            ticket_id: 0,
            bracket: 5,
        }],
    };
    process_instruction(&mut machine, &OWNER, &claim.to_ix_data()).unwrap();
    assert_eq!(machine.ledger().balance_of(&MACHINE), 5_000 * ETHER + 2_500);

    let events = machine.drain_events();
    assert_eq!(events.len(), 6);
    assert!(matches!(
        &events[4],
        LotteryEvent::LotteryNumberDrawn(LotteryNumberDrawn {
            final_number: 1_123_456,
            ..
        })
    ));
    assert_eq!(
        events[5],
        LotteryEvent::TicketsClaim(TicketsClaim {
            round_id: 1,
            claimer: OWNER,
            amount: 5_000 * ETHER + 2_500,
            claims: vec![(0, 5)],
        })
    );
    assert!(machine.events().is_empty());
}
