//! End-to-end tests for the random IPFS minting service, driven through the
//! mock coordinator the way a development network would.

use mint_engine::mocks::MockVrfCoordinator;
use mint_engine::{AccountId, Breed, MintError, RandomIpfsNft, RandomMintEvent, MINT_FEE};

fn account(n: u8) -> AccountId {
    AccountId::new([n; 32])
}

fn token_uris() -> [String; 3] {
    [
        "ipfs://bafyreif4zieo5ypuzynouu2crh4qdwnrnhaoaiy6ea4c2x3yilwyubpsmm/metadata.json".into(),
        "ipfs://bafyreiehq2yg6pkmbwtey2osrfdoelvj5m5fpzonf6bm6jlky6rm7szeem/metadata.json".into(),
        "ipfs://bafyreig6shgydpkas2uim5tp7xoywl4fzkor4alw2gzqgvustcdglez65i/metadata.json".into(),
    ]
}

fn deploy() -> RandomIpfsNft<MockVrfCoordinator> {
    RandomIpfsNft::new(MockVrfCoordinator::new(), account(0), token_uris())
}

#[test]
fn initializes_with_zero_token_counter() {
    let nft = deploy();
    assert_eq!(nft.get_token_counter(), 0);
    assert_eq!(nft.get_treasury_balance(), 0);
    assert_eq!(nft.get_mint_fee(), MINT_FEE);
    assert_eq!(*nft.owner(), account(0));
    assert!(nft.events().is_empty());
}

#[test]
fn breed_query_covers_every_range() {
    let nft = deploy();
    for n in 0..10 {
        assert_eq!(nft.breed_from_modded_rng(n).unwrap(), Breed::Pug);
    }
    for n in 10..40 {
        assert_eq!(nft.breed_from_modded_rng(n).unwrap(), Breed::Shiba);
    }
    for n in 40..100 {
        assert_eq!(nft.breed_from_modded_rng(n).unwrap(), Breed::StBernard);
    }
    for n in [100, 101] {
        assert_eq!(
            nft.breed_from_modded_rng(n),
            Err(MintError::RangeOutOfBounds { modded: n })
        );
    }
}

#[test]
fn rejects_payments_below_the_mint_fee() {
    let mut nft = deploy();
    // 0.001 and 0.0099 native units, in base units
    for paid in [1_000_000, 9_900_000] {
        assert_eq!(
            nft.request_nft(account(1), paid),
            Err(MintError::InsufficientFee {
                paid,
                required: MINT_FEE,
            })
        );
    }
    assert_eq!(nft.get_treasury_balance(), 0);
    assert!(nft.pending_requests().is_empty());
}

#[test]
fn records_each_sender_and_accumulates_the_treasury() {
    let mut nft = deploy();

    for n in 1..=5 {
        let requester = account(n);
        let before = nft.get_treasury_balance();

        let event = nft.request_nft(requester, MINT_FEE).unwrap();

        assert_eq!(event.requester, requester);
        assert_eq!(*nft.get_sender(event.request_id).unwrap(), requester);
        assert_eq!(nft.get_treasury_balance(), before + MINT_FEE);
    }
}

#[test]
fn withdraw_is_rejected_for_non_owners() {
    let mut nft = deploy();
    nft.request_nft(account(1), MINT_FEE).unwrap();

    assert_eq!(nft.withdraw(account(1)), Err(MintError::NotOwner));
    assert_eq!(nft.get_treasury_balance(), MINT_FEE);
}

#[test]
fn owner_withdraw_drains_the_full_balance() {
    let mut nft = deploy();
    for n in 1..=4 {
        nft.request_nft(account(n), MINT_FEE).unwrap();
    }
    let balance = nft.get_treasury_balance();

    let paid_out = nft.withdraw(account(0)).unwrap();

    assert_eq!(paid_out, balance);
    assert_eq!(nft.get_treasury_balance(), 0);
}

#[test]
fn fulfillment_increments_the_counter_and_assigns_the_requester() {
    let mut nft = deploy();
    let requester = account(1);

    let event = nft.request_nft(requester, MINT_FEE).unwrap();
    assert_eq!(nft.get_token_counter(), 0);

    let minted = MockVrfCoordinator::fulfill(&mut nft, event.request_id).unwrap();

    assert_eq!(nft.get_token_counter(), 1);
    assert_eq!(minted.owner, requester);
    assert_eq!(*nft.token_owner(0).unwrap(), requester);
    assert!(nft.token_uri(0).unwrap().starts_with("ipfs://"));
}

#[test]
fn interleaved_requests_keep_their_requesters() {
    let mut nft = deploy();

    let first = nft.request_nft(account(1), MINT_FEE).unwrap();
    let second = nft.request_nft(account(2), MINT_FEE).unwrap();
    let third = nft.request_nft(account(3), MINT_FEE).unwrap();
    assert_ne!(first.request_id, second.request_id);
    assert_ne!(second.request_id, third.request_id);
    assert_eq!(nft.pending_requests().len(), 3);

    // Fulfillment order differs from request order.
    let minted_second = MockVrfCoordinator::fulfill(&mut nft, second.request_id).unwrap();
    let minted_third = MockVrfCoordinator::fulfill(&mut nft, third.request_id).unwrap();
    let minted_first = MockVrfCoordinator::fulfill(&mut nft, first.request_id).unwrap();

    assert_eq!(minted_second.owner, account(2));
    assert_eq!(minted_third.owner, account(3));
    assert_eq!(minted_first.owner, account(1));
    assert_eq!(nft.get_token_counter(), 3);
    assert!(nft.pending_requests().is_empty());
}

#[test]
fn replayed_fulfillment_fails_loudly_with_no_state_change() {
    let mut nft = deploy();
    let event = nft.request_nft(account(1), MINT_FEE).unwrap();
    MockVrfCoordinator::fulfill(&mut nft, event.request_id).unwrap();

    let counter = nft.get_token_counter();
    let treasury = nft.get_treasury_balance();

    assert_eq!(
        MockVrfCoordinator::fulfill(&mut nft, event.request_id),
        Err(MintError::UnknownRequest {
            request_id: event.request_id,
        })
    );
    assert_eq!(nft.get_token_counter(), counter);
    assert_eq!(nft.get_treasury_balance(), treasury);
}

#[test]
fn fulfillment_for_an_unissued_request_is_rejected() {
    let mut nft = deploy();
    assert_eq!(
        nft.fulfill_random_words(999, &[42]),
        Err(MintError::UnknownRequest { request_id: 999 })
    );
}

#[test]
fn empty_random_words_abort_the_callback() {
    let mut nft = deploy();
    let event = nft.request_nft(account(1), MINT_FEE).unwrap();

    assert_eq!(
        nft.fulfill_random_words(event.request_id, &[]),
        Err(MintError::EmptyRandomWords {
            request_id: event.request_id,
        })
    );
    // The request survives the bad delivery and can still be fulfilled.
    assert_eq!(*nft.get_sender(event.request_id).unwrap(), account(1));
    MockVrfCoordinator::fulfill(&mut nft, event.request_id).unwrap();
}

#[test]
fn token_uri_for_an_unminted_id_is_rejected() {
    let nft = deploy();
    assert_eq!(
        nft.token_uri(12133),
        Err(MintError::NonexistentToken { token_id: 12133 })
    );
}

#[test]
fn events_are_logged_in_emission_order() {
    let mut nft = deploy();
    let requested = nft.request_nft(account(1), MINT_FEE).unwrap();
    let minted = MockVrfCoordinator::fulfill(&mut nft, requested.request_id).unwrap();

    assert_eq!(
        nft.events(),
        [
            RandomMintEvent::MintRequested(requested),
            RandomMintEvent::NftMinted(minted),
        ]
    );
}
