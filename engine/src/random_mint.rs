//! Two-phase random minting state machine.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::account::AccountId;
use crate::breed::{Breed, MAX_CHANCE_VALUE};
use crate::error::MintError;
use crate::events::{MintRequested, NftMinted, RandomMintEvent};
use crate::oracle::{RandomnessOracle, RequestId};
use crate::TokenId;

/// Minimum payment to open a mint request: 0.01 native units, expressed in
/// base units with 9 decimals.
pub const MINT_FEE: u64 = 10_000_000;

/// A finalized random mint.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MintedNft {
    owner: AccountId,
    breed: Breed,
}

/// Random IPFS NFT minting service.
///
/// Each request moves through `Idle → Requested → Fulfilled` independently;
/// unboundedly many may be in flight at once. The asynchronous gap between
/// [`request_nft`](Self::request_nft) and
/// [`fulfill_random_words`](Self::fulfill_random_words) is the only place
/// other operations interleave, and request ledger entries stay isolated per
/// request id across it.
pub struct RandomIpfsNft<O> {
    oracle: O,
    /// Deploying owner; sole identity allowed to withdraw the treasury.
    owner: AccountId,
    mint_fee: u64,
    treasury_balance: u64,
    token_counter: TokenId,
    /// Pending request ledger: the join table that lets an asynchronous
    /// fulfillment find out who should receive the token. Entries are
    /// removed when consumed, so a replayed request id is unknown.
    requests: HashMap<RequestId, AccountId>,
    tokens: HashMap<TokenId, MintedNft>,
    /// Pre-resolved `ipfs://` content URI per breed, in breed order.
    token_uris: [String; 3],
    events: Vec<RandomMintEvent>,
}

impl<O: RandomnessOracle> RandomIpfsNft<O> {
    /// Create a service instance owned by `owner`, minting from the three
    /// pre-resolved per-breed content URIs. Token ids start at 0.
    pub fn new(oracle: O, owner: AccountId, token_uris: [String; 3]) -> Self {
        Self {
            oracle,
            owner,
            mint_fee: MINT_FEE,
            treasury_balance: 0,
            token_counter: 0,
            requests: HashMap::new(),
            tokens: HashMap::new(),
            token_uris,
            events: Vec::new(),
        }
    }

    /// Pay the mint fee and open a randomness request. No token is minted
    /// yet; the mint finalizes when the oracle calls back
    /// [`fulfill_random_words`](Self::fulfill_random_words).
    pub fn request_nft(
        &mut self,
        caller: AccountId,
        paid_amount: u64,
    ) -> Result<MintRequested, MintError> {
        if paid_amount < self.mint_fee {
            return Err(MintError::InsufficientFee {
                paid: paid_amount,
                required: self.mint_fee,
            });
        }

        let request_id = self.oracle.request_random_words();
        self.requests.insert(request_id, caller);
        self.treasury_balance += paid_amount;

        info!(request_id, requester = %caller, paid_amount, "mint requested");

        let event = MintRequested {
            request_id,
            requester: caller,
        };
        self.events
            .push(RandomMintEvent::MintRequested(event.clone()));
        Ok(event)
    }

    /// Oracle callback: finalize the mint for `request_id`.
    ///
    /// Arrives at most once per request id, arbitrarily later than the
    /// request. All checks run before any mutation, so a failing callback
    /// leaves no trace: no counter increment, no ownership, no event.
    pub fn fulfill_random_words(
        &mut self,
        request_id: RequestId,
        random_words: &[u64],
    ) -> Result<NftMinted, MintError> {
        let owner = self
            .requests
            .get(&request_id)
            .copied()
            .ok_or(MintError::UnknownRequest { request_id })?;
        let word = random_words
            .first()
            .copied()
            .ok_or(MintError::EmptyRandomWords { request_id })?;

        let modded = word % MAX_CHANCE_VALUE;
        let breed = Breed::from_modded_rng(modded)?;

        self.requests.remove(&request_id);
        let token_id = self.token_counter;
        self.tokens.insert(token_id, MintedNft { owner, breed });
        self.token_counter += 1;

        info!(request_id, token_id, %breed, owner = %owner, "nft minted");

        let event = NftMinted { breed, owner };
        self.events.push(RandomMintEvent::NftMinted(event.clone()));
        Ok(event)
    }

    /// Map a modded rng value to a breed. Pure query.
    pub fn breed_from_modded_rng(&self, modded: u64) -> Result<Breed, MintError> {
        Breed::from_modded_rng(modded)
    }

    /// Withdraw the entire treasury. Owner-only; zeroes the balance and
    /// returns the amount paid out.
    pub fn withdraw(&mut self, caller: AccountId) -> Result<u64, MintError> {
        if caller != self.owner {
            return Err(MintError::NotOwner);
        }
        let amount = self.treasury_balance;
        self.treasury_balance = 0;
        debug!(amount, "treasury withdrawn");
        Ok(amount)
    }

    /// Content URI of a minted token: the stored breed's `ipfs://` locator.
    pub fn token_uri(&self, token_id: TokenId) -> Result<&str, MintError> {
        let minted = self
            .tokens
            .get(&token_id)
            .ok_or(MintError::NonexistentToken { token_id })?;
        Ok(&self.token_uris[minted.breed.index()])
    }

    /// Owner of a minted token.
    pub fn token_owner(&self, token_id: TokenId) -> Result<&AccountId, MintError> {
        self.tokens
            .get(&token_id)
            .map(|minted| &minted.owner)
            .ok_or(MintError::NonexistentToken { token_id })
    }

    /// Requester recorded for a pending request id.
    pub fn get_sender(&self, request_id: RequestId) -> Result<&AccountId, MintError> {
        self.requests
            .get(&request_id)
            .ok_or(MintError::UnknownRequest { request_id })
    }

    /// Number of finalized mints; also the next token id.
    pub fn get_token_counter(&self) -> TokenId {
        self.token_counter
    }

    pub fn get_mint_fee(&self) -> u64 {
        self.mint_fee
    }

    pub fn get_treasury_balance(&self) -> u64 {
        self.treasury_balance
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Requests still waiting for a fulfillment, as re-emittable events.
    pub fn pending_requests(&self) -> Vec<MintRequested> {
        self.requests
            .iter()
            .map(|(&request_id, &requester)| MintRequested {
                request_id,
                requester,
            })
            .collect()
    }

    /// Ordered log of every event this instance emitted.
    pub fn events(&self) -> &[RandomMintEvent] {
        &self.events
    }
}
