#![no_std]

multiversx_sc::imports!();

pub mod ballot_box;
pub mod types;

use types::{DaoState, VoterStatus};

// ============================================================
// Constants
// ============================================================

/// Fixed supply of the membership credential. The DAO keeps custody of every
/// unit; a registered voter's unit is recorded against them in storage.
const CREDENTIAL_SUPPLY: u64 = 1_000;

/// Credential units are indivisible: one unit, one voter
const CREDENTIAL_DECIMALS: usize = 0;

const CREDENTIAL_DISPLAY_NAME: &[u8] = b"DaoCredential";

const CREDENTIAL_TICKER: &[u8] = b"DAOCRED";

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait CredentialDao: ballot_box::BallotBoxModule {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    /// Creates the DAO around a single proposal. Voting stays open for
    /// `length` seconds from the deploy block.
    #[init]
    fn init(&self, proposal: ManagedBuffer, length: u64) {
        let now = self.blockchain().get_block_timestamp();
        let end_time = match now.checked_add(length) {
            Some(end_time) => end_time,
            None => sc_panic!("Voting length overflows the clock"),
        };

        self.proposal().set(&proposal);
        self.end_time().set(end_time);
        self.votes_total().set(0u64);
        self.votes_in_favor().set(0u64);
        self.reserved_balance().set(BigUint::zero());
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: bootstrap
    // Issues the membership credential. One-shot, owner only.
    // The attached EGLD pays the system issuance fee.
    // ========================================================

    #[endpoint(bootstrap)]
    #[payable("EGLD")]
    fn bootstrap(&self) {
        self.blockchain().check_caller_is_owner();
        require!(
            self.registered_credential().is_empty(),
            "Credential already issued"
        );
        require!(
            !self.credential_issuance_pending().get(),
            "Credential issuance in progress"
        );

        let caller = self.blockchain().get_caller();
        let issue_cost = self.call_value().egld_value().clone_value();
        self.credential_issuance_pending().set(true);

        // Freeze + wipe give the DAO, as token manager, freeze and clawback authority
        self.send()
            .esdt_system_sc_tx()
            .issue_fungible(
                issue_cost,
                &ManagedBuffer::from(CREDENTIAL_DISPLAY_NAME),
                &ManagedBuffer::from(CREDENTIAL_TICKER),
                &BigUint::from(CREDENTIAL_SUPPLY),
                FungibleTokenProperties {
                    num_decimals: CREDENTIAL_DECIMALS,
                    can_freeze: true,
                    can_wipe: true,
                    can_mint: false,
                    can_burn: false,
                    ..Default::default()
                },
            )
            .callback(self.callbacks().credential_issue_callback(&caller))
            .async_call_and_exit();
    }

    /// Receives the initial supply on success; refunds the issue fee on failure.
    /// The supply stays with the DAO as the pool that `register` draws from.
    #[callback]
    fn credential_issue_callback(
        &self,
        owner: &ManagedAddress,
        #[call_result] result: ManagedAsyncCallResult<()>,
    ) {
        let (token_id, returned) = self.call_value().egld_or_single_fungible_esdt();
        self.credential_issuance_pending().clear();

        match result {
            ManagedAsyncCallResult::Ok(()) => {
                let credential = token_id.unwrap_esdt();
                self.registered_credential().set(&credential);
                self.credential_issued_event(&credential, &returned);
            }
            ManagedAsyncCallResult::Err(_) => {
                if token_id.is_egld() && returned > 0u64 {
                    self.send().direct_egld(owner, &returned);
                }
                self.credential_issue_failed_event(owner);
            }
        }
    }

    // ========================================================
    // ENDPOINT: register
    // Assigns one unit from the DAO's pool to a caller who
    // holds none. The unit never leaves the DAO's account, so
    // it cannot be passed on to another address.
    // ========================================================

    #[endpoint(register)]
    fn register(&self) {
        let caller = self.blockchain().get_caller();
        self.require_credential();

        require!(
            !self.credential_holders().contains(&caller),
            "Already registered"
        );
        require!(self.credentials_available() > 0, "No credentials left");

        self.credential_holders().insert(caller.clone());

        self.register_event(&caller);
    }

    // ========================================================
    // ENDPOINT: vote
    // One ballot per credential holder, paid for by an exact
    // EGLD deposit covering the ballot's storage.
    // ========================================================

    #[endpoint(vote)]
    #[payable("EGLD")]
    fn vote(&self, in_favor: bool) {
        let now = self.blockchain().get_block_timestamp();
        require!(now < self.end_time().get(), "Voting period has ended");

        let caller = self.blockchain().get_caller();
        self.require_credential();
        require!(self.credential_holders().contains(&caller), "Not registered");

        let payment = self.call_value().egld_value().clone_value();
        let deposit = self.record_ballot(&caller, in_favor);
        require!(payment == deposit, "Payment must equal the ballot deposit");

        self.vote_event(&caller, in_favor, &deposit);
    }

    // ========================================================
    // ENDPOINT: deregister
    // Caller hands their credential unit back to the pool. Any
    // live ballot is withdrawn and its deposit refunded.
    // ========================================================

    #[endpoint(deregister)]
    fn deregister(&self) {
        let caller = self.blockchain().get_caller();
        self.require_credential();
        require!(self.credential_holders().contains(&caller), "Not registered");

        let refund = self.release_membership(&caller);

        self.deregister_event(&caller, &refund);
    }

    // ========================================================
    // ENDPOINT: clearState
    // Exit path that cannot fail. Withdraws the ballot, refunds
    // its deposit and returns any held unit to the pool.
    // ========================================================

    #[endpoint(clearState)]
    fn clear_state(&self) {
        let caller = self.blockchain().get_caller();
        let refund = self.release_membership(&caller);

        self.clear_state_event(&caller, &refund);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_credential(&self) {
        require!(
            !self.registered_credential().is_empty(),
            "Credential not issued yet"
        );
    }

    /// Units still in the pool. Zero before bootstrap.
    fn credentials_available(&self) -> u64 {
        if self.registered_credential().is_empty() {
            return 0;
        }
        CREDENTIAL_SUPPLY - self.credential_holders().len() as u64
    }

    /// Forgets the holder's ballot, refunds its deposit and returns the
    /// held unit to the pool. No failure paths: shared by deregister and clearState.
    fn release_membership(&self, holder: &ManagedAddress) -> BigUint {
        let refund = match self.forget_ballot(holder) {
            Some((in_favor, freed)) => {
                if freed > 0u64 {
                    self.send().direct_egld(holder, &freed);
                }
                self.vote_forgotten_event(holder, in_favor);
                freed
            }
            None => BigUint::zero(),
        };

        self.credential_holders().swap_remove(holder);
        refund
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getProposal)]
    fn get_proposal(&self) -> ManagedBuffer {
        self.proposal().get()
    }

    #[view(getRegisteredCredential)]
    fn get_registered_credential(&self) -> OptionalValue<TokenIdentifier> {
        if self.registered_credential().is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(self.registered_credential().get())
        }
    }

    /// (votes in favor, votes total)
    #[view(getVotes)]
    fn get_votes(&self) -> MultiValue2<u64, u64> {
        (self.votes_in_favor().get(), self.votes_total().get()).into()
    }

    #[view(getEndTime)]
    fn get_end_time(&self) -> u64 {
        self.end_time().get()
    }

    #[view(isVotingOpen)]
    fn is_voting_open(&self) -> bool {
        self.blockchain().get_block_timestamp() < self.end_time().get()
    }

    #[view(getDaoState)]
    fn get_dao_state(&self) -> DaoState<Self::Api> {
        let registered_credential = if self.registered_credential().is_empty() {
            None
        } else {
            Some(self.registered_credential().get())
        };

        DaoState {
            proposal: self.proposal().get(),
            end_time: self.end_time().get(),
            registered_credential,
            votes_in_favor: self.votes_in_favor().get(),
            votes_total: self.votes_total().get(),
            holder_count: self.credential_holders().len() as u64,
            credentials_available: self.credentials_available(),
            reserved_balance: self.reserved_balance().get(),
        }
    }

    #[view(getVoterStatus)]
    fn get_voter_status(&self, voter: &ManagedAddress) -> VoterStatus {
        VoterStatus {
            holds_credential: self.credential_holders().contains(voter),
            ballot: self.ballots().get(voter),
        }
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("credentialIssued")]
    fn credential_issued_event(&self, #[indexed] token_id: &TokenIdentifier, supply: &BigUint);

    #[event("credentialIssueFailed")]
    fn credential_issue_failed_event(&self, #[indexed] owner: &ManagedAddress);

    #[event("register")]
    fn register_event(&self, #[indexed] voter: &ManagedAddress);

    #[event("vote")]
    fn vote_event(
        &self,
        #[indexed] voter: &ManagedAddress,
        #[indexed] in_favor: bool,
        deposit: &BigUint,
    );

    #[event("voteForgotten")]
    fn vote_forgotten_event(&self, #[indexed] voter: &ManagedAddress, #[indexed] in_favor: bool);

    #[event("deregister")]
    fn deregister_event(&self, #[indexed] voter: &ManagedAddress, refund: &BigUint);

    #[event("clearState")]
    fn clear_state_event(&self, #[indexed] voter: &ManagedAddress, refund: &BigUint);

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Proposal ──

    #[storage_mapper("proposal")]
    fn proposal(&self) -> SingleValueMapper<ManagedBuffer>;

    #[storage_mapper("endTime")]
    fn end_time(&self) -> SingleValueMapper<u64>;

    // ── Credential ──

    #[storage_mapper("registeredCredential")]
    fn registered_credential(&self) -> SingleValueMapper<TokenIdentifier>;

    #[storage_mapper("credentialIssuancePending")]
    fn credential_issuance_pending(&self) -> SingleValueMapper<bool>;

    // ── Membership ──

    /// Addresses with one unit assigned out of the DAO's pool
    #[storage_mapper("credentialHolders")]
    fn credential_holders(&self) -> UnorderedSetMapper<ManagedAddress>;
}
