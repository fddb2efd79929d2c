multiversx_sc::imports!();

// ============================================================
// Ballot storage accounting
// ============================================================

/// Flat cost of allocating one ballot entry
pub const BALLOT_DEPOSIT_BASE: u64 = 2_500;

/// Cost per byte of ballot key + value
pub const BALLOT_DEPOSIT_PER_BYTE: u64 = 400;

/// Ballots are keyed by the voter's 32-byte address
pub const BALLOT_KEY_LEN: u64 = 32;

/// A ballot value is a single bool
pub const BALLOT_VALUE_LEN: u64 = 1;

/// Membership ledger: one ballot per voter, each backed by a storage
/// deposit the voter pays on entry and gets back on exit.
///
/// The tallies are never recomputed from the map. Every insert and
/// delete goes through `record_ballot` / `forget_ballot`, which keep
/// `votesTotal`, `votesInFavor` and `reservedBalance` in lock-step
/// with `ballots`.
#[multiversx_sc::module]
pub trait BallotBoxModule {
    fn ballot_deposit(&self) -> BigUint {
        BigUint::from(
            BALLOT_DEPOSIT_BASE + BALLOT_DEPOSIT_PER_BYTE * (BALLOT_KEY_LEN + BALLOT_VALUE_LEN),
        )
    }

    /// Stores the voter's ballot and bumps the tallies.
    /// Returns how much the reserved balance grew.
    fn record_ballot(&self, voter: &ManagedAddress, in_favor: bool) -> BigUint {
        let reserved_before = self.reserved_balance().get();

        let previous = self.ballots().insert(voter.clone(), in_favor);
        require!(previous.is_none(), "Already voted");

        let deposit = self.ballot_deposit();
        self.reserved_balance().update(|reserved| *reserved += &deposit);
        self.votes_total().update(|total| *total += 1);
        if in_favor {
            self.votes_in_favor().update(|in_favor_count| *in_favor_count += 1);
        }

        self.reserved_balance().get() - reserved_before
    }

    /// Drops the voter's ballot, if any, and reverts its tally contribution.
    /// Returns the recorded direction and the deposit it freed.
    /// Never fails: a voter without a ballot is left untouched.
    fn forget_ballot(&self, voter: &ManagedAddress) -> Option<(bool, BigUint)> {
        let in_favor = self.ballots().remove(voter)?;
        let reserved_before = self.reserved_balance().get();

        self.votes_total().update(|total| *total -= 1);
        if in_favor {
            self.votes_in_favor().update(|in_favor_count| *in_favor_count -= 1);
        }

        let deposit = self.ballot_deposit();
        self.reserved_balance().update(|reserved| *reserved -= &deposit);

        let freed = reserved_before - self.reserved_balance().get();
        Some((in_favor, freed))
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getBallot)]
    fn get_ballot(&self, voter: &ManagedAddress) -> OptionalValue<bool> {
        self.ballots().get(voter).into()
    }

    #[view(getBallotDeposit)]
    fn get_ballot_deposit(&self) -> BigUint {
        self.ballot_deposit()
    }

    #[view(getReservedBalance)]
    fn get_reserved_balance(&self) -> BigUint {
        self.reserved_balance().get()
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("ballots")]
    fn ballots(&self) -> MapMapper<ManagedAddress, bool>;

    #[storage_mapper("votesTotal")]
    fn votes_total(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("votesInFavor")]
    fn votes_in_favor(&self) -> SingleValueMapper<u64>;

    /// Sum of the deposits held for live ballots
    #[storage_mapper("reservedBalance")]
    fn reserved_balance(&self) -> SingleValueMapper<BigUint>;
}
