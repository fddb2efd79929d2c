multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// DAO State — everything a client needs to render the proposal
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct DaoState<M: ManagedTypeApi> {
    pub proposal: ManagedBuffer<M>,
    /// Block timestamp (seconds) after which votes are rejected
    pub end_time: u64,
    /// None until the bootstrap issuance callback has landed
    pub registered_credential: Option<TokenIdentifier<M>>,
    pub votes_in_favor: u64,
    pub votes_total: u64,
    pub holder_count: u64,
    /// Units left in the pool for new registrations
    pub credentials_available: u64,
    pub reserved_balance: BigUint<M>,
}

// ============================================================
// Voter Status — per-address view of registration and ballot
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct VoterStatus {
    /// Holds a unit out of the DAO's pool that has not been handed back
    pub holds_credential: bool,
    /// Some(in_favor) while a ballot is live
    pub ballot: Option<bool>,
}
